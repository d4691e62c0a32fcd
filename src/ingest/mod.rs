//! Watermark-driven log ingestion.
//!
//! The table log is append-only and the Observer may hand back lines out
//! of order, twice, or long after they were written. [`LogCursor`] turns
//! that into a strictly ordered, at-most-once stream of [`LogEvent`]s.
mod cursor;

pub use cursor::*;

use crate::observer::Observer;
use crate::parse::*;
use crate::*;
use std::collections::BTreeSet;

/// One ingestion step: the events parsed from lines newer than the
/// watermark, and the watermark to use next time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedLogs {
    pub valid_events: Vec<LogEvent>,
    pub last_seen_id: Option<LogId>,
    pub first_fetch: bool,
}

/// Fetches, orders, de-duplicates, and parses everything past `last_seen_id`.
///
/// The watermark moves to the newest line fetched whether or not that
/// line parsed, so a bad line is never parsed twice. An Observer failure
/// leaves nothing changed and surfaces as [`Error::Ingestion`].
pub async fn pull_and_process_logs<O>(
    observer: &mut O,
    last_seen_id: Option<&LogId>,
    first_fetch: bool,
) -> Result<ProcessedLogs>
where
    O: Observer + ?Sized,
{
    let since = if first_fetch { None } else { last_seen_id };
    let mut lines = observer
        .fetch_log_lines_since(since)
        .await
        .map_err(Error::Ingestion)?;
    lines.sort_by(|a, b| a.id.cmp(&b.id));
    let mut seen = BTreeSet::new();
    let fresh = lines
        .into_iter()
        .filter(|line| since.is_none_or(|w| line.id > *w))
        .filter(|line| seen.insert(line.id.clone()))
        .collect::<Vec<_>>();
    let (valid_events, errors) = parse_batch(&fresh);
    for e in errors.iter() {
        log::warn!("[cursor] skipping line: {}", e);
    }
    let newest = fresh.last().map(|line| line.id.clone());
    log::debug!(
        "[cursor] {} new lines, {} events, watermark {}",
        fresh.len(),
        valid_events.len(),
        newest.as_ref().map(LogId::as_str).unwrap_or("-")
    );
    Ok(ProcessedLogs {
        valid_events,
        last_seen_id: newest.or_else(|| last_seen_id.cloned()),
        first_fetch: false,
    })
}
