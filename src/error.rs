use crate::observer::ObserverError;
use crate::parse::ParseError;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between the table and the advice.
///
/// Only [`Error::Configuration`] and [`Error::Seating`] end a session.
/// The engine absorbs the rest: parse and ingestion failures skip a line
/// or a poll cycle, decision failures degrade to the fallback action.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unrecognized log line: {0}")]
    Parse(#[from] ParseError),
    #[error("identity maps incomplete for {missing:?}")]
    IncompleteMapping { missing: Vec<String> },
    #[error("log ingestion failed: {0}")]
    Ingestion(ObserverError),
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("no decision after {attempts} attempts")]
    DecisionUnavailable { attempts: usize },
    #[error("invalid bot action: {0}")]
    ActionValidation(String),
    #[error("could not join the table: {0}")]
    Seating(String),
    #[error("observer wait exceeded {millis}ms")]
    Timeout { millis: u64 },
    #[error("observer failed: {0}")]
    Observer(#[from] ObserverError),
    #[error("ledger storage failed: {0}")]
    Storage(String),
}

impl Error {
    /// Errors that terminate the session instead of degrading.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Seating(_))
    }
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration(reason.into())
    }
}
