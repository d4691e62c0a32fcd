use crate::table::ActionKind;
use crate::table::Game;
use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// A recommendation, sized in big blinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotAction {
    pub kind: ActionKind,
    #[serde(default, alias = "size_in_big_blinds")]
    pub size: BigBlinds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl BotAction {
    pub fn new(kind: ActionKind, size: BigBlinds) -> Self {
        Self {
            kind,
            size,
            rationale: None,
        }
    }
    pub fn because(self, rationale: impl Into<String>) -> Self {
        Self {
            rationale: Some(rationale.into()),
            ..self
        }
    }
}

impl std::fmt::Display for BotAction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.kind {
            ActionKind::Check | ActionKind::Fold => write!(f, "{}", self.kind),
            _ => write!(f, "{} {:.2}bb", self.kind, self.size),
        }
    }
}

/// Reads a recommendation out of whatever the Oracle said.
///
/// A JSON object `{"action", "size", "rationale"}` anywhere in the text
/// wins. Otherwise the first action word wins, the number right after it
/// (optionally `bb`) is the size, and the rest is the rationale.
pub fn parse_bot_action(text: &str) -> Option<BotAction> {
    structured(text).or_else(|| freeform(text))
}

#[derive(Deserialize)]
struct Structured {
    #[serde(alias = "action_type", alias = "kind")]
    action: String,
    #[serde(default, alias = "size_in_big_blinds", alias = "amount")]
    size: Option<serde_json::Value>,
    #[serde(default)]
    rationale: Option<String>,
}

fn structured(text: &str) -> Option<BotAction> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    let raw = serde_json::from_str::<Structured>(text.get(start..=end)?).ok()?;
    let kind = ActionKind::try_from(raw.action.as_str()).ok()?;
    let size = match raw.size {
        Some(serde_json::Value::Number(n)) => n.as_f64()?,
        Some(serde_json::Value::String(s)) => number(&s)?,
        _ => 0.0,
    };
    Some(BotAction {
        kind,
        size,
        rationale: raw.rationale.filter(|r| !r.trim().is_empty()),
    })
}

fn freeform(text: &str) -> Option<BotAction> {
    let words = text.split_whitespace().collect::<Vec<_>>();
    let bare = words.iter().map(|w| word(w)).collect::<Vec<_>>();
    let (at, kind, used) = bare.iter().enumerate().find_map(|(i, w)| {
        if w == "all" && bare.get(i + 1).is_some_and(|n| n == "in") {
            Some((i, ActionKind::AllIn, 2))
        } else {
            ActionKind::try_from(w.as_str()).ok().map(|k| (i, k, 1))
        }
    })?;
    let mut next = at + used;
    while bare.get(next).is_some_and(|w| matches!(w.as_str(), "to" | "by" | "for" | "of")) {
        next += 1;
    }
    let size = words.get(next).and_then(|w| number(w));
    if size.is_some() {
        next += 1;
        if bare.get(next).is_some_and(|w| w == "bb") {
            next += 1;
        }
    }
    let rest = words.get(next..).unwrap_or_default().join(" ");
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace());
    Some(BotAction {
        kind,
        size: size.unwrap_or(0.0),
        rationale: Some(rest.to_string()).filter(|r| !r.is_empty()),
    })
}

/// Lowercase with surrounding punctuation stripped, `all-in` kept whole.
fn word(w: &str) -> String {
    w.trim_matches(|c: char| c.is_ascii_punctuation() && c != '-')
        .trim_matches('-')
        .to_lowercase()
}

/// `4`, `4.5`, `4bb`, `4.5BB,` all read as big blinds.
fn number(w: &str) -> Option<f64> {
    let w = w.trim().trim_end_matches(|c: char| matches!(c, ',' | ';' | ':' | ')' | '!'));
    let w = w.strip_suffix('.').unwrap_or(w);
    let w = w
        .strip_suffix("bb")
        .or_else(|| w.strip_suffix("BB"))
        .unwrap_or(w);
    w.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Normalizes an action against the hand, or rejects it.
///
/// Bets and raises need a positive size. An all-in is always the hero's
/// whole stack whatever size was suggested.
pub fn validate_action(action: BotAction, game: &Game) -> Result<BotAction> {
    match action.kind {
        ActionKind::Bet | ActionKind::Raise if !(action.size > 0.0) => Err(Error::ActionValidation(
            format!("{} needs a positive size, got {}", action.kind, action.size),
        )),
        ActionKind::Bet | ActionKind::Raise => Ok(action),
        ActionKind::AllIn => Ok(BotAction {
            size: game.hero_stack_bb(),
            ..action
        }),
        ActionKind::Check | ActionKind::Fold => Ok(BotAction { size: 0.0, ..action }),
        ActionKind::Call => Ok(BotAction {
            size: action.size.max(0.0),
            ..action
        }),
    }
}

/// Check when it is free, fold otherwise.
pub fn fallback_action(game: &Game) -> BotAction {
    match game.can_check() {
        true => BotAction::new(ActionKind::Check, 0.0),
        false => BotAction::new(ActionKind::Fold, 0.0),
    }
    .because("fallback")
}
