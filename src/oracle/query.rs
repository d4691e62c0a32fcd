use super::*;
use crate::cards::*;
use crate::ledger::Ledger;
use crate::table::*;
use crate::*;
use std::time::Duration;

/// Renders the decision point as a prompt.
///
/// Only ordered containers and fixed two-decimal formatting go in, so
/// the same game and ledger always render the same text.
pub fn construct_query(game: &Game, ledger: &dyn Ledger) -> String {
    let cards = |cards: &[Card]| match cards.is_empty() {
        true => String::from("none"),
        false => cards.iter().map(Card::to_string).collect::<Vec<_>>().join(" "),
    };
    let mut lines = vec![
        format!(
            "Hand #{} of {}, blinds {}, {}s per turn.",
            game.hand(),
            game.variant(),
            game.blinds(),
            game.max_turn_length()
        ),
        format!("Street: {}", game.street()),
        format!("Board: {}", cards(game.table().board())),
        format!(
            "Hero: {}{}, holding {}, stack {:.2} BB",
            game.hero(),
            game.hero_seat()
                .map(|s| format!(" (seat {})", s))
                .unwrap_or_default(),
            cards(game.hero_hand()),
            game.hero_stack_bb()
        ),
        format!(
            "Pot: {:.2} BB, to call: {:.2} BB",
            game.pot_bb(),
            game.to_call_bb()
        ),
        String::from("Players:"),
    ];
    lines.extend(game.table().seats().map(|player| seat(game, ledger, player)));
    lines.push(String::from("Action:"));
    lines.extend(Street::all().iter().filter_map(|street| {
        let actions = game
            .history()
            .iter()
            .filter(|a| a.street == *street)
            .map(|a| match a.amount {
                Some(chips) => format!("{} {} {:.2} BB", a.name, a.kind, game.to_bb(chips)),
                None => format!("{} {}", a.name, a.kind),
            })
            .collect::<Vec<_>>();
        (!actions.is_empty()).then(|| format!("  {}: {}", street, actions.join(", ")))
    }));
    let allowed = match game.available().is_empty() {
        true => ActionKind::all(),
        false => game.available(),
    };
    lines.push(format!(
        "Allowed: {}",
        allowed.iter().map(ActionKind::to_string).collect::<Vec<_>>().join(", ")
    ));
    lines.push(String::from(
        "Reply with JSON {\"action\": \"<allowed>\", \"size\": <big blinds>, \"rationale\": \"<short>\"}",
    ));
    lines.join("\n")
}

/// One `Players:` row, with ledger stats for opponents.
fn seat(game: &Game, ledger: &dyn Ledger, player: &Player) -> String {
    let mut row = format!(
        "  seat {} {}: stack {:.2} BB, bet {:.2} BB",
        player.seat(),
        player.name(),
        game.to_bb(player.stack()),
        game.to_bb(player.bet())
    );
    if player.is_dealer() {
        row.push_str(", dealer");
    }
    if player.is_folded() {
        row.push_str(", folded");
    }
    if player.is_all_in() {
        row.push_str(", all in");
    }
    if Some(player.seat()) == game.hero_seat() {
        row.push_str(", hero");
    } else if let Some(stats) = ledger.get(player.name()) {
        row.push_str(&format!(" [{}]", stats));
    }
    row
}

/// Asks up to `retries + 1` times, sleeping `backoff` between attempts.
///
/// A reply with no recognizable action counts as a failed attempt. Only
/// a successful exchange is added to `history`.
pub async fn query_bot_action<O>(
    oracle: &mut O,
    query: &str,
    history: &mut Conversation,
    retries: usize,
    backoff: Duration,
) -> Result<BotAction>
where
    O: Oracle + ?Sized,
{
    let attempts = retries + 1;
    for attempt in 1..=attempts {
        match oracle.query(query, &history.messages()).await {
            Ok(reply) => match reply.parsed.clone().or_else(|| parse_bot_action(&reply.text)) {
                Some(action) => {
                    log::debug!("[oracle] attempt {}/{}: {}", attempt, attempts, action);
                    history.push(AIMessage::user(query));
                    history.push(AIMessage::assistant(reply.text));
                    return Ok(action);
                }
                None => log::warn!(
                    "[oracle] attempt {}/{}: no action in {:?}",
                    attempt,
                    attempts,
                    reply.text
                ),
            },
            Err(e) => log::warn!("[oracle] attempt {}/{}: {}", attempt, attempts, e),
        }
        if attempt < attempts {
            tokio::time::sleep(backoff).await;
        }
    }
    Err(Error::DecisionUnavailable { attempts })
}

/// The whole protocol: query, validate, and fall back on any failure.
pub async fn decide<O>(
    oracle: &mut O,
    game: &Game,
    ledger: &dyn Ledger,
    history: &mut Conversation,
    retries: usize,
    backoff: Duration,
) -> BotAction
where
    O: Oracle + ?Sized,
{
    let query = construct_query(game, ledger);
    match query_bot_action(oracle, &query, history, retries, backoff)
        .await
        .and_then(|action| validate_action(action, game))
    {
        Ok(action) => action,
        Err(e) => {
            let fallback = fallback_action(game);
            log::warn!("[oracle] {}, falling back to {}", e, fallback);
            fallback
        }
    }
}
