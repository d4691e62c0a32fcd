use super::*;
use colored::Colorize;
use std::io::BufRead;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::error::TryRecvError;

/// Prints advice in color and reads `p`, `r`, `q` from stdin.
///
/// Stdin is read on its own thread so polling never blocks the engine.
/// Closing stdin quits at the next boundary.
#[derive(Debug)]
pub struct ConsoleOperator {
    rx: UnboundedReceiver<Command>,
}

impl Default for ConsoleOperator {
    fn default() -> Self {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                let command = match line.trim().to_lowercase().as_str() {
                    "p" | "pause" => Command::Pause,
                    "r" | "resume" => Command::Resume,
                    "q" | "quit" => Command::Quit,
                    _ => continue,
                };
                if tx.send(command).is_err() {
                    break;
                }
            }
        });
        Self { rx }
    }
}

#[async_trait::async_trait]
impl Operator for ConsoleOperator {
    async fn present(&mut self, advice: &Advice) {
        let action = advice.action.to_string().to_uppercase();
        let action = match advice.action.kind {
            crate::table::ActionKind::Fold => action.red(),
            crate::table::ActionKind::Check => action.cyan(),
            crate::table::ActionKind::Call => action.yellow(),
            crate::table::ActionKind::AllIn => action.magenta(),
            _ => action.green(),
        };
        println!(
            "{} {} {}",
            format!("hand #{} {}", advice.hand, advice.street).dimmed(),
            action.bold(),
            match advice.executed {
                true => "(sent)".dimmed(),
                false => "".normal(),
            }
        );
        println!(
            "  {} pot {:.2}bb  stack {:.2}bb  to call {:.2}bb",
            advice
                .hero_hand
                .iter()
                .chain(advice.board.iter())
                .map(Card::to_string)
                .collect::<Vec<_>>()
                .join(" "),
            advice.pot,
            advice.stack,
            advice.to_call
        );
        if let Some(why) = advice.action.rationale.as_ref() {
            println!("  {}", why.italic());
        }
    }
    async fn poll(&mut self) -> Command {
        match self.rx.try_recv() {
            Ok(command) => command,
            Err(TryRecvError::Empty) => Command::Continue,
            Err(TryRecvError::Disconnected) => Command::Quit,
        }
    }
    async fn wait(&mut self) -> Command {
        println!("{}", "paused: r to resume, q to quit".dimmed());
        self.rx.recv().await.unwrap_or(Command::Quit)
    }
}
