//! Replay Binary
//!
//! Runs the advisor against a recorded table session. Advice comes from
//! an external program (`--oracle-cmd`) or from a human relaying a chat
//! model (`--relay`).

use clap::Parser;
use robocoach::config::*;
use robocoach::engine::Engine;
use robocoach::ledger::*;
use robocoach::observer::ScriptObserver;
use robocoach::operator::*;
use robocoach::oracle::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay a recorded table session through the advisor")]
struct Args {
    /// Session script (JSON)
    script: String,
    /// Config file (JSON); defaults apply otherwise
    #[arg(long)]
    config: Option<String>,
    /// Program that answers prompts on stdout
    #[arg(long, conflicts_with = "relay")]
    oracle_cmd: Option<String>,
    /// Print prompts and paste replies by hand
    #[arg(long)]
    relay: bool,
    /// Press the buttons instead of only advising
    #[arg(long)]
    automate: bool,
    /// Watch without taking a seat
    #[arg(long)]
    observe_only: bool,
    /// Hero display name
    #[arg(long)]
    hero: Option<String>,
    /// Player stats file, read at start and written at exit
    #[arg(long)]
    ledger: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    robocoach::log();
    robocoach::kys();
    let args = Args::parse();
    let mut config = match args.config.as_deref() {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(hero) = args.hero.clone() {
        config.hero = hero;
    }
    if args.automate {
        config.mode = Mode::Automate;
    }
    config.observe_only |= args.observe_only;
    let observer = ScriptObserver::load(&args.script)?;
    let ledger = match args.ledger.as_deref() {
        Some(path) if std::path::Path::new(path).exists() => MemoryLedger::load(path)?,
        _ => MemoryLedger::default(),
    };
    let ledger = match (args.relay, args.oracle_cmd.as_deref()) {
        (true, _) => session(config, observer, RelayOracle, ledger, QuietOperator).await?,
        (false, Some(cmd)) => {
            let oracle = CommandOracle::parse(cmd, config.oracle_timeout())
                .ok_or_else(|| anyhow::anyhow!("--oracle-cmd is empty"))?;
            session(config, observer, oracle, ledger, ConsoleOperator::default()).await?
        }
        (false, None) => anyhow::bail!("pick an oracle with --oracle-cmd or --relay"),
    };
    if let Some(path) = args.ledger.as_deref() {
        ledger.save(path)?;
        log::info!("saved {} players to {}", ledger.len(), path);
    }
    Ok(())
}

async fn session<A, P>(
    config: Config,
    observer: ScriptObserver,
    oracle: A,
    ledger: MemoryLedger,
    operator: P,
) -> anyhow::Result<MemoryLedger>
where
    A: Oracle,
    P: Operator,
{
    let mut engine = Engine::new(config, observer, oracle, ledger, operator);
    engine.run().await?;
    Ok(engine.ledger().clone())
}
