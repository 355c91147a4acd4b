use std::io;

use anyhow::Context;
use teller_atm::{bootstrap, AtmConfig, Session};
use teller_ledger::Ledger;

fn main() -> anyhow::Result<()> {
    let config = AtmConfig::from_env().context("invalid configuration")?;
    teller_observability::init(&config.log);

    let ledger = if config.seed_demo_accounts {
        bootstrap::demo_ledger().context("failed to seed demo accounts")?
    } else {
        Ledger::new()
    };
    if ledger.is_empty() {
        tracing::warn!("ledger has no accounts; no login can succeed");
    }
    tracing::info!(accounts = ledger.len(), "teller ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(&ledger, stdin.lock(), stdout.lock())
        .run()
        .context("session aborted")?;

    Ok(())
}
