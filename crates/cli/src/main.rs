use anyhow::Context;

use storekeep_cli::{Config, Session};

fn main() -> anyhow::Result<()> {
    let (config, warnings) = Config::from_env();
    storekeep_observability::init(&config.log);
    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), &config);
    session.run().context("session aborted")?;

    Ok(())
}
