//! Console demo for the bank core account model.
//!
//! Runs a fixed script against a savings and a checking account, then the
//! user/admin introductions. Narrative goes to stdout, `tracing` events to stderr
//! (filter with `RUST_LOG`, default `info`).

mod logging;
mod scenario;

use std::io::Write;

fn main() -> anyhow::Result<()> {
    logging::init_logging()?;
    tracing::info!("Starting bank core demo");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    scenario::run_banking(&mut out)?;
    scenario::run_users(&mut out)?;
    out.flush()?;

    Ok(())
}
