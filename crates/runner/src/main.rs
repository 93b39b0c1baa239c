//! Red Light, Green Light CLI
//!
//! Plays one game and writes its statistics as JSON.

use clap::Parser;
use greenlight_runner::{Cli, run_session};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let scenario = cli.scenario()?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::warn!("Ctrl-C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let outcome = match run_session(&scenario, shutdown).await {
        Ok(outcome) => outcome,
        Err(e) => {
            println!("❌ Error during game: {}", e);
            return Err(e.into());
        }
    };

    if outcome.interrupted {
        println!("\n⏹️  Game interrupted by user");
    }
    if let Some(path) = &outcome.exported_to {
        println!("📊 Statistics exported to {}", path.display());
    }

    Ok(())
}
