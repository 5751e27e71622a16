use anyhow::Result;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use pulle_action::cli_args::{ActionConfig, Cli};
use pulle_action::pipeline::{run, RunOutcome};

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = ActionConfig::from_cli(cli)?;

    let mut rng = rand::rng();
    match run(&config, &mut rng).await? {
        RunOutcome::SkippedExistingComment => {
            println!("PULL-E comment already exists, skipping");
        }
        RunOutcome::Commented {
            comment_id,
            image_url,
        } => {
            println!("posted PULL-E comment {comment_id} with image {image_url}");
        }
    }
    Ok(())
}
