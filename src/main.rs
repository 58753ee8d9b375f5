use clap::Parser;
use colored::*;
use std::path::Path;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mcpmenu::cli::Args;
use mcpmenu::config::{Config, JsonConfig};
use mcpmenu::mcp::McpClient;
use mcpmenu::ui::{Console, DialoguerPrompter};
use mcpmenu::{Catalog, MenuLoop, Result};

const EXAMPLE_CONFIG_PATH: &str = ".mcpmenu.yaml";

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Handle --config-init option
    if args.config_init {
        match JsonConfig::write_example(Path::new(EXAMPLE_CONFIG_PATH)) {
            Ok(()) => {
                println!("{}", format!("Wrote {}", EXAMPLE_CONFIG_PATH).green());
                return;
            }
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red(), e);
                process::exit(1);
            }
        }
    }

    let config = Config::from_env_and_args(&args);
    init_logging(config.verbose);

    // Exit explicitly: a prompt still blocking its thread must not hold the
    // runtime open after the menu has been cancelled.
    let code = match run(&config).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            1
        }
    };
    process::exit(code);
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "mcpmenu=debug" } else { "mcpmenu=warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();
}

async fn run(config: &Config) -> Result<()> {
    let mut client = McpClient::spawn(&config.server).await?;
    let outcome = session(&client, config).await;
    client.shutdown().await;
    outcome
}

async fn session(client: &McpClient, config: &Config) -> Result<()> {
    let catalog = Catalog::load(client).await?;

    let mut console = Console::stdio();
    console.connected()?;

    let mut menu = MenuLoop::new(client, DialoguerPrompter::new(), catalog, console)
        .with_coerce_arguments(config.coerce_arguments);
    menu.run().await
}
