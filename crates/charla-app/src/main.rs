//! Charla binary - composition root.
//!
//! Ties the crates into a single executable:
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Initialize tracing
//! 3. Wire the answer gateway (HTTP, or canned when no API key is set)
//! 4. Start the session janitor in the background
//! 5. Run a console transport loop: each stdin line is one inbound message

use std::sync::Arc;

use async_trait::async_trait;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use charla_bot::{BotOrchestrator, Transport};
use charla_core::{CharlaConfig, InboundMessage, Result, UserId};
use charla_gateway::{AnswerGateway, CannedGateway, HttpGateway};
use charla_session::Janitor;

mod cli;

/// Prints replies to stdout, standing in for the real chat provider.
struct ConsoleTransport;

#[async_trait]
impl Transport for ConsoleTransport {
    async fn send_text(&self, _to: &UserId, body: &str) -> Result<()> {
        println!("🤖 {}", body);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();

    // An explicitly given config file must parse; the default path may be
    // absent and falls back to defaults.
    let config = match args.config {
        Some(ref path) => CharlaConfig::load(path)?,
        None => CharlaConfig::load_or_default(&args.resolve_config_path()),
    };

    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let gateway: Arc<dyn AnswerGateway> = match HttpGateway::from_config(&config.gateway) {
        Ok(gateway) => Arc::new(gateway),
        Err(e) => {
            warn!(error = %e, "answer gateway not configured, using canned replies");
            Arc::new(CannedGateway::new(
                "🤖 Modo sin conexión: configura la clave del gateway para respuestas reales.",
            ))
        }
    };

    let bot = Arc::new(BotOrchestrator::new(&config, gateway));

    let janitor = Arc::new(Janitor::new(
        bot.store(),
        bot.dedup(),
        config.session.janitor_interval_secs,
    ));
    let janitor_task = {
        let janitor = Arc::clone(&janitor);
        tokio::spawn(async move { janitor.run().await })
    };

    info!(brand = %config.general.brand_name, user = %args.user, "charla console started");
    println!("Escribe un mensaje (ctrl-d para salir):");

    let user = UserId::new(args.user.clone());
    let transport = ConsoleTransport;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let msg = InboundMessage::new(user.clone(), line);
        // Per-message failures must not kill the loop for other turns.
        if let Err(e) = bot.dispatch(&transport, &msg).await {
            warn!(error = %e, "turn failed");
        }
    }

    janitor.shutdown();
    let _ = janitor_task.await;
    info!("charla console stopped");
    Ok(())
}
