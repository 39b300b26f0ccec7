use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

use tripchat::core::config::{self, TripchatConfig};
use tripchat::tui;

#[derive(Parser)]
#[command(name = "tripchat", about = "Terminal chat for a shared trip")]
struct Args {
    /// Base URL of the chat service (overrides config and TRIPCHAT_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Path of the chat endpoint under the base URL
    #[arg(long)]
    chat_path: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("Warning: {}; using defaults", e);
        TripchatConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        args.base_url.as_deref(),
        args.chat_path.as_deref(),
    );

    // Initialize file logger - writes to tripchat.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("tripchat.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "Tripchat starting up against {}{}",
        resolved.base_url,
        resolved.chat_path
    );

    tui::run(resolved)
}
