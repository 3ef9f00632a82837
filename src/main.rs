use clap::Parser;
use orion::core::config::{CliOverrides, load_config, resolve};
use orion::core::theme::Theme;
use orion::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "orion", about = "ORION chat interface shell", version)]
struct Args {
    /// Color theme (overrides config file and ORION_THEME)
    #[arg(short, long, value_enum)]
    theme: Option<Theme>,

    /// Simulated reply delay in milliseconds
    #[arg(long)]
    reply_delay_ms: Option<u64>,

    /// Log level written to orion.log
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to orion.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("orion.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let file_config = load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        Default::default()
    });
    let config = resolve(
        &file_config,
        &CliOverrides {
            theme: args.theme,
            reply_delay_ms: args.reply_delay_ms,
        },
    );

    log::info!(
        "ORION starting up (theme: {:?}, reply delay: {}ms)",
        config.theme,
        config.reply_delay.as_millis()
    );

    tui::run(config)
}
