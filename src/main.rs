use std::sync::Arc;

use clap::Parser;
use tracing::info;

use clicklink::cli::Cli;
use clicklink::config::AppConfig;
use clicklink::interfaces::cli::Repl;
use clicklink::services::{ExpirySweeper, LinkService};
use clicklink::system::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.generate_config {
        print!("{}", AppConfig::generate_sample_config()?);
        return Ok(());
    }

    let mut config = AppConfig::load(cli.config.as_deref());
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    // 保持 guard 存活直到进程退出，确保日志被刷新
    let _log_guard = init_logging(&config.logging)?;

    let service = Arc::new(LinkService::from_config(&config.app)?);
    info!(
        "Starting clicklink: base_url={} ttl={}s code_length={}",
        config.app.base_url, config.app.ttl_seconds, config.app.code_length
    );

    let sweeper = ExpirySweeper::start(Arc::clone(&service), config.app.cleanup_interval());

    let mut repl = Repl::new(service, config.app.open_browser, std::io::stdout());
    let result = repl.run(tokio::io::BufReader::new(tokio::io::stdin())).await;

    sweeper.shutdown().await;
    result?;
    Ok(())
}
