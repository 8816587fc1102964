use clap::Parser;
use pageflow::core::config::{self, CliOverrides};
use pageflow::core::page::PageId;
use pageflow::core::site::SiteSpec;
use pageflow::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pageflow", about = "Animated single-page site in the terminal")]
struct Args {
    /// Page to show on startup
    #[arg(short, long, value_enum)]
    page: Option<PageId>,

    /// Site description (TOML) to load instead of the built-in one
    #[arg(short, long)]
    site: Option<PathBuf>,

    /// Cancel the previous page's pending animations on navigation
    #[arg(long)]
    cancel_pending: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = config::load_config().map_err(std::io::Error::other)?;
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            page: args.page,
            site: args.site,
            cancel_pending: args.cancel_pending,
        },
    );

    // Initialize file logger
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!("Pageflow starting up on page: {}", resolved.start_page);
    log::debug!("Resolved config: {:?}", resolved);

    let site = match &resolved.site_file {
        Some(path) => SiteSpec::load(path),
        None => SiteSpec::embedded(),
    }
    .map_err(std::io::Error::other)?;

    tui::run(site, resolved)
}
