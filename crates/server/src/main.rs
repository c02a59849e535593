use std::net::SocketAddr;
use std::path::PathBuf;

use chaeum_core::config::SiteConfig;
use chaeum_server::logging::setup_logging;
use chaeum_server::{AppState, SiteServer, create_router};
use clap::Parser;
use eyre::WrapErr;

#[derive(Parser, Debug)]
#[command(name = "chaeum-server", about = "Serves the Chaeum location page data")]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Directory holding the per-language HTML fragments
    #[arg(short, long, default_value = "assets/content")]
    content_dir: PathBuf,

    /// Site configuration; the embedded one is used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> eyre::Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let config = match &args.config {
        Some(path) => SiteConfig::from_path(path)
            .wrap_err_with(|| format!("loading {}", path.display()))?,
        None => SiteConfig::embedded().wrap_err("loading embedded site config")?,
    }
    .with_env_overrides();

    if !args.content_dir.is_dir() {
        tracing::warn!(dir = %args.content_dir.display(), "content directory not found");
    }

    let app = create_router(AppState::new(config, args.content_dir));
    let server = SiteServer::start(args.bind, app)
        .wrap_err_with(|| format!("binding {}", args.bind))?;
    println!("Serving on http://{}", server.addr());

    server.wait_for_ctrl_c()?;
    Ok(())
}
