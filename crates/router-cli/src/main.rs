use clap::Parser;
use router_cli::cli::{Cli, Commands};
use router_cli::{commands, env};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_new(env::log_filter()).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Hook {
        catalog: None,
        skills_root: None,
    }) {
        Commands::Hook { catalog, skills_root } => commands::run_hook(catalog, skills_root).await,
        Commands::Route { query, catalog } => commands::run_route(&query, catalog).await,
        Commands::Validate { catalog } => commands::run_validate(catalog),
        Commands::Serve { bind, catalog } => run_serve(bind, catalog).await,
    }
}

#[cfg(feature = "http-transport")]
async fn run_serve(bind: String, catalog: Option<std::path::PathBuf>) -> anyhow::Result<()> {
    let router = commands::build_router_only(catalog)?;
    router_cli::http_transport::serve(&bind, router).await
}

#[cfg(not(feature = "http-transport"))]
async fn run_serve(_bind: String, _catalog: Option<std::path::PathBuf>) -> anyhow::Result<()> {
    anyhow::bail!("router was built without the `http-transport` feature")
}
