use anyhow::Context;
use clap::{Args, Parser};
use nt_core::{query, CatalogMode, PageRequest};
use nt_storage::{ArticleStore, FileSource};
use nt_web::config::{DEFAULT_CATEGORIES_FILE, DEFAULT_DATA_FILE, DEFAULT_HOST, DEFAULT_PORT};
use nt_web::ServerConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

mod logging;

#[derive(Parser, Debug)]
#[command(author, version, about = "News catalog API", long_about = None)]
pub struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the HTTP API
    Serve(ServeArgs),
    /// Load the data file once and report what would be served
    Check(CatalogArgs),
}

#[derive(Args, Debug, Clone)]
struct CatalogArgs {
    /// JSON file holding an `articles` array
    #[arg(long, env = "NT_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,
    /// Id assignment and category filtering policy
    #[arg(long, env = "NT_MODE", value_enum, default_value_t = CatalogMode::Indexed)]
    mode: CatalogMode,
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[command(flatten)]
    catalog: CatalogArgs,
    #[arg(long, env = "NT_HOST", default_value = DEFAULT_HOST)]
    host: String,
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
    /// JSON file holding a `categories` array, read on every request
    #[arg(long, env = "NT_CATEGORIES_FILE", default_value = DEFAULT_CATEGORIES_FILE)]
    categories_file: PathBuf,
    /// Require this key on every /api route (x-api-key header or apiKey query parameter)
    #[arg(long, env = "NT_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            data_file: args.catalog.data_file,
            categories_file: args.categories_file,
            mode: args.catalog.mode,
            api_key: args.api_key,
        }
    }
}

async fn check(args: CatalogArgs) -> anyhow::Result<()> {
    let store = ArticleStore::new(Arc::new(FileSource::new(&args.data_file)), args.mode);
    let count = store
        .load()
        .await
        .with_context(|| format!("failed to load {}", args.data_file.display()))?;

    let snapshot = store.snapshot().await;
    let first_page = query::paginate(&snapshot, PageRequest::default(), args.mode);
    info!("✅ {} articles, {} pages of {}", count, first_page.total_pages, first_page.limit);
    for summary in &first_page.data {
        println!("{}\t{}", summary.id, summary.title);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Serve(args) => {
            let config = ServerConfig::from(args);
            info!("📡 Serving {} in {} mode", config.data_file.display(), config.mode);
            nt_web::serve(config).await?;
        }
        Commands::Check(args) => check(args).await?,
    }

    Ok(())
}
