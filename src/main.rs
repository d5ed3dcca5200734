//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Content engine and server for a personal author archive site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a content directory with starter files
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Derive store rows from the JSON content files
    Sync,

    /// Start the HTTP API and static file server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Watch the content directory and re-sync on changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Export the static snapshot (JSON copies + rendered pages)
    Export,

    /// Classify and render a section or essay body to the terminal
    Render {
        /// Section slug to render
        slug: Option<String>,

        /// Render an essay body instead of a section
        #[arg(long, conflicts_with = "slug")]
        essay: Option<i64>,

        /// Fetch from a remote site instead of the content directory
        #[arg(long)]
        url: Option<String>,
    },

    /// List content from the content directory
    List {
        /// Type of content to list (sections, quotes, essays, music)
        #[arg(default_value = "sections")]
        r#type: String,

        /// List from a remote site instead of the content directory
        #[arg(long)]
        url: Option<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing content directory in {:?}", target_dir);
            folio::commands::init::init_site(&target_dir)?;
            println!("Initialized content directory in {:?}", target_dir);
        }

        Commands::Sync => {
            let app = folio::Folio::new(&base_dir)?;
            folio::commands::sync::run(&app).await?;
        }

        Commands::Serve { port, ip, watch } => {
            let app = folio::Folio::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio::server::start(&app, &ip, port, watch).await?;
        }

        Commands::Export => {
            let app = folio::Folio::new(&base_dir)?;
            folio::commands::export::run(&app)?;
        }

        Commands::Render { slug, essay, url } => {
            let app = folio::Folio::new(&base_dir)?;
            let target = match (slug, essay) {
                (Some(slug), None) => folio::commands::render::Target::Section(slug),
                (None, Some(id)) => folio::commands::render::Target::Essay(id),
                _ => anyhow::bail!("provide a section slug or --essay ID"),
            };
            folio::commands::render::run(&app, target, url.as_deref()).await?;
        }

        Commands::List { r#type, url } => {
            let app = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&app, &r#type, url.as_deref()).await?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
