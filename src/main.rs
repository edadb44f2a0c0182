//! CLI entry point for folio-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio-rs")]
#[command(version)]
#[command(about = "A portfolio and blog site engine", long_about = None)]
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
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new article
    New {
        /// Title of the new article
        title: String,

        /// Slug to use instead of one derived from the title
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Clean the public folder
    Clean,

    /// List site content
    List {
        /// Type of content to list (articles, talks, featured)
        #[arg(default_value = "articles")]
        r#type: String,
    },

    /// Show one article by slug
    Show {
        slug: String,

        /// Print the rendered HTML body instead of the metadata
        #[arg(long)]
        html: bool,
    },

    /// Play the terminal widget
    Terminal {
        /// Stop after this many commands (loops forever by default)
        #[arg(short = 'n', long)]
        cycles: Option<usize>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            folio_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { title, slug } => {
            let site = folio_rs::Site::new(&base_dir)?;
            let path = site.new_article(&title, slug.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::Generate { watch } => {
            let site = folio_rs::Site::new(&base_dir)?;
            tracing::info!("Generating static files...");

            site.generate()?;
            println!("Generated successfully!");

            if watch {
                folio_rs::commands::generate::watch(&site).await?;
            }
        }

        Commands::Clean => {
            let site = folio_rs::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = folio_rs::Site::new(&base_dir)?;
            folio_rs::commands::list::run(&site, &r#type)?;
        }

        Commands::Show { slug, html } => {
            let site = folio_rs::Site::new(&base_dir)?;
            folio_rs::commands::show::run(&site, &slug, html)?;
        }

        Commands::Terminal { cycles } => {
            let site = folio_rs::Site::new(&base_dir)?;
            folio_rs::commands::terminal::run(&site, cycles).await?;
        }

        Commands::Version => {
            println!("folio-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
