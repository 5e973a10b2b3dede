//! Folio CLI
//!
//! Inspect, validate, scaffold and serve the content of a design-studio site.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;
use folio::cmd::{self, list::SortKey};

/// Command-line interface for Folio.
#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Content layer for a design-studio portfolio"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "folio.toml")]
    config: std::path::PathBuf,

    /// Override the content root directory
    #[arg(long, global = true)]
    content: Option<std::path::PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// List the items of a collection
    List {
        /// Collection name (e.g. journal)
        collection: String,
        /// Sort order
        #[arg(long, value_enum)]
        sort: Option<SortKey>,
        /// Only items with this category, tag, audience or status
        #[arg(long)]
        label: Option<String>,
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Items per page (0 = all)
        #[arg(long, default_value_t = 0)]
        per_page: usize,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show a single item by slug
    Show {
        /// Collection name
        collection: String,
        /// Item slug
        slug: String,
        /// Print JSON
        #[arg(long, conflicts_with = "html")]
        json: bool,
        /// Print the rendered HTML body
        #[arg(long)]
        html: bool,
    },
    /// Validate configuration and content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Create a new frontmatter file in a collection
    New {
        /// Collection name
        collection: String,
        /// Title of the new item
        title: String,
        /// Display date (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Comma-separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// Serve the content as a JSON API
    Serve {
        /// Port to listen on (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    folio::init_tracing(cli.verbose);

    let config = cmd::load_config(&cli.config, cli.content.as_deref())?;

    match cli.command {
        Commands::List {
            collection,
            sort,
            label,
            page,
            per_page,
            json,
        } => {
            let query = cmd::list::ListQuery {
                label,
                sort,
                page: Some(page),
                per_page: Some(per_page),
            };
            cmd::list::run(&config, &collection, &query, json)?;
        }
        Commands::Show {
            collection,
            slug,
            json,
            html,
        } => {
            cmd::show::run(&config, &collection, &slug, json, html)?;
        }
        Commands::Check { strict } => {
            cmd::check::run(&config, strict)?;
        }
        Commands::New {
            collection,
            title,
            date,
            tags,
        } => {
            cmd::new::run(&config, &collection, &title, date.as_deref(), &tags)?;
        }
        Commands::Serve { port } => {
            cmd::serve::run(&config, port).await?;
        }
    }

    Ok(())
}
