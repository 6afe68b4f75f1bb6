#![forbid(unsafe_code)]
//! docgroup Command Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use docgroup::commands::{
    execute_group, execute_init, execute_render, execute_validate, GroupOptions, InitOptions,
    RenderCommandOptions, ValidateOptions,
};
use docgroup::Config;

#[derive(Parser)]
#[command(name = "docgroup")]
#[command(about = "Group overloaded API methods into unified documentation entries")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = ".docgroup.config.json")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new docgroup project
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,

        /// Model file patterns to include (can specify multiple)
        #[arg(long)]
        include: Vec<String>,

        /// Model file patterns to exclude (can specify multiple)
        #[arg(long)]
        exclude: Vec<String>,

        /// Default compatibility rule
        #[arg(long)]
        rule: Option<String>,
    },

    /// Show the overload groups of a model
    Group {
        /// Model file or directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Only show this class
        #[arg(long)]
        class: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render grouped documentation
    Render {
        /// Model file or directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format (markdown, json, text)
        #[arg(short, long)]
        format: Option<String>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include hidden members
        #[arg(long)]
        include_hidden: bool,
    },

    /// Validate a model and report grouping problems
    Validate {
        /// Model file or directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Fail when undocumented members remain
        #[arg(long)]
        strict: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load config
    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        tracing::debug!("No config at {}, using defaults", cli.config.display());
        Config::default()
    };

    match cli.command {
        Commands::Init { force, include, exclude, rule } => {
            let options = InitOptions {
                force,
                include,
                exclude,
                rule,
            };
            execute_init(options)?;
        }

        Commands::Group { path, class, json } => {
            let options = GroupOptions { path, class, json };
            execute_group(options, config)?;
        }

        Commands::Render { path, format, output, include_hidden } => {
            let options = RenderCommandOptions {
                path,
                format,
                output,
                include_hidden,
            };
            execute_render(options, config)?;
        }

        Commands::Validate { path, strict } => {
            let options = ValidateOptions { path, strict };
            execute_validate(options, config)?;
        }
    }

    Ok(())
}
