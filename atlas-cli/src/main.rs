//! Movement Atlas CLI
//!
//! Explore the sequences a catalog of step units can produce.

mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use atlas_core::catalog::{common_partner_sequences, common_solo_sequences};
use atlas_core::{
    compatible_next, entry_feet, entry_states, exit_feet, exit_states, AtlasConfig, Catalog,
    Figure, Foot, Generator, PartnerState, State,
};

#[derive(Parser)]
#[command(name = "atlas")]
#[command(about = "Movement Atlas - step units, weight feet and the sequences between them")]
#[command(version)]
struct Cli {
    /// Config file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog file (JSON or YAML); overrides the config
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate every sequence reachable from a starting weight
    Generate {
        /// Foot bearing weight at the start (left/right)
        #[arg(short, long)]
        start: Option<Foot>,

        /// Longest sequence to build
        #[arg(short, long)]
        depth: Option<usize>,

        /// Generate for a lead/follow pair from the opening position
        #[arg(long)]
        partner: bool,
    },

    /// List units that can be danced next
    Next {
        /// Foot bearing weight now
        #[arg(short, long)]
        start: Option<Foot>,

        /// Lead/follow pair from the opening position
        #[arg(long)]
        partner: bool,
    },

    /// Show the states a figure can start from
    Entries {
        /// Figure title
        title: String,
    },

    /// Show where a figure ends from each of its entries
    Exits {
        /// Figure title
        title: String,
    },

    /// List the catalog
    Units,

    /// List the curated sequences. Saved sequences live in the library's
    /// `SequenceStore` and are not persisted between runs.
    Sequences {
        /// Partner sequences instead of solo
        #[arg(long)]
        partner: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = AtlasConfig::load(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    init_logging(&config);

    let catalog = match cli.catalog.as_ref().or(config.catalog.as_ref()) {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("loading catalog from {}", path.display()))?,
        None => Catalog::builtin(),
    };

    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Generate {
            start,
            depth,
            partner,
        } => {
            let mut run_config = config.clone();
            if let Some(depth) = depth {
                run_config = run_config.with_max_depth(depth);
                run_config.validate()?;
            }
            let generator = Generator::from_config(&run_config);
            let start = start.unwrap_or(config.start_foot);

            if partner {
                let sequences = generator
                    .run(State::Partner(PartnerState::opening()), &catalog.figures())
                    .context("generating partner sequences")?;
                render::sequences(&mut out, &sequences, cli.json)?;
            } else {
                let sequences = generator
                    .run(start, &catalog.units())
                    .context("generating sequences")?;
                render::sequences(&mut out, &sequences, cli.json)?;
            }
        }

        Commands::Next { start, partner } => {
            let from = if partner {
                State::Partner(PartnerState::opening())
            } else {
                State::solo(start.unwrap_or(config.start_foot))
            };
            let next = compatible_next(&from, &catalog.figures());
            render::figures(&mut out, &from, &next, cli.json)?;
        }

        Commands::Entries { title } => {
            let entry = catalog
                .find(&title)
                .with_context(|| format!("no catalog entry named '{}'", title))?;
            match &entry.figure {
                Figure::Solo(unit) => render::feet(&mut out, &entry_feet(unit), cli.json)?,
                Figure::Partner(_) => {
                    render::states(&mut out, &entry_states(&entry.figure), cli.json)?
                }
            }
        }

        Commands::Exits { title } => {
            let entry = catalog
                .find(&title)
                .with_context(|| format!("no catalog entry named '{}'", title))?;
            match &entry.figure {
                Figure::Solo(unit) => render::feet(&mut out, &exit_feet(unit)?, cli.json)?,
                Figure::Partner(_) => {
                    render::states(&mut out, &exit_states(&entry.figure)?, cli.json)?
                }
            }
        }

        Commands::Units => render::catalog(&mut out, &catalog, cli.json)?,

        Commands::Sequences { partner } => {
            if partner {
                render::partner_sequences(&mut out, &common_partner_sequences(), cli.json)?;
            } else {
                render::solo_sequences(
                    &mut out,
                    &common_solo_sequences(),
                    config.start_foot,
                    cli.json,
                )?;
            }
        }
    }

    Ok(())
}

/// `~/.config/movement-atlas/config.yaml`, or `./config.yaml` without a config dir
fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("movement-atlas")
        .join("config.yaml")
}

fn init_logging(config: &AtlasConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
