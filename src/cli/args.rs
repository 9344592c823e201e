use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ev-station-locator")]
#[command(about = "EV charging-station locator for Korean public charger data")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Only log warnings and errors")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Configuration file (TOML)")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "First charger partition (URL or file path)")]
    pub url1: Option<String>,

    #[arg(long, global = true, help = "Second charger partition (URL or file path)")]
    pub url2: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List selectable provinces
    Provinces,

    /// List selectable districts of a province
    Districts {
        #[arg(short, long)]
        province: String,
    },

    /// Select a region and print the station markers for it
    Stations {
        #[arg(short, long)]
        province: String,

        #[arg(short, long, help = "District; omit together with --radius to search around the province centroid")]
        district: Option<String>,

        #[arg(
            long,
            conflicts_with = "district",
            help = "Use a fixed radius around the province centroid instead of a district"
        )]
        radius: bool,

        #[arg(long, requires = "radius", help = "Radius in km for --radius [default: from config]")]
        radius_km: Option<f64>,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        #[arg(
            short,
            long,
            help = "Write output to a file [default: stdout; output/ev-stations-{YYMMDD}.{ext} with --save]"
        )]
        output: Option<PathBuf>,

        #[arg(long, help = "Write to the default dated file under output/")]
        save: bool,
    },

    /// Show how many rows were loaded and dropped
    Summary,

    /// Line-oriented session with persistent province/district selection
    Interactive {
        #[arg(long, help = "Use radius mode for rendering")]
        radius: bool,
    },
}
