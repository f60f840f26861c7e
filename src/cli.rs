use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rustmtx")]
#[command(about = "A Rust CLI tool for SCSI tape media changers")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Specify configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Changer device path (e.g. /dev/sg3)
    #[arg(short = 'f', long, global = true)]
    pub device: Option<String>,

    /// Changer-control program to run instead of mtx
    #[arg(long = "command", global = true, value_name = "PROGRAM")]
    pub mtx_command: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show drives, slots and the volumes in them
    Status {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Rescan every element (barcode read of the whole library)
    Inventory,

    /// Load the volume in a storage or mailbox slot into a drive
    Load {
        /// Source slot id
        #[arg(value_name = "SLOT")]
        slot: String,

        /// Target drive id
        #[arg(value_name = "DRIVE")]
        drive: String,
    },

    /// Return the volume in a drive to its home slot
    Unload {
        /// Drive id
        #[arg(value_name = "DRIVE")]
        drive: String,

        /// Return the volume to this slot instead of the home the status report gives
        #[arg(long, value_name = "SLOT")]
        slot: Option<String>,
    },

    /// Move a volume between storage or mailbox slots
    Transfer {
        /// Source slot id
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Destination slot id
        #[arg(value_name = "DESTINATION")]
        destination: String,
    },

    /// Load a cleaning cartridge into a drive
    Clean {
        /// Drive id
        #[arg(value_name = "DRIVE")]
        drive: String,
    },

    /// List drives with no volume loaded
    EmptyDrives,

    /// List cleaning cartridges available for loading
    CleaningMedia,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
