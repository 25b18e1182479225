//! Command-line surface

use clap::{Args, Parser, Subcommand};
use shared_types::CompressionQuality;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pocketdoc")]
#[command(version, about = "Scan, convert, sign, merge, split and compress PDFs")]
pub struct Cli {
    /// Config file (default: $POCKETDOC_CONFIG, then the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage the PDF library
    #[command(subcommand)]
    Files(FilesCommand),

    /// Turn scanned page images into a PDF
    Scan {
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },

    /// Turn images into a PDF
    Convert {
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },

    /// Combine PDFs in the given order
    Merge {
        #[arg(required = true)]
        pdfs: Vec<PathBuf>,
    },

    /// One output file per page range
    Split(SplitArgs),

    /// Copy selected pages into a new PDF
    Extract {
        pdf: PathBuf,

        /// Pages to keep, e.g. 1,3,2
        #[arg(long, required = true, value_delimiter = ',')]
        pages: Vec<u32>,
    },

    /// Re-render onto a smaller page box
    Compress {
        pdf: PathBuf,

        #[arg(long, default_value = "medium")]
        quality: CompressionQuality,
    },

    /// Add a signature page
    Sign(SignArgs),

    /// Manage saved signatures
    #[command(subcommand)]
    Signatures(SignaturesCommand),
}

impl Command {
    /// What the command was doing, for the one-line failure report
    pub fn action(&self) -> &'static str {
        match self {
            Command::Files(FilesCommand::List) => "list files",
            Command::Files(FilesCommand::Delete { .. }) => "delete file",
            Command::Files(FilesCommand::Rename { .. }) => "rename file",
            Command::Scan { .. } => "create PDF from scan",
            Command::Convert { .. } => "convert images",
            Command::Merge { .. } => "merge PDFs",
            Command::Split(_) => "split PDF",
            Command::Extract { .. } => "extract pages",
            Command::Compress { .. } => "compress PDF",
            Command::Sign(_) => "sign PDF",
            Command::Signatures(SignaturesCommand::List) => "list signatures",
            Command::Signatures(SignaturesCommand::Delete { .. }) => "delete signature",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum FilesCommand {
    /// Newest first
    List,
    Delete {
        path: PathBuf,
    },
    Rename {
        path: PathBuf,
        new_name: String,
    },
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    pub pdf: PathBuf,

    /// Comma-separated pages or ranges, e.g. "1-3, 5"
    #[arg(long)]
    pub ranges: String,

    /// Number of pages in the document (default from config)
    #[arg(long, conflicts_with = "probe_pages")]
    pub page_count: Option<u32>,

    /// Read the page count from the PDF itself
    #[arg(long)]
    pub probe_pages: bool,
}

#[derive(Args, Debug)]
pub struct SignArgs {
    pub pdf: PathBuf,

    /// Signature image
    #[arg(long, required_unless_present = "saved", conflicts_with = "saved")]
    pub signature_file: Option<PathBuf>,

    /// Id of a saved signature
    #[arg(long)]
    pub saved: Option<String>,

    /// Keep the signature image for reuse
    #[arg(long, requires = "signature_file")]
    pub save_signature: bool,

    /// Name for the saved signature (default "Signature N")
    #[arg(long, requires = "save_signature")]
    pub name: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum SignaturesCommand {
    List,
    Delete { id: String },
}
