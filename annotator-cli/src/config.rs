//! Command-line arguments and the resolved runtime configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use annotator_core::{StoreConfig, TextCapture};

use crate::io;

/// Label spans of text and export them as JSON
#[derive(Debug, Parser)]
#[command(name = "annotator", version, about)]
pub struct Args {
    /// Text file to annotate (defaults to a sample recipe)
    pub file: Option<PathBuf>,

    /// Initial label for saved selections
    #[arg(short, long, default_value = "")]
    pub label: String,

    /// Directory that receives annotations.json and the log file
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Export [start, end, label] without the selected text
    #[arg(long)]
    pub omit_text: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub file: Option<PathBuf>,
    pub label: String,
    pub out_dir: PathBuf,
    pub store: StoreConfig,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        let out_dir = match args.out_dir {
            Some(dir) => io::ensure_dir(dir)?,
            None => io::annotator_dir()?,
        };

        Ok(Self {
            file: args.file,
            label: args.label,
            out_dir,
            store: StoreConfig {
                text_capture: if args.omit_text {
                    TextCapture::Omit
                } else {
                    TextCapture::Include
                },
            },
        })
    }
}
