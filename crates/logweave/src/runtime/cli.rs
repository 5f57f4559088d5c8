use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::conf::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "logweave")]
#[command(version)]
#[command(about = "Correlate interleaved multi-service logs and rebuild span trees", long_about = None)]
pub struct Cli {
    /// Output format (text, json); overrides LOGWEAVE_OUTPUT
    #[arg(short, long, global = true)]
    pub output: Option<OutputFormat>,

    /// Emit diagnostics as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse log files and report what was detected
    Parse {
        /// Log files; each is ingested independently
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Keep only lines carrying this correlation id
        #[arg(short, long)]
        request_id: Option<String>,
    },

    /// Print the analysis request (service -> raw lines, plus context) as JSON
    Group {
        file: PathBuf,

        #[arg(short, long)]
        request_id: Option<String>,
    },

    /// Rebuild the span forest from an analysis document
    Spans {
        file: PathBuf,

        /// Analysis engine response (JSON, optionally in a code fence)
        #[arg(short, long)]
        analysis: PathBuf,

        #[arg(short, long)]
        request_id: Option<String>,
    },

    /// List distinct request ids in first-seen order
    Ids { file: PathBuf },
}
