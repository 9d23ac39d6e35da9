//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// shaper - convert between configuration directories and one document
#[derive(Parser, Debug)]
#[command(name = "shaper")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v lists files to write, -vv adds debug logs)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file [default: ./shaper.toml when present]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Collect a directory of configuration files into one document
    ///
    /// Examples:
    ///   shaper read ./config                 # writes out.yml
    ///   shaper read ./config -o snapshot.json
    Read {
        /// Directory to collect
        src_dir: PathBuf,

        /// Output document (.yml, .yaml or .json)
        #[arg(short, long, default_value = "out.yml")]
        out: PathBuf,
    },

    /// Write a document back out as a directory of configuration files
    ///
    /// Examples:
    ///   shaper write out.yml                 # writes into ./out/
    ///   shaper write out.yml -o ./conf -k svc/app
    Write {
        /// Document to materialize
        src_doc: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "./out/")]
        out: PathBuf,

        /// Only write files whose path contains this text
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Render a playbook's templates and write the resulting files
    Play {
        /// Playbook document listing `variables` and `templates`
        playbook: PathBuf,

        /// Output directory [default: the playbook's directory]
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}
