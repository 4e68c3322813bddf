// Command routing

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// DataChat - inspect how questions are routed to answer agents
#[derive(Parser, Debug)]
#[command(name = "datachat")]
#[command(about = "Inspect morpheme-based intent classification for data questions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// TSV lexicon replacing the built-in one
    #[arg(long, global = true, value_name = "TSV")]
    pub lexicon: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimize output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Split a question into morphemes
    Tokenize {
        #[arg(value_name = "TEXT")]
        text: String,

        /// Print surface forms instead of lemmas
        #[arg(long)]
        surface: bool,
    },

    /// Show the routing decision for a question
    Classify {
        #[arg(value_name = "TEXT")]
        text: String,

        /// Uploaded table (CSV with header row)
        #[arg(long, value_name = "CSV")]
        table: Option<PathBuf>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        let config = commands::load_config(self.config.as_deref(), self.lexicon.clone())?;
        let output = match &self.command {
            Commands::Tokenize { text, surface } => commands::tokenize(&config, text, !surface)?,
            Commands::Classify { text, table, json } => {
                commands::classify(&config, text, table.as_deref(), *json)?
            }
        };
        println!("{}", output);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classify_with_globals() {
        let cli = Cli::try_parse_from([
            "datachat",
            "classify",
            "차트로 보여줘",
            "--table",
            "sales.csv",
            "--json",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Classify { text, table, json } => {
                assert_eq!(text, "차트로 보여줘");
                assert_eq!(table, Some(PathBuf::from("sales.csv")));
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_tokenize() {
        let cli = Cli::try_parse_from(["datachat", "--quiet", "tokenize", "--surface", "예측"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Tokenize { surface: true, .. }
        ));
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["datachat"]).is_err());
    }
}
