//! Available subcommands.

use std::path::PathBuf;

use clap::Subcommand;
use evalkit_core::{
    DEFAULT_ALLOW_PATTERN, DEFAULT_DATASET_ID, DEFAULT_LOCAL_DIR, DEFAULT_REVISION, RepoKind,
};
use evalkit_hf::{DEFAULT_ENDPOINT, TOKEN_ENV};
use evalkit_plot::{DEFAULT_INPUT, DEFAULT_OUTPUT};

/// Environment variable overriding the Hub endpoint.
pub const ENDPOINT_ENV: &str = "HF_ENDPOINT";

#[derive(Subcommand)]
pub enum Commands {
    /// Mirror files of a Hub repository into a local directory
    Fetch {
        /// Repository to fetch from ("owner/name")
        #[arg(long, default_value = DEFAULT_DATASET_ID)]
        repo_id: String,
        /// Repository type: model, dataset or space
        #[arg(long, default_value = "dataset")]
        repo_type: RepoKind,
        /// Glob selecting repository paths; `*` also matches `/` (repeatable)
        #[arg(short, long = "pattern", default_value = DEFAULT_ALLOW_PATTERN)]
        patterns: Vec<String>,
        /// Glob excluding repository paths (repeatable)
        #[arg(long = "ignore")]
        ignore: Vec<String>,
        /// Local directory mirroring the repository layout
        #[arg(long, default_value = DEFAULT_LOCAL_DIR)]
        local_dir: PathBuf,
        /// Branch, tag or commit to fetch
        #[arg(long, default_value = DEFAULT_REVISION)]
        revision: String,
        /// Access token for private or gated repositories
        #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
        token: Option<String>,
        /// Hub endpoint
        #[arg(long, env = ENDPOINT_ENV, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,
        /// Download every selected file even if the local copy is current
        #[arg(short, long)]
        force: bool,
        /// Show what would be downloaded without transferring anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Plot original against rescored evaluations
    Plot {
        /// Whitespace-delimited table of score pairs
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: PathBuf,
        /// PNG image to write
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
        /// Output resolution
        #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(u32).range(1..))]
        dpi: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Cli;
    use clap::Parser;
    use clap::error::ErrorKind;

    #[test]
    fn test_fetch_defaults() {
        let cli = Cli::try_parse_from(["evalkit", "fetch"]).unwrap();
        let Some(Commands::Fetch {
            repo_id,
            repo_type,
            patterns,
            ignore,
            local_dir,
            revision,
            force,
            dry_run,
            ..
        }) = cli.command
        else {
            panic!("expected fetch command");
        };

        assert_eq!(repo_id, "official-stockfish/fishtest_pgns");
        assert_eq!(repo_type, RepoKind::Dataset);
        assert_eq!(patterns, vec!["25-04-*/*/*.pgn.gz"]);
        assert!(ignore.is_empty());
        assert_eq!(local_dir, PathBuf::from("./pgns"));
        assert_eq!(revision, "main");
        assert!(!force);
        assert!(!dry_run);
    }

    #[test]
    fn test_fetch_repeated_patterns_replace_default() {
        let cli = Cli::try_parse_from([
            "evalkit",
            "fetch",
            "--pattern",
            "25-05-*/*/*.pgn.gz",
            "-p",
            "25-06-*/*/*.pgn.gz",
            "--ignore",
            "*/bad/*",
            "--repo-type",
            "model",
        ])
        .unwrap();
        let Some(Commands::Fetch {
            patterns,
            ignore,
            repo_type,
            ..
        }) = cli.command
        else {
            panic!("expected fetch command");
        };

        assert_eq!(patterns, vec!["25-05-*/*/*.pgn.gz", "25-06-*/*/*.pgn.gz"]);
        assert_eq!(ignore, vec!["*/bad/*"]);
        assert_eq!(repo_type, RepoKind::Model);
    }

    #[test]
    fn test_unknown_repo_type_is_usage_error() {
        let err = Cli::try_parse_from(["evalkit", "fetch", "--repo-type", "bucket"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_plot_defaults() {
        let cli = Cli::try_parse_from(["evalkit", "plot"]).unwrap();
        let Some(Commands::Plot { input, output, dpi }) = cli.command else {
            panic!("expected plot command");
        };

        assert_eq!(input, PathBuf::from("score_pairs.txt"));
        assert_eq!(output, PathBuf::from("eval_scatter_zoom.png"));
        assert_eq!(dpi, 300);
    }

    #[test]
    fn test_zero_dpi_rejected() {
        assert!(Cli::try_parse_from(["evalkit", "plot", "--dpi", "0"]).is_err());
    }
}
