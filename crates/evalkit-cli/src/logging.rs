//! Tracing subscriber setup.
//!
//! Priority: `RUST_LOG` > `--verbose` > default (warn). Logs go to stderr so
//! stdout only carries command output.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "warn";

const VERBOSE_DIRECTIVES: &str = "warn,evalkit_cli=debug,evalkit_core=debug,evalkit_hf=debug,\
                                  evalkit_fetch=debug,evalkit_plot=debug";

/// Filter directives used when `RUST_LOG` is not set.
pub const fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_DIRECTIVES
    } else {
        DEFAULT_DIRECTIVES
    }
}

/// Install the global subscriber. Does nothing if one is already installed.
pub fn init_tracing(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .ok();
}
