//! prefstore CLI - read and write application preferences from a terminal.
//!
//! The CLI binds one [`PreferenceStore`] at startup and runs a single command
//! against it. A failed write is reported on stderr and turns into exit
//! status 1; nothing panics.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prefstore::{Namespace, PreferenceStore, Scope, StoreConfig};

mod commands;
pub mod info;

pub use info::SystemReport;

/// Namespace used when none is given.
pub const DEFAULT_NAMESPACE: &str = "org.example.sampleapp";

/// prefstore CLI application
#[derive(Parser)]
#[command(name = "prefstore")]
#[command(about = "Read and write namespaced application preferences", long_about = None)]
#[command(version)]
struct Cli {
    /// Dotted package name the preferences belong to
    #[arg(short, long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Use the machine-wide preference tree instead of the user tree
    #[arg(long)]
    system: bool,

    /// Base directory replacing the platform default location
    #[arg(long, env = "PREFSTORE_ROOT")]
    root: Option<PathBuf>,

    /// Do not read values back after writing them
    #[arg(long)]
    no_verify: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Available commands
#[derive(Subcommand)]
enum Command {
    /// Show where this namespace is stored
    Identity,

    /// Print the value of a key, or the default if it is not set
    Get {
        key: String,
        /// Printed when the key is not set
        #[arg(short, long, default_value = "")]
        default: String,
    },

    /// Store a value under a key
    Put { key: String, value: String },

    /// Delete a key
    Remove { key: String },

    /// List every key and value in the namespace
    List,

    /// Write the namespace as JSON
    Export {
        /// File to write instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load entries from a JSON export into the namespace
    Import { file: PathBuf },

    /// Show system properties and environment
    Info,
}

/// Run using the current process arguments.
pub fn run() -> anyhow::Result<ExitCode> {
    run_with_args(std::env::args_os())
}

/// Run using the provided argument iterator.
pub fn run_with_args<I, T>(args: I) -> anyhow::Result<ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    let filter = if cli.verbose { "debug" } else { "warn" };
    // Ignore a second init when run repeatedly in one process.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();

    let namespace = Namespace::from_package(&cli.namespace)
        .with_context(|| format!("invalid namespace {:?}", cli.namespace))?;
    let prefs = PreferenceStore::open(namespace, &cli.config());

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr().lock();
    commands::execute(cli.command, &prefs, &mut stdout, &mut stderr)
}

impl Cli {
    fn config(&self) -> StoreConfig {
        let mut config = StoreConfig {
            scope: if self.system { Scope::System } else { Scope::User },
            ..StoreConfig::default()
        };
        if let Some(root) = &self.root {
            config = config.with_root(root);
        }
        config.verify_writes(!self.no_verify)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["prefstore", "identity"]);
        assert_eq!(cli.namespace, DEFAULT_NAMESPACE);
        assert!(!cli.system);
        assert!(matches!(cli.command, Command::Identity));
    }

    #[test]
    fn test_config_from_flags() {
        let cli = Cli::parse_from([
            "prefstore",
            "--system",
            "--root",
            "/tmp/prefs",
            "--no-verify",
            "get",
            "k",
        ]);
        let config = cli.config();
        assert_eq!(config.scope, Scope::System);
        assert_eq!(config.root.as_deref(), Some(std::path::Path::new("/tmp/prefs")));
        assert!(!config.verify_writes);
    }

    #[test]
    fn test_parse_get_default() {
        let cli = Cli::parse_from(["prefstore", "get", "sample-key", "--default", "none"]);
        match cli.command {
            Command::Get { key, default } => {
                assert_eq!(key, "sample-key");
                assert_eq!(default, "none");
            }
            _ => panic!("expected get"),
        }
    }
}
