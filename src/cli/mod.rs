//! Command-line interface for casecmp.
//!
//! The binary has no subcommands: it either prints version information or
//! starts the HTTP server.
//!
//! ## Usage
//!
//! ```text
//! # Listen on 0.0.0.0:8080
//! casecmp
//!
//! # Custom port and bind address
//! casecmp --port 3000 --bind 127.0.0.1
//!
//! # Behind a TLS-terminating proxy, show https:// in the usage text
//! casecmp --force-https
//!
//! # Print version information
//! casecmp -v
//! ```
//!
//! `PORT`, `BIND` and `FORCE_HTTPS` are read from the environment when the
//! matching flag is not given (see [`crate::config`]).

use clap::Parser;

/// Service name used in version, usage and about text.
pub const NAME: &str = "casecmp";

/// Crate version baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short commit hash captured by the build script, or `unknown`.
pub const COMMIT: &str = env!("CASECMP_COMMIT");

/// Compiler used for this build, captured by the build script.
pub const RUSTC_VERSION: &str = env!("CASECMP_RUSTC_VERSION");

#[derive(Parser, Debug)]
#[command(name = "casecmp")]
#[command(about = "Case-insensitive string comparison, as an API")]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Port to listen on [env: PORT] [default: 8080]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Bind address [env: BIND] [default: 0.0.0.0]
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Use https:// in example curl commands [env: FORCE_HTTPS]
    #[arg(short, long)]
    pub force_https: bool,

    /// Print version info
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

/// One-line version summary, e.g. `casecmp 0.1.0 (3f2c1ab), built with rustc 1.85.0`.
#[must_use]
pub fn version_string() -> String {
    let mut version = format!("{NAME} {VERSION}");

    if COMMIT != "unknown" {
        version.push_str(&format!(" ({COMMIT})"));
    }

    version.push_str(&format!(", built with {RUSTC_VERSION}"));
    version
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["casecmp", "-p", "3000", "-b", "127.0.0.1", "-f"]).unwrap();
        assert_eq!(cli.port, Some(3000));
        assert_eq!(cli.bind.as_deref(), Some("127.0.0.1"));
        assert!(cli.force_https);
        assert!(!cli.version);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_version_flag_is_lowercase_v() {
        let cli = Cli::try_parse_from(["casecmp", "-v"]).unwrap();
        assert!(cli.version);
        assert!(Cli::try_parse_from(["casecmp", "-V"]).is_err());
    }

    #[test]
    fn test_invalid_port_flag() {
        assert!(Cli::try_parse_from(["casecmp", "--port", "notaport"]).is_err());
        assert!(Cli::try_parse_from(["casecmp", "--port", "70000"]).is_err());
    }

    #[test]
    fn test_version_string() {
        let version = version_string();
        assert!(version.starts_with(&format!("casecmp {VERSION}")));
        assert!(version.contains(", built with "));
    }
}
