//! CLI module for Plugin STS
//!
//! Provides subcommands for:
//! - `serve`: run the HTTP service
//! - `issue`: mint a token locally with the configured secret
//! - `verify`: check a token against an API key

pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

/// Plugin STS - short-lived service tokens for plugin clients
#[derive(Parser)]
#[command(name = "plugin-sts")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP service
    Serve,

    /// Issue a token for an API key and tenant
    Issue(token::IssueArgs),

    /// Verify a token against an API key
    Verify(token::VerifyArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_issue() {
        let cli = Cli::try_parse_from([
            "plugin-sts",
            "issue",
            "--api-key",
            "key-abc",
            "--tenant",
            "tenant-1",
        ])
        .unwrap();

        match cli.command {
            Command::Issue(args) => {
                assert_eq!(args.api_key, "key-abc");
                assert_eq!(args.tenant, "tenant-1");
            }
            _ => panic!("expected issue command"),
        }
    }

    #[test]
    fn test_parse_verify_requires_token() {
        let result = Cli::try_parse_from(["plugin-sts", "verify", "--api-key", "key-abc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["plugin-sts", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }
}
