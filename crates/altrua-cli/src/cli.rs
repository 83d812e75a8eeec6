//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Altrua CLI - Map CSR report disclosures to GRI codes.
#[derive(Debug, Parser)]
#[command(name = "altrua")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "ALTRUA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (headline counts only)
    Quiet,
}

/// Where documents are summarized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TransportArg {
    /// Run the pipeline locally against the LLM provider
    Local,
    /// Upload to the remote pipeline webhook
    Webhook,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a report and print its disclosure summary
    Analyze(AnalyzeArgs),

    /// Print the prompt that would be sent for a report
    Prompt(PromptArgs),

    /// Summarize a saved LLM response without calling the LLM
    Summarize(SummarizeArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Report file to analyze
    pub file: PathBuf,

    /// Organization the report belongs to
    #[arg(short, long)]
    pub org: Option<String>,

    /// Summary transport
    #[arg(short, long, value_enum)]
    pub transport: Option<TransportArg>,

    /// LLM model (local transport only)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Seconds to wait for a summary
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Arguments for the prompt command.
#[derive(Debug, Parser)]
pub struct PromptArgs {
    /// Report file (plain text, pages separated by form feeds)
    pub file: PathBuf,

    /// Organization the report belongs to
    #[arg(short, long)]
    pub org: Option<String>,
}

/// Arguments for the summarize command.
#[derive(Debug, Parser)]
pub struct SummarizeArgs {
    /// File holding the raw LLM response
    pub response_file: PathBuf,

    /// Organization the report belongs to
    #[arg(short, long)]
    pub org: Option<String>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<TransportArg> for crate::config::Transport {
    fn from(transport: TransportArg) -> Self {
        match transport {
            TransportArg::Local => crate::config::Transport::Local,
            TransportArg::Webhook => crate::config::Transport::Webhook,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_command() {
        let cli = Cli::parse_from([
            "altrua",
            "analyze",
            "disney_csr.txt",
            "--org",
            "Disney",
            "--transport",
            "webhook",
        ]);
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.file, PathBuf::from("disney_csr.txt"));
                assert_eq!(args.org.as_deref(), Some("Disney"));
                assert_eq!(args.transport, Some(TransportArg::Webhook));
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["altrua", "summarize", "reply.txt", "-f", "json", "-vv"]);
        assert_eq!(cli.format, Some(CliFormat::Json));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Summarize(_)));
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["altrua", "config", "init", "--force"]);
        match cli.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force },
            }) => assert!(force),
            _ => panic!("Expected config init"),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["altrua"]).is_err());
    }

    #[test]
    fn test_format_conversion() {
        let format: crate::config::OutputFormat = CliFormat::Quiet.into();
        assert_eq!(format, crate::config::OutputFormat::Quiet);
    }
}
