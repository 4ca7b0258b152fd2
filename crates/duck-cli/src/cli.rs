//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// DUCK - check data-use documents against regulatory rulebases.
#[derive(Debug, Parser)]
#[command(name = "duck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true, env = "DUCK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// One line per item
    Text,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize a document against a taxonomy
    Normalize(NormalizeArgs),

    /// List the rulebases in the rulebase directory
    Rulebases(RulebasesArgs),
}

/// Arguments for the normalize command.
#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Document to normalize (JSON)
    #[arg(short, long)]
    pub document: PathBuf,

    /// User whose global dictionary is consulted (JSON)
    #[arg(short, long)]
    pub user: Option<PathBuf>,

    /// Taxonomy file (JSON); overrides the web directory lookup
    #[arg(short, long, conflicts_with = "web_dir")]
    pub taxonomy: Option<PathBuf>,

    /// Web directory holding `assets/config/taxonomy-<locale>.json`
    #[arg(short, long)]
    pub web_dir: Option<PathBuf>,

    /// Expand data-category refinements into separate statements
    #[arg(long)]
    pub unfold: bool,
}

/// Arguments for the rulebases command.
#[derive(Debug, Args)]
pub struct RulebasesArgs {
    /// Rulebase directory; defaults to the configured one
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_normalize() {
        let cli = Cli::try_parse_from([
            "duck",
            "normalize",
            "--document",
            "doc.json",
            "--web-dir",
            "web",
            "--unfold",
        ])
        .unwrap();

        match cli.command {
            Command::Normalize(args) => {
                assert_eq!(args.document, PathBuf::from("doc.json"));
                assert_eq!(args.web_dir, Some(PathBuf::from("web")));
                assert!(args.unfold);
                assert!(args.user.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_taxonomy_conflicts_with_web_dir() {
        let result = Cli::try_parse_from([
            "duck",
            "normalize",
            "-d",
            "doc.json",
            "--taxonomy",
            "t.json",
            "--web-dir",
            "web",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["duck", "rulebases", "--format", "text", "--config", "duck.toml"])
                .unwrap();
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.config, Some(PathBuf::from("duck.toml")));
    }
}
