use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "deepmap",
    about = "Structural change detection between JSON documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the change tree of LEFT against RIGHT
    Diff(DiffArgs),
    /// List every changed path
    Changes(PairArgs),
    /// Report whether anything changed; exits 1 when it did
    Check(CheckArgs),
}

/// Two input documents. `-` reads standard input.
#[derive(Args)]
pub struct PairArgs {
    pub left: String,
    pub right: String,
    /// Walk with an explicit stack instead of recursion
    #[arg(long)]
    pub iterative: bool,
}

#[derive(Args)]
pub struct DiffArgs {
    #[command(flatten)]
    pub pair: PairArgs,
    /// Hide unchanged leaves
    #[arg(long)]
    pub changed_only: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub pair: PairArgs,
    /// Treat equal top-level scalars as changed, like older dirty checks did
    #[arg(long)]
    pub legacy: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_diff() {
        let cli = Cli::try_parse_from(["deepmap", "diff", "a.json", "b.json"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.pair.left, "a.json");
            assert_eq!(args.pair.right, "b.json");
            assert!(!args.changed_only);
            assert!(!args.pair.iterative);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_diff_changed_only_iterative() {
        let cli = Cli::try_parse_from([
            "deepmap", "diff", "--changed-only", "--iterative", "a", "b",
        ])
        .unwrap();
        if let Command::Diff(args) = cli.command {
            assert!(args.changed_only);
            assert!(args.pair.iterative);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_changes_stdin() {
        let cli = Cli::try_parse_from(["deepmap", "changes", "-", "b.json"]).unwrap();
        if let Command::Changes(args) = cli.command {
            assert_eq!(args.left, "-");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_check_legacy() {
        let cli = Cli::try_parse_from(["deepmap", "check", "--legacy", "a", "b"]).unwrap();
        if let Command::Check(args) = cli.command {
            assert!(args.legacy);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_globals() {
        let cli = Cli::try_parse_from([
            "deepmap", "--verbose", "--format", "json", "--config", "deepmap.toml", "check", "a", "b",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.format, OutputFormat::Json));
        assert_eq!(cli.config, Some(PathBuf::from("deepmap.toml")));
    }

    #[test]
    fn missing_input_rejected() {
        assert!(Cli::try_parse_from(["deepmap", "diff", "only-one"]).is_err());
    }
}
