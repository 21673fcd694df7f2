//! CLI argument parsing using clap.

use clap::ArgAction;
use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "tarc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress and summary output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Archive a file or directory into .tar.zst or .tar.bz2
    Archive(ArchiveArgs),
    /// Extract a .tar.zst or .tar.bz2 archive
    Extract(ExtractArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(Debug, clap::Args)]
pub struct ArchiveArgs {
    /// File or directory to archive
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Archive name (.tar.zst, .zst, .tar.bz2 or .bz2)
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Print the elapsed time
    #[arg(long)]
    pub benchmark: bool,

    /// Compression level (1-9)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub compression_level: Option<u8>,
}

#[derive(Debug, clap::Args)]
pub struct ExtractArgs {
    /// Archive to extract (.tar.zst, .zst, .tar.bz2 or .bz2)
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Output directory, created if missing
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Print the elapsed time
    #[arg(long)]
    pub benchmark: bool,
}

#[derive(Debug, clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_archive() {
        let cli =
            Cli::try_parse_from(["tarc", "archive", "data", "out.zst", "--benchmark"]).unwrap();
        let Commands::Archive(args) = cli.command else {
            panic!("expected archive subcommand");
        };
        assert_eq!(args.source, PathBuf::from("data"));
        assert_eq!(args.target, "out.zst");
        assert!(args.benchmark);
        assert_eq!(args.compression_level, None);
    }

    #[test]
    fn test_parse_extract() {
        let cli = Cli::try_parse_from(["tarc", "extract", "in.tar.bz2", "out"]).unwrap();
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract subcommand");
        };
        assert_eq!(args.source, "in.tar.bz2");
        assert_eq!(args.output_dir, PathBuf::from("out"));
        assert!(!args.benchmark);
    }

    #[test]
    fn test_verbose_is_counted() {
        let cli = Cli::try_parse_from(["tarc", "-vv", "extract", "a.zst", "out"]).unwrap();
        assert_eq!(cli.verbose, 2);

        let cli = Cli::try_parse_from(["tarc", "extract", "a.zst", "out", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_compression_level_range() {
        let cli = Cli::try_parse_from(["tarc", "archive", "d", "o.bz2", "-l", "9"]).unwrap();
        let Commands::Archive(args) = cli.command else {
            panic!("expected archive subcommand");
        };
        assert_eq!(args.compression_level, Some(9));

        assert!(Cli::try_parse_from(["tarc", "archive", "d", "o.bz2", "-l", "0"]).is_err());
        assert!(Cli::try_parse_from(["tarc", "archive", "d", "o.bz2", "-l", "10"]).is_err());
    }

    #[test]
    fn test_missing_arguments_rejected() {
        assert!(Cli::try_parse_from(["tarc"]).is_err());
        assert!(Cli::try_parse_from(["tarc", "archive", "only-source"]).is_err());
        assert!(Cli::try_parse_from(["tarc", "extract", "a.tar.zst"]).is_err());
        assert!(Cli::try_parse_from(["tarc", "compress", "a", "b"]).is_err());
    }
}
