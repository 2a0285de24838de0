//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use kodiak_model::DuplicateStrategy;

#[derive(Parser)]
#[command(
    name = "kodiak",
    version,
    about = "Unpack Kodiak submission archives for grading and pack them back up",
    long_about = "Unpack a Kodiak submissions download into one directory per student,\n\
                  then rebuild an archive Kodiak accepts from the graded files.\n\n\
                  Kodiak names each file '<id> - <First> <Last> - <date> - <file>';\n\
                  the working tree uses the student's own file names instead."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// How to print the run summary.
    #[arg(long = "report", value_enum, default_value = "table", global = true)]
    pub report: ReportFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a project from a Kodiak submissions archive.
    Init(InitArgs),

    /// Build the archive to upload from the graded submissions.
    Archive(ArchiveArgs),

    /// List the archive formats that are recognised.
    Formats,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to create the project in.
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Submissions archive downloaded from Kodiak.
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// How to handle several submissions of the same file by one student.
    #[arg(long = "duplicates", value_enum, default_value = "number-older")]
    pub duplicates: DuplicatesArg,
}

#[derive(Parser)]
pub struct ArchiveArgs {
    /// Any directory inside the project.
    #[arg(long = "project-root", value_name = "PATH", default_value = ".")]
    pub project_root: PathBuf,
}

/// CLI duplicates strategy choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DuplicatesArg {
    /// Newest submission keeps the name, older ones are numbered.
    NumberOlder,
    /// Oldest submission keeps the name, newer ones are numbered.
    NumberNewer,
    /// Import only the oldest submission.
    OldestOnly,
    /// Import only the newest submission.
    NewestOnly,
}

impl From<DuplicatesArg> for DuplicateStrategy {
    fn from(arg: DuplicatesArg) -> Self {
        match arg {
            DuplicatesArg::NumberOlder => Self::NumberOlder,
            DuplicatesArg::NumberNewer => Self::NumberNewer,
            DuplicatesArg::OldestOnly => Self::OldestOnly,
            DuplicatesArg::NewestOnly => Self::NewestOnly,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// CLI summary format choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_defaults() {
        let cli = Cli::try_parse_from(["kodiak", "init", "hw4", "Homework 4.zip"]).unwrap();
        let Command::Init(args) = cli.command else {
            panic!("expected init");
        };
        assert_eq!(args.directory, PathBuf::from("hw4"));
        assert_eq!(args.archive, PathBuf::from("Homework 4.zip"));
        assert_eq!(args.duplicates, DuplicatesArg::NumberOlder);
        assert_eq!(cli.report, ReportFormatArg::Table);
    }

    #[test]
    fn test_duplicates_values_match_strategy_names() {
        for strategy in DuplicateStrategy::ALL {
            let cli = Cli::try_parse_from([
                "kodiak",
                "init",
                "hw4",
                "hw4.zip",
                "--duplicates",
                strategy.as_str(),
            ])
            .unwrap();
            let Command::Init(args) = cli.command else {
                panic!("expected init");
            };
            assert_eq!(DuplicateStrategy::from(args.duplicates), strategy);
        }
    }

    #[test]
    fn test_rejects_unknown_strategy() {
        let result = Cli::try_parse_from(["kodiak", "init", "a", "b.zip", "--duplicates", "all"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_archive_with_global_flags() {
        let cli = Cli::try_parse_from([
            "kodiak",
            "archive",
            "--project-root",
            "hw4/submissions",
            "--report",
            "json",
            "-v",
        ])
        .unwrap();
        let Command::Archive(args) = cli.command else {
            panic!("expected archive");
        };
        assert_eq!(args.project_root, PathBuf::from("hw4/submissions"));
        assert_eq!(cli.report, ReportFormatArg::Json);
        assert!(cli.verbosity.is_present());
    }
}
