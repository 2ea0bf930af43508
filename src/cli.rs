//! CLI module - Command-line interface definitions and handlers

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::commands::{Display, OutputOptions};
use crate::history::HistoryLocation;
use crate::view::layout::Page;

/// nasfind - search text through a NASTRAN deck and every file it includes.
#[derive(Parser, Debug)]
#[command(name = "nasfind")]
#[command(
    author,
    version,
    about,
    long_about = r#"nasfind follows INCLUDE directives from a root NASTRAN file and searches
all reachable files for a case-insensitive substring.

Output formats:
- text: the result screen (default)
- jsonl: one JSON object per line (best for piping into tools)
- json: a single JSON array
- md: human-friendly Markdown
- raw: matching lines only

Examples:
    nasfind find model.bdf GRID
    nasfind find model.bdf cquad4 --scroll 20 --rows 40
    nasfind --format jsonl find model.bdf "PSHELL"
    nasfind includes model.bdf
    nasfind prompt model.bdf
"#
)]
pub struct Cli {
    /// Output format (text/jsonl/json/md/raw).
    #[arg(
        long,
        global = true,
        env = "NASFIND_FORMAT",
        default_value = "text",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- text (default): the result screen\n\
- jsonl\n\
- json\n\
- md (markdown)\n\
- raw\n\n\
Tip: Prefer jsonl when you want stable, line-oriented output for piping."
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON and JSONL output with indentation.\n\n\
Has no effect on text/md/raw formats."
    )]
    pub pretty: bool,

    /// Disable colored output.
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. Colors are also off whenever stdout is not a terminal."
    )]
    pub no_color: bool,

    /// Quiet mode (no diagnostics on stderr).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable debug diagnostics on stderr. NASFIND_LOG overrides the level,\n\
e.g. NASFIND_LOG=nasfind=trace."
    )]
    pub verbose: bool,

    /// History file of recently searched roots.
    #[arg(
        long,
        global = true,
        env = "NASFIND_HISTORY",
        value_name = "PATH",
        long_help = "File holding the recently searched root files.\n\n\
Defaults to recent.json in the platform data directory."
    )]
    pub history: Option<PathBuf>,

    /// Do not read or write the history.
    #[arg(long, global = true)]
    pub no_history: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search a root file and everything it includes.
    #[command(
        long_about = "Resolve the INCLUDE tree of FILE, then list every line containing TEXT\n\
(case-insensitive) grouped per file, in discovery order.\n\n\
Unreadable or missing includes are reported after the results; they never\n\
make the command fail.\n\n\
Examples:\n\
  nasfind find model.bdf GRID\n\
  nasfind find model.bdf \"$ side\" --scroll 10 --rows 30\n\
  nasfind find          # most recent root, empty search\n"
    )]
    Find {
        /// Root file; defaults to the most recent one in the history.
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Text to search for; empty lists the files only.
        #[arg(value_name = "TEXT", default_value = "")]
        text: String,

        /// Result rows skipped from the top (text format).
        #[arg(long, default_value = "0", value_name = "N")]
        scroll: usize,

        /// Result rows shown (text format); all when omitted.
        #[arg(long, value_name = "N")]
        rows: Option<usize>,
    },

    /// List the files reachable from a root file.
    #[command(
        long_about = "Resolve the INCLUDE tree of FILE and print the visited files in\n\
discovery order, followed by the include errors.\n\n\
Example:\n\
  nasfind includes model.bdf\n"
    )]
    Includes {
        /// Root file.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Search interactively, one search text per input line.
    #[command(
        long_about = "Print the result screen of FILE, then read search texts from stdin,\n\
one per line, re-running the search and printing the screen after each.\n\n\
Enter :q (or end the input) to stop.\n\n\
Example:\n\
  nasfind prompt model.bdf\n"
    )]
    Prompt {
        /// Root file.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Show recently searched root files.
    Recent,
}

impl Cli {
    /// Output settings from the global flags
    pub fn output_options(&self) -> Result<OutputOptions> {
        let display: Display = self.format.parse().map_err(|e: String| anyhow!(e))?;
        Ok(OutputOptions {
            display,
            pretty: self.pretty,
            color: !self.no_color && std::io::stdout().is_terminal(),
        })
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let options = cli.output_options()?;
    let history = HistoryLocation::from_options(cli.history, cli.no_history);
    tracing::debug!("history: {:?}", history);

    match cli.command {
        Commands::Find {
            file,
            text,
            scroll,
            rows,
        } => crate::commands::find::run_find(
            file.as_deref(),
            &text,
            Page { scroll, rows },
            &options,
            &history,
        ),

        Commands::Includes { file } => crate::commands::includes::run_includes(&file, &options),

        Commands::Prompt { file } => crate::commands::prompt::run_prompt(&file, &options, &history),

        Commands::Recent => crate::commands::recent::run_recent(&options, &history),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn test_parse_find() {
        let cli = Cli::try_parse_from(["nasfind", "find", "deck.dat", "grid", "--rows", "5"]).unwrap();
        match cli.command {
            Commands::Find {
                file,
                text,
                scroll,
                rows,
            } => {
                assert_eq!(file, Some(PathBuf::from("deck.dat")));
                assert_eq!(text, "grid");
                assert_eq!(scroll, 0);
                assert_eq!(rows, Some(5));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_output_options() {
        let cli = Cli::try_parse_from(["nasfind", "--format", "json", "--pretty", "recent"]).unwrap();
        let options = cli.output_options().unwrap();
        assert_eq!(options.display, Display::Structured(OutputFormat::Json));
        assert!(options.pretty);
    }

    #[test]
    fn test_unknown_format_is_an_error() {
        let cli = Cli::try_parse_from(["nasfind", "--format", "html", "recent"]).unwrap();
        assert!(cli.output_options().is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["nasfind", "-q", "-v", "recent"]).is_err());
    }

    #[test]
    fn test_verbose_help_names_log_target() {
        let cmd = Cli::command();
        let verbose = cmd
            .get_arguments()
            .find(|arg| arg.get_id() == "verbose")
            .unwrap();
        let help = verbose.get_long_help().unwrap().to_string();
        let target = module_path!().split("::").next().unwrap();
        assert!(help.contains(&format!("NASFIND_LOG={}=", target)));
    }
}
