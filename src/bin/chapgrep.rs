mod cli_utils;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{cmd_chapters, cmd_search, SearchArgs};

#[derive(Parser)]
#[command(name = "chapgrep")]
#[command(
    about = "Keyword search across the chapters of a novel",
    long_about = "chapgrep - Keyword search across chapter-segmented novels\n\n\
    Splits a novel into chapters at 'ChapterN Name' markers and reports every\n\
    occurrence of a keyword with its chapter title and surrounding context.\n\n\
    Features:\n\
      • Boyer-Moore search over Unicode text\n\
      • Chapter titles normalized to 第N章-Name\n\
      • Plain text or gzip-compressed sources, or stdin\n\
      • Text, JSON, CSV or summary output\n\n\
    Examples:\n\
      chapgrep search novel.txt '剑来'\n\
      chapgrep search novel.txt.gz sword --format json\n\
      chapgrep chapters novel.txt --verbose"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a novel for every occurrence of a keyword
    Search {
        /// Novel text file (.txt or .gz), or "-" for stdin
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Keyword to search for (surrounding whitespace is ignored)
        #[arg(value_name = "KEYWORD")]
        keyword: String,

        /// Output format: text (default), json, csv, or summary (counts only)
        #[arg(long, default_value = "text")]
        format: String,

        /// Characters of context shown on each side of a match
        #[arg(short = 'C', long, default_value = "50")]
        context: usize,

        /// Do not mark the keyword inside snippets
        #[arg(long)]
        no_highlight: bool,

        /// Text inserted before each highlighted keyword
        #[arg(long, default_value = "<strong>")]
        highlight_open: String,

        /// Text inserted after each highlighted keyword
        #[arg(long, default_value = "</strong>")]
        highlight_close: String,

        /// Only highlight occurrences with exactly the keyword's casing
        #[arg(long)]
        case_sensitive_highlight: bool,

        /// Number of worker threads (default: 1, use "auto" for all cores)
        #[arg(short = 'j', long)]
        threads: Option<String>,

        /// Maximum number of hits to print (the total still counts all of them)
        #[arg(long)]
        max_hits: Option<usize>,

        /// Quiet mode - no output, only exit code (0 = found, 1 = not found)
        #[arg(short, long)]
        quiet: bool,

        /// Show load and search statistics on stderr
        #[arg(short, long)]
        stats: bool,
    },

    /// List the chapters found in a novel
    Chapters {
        /// Novel text file (.txt or .gz), or "-" for stdin
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Output chapter list as JSON
        #[arg(short, long)]
        json: bool,

        /// Show a preview of each chapter's content
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    cli_utils::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            source,
            keyword,
            format,
            context,
            no_highlight,
            highlight_open,
            highlight_close,
            case_sensitive_highlight,
            threads,
            max_hits,
            quiet,
            stats,
        } => cmd_search(SearchArgs {
            source,
            keyword,
            format,
            context,
            no_highlight,
            highlight_open,
            highlight_close,
            case_sensitive_highlight,
            threads,
            max_hits,
            quiet,
            stats,
        }),
        Commands::Chapters {
            source,
            json,
            verbose,
        } => cmd_chapters(source, json, verbose),
    }
}
