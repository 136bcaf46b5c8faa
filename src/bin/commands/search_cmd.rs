use anyhow::{Context, Result};
use chapgrep::{Highlight, SearchOptions, SearchReport, Session};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use crate::cli_utils::{format_duration, format_number, parse_threads};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Csv,
    Summary,
}

impl OutputFormat {
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "summary" => Ok(Self::Summary),
            _ => anyhow::bail!("Invalid format '{}', expected: text, json, csv, or summary", s),
        }
    }
}

pub struct SearchArgs {
    pub source: PathBuf,
    pub keyword: String,
    pub format: String,
    pub context: usize,
    pub no_highlight: bool,
    pub highlight_open: String,
    pub highlight_close: String,
    pub case_sensitive_highlight: bool,
    pub threads: Option<String>,
    pub max_hits: Option<usize>,
    pub quiet: bool,
    pub stats: bool,
}

pub fn cmd_search(args: SearchArgs) -> Result<()> {
    let output_format = OutputFormat::from_str(&args.format)?;

    if args.keyword.trim().is_empty() {
        anyhow::bail!("Keyword must not be empty");
    }

    let num_threads = parse_threads(args.threads.as_deref())?;
    if num_threads > 1 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let session = Session::new();
    let load_start = Instant::now();
    // A missing source leaves the session empty; the search then reports nothing.
    let loaded = session.load_path(&args.source).is_ok();
    let load_time = load_start.elapsed();

    if args.stats {
        if loaded {
            eprintln!("[INFO] Loaded source: {}", args.source.display());
        } else {
            eprintln!("[INFO] Source unavailable: {}", args.source.display());
        }
        eprintln!("[INFO] Chapters: {}", format_number(session.len()));
        eprintln!("[INFO] Load time: {}", format_duration(load_time));
    }

    let highlight = if args.no_highlight {
        Highlight::None
    } else {
        Highlight::Markers {
            open: args.highlight_open,
            close: args.highlight_close,
        }
    };
    let options = SearchOptions::new()
        .context_radius(args.context)
        .highlight(highlight)
        .case_insensitive_highlight(!args.case_sensitive_highlight)
        .parallel(num_threads != 1)
        .max_hits(args.max_hits);

    let search_start = Instant::now();
    let report = session
        .search(&args.keyword, &options)
        .with_context(|| format!("Search failed for: {}", args.keyword))?;
    let search_time = search_start.elapsed();

    if args.stats {
        eprintln!(
            "[INFO] Mode: {}",
            if options.is_parallel() {
                "Parallel"
            } else {
                "Sequential"
            }
        );
        eprintln!(
            "[INFO] Chapters searched: {} (skipped {})",
            format_number(report.chapters_searched),
            format_number(report.chapters_skipped)
        );
        eprintln!("[INFO] Search time: {}", format_duration(search_time));
    }

    let found = report.found();
    if !args.quiet {
        match output_format {
            OutputFormat::Text => print_text(&report),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Csv => print_csv(&report)?,
            OutputFormat::Summary => print_summary(&report),
        }
    }

    // Exit with appropriate code
    std::process::exit(if found { 0 } else { 1 });
}

fn print_summary(report: &SearchReport) {
    if report.found() {
        println!(
            "\"{}\" found {} times in {} chapters.",
            report.keyword,
            format_number(report.total_occurrences),
            format_number(report.chapters_matched)
        );
    } else {
        println!("\"{}\" was not found.", report.keyword);
    }
}

fn print_text(report: &SearchReport) {
    print_summary(report);
    if report.hits.is_empty() {
        return;
    }

    println!();
    for (i, hit) in report.hits.iter().enumerate() {
        println!("{}. {} (offset {})", i + 1, hit.chapter_title, hit.offset);
        println!("   ...{}...", hit.snippet);
    }
    if report.hits.len() < report.total_occurrences {
        println!(
            "\n({} more not shown)",
            format_number(report.total_occurrences - report.hits.len())
        );
    }
}

fn print_csv(report: &SearchReport) -> Result<()> {
    let stdout = io::stdout();
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(stdout.lock());
    // Header is written up front so an empty result is still a valid table
    writer.write_record(["chapter_title", "chapter_index", "offset", "snippet"])?;
    for hit in &report.hits {
        writer.serialize(hit)?;
    }
    writer.flush()?;
    Ok(())
}
