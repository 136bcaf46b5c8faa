use anyhow::{Context, Result};
use chapgrep::Session;
use serde_json::json;
use std::path::PathBuf;

use crate::cli_utils::{format_number, one_line_preview};

const PREVIEW_CHARS: usize = 60;

pub fn cmd_chapters(source: PathBuf, json_output: bool, verbose: bool) -> Result<()> {
    let session = Session::new();
    session
        .load_path(&source)
        .with_context(|| format!("Failed to load source: {}", source.display()))?;

    let chapters = session.chapters();
    let untitled = chapters.iter().filter(|c| c.is_untitled()).count();

    if json_output {
        let list: Vec<_> = chapters
            .iter()
            .map(|c| {
                let mut entry = json!({
                    "index": c.index(),
                    "title": c.title(),
                    "chars": c.content().chars().count(),
                });
                if verbose {
                    entry["preview"] = json!(one_line_preview(c.content(), PREVIEW_CHARS));
                }
                entry
            })
            .collect();

        let output = json!({
            "source": source.display().to_string(),
            "chapter_count": chapters.len(),
            "untitled_count": untitled,
            "chapters": list,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Source:   {}", source.display());
    println!(
        "Chapters: {} ({} untitled)",
        format_number(chapters.len()),
        format_number(untitled)
    );
    println!();

    for chapter in chapters.iter() {
        println!(
            "  #{:<5} {}  ({} chars)",
            chapter.index(),
            chapter.title(),
            format_number(chapter.content().chars().count())
        );
        if verbose && !chapter.content().is_empty() {
            println!(
                "          {}",
                one_line_preview(chapter.content(), PREVIEW_CHARS)
            );
        }
    }

    Ok(())
}
