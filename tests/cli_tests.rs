use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

const SAMPLE: &str = "Chapter1 Intro\nHello world. Hello there.\nChapter2 Next\nGoodbye world.";

/// Helper to create a chapgrep command
fn chapgrep_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("chapgrep"))
}

fn write_sample(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("novel.txt");
    fs::write(&path, SAMPLE).unwrap();
    path
}

#[test]
fn test_help() {
    chapgrep_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Keyword search across chapter-segmented novels"));
}

#[test]
fn test_version() {
    chapgrep_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("chapgrep"));
}

#[test]
fn test_search_help() {
    chapgrep_cmd()
        .arg("search")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Search a novel for every occurrence"));
}

#[test]
fn test_chapters_help() {
    chapgrep_cmd()
        .arg("chapters")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("List the chapters"));
}

#[test]
fn test_search_text_output() {
    let temp_dir = TempDir::new().unwrap();
    let novel = write_sample(&temp_dir);

    chapgrep_cmd()
        .arg("search")
        .arg(&novel)
        .arg("Hello")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Hello\" found 2 times in 1 chapters."))
        .stdout(predicate::str::contains("1. 第1章-Intro (offset 0)"))
        .stdout(predicate::str::contains("2. 第1章-Intro (offset 13)"))
        .stdout(predicate::str::contains("<strong>Hello</strong> world."));
}

#[test]
fn test_search_not_found_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let novel = write_sample(&temp_dir);

    chapgrep_cmd()
        .arg("search")
        .arg(&novel)
        .arg("Farewell")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"Farewell\" was not found."));
}

#[test]
fn test_search_quiet() {
    let temp_dir = TempDir::new().unwrap();
    let novel = write_sample(&temp_dir);

    chapgrep_cmd()
        .args(["search", "-q"])
        .arg(&novel)
        .arg("world")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    chapgrep_cmd()
        .args(["search", "--quiet"])
        .arg(&novel)
        .arg("nowhere")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_search_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let novel = write_sample(&temp_dir);

    let output = chapgrep_cmd()
        .arg("search")
        .arg(&novel)
        .arg("world")
        .args(["--format", "json", "--no-highlight"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["keyword"], "world");
    assert_eq!(value["total_occurrences"], 2);
    assert_eq!(value["hits"][1]["chapter_title"], "第2章-Next");
    assert_eq!(value["hits"][1]["chapter_index"], 1);
    assert_eq!(value["hits"][1]["offset"], 8);
    assert_eq!(value["hits"][1]["snippet"], "Goodbye world.");
}

#[test]
fn test_search_csv_output() {
    let temp_dir = TempDir::new().unwrap();
    let novel = write_sample(&temp_dir);

    chapgrep_cmd()
        .arg("search")
        .arg(&novel)
        .arg("Goodbye")
        .args(["--format", "csv", "--no-highlight"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "chapter_title,chapter_index,offset,snippet\n",
        ))
        .stdout(predicate::str::contains("第2章-Next,1,0,Goodbye world."));
}

#[test]
fn test_search_summary_output() {
    let temp_dir = TempDir::new().unwrap();
    let novel = write_sample(&temp_dir);

    chapgrep_cmd()
        .arg("search")
        .arg(&novel)
        .arg("o")
        .args(["--format", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"o\" found"))
        .stdout(predicate::str::contains("offset").not());
}

#[test]
fn test_search_custom_markers_and_context() {
    let temp_dir = TempDir::new().unwrap();
    let novel = write_sample(&temp_dir);

    chapgrep_cmd()
        .arg("search")
        .arg(&novel)
        .arg("there")
        .args(["-C", "3", "--highlight-open", "[", "--highlight-close", "]"])
        .assert()
        .success()
        .stdout(predicate::str::contains("   ...lo [there]...."));
}

#[test]
fn test_search_invalid_format() {
    let temp_dir = TempDir::new().unwrap();
    let novel = write_sample(&temp_dir);

    chapgrep_cmd()
        .arg("search")
        .arg(&novel)
        .arg("Hello")
        .args(["--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_search_empty_keyword_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let novel = write_sample(&temp_dir);

    chapgrep_cmd()
        .arg("search")
        .arg(&novel)
        .arg("   ")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Keyword must not be empty"));
}

#[test]
fn test_search_missing_source_reports_nothing() {
    let temp_dir = TempDir::new().unwrap();

    chapgrep_cmd()
        .arg("search")
        .arg(temp_dir.path().join("missing.txt"))
        .arg("Hello")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("was not found"))
        .stderr(predicate::str::contains("Source unavailable"));
}

#[test]
fn test_search_gzip_source() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("novel.txt.gz");
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(SAMPLE.as_bytes()).unwrap();
    fs::write(&path, encoder.finish().unwrap()).unwrap();

    chapgrep_cmd()
        .arg("search")
        .arg(&path)
        .arg("Goodbye")
        .assert()
        .success()
        .stdout(predicate::str::contains("第2章-Next"));
}

#[test]
fn test_search_stdin() {
    chapgrep_cmd()
        .args(["search", "-", "there"])
        .write_stdin(SAMPLE)
        .assert()
        .success()
        .stdout(predicate::str::contains("(offset 19)"));
}

#[test]
fn test_search_parallel_threads() {
    let temp_dir = TempDir::new().unwrap();
    let novel = write_sample(&temp_dir);

    chapgrep_cmd()
        .arg("search")
        .arg(&novel)
        .arg("world")
        .args(["-j", "2", "--stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("found 2 times in 2 chapters"))
        .stderr(predicate::str::contains("[INFO] Mode: Parallel"));
}

#[test]
fn test_search_invalid_threads() {
    let temp_dir = TempDir::new().unwrap();
    let novel = write_sample(&temp_dir);

    chapgrep_cmd()
        .arg("search")
        .arg(&novel)
        .arg("world")
        .args(["-j", "lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid thread count"));
}

#[test]
fn test_search_max_hits() {
    let temp_dir = TempDir::new().unwrap();
    let novel = write_sample(&temp_dir);

    chapgrep_cmd()
        .arg("search")
        .arg(&novel)
        .arg("o")
        .args(["--max-hits", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. "))
        .stdout(predicate::str::contains("2. ").not())
        .stdout(predicate::str::contains("more not shown"));
}

#[test]
fn test_chapters_listing() {
    let temp_dir = TempDir::new().unwrap();
    let novel = write_sample(&temp_dir);

    chapgrep_cmd()
        .arg("chapters")
        .arg(&novel)
        .assert()
        .success()
        .stdout(predicate::str::contains("Chapters: 2 (0 untitled)"))
        .stdout(predicate::str::contains("第1章-Intro"))
        .stdout(predicate::str::contains("第2章-Next"));
}

#[test]
fn test_chapters_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("novel.txt");
    fs::write(&path, format!("Preface\n{}", SAMPLE)).unwrap();

    let output = chapgrep_cmd()
        .args(["chapters", "--json", "--verbose"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["chapter_count"], 3);
    assert_eq!(value["untitled_count"], 1);
    assert_eq!(value["chapters"][0]["title"], "Unknown Chapter");
    assert_eq!(value["chapters"][0]["preview"], "Preface");
    assert_eq!(value["chapters"][2]["chars"], 14);
}

#[test]
fn test_chapters_missing_source_fails() {
    let temp_dir = TempDir::new().unwrap();

    chapgrep_cmd()
        .arg("chapters")
        .arg(temp_dir.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load source"));
}
