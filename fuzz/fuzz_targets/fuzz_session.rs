#![no_main]
use chapgrep::{SearchOptions, Session};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let split_point = (data[0] as usize).min(data.len() - 1).max(1);
    let keyword = String::from_utf8_lossy(&data[1..split_point]);
    let text = String::from_utf8_lossy(&data[split_point..]);

    let session = Session::from_text(&text);
    let options = SearchOptions::new().context_radius(data[0] as usize % 64);
    if let Ok(report) = session.search(&keyword, &options) {
        assert_eq!(report.hits.len(), report.total_occurrences);
        assert!(report.chapters_searched + report.chapters_skipped == session.len());
    }
});
