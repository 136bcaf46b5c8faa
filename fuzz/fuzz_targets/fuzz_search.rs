#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks where the pattern ends
    if data.len() < 2 {
        return;
    }

    let split_point = (data[0] as usize).min(data.len() - 1).max(1);
    let (Ok(pattern), Ok(text)) = (
        std::str::from_utf8(&data[1..split_point]),
        std::str::from_utf8(&data[split_point..]),
    ) else {
        return;
    };

    let offsets = chapgrep::search(text, pattern);

    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let expected: Vec<usize> = if pattern.is_empty() || pattern.len() > text.len() {
        Vec::new()
    } else {
        (0..=text.len() - pattern.len())
            .filter(|&i| text[i..i + pattern.len()] == pattern[..])
            .collect()
    };
    assert_eq!(offsets, expected);
});
