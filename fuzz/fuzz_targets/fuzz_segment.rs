#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let chapters = chapgrep::segment(text);
        for (i, chapter) in chapters.iter().enumerate() {
            assert_eq!(chapter.index(), i);
            assert_eq!(chapter.content(), chapter.content().trim());
        }
        assert_eq!(chapters, chapgrep::segment(text));
    }
});
