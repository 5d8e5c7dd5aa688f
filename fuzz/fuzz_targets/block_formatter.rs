#![no_main]

use libfuzzer_sys::fuzz_target;
use tidyfrag_parser::{format_as_html_paragraphs, text_outside_links};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if text.len() > 10_000 {
            return;
        }

        let formatted = format_as_html_paragraphs(text);
        assert!(!formatted.contains("\n\n\n"));

        let _ = text_outside_links(text);
    }
});
