#![no_main]

use libfuzzer_sys::fuzz_target;
use tidyfrag_security::{escape_tags, fix_editor_output, TagSanitiser};

fuzz_target!(|data: &[u8]| {
    let Ok(html) = std::str::from_utf8(data) else {
        return;
    };
    if html.len() > 10_000 {
        return;
    }

    let sanitiser = match TagSanitiser::allowing(["b", "i", "a"]) {
        Ok(sanitiser) => sanitiser,
        Err(_) => return,
    };

    // Stripping twice must give the same result as stripping once
    let once = sanitiser.strip_tags(html);
    assert_eq!(sanitiser.strip_tags(&once), once);

    let escaped = escape_tags(html, None).expect("no allow-list to validate");
    assert!(escaped.len() >= html.len());

    let fixed = fix_editor_output(html);
    assert!(!fixed.to_ascii_lowercase().contains("javascript:"));
});
