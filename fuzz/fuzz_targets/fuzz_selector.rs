#![no_main]

use guidepost_harness::{MemoryDocument, SelectorList};
use guidepost_runtime::Document;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(selector) = std::str::from_utf8(data) else {
        return;
    };
    let _ = SelectorList::parse(selector);

    let doc = MemoryDocument::new();
    doc.insert("div", &[("data-tour", "a"), ("class", "x y"), ("id", "main")]);
    doc.insert("button", &[("data-tour-active", "true")]);
    let all = doc.query_selector_all(selector);
    assert!(all.len() <= 2);
    assert_eq!(doc.query_selector(selector), all.first().copied());
});
