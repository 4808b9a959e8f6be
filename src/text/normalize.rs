// src/text/normalize.rs
//! Deterministic cleanup applied to raw input before anything else sees it.
//!
//! URLs and tag-like `<...>` spans are removed, whitespace runs collapse to a
//! single space and the result is trimmed. The transform is idempotent.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+|www\.\S+").expect("url regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

pub fn clean_text(input: &str) -> String {
    let no_urls = URL_RE.replace_all(input, "");
    // Removing a tag can join two halves into a new URL or tag; repeat until stable.
    let mut out = TAG_RE.replace_all(&no_urls, "").into_owned();
    loop {
        let next = TAG_RE.replace_all(&URL_RE.replace_all(&out, ""), "").into_owned();
        if next == out {
            break;
        }
        out = next;
    }
    WS_RE.replace_all(&out, " ").trim().to_string()
}
