//! Entity and charset normalisation: the last two transformations.
//!
//! By the time text reaches this stage every tag is gone, but character
//! references (`&amp;`, `&nbsp;`, `&#8212;`) are still escaped. They are
//! decoded by handing the text to an HTML5 parser (html5ever, via `scraper`)
//! and reading back its text nodes. A hand-rolled table would cover the
//! handful of entities seen in modern filings and miss the long tail of
//! legacy ones found in 1990s submissions.
//!
//! Non-ASCII characters are then replaced by spaces: downstream word lists
//! are ASCII, and curly quotes or decoded `&nbsp;` would otherwise glue
//! themselves to neighbouring words.

use scraper::Html;

/// Decode HTML/XML character references.
///
/// Text nodes are joined with a single space, so the parser can never merge
/// two fragments into one word. Input the parser would not alter (no
/// references, no stray `<`, no CR or NUL to normalise) is returned as is.
pub fn decode_entities(input: &str) -> String {
    if !input.contains(['&', '<', '\r', '\0']) {
        return input.to_string();
    }
    let fragment = Html::parse_fragment(input);
    fragment.root_element().text().collect::<Vec<_>>().join(" ")
}

/// Replace every character at or above U+0080 with a space.
pub fn replace_non_ascii(input: &str) -> String {
    input
        .chars()
        .map(|c| if c.is_ascii() { c } else { ' ' })
        .collect()
}
