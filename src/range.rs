//! Page range resolution.
//!
//! Turns a free-form page specification such as `"1-3,5,2"` into the 0-based
//! page indices it selects for a document with a known page count.
//!
//! Resolution is lenient. Out-of-range numbers are clamped, malformed tokens
//! are dropped, and repeated pages are kept in the order they were written:
//!
//! - `"1"` - single page
//! - `"1-5"` - inclusive range
//! - `"1,3,5"` - several single pages
//! - `"4-6,1"` - ranges and pages in any order
//! - `"2,2"` - the same page twice
//!
//! # Examples
//!
//! ```
//! use pdfsplice::range::resolve;
//!
//! assert_eq!(resolve("1-3,5", 10), vec![0, 1, 2, 4]);
//! assert_eq!(resolve("0-5", 3), vec![0, 1, 2]);
//! assert!(resolve("abc", 5).is_empty());
//! ```

use std::num::IntErrorKind;

/// Build the default specification covering every page of a document.
///
/// A document with `page_count` pages gets `"1-page_count"`.
pub fn full_range(page_count: usize) -> String {
    format!("1-{page_count}")
}

/// Resolve a page specification against a document with `max_page` pages.
///
/// Returns 0-based page indices in the order the tokens appear. The result
/// may contain duplicates and need not be sorted. An empty result means the
/// specification selects nothing; that is never reported as an error here.
///
/// Clamping rules:
/// - a range start below 1 is raised to 1
/// - a range end above `max_page` is lowered to `max_page`
/// - a single page is clamped into `1..=max_page`
/// - a range whose clamped end is below its clamped start selects nothing
pub fn resolve(spec: &str, max_page: usize) -> Vec<usize> {
    let max = i64::try_from(max_page).unwrap_or(i64::MAX);

    spec.split(',')
        .flat_map(|token| expand_token(token, max))
        .filter(|&index| index >= 0 && index < max)
        .filter_map(|index| usize::try_from(index).ok())
        .collect()
}

/// Expand one comma-separated token into candidate 0-based indices.
fn expand_token(token: &str, max: i64) -> Vec<i64> {
    let token = token.trim();

    if token.contains('-') {
        let mut fields = token.split('-');
        let start = fields.next().and_then(parse_bound);
        let end = fields.next().and_then(parse_bound);

        let (Some(start), Some(end)) = (start, end) else {
            return Vec::new();
        };

        let start = start.max(1);
        let end = end.min(max);
        if end < start {
            return Vec::new();
        }

        (start - 1..end).collect()
    } else {
        if token.is_empty() {
            return Vec::new();
        }

        match parse_number(token) {
            Some(page) => vec![page.min(max).max(1) - 1],
            None => Vec::new(),
        }
    }
}

/// Parse one side of a hyphenated range. An empty side reads as 0.
fn parse_bound(field: &str) -> Option<i64> {
    let field = field.trim();
    if field.is_empty() {
        return Some(0);
    }
    parse_number(field)
}

/// Parse a page number, saturating values that do not fit in an `i64`.
fn parse_number(field: &str) -> Option<i64> {
    match field.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}
