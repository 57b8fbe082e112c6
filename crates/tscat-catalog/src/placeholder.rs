//! Qt-style `%` placeholders.
//!
//! Positional markers are `%1` to `%99`, optionally localized as `%L1`.
//! The plural count marker is `%n` (or `%Ln`). Lookups only substitute the
//! count; positional arguments are applied afterwards with
//! [`substitute_args`].

use std::collections::BTreeSet;

/// A marker found in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    /// `%1` .. `%99`
    Positional(u8),
    /// `%n`
    Count,
}

/// Scan one marker starting at a `%`. Returns the marker and its byte length.
fn scan(rest: &str) -> Option<(Placeholder, usize)> {
    let bytes = rest.as_bytes();
    let mut i = 1;
    if bytes.get(i) == Some(&b'L') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'n') => Some((Placeholder::Count, i + 1)),
        Some(d @ b'1'..=b'9') => {
            let mut value = d - b'0';
            let mut len = i + 1;
            if let Some(d2 @ b'0'..=b'9') = bytes.get(len) {
                value = value * 10 + (d2 - b'0');
                len += 1;
            }
            Some((Placeholder::Positional(value), len))
        }
        _ => None,
    }
}

/// Walks `template`, calling `replace` for every marker. When it returns
/// `Some`, the marker is replaced; otherwise it is copied through.
fn rewrite<F>(template: &str, mut replace: F) -> String
where
    F: FnMut(Placeholder) -> Option<String>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match scan(rest) {
            Some((marker, len)) => {
                match replace(marker) {
                    Some(value) => out.push_str(&value),
                    None => out.push_str(&rest[..len]),
                }
                rest = &rest[len..];
            }
            None => {
                out.push('%');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// All markers present in `text`.
pub fn placeholders(text: &str) -> BTreeSet<Placeholder> {
    let mut found = BTreeSet::new();
    rewrite(text, |marker| {
        found.insert(marker);
        None
    });
    found
}

/// Positional marker numbers present in `text`.
pub fn positional(text: &str) -> BTreeSet<u8> {
    placeholders(text)
        .into_iter()
        .filter_map(|marker| match marker {
            Placeholder::Positional(n) => Some(n),
            Placeholder::Count => None,
        })
        .collect()
}

/// Whether `text` contains `%n` or `%Ln`.
pub fn has_count(text: &str) -> bool {
    placeholders(text).contains(&Placeholder::Count)
}

/// Replace every `%n` / `%Ln` with the decimal digits of `n`.
pub fn substitute_count(template: &str, n: u64) -> String {
    if !template.contains('%') {
        return template.to_string();
    }
    let digits = n.to_string();
    rewrite(template, |marker| match marker {
        Placeholder::Count => Some(digits.clone()),
        Placeholder::Positional(_) => None,
    })
}

/// Replace `%1`..`%N` with `args[0]`..`args[N-1]`.
///
/// Markers with no matching argument, and `%n`, are left untouched.
pub fn substitute_args<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    rewrite(template, |marker| match marker {
        Placeholder::Positional(k) => args
            .get(usize::from(k) - 1)
            .map(|arg| arg.as_ref().to_string()),
        Placeholder::Count => None,
    })
}
