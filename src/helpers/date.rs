//! Date helper functions

use chrono::{Datelike, NaiveDate};

/// Format a date using a Moment.js-style format string
///
/// Supported tokens: `YYYY`, `YY`, `MMMM`, `MMM`, `MM`, `M`, `DDDD`, `DD`,
/// `Do`, `D`, `dddd`, `ddd` and `d`. Text in `[brackets]` and anything that
/// is not a token is copied as-is.
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY-MM-DD")    // -> "2021-06-01"
/// format_date(&date, "MMMM Do, YYYY") // -> "June 1st, 2021"
/// ```
pub fn format_date(date: &NaiveDate, format: &str) -> String {
    let mut out = String::with_capacity(format.len() + 8);
    let mut rest = format;

    while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(end) = rest.find(']') {
                out.push_str(&rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }
        }

        match TOKENS.iter().find(|(token, _)| rest.starts_with(token)) {
            Some((token, field)) => {
                match field {
                    Field::Chrono(spec) => out.push_str(&date.format(spec).to_string()),
                    Field::Ordinal => out.push_str(&ordinal(date.day())),
                }
                rest = &rest[token.len()..];
            }
            None => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    out
}

enum Field {
    Chrono(&'static str),
    Ordinal,
}

/// Longest token first within each field so `MMMM` is not read as `MM` twice
const TOKENS: [(&str, Field); 13] = [
    ("YYYY", Field::Chrono("%Y")),
    ("YY", Field::Chrono("%y")),
    ("MMMM", Field::Chrono("%B")),
    ("MMM", Field::Chrono("%b")),
    ("MM", Field::Chrono("%m")),
    ("M", Field::Chrono("%-m")),
    ("DDDD", Field::Chrono("%j")),
    ("DD", Field::Chrono("%d")),
    ("Do", Field::Ordinal),
    ("D", Field::Chrono("%-d")),
    ("dddd", Field::Chrono("%A")),
    ("ddd", Field::Chrono("%a")),
    ("d", Field::Chrono("%w")),
];

/// `1` -> `1st`, `12` -> `12th`, `22` -> `22nd`
fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", day, suffix)
}

/// Format a date as an RFC 3339 timestamp at midnight UTC (for feeds)
pub fn date_xml(date: &NaiveDate) -> String {
    date.format("%Y-%m-%dT00:00:00Z").to_string()
}

/// Value for a `<time datetime="...">` attribute
pub fn date_iso(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
