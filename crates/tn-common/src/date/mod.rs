use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Candidates enter dates as YYYY-MM-DD, YYYY/MM/DD, or a bare year;
    // only the leading four-digit year matters for tenure spans.
    static ref LEADING_YEAR_RE: Regex = Regex::new(r"^(\d{4})(?:[-/].*)?$").unwrap();
}

/// Extract the year from a free-text date-like string.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, and a bare `YYYY`. Anything else
/// ("Present", "May 2020", two-digit years) returns `None` so the caller
/// can degrade that entry instead of failing.
pub fn parse_year_field(raw: &str) -> Option<i32> {
    let caps = LEADING_YEAR_RE.captures(raw.trim())?;
    caps.get(1)?.as_str().parse().ok()
}
