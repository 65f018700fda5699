//! Candidate experience derivation.
//!
//! Experience is the longest single work-history entry span in whole years,
//! or the candidate-declared figure when that is larger. Entries the parser
//! cannot read contribute nothing instead of failing the computation.

use crate::date::parse_year_field;
use crate::{CandidateProfile, WorkExperience};

/// Leading-digit integer parse for free-text numeric fields ("3", "2+ years").
pub fn parse_leading_years(raw: &str) -> Option<i32> {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

/// Longest whole-year span across all work-history entries.
///
/// An entry with no end date runs to `current_year`. Entries whose start or
/// end year cannot be parsed span zero years; negative spans (end before
/// start) never beat the zero seed.
pub fn longest_tenure_years(history: &[WorkExperience], current_year: i32) -> i32 {
    history
        .iter()
        .map(|entry| entry_span_years(entry, current_year))
        .fold(0, i32::max)
}

fn entry_span_years(entry: &WorkExperience, current_year: i32) -> i32 {
    let Some(start) = entry.start_date.as_deref().and_then(parse_year_field) else {
        return 0;
    };

    let end_raw = entry
        .end_date
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty());

    let end = match end_raw {
        None => current_year,
        Some(raw) => match parse_year_field(raw) {
            Some(year) => year,
            None => return 0,
        },
    };

    end - start
}

/// Effective experience in whole years: the larger of derived tenure and
/// the candidate-declared value, when one was supplied.
pub fn effective_experience_years(profile: &CandidateProfile, current_year: i32) -> i32 {
    let derived = longest_tenure_years(&profile.work_history, current_year);

    match profile
        .declared_experience_years
        .as_deref()
        .and_then(parse_leading_years)
    {
        Some(declared) => derived.max(declared),
        None => derived,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(start: Option<&str>, end: Option<&str>) -> WorkExperience {
        WorkExperience {
            start_date: start.map(str::to_string),
            end_date: end.map(str::to_string),
        }
    }

    #[test]
    fn parse_leading_years_reads_digit_prefixes() {
        assert_eq!(parse_leading_years("3"), Some(3));
        assert_eq!(parse_leading_years(" 2+ years "), Some(2));
        assert_eq!(parse_leading_years("ten"), None);
        assert_eq!(parse_leading_years(""), None);
    }

    #[test]
    fn longest_span_wins_over_total() {
        // Two entries of 2 and 4 years: the result is 4, not 6.
        let history = vec![
            entry(Some("2015-01-01"), Some("2019-06-30")),
            entry(Some("2019/07/01"), Some("2021/07/01")),
        ];
        assert_eq!(longest_tenure_years(&history, 2026), 4);
    }

    #[test]
    fn open_ended_entries_run_to_the_current_year() {
        let history = vec![entry(Some("2020"), None)];
        assert_eq!(longest_tenure_years(&history, 2026), 6);

        let blank_end = vec![entry(Some("2020"), Some("  "))];
        assert_eq!(longest_tenure_years(&blank_end, 2026), 6);
    }

    #[test]
    fn unparseable_entries_span_zero() {
        let history = vec![
            entry(None, Some("2020")),
            entry(Some("unknown"), Some("2020")),
            entry(Some("2018"), Some("Present")),
        ];
        assert_eq!(longest_tenure_years(&history, 2026), 0);
    }

    #[test]
    fn negative_spans_never_win() {
        let history = vec![
            entry(Some("2022"), Some("2019")),
            entry(Some("2020"), Some("2021")),
        ];
        assert_eq!(longest_tenure_years(&history, 2026), 1);
    }

    #[test]
    fn declared_years_take_precedence_when_larger() {
        let profile = CandidateProfile {
            work_history: vec![entry(Some("2021-03-01"), Some("2023-03-01"))],
            declared_experience_years: Some("5".into()),
            ..CandidateProfile::default()
        };
        assert_eq!(effective_experience_years(&profile, 2026), 5);

        let modest = CandidateProfile {
            declared_experience_years: Some("1".into()),
            ..profile.clone()
        };
        assert_eq!(effective_experience_years(&modest, 2026), 2);
    }

    #[test]
    fn unparseable_declared_years_fall_back_to_derived() {
        let profile = CandidateProfile {
            work_history: vec![entry(Some("2019"), Some("2022"))],
            declared_experience_years: Some("several".into()),
            ..CandidateProfile::default()
        };
        assert_eq!(effective_experience_years(&profile, 2026), 3);
    }
}
