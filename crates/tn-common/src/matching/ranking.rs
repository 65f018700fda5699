//! Employer-facing ordering of job applications.

use std::cmp::Ordering;

use crate::Application;

/// Order applications for an employer listing: premium applicants first,
/// then higher match score, then most recent submission.
///
/// `Vec::sort_by` is stable, so ties at all three keys keep their input
/// order. A missing score or timestamp sorts after every present value
/// within the same tier (`None < Some` under `Option`'s ordering); a
/// malformed record sinks instead of failing the listing.
pub fn rank_applications(mut applications: Vec<Application>) -> Vec<Application> {
    applications.sort_by(compare);
    applications
}

fn compare(a: &Application, b: &Application) -> Ordering {
    b.applicant_is_premium
        .cmp(&a.applicant_is_premium)
        .then_with(|| b.match_score.cmp(&a.match_score))
        .then_with(|| b.submitted_at.cmp(&a.submitted_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn application(
        id: i64,
        premium: bool,
        score: Option<i32>,
        submitted: Option<DateTime<Utc>>,
    ) -> Application {
        Application {
            id,
            applicant_is_premium: premium,
            match_score: score,
            submitted_at: submitted,
            ..Application::default()
        }
    }

    fn ids(applications: &[Application]) -> Vec<i64> {
        applications.iter().map(|a| a.id).collect()
    }

    #[test]
    fn premium_outranks_score_and_recency() {
        let ranked = rank_applications(vec![
            application(1, false, Some(90), Some(at(3))),
            application(2, true, Some(40), Some(at(1))),
            application(3, false, Some(95), Some(at(2))),
        ]);
        assert_eq!(ids(&ranked), vec![2, 3, 1]);
    }

    #[test]
    fn no_premium_entry_follows_a_non_premium_one() {
        let ranked = rank_applications(vec![
            application(1, false, Some(10), Some(at(9))),
            application(2, true, Some(5), Some(at(1))),
            application(3, false, Some(80), Some(at(5))),
            application(4, true, Some(60), Some(at(2))),
            application(5, false, None, None),
        ]);

        let first_regular = ranked
            .iter()
            .position(|a| !a.applicant_is_premium)
            .unwrap();
        assert!(ranked[first_regular..]
            .iter()
            .all(|a| !a.applicant_is_premium));
    }

    #[test]
    fn recency_breaks_score_ties() {
        let ranked = rank_applications(vec![
            application(1, false, Some(70), Some(at(100))),
            application(2, false, Some(70), Some(at(300))),
            application(3, false, Some(70), Some(at(200))),
        ]);
        assert_eq!(ids(&ranked), vec![2, 3, 1]);
    }

    #[test]
    fn full_ties_preserve_input_order() {
        let ranked = rank_applications(vec![
            application(7, true, Some(50), Some(at(42))),
            application(8, true, Some(50), Some(at(42))),
            application(9, true, Some(50), Some(at(42))),
        ]);
        assert_eq!(ids(&ranked), vec![7, 8, 9]);
    }

    #[test]
    fn ranking_is_idempotent() {
        let input = vec![
            application(1, false, Some(30), Some(at(5))),
            application(2, true, None, Some(at(9))),
            application(3, false, Some(88), None),
            application(4, true, Some(12), Some(at(2))),
        ];

        let once = rank_applications(input);
        let twice = rank_applications(once.clone());
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn missing_keys_sink_within_their_tier() {
        let ranked = rank_applications(vec![
            application(1, false, None, Some(at(900))),
            application(2, false, Some(1), Some(at(1))),
            application(3, false, Some(1), None),
        ]);
        // A present score beats a missing one; a present timestamp beats a
        // missing one at equal score.
        assert_eq!(ids(&ranked), vec![2, 3, 1]);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(rank_applications(Vec::new()).is_empty());
    }
}
