//! Role-title similarity between a job title and the candidate's hints.

use crate::CandidateProfile;

/// Pick the candidate's role string: most-recent job title, then current
/// role label, then professional headline. First non-empty wins.
pub fn select_title_hint(profile: &CandidateProfile) -> Option<&str> {
    [
        profile.recent_job_title.as_deref(),
        profile.current_role.as_deref(),
        profile.headline.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .find(|hint| !hint.is_empty())
}

/// Case-insensitive title match: either full string contains the other, or
/// any whitespace-delimited word of one appears inside the other.
pub fn role_matches(job_title: &str, candidate_role: &str) -> bool {
    let job = job_title.to_lowercase();
    let role = candidate_role.to_lowercase();

    job.contains(&role)
        || role.contains(&job)
        || job.split_whitespace().any(|word| role.contains(word))
        || role.split_whitespace().any(|word| job.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_priority_order_is_respected() {
        let profile = CandidateProfile {
            recent_job_title: Some("Backend Engineer".into()),
            current_role: Some("Team Lead".into()),
            headline: Some("Engineering at Acme".into()),
            ..CandidateProfile::default()
        };
        assert_eq!(select_title_hint(&profile), Some("Backend Engineer"));

        let no_recent = CandidateProfile {
            recent_job_title: Some("   ".into()),
            ..profile.clone()
        };
        assert_eq!(select_title_hint(&no_recent), Some("Team Lead"));

        let headline_only = CandidateProfile {
            headline: Some("Engineering at Acme".into()),
            ..CandidateProfile::default()
        };
        assert_eq!(select_title_hint(&headline_only), Some("Engineering at Acme"));
        assert_eq!(select_title_hint(&CandidateProfile::default()), None);
    }

    #[test]
    fn exact_and_containment_matches() {
        assert!(role_matches("Frontend Developer", "Frontend Developer"));
        assert!(role_matches("Frontend Developer", "frontend developer"));
        assert!(role_matches("Senior Frontend Developer", "Frontend Developer"));
        assert!(role_matches("Frontend Developer", "Senior Frontend Developer"));
    }

    #[test]
    fn single_shared_word_is_enough() {
        assert!(role_matches("Backend Engineer", "Software Engineer"));
        assert!(role_matches("Data Scientist", "scientist"));
    }

    #[test]
    fn disjoint_titles_do_not_match() {
        assert!(!role_matches("Accountant", "Plumber"));
        assert!(!role_matches("Backend Developer", "Sales Manager"));
    }
}
