//! Required-skill overlap between a job posting and a candidate profile.

#[derive(Debug, Clone, PartialEq)]
pub struct SkillMatchResult {
    pub matched_skills: Vec<String>,
    pub required_count: usize,
}

impl SkillMatchResult {
    pub fn matched_count(&self) -> usize {
        self.matched_skills.len()
    }
}

fn canonical(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Count how many required skills the candidate covers.
///
/// A required skill is matched when any candidate skill equals it after
/// lowercasing and trimming, or when either string contains the other as a
/// substring ("React" covers "React.js" and vice versa). The denominator is
/// always the full required list.
pub fn match_required_skills(required: &[String], possessed: &[String]) -> SkillMatchResult {
    let possessed: Vec<String> = possessed.iter().map(|s| canonical(s)).collect();

    let matched_skills = required
        .iter()
        .map(|s| canonical(s))
        .filter(|req| {
            possessed
                .iter()
                .any(|ps| ps == req || ps.contains(req.as_str()) || req.contains(ps.as_str()))
        })
        .collect();

    SkillMatchResult {
        matched_skills,
        required_count: required.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        let result = match_required_skills(&skills(&["React", "MongoDB"]), &skills(&["react", "mongodb"]));
        assert_eq!(result.matched_count(), 2);
        assert_eq!(result.required_count, 2);
    }

    #[test]
    fn substring_matches_in_both_directions() {
        let result = match_required_skills(&skills(&["React"]), &skills(&["react.js"]));
        assert_eq!(result.matched_count(), 1);

        let result = match_required_skills(&skills(&["React.js"]), &skills(&["react"]));
        assert_eq!(result.matched_count(), 1);
    }

    #[test]
    fn unrelated_skills_do_not_match() {
        let result = match_required_skills(
            &skills(&["React", "JavaScript", "Next.js"]),
            &skills(&["React", "Node.js", "MongoDB", "JavaScript"]),
        );
        assert_eq!(result.matched_count(), 2);
        assert_eq!(result.required_count, 3);
    }

    #[test]
    fn empty_required_list_yields_zero_denominator() {
        let result = match_required_skills(&[], &skills(&["rust"]));
        assert_eq!(result.matched_count(), 0);
        assert_eq!(result.required_count, 0);
    }

    #[test]
    fn whitespace_is_trimmed_before_comparison() {
        let result = match_required_skills(&skills(&["  TypeScript "]), &skills(&["typescript"]));
        assert_eq!(result.matched_count(), 1);
    }
}
