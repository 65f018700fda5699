//! Match-score computation between a candidate profile and a job posting.
//!
//! The score is computed once at application time and stored on the
//! application record; it is never recomputed on read.

use chrono::{Datelike, Utc};

use super::experience::{effective_experience_years, parse_leading_years};
use super::role::{role_matches, select_title_hint};
use super::skills::match_required_skills;
use super::weights::{
    EXPERIENCE_POINTS, NEUTRAL_SCORE, NO_DATA_SCORE, ROLE_POINTS, SCORE_CEILING, SCORE_FLOOR,
};
use crate::{CandidateProfile, JobRequirements};

/// One criterion's contribution to the aggregate: points earned out of the
/// points it put at stake.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Criterion {
    earned: u32,
    possible: u32,
}

/// Compute the compatibility score between a candidate and a job posting.
///
/// Returns an integer in `[SCORE_FLOOR, SCORE_CEILING]`, or `NO_DATA_SCORE`
/// when either side is absent entirely. Missing or malformed optional
/// fields degrade to a zero contribution; the function never fails.
pub fn compute_match_score(
    profile: Option<&CandidateProfile>,
    job: Option<&JobRequirements>,
) -> i32 {
    let (Some(profile), Some(job)) = (profile, job) else {
        return NO_DATA_SCORE;
    };

    compute_with_year(profile, job, Utc::now().year())
}

fn compute_with_year(profile: &CandidateProfile, job: &JobRequirements, current_year: i32) -> i32 {
    let criteria = [
        skills_criterion(profile, job),
        experience_criterion(profile, job, current_year),
        role_criterion(profile, job),
    ];

    let earned: u32 = criteria.iter().map(|c| c.earned).sum();
    let possible: u32 = criteria.iter().map(|c| c.possible).sum();

    // Unreachable while experience and role are unconditional; kept as a
    // guard against a division by zero if the criteria set changes.
    if possible == 0 {
        return NEUTRAL_SCORE;
    }

    let raw = ((f64::from(earned) / f64::from(possible)) * 100.0).round() as i32;
    raw.clamp(SCORE_FLOOR, SCORE_CEILING)
}

/// One point per matched required skill out of one per required skill.
/// A job with no required skills contributes nothing to either side.
fn skills_criterion(profile: &CandidateProfile, job: &JobRequirements) -> Criterion {
    if job.skills.is_empty() {
        return Criterion::default();
    }

    let result = match_required_skills(&job.skills, &profile.skills);
    Criterion {
        earned: result.matched_count() as u32,
        possible: result.required_count as u32,
    }
}

fn experience_criterion(
    profile: &CandidateProfile,
    job: &JobRequirements,
    current_year: i32,
) -> Criterion {
    let minimum = job
        .experience
        .as_deref()
        .and_then(parse_leading_years)
        .unwrap_or(0);
    let effective = effective_experience_years(profile, current_year);

    Criterion {
        earned: if effective >= minimum {
            EXPERIENCE_POINTS
        } else {
            0
        },
        possible: EXPERIENCE_POINTS,
    }
}

/// No usable title hint means no match, but the criterion still weighs in.
fn role_criterion(profile: &CandidateProfile, job: &JobRequirements) -> Criterion {
    let earned = match select_title_hint(profile) {
        Some(hint) if role_matches(&job.title, hint) => ROLE_POINTS,
        _ => 0,
    };

    Criterion {
        earned,
        possible: ROLE_POINTS,
    }
}
