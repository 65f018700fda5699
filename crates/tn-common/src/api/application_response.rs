use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{Application, ApplicationStatus};

/// Application row as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationResponse {
    pub id: i64,
    pub job_id: i64,
    pub applicant_id: i64,
    pub applicant_name: Option<String>,
    pub applicant_email: Option<String>,
    pub applicant_is_premium: bool,
    pub resume_url: Option<String>,
    pub cover_letter: Option<String>,
    pub answers: Option<serde_json::Value>,
    pub status: ApplicationStatus,
    pub match_score: Option<i32>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<i64>,
    pub notes: Option<String>,
}

impl From<Application> for ApplicationResponse {
    fn from(value: Application) -> Self {
        Self {
            id: value.id,
            job_id: value.job_id,
            applicant_id: value.applicant_id,
            applicant_name: value.applicant_name,
            applicant_email: value.applicant_email,
            applicant_is_premium: value.applicant_is_premium,
            resume_url: value.resume_url,
            cover_letter: value.cover_letter,
            answers: value.answers,
            status: value.status,
            match_score: value.match_score,
            submitted_at: value.submitted_at,
            reviewed_at: value.reviewed_at,
            reviewed_by: value.reviewed_by,
            notes: value.notes,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };

        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}

/// Paged listing envelope: ranked (or sorted) rows plus page bookkeeping.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationListResponse {
    pub data: Vec<ApplicationResponse>,
    pub pagination: Pagination,
}
