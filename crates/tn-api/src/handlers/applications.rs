use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::info;

use tn_common::ApplicationStatus;
use tn_common::api::application_request::{ApplyRequest, StatusUpdateRequest};
use tn_common::api::application_response::{
    ApplicationListResponse, ApplicationResponse, Pagination,
};
use tn_common::db::{
    ApplicationInsert, fetch_application_by_id, fetch_applications_for_job, fetch_job,
    fetch_my_applications, fetch_profile_for_user, increment_applications_count,
    insert_application, update_application_status, withdraw_application,
};
use tn_common::matching::{compute_match_score, rank_applications};
use tn_common::Application;

use crate::SharedState;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::handlers::pagination::validate_pagination;

#[derive(Debug, Deserialize, Default)]
pub struct ApplicationListQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

const fn default_page() -> i64 {
    1
}

const fn default_limit() -> i64 {
    20
}

fn parse_status_filter(raw: Option<&str>) -> Result<Option<ApplicationStatus>, ApiError> {
    raw.map(|value| {
        ApplicationStatus::from_str(value)
            .map_err(|_| ApiError::BadRequest(format!("unsupported status filter: {value}")))
    })
    .transpose()
}

/// Page/limit slicing over an already-ranked sequence.
fn page_slice(ranked: Vec<Application>, page: i64, limit: i64) -> Vec<Application> {
    let offset = ((page - 1) * limit) as usize;
    ranked.into_iter().skip(offset).take(limit as usize).collect()
}

/// Submit an application to a job.
///
/// The match score is computed exactly once here, against the profile and
/// posting as they exist right now, and stored on the application. Later
/// profile or posting edits never change it. A missing profile scores 0
/// ("insufficient data") but the application is still accepted.
pub async fn apply(
    State(state): State<SharedState>,
    Path(job_id): Path<i64>,
    auth: AuthUser,
    Json(request): Json<ApplyRequest>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let applicant_id = auth.user_id()?;

    let job = fetch_job(&state.pool, job_id)
        .await?
        .filter(|job| job.is_active)
        .ok_or_else(|| ApiError::NotFound(format!("job {job_id} not found")))?;

    let profile = fetch_profile_for_user(&state.pool, applicant_id).await?;
    let requirements = job.requirements();
    let match_score = compute_match_score(profile.as_ref(), Some(&requirements));

    let insert = ApplicationInsert {
        job_id,
        applicant_id,
        resume_url: request.resume_url,
        cover_letter: request.cover_letter,
        answers: request.answers,
        match_score,
    };

    let application_id = insert_application(&state.pool, &insert).await?;
    increment_applications_count(&state.pool, job_id).await?;

    info!(job_id, applicant_id, match_score, "application submitted");

    let application = fetch_application_by_id(&state.pool, application_id)
        .await?
        .ok_or_else(|| ApiError::Internal(format!("application {application_id} vanished")))?;

    Ok(Json(application.into()))
}

/// Employer view of a job's applicants.
///
/// Fetches the full unordered set, ranks it (premium tier, then match
/// score, then recency), and only then applies page/limit slicing.
pub async fn list_job_applications(
    State(state): State<SharedState>,
    Path(job_id): Path<i64>,
    Query(query): Query<ApplicationListQuery>,
    auth: AuthUser,
) -> Result<Json<ApplicationListResponse>, ApiError> {
    let caller_id = auth.user_id()?;
    let status = parse_status_filter(query.status.as_deref())?;
    let (page, limit) = validate_pagination(query.page, query.limit)?;

    let job = fetch_job(&state.pool, job_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("job {job_id} not found")))?;

    if job.posted_by != caller_id {
        return Err(ApiError::Forbidden("you are not the job poster".into()));
    }

    let applications = fetch_applications_for_job(&state.pool, job_id, status).await?;
    let ranked = rank_applications(applications);
    let total = ranked.len() as i64;

    let data = page_slice(ranked, page, limit)
        .into_iter()
        .map(ApplicationResponse::from)
        .collect();

    Ok(Json(ApplicationListResponse {
        data,
        pagination: Pagination::new(page, limit, total),
    }))
}

/// Applicant view of their own applications, newest first.
pub async fn my_applications(
    State(state): State<SharedState>,
    Query(query): Query<ApplicationListQuery>,
    auth: AuthUser,
) -> Result<Json<ApplicationListResponse>, ApiError> {
    let applicant_id = auth.user_id()?;
    let status = parse_status_filter(query.status.as_deref())?;
    let (page, limit) = validate_pagination(query.page, query.limit)?;

    let (applications, total) =
        fetch_my_applications(&state.pool, applicant_id, status, limit, (page - 1) * limit)
            .await?;

    Ok(Json(ApplicationListResponse {
        data: applications
            .into_iter()
            .map(ApplicationResponse::from)
            .collect(),
        pagination: Pagination::new(page, limit, total),
    }))
}

/// Application detail, visible to the applicant and the job poster only.
pub async fn get_application(
    State(state): State<SharedState>,
    Path(application_id): Path<i64>,
    auth: AuthUser,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let caller_id = auth.user_id()?;

    let application = fetch_application_by_id(&state.pool, application_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("application {application_id} not found")))?;

    if application.applicant_id != caller_id {
        let job = fetch_job(&state.pool, application.job_id).await?;
        let is_poster = job.map(|job| job.posted_by == caller_id).unwrap_or(false);
        if !is_poster {
            return Err(ApiError::Forbidden(
                "not the applicant or the job poster".into(),
            ));
        }
    }

    Ok(Json(application.into()))
}

/// Employer review: move an application through the pipeline.
pub async fn update_status(
    State(state): State<SharedState>,
    Path(application_id): Path<i64>,
    auth: AuthUser,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let caller_id = auth.user_id()?;

    let status = ApplicationStatus::from_str(&request.status)
        .map_err(|_| ApiError::BadRequest(format!("invalid status: {}", request.status)))?;

    let application = fetch_application_by_id(&state.pool, application_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("application {application_id} not found")))?;

    let job = fetch_job(&state.pool, application.job_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("job {} not found", application.job_id)))?;

    if job.posted_by != caller_id {
        return Err(ApiError::Forbidden("you are not the job poster".into()));
    }

    update_application_status(
        &state.pool,
        application_id,
        status,
        caller_id,
        request.notes.as_deref(),
    )
    .await?;

    let updated = fetch_application_by_id(&state.pool, application_id)
        .await?
        .ok_or_else(|| ApiError::Internal(format!("application {application_id} vanished")))?;

    Ok(Json(updated.into()))
}

/// Applicant-initiated withdrawal.
pub async fn withdraw(
    State(state): State<SharedState>,
    Path(application_id): Path<i64>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let applicant_id = auth.user_id()?;

    withdraw_application(&state.pool, application_id, applicant_id).await?;

    Ok(Json(
        serde_json::json!({ "success": true, "status": "withdrawn" }),
    ))
}
