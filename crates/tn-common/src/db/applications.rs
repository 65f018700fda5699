use std::str::FromStr;

use deadpool_postgres::PoolError;
use serde_json::Value;
use tokio_postgres::Error as PgError;
use tokio_postgres::Row;
use tokio_postgres::error::SqlState;
use tokio_postgres::types::{Json, ToSql};
use tracing::instrument;

use crate::db::PgPool;
use crate::{Application, ApplicationStatus};

#[derive(Debug, thiserror::Error)]
pub enum ApplicationStorageError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
    #[error("failed to map application row: {0}")]
    Mapping(String),
    #[error("already applied to this job")]
    AlreadyApplied,
    #[error("application already withdrawn")]
    AlreadyWithdrawn,
    #[error("application not found: {0}")]
    NotFound(i64),
}

/// New application row. The match score is computed once by the caller at
/// submission time and stored as-is; it is never recomputed afterwards.
#[derive(Debug, Clone, Default)]
pub struct ApplicationInsert {
    pub job_id: i64,
    pub applicant_id: i64,
    pub resume_url: Option<String>,
    pub cover_letter: Option<String>,
    pub answers: Option<Value>,
    pub match_score: i32,
}

const APPLICATION_COLUMNS: &str = "a.id,
       a.job_id,
       a.applicant_id,
       u.display_name AS applicant_name,
       u.email AS applicant_email,
       u.is_premium AS applicant_is_premium,
       a.resume_url,
       a.cover_letter,
       a.answers,
       a.status,
       a.match_score,
       a.submitted_at,
       a.reviewed_at,
       a.reviewed_by,
       a.notes";

fn normalize_json(value: &Option<Value>) -> Option<Json<&Value>> {
    value.as_ref().map(Json)
}

fn map_application_row(row: &Row) -> Result<Application, ApplicationStorageError> {
    let status_raw: String = row.get("status");
    let status = ApplicationStatus::from_str(&status_raw)
        .map_err(|_| ApplicationStorageError::Mapping(format!("unknown status: {status_raw}")))?;

    Ok(Application {
        id: row.get("id"),
        job_id: row.get("job_id"),
        applicant_id: row.get("applicant_id"),
        applicant_name: row.get("applicant_name"),
        applicant_email: row.get("applicant_email"),
        applicant_is_premium: row
            .get::<_, Option<bool>>("applicant_is_premium")
            .unwrap_or(false),
        resume_url: row.get("resume_url"),
        cover_letter: row.get("cover_letter"),
        answers: row.get("answers"),
        status,
        match_score: row.get("match_score"),
        submitted_at: row.get("submitted_at"),
        reviewed_at: row.get("reviewed_at"),
        reviewed_by: row.get("reviewed_by"),
        notes: row.get("notes"),
    })
}

/// Insert a new application and return its id.
///
/// The `(job_id, applicant_id)` unique constraint turns a duplicate
/// submission into `AlreadyApplied`.
#[instrument(skip(pool, insert))]
pub async fn insert_application(
    pool: &PgPool,
    insert: &ApplicationInsert,
) -> Result<i64, ApplicationStorageError> {
    let client = pool.get().await?;

    let result = client
        .query_one(
            "INSERT INTO tn.applications (
                job_id,
                applicant_id,
                resume_url,
                cover_letter,
                answers,
                status,
                match_score
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id",
            &[
                &insert.job_id,
                &insert.applicant_id,
                &insert.resume_url,
                &insert.cover_letter,
                &normalize_json(&insert.answers),
                &ApplicationStatus::Pending.to_string(),
                &insert.match_score,
            ],
        )
        .await;

    match result {
        Ok(row) => Ok(row.get(0)),
        Err(err) if err.code() == Some(&SqlState::UNIQUE_VIOLATION) => {
            Err(ApplicationStorageError::AlreadyApplied)
        }
        Err(err) => Err(err.into()),
    }
}

/// Fetch the full unordered application set for a job, applicant fields
/// joined in. Ordered by id for a reproducible ranking input; the caller
/// ranks in memory and paginates afterwards.
#[instrument(skip(pool))]
pub async fn fetch_applications_for_job(
    pool: &PgPool,
    job_id: i64,
    status: Option<ApplicationStatus>,
) -> Result<Vec<Application>, ApplicationStorageError> {
    let client = pool.get().await?;

    let mut conditions = vec!["a.job_id = $1".to_string()];
    let mut params: Vec<&(dyn ToSql + Sync)> = vec![&job_id];

    let status_text = status.map(|s| s.to_string());
    if let Some(status_text) = status_text.as_ref() {
        conditions.push(format!("a.status = ${}", params.len() + 1));
        params.push(status_text);
    }

    let query = format!(
        "SELECT {APPLICATION_COLUMNS}
         FROM tn.applications a
         JOIN tn.users u ON u.id = a.applicant_id
         WHERE {}
         ORDER BY a.id",
        conditions.join(" AND ")
    );

    let rows = client.query(&query, &params).await?;
    rows.iter().map(map_application_row).collect()
}

/// Applicant-facing listing: newest first, paged in SQL. Returns the page
/// plus the total row count for the filter.
#[instrument(skip(pool))]
pub async fn fetch_my_applications(
    pool: &PgPool,
    applicant_id: i64,
    status: Option<ApplicationStatus>,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Application>, i64), ApplicationStorageError> {
    let client = pool.get().await?;

    let mut conditions = vec!["a.applicant_id = $1".to_string()];
    let mut params: Vec<&(dyn ToSql + Sync)> = vec![&applicant_id];

    let status_text = status.map(|s| s.to_string());
    if let Some(status_text) = status_text.as_ref() {
        conditions.push(format!("a.status = ${}", params.len() + 1));
        params.push(status_text);
    }
    let where_clause = conditions.join(" AND ");

    let count_query = format!(
        "SELECT COUNT(*)
         FROM tn.applications a
         WHERE {where_clause}"
    );
    let total: i64 = client.query_one(&count_query, &params).await?.get(0);

    let data_query = format!(
        "SELECT {APPLICATION_COLUMNS}
         FROM tn.applications a
         JOIN tn.users u ON u.id = a.applicant_id
         WHERE {where_clause}
         ORDER BY a.submitted_at DESC
         LIMIT ${} OFFSET ${}",
        params.len() + 1,
        params.len() + 2
    );
    params.push(&limit);
    params.push(&offset);

    let rows = client.query(&data_query, &params).await?;
    let applications = rows
        .iter()
        .map(map_application_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok((applications, total))
}

#[instrument(skip(pool))]
pub async fn fetch_application_by_id(
    pool: &PgPool,
    application_id: i64,
) -> Result<Option<Application>, ApplicationStorageError> {
    let client = pool.get().await?;

    let query = format!(
        "SELECT {APPLICATION_COLUMNS}
         FROM tn.applications a
         JOIN tn.users u ON u.id = a.applicant_id
         WHERE a.id = $1"
    );

    let row = client.query_opt(&query, &[&application_id]).await?;
    row.as_ref().map(map_application_row).transpose()
}

/// Employer review: set the status and record who reviewed when.
#[instrument(skip(pool))]
pub async fn update_application_status(
    pool: &PgPool,
    application_id: i64,
    status: ApplicationStatus,
    reviewer_id: i64,
    notes: Option<&str>,
) -> Result<(), ApplicationStorageError> {
    let client = pool.get().await?;

    let rows = client
        .execute(
            "UPDATE tn.applications
             SET status = $2,
                 reviewed_at = NOW(),
                 reviewed_by = $3,
                 notes = COALESCE($4, notes)
             WHERE id = $1",
            &[&application_id, &status.to_string(), &reviewer_id, &notes],
        )
        .await?;

    if rows == 0 {
        return Err(ApplicationStorageError::NotFound(application_id));
    }

    Ok(())
}

/// Applicant-initiated withdrawal. Scoped to the applicant so a foreign id
/// reads as "not found" rather than leaking someone else's application.
#[instrument(skip(pool))]
pub async fn withdraw_application(
    pool: &PgPool,
    application_id: i64,
    applicant_id: i64,
) -> Result<(), ApplicationStorageError> {
    let client = pool.get().await?;

    let row = client
        .query_opt(
            "SELECT status FROM tn.applications WHERE id = $1 AND applicant_id = $2",
            &[&application_id, &applicant_id],
        )
        .await?;

    let status: String = row
        .ok_or(ApplicationStorageError::NotFound(application_id))?
        .get(0);

    if status == ApplicationStatus::Withdrawn.to_string() {
        return Err(ApplicationStorageError::AlreadyWithdrawn);
    }

    client
        .execute(
            "UPDATE tn.applications
             SET status = $3
             WHERE id = $1 AND applicant_id = $2",
            &[
                &application_id,
                &applicant_id,
                &ApplicationStatus::Withdrawn.to_string(),
            ],
        )
        .await?;

    Ok(())
}
