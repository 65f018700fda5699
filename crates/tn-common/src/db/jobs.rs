use deadpool_postgres::PoolError;
use tokio_postgres::Error as PgError;
use tokio_postgres::Row;
use tracing::instrument;

use crate::JobRequirements;
use crate::db::PgPool;

#[derive(Debug, thiserror::Error)]
pub enum JobFetchError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
}

/// A stored job posting.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub experience: Option<String>,
    pub posted_by: i64,
    pub is_active: bool,
    pub applications_count: i32,
}

impl JobRecord {
    /// Scorer-facing view of this posting.
    pub fn requirements(&self) -> JobRequirements {
        JobRequirements {
            title: self.title.clone(),
            skills: self.skills.clone(),
            experience: self.experience.clone(),
        }
    }
}

#[instrument(skip(pool))]
pub async fn fetch_job(pool: &PgPool, job_id: i64) -> Result<Option<JobRecord>, JobFetchError> {
    let client = pool.get().await?;

    let row = client
        .query_opt(
            "SELECT id, title, company, location, skills, experience,
                    posted_by, is_active, applications_count
             FROM tn.jobs
             WHERE id = $1",
            &[&job_id],
        )
        .await?;

    Ok(row.map(|row| map_job_row(&row)))
}

fn map_job_row(row: &Row) -> JobRecord {
    JobRecord {
        id: row.get("id"),
        title: row.get("title"),
        company: row.get("company"),
        location: row.get("location"),
        skills: row.get::<_, Option<Vec<String>>>("skills").unwrap_or_default(),
        experience: row.get("experience"),
        posted_by: row.get("posted_by"),
        is_active: row.get("is_active"),
        applications_count: row.get("applications_count"),
    }
}

/// Bump the denormalized applications counter after a successful submission.
#[instrument(skip(pool))]
pub async fn increment_applications_count(
    pool: &PgPool,
    job_id: i64,
) -> Result<u64, JobFetchError> {
    let client = pool.get().await?;

    let rows = client
        .execute(
            "UPDATE tn.jobs SET applications_count = applications_count + 1 WHERE id = $1",
            &[&job_id],
        )
        .await?;

    Ok(rows)
}
