use deadpool_postgres::PoolError;
use serde_json::Value;
use tokio_postgres::Error as PgError;
use tokio_postgres::Row;
use tracing::{instrument, warn};

use crate::CandidateProfile;
use crate::db::PgPool;

#[derive(Debug, thiserror::Error)]
pub enum ProfileFetchError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
}

/// Load a candidate's profile, or `None` when they never created one.
///
/// A malformed `work_history` document degrades to an empty history with a
/// warning instead of failing the caller; a missing profile must not block
/// an application, it just scores as "no data".
#[instrument(skip(pool))]
pub async fn fetch_profile_for_user(
    pool: &PgPool,
    user_id: i64,
) -> Result<Option<CandidateProfile>, ProfileFetchError> {
    let client = pool.get().await?;

    let row = client
        .query_opt(
            "SELECT skills,
                    work_history,
                    declared_experience_years,
                    recent_job_title,
                    current_role,
                    headline
             FROM tn.profiles
             WHERE user_id = $1",
            &[&user_id],
        )
        .await?;

    Ok(row.map(|row| map_profile_row(user_id, &row)))
}

fn map_profile_row(user_id: i64, row: &Row) -> CandidateProfile {
    let work_history = match row.get::<_, Option<Value>>("work_history") {
        Some(value) => serde_json::from_value(value).unwrap_or_else(|err| {
            warn!(user_id, error = %err, "malformed work_history document; treating as empty");
            Vec::new()
        }),
        None => Vec::new(),
    };

    CandidateProfile {
        skills: row.get::<_, Option<Vec<String>>>("skills").unwrap_or_default(),
        work_history,
        declared_experience_years: row.get("declared_experience_years"),
        recent_job_title: row.get("recent_job_title"),
        current_role: row.get("current_role"),
        headline: row.get("headline"),
    }
}
