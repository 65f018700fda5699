use deadpool_postgres::PoolError;
use thiserror::Error;
use tokio_postgres::Error as PgError;
use tracing::{info, instrument};

use crate::db::{DbPoolError, PgPool};

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("failed to run migration: {0}")]
    Postgres(#[from] PgError),
    #[error("failed to build pool: {0}")]
    PoolBuild(#[from] DbPoolError),
}

struct Migration {
    id: i32,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    id: 1,
    description: "users, profiles, jobs, and applications tables",
    sql: r#"
CREATE SCHEMA IF NOT EXISTS tn;

CREATE TABLE IF NOT EXISTS tn.users (
    id BIGSERIAL PRIMARY KEY,
    display_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    is_premium BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS tn.profiles (
    user_id BIGINT PRIMARY KEY REFERENCES tn.users(id),
    skills TEXT[] NOT NULL DEFAULT '{}',
    work_history JSONB NOT NULL DEFAULT '[]',
    declared_experience_years TEXT,
    recent_job_title TEXT,
    current_role TEXT,
    headline TEXT,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS tn.jobs (
    id BIGSERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    company TEXT NOT NULL,
    location TEXT,
    skills TEXT[] NOT NULL DEFAULT '{}',
    experience TEXT,
    posted_by BIGINT NOT NULL REFERENCES tn.users(id),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    applications_count INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_jobs_active_created
    ON tn.jobs(is_active, created_at DESC);

CREATE TABLE IF NOT EXISTS tn.applications (
    id BIGSERIAL PRIMARY KEY,
    job_id BIGINT NOT NULL REFERENCES tn.jobs(id),
    applicant_id BIGINT NOT NULL REFERENCES tn.users(id),
    resume_url TEXT,
    cover_letter TEXT,
    answers JSONB,
    status TEXT NOT NULL DEFAULT 'pending',
    match_score INTEGER,
    submitted_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    reviewed_at TIMESTAMPTZ,
    reviewed_by BIGINT REFERENCES tn.users(id),
    notes TEXT,
    CONSTRAINT uq_applications_job_applicant UNIQUE (job_id, applicant_id),
    CONSTRAINT chk_application_status CHECK (
        status IN ('pending', 'reviewing', 'shortlisted', 'interview',
                   'rejected', 'accepted', 'withdrawn')
    ),
    CONSTRAINT chk_match_score_range CHECK (
        match_score IS NULL OR (match_score >= 0 AND match_score <= 100)
    )
);

CREATE INDEX IF NOT EXISTS idx_applications_applicant_status
    ON tn.applications(applicant_id, status, submitted_at DESC);
CREATE INDEX IF NOT EXISTS idx_applications_job_status
    ON tn.applications(job_id, status, submitted_at DESC);
"#,
}];

#[instrument(skip(pool))]
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrationError> {
    let mut client = pool.get().await?;
    client
        .batch_execute(
            "CREATE SCHEMA IF NOT EXISTS tn;
             CREATE TABLE IF NOT EXISTS tn.schema_migrations (
                id INTEGER PRIMARY KEY,
                description TEXT NOT NULL,
                applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
             );",
        )
        .await?;

    for migration in MIGRATIONS {
        let already_applied: bool = client
            .query_one(
                "SELECT EXISTS (SELECT 1 FROM tn.schema_migrations WHERE id = $1)",
                &[&migration.id],
            )
            .await?
            .get(0);

        if already_applied {
            continue;
        }

        let tx = client.transaction().await?;
        tx.batch_execute(migration.sql).await?;
        tx.execute(
            "INSERT INTO tn.schema_migrations (id, description) VALUES ($1, $2)",
            &[&migration.id, &migration.description],
        )
        .await?;
        tx.commit().await?;

        info!(
            id = migration.id,
            description = migration.description,
            "applied migration"
        );
    }

    Ok(())
}
