pub mod applications;
pub mod jobs;
pub mod migrations;
pub mod pool;
pub mod profiles;

// Keep re-exports unique so downstream crates see a single symbol per helper.
pub use applications::{
    ApplicationInsert, ApplicationStorageError, fetch_application_by_id,
    fetch_applications_for_job, fetch_my_applications, insert_application,
    update_application_status, withdraw_application,
};
pub use jobs::{JobFetchError, JobRecord, fetch_job, increment_applications_count};
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPoolError, PgPool, create_pool_from_url, create_pool_from_url_checked};
pub use profiles::{ProfileFetchError, fetch_profile_for_user};
