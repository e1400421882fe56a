pub mod config;
pub mod entities;
pub mod error;
pub mod logging;
pub mod privacy;
pub mod services;
pub mod storage;

#[cfg(test)]
mod tests;

use tracing::info;

use crate::{
    config::AnonymizerConfig,
    error::{AppError, Result},
    privacy::History,
    services::{
        AnonymizationReport, ClaimedOrganizations, RecordAnonymizer, TestUserAssigner,
        TestUserPlan, TestUserReport,
    },
    storage::DataStore,
};

/// What one run changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub anonymization: AnonymizationReport,
    pub test_users: TestUserReport,
}

/// Anonymize the snapshot behind `store` and bind the test users in `plan`.
///
/// Every write is committed as it happens, so a failure part way leaves the
/// snapshot partially anonymized. Rerun against a fresh snapshot.
pub async fn anonymize_snapshot<D: DataStore>(
    store: &mut D,
    config: &AnonymizerConfig,
    plan: &TestUserPlan,
) -> Result<RunReport> {
    let mut history = History::new();
    let anonymization = RecordAnonymizer::from_config(config)
        .run(store, &mut history)
        .await?;

    let mut claimed = ClaimedOrganizations::new();
    let test_users = TestUserAssigner::new(plan.clone())
        .run(store, &mut claimed)
        .await?;

    Ok(RunReport {
        anonymization,
        test_users,
    })
}

/// Entry point of the binary: load `.env` and the environment, connect, and
/// run every step against the configured database.
pub async fn run(plan: TestUserPlan) -> color_eyre::Result<()> {
    dotenvy::dotenv().ok();
    color_eyre::install()?;

    logging::init(logging::flag_enabled(std::env::var("DEBUG").ok().as_deref()));

    let config = AnonymizerConfig::from_env().inspect_err(AppError::log)?;
    info!(
        config = %serde_json::to_string(&config)?,
        "Anonymizing Database {}", config.database.name
    );

    let mut store = storage::db::connect(&config.database)
        .await
        .inspect_err(AppError::log)?;
    let report = anonymize_snapshot(&mut store, &config, &plan)
        .await
        .inspect_err(AppError::log)?;
    store.close().await?;

    info!(
        tables = report.anonymization.tables.len(),
        credentials = report.test_users.assignments().count(),
        "Done"
    );
    Ok(())
}
