//! Shared fixtures for the store-backed tests
//!
//! Every test gets its own in-memory SQLite snapshot with the schema from
//! `schema.sql`. The generators insert rows directly; the assertions read them
//! back without going through [`DataStore`](crate::storage::DataStore).

use crate::config::AnonymizerConfig;
use crate::entities::{Credential, RowId};
use crate::services::{MetricCredentials, TestUserPlan};
use crate::storage::SqliteStore;

/// Initialize an in-memory snapshot for testing
pub async fn setup_test_store() -> SqliteStore {
    let mut store = SqliteStore::open("sqlite::memory:")
        .await
        .expect("Failed to create in-memory SQLite database");
    store
        .execute_script(include_str!("schema.sql"))
        .await
        .expect("Failed to create test schema");
    store
}

/// Default config with a small page so multi-page walks are exercised
pub fn test_config() -> AnonymizerConfig {
    AnonymizerConfig {
        page_size: 2,
        ..AnonymizerConfig::default()
    }
}

/// Test data generators
pub mod generators {
    use super::*;

    /// Values for one `users` row; flags default to a plain active member.
    #[derive(Debug, Clone, Default)]
    pub struct UserRow {
        pub id: RowId,
        pub organization_id: Option<RowId>,
        pub first_name: Option<&'static str>,
        pub last_name: Option<&'static str>,
        pub display_name: Option<&'static str>,
        pub email: Option<&'static str>,
        pub phone: Option<&'static str>,
        pub auth_id: Option<&'static str>,
        pub device_token: Option<&'static str>,
        pub organization_admin: bool,
        pub superadmin: bool,
        pub retired: bool,
    }

    /// A fully populated active member of `organization_id`
    pub fn member(id: RowId, organization_id: RowId) -> UserRow {
        UserRow {
            id,
            organization_id: Some(organization_id),
            first_name: Some("Grace"),
            last_name: Some("Hopper"),
            display_name: Some("Grace Hopper"),
            email: Some("grace@navy.mil"),
            phone: Some("+12025550143"),
            auth_id: Some("auth0|5f1c"),
            device_token: Some("apns-7c1e"),
            ..Default::default()
        }
    }

    pub fn admin(id: RowId, organization_id: RowId) -> UserRow {
        UserRow {
            organization_admin: true,
            ..member(id, organization_id)
        }
    }

    pub async fn insert_organization(store: &mut SqliteStore, id: RowId, name: Option<&str>) {
        sqlx::query("INSERT INTO organizations (id, name) VALUES (?, ?)")
            .bind(id)
            .bind(name)
            .execute(store.connection())
            .await
            .expect("insert organization");
    }

    pub async fn insert_user(store: &mut SqliteStore, user: &UserRow) {
        sqlx::query(
            r#"INSERT INTO users (id, organization_id, first_name, last_name, display_name,
                                  email, phone, auth_id, device_token,
                                  organization_admin, superadmin, retired)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(user.id)
        .bind(user.organization_id)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.display_name)
        .bind(user.email)
        .bind(user.phone)
        .bind(user.auth_id)
        .bind(user.device_token)
        .bind(user.organization_admin)
        .bind(user.superadmin)
        .bind(user.retired)
        .execute(store.connection())
        .await
        .expect("insert user");
    }

    pub async fn insert_address(store: &mut SqliteStore, id: RowId, street1: &str, country: &str) {
        sqlx::query(
            r#"INSERT INTO addresses (id, street1, street2, city, state, zip_code, country)
               VALUES (?, ?, NULL, 'Springfield', 'IL', '62704', ?)"#,
        )
        .bind(id)
        .bind(street1)
        .bind(country)
        .execute(store.connection())
        .await
        .expect("insert address");
    }

    pub async fn insert_receipt(store: &mut SqliteStore, id: RowId, name: Option<&str>) {
        sqlx::query("INSERT INTO receipts (id, name) VALUES (?, ?)")
            .bind(id)
            .bind(name)
            .execute(store.connection())
            .await
            .expect("insert receipt");
    }

    pub async fn insert_card(
        store: &mut SqliteStore,
        id: RowId,
        organization_id: RowId,
        token: Option<&str>,
    ) {
        sqlx::query("INSERT INTO cards (id, organization_id, token) VALUES (?, ?, ?)")
            .bind(id)
            .bind(organization_id)
            .bind(token)
            .execute(store.connection())
            .await
            .expect("insert card");
    }

    /// Insert `count` rows into an activity table (`transactions` or `budgets`)
    pub async fn insert_activity(
        store: &mut SqliteStore,
        table: &str,
        organization_id: RowId,
        count: usize,
    ) {
        for _ in 0..count {
            sqlx::query(&format!("INSERT INTO {table} (organization_id) VALUES (?)"))
                .bind(organization_id)
                .execute(store.connection())
                .await
                .expect("insert activity");
        }
    }

    /// Insert `count` cards for an organization
    pub async fn insert_cards(store: &mut SqliteStore, organization_id: RowId, count: usize) {
        for _ in 0..count {
            sqlx::query("INSERT INTO cards (organization_id, token) VALUES (?, 'tok_live')")
                .bind(organization_id)
                .execute(store.connection())
                .await
                .expect("insert card");
        }
    }

    fn credential(name: &str) -> Credential {
        Credential::new(format!("dev+{name}@example.com"), format!("pass-{name}"))
    }

    fn metric(prefix: char, members: usize) -> MetricCredentials {
        MetricCredentials {
            admin: credential(&format!("{prefix}adm")),
            members: (1..=members)
                .map(|n| credential(&format!("{prefix}usr{n}")))
                .collect(),
        }
    }

    /// Plan shaped like the binary's fixture: 3 transaction members, 2 each
    /// for budgets and cards.
    pub fn plan() -> TestUserPlan {
        TestUserPlan {
            superadmin: credential("super"),
            transactions: metric('t', 3),
            budgets: metric('b', 2),
            cards: metric('c', 2),
        }
    }
}

/// Read-back assertions against the snapshot
pub mod assertions {
    use super::*;
    use crate::entities::User;

    pub async fn fetch_user(store: &mut SqliteStore, id: RowId) -> User {
        sqlx::query_as::<_, User>(
            r#"SELECT id, first_name, last_name, display_name, email, phone, auth_id,
                      device_token
                 FROM users
                WHERE id = ?"#,
        )
        .bind(id)
        .fetch_one(store.connection())
        .await
        .expect("fetch user")
    }

    pub async fn count_rows(store: &mut SqliteStore, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(store.connection())
            .await
            .expect("count rows")
    }

    /// Assert the user row carries exactly `credential`
    pub async fn assert_bound(store: &mut SqliteStore, user_id: RowId, credential: &Credential) {
        let user = fetch_user(store, user_id).await;
        assert_eq!(
            user.email.as_deref(),
            Some(credential.email.as_str()),
            "email of user {user_id}"
        );
        assert_eq!(
            user.auth_id.as_deref(),
            Some(credential.auth_id.as_str()),
            "auth_id of user {user_id}"
        );
    }

    pub fn assert_alphanumeric(value: &str, len: usize) {
        assert_eq!(value.len(), len, "length of {value:?}");
        assert!(
            value.chars().all(|c| c.is_ascii_alphanumeric()),
            "{value:?} is not alphanumeric"
        );
    }
}
