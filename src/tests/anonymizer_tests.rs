//! Tests for the RecordAnonymizer against an in-memory snapshot

use std::collections::HashSet;

use crate::config::UniquenessPolicy;
use crate::error::{AppError, Result};
use crate::privacy::History;
use crate::services::RecordAnonymizer;
use crate::tests::framework::{assertions, generators, setup_test_store, test_config};

#[tokio::test]
async fn test_null_columns_stay_null() -> Result<()> {
    // Setup
    let mut store = setup_test_store().await;
    generators::insert_organization(&mut store, 1, Some("Initech")).await;
    generators::insert_user(&mut store, &generators::member(10, 1)).await;
    generators::insert_user(
        &mut store,
        &generators::UserRow {
            id: 11,
            organization_id: Some(1),
            first_name: Some("Milton"),
            email: Some("milton@initech.com"),
            ..Default::default()
        },
    )
    .await;

    // Execute
    let mut history = History::new();
    RecordAnonymizer::from_config(&test_config())
        .run(&mut store, &mut history)
        .await?;

    // Verify
    let sparse = assertions::fetch_user(&mut store, 11).await;
    assert_ne!(sparse.first_name.as_deref(), Some("Milton"));
    assert!(sparse.first_name.is_some());
    assert!(sparse.last_name.is_none());
    assert!(sparse.display_name.is_none());
    assert!(sparse.phone.is_none());
    assert!(sparse.auth_id.is_none());
    assert!(sparse.device_token.is_none());
    let email = sparse.email.expect("email stays populated");
    assert!(email.ends_with("@example.com"), "{email}");

    let full = assertions::fetch_user(&mut store, 10).await;
    assert_ne!(full.display_name.as_deref(), Some("Grace Hopper"));
    assert!(full.phone.unwrap().starts_with("+1801555"));
    assert!(full.auth_id.unwrap().starts_with("auth0|fake"));
    assertions::assert_alphanumeric(&full.device_token.unwrap(), 128);

    Ok(())
}

#[tokio::test]
async fn test_name_columns_share_one_name() -> Result<()> {
    let mut store = setup_test_store().await;
    generators::insert_organization(&mut store, 1, Some("Initech")).await;
    generators::insert_user(&mut store, &generators::member(10, 1)).await;

    let mut history = History::new();
    RecordAnonymizer::from_config(&test_config())
        .run(&mut store, &mut history)
        .await?;

    let user = assertions::fetch_user(&mut store, 10).await;
    let display = user.display_name.unwrap();
    assert!(display.contains(&user.first_name.unwrap()), "{display}");
    assert!(display.contains(&user.last_name.unwrap()), "{display}");

    Ok(())
}

#[tokio::test]
async fn test_addresses_keep_country() -> Result<()> {
    let mut store = setup_test_store().await;
    generators::insert_address(&mut store, 1, "742 Evergreen Terrace", "US").await;

    let mut history = History::new();
    let report = RecordAnonymizer::from_config(&test_config())
        .run(&mut store, &mut history)
        .await?;

    let (street1, street2, country): (Option<String>, Option<String>, Option<String>) =
        sqlx::query_as("SELECT street1, street2, country FROM addresses WHERE id = 1")
            .fetch_one(store.connection())
            .await?;
    assert_ne!(street1.as_deref(), Some("742 Evergreen Terrace"));
    assert!(street1.is_some());
    assert!(street2.is_none());
    assert_eq!(country.as_deref(), Some("US"));
    assert_eq!(report.table("addresses").unwrap().rows_updated, 1);

    Ok(())
}

#[tokio::test]
async fn test_country_is_replaced_when_enabled() -> Result<()> {
    let mut store = setup_test_store().await;
    generators::insert_address(&mut store, 1, "742 Evergreen Terrace", "Narnia").await;

    let mut config = test_config();
    config.anonymize_country = true;
    let mut history = History::new();
    RecordAnonymizer::from_config(&config)
        .run(&mut store, &mut history)
        .await?;

    let country: Option<String> =
        sqlx::query_scalar("SELECT country FROM addresses WHERE id = 1")
            .fetch_one(store.connection())
            .await?;
    assert_eq!(country.as_deref(), Some("US"));

    Ok(())
}

#[tokio::test]
async fn test_receipt_names() -> Result<()> {
    let mut store = setup_test_store().await;
    generators::insert_receipt(&mut store, 1, None).await;
    generators::insert_receipt(&mut store, 2, Some("")).await;
    generators::insert_receipt(&mut store, 3, Some("photo.png")).await;

    let mut history = History::new();
    let report = RecordAnonymizer::from_config(&test_config())
        .run(&mut store, &mut history)
        .await?;

    let names: Vec<Option<String>> = sqlx::query_scalar("SELECT name FROM receipts ORDER BY id")
        .fetch_all(store.connection())
        .await?;
    assert_eq!(names[0], None);
    assert_eq!(names[1].as_deref(), Some(""));

    let renamed = names[2].as_deref().unwrap();
    let (stem, extension) = renamed.split_once('.').unwrap();
    assertions::assert_alphanumeric(stem, 16);
    assert_eq!(extension, "jpg");

    let receipts = report.table("receipts").unwrap();
    assert_eq!(receipts.rows_seen, 3);
    assert_eq!(receipts.rows_updated, 1);

    Ok(())
}

#[tokio::test]
async fn test_card_tokens() -> Result<()> {
    let mut store = setup_test_store().await;
    generators::insert_organization(&mut store, 1, Some("Initech")).await;
    generators::insert_card(&mut store, 1, 1, Some("tok_live_4242")).await;
    generators::insert_card(&mut store, 2, 1, None).await;

    let mut history = History::new();
    RecordAnonymizer::from_config(&test_config())
        .run(&mut store, &mut history)
        .await?;

    let tokens: Vec<Option<String>> = sqlx::query_scalar("SELECT token FROM cards ORDER BY id")
        .fetch_all(store.connection())
        .await?;
    let token = tokens[0].as_deref().unwrap();
    assert!(token.starts_with("001.P."), "{token}");
    assert_eq!(token.len(), "001.P.".len() + 36);
    assert_eq!(tokens[1], None);

    Ok(())
}

#[tokio::test]
async fn test_organization_names_are_unique_across_pages() -> Result<()> {
    let mut store = setup_test_store().await;
    for id in 1..=25 {
        generators::insert_organization(&mut store, id, (id % 3 != 0).then_some("Acme")).await;
    }

    let mut history = History::new();
    let report = RecordAnonymizer::from_config(&test_config())
        .run(&mut store, &mut history)
        .await?;

    let names: Vec<(i64, Option<String>)> =
        sqlx::query_as("SELECT id, name FROM organizations ORDER BY id")
            .fetch_all(store.connection())
            .await?;
    for (id, name) in &names {
        assert_eq!(name.is_none(), id % 3 == 0, "organization {id}");
    }
    let distinct: HashSet<&String> = names.iter().filter_map(|(_, n)| n.as_ref()).collect();
    assert_eq!(distinct.len(), 17);
    assert!(!distinct.contains(&"Acme".to_string()));

    let organizations = report.table("organizations").unwrap();
    assert_eq!(organizations.rows_seen, 25);
    assert_eq!(organizations.rows_updated, 17);

    Ok(())
}

#[tokio::test]
async fn test_emails_are_unique() -> Result<()> {
    let mut store = setup_test_store().await;
    generators::insert_organization(&mut store, 1, Some("Initech")).await;
    for id in 1..=40 {
        generators::insert_user(&mut store, &generators::member(id, 1)).await;
    }

    let mut history = History::new();
    RecordAnonymizer::from_config(&test_config())
        .run(&mut store, &mut history)
        .await?;

    let emails: Vec<String> = sqlx::query_scalar("SELECT email FROM users")
        .fetch_all(store.connection())
        .await?;
    let distinct: HashSet<&String> = emails.iter().collect();
    assert_eq!(distinct.len(), 40);
    assert!(emails.iter().all(|e| e.ends_with("@example.com")));

    Ok(())
}

#[tokio::test]
async fn test_same_seed_same_snapshot() -> Result<()> {
    let mut snapshots = Vec::new();
    for _ in 0..2 {
        let mut store = setup_test_store().await;
        generators::insert_organization(&mut store, 1, Some("Initech")).await;
        generators::insert_user(&mut store, &generators::member(10, 1)).await;
        generators::insert_user(&mut store, &generators::member(11, 1)).await;

        let mut history = History::new();
        RecordAnonymizer::from_config(&test_config())
            .run(&mut store, &mut history)
            .await?;

        snapshots.push((
            assertions::fetch_user(&mut store, 10).await,
            assertions::fetch_user(&mut store, 11).await,
        ));
    }

    assert_eq!(snapshots[0], snapshots[1]);

    Ok(())
}

#[tokio::test]
async fn test_ephemeral_tables_are_truncated() -> Result<()> {
    let mut store = setup_test_store().await;
    store
        .execute_script(
            r#"INSERT INTO sessions (user_id, token) VALUES (1, 'abc'), (2, 'def');
               INSERT INTO audit_events (payload) VALUES ('{"ip": "10.0.0.1"}');
               INSERT INTO notifications (body) VALUES ('Welcome back, Grace');"#,
        )
        .await?;

    let mut history = History::new();
    let report = RecordAnonymizer::from_config(&test_config())
        .run(&mut store, &mut history)
        .await?;

    for table in ["sessions", "audit_events", "notifications"] {
        assert_eq!(assertions::count_rows(&mut store, table).await, 0, "{table}");
    }
    assert_eq!(report.truncated, ["sessions", "audit_events", "notifications"]);

    Ok(())
}

#[tokio::test]
async fn test_exhausted_names_abort_the_run() -> Result<()> {
    // Setup: far more organizations than one attempt per name can keep apart
    let mut store = setup_test_store().await;
    store
        .execute_script(
            r#"WITH RECURSIVE n(i) AS (SELECT 1 UNION ALL SELECT i + 1 FROM n WHERE i < 2000)
               INSERT INTO organizations (id, name) SELECT i, 'Acme' FROM n;"#,
        )
        .await?;
    generators::insert_user(&mut store, &generators::member(1, 1)).await;
    store
        .execute_script("INSERT INTO sessions (user_id, token) VALUES (1, 'abc');")
        .await?;

    let mut config = test_config();
    config.page_size = 500;
    config.uniqueness = UniquenessPolicy {
        regenerate_attempts: 1,
        suffix_attempts: 0,
    };

    // Execute
    let mut history = History::new();
    let result = RecordAnonymizer::from_config(&config)
        .run(&mut store, &mut history)
        .await;

    // Verify
    match result {
        Err(AppError::UniquenessExhausted { attempts, .. }) => assert_eq!(attempts, 1),
        other => panic!("expected UniquenessExhausted, got {other:?}"),
    }
    let user = assertions::fetch_user(&mut store, 1).await;
    assert_eq!(user.email.as_deref(), Some("grace@navy.mil"));
    assert_eq!(user.display_name.as_deref(), Some("Grace Hopper"));
    assert_eq!(assertions::count_rows(&mut store, "sessions").await, 1);

    Ok(())
}
