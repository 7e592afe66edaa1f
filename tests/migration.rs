use std::path::PathBuf;

use pretty_assertions::assert_eq;
use serial_test::serial;

use fleetops_backend::error::migration::MigrationError;
use fleetops_backend::infra::migration::{self, Activity, MAIN_ACTIVITY};

fn database_url() -> String {
    dotenv::dotenv().unwrap();
    let host = std::env::var("DATABASE_HOST").unwrap();
    let name = std::env::var("DATABASE_NAME").unwrap();
    let user = std::env::var("DATABASE_USER").unwrap();
    let password = std::env::var("DATABASE_PASSWORD").unwrap();
    let port = std::env::var("DATABASE_PORT").unwrap();
    format!("postgres://{user}:{password}@{host}:{port}/{name}")
}

fn scratch_changelog(master: &str, files: &[(&str, &str)]) -> PathBuf {
    let root = std::env::temp_dir().join(format!("fleetops-migtest-{}", uuid::Uuid::new_v4()));
    let changelog_dir = root.join("db/changelog");
    std::fs::create_dir_all(&changelog_dir).unwrap();
    std::fs::write(root.join("db/changelog/db.changelog-master.xml"), master).unwrap();
    for (file, content) in files {
        std::fs::write(root.join(file), content).unwrap();
    }
    root
}

fn activity(search_path: PathBuf) -> Activity {
    Activity {
        name: MAIN_ACTIVITY,
        changelog: PathBuf::from("db/changelog/db.changelog-master.xml"),
        search_path,
        database_url: database_url(),
        reference_url: None,
    }
}

async fn reset_database() {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url())
        .await
        .unwrap();
    sqlx::query("DROP SCHEMA IF EXISTS migtest CASCADE")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("DROP TABLE IF EXISTS schema_changelog")
        .execute(&pool)
        .await
        .unwrap();
}

const MASTER: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<databaseChangeLog>\n",
    "    <include file=\"db/changelog/001-migtest.sql\"/>\n",
    "</databaseChangeLog>\n",
);

const CHANGELOG: &str = concat!(
    "--liquibase formatted sql\n",
    "\n",
    "--changeset fleetops:migtest-schema\n",
    "CREATE SCHEMA migtest;\n",
    "\n",
    "--changeset fleetops:migtest-table\n",
    "CREATE TABLE migtest.entry (id INT PRIMARY KEY);\n",
);

#[tokio::test]
#[ignore = "requires a database"]
#[serial]
async fn changesets_apply_once_in_order() {
    reset_database().await;
    let root = scratch_changelog(MASTER, &[("db/changelog/001-migtest.sql", CHANGELOG)]);
    let activity = activity(root);

    let report = migration::run(&activity).await.unwrap();
    assert_eq!(report.applied, 2);
    assert_eq!(report.skipped, 0);

    let report = migration::run(&activity).await.unwrap();
    assert_eq!(report.applied, 0);
    assert_eq!(report.skipped, 2);

    let statuses = migration::status(&activity).await.unwrap();
    assert!(statuses.iter().all(|status| status.applied));
}

#[tokio::test]
#[ignore = "requires a database"]
#[serial]
async fn edited_changeset_aborts_the_run() {
    reset_database().await;
    let root = scratch_changelog(MASTER, &[("db/changelog/001-migtest.sql", CHANGELOG)]);
    let activity = activity(root.clone());

    migration::run(&activity).await.unwrap();

    let edited = CHANGELOG.replace("id INT PRIMARY KEY", "id BIGINT PRIMARY KEY");
    std::fs::write(root.join("db/changelog/001-migtest.sql"), edited).unwrap();

    let err = migration::run(&activity).await.unwrap_err();
    assert!(matches!(
        err,
        MigrationError::ChangesetEdited { ref id, .. } if id == "migtest-table"
    ));
}
