//! End-to-end tests for the Award Intake Engine.
//!
//! This suite drives whole batches through the file-backed collaborators
//! and exercises the validation endpoint:
//! - Individual and group documents accepted and numbered
//! - Policy violations logged without consuming a serial number
//! - Renamed documents keeping their identifier
//! - Dry runs leaving every file untouched
//! - API error mapping

use std::fs;
use std::path::{Path, PathBuf};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use award_intake::api::{AppState, create_router};
use award_intake::batch::{BatchRunner, FileOutputs, JsonFieldSource, collect_documents};
use award_intake::config::{ActionsConfig, ConfigLoader, IntakeConfig};
use award_intake::error::ErrorKind;
use award_intake::intake::{CounterStore, HeadlessResolver, JsonCounterStore, SerialCounter};

// =============================================================================
// Test Helpers
// =============================================================================

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
}

fn page(pairs: &[(&str, &str)]) -> Value {
    Value::Array(
        pairs
            .iter()
            .map(|(name, value)| json!({ "name": name, "value": value }))
            .collect(),
    )
}

fn individual_dump(nominee: &str, money: &str, hours: &str) -> Value {
    json!({
        "pages": [
            page(&[
                ("Date Received", "03/01/2024"),
                ("Employee Name", nominee),
                ("Special Act or Service", "On"),
                ("Award Amount", money),
                ("Time Off Hours", hours),
                ("Org 1", "BBB-111"),
                ("Please Print", "Jane Smith"),
            ]),
            page(&[
                ("Moderate", "On"),
                ("Limited", "On"),
                ("Value and Extent", "Automated the monthly reconciliation."),
                ("Signature Date", "03/01/2024"),
            ]),
        ]
    })
}

fn group_dump() -> Value {
    json!({
        "pages": [
            page(&[
                ("Date Received", "Today"),
                ("On the Spot", "On"),
                ("Org 1", "AAA-222"),
                ("Nominator's Name", "Jane Smith"),
            ]),
            page(&[
                ("Employee Name_2", "Ann Lee"),
                ("Award Amount", "200"),
                ("Employee Name_3", "Bo Chan"),
                ("Award Amount_2", "300"),
                ("Time Off Hours_2", "2"),
            ]),
            page(&[
                ("High", "On"),
                ("Extended", "On"),
                ("Describe the value and extent", "Kept the lab running."),
            ]),
        ]
    })
}

fn write_dump(dir: &Path, name: &str, dump: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, dump.to_string()).unwrap();
    path
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

struct Workspace {
    root: TempDir,
    inbox: PathBuf,
    config: IntakeConfig,
}

impl Workspace {
    fn new(counter: SerialCounter) -> Self {
        let root = TempDir::new().unwrap();
        let inbox = root.path().join("inbox");
        fs::create_dir(&inbox).unwrap();

        let yaml = format!(
            r#"
fiscal_year_prefix: "24"
paths:
  spreadsheet_rows: "{dir}/rows.txt"
  audit_log: "{dir}/log.txt"
  counter_store: "{dir}/counter.json"
"#,
            dir = root.path().display()
        );
        let config = ConfigLoader::parse("workspace.yaml", &yaml).unwrap();
        JsonCounterStore::new(config.paths.counter_store.clone())
            .save(&counter)
            .unwrap();

        Self { root, inbox, config }
    }

    fn counter_store(&self) -> JsonCounterStore {
        JsonCounterStore::new(self.config.paths.counter_store.clone())
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.root.path().join(name)).unwrap_or_default()
    }
}

// =============================================================================
// Batch
// =============================================================================

#[test]
fn test_batch_numbers_accepted_documents_and_skips_rejected_ones() {
    let workspace = Workspace::new(SerialCounter::new(7, 3));
    write_dump(&workspace.inbox, "a_individual.json", &individual_dump("Ann Lee", "250", "4.5"));
    write_dump(&workspace.inbox, "b_group.json", &group_dump());
    write_dump(&workspace.inbox, "c_over.json", &individual_dump("Bo Chan", "250", "5"));

    let documents = collect_documents(&[workspace.inbox.clone()]).unwrap();
    assert_eq!(documents.len(), 3);

    let store = workspace.counter_store();
    let mut sink = FileOutputs::from_config(&workspace.config);
    let mut resolver = HeadlessResolver;
    let report = BatchRunner::new(&workspace.config, &JsonFieldSource, &mut sink, &store, &mut resolver)
        .with_today(today())
        .run(&documents)
        .unwrap();

    let ids: Vec<&str> = report.processed.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["24-IND-007", "24-GRP-003"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].name, "c_over.json");
    assert_eq!(report.failed[0].kind, ErrorKind::PolicyViolation);

    // The rejected document consumed nothing
    assert_eq!(store.load().unwrap(), SerialCounter::new(8, 4));

    // One row per nominee
    assert_eq!(workspace.read("rows.txt").lines().count(), 3);

    let log = workspace.read("log.txt");
    assert!(log.contains("a_individual.json"));
    assert!(log.contains("#####"));
    assert!(log.contains("105.56%"));

    let names = file_names(&workspace.inbox);
    assert_eq!(names.len(), 3);
    assert!(names.iter().any(|n| n.starts_with("24-IND-007 - BBB-000 - ")));
    assert!(names.iter().any(|n| n.starts_with("24-GRP-003 - AAA-222 - 2 nominees")));
    assert!(names.contains(&"c_over.json".to_string()));
}

#[test]
fn test_second_run_keeps_identifiers_of_renamed_documents() {
    let workspace = Workspace::new(SerialCounter::new(1, 1));
    write_dump(&workspace.inbox, "nomination.json", &individual_dump("Ann Lee", "100", "0"));

    let store = workspace.counter_store();
    let mut resolver = HeadlessResolver;

    let first = {
        let documents = collect_documents(&[workspace.inbox.clone()]).unwrap();
        let mut sink = FileOutputs::from_config(&workspace.config);
        BatchRunner::new(&workspace.config, &JsonFieldSource, &mut sink, &store, &mut resolver)
            .with_today(today())
            .run(&documents)
            .unwrap()
    };
    assert_eq!(first.processed[0].id.as_str(), "24-IND-001");

    let second = {
        let documents = collect_documents(&[workspace.inbox.clone()]).unwrap();
        let mut sink = FileOutputs::from_config(&workspace.config);
        BatchRunner::new(&workspace.config, &JsonFieldSource, &mut sink, &store, &mut resolver)
            .with_today(today())
            .run(&documents)
            .unwrap()
    };
    assert_eq!(second.processed[0].id.as_str(), "24-IND-001");
    assert_eq!(store.load().unwrap(), SerialCounter::new(2, 1));
    assert_eq!(file_names(&workspace.inbox).len(), 1);
}

#[test]
fn test_dry_run_touches_nothing() {
    let mut workspace = Workspace::new(SerialCounter::new(4, 4));
    workspace.config.actions = ActionsConfig::dry_run();
    write_dump(&workspace.inbox, "nomination.json", &individual_dump("Ann Lee", "100", "0"));

    let documents = collect_documents(&[workspace.inbox.clone()]).unwrap();
    let store = workspace.counter_store();
    let mut sink = FileOutputs::from_config(&workspace.config);
    let mut resolver = HeadlessResolver;
    let report = BatchRunner::new(&workspace.config, &JsonFieldSource, &mut sink, &store, &mut resolver)
        .with_today(today())
        .run(&documents)
        .unwrap();

    assert_eq!(report.processed[0].id.as_str(), "24-IND-004");
    assert_eq!(report.counter, SerialCounter::new(5, 4));
    assert_eq!(store.load().unwrap(), SerialCounter::new(4, 4));
    assert_eq!(workspace.read("rows.txt"), "");
    assert_eq!(workspace.read("log.txt"), "");
    assert_eq!(file_names(&workspace.inbox), vec!["nomination.json".to_string()]);
}

#[test]
fn test_unreadable_dump_is_reported_not_fatal() {
    let workspace = Workspace::new(SerialCounter::new(1, 1));
    fs::write(workspace.inbox.join("broken.json"), "{ not json").unwrap();
    write_dump(&workspace.inbox, "ok.json", &individual_dump("Ann Lee", "100", "0"));

    let documents = collect_documents(&[workspace.inbox.clone()]).unwrap();
    let store = workspace.counter_store();
    let mut sink = FileOutputs::from_config(&workspace.config);
    let mut resolver = HeadlessResolver;
    let report = BatchRunner::new(&workspace.config, &JsonFieldSource, &mut sink, &store, &mut resolver)
        .with_today(today())
        .run(&documents)
        .unwrap();

    assert_eq!(report.processed.len(), 1);
    assert_eq!(report.failed[0].kind, ErrorKind::Io);
}

// =============================================================================
// API
// =============================================================================

fn create_router_for_test(counter: SerialCounter) -> (Router, TempDir, JsonCounterStore) {
    let dir = TempDir::new().unwrap();
    let store = JsonCounterStore::new(dir.path().join("counter.json"));
    store.save(&counter).unwrap();

    let config = ConfigLoader::load("./config/intake.yaml")
        .expect("Failed to load config")
        .into_config();
    let router = create_router(AppState::new(config, store.clone()));
    (router, dir, store)
}

async fn post_validate(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/validate")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_api_validates_group_document_without_advancing_counter() {
    let (router, _dir, store) = create_router_for_test(SerialCounter::new(9, 12));
    let mut body = group_dump();
    body["document_name"] = json!("scan.json");

    let (status, json) = post_validate(router, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["award"]["record"]["id"], "24-GRP-012");
    assert_eq!(json["award"]["record"]["award_type"], "on_the_spot");
    assert_eq!(json["award"]["value_extent_source"], "checkbox");
    assert_eq!(store.load().unwrap(), SerialCounter::new(9, 12));
}

#[tokio::test]
async fn test_api_rejects_self_nomination() {
    let (router, _dir, _store) = create_router_for_test(SerialCounter::new(1, 1));
    let mut body = individual_dump("Jane Smith", "100", "0");
    body["document_name"] = json!("scan.json");

    let (status, json) = post_validate(router, body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "SELF_NOMINATION");
}

#[tokio::test]
async fn test_api_reports_missing_counter_store_as_internal_error() {
    let (router, dir, _store) = create_router_for_test(SerialCounter::new(1, 1));
    fs::remove_file(dir.path().join("counter.json")).unwrap();
    let mut body = individual_dump("Ann Lee", "100", "0");
    body["document_name"] = json!("scan.json");

    let (status, json) = post_validate(router, body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "IO_ERROR");
}
