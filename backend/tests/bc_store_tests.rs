//! Integration tests for the Business Central store against a mocked API.
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use checkinout_backend::domain::commands::time_entry::HistoryFilters;
use checkinout_backend::storage::bc::{BcClient, BcConfig, BcStore, RetryConfig};
use checkinout_backend::storage::traits::{
    EmployeeStore, LocationStore, StoreError, TimeEntryStore,
};
use checkinout_backend::storage::MemoryStore;

const ENTRIES_PATH: &str =
    "/api/lsretail/timeregistration/v2.0/companies(test-co)/timeEntryRegistrations";
const EMPLOYEES_PATH: &str =
    "/api/lsretail/timeregistration/v2.0/companies(test-co)/staffEmployees";
const LOCATIONS_PATH: &str =
    "/api/lsretail/timeregistration/v2.0/companies(test-co)/workLocations";

fn store_for(server: &MockServer) -> BcStore {
    let config = BcConfig {
        base_url: server.uri(),
        api_version: "v2.0".to_string(),
        company_id: "test-co".to_string(),
        tenant_id: "test-tenant".to_string(),
    };
    let retry = RetryConfig {
        max_retries: 3,
        initial_delay: Duration::from_millis(10),
        backoff_multiplier: 2,
    };
    let client = BcClient::with_retry(config, retry).expect("valid config");
    BcStore::new(Arc::new(client))
}

fn open_entry_json() -> serde_json::Value {
    json!({
        "systemId": "abc-123",
        "entryNo": 1,
        "employeeNo": "EMP001",
        "locationCode": "LOC001",
        "checkInDateTime": "2025-06-02T08:00:00Z",
        "checkOutDateTime": null,
        "durationMinutes": null,
        "notes": "morning shift"
    })
}

fn collection(entries: Vec<serde_json::Value>) -> serde_json::Value {
    json!({ "@odata.context": "metadata#timeEntryRegistrations", "value": entries })
}

#[tokio::test]
async fn find_open_entry_sends_the_null_checkout_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENTRIES_PATH))
        .and(query_param(
            "$filter",
            "employeeNo eq 'EMP001' and checkOutDateTime eq null",
        ))
        .and(query_param("$orderby", "checkInDateTime desc"))
        .and(query_param("$top", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(vec![open_entry_json()])))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let entry = store.find_open_entry("EMP001").await.unwrap().unwrap();
    assert_eq!(entry.id, "abc-123");
    assert!(entry.is_open());
    assert_eq!(entry.notes, "morning shift");
}

#[tokio::test]
async fn reads_retry_after_a_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENTRIES_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": "Internal_ServerError", "message": "worker crashed" }
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ENTRIES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(vec![])))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let entry = store.find_open_entry("EMP001").await.unwrap();
    assert!(entry.is_none());
}

#[tokio::test]
async fn not_found_reads_fail_without_retrying() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{ENTRIES_PATH}(missing-id)")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": "BusinessCentral_RecordNotFound", "message": "gone" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let entry = store.get_entry("missing-id").await.unwrap();
    assert!(entry.is_none());
}

#[tokio::test]
async fn writes_are_never_retried() {
    let server = MockServer::start().await;
    // check-in first queries for an open entry
    Mock::given(method("GET"))
        .and(path(ENTRIES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(vec![])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ENTRIES_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": "Internal_ServerError", "message": "insert failed" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let err = store
        .insert_open_entry(checkinout_backend::domain::models::time_entry::NewOpenEntry {
            employee_id: "EMP001".to_string(),
            location_id: "LOC001".to_string(),
            notes: String::new(),
            check_in_time: "2025-06-02T08:00:00Z".parse().unwrap(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Backend(_)));
}

#[tokio::test]
async fn check_in_with_an_open_entry_does_not_post() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENTRIES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(vec![open_entry_json()])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ENTRIES_PATH))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let err = store
        .insert_open_entry(checkinout_backend::domain::models::time_entry::NewOpenEntry {
            employee_id: "EMP001".to_string(),
            location_id: "LOC002".to_string(),
            notes: String::new(),
            check_in_time: "2025-06-02T09:00:00Z".parse().unwrap(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::OpenEntryExists(_)));
}

#[tokio::test]
async fn check_in_posts_the_registration_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENTRIES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(vec![])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ENTRIES_PATH))
        .and(body_partial_json(json!({
            "employeeNo": "EMP001",
            "locationCode": "LOC001",
            "notes": "starting"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(open_entry_json()))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let entry = store
        .insert_open_entry(checkinout_backend::domain::models::time_entry::NewOpenEntry {
            employee_id: "EMP001".to_string(),
            location_id: "LOC001".to_string(),
            notes: "starting".to_string(),
            check_in_time: "2025-06-02T08:00:00Z".parse().unwrap(),
        })
        .await
        .unwrap();
    assert!(entry.is_open());
}

#[tokio::test]
async fn history_filters_become_odata_clauses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENTRIES_PATH))
        .and(query_param(
            "$filter",
            "employeeNo eq 'EMP001' and \
             checkInDateTime ge '2025-06-01T00:00:00.000Z' and \
             checkInDateTime le '2025-06-30T23:59:59.000Z' and \
             locationCode eq 'LOC001'",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(vec![])))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let filters = HistoryFilters {
        start_date: Some("2025-06-01T00:00:00Z".parse().unwrap()),
        end_date: Some("2025-06-30T23:59:59Z".parse().unwrap()),
        location_id: Some("LOC001".to_string()),
    };
    let entries = store.list_entries("EMP001", &filters).await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn directory_queries_filter_on_active_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EMPLOYEES_PATH))
        .and(query_param("$filter", "status eq 'Active'"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{
                "systemId": "s1",
                "no": "EMP001",
                "displayName": "John Smith",
                "status": "Active",
                "jobTitle": "Sales Associate"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(LOCATIONS_PATH))
        .and(query_param("$filter", "isActive eq true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{
                "systemId": "s2",
                "code": "LOC001",
                "name": "Headquarters",
                "isActive": true
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let employees = store.list_employees().await.unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].name, "John Smith");

    let locations = store.list_locations().await.unwrap();
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].id, "LOC001");
}

#[tokio::test]
async fn backend_errors_surface_user_messages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EMPLOYEES_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": "Authorization_RequestDenied", "message": "denied" }
        })))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let err = store.list_employees().await.unwrap_err();
    match err {
        StoreError::Backend(bc) => {
            assert_eq!(bc.status, 403);
            assert_eq!(
                bc.user_message(),
                "You do not have permission to perform this action."
            );
        }
        other => panic!("expected backend error, got {other:?}"),
    }
}

// The two stores answer the same trait queries; a sequence run against the
// in-memory store here guards against drift between the implementations.
#[tokio::test]
async fn memory_store_satisfies_the_same_contract() {
    let store = MemoryStore::new();

    assert!(store.find_open_entry("EMP001").await.unwrap().is_none());
    let entry = store
        .insert_open_entry(checkinout_backend::domain::models::time_entry::NewOpenEntry {
            employee_id: "EMP001".to_string(),
            location_id: "LOC001".to_string(),
            notes: String::new(),
            check_in_time: chrono::Utc::now(),
        })
        .await
        .unwrap();

    let found = store.find_open_entry("EMP001").await.unwrap().unwrap();
    assert_eq!(found.id, entry.id);
    assert!(store.get_entry("missing").await.unwrap().is_none());
}
