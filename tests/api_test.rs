use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use warp::http::StatusCode;

use recovery_quote_backend::handlers::chat::CHAT_FAILURE_MESSAGE;
use recovery_quote_backend::models::ChatMessage;
use recovery_quote_backend::routes::routes;
use recovery_quote_backend::services::llm::ChatModel;
use recovery_quote_backend::services::rate_table::RateTable;
use recovery_quote_backend::state::AppState;

struct CannedChat;

#[async_trait]
impl ChatModel for CannedChat {
    async fn complete(&self, system_prompt: &str, messages: &[ChatMessage]) -> Result<String> {
        assert!(system_prompt.contains("Data Recovery Expert Knowledge Base"));
        assert!(!messages.is_empty());
        Ok("Happy to help.".to_string())
    }
}

struct FailingChat;

#[async_trait]
impl ChatModel for FailingChat {
    async fn complete(&self, _system_prompt: &str, _messages: &[ChatMessage]) -> Result<String> {
        bail!("upstream timed out")
    }
}

fn state() -> AppState {
    AppState::new(RateTable::standard(), Arc::new(CannedChat))
}

fn body_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).expect("response body is JSON")
}

#[tokio::test]
async fn health_reports_ok() {
    let api = routes(state());
    let res = warp::test::request().method("GET").path("/api/health").reply(&api).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res.body())["status"], "ok");
}

#[tokio::test]
async fn quote_for_large_physically_damaged_drive() {
    let api = routes(state());
    let res = warp::test::request()
        .method("POST")
        .path("/api/quote")
        .json(&json!({
            "deviceType": "hard-drive",
            "damage": "physical",
            "urgency": "standard",
            "capacity": "8TB"
        }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res.body());
    assert_eq!(body["minPrice"], 650);
    assert_eq!(body["maxPrice"], 1560);
    assert_eq!(body["range"], "$650 - $1560");
    assert!(body.get("unknownInputs").is_none());
}

#[tokio::test]
async fn quote_for_unknown_device_reports_the_fallback() {
    let api = routes(state());
    let res = warp::test::request()
        .method("POST")
        .path("/api/quote")
        .json(&json!({ "deviceType": "toaster", "damage": "logical", "urgency": "standard" }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res.body());
    assert_eq!(body["minPrice"], 500);
    assert_eq!(body["unknownInputs"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn raid_quote_below_minimum_drives_is_rejected() {
    let api = routes(state());
    let res = warp::test::request()
        .method("POST")
        .path("/api/quote/raid")
        .json(&json!({ "raidLevel": "raid6", "driveCount": 3 }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res.body())["error"], "RAID6 requires at least 4 drives");

    let res = warp::test::request()
        .method("POST")
        .path("/api/quote/raid")
        .json(&json!({ "raidLevel": "raid5", "driveCount": 5, "isPhysicalDamage": false }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res.body())["minPrice"], 1500);
}

#[tokio::test]
async fn calculator_quote_applies_multipliers() {
    let api = routes(state());
    let res = warp::test::request()
        .method("POST")
        .path("/api/quote/calculator")
        .json(&json!({
            "deviceType": "ssd",
            "failureType": "logical",
            "capacityGb": 2000,
            "urgency": "urgent"
        }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res.body());
    assert_eq!((body["min"].as_u64(), body["max"].as_u64()), (Some(750), Some(1688)));
}

#[tokio::test]
async fn pricing_tables_are_published() {
    let api = routes(state());
    let res = warp::test::request().method("GET").path("/api/pricing").reply(&api).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_json(res.body()).is_object());
}

#[tokio::test]
async fn chat_appends_pricing_to_the_answer() {
    let api = routes(state());
    let res = warp::test::request()
        .method("POST")
        .path("/api/chat")
        .json(&json!({
            "messages": [{ "role": "user", "content": "How much for my 8TB drive? It is clicking." }],
            "selectedDeviceType": "hard-drive"
        }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let message = body_json(res.body())["message"].as_str().unwrap_or_default().to_string();
    assert!(message.starts_with("Happy to help."));
    assert!(message.contains("Pricing Estimate for hard drive"));
    assert!(message.contains("$650 - $1560"));
}

#[tokio::test]
async fn chat_without_messages_is_rejected() {
    let api = routes(state());
    let res = warp::test::request()
        .method("POST")
        .path("/api/chat")
        .json(&json!({ "messages": [] }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chat_model_failure_is_a_generic_500() {
    let api = routes(AppState::new(RateTable::standard(), Arc::new(FailingChat)));
    let res = warp::test::request()
        .method("POST")
        .path("/api/chat")
        .json(&json!({ "messages": [{ "role": "user", "content": "hello" }] }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(res.body())["error"], CHAT_FAILURE_MESSAGE);
}

#[tokio::test]
async fn lead_lifecycle() {
    let api = routes(state());

    let res = warp::test::request()
        .method("POST")
        .path("/api/leads")
        .json(&json!({
            "name": "Dana",
            "email": "dana@example.com",
            "deviceType": "ssd",
            "problemDescription": "Not detected after a firmware update"
        }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = body_json(res.body());
    assert_eq!(created["status"], "new");
    assert_eq!(created["urgency"], "standard");
    let id = created["id"].as_str().unwrap_or_default().to_string();
    assert!(!id.is_empty());

    let res = warp::test::request().method("GET").path("/api/leads").reply(&api).await;
    assert_eq!(body_json(res.body()).as_array().map(Vec::len), Some(1));

    let res = warp::test::request()
        .method("PUT")
        .path(&format!("/api/leads/{}", id))
        .json(&json!({ "status": "contacted", "assignedTo": "Sam" }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = body_json(res.body());
    assert_eq!(updated["status"], "contacted");
    assert_eq!(updated["assignedTo"], "Sam");

    let res = warp::test::request()
        .method("GET")
        .path("/api/leads?status=new")
        .reply(&api)
        .await;
    assert_eq!(body_json(res.body()).as_array().map(Vec::len), Some(0));

    let res = warp::test::request()
        .method("POST")
        .path(&format!("/api/leads/{}/notes", id))
        .json(&json!({ "note": "Left a voicemail" }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res.body())["notes"], "Left a voicemail");

    let res = warp::test::request()
        .method("GET")
        .path(&format!("/api/leads/{}", id))
        .reply(&api)
        .await;
    assert_eq!(body_json(res.body())["name"], "Dana");
}

#[tokio::test]
async fn missing_lead_is_404() {
    let api = routes(state());
    let res = warp::test::request()
        .method("GET")
        .path("/api/leads/does-not-exist")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res.body())["error"], "Lead not found");
}

#[tokio::test]
async fn contact_form_is_stored_as_a_lead() {
    let state = state();
    let api = routes(state.clone());
    let res = warp::test::request()
        .method("POST")
        .path("/api/contact")
        .json(&json!({
            "name": "Lee",
            "email": "lee@example.com",
            "message": "Laptop drive died",
            "deviceType": "hard-drive",
            "capacity": "1TB",
            "estimatedPrice": 450,
            "isUrgent": true
        }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res.body());
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Form submitted successfully (test mode)");

    let leads = state.leads.list(None).await.unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].details.source.as_deref(), Some("contact"));
    assert_eq!(leads[0].details.urgency, "emergency");
}

#[tokio::test]
async fn raid_recovery_request_gets_an_id() {
    let api = routes(state());
    let res = warp::test::request()
        .method("POST")
        .path("/api/raid-recovery-request")
        .json(&json!({
            "name": "Dana",
            "email": "dana@example.com",
            "phone": "555-0100",
            "arrayType": "hardware",
            "raidLevel": "raid5",
            "numDrives": 4,
            "dataType": "database",
            "failureSummary": "Two drives dropped out",
            "isEmergency": true,
            "preferredContact": "phone"
        }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res.body());
    assert_eq!(body["success"], true);
    let request_id = body["requestId"].as_str().unwrap_or_default();
    assert!(request_id.starts_with("RR"));
    assert!(body["message"].as_str().unwrap_or_default().contains("24 Hour Data"));
}

#[tokio::test]
async fn custom_raid_request_needs_a_description() {
    let api = routes(state());
    let res = warp::test::request()
        .method("POST")
        .path("/api/raid-recovery-request")
        .json(&json!({
            "name": "Dana",
            "email": "dana@example.com",
            "phone": "555-0100",
            "arrayType": "software",
            "raidLevel": "custom",
            "numDrives": 6,
            "dataType": "media",
            "failureSummary": "Pool will not import",
            "preferredContact": "email"
        }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn verification_request_is_pending() {
    let api = routes(state());
    let res = warp::test::request()
        .method("POST")
        .path("/api/companies/verify")
        .json(&json!({
            "companyName": "Acme Recovery",
            "website": "https://acme.example",
            "contactName": "Pat",
            "email": "pat@acme.example",
            "phone": "555-0199",
            "address": "1 Main St",
            "yearsInBusiness": 12,
            "serviceAreas": ["Missouri"]
        }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = body_json(res.body());
    assert_eq!(body["status"], "pending");
    assert!(body["id"].as_str().unwrap_or_default().starts_with("verification_"));
    assert_eq!(body["companyName"], "Acme Recovery");
}

#[tokio::test]
async fn directory_search_filters_listings() {
    let api = routes(state());
    let res = warp::test::request()
        .method("GET")
        .path("/api/companies?search=ontrack")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let listings = body_json(res.body());
    assert_eq!(listings.as_array().map(Vec::len), Some(1));
    assert_eq!(listings[0]["name"], "Ontrack");

    let res = warp::test::request().method("GET").path("/api/companies").reply(&api).await;
    assert_eq!(body_json(res.body()).as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn recommendation_for_dallas_lists_both_partners() {
    let api = routes(state());
    let res = warp::test::request()
        .method("GET")
        .path("/api/companies/recommend?location=Dallas")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res.body());
    assert_eq!(body["companies"][0]["name"], "24 Hour Data");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let api = routes(state());
    let res = warp::test::request().method("GET").path("/api/nope").reply(&api).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res.body())["error"], "Not Found");
}

#[tokio::test]
async fn malformed_body_is_400() {
    let api = routes(state());
    let res = warp::test::request()
        .method("POST")
        .path("/api/quote")
        .header("content-type", "application/json")
        .body("{not json")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
