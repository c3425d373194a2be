use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scheduling_cell::{
    AvailabilityCache, AvailabilityService, EmptyDayReason, PlanConflict, ScheduleBreak,
    SchedulingError, SlotUnavailableReason, WeeklySchedule,
};
use shared_api::ApiClient;
use shared_utils::test_utils::{MockApiResponses, TestConfig};

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

// A Monday.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

fn service_for(mock_server: &MockServer) -> AvailabilityService {
    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();
    AvailabilityService::new(
        Arc::new(ApiClient::new(&config)),
        Arc::new(AvailabilityCache::new()),
    )
}

async fn mount_day_fixtures(mock_server: &MockServer, specialist_id: Uuid) {
    Mock::given(method("GET"))
        .and(path(format!("/specialists/{}/schedule", specialist_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockApiResponses::success(json!([
            MockApiResponses::schedule_entry(specialist_id, 1, "09:00", "12:00", true),
        ]))))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/specialists/{}/breaks", specialist_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockApiResponses::success(json!([
            MockApiResponses::break_entry(specialist_id, 1, "10:00", "10:30", "Almuerzo"),
        ]))))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/appointments"))
        .and(query_param("specialist_id", specialist_id.to_string()))
        .and(query_param("date", "2025-06-02"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockApiResponses::success(json!([
            MockApiResponses::appointment(
                Uuid::new_v4(),
                specialist_id,
                "2025-06-02T11:00:00Z",
                "confirmada"
            ),
        ]))))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_day_availability_applies_breaks_and_bookings() {
    let mock_server = MockServer::start().await;
    let specialist_id = Uuid::new_v4();
    mount_day_fixtures(&mock_server, specialist_id).await;

    let service = service_for(&mock_server);
    let day = service
        .day_availability(specialist_id, monday(), "test-token")
        .await
        .unwrap();

    assert_eq!(day.slots, vec![t(9, 0), t(9, 30), t(10, 30), t(11, 30)]);
    assert_eq!(day.reason, None);
    assert!(!day.is_degraded());
}

#[tokio::test]
async fn test_day_availability_is_served_from_cache_after_first_load() {
    let mock_server = MockServer::start().await;
    let specialist_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/specialists/{}/schedule", specialist_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockApiResponses::success(json!([
            MockApiResponses::schedule_entry(specialist_id, 1, "09:00", "10:00", true),
        ]))))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/specialists/{}/breaks", specialist_id)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockApiResponses::success(json!([]))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockApiResponses::success(json!([]))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let first = service
        .day_availability(specialist_id, monday(), "test-token")
        .await
        .unwrap();
    let second = service
        .day_availability(specialist_id, monday(), "test-token")
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.slots, vec![t(9, 0), t(9, 30)]);
}

#[tokio::test]
async fn test_failed_load_degrades_to_flagged_empty_day() {
    let mock_server = MockServer::start().await;
    let specialist_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/specialists/{}/schedule", specialist_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockApiResponses::success(json!([
            MockApiResponses::schedule_entry(specialist_id, 1, "09:00", "12:00", true),
        ]))))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/specialists/{}/breaks", specialist_id)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockApiResponses::success(json!([]))),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "message": "internal error"
        })))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let day = service
        .day_availability(specialist_id, monday(), "test-token")
        .await
        .unwrap();

    assert!(day.slots.is_empty());
    assert!(day.is_degraded());
    // A degraded day is not a cached fact; the next call retries.
    assert!(service.cache().get(specialist_id, monday()).is_none());
}

#[tokio::test]
async fn test_unavailable_weekday_reports_no_schedule() {
    let mock_server = MockServer::start().await;
    let specialist_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/specialists/{}/schedule", specialist_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockApiResponses::success(json!([
            MockApiResponses::schedule_entry(specialist_id, 1, "09:00", "12:00", false),
        ]))))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/specialists/{}/breaks", specialist_id)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockApiResponses::success(json!([]))),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockApiResponses::success(json!([]))),
        )
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let day = service
        .day_availability(specialist_id, monday(), "test-token")
        .await
        .unwrap();

    assert!(day.slots.is_empty());
    assert_eq!(day.reason, Some(EmptyDayReason::NoScheduleForDay));
    assert!(!day.is_degraded());
}

#[tokio::test]
async fn test_conflicting_plan_is_rejected_before_any_request() {
    let mock_server = MockServer::start().await;
    let specialist_id = Uuid::new_v4();

    // The save must never reach the wire.
    Mock::given(method("PUT"))
        .and(path(format!("/specialists/{}/schedule", specialist_id)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockApiResponses::success_message("saved")),
        )
        .expect(0)
        .mount(&mock_server)
        .await;

    let schedule: WeeklySchedule = serde_json::from_value(MockApiResponses::schedule_entry(
        specialist_id,
        1,
        "09:00",
        "17:00",
        true,
    ))
    .unwrap();
    // Break runs past the end of the working day.
    let bad_break: ScheduleBreak = serde_json::from_value(MockApiResponses::break_entry(
        specialist_id,
        1,
        "16:30",
        "17:30",
        "Reunión",
    ))
    .unwrap();

    let service = service_for(&mock_server);
    let result = service
        .save_weekly_plan(specialist_id, &[schedule], &[bad_break], "test-token")
        .await;

    assert!(matches!(result, Err(SchedulingError::Plan(PlanConflict))));
}

#[tokio::test]
async fn test_saving_a_plan_invalidates_the_specialist_cache() {
    let mock_server = MockServer::start().await;
    let specialist_id = Uuid::new_v4();
    mount_day_fixtures(&mock_server, specialist_id).await;

    Mock::given(method("PUT"))
        .and(path(format!("/specialists/{}/schedule", specialist_id)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockApiResponses::success_message("saved")),
        )
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    service
        .day_availability(specialist_id, monday(), "test-token")
        .await
        .unwrap();
    assert!(service.cache().get(specialist_id, monday()).is_some());

    let schedule: WeeklySchedule = serde_json::from_value(MockApiResponses::schedule_entry(
        specialist_id,
        1,
        "09:00",
        "13:00",
        true,
    ))
    .unwrap();
    let ack = service
        .save_weekly_plan(specialist_id, &[schedule], &[], "test-token")
        .await
        .unwrap();

    assert_eq!(ack, Some("saved".to_string()));
    assert!(service.cache().get(specialist_id, monday()).is_none());
}

#[tokio::test]
async fn test_check_availability_parses_backend_verdict() {
    let mock_server = MockServer::start().await;
    let specialist_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!(
            "/specialists/{}/availability/check",
            specialist_id
        )))
        .and(query_param("date", "2025-06-02"))
        .and(query_param("time", "11:00"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockApiResponses::success(json!({
            "available": false,
            "reason": "already_booked"
        }))))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let check = service
        .check_availability(specialist_id, monday(), t(11, 0), "test-token")
        .await
        .unwrap();

    assert!(!check.available);
    assert_eq!(check.reason, Some(SlotUnavailableReason::AlreadyBooked));
}

#[tokio::test]
async fn test_backend_slot_list_is_parsed_into_times() {
    let mock_server = MockServer::start().await;
    let specialist_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/specialists/{}/slots", specialist_id)))
        .and(query_param("date", "2025-06-02"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockApiResponses::success(json!([
            "09:00", "09:30", "10:30:00"
        ]))))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let slots = service
        .slots_from_backend(specialist_id, monday(), "test-token")
        .await
        .unwrap();

    assert_eq!(slots, vec![t(9, 0), t(9, 30), t(10, 30)]);
}
