//! Admin dashboard behaviour against the in-memory backend

#![allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)]

mod common;

use common::{init_test_logging, signed_in_session};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tourbook_client::dashboard::{LOGIN_FAILED, SESSION_EXPIRED};
use tourbook_client::mock::{sample_booking, server_error, unauthorized};
use tourbook_client::{
    AdminDashboard, AdminSession, ApiError, AuthState, DashboardError, DashboardSettings,
    FileTokenStore, LoadPhase, MockApi, MockCall,
};
use tourbook_types::{
    Booking, BookingStatus, Credentials, DashboardStats, StatusAction, StatusFilter,
};

fn bookings(count: i64) -> Vec<Booking> {
    (1..=count)
        .map(|id| {
            let status = if id % 2 == 0 {
                BookingStatus::Confirmed
            } else {
                BookingStatus::Pending
            };
            sample_booking(id, status)
        })
        .collect()
}

fn small_pages(reset_page_on_filter_change: bool) -> DashboardSettings {
    DashboardSettings {
        per_page: 2,
        reset_page_on_filter_change,
    }
}

async fn signed_in(mock: &MockApi, settings: DashboardSettings) -> AdminDashboard<MockApi> {
    init_test_logging();
    let mut dashboard = AdminDashboard::new(mock.clone(), signed_in_session("token"), settings);
    dashboard.refresh().await.unwrap();
    mock.clear_calls();
    dashboard
}

#[tokio::test]
async fn test_starts_signed_out_without_token() {
    let mock = MockApi::new();
    let mut dashboard =
        AdminDashboard::new(mock.clone(), AdminSession::in_memory(), DashboardSettings::default());

    assert_eq!(dashboard.auth_state(), AuthState::Unauthenticated);
    let err = dashboard.refresh().await.unwrap_err();
    assert_eq!(err, DashboardError::Api(ApiError::NotAuthenticated));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_restores_persisted_token() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    AdminSession::new(Arc::new(FileTokenStore::new(&path)))
        .store_token("persisted")
        .unwrap();

    let session = AdminSession::new(Arc::new(FileTokenStore::new(&path)));
    let dashboard = AdminDashboard::new(MockApi::new(), session, DashboardSettings::default());

    assert!(dashboard.is_authenticated());
    assert_eq!(dashboard.session().token().as_deref(), Some("persisted"));
}

#[tokio::test]
async fn test_login_loads_bookings_and_stats() {
    init_test_logging();
    let mock = MockApi::new();
    mock.set_bookings(bookings(3));
    let mut dashboard =
        AdminDashboard::new(mock.clone(), AdminSession::in_memory(), DashboardSettings::default());

    dashboard
        .login(&Credentials::new("admin", "secret"))
        .await
        .unwrap();

    assert!(dashboard.is_authenticated());
    assert_eq!(dashboard.phase(), LoadPhase::Idle);
    assert_eq!(dashboard.bookings().len(), 3);
    assert!(dashboard.stats().is_some());
    assert_eq!(dashboard.pagination().map(|p| p.total), Some(3));
    assert_eq!(dashboard.session().token().as_deref(), Some("mock-token"));

    let calls = mock.calls();
    assert_eq!(
        calls.first(),
        Some(&MockCall::Login {
            username: "admin".to_string()
        })
    );
    assert!(calls.contains(&MockCall::DashboardStats));
    assert!(calls.iter().any(|call| matches!(call, MockCall::ListBookings(_))));
}

#[tokio::test]
async fn test_rejected_login_shows_server_message() {
    let mock = MockApi::new();
    mock.set_login(Err(ApiError::Http {
        status: 401,
        message: "Invalid credentials".to_string(),
        errors: tourbook_types::ServerErrors::Empty,
    }));
    let mut dashboard =
        AdminDashboard::new(mock.clone(), AdminSession::in_memory(), DashboardSettings::default());

    assert!(dashboard.login(&Credentials::new("admin", "nope")).await.is_err());

    assert!(!dashboard.is_authenticated());
    assert_eq!(dashboard.login_error(), Some("Invalid credentials"));
    assert!(!mock.calls().contains(&MockCall::DashboardStats));
}

#[tokio::test]
async fn test_login_without_message_uses_generic_text() {
    let mock = MockApi::new();
    mock.set_login(Err(ApiError::Decode {
        message: "missing field `token`".to_string(),
    }));
    let mut dashboard =
        AdminDashboard::new(mock, AdminSession::in_memory(), DashboardSettings::default());

    assert!(dashboard.login(&Credentials::new("admin", "x")).await.is_err());

    assert_eq!(dashboard.login_error(), Some(LOGIN_FAILED));
}

#[tokio::test]
async fn test_stats_failure_keeps_booking_list() {
    let mock = MockApi::new();
    mock.set_bookings(bookings(2));
    mock.set_stats(Err(server_error()));
    let mut dashboard =
        AdminDashboard::new(mock.clone(), signed_in_session("token"), DashboardSettings::default());

    dashboard.refresh().await.unwrap();

    assert!(dashboard.stats().is_none());
    assert_eq!(dashboard.bookings().len(), 2);
    assert_eq!(dashboard.error(), None);
    assert!(dashboard.is_authenticated());
}

#[tokio::test]
async fn test_stats_unauthorized_signs_out() {
    let mock = MockApi::new();
    mock.set_bookings(bookings(2));
    mock.set_stats(Err(unauthorized()));
    let mut dashboard =
        AdminDashboard::new(mock.clone(), signed_in_session("stale"), DashboardSettings::default());

    let err = dashboard.refresh().await.unwrap_err();

    assert_eq!(err, DashboardError::Api(unauthorized()));
    assert!(!dashboard.is_authenticated());
    assert!(!dashboard.session().is_authenticated());
    assert!(dashboard.bookings().is_empty());
    assert_eq!(dashboard.error(), Some(SESSION_EXPIRED));
}

#[tokio::test]
async fn test_list_failure_is_reported() {
    let mock = MockApi::new();
    mock.fail_bookings(Some(server_error()));
    let mut dashboard =
        AdminDashboard::new(mock, signed_in_session("token"), DashboardSettings::default());

    assert!(dashboard.refresh().await.is_err());

    assert!(dashboard.is_authenticated());
    assert_eq!(
        dashboard.error(),
        Some("Failed to load dashboard data: Internal server error")
    );
}

#[tokio::test]
async fn test_list_unauthorized_signs_out() {
    let mock = MockApi::new();
    mock.fail_bookings(Some(unauthorized()));
    let mut dashboard =
        AdminDashboard::new(mock, signed_in_session("token"), DashboardSettings::default());

    assert!(dashboard.refresh().await.is_err());

    assert_eq!(dashboard.auth_state(), AuthState::Unauthenticated);
    assert_eq!(dashboard.error(), Some(SESSION_EXPIRED));
}

#[tokio::test]
async fn test_logout_clears_state() {
    let mock = MockApi::new();
    mock.set_bookings(bookings(2));
    let mut dashboard = signed_in(&mock, DashboardSettings::default()).await;
    dashboard.select(1).unwrap();

    dashboard.logout();

    assert!(!dashboard.is_authenticated());
    assert!(!dashboard.session().is_authenticated());
    assert!(dashboard.bookings().is_empty());
    assert!(dashboard.stats().is_none());
    assert!(dashboard.selected().is_none());
    assert_eq!(dashboard.error(), None);
}

#[tokio::test]
async fn test_disallowed_action_sends_nothing() {
    let mock = MockApi::new();
    mock.set_bookings(vec![sample_booking(1, BookingStatus::Completed)]);
    let mut dashboard = signed_in(&mock, DashboardSettings::default()).await;

    let err = dashboard
        .apply_action(1, StatusAction::Cancel, None)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        DashboardError::InvalidTransition {
            from: BookingStatus::Completed,
            action: StatusAction::Cancel,
        }
    );
    assert_eq!(err.to_string(), "Cannot cancel a completed booking");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_unknown_booking_is_rejected() {
    let mock = MockApi::new();
    let mut dashboard = signed_in(&mock, DashboardSettings::default()).await;

    let err = dashboard
        .apply_action(99, StatusAction::Confirm, None)
        .await
        .unwrap_err();

    assert_eq!(err, DashboardError::UnknownBooking(99));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_confirm_with_quote_reloads_and_closes_detail() {
    let mock = MockApi::new();
    mock.set_bookings(vec![sample_booking(1, BookingStatus::Pending)]);
    let mut dashboard = signed_in(&mock, DashboardSettings::default()).await;
    dashboard.select(1).unwrap();

    let updated = dashboard
        .apply_action(1, StatusAction::Confirm, Some(1500.0))
        .await
        .unwrap();

    assert_eq!(updated.status, BookingStatus::Confirmed);
    assert_eq!(updated.estimated_cost, Some(1500.0));
    assert!(dashboard.selected().is_none());
    assert_eq!(dashboard.bookings()[0].status, BookingStatus::Confirmed);
    assert!(mock.calls().contains(&MockCall::DashboardStats));
}

#[tokio::test]
async fn test_zero_quote_is_not_sent() {
    let mock = MockApi::new();
    mock.set_bookings(vec![sample_booking(4, BookingStatus::Confirmed)]);
    let mut dashboard = signed_in(&mock, DashboardSettings::default()).await;

    dashboard
        .apply_action(4, StatusAction::Complete, Some(0.0))
        .await
        .unwrap();

    let Some(MockCall::UpdateBooking { id, update }) = mock.calls().first().cloned() else {
        panic!("expected an update call first");
    };
    assert_eq!(id, 4);
    assert_eq!(update.status, Some(BookingStatus::Completed));
    assert_eq!(update.estimated_cost, None);
}

#[tokio::test]
async fn test_failed_update_sets_error() {
    let mock = MockApi::new();
    mock.set_bookings(vec![sample_booking(1, BookingStatus::Pending)]);
    mock.fail_updates(Some(server_error()));
    let mut dashboard = signed_in(&mock, DashboardSettings::default()).await;

    assert!(
        dashboard
            .apply_action(1, StatusAction::Cancel, None)
            .await
            .is_err()
    );

    assert_eq!(
        dashboard.error(),
        Some("Failed to update booking: Internal server error")
    );
    assert!(dashboard.is_authenticated());
    assert_eq!(mock.bookings()[0].status, BookingStatus::Pending);
}

#[tokio::test]
async fn test_unauthorized_update_signs_out() {
    let mock = MockApi::new();
    mock.set_bookings(vec![sample_booking(1, BookingStatus::Pending)]);
    mock.fail_updates(Some(unauthorized()));
    let mut dashboard = signed_in(&mock, DashboardSettings::default()).await;

    assert!(
        dashboard
            .apply_action(1, StatusAction::Confirm, None)
            .await
            .is_err()
    );

    assert!(!dashboard.is_authenticated());
    assert_eq!(dashboard.error(), Some(SESSION_EXPIRED));
}

#[tokio::test]
async fn test_filter_keeps_page_by_default() {
    let mock = MockApi::new();
    mock.set_bookings(bookings(8));
    let mut dashboard = signed_in(&mock, small_pages(false)).await;
    dashboard.set_page(2).await.unwrap();

    dashboard
        .set_filter(StatusFilter::Only(BookingStatus::Pending))
        .await
        .unwrap();

    assert_eq!(dashboard.page(), 2);
    let query = dashboard.query();
    assert_eq!(query.filter, StatusFilter::Only(BookingStatus::Pending));
    assert!(
        dashboard
            .bookings()
            .iter()
            .all(|b| b.status == BookingStatus::Pending)
    );
}

#[tokio::test]
async fn test_filter_can_reset_page() {
    let mock = MockApi::new();
    mock.set_bookings(bookings(8));
    let mut dashboard = signed_in(&mock, small_pages(true)).await;
    dashboard.set_page(3).await.unwrap();

    dashboard
        .set_filter(StatusFilter::Only(BookingStatus::Confirmed))
        .await
        .unwrap();

    assert_eq!(dashboard.page(), 1);
    assert_eq!(dashboard.bookings().iter().map(|b| b.id).collect::<Vec<_>>(), vec![2, 4]);
}

#[tokio::test]
async fn test_open_loads_once() {
    let mock = MockApi::new();
    mock.set_bookings(bookings(8));
    let mut dashboard = signed_in(&mock, small_pages(false)).await;

    dashboard
        .open(StatusFilter::Only(BookingStatus::Pending), 2)
        .await
        .unwrap();

    assert_eq!(dashboard.bookings().iter().map(|b| b.id).collect::<Vec<_>>(), vec![5, 7]);
    let lists = mock
        .calls()
        .into_iter()
        .filter(|call| matches!(call, MockCall::ListBookings(_)))
        .count();
    assert_eq!(lists, 1);
}

#[tokio::test]
async fn test_same_filter_does_not_reload() {
    let mock = MockApi::new();
    let mut dashboard = signed_in(&mock, DashboardSettings::default()).await;

    dashboard.set_filter(StatusFilter::All).await.unwrap();

    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_page_navigation_stops_at_edges() {
    let mock = MockApi::new();
    mock.set_bookings(bookings(5));
    let mut dashboard = signed_in(&mock, small_pages(false)).await;

    assert!(!dashboard.prev_page().await.unwrap());
    assert!(dashboard.next_page().await.unwrap());
    assert!(dashboard.next_page().await.unwrap());
    assert_eq!(dashboard.page(), 3);
    assert_eq!(dashboard.bookings().len(), 1);
    assert!(!dashboard.next_page().await.unwrap());
    assert!(dashboard.prev_page().await.unwrap());
    assert_eq!(dashboard.page(), 2);
}

#[tokio::test]
async fn test_locate_pages_until_found() {
    let mock = MockApi::new();
    mock.set_bookings(bookings(5));
    let mut dashboard = signed_in(&mock, small_pages(false)).await;

    let found = dashboard.locate(5).await.unwrap().id;

    assert_eq!(found, 5);
    assert_eq!(dashboard.page(), 3);
    assert_eq!(dashboard.selected().map(|b| b.id), Some(5));

    let err = dashboard.locate(42).await.unwrap_err();
    assert_eq!(err, DashboardError::UnknownBooking(42));
}

#[tokio::test]
async fn test_selection_dropped_when_booking_leaves_page() {
    let mock = MockApi::new();
    mock.set_bookings(bookings(4));
    let mut dashboard = signed_in(&mock, DashboardSettings::default()).await;
    dashboard.select(3).unwrap();

    mock.set_bookings(bookings(2));
    dashboard.refresh().await.unwrap();

    assert!(dashboard.selected().is_none());
}

#[test]
fn test_settings_come_from_config() {
    let mut config = tourbook_core::Config::default();
    config.api.per_page = 5;
    config.dashboard.reset_page_on_filter_change = true;

    let settings = DashboardSettings::from_config(&config);

    assert_eq!(
        settings,
        DashboardSettings {
            per_page: 5,
            reset_page_on_filter_change: true,
        }
    );
}

#[tokio::test]
async fn test_stats_panel_holds_backend_numbers() {
    let mock = MockApi::new();
    let mut stats = DashboardStats::default();
    stats.bookings.total = 12;
    stats.visits.daily = 4;
    mock.set_stats(Ok(stats.clone()));

    let dashboard = signed_in(&mock, DashboardSettings::default()).await;

    assert_eq!(dashboard.stats(), Some(&stats));
}
