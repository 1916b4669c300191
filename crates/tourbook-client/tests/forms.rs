//! Booking form, contact form and destination catalog controllers

#![allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)]

mod common;

use chrono::NaiveDate;
use common::{init_test_logging, today, valid_booking_form};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tourbook_client::booking::CONNECTION_FAILED;
use tourbook_client::catalog::LOAD_FAILED;
use tourbook_client::form::{INVALID_FORM, SERVER_FIELD_ERRORS};
use tourbook_client::mock::{offline, server_error};
use tourbook_client::{
    ApiError, BookingFormController, ContactFormController, DestinationCatalog, MockApi, MockCall,
    Notice,
};
use tourbook_protocol::{BookingForm, FieldErrors, FormField};
use tourbook_types::{BookingConfirmation, BookingStatus, CreateBookingRequest, ServerErrors};

fn rejected(errors: ServerErrors) -> ApiError {
    ApiError::Http {
        status: 400,
        message: "Validation failed".to_string(),
        errors,
    }
}

#[tokio::test]
async fn test_invalid_booking_is_not_sent() {
    init_test_logging();
    let mock = MockApi::new();
    let mut controller = BookingFormController::new(mock.clone());
    controller.fill(BookingForm {
        name: "J".to_string(),
        email: "not-an-email".to_string(),
        ..valid_booking_form()
    });

    let err = controller.submit(today()).await.unwrap_err();

    assert!(matches!(err, ApiError::Validation(ref fields) if fields.len() == 2));
    assert_eq!(
        controller.errors().get(FormField::Name),
        Some("Name must be at least 2 characters long")
    );
    assert_eq!(
        controller.errors().get(FormField::Email),
        Some("Please enter a valid email address")
    );
    assert_eq!(controller.notice(), Some(&Notice::Error(INVALID_FORM.to_string())));
    assert_eq!(mock.call_count(), 0);
}

#[rstest]
#[case::past_date(FormField::Date, "2026-10-18", "Please select a future date")]
#[case::too_many_guests(FormField::Guests, "51", "Maximum 50 guests allowed")]
#[case::zero_guests(FormField::Guests, "0", "Number of guests must be at least 1")]
#[case::short_phone(FormField::Phone, "12345", "Phone number should be 7-15 digits")]
#[tokio::test]
async fn test_single_rule_violation(
    #[case] field: FormField,
    #[case] value: &str,
    #[case] expected: &str,
) {
    let mock = MockApi::new();
    let mut controller = BookingFormController::new(mock.clone());
    controller.fill(valid_booking_form());
    controller.update_field(field, value);

    assert!(controller.submit(today()).await.is_err());

    assert_eq!(controller.errors().len(), 1);
    assert_eq!(controller.errors().get(field), Some(expected));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_editing_a_field_clears_its_error() {
    let mut controller = BookingFormController::new(MockApi::new());
    controller.fill(BookingForm {
        name: String::new(),
        ..valid_booking_form()
    });
    assert!(controller.submit(today()).await.is_err());
    assert!(controller.errors().contains(FormField::Name));

    controller.update_field(FormField::Name, "Jane");

    assert!(controller.errors().is_empty());
}

#[tokio::test]
async fn test_accepted_booking_resets_form() {
    let mock = MockApi::new();
    mock.set_booking_response(Ok(BookingConfirmation {
        booking_reference: "RT202610XY99ZZ".to_string(),
        status: BookingStatus::Pending,
    }));
    let mut controller = BookingFormController::new(mock.clone());
    controller.fill(valid_booking_form());

    let confirmation = controller.submit(today()).await.unwrap();

    assert_eq!(confirmation.booking_reference, "RT202610XY99ZZ");
    assert_eq!(controller.last_reference(), Some("RT202610XY99ZZ"));
    assert_eq!(
        controller.notice().map(Notice::text),
        Some(
            "Booking request submitted successfully! Your reference: RT202610XY99ZZ. \
             We'll contact you within 24 hours."
        )
    );
    assert_eq!(controller.form(), &BookingForm::default());

    assert_eq!(
        mock.calls(),
        vec![MockCall::CreateBooking(CreateBookingRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+254 700 123456".to_string(),
            destination: "maasai-mara-safari".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 12, 1),
            guests: 2,
            message: "Honeymoon trip".to_string(),
        })]
    );
}

#[tokio::test]
async fn test_server_field_errors_land_on_fields() {
    let mock = MockApi::new();
    mock.set_booking_response(Err(rejected(ServerErrors::Fields(
        [("email".to_string(), "Valid email address is required".to_string())]
            .into_iter()
            .collect(),
    ))));
    let mut controller = BookingFormController::new(mock);
    controller.fill(valid_booking_form());

    assert!(controller.submit(today()).await.is_err());

    assert_eq!(
        controller.errors(),
        &FieldErrors::new().with(FormField::Email, "Valid email address is required")
    );
    assert_eq!(
        controller.notice(),
        Some(&Notice::Error(SERVER_FIELD_ERRORS.to_string()))
    );
    assert_eq!(controller.form(), &valid_booking_form());
}

#[tokio::test]
async fn test_legacy_server_errors_stay_general() {
    let mock = MockApi::new();
    mock.set_booking_response(Err(rejected(ServerErrors::Messages(vec![
        "Valid email address is required".to_string(),
    ]))));
    let mut controller = BookingFormController::new(mock);
    controller.fill(valid_booking_form());

    assert!(controller.submit(today()).await.is_err());

    assert!(controller.errors().is_empty());
    assert_eq!(
        controller.general_errors(),
        ["Valid email address is required".to_string()]
    );
}

#[tokio::test]
async fn test_server_error_without_details_shows_message() {
    let mock = MockApi::new();
    mock.set_booking_response(Err(server_error()));
    let mut controller = BookingFormController::new(mock);
    controller.fill(valid_booking_form());

    assert!(controller.submit(today()).await.is_err());

    assert_eq!(
        controller.notice(),
        Some(&Notice::Error("Internal server error".to_string()))
    );
}

#[tokio::test]
async fn test_offline_booking_keeps_input() {
    let mock = MockApi::new();
    mock.set_booking_response(Err(offline()));
    let mut controller = BookingFormController::new(mock);
    controller.fill(valid_booking_form());

    let err = controller.submit(today()).await.unwrap_err();

    assert!(err.is_network());
    assert_eq!(
        controller.notice(),
        Some(&Notice::Offline(CONNECTION_FAILED.to_string()))
    );
    assert!(controller.notice().is_some_and(Notice::is_error));
    assert_eq!(controller.form(), &valid_booking_form());
    assert_eq!(controller.last_reference(), None);
}

#[tokio::test]
async fn test_contact_message_is_sent_trimmed() {
    let mock = MockApi::new();
    let mut controller = ContactFormController::new(mock.clone());
    controller.update_field(FormField::Name, " Jane ");
    controller.update_field(FormField::Email, "JANE@example.com");
    controller.update_field(FormField::Subject, "Dates");
    controller.update_field(FormField::Message, "  Is the Mara open in April?  ");

    let acknowledgement = controller.submit().await.unwrap();

    assert_eq!(acknowledgement, "Message sent successfully");
    assert_eq!(
        controller.notice(),
        Some(&Notice::Success("Message sent successfully".to_string()))
    );
    let Some(MockCall::SendContactMessage(request)) = mock.calls().first().cloned() else {
        panic!("expected a contact call");
    };
    assert_eq!(request.name, "Jane");
    assert_eq!(request.email, "jane@example.com");
    assert_eq!(request.message, "Is the Mara open in April?");
    assert!(controller.form().message.is_empty());
}

#[tokio::test]
async fn test_short_contact_message_is_rejected() {
    let mock = MockApi::new();
    let mut controller = ContactFormController::new(mock.clone());
    controller.update_field(FormField::Name, "Jane");
    controller.update_field(FormField::Email, "jane@example.com");
    controller.update_field(FormField::Message, "Hi");

    assert!(controller.submit().await.is_err());

    assert_eq!(
        controller.errors().get(FormField::Message),
        Some("Message must be at least 10 characters long")
    );
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_offline_contact_message() {
    let mock = MockApi::new();
    mock.set_contact_response(Err(offline()));
    let mut controller = ContactFormController::new(mock);
    controller.update_field(FormField::Name, "Jane");
    controller.update_field(FormField::Email, "jane@example.com");
    controller.update_field(FormField::Message, "Any space in December?");

    assert!(controller.submit().await.is_err());

    assert!(matches!(controller.notice(), Some(Notice::Offline(_))));
    assert_eq!(controller.form().name, "Jane");
}

#[tokio::test]
async fn test_catalog_uses_backend_list() {
    let mock = MockApi::new();
    let mut catalog = DestinationCatalog::new(mock.clone());

    let featured = catalog.load(true).await.len();

    assert!(featured > 0);
    assert!(catalog.destinations().iter().all(|d| d.is_featured));
    assert!(!catalog.is_fallback());
    assert_eq!(catalog.notice(), None);
    assert_eq!(
        mock.calls(),
        vec![MockCall::ListDestinations {
            featured_only: true
        }]
    );
}

#[tokio::test]
async fn test_catalog_falls_back_when_offline() {
    let mock = MockApi::new();
    mock.set_destinations(Err(offline()));
    let mut catalog = DestinationCatalog::new(mock);

    let all = catalog.load(false).await.len();

    assert_eq!(all, 6);
    assert!(catalog.is_fallback());
    assert_eq!(catalog.notice(), Some(LOAD_FAILED));

    let featured = catalog.load(true).await;
    assert_eq!(featured.len(), 2);
}

#[tokio::test]
async fn test_catalog_lookup_fallback_only_when_backend_down() {
    let down = MockApi::new();
    down.set_destinations(Err(server_error()));
    let catalog = DestinationCatalog::new(down);
    let slug = tourbook_protocol::DESTINATION_OPTIONS[0].slug;

    assert_eq!(catalog.find(slug).await.unwrap().slug, slug);
    assert_eq!(catalog.find("atlantis").await.unwrap_err(), server_error());

    let up = DestinationCatalog::new(MockApi::new());
    let err = up.find("atlantis").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}
