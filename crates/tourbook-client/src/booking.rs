//! Booking form controller

use crate::api::PublicApi;
use crate::error::{ApiError, ApiResult};
use crate::form::{INVALID_FORM, Notice, SERVER_FIELD_ERRORS};
use chrono::NaiveDate;
use tourbook_protocol::{BookingForm, FieldErrors, FormField};
use tourbook_types::BookingConfirmation;
use tracing::{debug, warn};

/// Shown when the backend cannot be reached
pub const CONNECTION_FAILED: &str =
    "Failed to submit booking. Please check your connection and try again.";

/// Drives the booking form: edits, validation, submission and feedback
#[derive(Debug)]
pub struct BookingFormController<A> {
    api: A,
    form: BookingForm,
    errors: FieldErrors,
    general_errors: Vec<String>,
    notice: Option<Notice>,
    last_reference: Option<String>,
}

impl<A: PublicApi> BookingFormController<A> {
    /// Empty form
    pub fn new(api: A) -> Self {
        Self {
            api,
            form: BookingForm::default(),
            errors: FieldErrors::new(),
            general_errors: Vec::new(),
            notice: None,
            last_reference: None,
        }
    }

    /// Current input
    pub const fn form(&self) -> &BookingForm {
        &self.form
    }

    /// Errors per field from the last submission
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Server messages that could not be tied to a field
    pub fn general_errors(&self) -> &[String] {
        &self.general_errors
    }

    /// Banner from the last submission
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Reference of the last accepted booking
    pub fn last_reference(&self) -> Option<&str> {
        self.last_reference.as_deref()
    }

    /// Change one input and drop its error
    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
        self.errors.clear(field);
    }

    /// Replace the whole input
    pub fn fill(&mut self, form: BookingForm) {
        self.form = form;
        self.errors.clear_all();
    }

    /// Validate and send the form
    ///
    /// Nothing is sent when validation fails. On success the form is reset
    /// and the notice carries the server-issued reference.
    pub async fn submit(&mut self, today: NaiveDate) -> ApiResult<BookingConfirmation> {
        self.notice = None;
        self.errors.clear_all();
        self.general_errors.clear();

        let request = match self.form.to_request(today) {
            Ok(request) => request,
            Err(errors) => {
                debug!(count = errors.len(), "booking form rejected locally");
                self.errors = errors.clone();
                self.notice = Some(Notice::Error(INVALID_FORM.to_string()));
                return Err(ApiError::Validation(errors));
            }
        };

        match self.api.create_booking(&request).await {
            Ok(confirmation) => {
                self.notice = Some(Notice::Success(format!(
                    "Booking request submitted successfully! Your reference: {}. \
                     We'll contact you within 24 hours.",
                    confirmation.booking_reference
                )));
                self.last_reference = Some(confirmation.booking_reference.clone());
                self.form = BookingForm::default();
                Ok(confirmation)
            }
            Err(err) => {
                warn!(error = %err, "booking submission failed");
                self.absorb_error(&err);
                Err(err)
            }
        }
    }

    fn absorb_error(&mut self, err: &ApiError) {
        let mapped = err.form_errors();
        self.notice = Some(if err.is_network() {
            Notice::Offline(CONNECTION_FAILED.to_string())
        } else if matches!(err, ApiError::Validation(_)) {
            Notice::Error(INVALID_FORM.to_string())
        } else if mapped.is_empty() {
            Notice::Error(err.to_string())
        } else {
            Notice::Error(SERVER_FIELD_ERRORS.to_string())
        });
        self.errors = mapped.fields;
        self.general_errors = mapped.general;
    }
}
