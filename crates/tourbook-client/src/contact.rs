//! Contact form controller

use crate::api::PublicApi;
use crate::error::{ApiError, ApiResult};
use crate::form::{INVALID_FORM, Notice, SERVER_FIELD_ERRORS};
use tourbook_protocol::{ContactForm, FieldErrors, FormField};
use tracing::warn;

/// Shown when the backend cannot be reached
pub const CONNECTION_FAILED: &str =
    "Failed to send message. Please check your connection and try again.";

/// Drives the contact form
#[derive(Debug)]
pub struct ContactFormController<A> {
    api: A,
    form: ContactForm,
    errors: FieldErrors,
    general_errors: Vec<String>,
    notice: Option<Notice>,
}

impl<A: PublicApi> ContactFormController<A> {
    /// Empty form
    pub fn new(api: A) -> Self {
        Self {
            api,
            form: ContactForm::default(),
            errors: FieldErrors::new(),
            general_errors: Vec::new(),
            notice: None,
        }
    }

    /// Current input
    pub const fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Errors per field
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Unattributed server messages
    pub fn general_errors(&self) -> &[String] {
        &self.general_errors
    }

    /// Banner from the last submission
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Change one input and drop its error
    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
        self.errors.clear(field);
    }

    /// Replace the whole input
    pub fn fill(&mut self, form: ContactForm) {
        self.form = form;
        self.errors.clear_all();
    }

    /// Validate and send; the form is cleared once the server accepts it
    pub async fn submit(&mut self) -> ApiResult<String> {
        self.notice = None;
        self.errors.clear_all();
        self.general_errors.clear();

        let request = match self.form.to_request() {
            Ok(request) => request,
            Err(errors) => {
                self.errors = errors.clone();
                self.notice = Some(Notice::Error(INVALID_FORM.to_string()));
                return Err(ApiError::Validation(errors));
            }
        };

        match self.api.send_contact_message(&request).await {
            Ok(acknowledgement) => {
                self.notice = Some(Notice::Success(acknowledgement.clone()));
                self.form = ContactForm::default();
                Ok(acknowledgement)
            }
            Err(err) => {
                warn!(error = %err, "contact message failed");
                let mapped = err.form_errors();
                self.notice = Some(if err.is_network() {
                    Notice::Offline(CONNECTION_FAILED.to_string())
                } else if mapped.is_empty() {
                    Notice::Error(err.to_string())
                } else {
                    Notice::Error(SERVER_FIELD_ERRORS.to_string())
                });
                self.errors = mapped.fields;
                self.general_errors = mapped.general;
                Err(err)
            }
        }
    }
}
