use payloads::{ClientError, FieldErrors};
use std::collections::BTreeMap;

/// Lifecycle of a section form. There is no terminal state: a form stays
/// editable for as long as it is mounted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    LoadingOptions,
    Ready,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Mounted,
    OptionsLoaded,
    Submit,
    SubmitFinished,
}

impl FormStatus {
    pub fn next(self, event: FormEvent) -> FormStatus {
        use FormEvent::*;
        use FormStatus::*;
        match (self, event) {
            (Idle, Mounted) => LoadingOptions,
            (LoadingOptions, OptionsLoaded) => Ready,
            (Ready, Submit) => Submitting,
            (Submitting, SubmitFinished) => Ready,
            (state, event) => {
                tracing::debug!(?state, ?event, "ignored form event");
                state
            }
        }
    }

    pub fn can_submit(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Self::LoadingOptions | Self::Submitting)
    }
}

/// Error messages currently shown next to a form's fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<String, String>,
    general: Option<String>,
}

impl FormErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn general(&self) -> Option<&str> {
        self.general.as_deref()
    }

    pub fn set(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.fields.insert(field.into(), message.into());
    }

    pub fn set_general(&mut self, message: impl Into<String>) {
        self.general = Some(message.into());
    }

    /// Apply a 422 response. Only the fields named in it change; each shows
    /// the first message reported for it.
    pub fn apply_validation(&mut self, errors: &FieldErrors) {
        for field in errors.fields() {
            if let Some(message) = errors.first(field) {
                self.fields.insert(field.to_string(), message.to_string());
            }
        }
    }

    /// A submit is starting. The general message goes; field errors stay
    /// until their field is edited, or the save succeeds.
    pub fn begin_submit(&mut self) {
        self.general = None;
    }

    /// Called when the user edits a field.
    pub fn clear_field(&mut self, field: &str) {
        self.fields.remove(field);
    }

    pub fn clear(&mut self) {
        self.fields.clear();
        self.general = None;
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// What a form should tell the user after a request finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Saved,
    /// Attach to the form's fields.
    Invalid(FieldErrors),
    /// The session is gone; route to the login view.
    SessionExpired,
    /// Show as a generic error toast.
    Failed(String),
}

impl Feedback {
    pub fn from_result<T>(result: &Result<T, ClientError>) -> Self {
        match result {
            Ok(_) => Self::Saved,
            Err(e) => Self::from_error(e),
        }
    }

    pub fn from_error(error: &ClientError) -> Self {
        match error {
            ClientError::Validation(errors) => Self::Invalid(errors.clone()),
            ClientError::Unauthorized => Self::SessionExpired,
            other => Self::Failed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::StatusCode;

    #[test]
    fn submit_cycle_returns_to_ready() {
        let status = FormStatus::Idle
            .next(FormEvent::Mounted)
            .next(FormEvent::OptionsLoaded);
        assert!(status.can_submit());
        let status = status.next(FormEvent::Submit);
        assert_eq!(status, FormStatus::Submitting);
        assert!(!status.can_submit());
        // a second submit while one is in flight is ignored
        assert_eq!(status.next(FormEvent::Submit), FormStatus::Submitting);
        assert_eq!(status.next(FormEvent::SubmitFinished), FormStatus::Ready);
    }

    #[test]
    fn submit_before_options_is_ignored() {
        let status = FormStatus::Idle.next(FormEvent::Mounted);
        assert_eq!(status.next(FormEvent::Submit), FormStatus::LoadingOptions);
    }

    #[test]
    fn validation_only_touches_named_fields() {
        let mut errors = FormErrors::default();
        errors.set("check_in", "required");
        errors.set("capacity", "old message");

        let mut fields = BTreeMap::new();
        fields.insert("capacity".to_string(), vec!["too low".to_string()]);
        errors.apply_validation(&FieldErrors(fields));

        assert_eq!(errors.get("capacity"), Some("too low"));
        assert_eq!(errors.get("check_in"), Some("required"));
        assert_eq!(errors.get("max_capacity"), None);
    }

    #[test]
    fn rejected_resubmit_keeps_untouched_field_errors() {
        let mut errors = FormErrors::default();
        errors.set("min_stay", "must be at least 1");
        errors.set("capacity", "too low");
        errors.set_general("Request failed");

        errors.begin_submit();
        errors.clear_field("capacity");
        assert_eq!(errors.general(), None);

        let mut fields = BTreeMap::new();
        fields.insert("max_stay".to_string(), vec!["too long".to_string()]);
        errors.apply_validation(&FieldErrors(fields));

        assert_eq!(errors.get("min_stay"), Some("must be at least 1"));
        assert_eq!(errors.get("max_stay"), Some("too long"));
        assert_eq!(errors.get("capacity"), None);
    }

    #[test]
    fn feedback_classifies_errors() {
        assert_eq!(
            Feedback::from_error(&ClientError::Unauthorized),
            Feedback::SessionExpired
        );
        let invalid = ClientError::Validation(FieldErrors::default());
        assert!(matches!(
            Feedback::from_error(&invalid),
            Feedback::Invalid(_)
        ));
        let other = ClientError::APIError(
            StatusCode::CREATED,
            "created".into(),
        );
        assert_eq!(
            Feedback::from_error(&other),
            Feedback::Failed("created".into())
        );
    }
}
