//! Contact-form state and the synchronous accept-or-reject check.

pub const MISSING_FIELDS_NOTICE: &str = "Please fill in all fields before submitting.";

/// Result of a submission attempt. Rejections leave the fields untouched;
/// acceptance clears them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted { notice: String },
    Rejected { notice: String },
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
}

impl ContactForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite all fields with the values read from the page at submit time.
    pub fn fill(&mut self, name: &str, email: &str, message: &str) {
        self.name = name.to_owned();
        self.email = email.to_owned();
        self.message = message.to_owned();
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Attempt to submit: all three fields must be non-empty after trimming.
    pub fn submit(&mut self) -> SubmitOutcome {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return SubmitOutcome::Rejected {
                notice: MISSING_FIELDS_NOTICE.to_owned(),
            };
        }

        let notice = format!("Thank you for your message, {name}! We'll get back to you soon.");
        self.reset();
        SubmitOutcome::Accepted { notice }
    }

    /// Clear all fields, as the page does after an accepted submission.
    pub fn reset(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }
}
