//! The custom-order intake form and its step machine.
//!
//! The form is filled in over four linear steps. Navigation moves one step
//! at a time and clamps at both ends; there is no jump operation. Fields are
//! merged in as each page posts them, so advancing never loses data, and
//! required-field enforcement happens once, at final submission, for exactly
//! the three fields the order desk needs to follow up: name, email, and
//! design type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four steps of the custom-order wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Contact,
    Design,
    Measurements,
    Summary,
}

impl WizardStep {
    /// 1-based step number for progress display.
    #[must_use]
    pub const fn number(&self) -> u8 {
        match self {
            Self::Contact => 1,
            Self::Design => 2,
            Self::Measurements => 3,
            Self::Summary => 4,
        }
    }

    /// Heading shown above the step's fields.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Contact => "Personal Information",
            Self::Design => "Design Preferences",
            Self::Measurements => "Measurements & Details",
            Self::Summary => "Final Details & Submit",
        }
    }

    /// The next step, clamped at the terminal step.
    #[must_use]
    pub const fn next(&self) -> Self {
        match self {
            Self::Contact => Self::Design,
            Self::Design => Self::Measurements,
            Self::Measurements | Self::Summary => Self::Summary,
        }
    }

    /// The previous step, clamped at the first step.
    #[must_use]
    pub const fn back(&self) -> Self {
        match self {
            Self::Contact | Self::Design => Self::Contact,
            Self::Measurements => Self::Design,
            Self::Summary => Self::Measurements,
        }
    }

    /// Whether terminal submission is available from this step.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Summary)
    }
}

/// Free-text body measurements, in inches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Measurements {
    pub bust: String,
    pub waist: String,
    pub hips: String,
    pub length: String,
    pub sleeves: String,
}

/// A design-reference attachment.
///
/// Only the name and byte length are kept; file content is never uploaded
/// anywhere and appears in the outgoing message as a filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceFile {
    pub name: String,
    pub size_bytes: u64,
}

/// Fields whose absence blocks a terminal submission.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("missing required fields: {}", missing.join(", "))]
pub struct MissingFields {
    pub missing: Vec<&'static str>,
}

/// The whole custom-order form: buyer contact, design preferences,
/// measurements, attachments, and the current wizard step.
#[derive(Debug, Clone, Default)]
pub struct CustomOrderForm {
    pub name: String,
    pub email: String,
    pub phone: String,

    pub design_type: String,
    pub color: String,
    pub fabric: String,
    pub occasion: String,
    pub size: String,
    pub budget: String,
    pub timeline: String,
    pub special_requests: String,

    pub measurements: Measurements,
    pub files: Vec<ReferenceFile>,

    step: WizardStep,
}

impl CustomOrderForm {
    /// The step currently shown.
    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.step
    }

    /// Advance one step; a no-op at the terminal step.
    pub fn next_step(&mut self) {
        self.step = self.step.next();
    }

    /// Go back one step; a no-op at the first step.
    pub fn prev_step(&mut self) {
        self.step = self.step.back();
    }

    /// Append reference files. Attachment is additive: duplicates are kept
    /// and there is no removal operation.
    pub fn attach_files(&mut self, files: impl IntoIterator<Item = ReferenceFile>) {
        self.files.extend(files);
    }

    /// Check the fields required for submission: name, email, design type.
    ///
    /// Everything else on the form - including fields the pages mark as
    /// required - may be blank.
    ///
    /// # Errors
    ///
    /// Returns the list of missing field labels when any of the three is
    /// empty.
    pub fn validate_for_submit(&self) -> Result<(), MissingFields> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.design_type.trim().is_empty() {
            missing.push("design type");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MissingFields { missing })
        }
    }

    /// Reset the whole form to its initial empty state, step 1 included.
    /// Called unconditionally once a submission has been dispatched.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
