use chrono::{DateTime, Utc};
use serde_json::Value;

use super::errors::{AddressCorrection, SaveError};
use super::section::Section;
use crate::common::{FieldErrorMap, SectionData};

/// Last-known-good copy of a section, restored on rollback or cancel.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSnapshot {
    pub data: SectionData,
    pub taken_at: DateTime<Utc>,
}

impl SectionSnapshot {
    pub fn capture(data: &SectionData) -> Self {
        Self {
            data: data.clone(),
            taken_at: Utc::now(),
        }
    }
}

/// One section's editable copy plus the snapshot it can fall back to.
#[derive(Debug, Clone)]
pub struct EditableSection {
    section: Section,
    data: SectionData,
    snapshot: SectionSnapshot,
    editing: bool,
    field_errors: FieldErrorMap,
}

impl EditableSection {
    /// Start from data as loaded from the server.
    pub fn new(section: Section, server_data: SectionData) -> Self {
        Self {
            section,
            snapshot: SectionSnapshot::capture(&server_data),
            data: server_data,
            editing: false,
            field_errors: FieldErrorMap::new(),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn data(&self) -> &SectionData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut SectionData {
        &mut self.data
    }

    pub fn snapshot(&self) -> &SectionSnapshot {
        &self.snapshot
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn field_errors(&self) -> &FieldErrorMap {
        &self.field_errors
    }

    /// Enter edit mode, snapshotting the current values.
    pub fn begin_edit(&mut self) {
        self.snapshot = SectionSnapshot::capture(&self.data);
        self.editing = true;
        self.field_errors.clear();
    }

    pub fn set_field(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(field.into(), value.into());
    }

    /// Throw away edits.
    pub fn cancel_edit(&mut self) {
        self.data = self.snapshot.data.clone();
        self.editing = false;
        self.field_errors.clear();
    }

    pub(crate) fn set_field_errors(&mut self, errors: FieldErrorMap) {
        self.field_errors = errors;
    }

    pub(crate) fn clear_field_errors(&mut self) {
        self.field_errors.clear();
    }

    /// Saved: the persisted payload becomes the new last-known-good.
    pub(crate) fn commit(&mut self, cleaned: SectionData) {
        self.snapshot = SectionSnapshot::capture(&cleaned);
        self.data = cleaned;
        self.editing = false;
    }

    /// Save failed: every field goes back to the snapshot.
    pub(crate) fn rollback(&mut self) {
        self.data = self.snapshot.data.clone();
        self.editing = false;
    }
}

/// How a save attempt treats address verification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SaveMode {
    /// Verify every in-scope address before persisting
    #[default]
    Validate,
    /// Rewrite the addresses with these suggestions, then persist
    AcceptSuggestions(Vec<AddressCorrection>),
    /// Persist without verification ("save anyway")
    Force,
}

/// Result of one `save` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Saved. `suggestions` lists deliverable addresses the service would
    /// format differently; they were saved as entered.
    Success { suggestions: Vec<AddressCorrection> },
    /// Saved, but the API reported problems with some fields
    PartialSuccess {
        errors: Vec<String>,
        suggestions: Vec<AddressCorrection>,
    },
    Failure(SaveError),
    /// Another save for this section is in flight; nothing was done
    AlreadySaving,
}

impl SaveOutcome {
    /// Data was committed.
    pub fn is_saved(&self) -> bool {
        matches!(
            self,
            SaveOutcome::Success { .. } | SaveOutcome::PartialSuccess { .. }
        )
    }

    /// Formatting suggestions for addresses that were saved as entered.
    pub fn suggestions(&self) -> &[AddressCorrection] {
        match self {
            SaveOutcome::Success { suggestions }
            | SaveOutcome::PartialSuccess { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&SaveError> {
        match self {
            SaveOutcome::Failure(error) => Some(error),
            _ => None,
        }
    }
}

/// Where an in-flight save currently is. Absent means idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SavePhase {
    Validating,
    AddressCheck,
    Persisting,
}
