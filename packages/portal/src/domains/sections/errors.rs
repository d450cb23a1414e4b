use serde::Serialize;
use thiserror::Error;

use crate::common::{Address, AddressKind, FieldErrorMap};

/// A correction the verification service proposed for one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressCorrection {
    pub kind: AddressKind,
    pub original: Address,
    pub suggested: Address,
}

/// Why a save attempt stopped. All are scoped to one section.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    #[error("Please fill in all required fields")]
    RequiredFieldMissing { fields: FieldErrorMap },

    #[error("We couldn't reach the address verification service ({message}). Save anyway?")]
    AddressServiceUnavailable { kind: AddressKind, message: String },

    #[error("We couldn't verify your {kind} address: {reason}. Save anyway?")]
    AddressUnverifiable { kind: AddressKind, reason: String },

    #[error("We found a suggested correction for your address")]
    AddressCorrectionPending { corrections: Vec<AddressCorrection> },

    #[error("{message}")]
    PersistenceFailed { message: String },
}

impl SaveError {
    pub fn code(&self) -> &'static str {
        match self {
            SaveError::RequiredFieldMissing { .. } => "RequiredFieldMissing",
            SaveError::AddressServiceUnavailable { .. } => "AddressServiceUnavailable",
            SaveError::AddressUnverifiable { .. } => "AddressUnverifiable",
            SaveError::AddressCorrectionPending { .. } => "AddressCorrectionPending",
            SaveError::PersistenceFailed { .. } => "PersistenceFailed",
        }
    }

    /// The member can fix this in place: edit and retry, force, or accept a suggestion.
    pub fn is_recoverable(&self) -> bool {
        !self.triggers_rollback()
    }

    pub fn triggers_rollback(&self) -> bool {
        matches!(self, SaveError::PersistenceFailed { .. })
    }

    /// Whether "save anyway" is offered.
    pub fn allows_force(&self) -> bool {
        matches!(
            self,
            SaveError::AddressServiceUnavailable { .. }
                | SaveError::AddressUnverifiable { .. }
                | SaveError::AddressCorrectionPending { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_distinct() {
        let errors = [
            SaveError::RequiredFieldMissing {
                fields: FieldErrorMap::new(),
            },
            SaveError::AddressServiceUnavailable {
                kind: AddressKind::Home,
                message: "Invalid API key".into(),
            },
            SaveError::AddressUnverifiable {
                kind: AddressKind::Mailing,
                reason: "The street could not be found".into(),
            },
            SaveError::AddressCorrectionPending {
                corrections: Vec::new(),
            },
            SaveError::PersistenceFailed {
                message: "Failed to save addresses. Please try again.".into(),
            },
        ];

        let messages: std::collections::HashSet<String> =
            errors.iter().map(|e| e.to_string()).collect();
        assert_eq!(messages.len(), errors.len());
        assert_eq!(
            errors[2].to_string(),
            "We couldn't verify your mailing address: The street could not be found. Save anyway?"
        );
    }

    #[test]
    fn test_only_persistence_failures_roll_back() {
        let persistence = SaveError::PersistenceFailed {
            message: "boom".into(),
        };
        assert!(persistence.triggers_rollback());
        assert!(!persistence.is_recoverable());
        assert!(!persistence.allows_force());

        let missing = SaveError::RequiredFieldMissing {
            fields: FieldErrorMap::new(),
        };
        assert!(missing.is_recoverable());
        assert!(!missing.allows_force());
    }
}
