//! Section save orchestration.
//!
//! One `save` call walks a section through required-field validation, address
//! verification and persistence. Failures come back as `SaveOutcome::Failure`;
//! only a persistence failure (a missing session included) rolls the section
//! back to its snapshot.

use tracing::{error, info, warn};

use super::errors::{AddressCorrection, SaveError};
use super::guard::SavingSections;
use super::models::{EditableSection, SaveMode, SaveOutcome, SavePhase};
use super::section::Section;
use crate::common::{clean_section_data, Address, AddressKind, FieldErrorMap, SectionData};
use crate::domains::addresses::{AddressValidator, ValidationResult};
use crate::kernel::PortalDeps;

pub const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";

/// Coordinates saves for every section of one member's record.
#[derive(Clone)]
pub struct SectionSaveCoordinator {
    deps: PortalDeps,
    validator: AddressValidator,
    saving: SavingSections,
}

impl SectionSaveCoordinator {
    pub fn new(deps: PortalDeps) -> Self {
        Self {
            validator: AddressValidator::new(deps.address_verifier.clone()),
            deps,
            saving: SavingSections::new(),
        }
    }

    /// Phase of the save running for `section`, `None` when idle.
    pub fn phase(&self, section: Section) -> Option<SavePhase> {
        self.saving.phase(section)
    }

    pub async fn save<S: AsRef<str>>(
        &self,
        editable: &mut EditableSection,
        required_fields: &[S],
        mode: SaveMode,
    ) -> SaveOutcome {
        let section = editable.section();
        let Some(guard) = self.saving.try_begin(section) else {
            info!(section = %section, "Save already in progress, ignoring request");
            return SaveOutcome::AlreadySaving;
        };

        editable.clear_field_errors();

        if let SaveMode::AcceptSuggestions(corrections) = &mode {
            for correction in corrections {
                info!(
                    section = %section,
                    kind = %correction.kind,
                    suggested = %correction.suggested.one_line(),
                    "Applying suggested address"
                );
                correction
                    .suggested
                    .write_to_section(editable.data_mut(), correction.kind);
            }
        }

        let field_errors = required_field_errors(section, editable.data(), required_fields);
        if !field_errors.is_empty() {
            info!(
                section = %section,
                missing = field_errors.len(),
                "Save blocked by missing required fields"
            );
            editable.set_field_errors(field_errors.clone());
            return SaveOutcome::Failure(SaveError::RequiredFieldMissing {
                fields: field_errors,
            });
        }

        let token = match self.deps.auth.bearer_token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                warn!(section = %section, "No active session, rolling back");
                editable.rollback();
                return persistence_failed(SESSION_EXPIRED.to_string());
            }
            Err(e) => {
                warn!(section = %section, error = %e, "Failed to obtain auth token, rolling back");
                editable.rollback();
                return persistence_failed(SESSION_EXPIRED.to_string());
            }
        };

        let mut suggestions = Vec::new();
        if mode == SaveMode::Validate {
            let addresses = addresses_in_scope(section, editable.data());
            if !addresses.is_empty() {
                guard.advance(SavePhase::AddressCheck);
                match self.check_addresses(section, addresses).await {
                    Ok(found) => suggestions = found,
                    Err(e) => {
                        info!(section = %section, reason = e.code(), "Save paused for address review");
                        return SaveOutcome::Failure(e);
                    }
                }
            }
        } else {
            info!(section = %section, "Skipping address verification at member's request");
        }

        guard.advance(SavePhase::Persisting);
        self.persist(editable, &token, suggestions).await
    }

    /// Verify each address in order and fold the results.
    ///
    /// Precedence: service error, then undeliverable, then pending corrections.
    /// Deliverable addresses the service reformatted come back as suggestions.
    async fn check_addresses(
        &self,
        section: Section,
        addresses: Vec<(AddressKind, Address)>,
    ) -> Result<Vec<AddressCorrection>, SaveError> {
        let mut unavailable = None;
        let mut unverifiable = None;
        let mut corrections = Vec::new();
        let mut suggestions = Vec::new();

        for (kind, address) in addresses {
            match self.validator.validate(&address, kind).await {
                ValidationResult::Deliverable {
                    normalized,
                    is_different: true,
                } => {
                    info!(
                        section = %section,
                        kind = %kind,
                        suggested = %normalized.one_line(),
                        "Address deliverable with formatting differences"
                    );
                    suggestions.push(AddressCorrection {
                        kind,
                        original: address,
                        suggested: normalized,
                    });
                }
                ValidationResult::Deliverable { .. } => {}
                ValidationResult::CorrectionAvailable {
                    original,
                    suggested,
                } => corrections.push(AddressCorrection {
                    kind,
                    original,
                    suggested,
                }),
                ValidationResult::Undeliverable { reason } => {
                    warn!(section = %section, kind = %kind, reason = %reason, "Address undeliverable");
                    unverifiable.get_or_insert(SaveError::AddressUnverifiable { kind, reason });
                }
                ValidationResult::ServiceError { message } => {
                    warn!(section = %section, kind = %kind, message = %message, "Address service error");
                    unavailable.get_or_insert(SaveError::AddressServiceUnavailable { kind, message });
                }
            }
        }

        if let Some(e) = unavailable.or(unverifiable) {
            return Err(e);
        }
        if !corrections.is_empty() {
            return Err(SaveError::AddressCorrectionPending { corrections });
        }
        Ok(suggestions)
    }

    async fn persist(
        &self,
        editable: &mut EditableSection,
        token: &str,
        suggestions: Vec<AddressCorrection>,
    ) -> SaveOutcome {
        let section = editable.section();
        let cleaned = clean_section_data(editable.data(), section.address_kinds());

        match self
            .deps
            .member_api
            .update_section(token, section, &cleaned)
            .await
        {
            Ok(response) if response.success => {
                editable.commit(cleaned);
                if response.is_partial() {
                    let errors = response.errors.unwrap_or_default();
                    warn!(section = %section, errors = errors.len(), "Section partially saved");
                    SaveOutcome::PartialSuccess {
                        errors,
                        suggestions,
                    }
                } else {
                    info!(section = %section, "Section saved");
                    SaveOutcome::Success { suggestions }
                }
            }
            Ok(response) => {
                error!(
                    section = %section,
                    error = response.error.as_deref().unwrap_or("unknown"),
                    "Member API rejected save, rolling back"
                );
                editable.rollback();
                persistence_failed(
                    response
                        .error
                        .unwrap_or_else(|| default_failure_message(section)),
                )
            }
            Err(e) => {
                error!(section = %section, error = %e, "Failed to save section, rolling back");
                editable.rollback();
                persistence_failed(default_failure_message(section))
            }
        }
    }
}

fn persistence_failed(message: String) -> SaveOutcome {
    SaveOutcome::Failure(SaveError::PersistenceFailed { message })
}

pub(crate) fn default_failure_message(section: Section) -> String {
    format!("Failed to save {}. Please try again.", section.display_name())
}

/// Addresses that take part in verification: not aliased and not left blank.
pub fn addresses_in_scope(section: Section, data: &SectionData) -> Vec<(AddressKind, Address)> {
    section
        .address_kinds()
        .iter()
        .filter(|kind| !kind.is_aliased(data))
        .map(|kind| (*kind, Address::from_section(data, *kind)))
        .filter(|(_, address)| !address.is_empty())
        .collect()
}

/// Required fields plus every blank component of a partly filled address.
pub fn required_field_errors<S: AsRef<str>>(
    section: Section,
    data: &SectionData,
    required_fields: &[S],
) -> FieldErrorMap {
    let mut errors = FieldErrorMap::from_required(data, required_fields);
    for (kind, address) in addresses_in_scope(section, data) {
        for suffix in address.missing_required() {
            errors.insert_required(&kind.field(suffix));
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: serde_json::Value) -> SectionData {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_aliased_and_blank_addresses_are_out_of_scope() {
        let addresses = data(json!({
            "homeStreet": "123 Main St",
            "homeCity": "New York",
            "sameAsHome": true,
            "mailingStreet": "PO Box 1",
        }));
        let in_scope = addresses_in_scope(Section::Addresses, &addresses);
        assert_eq!(in_scope.len(), 1);
        assert_eq!(in_scope[0].0, AddressKind::Home);

        let blank = data(json!({ "homeStreet": " ", "sameAsHome": false }));
        assert!(addresses_in_scope(Section::Addresses, &blank).is_empty());
    }

    #[test]
    fn test_partial_address_reports_missing_components() {
        let addresses = data(json!({
            "homeStreet": "123 Main St",
            "homeCity": "New York",
        }));
        let errors = required_field_errors(Section::Addresses, &addresses, &["homeStreet"]);
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["homePostalCode", "homeState"]
        );
        assert_eq!(errors.get("homeState"), Some("Home state is required"));
    }
}
