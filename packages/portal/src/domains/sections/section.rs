use serde::{Deserialize, Serialize};

use crate::common::AddressKind;

/// A named, independently saved part of the member record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    PersonalInfo,
    ContactInfo,
    Addresses,
    FamilyInfo,
    Occupation,
    MedicalInfo,
    CryoArrangements,
    EmergencyContact,
    LegalWill,
    Settings,
}

impl Section {
    pub const ALL: [Section; 10] = [
        Section::PersonalInfo,
        Section::ContactInfo,
        Section::Addresses,
        Section::FamilyInfo,
        Section::Occupation,
        Section::MedicalInfo,
        Section::CryoArrangements,
        Section::EmergencyContact,
        Section::LegalWill,
        Section::Settings,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Section::PersonalInfo => "personal information",
            Section::ContactInfo => "contact information",
            Section::Addresses => "addresses",
            Section::FamilyInfo => "family information",
            Section::Occupation => "occupation",
            Section::MedicalInfo => "medical information",
            Section::CryoArrangements => "cryopreservation arrangements",
            Section::EmergencyContact => "emergency contact",
            Section::LegalWill => "legal/will information",
            Section::Settings => "settings",
        }
    }

    /// Member API endpoint that persists this section.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Section::PersonalInfo => "updateMemberPersonalInfo",
            Section::ContactInfo => "updateMemberContactInfo",
            Section::Addresses => "updateMemberAddresses",
            Section::FamilyInfo => "updateMemberFamilyInfo",
            Section::Occupation => "updateMemberOccupation",
            Section::MedicalInfo => "updateMemberMedicalInfo",
            Section::CryoArrangements => "updateMemberCryoArrangements",
            Section::EmergencyContact => "updateMemberEmergencyContact",
            Section::LegalWill => "updateMemberLegalWill",
            Section::Settings => "updateSettings",
        }
    }

    /// Postal addresses carried by this section, in verification order.
    pub fn address_kinds(&self) -> &'static [AddressKind] {
        match self {
            Section::Addresses => &[AddressKind::Home, AddressKind::Mailing],
            Section::CryoArrangements => &[AddressKind::Recipient],
            _ => &[],
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
