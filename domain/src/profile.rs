//! User profiles: a composite record made of independent field groups.
//!
//! A stored [`UserProfile`] is an identifier plus three groups
//! ([`PersonalInfo`], [`Address`], [`Preferences`]). The creation shape
//! ([`ProfileDraft`]) holds the same groups without an identifier. Both
//! serialize flat, every group field sitting next to `identifier`.
//!
//! Partial updates replace one whole group at a time through
//! [`UserProfile::merge`]; every field outside that group, and the identifier,
//! is carried over unchanged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::validation::validate_email;
use crate::{Composed, DomainError, Record};

/// Prefix of generated profile identifiers (`u001`, `u002`, ...).
pub const PROFILE_ID_PREFIX: &str = "u";
/// Zero-padded width of the counter part of a profile identifier.
pub const PROFILE_ID_WIDTH: usize = 3;

// --- Profile ID ---
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ProfileId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Field groups ---

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")] // "mg", "fr", "eng" on the wire
pub enum Language {
    Mg,
    Fr,
    Eng,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub birthdate: NaiveDate,
    pub email: String,
}

impl PersonalInfo {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_email("email", &self.email)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub address_street: String,
    pub address_city: String,
    pub address_country: String,
    pub address_postal_code: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub needs_newsletter: bool,
    pub language: Language,
}

/// Names one field group of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldGroup {
    PersonalInfo,
    Address,
    Preferences,
}

impl FieldGroup {
    /// Name used in update routes and logs.
    pub fn name(self) -> &'static str {
        match self {
            FieldGroup::PersonalInfo => "personalInfo",
            FieldGroup::Address => "address",
            FieldGroup::Preferences => "preferences",
        }
    }
}

impl fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A full replacement value for exactly one field group.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupUpdate {
    PersonalInfo(PersonalInfo),
    Address(Address),
    Preferences(Preferences),
}

impl GroupUpdate {
    pub fn group(&self) -> FieldGroup {
        match self {
            GroupUpdate::PersonalInfo(_) => FieldGroup::PersonalInfo,
            GroupUpdate::Address(_) => FieldGroup::Address,
            GroupUpdate::Preferences(_) => FieldGroup::Preferences,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            GroupUpdate::PersonalInfo(info) => info.validate(),
            GroupUpdate::Address(_) | GroupUpdate::Preferences(_) => Ok(()),
        }
    }
}

// --- Records ---

/// Creation input for a profile: all groups, no identifier yet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProfileDraft {
    #[serde(flatten)]
    pub personal_info: PersonalInfo,
    #[serde(flatten)]
    pub address: Address,
    #[serde(flatten)]
    pub preferences: Preferences,
}

impl ProfileDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        self.personal_info.validate()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub identifier: ProfileId,
    #[serde(flatten)]
    pub personal_info: PersonalInfo,
    #[serde(flatten)]
    pub address: Address,
    #[serde(flatten)]
    pub preferences: Preferences,
}

impl UserProfile {
    /// Returns a copy of this profile with one group replaced by `update`.
    ///
    /// The identifier and the other groups are cloned verbatim.
    pub fn merge(&self, update: GroupUpdate) -> UserProfile {
        let mut merged = self.clone();
        match update {
            GroupUpdate::PersonalInfo(info) => merged.personal_info = info,
            GroupUpdate::Address(address) => merged.address = address,
            GroupUpdate::Preferences(preferences) => merged.preferences = preferences,
        }
        merged
    }
}

impl Record for UserProfile {
    type Id = ProfileId;
    const KIND: &'static str = "User";

    fn id(&self) -> &ProfileId {
        &self.identifier
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "first_name" => Some(&self.personal_info.first_name),
            "last_name" => Some(&self.personal_info.last_name),
            "email" => Some(&self.personal_info.email),
            "address_city" => Some(&self.address.address_city),
            "address_country" => Some(&self.address.address_country),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), DomainError> {
        self.personal_info.validate()
    }
}

impl Composed for UserProfile {
    type Draft = ProfileDraft;

    fn compose(identifier: ProfileId, draft: ProfileDraft) -> Self {
        UserProfile {
            identifier,
            personal_info: draft.personal_info,
            address: draft.address,
            preferences: draft.preferences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    impl FieldGroup {
        const ALL: [FieldGroup; 3] = [
            FieldGroup::PersonalInfo,
            FieldGroup::Address,
            FieldGroup::Preferences,
        ];

        /// Wire names of the fields that belong to this group.
        fn fields(self) -> &'static [&'static str] {
            match self {
                FieldGroup::PersonalInfo => &["first_name", "last_name", "birthdate", "email"],
                FieldGroup::Address => &[
                    "address_street",
                    "address_city",
                    "address_country",
                    "address_postal_code",
                ],
                FieldGroup::Preferences => &["needs_newsletter", "language"],
            }
        }

        /// The group owning `field`, `None` for the identifier or unknown names.
        fn of_field(field: &str) -> Option<FieldGroup> {
            Self::ALL
                .into_iter()
                .find(|group| group.fields().contains(&field))
        }
    }

    impl UserProfile {
        /// Current value of one group, in the same shape an update would carry.
        fn group(&self, group: FieldGroup) -> GroupUpdate {
            match group {
                FieldGroup::PersonalInfo => GroupUpdate::PersonalInfo(self.personal_info.clone()),
                FieldGroup::Address => GroupUpdate::Address(self.address.clone()),
                FieldGroup::Preferences => GroupUpdate::Preferences(self.preferences.clone()),
            }
        }
    }

    fn draft(first_name: &str, city: &str) -> ProfileDraft {
        ProfileDraft {
            personal_info: PersonalInfo {
                first_name: first_name.to_string(),
                last_name: "Rabe".to_string(),
                birthdate: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
                email: format!("{}@example.com", first_name.to_lowercase()),
            },
            address: Address {
                address_street: "Lot II A".to_string(),
                address_city: city.to_string(),
                address_country: "Madagascar".to_string(),
                address_postal_code: 101,
            },
            preferences: Preferences {
                needs_newsletter: true,
                language: Language::Mg,
            },
        }
    }

    fn profile() -> UserProfile {
        UserProfile::compose(ProfileId::new("u001"), draft("Hery", "Antananarivo"))
    }

    /// Field-by-field view of a profile as it appears on the wire.
    fn wire_fields(profile: &UserProfile) -> serde_json::Map<String, Value> {
        match serde_json::to_value(profile).unwrap() {
            Value::Object(map) => map,
            other => panic!("expected an object, got {:?}", other),
        }
    }

    #[test]
    fn groups_are_disjoint_and_cover_every_field() {
        let fields = wire_fields(&profile());
        for name in fields.keys() {
            if name == "identifier" {
                assert_eq!(FieldGroup::of_field(name), None);
                continue;
            }
            let owners: Vec<_> = FieldGroup::ALL
                .into_iter()
                .filter(|g| g.fields().contains(&name.as_str()))
                .collect();
            assert_eq!(owners.len(), 1, "field '{}' owned by {:?}", name, owners);
        }
        let declared: usize = FieldGroup::ALL.iter().map(|g| g.fields().len()).sum();
        assert_eq!(declared + 1, fields.len());
    }

    #[test]
    fn merge_only_touches_the_target_group() {
        let original = profile();
        let updates = [
            GroupUpdate::PersonalInfo(draft("Soa", "X").personal_info),
            GroupUpdate::Address(draft("Soa", "Toamasina").address),
            GroupUpdate::Preferences(Preferences {
                needs_newsletter: false,
                language: Language::Eng,
            }),
        ];

        for update in updates {
            let group = update.group();
            let merged = original.merge(update.clone());
            assert_eq!(merged.identifier, original.identifier);
            assert_eq!(merged.group(group), update);

            let before = wire_fields(&original);
            let after = wire_fields(&merged);
            for (name, value) in &before {
                if FieldGroup::of_field(name) != Some(group) {
                    assert_eq!(after.get(name), Some(value), "field '{}' changed", name);
                }
            }
        }
    }

    #[test]
    fn address_update_keeps_personal_info_and_preferences() {
        let original = profile();
        let mut address = original.address.clone();
        address.address_city = "Fianarantsoa".to_string();

        let merged = original.merge(GroupUpdate::Address(address));
        assert_eq!(merged.address.address_city, "Fianarantsoa");
        assert_eq!(merged.personal_info, original.personal_info);
        assert_eq!(merged.preferences, original.preferences);
    }

    #[test]
    fn profile_serializes_flat() {
        let value = serde_json::to_value(profile()).unwrap();
        assert_eq!(value["identifier"], json!("u001"));
        assert_eq!(value["birthdate"], json!("1990-04-12"));
        assert_eq!(value["address_postal_code"], json!(101));
        assert_eq!(value["language"], json!("mg"));
        assert!(value.get("personal_info").is_none());
    }

    #[test]
    fn draft_deserializes_from_flat_payload() {
        let parsed: ProfileDraft = serde_json::from_value(json!({
            "first_name": "Hery",
            "last_name": "Rabe",
            "birthdate": "1990-04-12",
            "email": "hery@example.com",
            "address_street": "Lot II A",
            "address_city": "Antananarivo",
            "address_country": "Madagascar",
            "address_postal_code": 101,
            "needs_newsletter": true,
            "language": "mg"
        }))
        .unwrap();
        assert_eq!(parsed, draft("Hery", "Antananarivo"));
    }

    #[test]
    fn unknown_language_is_rejected() {
        let result = serde_json::from_value::<Preferences>(json!({
            "needs_newsletter": false,
            "language": "de"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn draft_validation_checks_email() {
        let mut bad = draft("Hery", "Antananarivo");
        bad.personal_info.email = "not-an-email".to_string();
        assert!(matches!(
            bad.validate(),
            Err(DomainError::InvalidFieldValue { field, .. }) if field == "email"
        ));
        assert!(draft("Hery", "Antananarivo").validate().is_ok());
    }
}
