use std::fmt;
use std::hash::Hash;
use thiserror::Error; // For domain-specific errors

pub mod identity;
pub mod profile;
pub mod query;
pub mod resources;
mod validation;

pub use identity::{IdentityAssigner, PrefixedCounter};
pub use profile::{
    Address, FieldGroup, GroupUpdate, Language, PersonalInfo, Preferences, ProfileDraft, ProfileId,
    UserProfile,
};
pub use query::{TextFilter, Window};
pub use resources::{Order, Product, Task, User};

// --- Domain Errors ---
#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    #[error("Invalid field value for field '{field}': {reason}")]
    InvalidFieldValue { field: String, reason: String },
}

impl DomainError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        DomainError::InvalidFieldValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

// --- Records ---

/// A single entity held by a collection store.
///
/// Exactly one field (or computed key) acts as the identity, and a store never
/// holds two records with equal identities.
pub trait Record: fmt::Debug + Clone + Send + Sync + 'static {
    type Id: Clone + Eq + Hash + fmt::Display + fmt::Debug + Send + Sync + 'static;

    /// Resource name used in log fields and error messages ("Task", "User", ...).
    const KIND: &'static str;

    fn id(&self) -> &Self::Id;

    /// Value of a searchable text field, `None` when the record has no such field.
    fn text_field(&self, _name: &str) -> Option<&str> {
        None
    }

    /// Checks field contents before the record reaches a store.
    fn validate(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

/// A record built from an identity-less creation draft once an identity has
/// been generated for it.
pub trait Composed: Record {
    type Draft: fmt::Debug + Send + 'static;

    fn compose(id: Self::Id, draft: Self::Draft) -> Self;
}
