use async_trait::async_trait;
use domain::{Composed, DomainError, IdentityAssigner, Record, TextFilter, Window};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

mod services;

pub use services::{OrderService, ProfileService, ResourceService};

/// Upper bound on any page or limit when none is configured.
pub const DEFAULT_MAX_PAGE_SIZE: usize = 1000;

// --- Application Errors ---
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{kind} not found")]
    NotFound { kind: &'static str, id: String },
    #[error("{kind} with identity '{id}' already exists")]
    DuplicateIdentity { kind: &'static str, id: String },
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Domain validation error: {0}")]
    DomainError(#[from] DomainError), // Propagate domain errors cleanly
}

impl ApplicationError {
    pub fn not_found<R: Record>(id: &R::Id) -> Self {
        ApplicationError::NotFound {
            kind: R::KIND,
            id: id.to_string(),
        }
    }

    pub fn duplicate<R: Record>(id: &R::Id) -> Self {
        ApplicationError::DuplicateIdentity {
            kind: R::KIND,
            id: id.to_string(),
        }
    }
}

// --- Infrastructure Interfaces (Traits) ---

/// Computes the replacement for a stored record from its current value.
pub type RecordUpdate<R> = Box<dyn for<'a> FnOnce(&'a R) -> R + Send>;

/// An ordered, identity-unique collection of records.
///
/// Order is insertion order. Implementations make every read-modify-write
/// call atomic with respect to other calls on the same collection.
#[async_trait]
pub trait CollectionRepository<R: Record>: Send + Sync {
    /// Records matching `filter` (all when `None`), in store order, sliced by `window`.
    async fn list(
        &self,
        filter: Option<&TextFilter>,
        window: Window,
    ) -> Result<Vec<R>, ApplicationError>;
    async fn find(&self, id: &R::Id) -> Result<Option<R>, ApplicationError>;
    /// Appends at the end. Fails with `DuplicateIdentity` and leaves the
    /// collection untouched if the identity is taken.
    async fn append(&self, record: R) -> Result<R, ApplicationError>;
    /// Appends in input order. A duplicate anywhere in the batch, against the
    /// collection or within the batch itself, rejects the whole batch.
    async fn append_all(&self, records: Vec<R>) -> Result<Vec<R>, ApplicationError>;
    /// Removes and returns the record with `id`; the rest keep their order.
    async fn remove_by_id(&self, id: &R::Id) -> Result<Option<R>, ApplicationError>;
    /// Removes every record whose identity is in `ids` and returns them in
    /// store order. Unknown ids are ignored.
    async fn remove_where(&self, ids: &[R::Id]) -> Result<Vec<R>, ApplicationError>;
    /// Replaces the record with `id` by `update(&current)` at the same position.
    async fn replace_with(
        &self,
        id: &R::Id,
        update: RecordUpdate<R>,
    ) -> Result<Option<R>, ApplicationError>;
}

/// A collection that generates identities for the records it creates.
#[async_trait]
pub trait SequencedRepository<R: Composed>: CollectionRepository<R> {
    /// Composes and appends one record per draft, in input order. The i-th
    /// draft receives `assigner.assign(n + i)` where `n` counts every record
    /// ever appended to the collection.
    async fn append_composed(
        &self,
        drafts: Vec<R::Draft>,
        assigner: &dyn IdentityAssigner<R::Id>,
    ) -> Result<Vec<R>, ApplicationError>;
}

/// Username/password pair presented on order creation.
#[derive(Deserialize, Clone, Default)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Capability check consulted before protected writes.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorize(&self, credentials: &Credentials) -> bool;
}

// --- Request/Response Models (Data Transfer Objects - DTOs) ---

/// `?page=&size=` query parameters. Signed so that bad input reaches the
/// clamping policy instead of failing extraction.
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_size(),
        }
    }
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    20 // Default page size
}

/// `?limit=&q=` query parameters of the product search.
#[derive(Deserialize, Debug, Clone)]
pub struct SearchQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub q: Option<String>,
}

fn default_limit() -> i64 {
    10
}

/// A create payload: a single record or a sequence of them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn is_one(&self) -> bool {
        matches!(self, OneOrMany::One(_))
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }

    /// Wraps `items` back into the shape of the request they answer.
    pub fn shaped(one: bool, mut items: Vec<T>) -> Self {
        if one && items.len() == 1 {
            OneOrMany::One(items.remove(0))
        } else {
            OneOrMany::Many(items)
        }
    }
}
