use domain::{
    GroupUpdate, IdentityAssigner, Order, ProfileDraft, ProfileId, Record, TextFilter,
    UserProfile, Window,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::{
    ApplicationError, Authorizer, CollectionRepository, Credentials, PageQuery, SearchQuery,
    SequencedRepository,
};

// --- Application Services (Use Cases) ---

/// List/get/create/delete over one collection.
pub struct ResourceService<R: Record> {
    repo: Arc<dyn CollectionRepository<R>>,
    max_page_size: usize,
}

impl<R: Record> ResourceService<R> {
    pub fn new(repo: Arc<dyn CollectionRepository<R>>, max_page_size: usize) -> Self {
        Self {
            repo,
            max_page_size,
        }
    }

    /// One page of the collection, in insertion order.
    #[instrument(skip(self), fields(kind = R::KIND))]
    pub async fn list_page(&self, query: PageQuery) -> Result<Vec<R>, ApplicationError> {
        let window = Window::page(query.page, query.size, self.max_page_size);
        debug!(offset = window.offset, limit = window.limit, "Listing page");
        self.repo.list(None, window).await
    }

    /// The whole collection. Not subject to the page size cap.
    #[instrument(skip(self), fields(kind = R::KIND))]
    pub async fn list_all(&self) -> Result<Vec<R>, ApplicationError> {
        self.repo
            .list(None, Window::first(i64::MAX, usize::MAX))
            .await
    }

    /// First `query.limit` records whose `field` contains `query.q`, ignoring
    /// case. A missing or empty `q` matches everything.
    #[instrument(skip(self), fields(kind = R::KIND))]
    pub async fn search(&self, field: &str, query: &SearchQuery) -> Result<Vec<R>, ApplicationError> {
        let filter = query
            .q
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(|q| TextFilter::new(field, q));
        let window = Window::first(query.limit, self.max_page_size);
        let records = self.repo.list(filter.as_ref(), window).await?;
        info!(hits = records.len(), "Search finished");
        Ok(records)
    }

    #[instrument(skip(self), fields(kind = R::KIND))]
    pub async fn get(&self, id: &R::Id) -> Result<R, ApplicationError> {
        self.repo.find(id).await?.ok_or_else(|| {
            warn!(%id, "Record not found");
            ApplicationError::not_found::<R>(id)
        })
    }

    /// Validates every record, then appends them all or none.
    #[instrument(skip(self, records), fields(kind = R::KIND, count = records.len()))]
    pub async fn create(&self, records: Vec<R>) -> Result<Vec<R>, ApplicationError> {
        for record in &records {
            record.validate()?;
        }
        let created = self.repo.append_all(records).await.inspect_err(|e| {
            warn!("Create rejected: {}", e);
        })?;
        info!(created = created.len(), "Records created");
        Ok(created)
    }

    #[instrument(skip(self), fields(kind = R::KIND))]
    pub async fn delete(&self, id: &R::Id) -> Result<R, ApplicationError> {
        let removed = self.repo.remove_by_id(id).await?.ok_or_else(|| {
            warn!(%id, "Delete failed: record not found");
            ApplicationError::not_found::<R>(id)
        })?;
        info!(%id, "Record deleted");
        Ok(removed)
    }

    #[instrument(skip(self, ids), fields(kind = R::KIND, requested = ids.len()))]
    pub async fn delete_many(&self, ids: &[R::Id]) -> Result<Vec<R>, ApplicationError> {
        let removed = self.repo.remove_where(ids).await?;
        info!(removed = removed.len(), "Batch delete finished");
        Ok(removed)
    }
}

/// Orders: paginated reads, creation gated by [`Authorizer`].
pub struct OrderService {
    orders: ResourceService<Order>,
    authorizer: Arc<dyn Authorizer>,
}

impl OrderService {
    pub fn new(
        repo: Arc<dyn CollectionRepository<Order>>,
        authorizer: Arc<dyn Authorizer>,
        max_page_size: usize,
    ) -> Self {
        Self {
            orders: ResourceService::new(repo, max_page_size),
            authorizer,
        }
    }

    pub async fn list_page(&self, query: PageQuery) -> Result<Vec<Order>, ApplicationError> {
        self.orders.list_page(query).await
    }

    #[instrument(skip(self, orders), fields(username = %credentials.username, count = orders.len()))]
    pub async fn create(
        &self,
        credentials: &Credentials,
        orders: Vec<Order>,
    ) -> Result<Vec<Order>, ApplicationError> {
        if !self.authorizer.authorize(credentials).await {
            warn!("Order creation refused: bad credentials");
            return Err(ApplicationError::Unauthorized);
        }
        self.orders.create(orders).await
    }
}

/// User profiles: generated identifiers and per-group updates.
pub struct ProfileService {
    repo: Arc<dyn SequencedRepository<UserProfile>>,
    assigner: Arc<dyn IdentityAssigner<ProfileId>>,
}

impl ProfileService {
    pub fn new(
        repo: Arc<dyn SequencedRepository<UserProfile>>,
        assigner: Arc<dyn IdentityAssigner<ProfileId>>,
    ) -> Self {
        Self { repo, assigner }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &ProfileId) -> Result<UserProfile, ApplicationError> {
        self.repo.find(id).await?.ok_or_else(|| {
            warn!(%id, "Profile not found");
            ApplicationError::not_found::<UserProfile>(id)
        })
    }

    /// Creates one profile per draft, identifiers increasing in input order.
    #[instrument(skip(self, drafts), fields(count = drafts.len()))]
    pub async fn create(&self, drafts: Vec<ProfileDraft>) -> Result<Vec<UserProfile>, ApplicationError> {
        for draft in &drafts {
            draft.validate()?;
        }
        let created = self
            .repo
            .append_composed(drafts, self.assigner.as_ref())
            .await?;
        info!(
            created = created.len(),
            first = created.first().map(|p| p.identifier.as_str()),
            "Profiles created"
        );
        Ok(created)
    }

    /// Replaces one field group of the profile in place.
    #[instrument(skip(self, update), fields(group = %update.group()))]
    pub async fn update(
        &self,
        id: &ProfileId,
        update: GroupUpdate,
    ) -> Result<UserProfile, ApplicationError> {
        update.validate()?;
        let merged = self
            .repo
            .replace_with(id, Box::new(move |current: &UserProfile| current.merge(update)))
            .await?
            .ok_or_else(|| {
                warn!(%id, "Update failed: profile not found");
                ApplicationError::not_found::<UserProfile>(id)
            })?;
        info!(%id, "Profile updated");
        Ok(merged)
    }
}
