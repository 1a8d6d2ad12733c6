//! Entity store adapter
//!
//! [`Store`] is the persistence capability consumed by the resolvers:
//! create/find/update/delete/list per entity, each a single round-trip.
//! Two implementations exist: [`PgStore`] (PostgreSQL via sqlx) for
//! production and [`MemStore`] as an in-memory double for tests.

mod memory;
mod postgres;

pub use memory::MemStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Company, CompanyInput, CompanyPatch, Credential, NewOrder, Order, Product, ProductInput,
    ProductPatch,
};

/// Persistence failure, as seen by the resolvers
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write (e.g. duplicate username)
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },
    /// Any other backend failure
    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

/// Per-entity persistence contract
///
/// Resolvers hold no state across calls; every guarantee about ordering
/// (orders newest-first) or uniqueness (usernames) lives here.
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_company(&self, input: CompanyInput) -> Result<Company, StoreError>;
    async fn find_company(&self, id: i64) -> Result<Option<Company>, StoreError>;
    async fn list_companies(&self) -> Result<Vec<Company>, StoreError>;
    /// Applies the `Some` fields of the patch; `Ok(None)` if the id is unknown
    async fn update_company(
        &self,
        id: i64,
        patch: CompanyPatch,
    ) -> Result<Option<Company>, StoreError>;
    /// `Ok(true)` iff a row existed and was removed
    async fn delete_company(&self, id: i64) -> Result<bool, StoreError>;

    async fn create_product(&self, input: ProductInput) -> Result<Product, StoreError>;
    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;
    async fn update_product(
        &self,
        id: i64,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError>;
    async fn delete_product(&self, id: i64) -> Result<bool, StoreError>;

    async fn create_order(&self, order: NewOrder) -> Result<Order, StoreError>;
    /// Orders sorted by order date descending, newest first
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError>;

    async fn create_credential(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Credential, StoreError>;
    async fn find_credential_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Credential>, StoreError>;
}
