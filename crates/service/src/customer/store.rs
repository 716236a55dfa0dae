use async_trait::async_trait;

use crate::errors::ServiceError;

pub use models::customer::{Edit, Model as Customer, Registration};

/// Persistence contract over customer records. All implementations must
/// produce identical observable results for identical call sequences; the
/// storage medium is invisible to callers.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// All customers, insertion order where the backend has one.
    async fn list(&self) -> Result<Vec<Customer>, ServiceError>;

    /// `None` for a missing id; never an error.
    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, ServiceError>;

    /// Assigns a fresh id and persists the record, returning it as stored.
    async fn insert(&self, registration: Registration) -> Result<Customer, ServiceError>;

    /// Case-sensitive exact match.
    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError>;

    /// True iff `find_by_id` would return `Some`.
    async fn exists_by_id(&self, id: i32) -> Result<bool, ServiceError>;

    /// Removes the record if present; silent no-op if absent. Existence is
    /// the service's check, not the store's.
    async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError>;

    /// Full overwrite of name/email/age at `customer.id`.
    async fn update(&self, customer: Customer) -> Result<(), ServiceError>;
}
