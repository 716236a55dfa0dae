use tokio::sync::RwLock;

use crate::customer::store::{Customer, CustomerStore, Registration};
use crate::errors::ServiceError;
use async_trait::async_trait;

struct MemState {
    customers: Vec<Customer>,
    next_id: i32,
}

/// In-memory record store. The container is owned by the instance, not a
/// process global; the process constructs exactly one store at startup, so
/// the single-instance semantics hold by construction.
pub struct InMemoryCustomerStore {
    inner: RwLock<MemState>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self { inner: RwLock::new(MemState { customers: Vec::new(), next_id: 1 }) }
    }
}

impl Default for InMemoryCustomerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn list(&self) -> Result<Vec<Customer>, ServiceError> {
        Ok(self.inner.read().await.customers.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, ServiceError> {
        let state = self.inner.read().await;
        Ok(state.customers.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, registration: Registration) -> Result<Customer, ServiceError> {
        let mut state = self.inner.write().await;
        let customer = Customer {
            id: state.next_id,
            name: registration.name,
            email: registration.email,
            age: registration.age,
        };
        state.next_id += 1;
        state.customers.push(customer.clone());
        Ok(customer)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
        let state = self.inner.read().await;
        Ok(state.customers.iter().any(|c| c.email == email))
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        let state = self.inner.read().await;
        Ok(state.customers.iter().any(|c| c.id == id))
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        let mut state = self.inner.write().await;
        state.customers.retain(|c| c.id != id);
        Ok(())
    }

    async fn update(&self, customer: Customer) -> Result<(), ServiceError> {
        let mut state = self.inner.write().await;
        if let Some(slot) = state.customers.iter_mut().find(|c| c.id == customer.id) {
            *slot = customer;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(name: &str, email: &str, age: i32) -> Registration {
        Registration { name: name.into(), email: email.into(), age }
    }

    #[tokio::test]
    async fn insert_assigns_monotonic_ids() {
        let store = InMemoryCustomerStore::new();
        let a = store.insert(registration("Alex", "alex@x.com", 22)).await.unwrap();
        let b = store.insert(registration("Jamila", "jamila@x.com", 19)).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_missing() {
        let store = InMemoryCustomerStore::new();
        assert!(store.find_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn exists_by_id_reflects_presence() {
        let store = InMemoryCustomerStore::new();
        let c = store.insert(registration("Alex", "alex@x.com", 22)).await.unwrap();
        assert!(store.exists_by_id(c.id).await.unwrap());
        assert!(!store.exists_by_id(c.id + 1).await.unwrap());
        store.delete_by_id(c.id).await.unwrap();
        assert!(!store.exists_by_id(c.id).await.unwrap());
    }

    #[tokio::test]
    async fn exists_by_email_is_case_sensitive_exact() {
        let store = InMemoryCustomerStore::new();
        store.insert(registration("Alex", "alex@x.com", 22)).await.unwrap();
        assert!(store.exists_by_email("alex@x.com").await.unwrap());
        assert!(!store.exists_by_email("Alex@x.com").await.unwrap());
        assert!(!store.exists_by_email("alex@x.co").await.unwrap());
    }

    #[tokio::test]
    async fn delete_absent_is_a_noop() {
        let store = InMemoryCustomerStore::new();
        store.insert(registration("Alex", "alex@x.com", 22)).await.unwrap();
        store.delete_by_id(42).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_overwrites_every_field() {
        let store = InMemoryCustomerStore::new();
        let c = store.insert(registration("Alex", "alex@x.com", 22)).await.unwrap();
        let replacement = Customer { id: c.id, name: "Alexandra".into(), email: "a@x.com".into(), age: 30 };
        store.update(replacement.clone()).await.unwrap();
        assert_eq!(store.find_by_id(c.id).await.unwrap(), Some(replacement));
    }

    #[tokio::test]
    async fn listed_records_are_copies_of_stored_state() {
        let store = InMemoryCustomerStore::new();
        let c = store.insert(registration("Alex", "alex@x.com", 22)).await.unwrap();
        let mut fetched = store.find_by_id(c.id).await.unwrap().unwrap();
        fetched.name = "Changed".into();
        // mutating the returned value must not write through to the store
        assert_eq!(store.find_by_id(c.id).await.unwrap().unwrap().name, "Alex");
    }
}
