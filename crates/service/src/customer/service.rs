use std::sync::Arc;

use tracing::{info, instrument};

use crate::customer::store::{Customer, CustomerStore, Edit, Registration};
use crate::errors::ServiceError;

/// Business rules over one record store: existence checks, duplicate-email
/// prevention, and partial updates that reject no-op field changes. The
/// backend is chosen at startup; the service never cares which one it got.
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
}

impl CustomerService {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Result<Vec<Customer>, ServiceError> {
        self.store.list().await
    }

    pub async fn get(&self, id: i32) -> Result<Customer, ServiceError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("customer with id: {id} doesn't exist")))
    }

    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: Registration) -> Result<Customer, ServiceError> {
        if self.store.exists_by_email(&registration.email).await? {
            return Err(ServiceError::Duplicate("email already taken".into()));
        }
        let created = self.store.insert(registration).await?;
        info!(id = created.id, "customer registered");
        Ok(created)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.store.exists_by_id(id).await? {
            return Err(ServiceError::NotFound(format!(
                "customer with id: [{id}] doesn't exist"
            )));
        }
        self.store.delete_by_id(id).await?;
        info!(id, "customer deleted");
        Ok(())
    }

    /// Partial update with change validation.
    ///
    /// `current` is the baseline, `draft` an independent copy accumulating
    /// the proposed change. Each branch sets a field on the draft and
    /// rejects the request when the draft still equals the baseline, i.e.
    /// when the only candidate difference was a value already stored.
    /// Comparison is whole-record equality.
    pub async fn update(&self, id: i32, edit: Edit) -> Result<(), ServiceError> {
        let mut current = self.get(id).await?;
        let mut draft = current.clone();

        // name + age together: validate one field at a time, accepting the
        // name into the baseline before checking the age. A supplied email
        // is ignored in this branch.
        if let (Some(name), Some(age)) = (edit.name.clone(), edit.age) {
            draft.name = name.clone();
            if draft == current {
                return Err(ServiceError::Validation("the name field can't be the same".into()));
            }
            current.name = name;
            draft.age = age;
            if draft == current {
                return Err(ServiceError::Validation("the age field can't be the same".into()));
            }
            self.store.update(draft).await?;
            return Ok(());
        }

        if let Some(age) = edit.age {
            draft.age = age;
            if draft == current {
                return Err(ServiceError::Validation("the age field can't be the same".into()));
            }
            self.store.update(draft).await?;
            return Ok(());
        }

        if let Some(name) = edit.name {
            draft.name = name;
            if draft == current {
                return Err(ServiceError::Validation("the name field can't be the same".into()));
            }
            self.store.update(draft).await?;
            return Ok(());
        }

        if let Some(email) = edit.email {
            draft.email = email;
            if draft == current {
                return Err(ServiceError::Validation("the email field can't be the same".into()));
            }
            self.store.update(draft).await?;
            return Ok(());
        }

        // Empty edit: rejected explicitly rather than silently ignored.
        Err(ServiceError::Validation("no changes found".into()))
    }
}
