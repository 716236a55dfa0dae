use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use models::customer::{ActiveModel, Column, Entity};

use crate::customer::store::{Customer, CustomerStore, Registration};
use crate::errors::ServiceError;

/// ORM-mediated record store over a SeaORM connection.
pub struct OrmCustomerStore {
    db: DatabaseConnection,
}

impl OrmCustomerStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

#[async_trait]
impl CustomerStore for OrmCustomerStore {
    async fn list(&self) -> Result<Vec<Customer>, ServiceError> {
        Entity::find().order_by_asc(Column::Id).all(&self.db).await.map_err(db_err)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, ServiceError> {
        Entity::find_by_id(id).one(&self.db).await.map_err(db_err)
    }

    async fn insert(&self, registration: Registration) -> Result<Customer, ServiceError> {
        let am = ActiveModel {
            id: NotSet,
            name: Set(registration.name),
            email: Set(registration.email),
            age: Set(registration.age),
        };
        am.insert(&self.db).await.map_err(db_err)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
        let count = Entity::find()
            .filter(Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        let count = Entity::find()
            .filter(Column::Id.eq(id))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn update(&self, customer: Customer) -> Result<(), ServiceError> {
        let am = ActiveModel {
            id: Set(customer.id),
            name: Set(customer.name),
            email: Set(customer.email),
            age: Set(customer.age),
        };
        match am.update(&self.db).await {
            Ok(_) => Ok(()),
            // missing id is a no-op in every backend
            Err(sea_orm::DbErr::RecordNotUpdated) => Ok(()),
            Err(e) => Err(db_err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::MigratorTrait;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_email(tag: &str) -> String {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        format!("{tag}_{nanos}@example.com")
    }

    #[tokio::test]
    async fn orm_store_crud() -> anyhow::Result<()> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = match models::db::connect().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return Ok(());
            }
        };
        migration::Migrator::up(&db, None).await?;

        let store = OrmCustomerStore::new(db);

        let email = unique_email("orm");
        let created = store
            .insert(Registration { name: "Jamila".into(), email: email.clone(), age: 19 })
            .await?;
        assert!(created.id >= 1);

        assert!(store.exists_by_id(created.id).await?);
        assert!(store.exists_by_email(&email).await?);

        let mut updated = created.clone();
        updated.name = "Jam".into();
        store.update(updated.clone()).await?;
        assert_eq!(store.find_by_id(created.id).await?, Some(updated));

        store.delete_by_id(created.id).await?;
        assert!(!store.exists_by_id(created.id).await?);

        Ok(())
    }
}
