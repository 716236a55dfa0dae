use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::customer::store::{Customer, CustomerStore, Registration};
use crate::errors::ServiceError;

/// Direct-SQL record store: hand-written statements over a sqlx pool.
pub struct SqlCustomerStore {
    pool: PgPool,
}

impl SqlCustomerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_customer(row: &PgRow) -> Result<Customer, sqlx::Error> {
    Ok(Customer {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        age: row.try_get("age")?,
    })
}

fn db_err(e: sqlx::Error) -> ServiceError {
    ServiceError::Db(e.to_string())
}

#[async_trait]
impl CustomerStore for SqlCustomerStore {
    async fn list(&self) -> Result<Vec<Customer>, ServiceError> {
        let rows = sqlx::query("SELECT id, name, email, age FROM customer ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.iter().map(|r| map_customer(r).map_err(db_err)).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, ServiceError> {
        let row = sqlx::query("SELECT id, name, email, age FROM customer WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(map_customer).transpose().map_err(db_err)
    }

    async fn insert(&self, registration: Registration) -> Result<Customer, ServiceError> {
        let row = sqlx::query(
            "INSERT INTO customer (name, email, age) VALUES ($1, $2, $3) \
             RETURNING id, name, email, age",
        )
        .bind(&registration.name)
        .bind(&registration.email)
        .bind(registration.age)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        map_customer(&row).map_err(db_err)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
        let count: i64 = sqlx::query_scalar("SELECT count(*) FROM customer WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        let count: i64 = sqlx::query_scalar("SELECT count(*) FROM customer WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        sqlx::query("DELETE FROM customer WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn update(&self, customer: Customer) -> Result<(), ServiceError> {
        sqlx::query("UPDATE customer SET name = $1, email = $2, age = $3 WHERE id = $4")
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(customer.age)
            .bind(customer.id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
