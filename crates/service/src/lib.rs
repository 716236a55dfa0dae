//! Business layer for the customer API.
//! - `customer::store` is the persistence contract with three
//!   interchangeable backends (in-memory, direct SQL, SeaORM).
//! - `customer::service` enforces uniqueness and the no-op-update rules.

pub mod customer;
pub mod errors;
