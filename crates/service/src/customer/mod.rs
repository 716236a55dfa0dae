pub mod memory;
pub mod orm;
pub mod service;
pub mod sql;
pub mod store;

pub use memory::InMemoryCustomerStore;
pub use orm::OrmCustomerStore;
pub use service::CustomerService;
pub use sql::SqlCustomerStore;
pub use store::{Customer, CustomerStore, Edit, Registration};
