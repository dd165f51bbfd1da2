// src/db/mod.rs

pub mod customer_repo;
pub use customer_repo::CustomerRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
