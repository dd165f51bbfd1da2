// src/models/mod.rs

pub mod auth;
pub mod customer;
pub mod order;
