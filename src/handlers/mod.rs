// src/handlers/mod.rs

pub mod auth;
pub mod cep;
pub mod customers;
pub mod orders;
