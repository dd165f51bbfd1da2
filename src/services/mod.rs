// src/services/mod.rs

pub mod auth;
pub mod cep;
pub mod customer_service;
pub mod order_service;
pub mod report_service;
