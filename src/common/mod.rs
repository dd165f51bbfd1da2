// src/common/mod.rs

pub mod br;
pub mod error;
