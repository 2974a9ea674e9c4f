// src/core/mod.rs

pub mod sanitize;

pub use sanitize::{clean_number, first_line, normalized};
