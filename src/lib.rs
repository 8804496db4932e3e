pub mod backend;
pub mod config;
pub mod error;
pub mod fields;
pub mod query;
pub mod search;
pub mod validation;
