pub mod address_pool;
pub mod config;
pub mod errors;
pub mod generator;
pub mod picker;
pub mod record;
pub mod stats;
pub mod types;
