pub mod aggregations;
pub mod filter;
pub mod service;
