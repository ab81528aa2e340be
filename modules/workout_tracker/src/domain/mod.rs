pub mod error;
pub mod pagination;
pub mod ports;
pub mod repo;
pub mod service;
