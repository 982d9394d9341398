//! Request-level services.

pub mod catalog;
