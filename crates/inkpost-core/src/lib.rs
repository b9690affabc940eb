//! # Inkpost Core
//!
//! The domain layer of Inkpost.
//! Users, posts, the rules that govern them, and the ports infrastructure must implement.
//! No database or HTTP types appear here.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
