//! # Blogicum Core
//!
//! The domain layer of the Blogicum blog.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, ports, the post visibility policy, listings and the write flows
//! built on top of them.

pub mod domain;
pub mod error;
pub mod forms;
pub mod ownership;
pub mod pagination;
pub mod ports;
pub mod services;
pub mod visibility;

pub use error::DomainError;
