//! Core types and the listing pipeline for the campus resource service.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! storage backend (`campus-store-sqlite`), the REST layer (`campus-api`) and
//! the command-line client (`campus-cli`) all depend on it.

pub mod academic;
pub mod classify;
pub mod collection;
pub mod contact;
pub mod department;
pub mod document;
pub mod error;
pub mod notice;
pub mod pipeline;
pub mod project;
pub mod query;
pub mod store;
pub mod study_material;
pub mod validate;

pub use collection::Collection;
pub use document::{Document, Fields, Record};
pub use error::{Error, Result};
