//! Core domain entities.
//!
//! - [`LinkRecord`] - A shortened-link entry as stored in the key-value backend

pub mod link;

pub use link::LinkRecord;
