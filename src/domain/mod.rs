//! Domain layer for the tableview crate.
//!
//! Holds the types shared by every layer that are not part of the engine
//! itself. The engine never inspects item fields, so the only domain concern
//! that crosses layers is error reporting.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases

pub mod error;

pub use error::{Result, TableViewError};
