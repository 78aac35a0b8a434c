//! memoflight-core: Core traits and types for the memoflight library
//!
//! This crate provides the foundational types and traits used throughout
//! the memoflight ecosystem: the slot entry model, the storage collaborator
//! contract, key resolution, and the producer seam.

mod error;
mod traits;
mod types;

pub use error::{CacheError, Result};
pub use traits::*;
pub use types::*;
