//! Orderdesk Storage Library
//!
//! Storage abstraction and the local-filesystem backend for submitted order
//! images.
//!
//! # Storage key format
//!
//! Keys are flat, collision-resistant filenames generated by the caller.
//! Keys must not contain `..` or a leading `/`.

pub mod local;
pub mod traits;

// Re-export commonly used types
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
