//! Orderdesk DB Library
//!
//! Persistence layer for order records.

mod orders;

pub use orders::{OrderStore, PgOrderStore};
