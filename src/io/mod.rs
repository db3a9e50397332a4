//! Input/output helpers.
//!
//! - JSON exports read by the web front-end (`export`)
//! - the SQLite `players` table (`store`)

pub mod export;
pub mod store;

pub use export::*;
pub use store::*;
