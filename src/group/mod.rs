//! Group module containing membership, expense construction and summaries

pub mod core;
pub mod expense;
pub mod summary;

pub use self::core::*;
pub use expense::*;
pub use summary::*;
