//! Settlement module containing balance accumulation and transfer matching

pub mod balance;
pub mod calculator;

pub use balance::*;
pub use calculator::*;
