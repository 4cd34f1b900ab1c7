//! HTTP request handlers

pub mod budget;
pub mod health;

pub use budget::*;
pub use health::*;
