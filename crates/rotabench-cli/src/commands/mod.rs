//! Command implementations.

pub mod circular;
pub mod localize;
