//! Code host implementations

pub mod github;
pub mod memory;
