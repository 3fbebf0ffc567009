//! Record store abstraction and implementation for Rollbook.
//!
//! This crate provides a trait-based store interface with a single-lock
//! in-memory implementation.

#![warn(missing_docs)]

pub mod trait_;
pub mod memory;

pub use trait_::{RecordStore, StoreError, Result};
pub use memory::StudentStore;
