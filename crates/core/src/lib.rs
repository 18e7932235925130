//! Clementine Core - Shared catalog types and filtering logic.
//!
//! This crate provides the common types and rules used across all Clementine
//! components:
//! - `catalog` - Demo store data, request decoding, and the listing engine
//! - `cli` - Command-line tools for catalog inspection and validation
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no network
//! access, no global state. Everything here is deterministic: the same inputs
//! always produce the same outputs, which keeps validation and query building
//! trivially testable.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs
//! - [`taxonomy`] - The category tree, its filter field definitions, and lookup
//! - [`attributes`] - Attribute value validation against field definitions
//! - [`query`] - Normalized product queries built from raw request parameters

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod attributes;
pub mod query;
pub mod taxonomy;
pub mod types;

pub use types::*;
