//! SupportMe Core - Shared types library.
//!
//! This crate provides common types used across all SupportMe components:
//! - `site` - The landing page server (content API, admin session, donations)
//! - `cli` - Command-line tools for migrations and content management
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Page content, payment handles and donation records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
