//! Core types for SupportMe.
//!
//! This module provides type-safe wrappers for the landing page domain.

pub mod content;
pub mod donation;
pub mod handle;

pub use content::{ContentError, SiteContent};
pub use donation::{CASH_APP_BASE_URL, Donation, DonationError};
pub use handle::{CashAppHandle, HandleError};
