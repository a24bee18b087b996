//! Donation attempts.
//!
//! A donation is only ever a redirect to an external payment link; nothing
//! here moves or verifies money.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::handle::CashAppHandle;

/// Base URL of Cash App payment links.
pub const CASH_APP_BASE_URL: &str = "https://cash.app";

/// Errors that can occur when validating a [`Donation`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DonationError {
    /// Amount below the minimum.
    #[error("donation amount must be at least {min}")]
    AmountTooSmall {
        /// Minimum accepted amount.
        min: Decimal,
    },
    /// Donor name too long.
    #[error("name must be at most {max} characters")]
    NameTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// Message too long.
    #[error("message must be at most {max} characters")]
    MessageTooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A donation attempt submitted by a visitor.
///
/// ## Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use supportme_core::{CashAppHandle, Donation};
///
/// let donation = Donation::new(Decimal::new(2550, 2));
/// let handle = CashAppHandle::parse("sigmabread").unwrap();
/// assert_eq!(donation.payment_url(&handle), "https://cash.app/$sigmabread/25.5");
/// assert_eq!(donation.donor_display(), "Anonymous");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    /// Amount in dollars.
    pub amount: Decimal,
    /// Optional donor name.
    #[serde(default)]
    pub name: Option<String>,
    /// Optional message to the creator.
    #[serde(default)]
    pub message: Option<String>,
    /// Handle the donor was sent to; the current page handle when absent.
    #[serde(default)]
    pub cash_app_handle: Option<String>,
}

impl Donation {
    /// Smallest accepted amount.
    pub const MIN_AMOUNT: Decimal = Decimal::ONE;
    /// Maximum donor name length.
    pub const MAX_NAME_LENGTH: usize = 100;
    /// Maximum message length (fits a single chat embed field).
    pub const MAX_MESSAGE_LENGTH: usize = 1000;

    /// Create an anonymous donation without a message.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self {
            amount,
            name: None,
            message: None,
            cash_app_handle: None,
        }
    }

    /// Validate amount and text lengths.
    ///
    /// # Errors
    ///
    /// Returns [`DonationError`] describing the first violated constraint.
    pub fn validate(&self) -> Result<(), DonationError> {
        if self.amount < Self::MIN_AMOUNT {
            return Err(DonationError::AmountTooSmall {
                min: Self::MIN_AMOUNT,
            });
        }

        if self
            .name
            .as_deref()
            .is_some_and(|n| n.chars().count() > Self::MAX_NAME_LENGTH)
        {
            return Err(DonationError::NameTooLong {
                max: Self::MAX_NAME_LENGTH,
            });
        }

        if self
            .message
            .as_deref()
            .is_some_and(|m| m.chars().count() > Self::MAX_MESSAGE_LENGTH)
        {
            return Err(DonationError::MessageTooLong {
                max: Self::MAX_MESSAGE_LENGTH,
            });
        }

        Ok(())
    }

    /// Donor name for display, `Anonymous` when blank.
    #[must_use]
    pub fn donor_display(&self) -> &str {
        non_blank(self.name.as_deref()).unwrap_or("Anonymous")
    }

    /// Message for display, a placeholder when blank.
    #[must_use]
    pub fn message_display(&self) -> &str {
        non_blank(self.message.as_deref()).unwrap_or("No message provided.")
    }

    /// Amount without trailing zeros (`25.00` becomes `25`).
    #[must_use]
    pub fn amount_display(&self) -> String {
        self.amount.normalize().to_string()
    }

    /// Build the external payment link for this donation.
    #[must_use]
    pub fn payment_url(&self, handle: &CashAppHandle) -> String {
        format!(
            "{CASH_APP_BASE_URL}/{handle}/{amount}",
            amount = self.amount_display()
        )
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}
