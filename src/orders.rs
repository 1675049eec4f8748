//! Orders

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::{ValidationErrors, is_zip_code};

/// Error returned when parsing a status name fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownStatus {
    /// Which enum was being parsed
    pub kind: &'static str,

    /// The rejected value
    pub value: String,
}

/// Fulfilment status of an order.
///
/// Expected flow is pending, processing, shipped, delivered, with
/// cancellation possible from pending or processing. Transitions are not
/// enforced: an administrator may write any value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, not yet picked up
    #[default]
    Pending,

    /// Being prepared
    Processing,

    /// Handed to the carrier
    Shipped,

    /// Received by the customer
    Delivered,

    /// Cancelled
    Cancelled,
}

impl OrderStatus {
    /// Every status.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Storage name.
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Orders may only be removed before they leave the warehouse.
    pub const fn is_removable(self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus {
                kind: "order status",
                value: s.to_string(),
            })
    }
}

/// Payment status of an order. Set by administrators; no provider exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Awaiting payment
    #[default]
    Pending,

    /// Paid
    Completed,

    /// Payment failed
    Failed,
}

impl PaymentStatus {
    /// Every payment status.
    pub const ALL: [PaymentStatus; 3] = [
        PaymentStatus::Pending,
        PaymentStatus::Completed,
        PaymentStatus::Failed,
    ];

    /// Storage name.
    pub const fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus {
                kind: "payment status",
                value: s.to_string(),
            })
    }
}

/// Where an order ships to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    /// Street and number
    pub street: String,

    /// City
    pub city: String,

    /// State or region
    pub state: String,

    /// `12345` or `12345-6789`
    pub zip_code: String,

    /// Country
    pub country: String,
}

impl ShippingAddress {
    /// Trim every field.
    #[must_use]
    pub fn trimmed(self) -> Self {
        Self {
            street: self.street.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            zip_code: self.zip_code.trim().to_string(),
            country: self.country.trim().to_string(),
        }
    }

    /// Check every field, collecting one detail per problem.
    ///
    /// # Errors
    ///
    /// Returns the collected [`ValidationErrors`] when any field is invalid.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.require_non_blank("street", &self.street);
        errors.require_non_blank("city", &self.city);
        errors.require_non_blank("state", &self.state);

        if self.zip_code.trim().is_empty() {
            errors.push("zipCode is required");
        } else if !is_zip_code(self.zip_code.trim()) {
            errors.push("zipCode must look like 12345 or 12345-6789");
        }

        errors.require_non_blank("country", &self.country);

        errors.into_result()
    }
}
