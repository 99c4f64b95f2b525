//! Budget (quote) model
//!
//! A budget is a price estimate for a repair service: the device being
//! repaired, the service description, pricing in cash and installments,
//! warranty and validity terms, and a workflow status.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetId;
use super::money::Money;

/// Workflow status of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    /// Awaiting client approval
    #[default]
    Pending,
    /// Approved by the client
    Approved,
    /// Service paid for
    Paid,
    /// Device delivered back to the client
    Delivered,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetStatus::Pending => write!(f, "pending"),
            BudgetStatus::Approved => write!(f, "approved"),
            BudgetStatus::Paid => write!(f, "paid"),
            BudgetStatus::Delivered => write!(f, "delivered"),
        }
    }
}

/// A repair-service budget (quote)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Type of device being quoted (e.g. "Celular", "Notebook")
    pub device_type: String,

    /// Service and/or device description (e.g. "iPhone 12 Tela")
    pub service_description: String,

    /// Part quality grade, when applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_quality: Option<String>,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Client the budget was prepared for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,

    /// Price when paying cash, in centavos
    pub cash_price: Money,

    /// Total price when paying in installments, in centavos
    pub installment_price: Money,

    /// Number of installments (at least 1)
    pub installments: u32,

    /// Payment method label (e.g. "Cartão", "Pix")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,

    /// Warranty period in months
    pub warranty_months: u32,

    /// Expiry of the quote; None means the quote does not expire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,

    /// Whether delivery is included in the price
    #[serde(default)]
    pub includes_delivery: bool,

    /// Whether a screen protector is included in the price
    #[serde(default)]
    pub includes_screen_protector: bool,

    /// Workflow status
    #[serde(default)]
    pub status: BudgetStatus,

    /// Whether the service has been paid for
    #[serde(default)]
    pub is_paid: bool,

    /// Whether the device has been delivered back
    #[serde(default)]
    pub is_delivered: bool,

    /// Soft-delete marker; deleted budgets are kept on disk but hidden
    #[serde(default)]
    pub deleted: bool,

    /// When this budget was created
    pub created_at: DateTime<Utc>,

    /// When this budget was last modified
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new pending budget with the required fields
    pub fn new(
        device_type: impl Into<String>,
        service_description: impl Into<String>,
        cash_price: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            device_type: device_type.into(),
            service_description: service_description.into(),
            part_quality: None,
            notes: None,
            client_name: None,
            cash_price,
            installment_price: cash_price,
            installments: 1,
            payment_method: None,
            warranty_months: 0,
            valid_until: None,
            includes_delivery: false,
            includes_screen_protector: false,
            status: BudgetStatus::Pending,
            is_paid: false,
            is_delivered: false,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the expiry a number of days from now (no expiry when days <= 0)
    pub fn set_validity_days(&mut self, days: i64) {
        self.valid_until = if days > 0 {
            Some(Utc::now() + Duration::days(days))
        } else {
            None
        };
        self.updated_at = Utc::now();
    }

    /// Remaining validity in whole days, rounded up; 0 when no expiry is set
    ///
    /// An already-expired budget yields a non-positive value.
    pub fn validity_days_from(&self, now: DateTime<Utc>) -> i64 {
        match self.valid_until {
            Some(until) => {
                let seconds = (until - now).num_seconds();
                // ceil division over a day's worth of seconds
                seconds.div_euclid(86_400) + i64::from(seconds.rem_euclid(86_400) > 0)
            }
            None => 0,
        }
    }

    /// Whether the quote has expired
    pub fn is_expired(&self) -> bool {
        match self.valid_until {
            Some(until) => until < Utc::now(),
            None => false,
        }
    }

    /// Mark approved
    pub fn approve(&mut self) {
        self.status = BudgetStatus::Approved;
        self.updated_at = Utc::now();
    }

    /// Mark paid
    pub fn mark_paid(&mut self) {
        self.status = BudgetStatus::Paid;
        self.is_paid = true;
        self.updated_at = Utc::now();
    }

    /// Mark delivered
    pub fn mark_delivered(&mut self) {
        self.status = BudgetStatus::Delivered;
        self.is_delivered = true;
        self.updated_at = Utc::now();
    }

    /// Validate the budget's fields
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.device_type.trim().is_empty() {
            return Err(BudgetValidationError::MissingDeviceType);
        }
        if self.service_description.trim().is_empty() {
            return Err(BudgetValidationError::MissingDescription);
        }
        if !self.cash_price.is_positive() {
            return Err(BudgetValidationError::NonPositiveCashPrice);
        }
        if self.installments < 1 {
            return Err(BudgetValidationError::ZeroInstallments);
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {} ({})",
            self.id, self.device_type, self.service_description, self.cash_price
        )
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    MissingDeviceType,
    MissingDescription,
    NonPositiveCashPrice,
    ZeroInstallments,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDeviceType => write!(f, "Tipo de aparelho obrigatório"),
            Self::MissingDescription => write!(f, "Serviço/Aparelho obrigatório"),
            Self::NonPositiveCashPrice => write!(f, "Preço à vista deve ser maior que 0"),
            Self::ZeroInstallments => write!(f, "Número de parcelas deve ser pelo menos 1"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_budget() -> Budget {
        Budget::new("Celular", "iPhone 12 Tela", Money::from_cents(15000))
    }

    #[test]
    fn test_new_budget_defaults() {
        let budget = test_budget();

        assert_eq!(budget.status, BudgetStatus::Pending);
        assert!(!budget.is_paid);
        assert!(!budget.is_delivered);
        assert!(!budget.deleted);
        assert_eq!(budget.installments, 1);
        assert!(budget.valid_until.is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(test_budget().validate().is_ok());
    }

    #[test]
    fn test_validate_missing_device_type() {
        let mut budget = test_budget();
        budget.device_type = "  ".to_string();
        assert_eq!(
            budget.validate(),
            Err(BudgetValidationError::MissingDeviceType)
        );
    }

    #[test]
    fn test_validate_non_positive_price() {
        let mut budget = test_budget();
        budget.cash_price = Money::zero();
        assert_eq!(
            budget.validate(),
            Err(BudgetValidationError::NonPositiveCashPrice)
        );
    }

    #[test]
    fn test_set_validity_days() {
        let mut budget = test_budget();

        budget.set_validity_days(30);
        assert!(budget.valid_until.is_some());
        assert!(!budget.is_expired());

        budget.set_validity_days(0);
        assert!(budget.valid_until.is_none());
    }

    #[test]
    fn test_validity_days_from_rounds_up() {
        let now = Utc::now();
        let mut budget = test_budget();

        // 29 days and a bit left rounds up to 30
        budget.valid_until = Some(now + Duration::days(29) + Duration::hours(1));
        assert_eq!(budget.validity_days_from(now), 30);

        // Exactly 30 days stays 30
        budget.valid_until = Some(now + Duration::days(30));
        assert_eq!(budget.validity_days_from(now), 30);

        budget.valid_until = None;
        assert_eq!(budget.validity_days_from(now), 0);
    }

    #[test]
    fn test_validity_days_negative_when_expired() {
        let now = Utc::now();
        let mut budget = test_budget();
        budget.valid_until = Some(now - Duration::days(2));
        assert!(budget.validity_days_from(now) <= 0);
        assert!(budget.is_expired());
    }

    #[test]
    fn test_workflow_transitions() {
        let mut budget = test_budget();

        budget.approve();
        assert_eq!(budget.status, BudgetStatus::Approved);

        budget.mark_paid();
        assert_eq!(budget.status, BudgetStatus::Paid);
        assert!(budget.is_paid);

        budget.mark_delivered();
        assert_eq!(budget.status, BudgetStatus::Delivered);
        assert!(budget.is_delivered);
    }

    #[test]
    fn test_serialization_round_trip() {
        let budget = test_budget();
        let json = serde_json::to_string(&budget).unwrap();
        let deserialized: Budget = serde_json::from_str(&json).unwrap();
        assert_eq!(budget.id, deserialized.id);
        assert_eq!(budget.cash_price, deserialized.cash_price);
        assert_eq!(budget.status, deserialized.status);
    }
}
