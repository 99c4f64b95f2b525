//! Budget service
//!
//! Business logic on top of the budget repository: validated creation,
//! listing, workflow transitions, and soft deletion.

use crate::error::{OneDripError, OneDripResult};
use crate::models::{Budget, BudgetId, Money};
use crate::storage::Storage;

/// Input for creating a budget
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    pub device_type: String,
    pub service_description: String,
    pub part_quality: Option<String>,
    pub notes: Option<String>,
    pub client_name: Option<String>,
    pub cash_price: Money,
    pub installment_price: Money,
    pub installments: u32,
    pub payment_method: Option<String>,
    pub warranty_months: u32,
    /// Days of validity from now; no expiry when <= 0
    pub validity_days: i64,
    pub includes_delivery: bool,
    pub includes_screen_protector: bool,
}

/// Service for budget operations
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a budget from validated input
    ///
    /// The record is inserted into the repository's in-memory state; the
    /// caller decides when to flush to disk.
    pub fn create(&self, input: CreateBudgetInput) -> OneDripResult<Budget> {
        let mut budget = Budget::new(
            input.device_type,
            input.service_description,
            input.cash_price,
        );
        budget.part_quality = input.part_quality;
        budget.notes = input.notes;
        budget.client_name = input.client_name;
        budget.installment_price = input.installment_price;
        budget.installments = input.installments;
        budget.payment_method = input.payment_method;
        budget.warranty_months = input.warranty_months;
        budget.includes_delivery = input.includes_delivery;
        budget.includes_screen_protector = input.includes_screen_protector;
        budget.set_validity_days(input.validity_days);

        budget
            .validate()
            .map_err(|e| OneDripError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        Ok(budget)
    }

    /// List all non-deleted budgets, newest first
    pub fn list(&self) -> OneDripResult<Vec<Budget>> {
        self.storage.budgets.list_active()
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> OneDripResult<Budget> {
        self.storage
            .budgets
            .get(id)?
            .filter(|b| !b.deleted)
            .ok_or_else(|| OneDripError::budget_not_found(id.to_string()))
    }

    /// Find a budget by full UUID or by its short display form ("orc-1a2b3c4d")
    pub fn find(&self, query: &str) -> OneDripResult<Budget> {
        if let Ok(id) = query.parse::<BudgetId>() {
            return self.get(id);
        }

        let prefix = query.strip_prefix("orc-").unwrap_or(query);
        let matches: Vec<Budget> = self
            .list()?
            .into_iter()
            .filter(|b| b.id.as_uuid().to_string().starts_with(prefix))
            .collect();

        match matches.len() {
            1 => Ok(matches.into_iter().next().unwrap()),
            0 => Err(OneDripError::budget_not_found(query.to_string())),
            _ => Err(OneDripError::Validation(format!(
                "Ambiguous budget ID: {}",
                query
            ))),
        }
    }

    /// Mark a budget approved
    pub fn approve(&self, id: BudgetId) -> OneDripResult<Budget> {
        self.transition(id, Budget::approve)
    }

    /// Mark a budget paid
    pub fn mark_paid(&self, id: BudgetId) -> OneDripResult<Budget> {
        self.transition(id, Budget::mark_paid)
    }

    /// Mark a budget delivered
    pub fn mark_delivered(&self, id: BudgetId) -> OneDripResult<Budget> {
        self.transition(id, Budget::mark_delivered)
    }

    /// Soft-delete a budget
    pub fn delete(&self, id: BudgetId) -> OneDripResult<()> {
        if !self.storage.budgets.soft_delete(id)? {
            return Err(OneDripError::budget_not_found(id.to_string()));
        }
        Ok(())
    }

    fn transition(&self, id: BudgetId, apply: fn(&mut Budget)) -> OneDripResult<Budget> {
        let mut budget = self.get(id)?;
        apply(&mut budget);
        self.storage.budgets.upsert(budget.clone())?;
        Ok(budget)
    }
}
