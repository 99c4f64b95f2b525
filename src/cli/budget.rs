//! CLI command handlers for budget management

use clap::Subcommand;

use crate::audit::{AuditEntry, AuditLogger};
use crate::display::{format_budget_details, format_budget_list};
use crate::error::{OneDripError, OneDripResult};
use crate::models::Money;
use crate::services::{BudgetService, CreateBudgetInput};
use crate::storage::Storage;

/// Budget management subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Add a new budget
    Add {
        /// Device type (e.g. "Celular")
        device_type: String,
        /// Service/device description (e.g. "iPhone 12 Tela")
        description: String,
        /// Cash price (e.g. "150,00")
        price: String,
        /// Part quality grade
        #[arg(short, long)]
        quality: Option<String>,
        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Client name
        #[arg(short, long)]
        client: Option<String>,
        /// Installment price; defaults to the cash price
        #[arg(long)]
        installment_price: Option<String>,
        /// Number of installments
        #[arg(long, default_value = "1")]
        installments: u32,
        /// Payment method label
        #[arg(long)]
        payment: Option<String>,
        /// Warranty in months
        #[arg(short, long, default_value = "0")]
        warranty: u32,
        /// Validity in days (0 = never expires)
        #[arg(long, default_value = "0")]
        validity: i64,
        /// Price includes delivery
        #[arg(long)]
        delivery: bool,
        /// Price includes a screen protector
        #[arg(long)]
        screen_protector: bool,
    },
    /// List budgets
    List,
    /// Show a budget's details
    Show {
        /// Budget ID
        id: String,
    },
    /// Mark a budget approved
    Approve {
        /// Budget ID
        id: String,
    },
    /// Mark a budget paid
    Paid {
        /// Budget ID
        id: String,
    },
    /// Mark a budget delivered
    Delivered {
        /// Budget ID
        id: String,
    },
    /// Delete a budget
    Delete {
        /// Budget ID
        id: String,
    },
}

/// Handle budget commands
pub fn handle_budget_command(
    storage: &Storage,
    audit: &AuditLogger,
    cmd: BudgetCommands,
) -> OneDripResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Add {
            device_type,
            description,
            price,
            quality,
            notes,
            client,
            installment_price,
            installments,
            payment,
            warranty,
            validity,
            delivery,
            screen_protector,
        } => {
            let cash_price = Money::parse_decimal(&price)
                .map_err(|e| OneDripError::Validation(e.to_string()))?;
            let installment_price = match installment_price {
                Some(p) => Money::parse_decimal(&p)
                    .map_err(|e| OneDripError::Validation(e.to_string()))?,
                None => cash_price,
            };

            let budget = service.create(CreateBudgetInput {
                device_type,
                service_description: description,
                part_quality: quality,
                notes,
                client_name: client,
                cash_price,
                installment_price,
                installments,
                payment_method: payment,
                warranty_months: warranty,
                validity_days: validity,
                includes_delivery: delivery,
                includes_screen_protector: screen_protector,
            })?;
            storage.budgets.save()?;

            audit.log(&AuditEntry::create(
                budget.id.to_string(),
                Some(budget.service_description.clone()),
                &budget,
            ))?;

            println!("Orçamento criado: {}", budget.id);
        }
        BudgetCommands::List => {
            let budgets = service.list()?;
            print!("{}", format_budget_list(&budgets));
        }
        BudgetCommands::Show { id } => {
            let budget = service.find(&id)?;
            print!("{}", format_budget_details(&budget));
        }
        BudgetCommands::Approve { id } => {
            let budget = service.approve(service.find(&id)?.id)?;
            storage.budgets.save()?;
            audit.log(&AuditEntry::update(
                budget.id.to_string(),
                Some(budget.service_description.clone()),
                &budget,
            ))?;
            println!("Orçamento {} aprovado.", budget.id);
        }
        BudgetCommands::Paid { id } => {
            let budget = service.mark_paid(service.find(&id)?.id)?;
            storage.budgets.save()?;
            audit.log(&AuditEntry::update(
                budget.id.to_string(),
                Some(budget.service_description.clone()),
                &budget,
            ))?;
            println!("Orçamento {} marcado como pago.", budget.id);
        }
        BudgetCommands::Delivered { id } => {
            let budget = service.mark_delivered(service.find(&id)?.id)?;
            storage.budgets.save()?;
            audit.log(&AuditEntry::update(
                budget.id.to_string(),
                Some(budget.service_description.clone()),
                &budget,
            ))?;
            println!("Orçamento {} marcado como entregue.", budget.id);
        }
        BudgetCommands::Delete { id } => {
            let budget = service.find(&id)?;
            service.delete(budget.id)?;
            storage.budgets.save()?;
            audit.log(&AuditEntry::delete(
                budget.id.to_string(),
                Some(budget.service_description.clone()),
            ))?;
            println!("Orçamento {} removido.", budget.id);
        }
    }

    Ok(())
}
