//! Budget display formatting
//!
//! Provides utilities for formatting budgets for terminal display,
//! including list views and status indicators.

use crate::models::{Budget, BudgetStatus};

/// Format a single budget for display (list row)
pub fn format_budget_row(budget: &Budget) -> String {
    let status_icon = match budget.status {
        BudgetStatus::Pending => " ",
        BudgetStatus::Approved => "✓",
        BudgetStatus::Paid => "$",
        BudgetStatus::Delivered => "⇄",
    };

    let expiry_indicator = if budget.is_expired() { " [expirado]" } else { "" };

    format!(
        "{} {} {:12} {:28} {:>12}{}",
        status_icon,
        budget.id,
        truncate(&budget.device_type, 12),
        truncate(&budget.service_description, 28),
        budget.cash_price.to_string(),
        expiry_indicator
    )
}

/// Format a list of budgets as a table
pub fn format_budget_list(budgets: &[Budget]) -> String {
    if budgets.is_empty() {
        return "Nenhum orçamento encontrado.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:3} {:12} {:12} {:28} {:>12}\n",
        "St", "ID", "Aparelho", "Serviço", "À vista"
    ));
    output.push_str(&"-".repeat(72));
    output.push('\n');

    for budget in budgets {
        output.push_str(&format_budget_row(budget));
        output.push('\n');
    }

    output
}

/// Format budget details for display
pub fn format_budget_details(budget: &Budget) -> String {
    let mut output = String::new();

    output.push_str(&format!("Orçamento:     {}\n", budget.id));
    output.push_str(&format!("Aparelho:      {}\n", budget.device_type));
    output.push_str(&format!("Serviço:       {}\n", budget.service_description));

    if let Some(quality) = &budget.part_quality {
        output.push_str(&format!("Qualidade:     {}\n", quality));
    }
    if let Some(client) = &budget.client_name {
        output.push_str(&format!("Cliente:       {}\n", client));
    }

    output.push_str(&format!("À vista:       {}\n", budget.cash_price));
    output.push_str(&format!(
        "Parcelado:     {} em {}x\n",
        budget.installment_price, budget.installments
    ));

    if let Some(method) = &budget.payment_method {
        output.push_str(&format!("Pagamento:     {}\n", method));
    }

    output.push_str(&format!("Garantia:      {} meses\n", budget.warranty_months));

    match budget.valid_until {
        Some(until) => {
            output.push_str(&format!(
                "Válido até:    {}\n",
                until.format("%d/%m/%Y")
            ));
        }
        None => output.push_str("Válido até:    sem expiração\n"),
    }

    output.push_str(&format!(
        "Entrega:       {}\n",
        if budget.includes_delivery { "Sim" } else { "Não" }
    ));
    output.push_str(&format!(
        "Película:      {}\n",
        if budget.includes_screen_protector { "Sim" } else { "Não" }
    ));
    output.push_str(&format!("Status:        {}\n", budget.status));

    if let Some(notes) = &budget.notes {
        output.push_str(&format!("Observações:   {}\n", notes));
    }

    output
}

/// Truncate a string to a maximum display width
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn test_budget() -> Budget {
        Budget::new("Celular", "iPhone 12 Tela", Money::from_cents(15000))
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_budget_list(&[]), "Nenhum orçamento encontrado.\n");
    }

    #[test]
    fn test_list_contains_fields() {
        let output = format_budget_list(&[test_budget()]);
        assert!(output.contains("Celular"));
        assert!(output.contains("iPhone 12 Tela"));
        assert!(output.contains("R$ 150,00"));
    }

    #[test]
    fn test_details_show_no_expiry() {
        let output = format_budget_details(&test_budget());
        assert!(output.contains("sem expiração"));
        assert!(output.contains("pending"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("uma descrição longa", 8), "uma des…");
    }
}
