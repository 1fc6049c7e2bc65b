//! Client display formatting

use crate::billing::LedgerSummary;
use crate::models::Client;

/// Format a list of clients with their balances as a table
pub fn format_client_list(rows: &[(Client, LedgerSummary)], currency: &str) -> String {
    if rows.is_empty() {
        return "No clients found.\n".to_string();
    }

    let name_width = rows
        .iter()
        .map(|(c, _)| c.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:>14}  {:>14}\n",
        "ID",
        "Name",
        "Paid",
        "Outstanding",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:->14}  {:->14}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for (client, ledger) in rows {
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {:>14}  {:>14}\n",
            client.id.to_string(),
            client.name,
            ledger.paid_total.format_with_symbol(currency),
            ledger.outstanding_total.format_with_symbol(currency),
            name_width = name_width,
        ));
    }

    output
}

/// Format a single client's details
pub fn format_client_details(client: &Client) -> String {
    let mut output = String::new();

    output.push_str(&format!("Client: {}\n", client.name));
    output.push_str(&format!("  ID:       {}\n", client.id));
    if let Some(company) = &client.company {
        output.push_str(&format!("  Company:  {}\n", company));
    }
    if let Some(email) = &client.email {
        output.push_str(&format!("  Email:    {}\n", email));
    }
    if let Some(phone) = &client.phone {
        output.push_str(&format!("  Phone:    {}\n", phone));
    }
    if let Some(notes) = &client.notes {
        output.push_str(&format!("  Notes:    {}\n", notes));
    }
    output.push_str(&format!(
        "  Created:  {}\n",
        client.created_at.format("%Y-%m-%d %H:%M")
    ));

    output
}
