//! Payment display formatting

use std::collections::HashMap;

use super::truncate;
use crate::error::BillingResult;
use crate::models::{ClientId, Money, Payment, Recurrence};

/// Format payments as a table; `client_names` resolves the client column
pub fn format_payment_list(
    payments: &[Payment],
    client_names: &HashMap<ClientId, String>,
    currency: &str,
    date_format: &str,
) -> BillingResult<String> {
    if payments.is_empty() {
        return Ok("No payments found.\n".to_string());
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<20}  {:>12}  {:<8}  {:<10}  {:<10}  {}\n",
        "ID", "Client", "Amount", "Status", "Due", "Paid", "Description"
    ));
    output.push_str(&"-".repeat(96));
    output.push('\n');

    for payment in payments {
        let client = client_names
            .get(&payment.client_id)
            .map(String::as_str)
            .unwrap_or("(unknown)");
        let due = payment
            .due_date
            .map(|d| d.format(date_format).to_string())
            .unwrap_or_default();
        let paid = payment
            .paid_date()
            .map(|d| d.format(date_format).to_string())
            .unwrap_or_default();
        let recurring = match payment.recurrence {
            Some(Recurrence {
                is_recurring: true,
                frequency: Some(freq),
                ..
            }) => format!(" [{}]", freq),
            _ => String::new(),
        };

        output.push_str(&format!(
            "{:<12}  {}  {:>12}  {:<8}  {:<10}  {:<10}  {}{}\n",
            payment.id.to_string(),
            truncate(client, 20),
            payment.amount().format_with_symbol(currency),
            payment.status(),
            due,
            paid,
            payment.description.as_deref().unwrap_or(""),
            recurring
        ));
    }

    let total = Money::try_sum(payments.iter().map(|p| p.amount()))?;
    output.push_str(&"-".repeat(96));
    output.push('\n');
    output.push_str(&format!(
        "{:<12}  {:<20}  {:>12}\n",
        "TOTAL",
        "",
        total.format_with_symbol(currency)
    ));

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, PaymentStatus};
    use chrono::NaiveDate;

    #[test]
    fn test_payment_list() {
        let client_id = ClientId::new();
        let names = HashMap::from([(client_id, "Acme".to_string())]);

        let mut paid = Payment::with_status(
            client_id,
            Money::from_cents(10000),
            PaymentStatus::Paid,
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        )
        .unwrap();
        paid.recurrence = Some(Recurrence::every(Frequency::Monthly, None));
        let pending = Payment::new(ClientId::new(), Money::from_cents(5000)).unwrap();

        let output = format_payment_list(&[paid, pending], &names, "$", "%Y-%m-%d").unwrap();
        assert!(output.contains("Acme"));
        assert!(output.contains("(unknown)"));
        assert!(output.contains("2024-03-10"));
        assert!(output.contains("[Monthly]"));
        assert!(output.contains("$150.00"));
    }
}
