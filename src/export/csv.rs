//! CSV Export functionality
//!
//! Exports transactions, budgets, and subscriptions to CSV format.

use std::io::Write;

use crate::error::TrackerResult;
use crate::models::{Budget, Subscription, Transaction};

const TRANSACTION_HEADERS: [&str; 7] = ["ID", "Date", "Description", "Category", "Type", "Amount", "Notes"];
const BUDGET_HEADERS: [&str; 7] = ["ID", "Name", "Category", "Limit", "Period", "Icon", "Color"];
const SUBSCRIPTION_HEADERS: [&str; 9] = [
    "ID",
    "Name",
    "Amount",
    "Billing Cycle",
    "Next Billing",
    "Monthly Equivalent",
    "Category",
    "Active",
    "Notes",
];

/// Fields are quoted only when they hold a quote, comma or newline
fn writer<W: Write>(out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out)
}

fn amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Export transactions to CSV
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    out: &mut W,
) -> TrackerResult<()> {
    let mut wtr = writer(out);
    wtr.write_record(TRANSACTION_HEADERS)?;

    for txn in transactions {
        wtr.write_record([
            txn.id.as_uuid().to_string(),
            txn.date.to_string(),
            txn.description.clone(),
            txn.category.clone(),
            txn.kind.as_str().to_string(),
            amount(txn.amount),
            txn.notes.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Export budgets to CSV
pub fn export_budgets_csv<W: Write>(budgets: &[Budget], out: &mut W) -> TrackerResult<()> {
    let mut wtr = writer(out);
    wtr.write_record(BUDGET_HEADERS)?;

    for budget in budgets {
        wtr.write_record([
            budget.id.as_uuid().to_string(),
            budget.name.clone(),
            budget.category.clone(),
            amount(budget.limit),
            budget.period.to_string(),
            budget.icon.name().to_string(),
            budget.color.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Export subscriptions to CSV
pub fn export_subscriptions_csv<W: Write>(
    subscriptions: &[Subscription],
    out: &mut W,
) -> TrackerResult<()> {
    let mut wtr = writer(out);
    wtr.write_record(SUBSCRIPTION_HEADERS)?;

    for sub in subscriptions {
        wtr.write_record([
            sub.id.as_uuid().to_string(),
            sub.name.clone(),
            amount(sub.amount),
            sub.cycle.to_string(),
            sub.next_billing.to_string(),
            amount(sub.monthly_equivalent()),
            sub.category.clone(),
            sub.active.to_string(),
            sub.notes.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
