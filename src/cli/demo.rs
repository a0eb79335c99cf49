use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::{KickbookError, Result};
use crate::models::{Brand, Draft, TransactionId, TxnType};
use crate::store::{Lookup, Notification, TransactionStore};

/// Scripted session against the sample data: add a Puma sale, drop the
/// Adidas purchase, then bump the Nike amount through the edit flow.
pub fn run() -> Result<()> {
    let mut store = TransactionStore::with_sample_data();
    println!("{}", "Sample transactions".bold());
    println!("{}", render_table(&store));

    *store.draft_mut() = Draft::new("2023-03-01", "300", TxnType::Income, Brand::Puma);
    let added = store.submit();
    report("Add Puma / Income / 300", added, &store)?;

    let adidas = find_brand(&store, Brand::Adidas)?;
    let deleted = store.delete(adidas);
    report("Delete Adidas", deleted, &store)?;

    let nike = find_brand(&store, Brand::Nike)?;
    if !store.begin_edit(nike).is_found() {
        return Err(KickbookError::Other(format!("demo: no transaction {nike}")));
    }
    store.draft_mut().amount = "250".to_string();
    let updated = store.submit();
    report("Edit Nike amount to 250", updated, &store)?;

    Ok(())
}

fn report(step: &str, result: Lookup<Notification>, store: &TransactionStore) -> Result<()> {
    let note = result
        .found()
        .ok_or_else(|| KickbookError::Other(format!("demo step failed: {step}")))?;
    let outcome = format!("\u{2714} {}", note.message());
    println!();
    println!("{} {}", step.bold(), outcome.as_str().green());
    println!("{}", render_table(store));
    Ok(())
}

fn find_brand(store: &TransactionStore, brand: Brand) -> Result<TransactionId> {
    store
        .transactions()
        .iter()
        .find(|t| t.brand == Some(brand))
        .map(|t| t.id)
        .ok_or_else(|| KickbookError::Other(format!("demo: no {} transaction", brand.as_str())))
}

pub(crate) fn render_table(store: &TransactionStore) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Amount", "Type", "Brand"]);
    for txn in store.transactions() {
        let id = txn.id.to_string();
        table.add_row(vec![
            Cell::new(&id[..8]),
            Cell::new(&txn.date),
            Cell::new(&txn.amount),
            Cell::new(txn.kind_label()),
            Cell::new(txn.brand_label()),
        ]);
    }
    table
}
