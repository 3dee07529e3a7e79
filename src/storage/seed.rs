//! Sample customers and invoices for development databases

use crate::core::model::{Customer, Invoice, InvoiceStatus};
use chrono::NaiveDate;

const CUSTOMERS: &[(&str, &str, &str, &str)] = &[
    (
        "d6e15727-9fe1-4961-8c5b-ea44a9bd81aa",
        "Evil Rabbit",
        "evil@rabbit.com",
        "/customers/evil-rabbit.png",
    ),
    (
        "3958dc9e-712f-4377-85e9-fec4b6a6442a",
        "Delba de Oliveira",
        "delba@oliveira.com",
        "/customers/delba-de-oliveira.png",
    ),
    (
        "3958dc9e-742f-4377-85e9-fec4b6a6442a",
        "Lee Robinson",
        "lee@robinson.com",
        "/customers/lee-robinson.png",
    ),
    (
        "76d65c26-f784-44a2-ac19-586678f7c2f2",
        "Michael Novotny",
        "michael@novotny.com",
        "/customers/michael-novotny.png",
    ),
    (
        "cc27c14a-0acf-4f4a-a6c9-d45682c144b9",
        "Amy Burns",
        "amy@burns.com",
        "/customers/amy-burns.png",
    ),
    (
        "13d07535-c59e-4157-a011-f8d2ef4e0cbb",
        "Balazs Orban",
        "balazs@orban.com",
        "/customers/balazs-orban.png",
    ),
];

// (id, customer index, amount in cents, status, date)
const INVOICES: &[(&str, usize, i64, InvoiceStatus, &str)] = &[
    ("8f1c31f4-6b0c-4bbc-9d9e-1d5b1a7f0a01", 0, 15795, InvoiceStatus::Pending, "2022-12-06"),
    ("8f1c31f4-6b0c-4bbc-9d9e-1d5b1a7f0a02", 1, 20348, InvoiceStatus::Pending, "2022-11-14"),
    ("8f1c31f4-6b0c-4bbc-9d9e-1d5b1a7f0a03", 4, 3040, InvoiceStatus::Paid, "2022-10-29"),
    ("8f1c31f4-6b0c-4bbc-9d9e-1d5b1a7f0a04", 3, 44800, InvoiceStatus::Paid, "2023-09-10"),
    ("8f1c31f4-6b0c-4bbc-9d9e-1d5b1a7f0a05", 5, 34577, InvoiceStatus::Pending, "2023-08-05"),
    ("8f1c31f4-6b0c-4bbc-9d9e-1d5b1a7f0a06", 2, 54246, InvoiceStatus::Pending, "2023-07-16"),
    ("8f1c31f4-6b0c-4bbc-9d9e-1d5b1a7f0a07", 0, 666, InvoiceStatus::Pending, "2023-06-27"),
    ("8f1c31f4-6b0c-4bbc-9d9e-1d5b1a7f0a08", 3, 32545, InvoiceStatus::Paid, "2023-06-09"),
    ("8f1c31f4-6b0c-4bbc-9d9e-1d5b1a7f0a09", 4, 1250, InvoiceStatus::Paid, "2023-06-17"),
    ("8f1c31f4-6b0c-4bbc-9d9e-1d5b1a7f0a10", 5, 8546, InvoiceStatus::Paid, "2023-06-07"),
    ("8f1c31f4-6b0c-4bbc-9d9e-1d5b1a7f0a11", 1, 500, InvoiceStatus::Paid, "2023-08-19"),
    ("8f1c31f4-6b0c-4bbc-9d9e-1d5b1a7f0a12", 5, 8945, InvoiceStatus::Paid, "2023-06-03"),
    ("8f1c31f4-6b0c-4bbc-9d9e-1d5b1a7f0a13", 2, 1000, InvoiceStatus::Paid, "2022-06-05"),
];

pub fn customers() -> Vec<Customer> {
    CUSTOMERS
        .iter()
        .map(|(id, name, email, image_url)| Customer {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            image_url: image_url.to_string(),
        })
        .collect()
}

/// Sample invoices; dates that fail to parse are skipped
pub fn invoices() -> Vec<Invoice> {
    INVOICES
        .iter()
        .filter_map(|(id, customer, amount, status, date)| {
            let date = NaiveDate::parse_from_str(date, crate::core::model::DATE_FORMAT).ok()?;
            Some(Invoice {
                id: id.to_string(),
                customer_id: CUSTOMERS[*customer].0.to_string(),
                amount: *amount,
                status: *status,
                date,
            })
        })
        .collect()
}

#[cfg(feature = "in-memory")]
pub fn populate(
    store: &crate::storage::InMemoryStore,
) -> Result<(), crate::core::error::StoreError> {
    for customer in customers() {
        store.add_customer(customer)?;
    }
    for invoice in invoices() {
        store.add_invoice(invoice)?;
    }
    Ok(())
}
