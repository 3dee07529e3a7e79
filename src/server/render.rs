//! HTML rendering of the dashboard pages
//!
//! Templates are compiled once into a [`Renderer`] and shared through the
//! application state. Template names end in `.html`, so tera escapes every
//! interpolated value.

use crate::core::error::RenderError;
use crate::core::model::{CustomerSummary, InvoiceRow, format_currency};
use std::collections::HashMap;
use std::sync::Arc;
use tera::{Context, Tera, Value};

const LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{% block title %}Dashboard{% endblock title %} | Acme Dashboard</title>
</head>
<body>
  <nav>
    <a href="/dashboard/invoices">Invoices</a>
    <a href="/dashboard/customers">Customers</a>
  </nav>
  <main>{% block content %}{% endblock content %}</main>
</body>
</html>
"#;

const CUSTOMERS: &str = r#"{% extends "layout.html" %}
{% block title %}Customers{% endblock title %}
{% block content %}
<div>
  <h1>Customers</h1>
  <form method="get" action="/dashboard/customers">
    <input type="search" name="query" value="{{ query }}" placeholder="Search customers...">
  </form>
  <table class="customers">
    <thead>
      <tr><th>Name</th><th>Email</th><th>Total Invoices</th><th>Total Pending</th><th>Total Paid</th></tr>
    </thead>
    <tbody>
    {% for customer in customers %}
      <tr>
        <td><img src="{{ customer.image_url }}" alt="profile picture" width="28" height="28"> {{ customer.name }}</td>
        <td>{{ customer.email }}</td>
        <td>{{ customer.total_invoices }}</td>
        <td>{{ customer.total_pending | currency }}</td>
        <td>{{ customer.total_paid | currency }}</td>
      </tr>
    {% endfor %}
    {% if customers | length == 0 %}
      <tr><td colspan="5">No customers found.</td></tr>
    {% endif %}
    </tbody>
  </table>
</div>
{% endblock content %}
"#;

const INVOICES: &str = r#"{% extends "layout.html" %}
{% block title %}Invoices{% endblock title %}
{% block content %}
<div>
  <h1>Invoices</h1>
  <table class="invoices">
    <thead>
      <tr><th>Customer</th><th>Email</th><th>Amount</th><th>Date</th><th>Status</th><th></th></tr>
    </thead>
    <tbody>
    {% for invoice in invoices %}
      <tr>
        <td>{{ invoice.name }}</td>
        <td>{{ invoice.email }}</td>
        <td>{{ invoice.amount | currency }}</td>
        <td>{{ invoice.date }}</td>
        <td class="status-{{ invoice.status }}">{{ invoice.status }}</td>
        <td>
          <form method="post" action="/dashboard/invoices/{{ invoice.id }}/delete">
            <button type="submit">Delete</button>
          </form>
        </td>
      </tr>
    {% endfor %}
    {% if invoices | length == 0 %}
      <tr><td colspan="6">No invoices yet.</td></tr>
    {% endif %}
    </tbody>
  </table>
</div>
{% endblock content %}
"#;

/// Compiled page templates
#[derive(Clone)]
pub struct Renderer {
    tera: Arc<Tera>,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("layout.html", LAYOUT),
            ("customers.html", CUSTOMERS),
            ("invoices.html", INVOICES),
        ])
        .map_err(|e| template_error("layout.html", e))?;
        tera.register_filter("currency", currency_filter);
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// The customers table for a search
    pub fn customers(
        &self,
        query: &str,
        customers: &[CustomerSummary],
    ) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("query", query);
        context.insert("customers", customers);
        self.tera
            .render("customers.html", &context)
            .map_err(|e| template_error("customers.html", e))
    }

    /// The invoices listing
    pub fn invoices(&self, invoices: &[InvoiceRow]) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("invoices", invoices);
        self.tera
            .render("invoices.html", &context)
            .map_err(|e| template_error("invoices.html", e))
    }
}

fn template_error(template: &str, e: tera::Error) -> RenderError {
    // tera nests the useful message in the source chain
    let mut message = e.to_string();
    let mut source = std::error::Error::source(&e);
    while let Some(inner) = source {
        message = format!("{}: {}", message, inner);
        source = inner.source();
    }
    RenderError::Template {
        template: template.to_string(),
        message,
    }
}

fn currency_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let minor = value
        .as_i64()
        .ok_or_else(|| tera::Error::msg(format!("currency expects an integer, got {}", value)))?;
    Ok(Value::String(format_currency(minor)))
}
