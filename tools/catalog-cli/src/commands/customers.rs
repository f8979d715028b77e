//! Customer listing.

use anyhow::{bail, Result};
use catalog_view::prelude::Customer;
use console::style;

use super::{load_customers, CustomersArgs};
use crate::context::Context;

/// Run the customers command.
pub async fn run(args: CustomersArgs, ctx: &Context) -> Result<()> {
    let Some(path) = ctx.customers_file(args.customers.as_deref()) else {
        bail!("No customer export configured. Pass --customers or set sources.customers_file.");
    };
    let customers = load_customers(&path).await?;

    if ctx.output.is_json() {
        ctx.output.json(&customers);
        return Ok(());
    }

    ctx.output.header("Customers");
    if customers.is_empty() {
        ctx.output.info("No customers.");
        return Ok(());
    }

    println!(
        "  {:<24} {:<32} {:<16} {}",
        style("Name").bold(),
        style("Email").bold(),
        style("Phone").bold(),
        style("Role").bold()
    );
    for customer in &customers {
        println!("  {}", row(customer));
    }
    ctx.output.rule();
    ctx.output.info(&format!("{} customers", customers.len()));

    Ok(())
}

fn row(customer: &Customer) -> String {
    format!(
        "{:<24} {:<32} {:<16} {}",
        customer.name,
        customer.email,
        customer.phone.as_deref().unwrap_or("-"),
        customer.role
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_without_phone() {
        let mut customer = Customer::new("c1", "Asha");
        customer.email = "asha@example.com".to_string();

        let line = row(&customer);
        assert!(line.starts_with("Asha "));
        assert!(line.contains("asha@example.com"));
        assert!(line.trim_end().ends_with("customer"));
        assert!(line.contains(" - "));
    }
}
