//! Output formatting for the CLI.

use catalog_view::prelude::{Pagination, ProductRecord};
use console::{style, Term};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    term: Term,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            term: Term::stderr(),
        }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            let body = serde_json::json!({ "error": msg });
            eprintln!("{}", body);
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a horizontal rule as wide as the terminal allows.
    pub fn rule(&self) {
        if self.json {
            return;
        }
        let width = self.term_width().clamp(20, 80);
        println!("{}", style("─".repeat(width)).dim());
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Get terminal width.
    pub fn term_width(&self) -> usize {
        self.term.size().1 as usize
    }
}

/// Stock badge for a product card.
pub fn stock_badge(product: &ProductRecord) -> String {
    if product.is_in_stock() {
        style(format!("In stock ({})", product.stock)).green().to_string()
    } else {
        style("Out of stock").red().to_string()
    }
}

/// Discount badge, empty when there is no discount.
pub fn discount_badge(product: &ProductRecord) -> String {
    if product.has_discount() {
        style(format!("{}% OFF", product.discount_percentage))
            .yellow()
            .bold()
            .to_string()
    } else {
        String::new()
    }
}

/// Page strip such as `‹ 1 [2] 3 ›`.
pub fn page_strip(pagination: &Pagination, max_visible: usize) -> String {
    let mut parts = Vec::new();
    if pagination.has_prev {
        parts.push("‹".to_string());
    }
    for n in pagination.page_numbers(max_visible) {
        if n == pagination.page {
            parts.push(format!("[{}]", n));
        } else {
            parts.push(n.to_string());
        }
    }
    if pagination.has_next {
        parts.push("›".to_string());
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_strip() {
        assert_eq!(page_strip(&Pagination::new(2, 6, 13), 5), "‹ 1 [2] 3 ›");
        assert_eq!(page_strip(&Pagination::new(1, 6, 0), 5), "[1]");
    }

    #[test]
    fn test_discount_badge_empty_without_discount() {
        let product = ProductRecord::new("a", "A");
        assert!(discount_badge(&product).is_empty());
        let product = product.with_discount(25.0);
        assert!(console::strip_ansi_codes(&discount_badge(&product)).contains("25% OFF"));
    }

    #[test]
    fn test_stock_badge() {
        let product = ProductRecord::new("a", "A").with_stock(4);
        assert_eq!(console::strip_ansi_codes(&stock_badge(&product)), "In stock (4)");
        let product = ProductRecord::new("b", "B");
        assert_eq!(console::strip_ansi_codes(&stock_badge(&product)), "Out of stock");
    }
}
