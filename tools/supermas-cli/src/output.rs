//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use supermas_commerce::catalog::MenuItem;
use supermas_commerce::Money;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
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
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
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

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print the order total line.
    pub fn total(&self, item_count: u32, total: Money) {
        if self.json {
            return;
        }
        println!(
            "  {} {}",
            style(format!("Total ({} {})", item_count, plural(item_count, "item"))).bold(),
            style(total.display()).bold().green()
        );
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Price as shown on a menu card: "from €11.00" when variants change it.
pub fn price_label(item: &MenuItem) -> String {
    let varies = item.variants.iter().any(|v| !v.price_delta.is_zero());
    if varies {
        format!("from {}", item.starting_price())
    } else {
        item.starting_price().display()
    }
}

/// Signed variant delta, e.g. "+€2.00"; empty when zero.
pub fn delta_label(delta: Money) -> String {
    if delta.is_zero() {
        String::new()
    } else if delta.is_negative() {
        delta.display()
    } else {
        format!("+{}", delta.display())
    }
}

/// Format a Unix timestamp as local wall-clock time.
pub fn format_timestamp(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|t| {
            t.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| secs.to_string())
}

/// Naive English plural.
pub fn plural(count: u32, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use supermas_commerce::catalog::Catalog;

    #[test]
    fn test_price_label() {
        let catalog = Catalog::builtin();
        assert_eq!(price_label(catalog.find("p1").unwrap()), "from €11.00");
        assert_eq!(price_label(catalog.find("c2").unwrap()), "€5.50");
    }

    #[test]
    fn test_delta_label() {
        assert_eq!(delta_label(Money::eur(0)), "");
        assert_eq!(delta_label(Money::eur(200)), "+€2.00");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "item"), "item");
        assert_eq!(plural(3, "item"), "items");
    }
}
