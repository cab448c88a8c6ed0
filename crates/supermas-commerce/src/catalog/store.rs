//! Business information shown alongside the menu.

use serde::{Deserialize, Serialize};

/// Static storefront details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub opening_hours: Vec<OpeningHours>,
}

/// One row of the opening-hours table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpeningHours {
    /// Day range label, e.g. "Mon - Fri".
    pub days: String,
    /// Opening time, 24h "HH:MM".
    pub opens: String,
    /// Closing time, 24h "HH:MM"; "00:00" means midnight.
    pub closes: String,
}

impl OpeningHours {
    pub fn new(days: impl Into<String>, opens: impl Into<String>, closes: impl Into<String>) -> Self {
        Self {
            days: days.into(),
            opens: opens.into(),
            closes: closes.into(),
        }
    }

    pub fn display(&self) -> String {
        format!("{}  {} - {}", self.days, self.opens, self.closes)
    }
}

impl Default for StoreInfo {
    fn default() -> Self {
        Self {
            name: "SuperMas".to_string(),
            address: "Main Street Abbeyfeale V94E13C".to_string(),
            phone: "06832360".to_string(),
            opening_hours: vec![
                OpeningHours::new("Mon - Fri", "12:00", "23:00"),
                OpeningHours::new("Sat - Sun", "13:00", "00:00"),
            ],
        }
    }
}
