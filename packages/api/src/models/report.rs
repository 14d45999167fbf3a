//! Sales report payloads shown on the home page.

use serde::{Deserialize, Serialize};

use super::de;

/// Totals for the stat cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCounts {
    #[serde(default, deserialize_with = "de::integer")]
    pub client_count: i64,
    #[serde(default, deserialize_with = "de::integer")]
    pub product_count: i64,
    #[serde(default, deserialize_with = "de::integer")]
    pub payment_count: i64,
}

/// A client with an outstanding balance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClientDue {
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub last_name: String,
    #[serde(default, deserialize_with = "de::decimal")]
    pub amount_due: f64,
}

/// New clients registered in one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyClientCount {
    /// `YYYY-MM`
    pub month: String,
    #[serde(deserialize_with = "de::integer")]
    pub count: i64,
}

const MONTH_NAMES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

impl MonthlyClientCount {
    /// Spanish month name for the chart axis; the raw value when it is not `YYYY-MM`.
    pub fn month_label(&self) -> String {
        self.month
            .split_once('-')
            .and_then(|(_, m)| m.get(..2).unwrap_or(m).parse::<usize>().ok())
            .and_then(|m| m.checked_sub(1))
            .and_then(|i| MONTH_NAMES.get(i))
            .map(|name| name.to_string())
            .unwrap_or_else(|| self.month.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(m: &str) -> MonthlyClientCount {
        MonthlyClientCount {
            month: m.to_string(),
            count: 0,
        }
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month("2024-01").month_label(), "enero");
        assert_eq!(month("2024-12").month_label(), "diciembre");
        assert_eq!(month("2024-13").month_label(), "2024-13");
        assert_eq!(month("2024-00").month_label(), "2024-00");
        assert_eq!(month("marzo").month_label(), "marzo");
    }

    #[test]
    fn test_counts_accept_strings() {
        let c: MonthlyClientCount = serde_json::from_str(r#"{"month":"2024-03","count":"12"}"#).unwrap();
        assert_eq!(c.count, 12);
        let p: PaymentCounts = serde_json::from_str(r#"{"clientCount":"5"}"#).unwrap();
        assert_eq!(p.client_count, 5);
        assert_eq!(p.payment_count, 0);
    }
}
