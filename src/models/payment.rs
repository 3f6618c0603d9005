//! Yearly fee payment state, resolved once when the dataset is loaded.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Badge, BadgeColor};
use crate::listing::normalize::fold_for_search;

/// Logical payment state of one tracked fee year.
///
/// Variants are declared in sort order: `Hidden < Unknown < Unpaid < Waived < Paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentStatus {
    /// No data for that year; nothing is rendered.
    Hidden,
    /// A value was present but not recognized.
    Unknown,
    Unpaid,
    Waived,
    Paid,
}

impl PaymentStatus {
    /// Resolve a raw source value (bool, string or null).
    pub fn resolve(raw: &Value) -> Self {
        match raw {
            Value::Null => PaymentStatus::Hidden,
            Value::Bool(true) => PaymentStatus::Paid,
            Value::Bool(false) => PaymentStatus::Unpaid,
            Value::String(text) => Self::resolve_text(text),
            _ => PaymentStatus::Unknown,
        }
    }

    fn resolve_text(text: &str) -> Self {
        match fold_for_search(text).as_str() {
            "" | "-" => PaymentStatus::Hidden,
            "true" | "paid" | "pago" | "paga" | "sim" => PaymentStatus::Paid,
            "false" | "not paid" | "unpaid" | "nao pago" | "nao paga" | "nao" => {
                PaymentStatus::Unpaid
            }
            "waived" | "dispensado" | "dispensada" | "isento" => PaymentStatus::Waived,
            _ => PaymentStatus::Unknown,
        }
    }

    /// Badge for the fee cell, `None` when the cell stays empty.
    pub fn badge(self) -> Option<Badge> {
        let (label, color, icon) = match self {
            PaymentStatus::Hidden => return None,
            PaymentStatus::Paid => ("Pago", BadgeColor::Success, "Check"),
            PaymentStatus::Unpaid => ("Por pagar", BadgeColor::Error, "XClose"),
            PaymentStatus::Waived => ("Dispensado", BadgeColor::Gray, "MinusCircle"),
            PaymentStatus::Unknown => ("Desconhecido", BadgeColor::Warning, "HelpCircle"),
        };

        Some(Badge {
            label: label.to_string(),
            color,
            icon: Some(icon),
            tooltip: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_booleans() {
        assert_eq!(PaymentStatus::resolve(&json!(true)), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::resolve(&json!(false)), PaymentStatus::Unpaid);
    }

    #[test]
    fn test_waived_ignores_case_and_accents() {
        assert_eq!(PaymentStatus::resolve(&json!("Dispensado")), PaymentStatus::Waived);
        assert_eq!(PaymentStatus::resolve(&json!("DISPENSADO")), PaymentStatus::Waived);
        assert_eq!(PaymentStatus::resolve(&json!("dispênsado ")), PaymentStatus::Waived);
    }

    #[test]
    fn test_empty_and_dash_are_hidden() {
        assert_eq!(PaymentStatus::resolve(&json!("")), PaymentStatus::Hidden);
        assert_eq!(PaymentStatus::resolve(&json!("-")), PaymentStatus::Hidden);
        assert_eq!(PaymentStatus::resolve(&json!("  ")), PaymentStatus::Hidden);
        assert_eq!(PaymentStatus::resolve(&Value::Null), PaymentStatus::Hidden);
        assert!(PaymentStatus::Hidden.badge().is_none());
    }

    #[test]
    fn test_string_spellings() {
        assert_eq!(PaymentStatus::resolve(&json!("true")), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::resolve(&json!("Paid")), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::resolve(&json!("Não pago")), PaymentStatus::Unpaid);
        assert_eq!(PaymentStatus::resolve(&json!("not paid")), PaymentStatus::Unpaid);
    }

    #[test]
    fn test_unrecognized_is_unknown_not_waived() {
        assert_eq!(PaymentStatus::resolve(&json!("talvez")), PaymentStatus::Unknown);
        assert_eq!(PaymentStatus::resolve(&json!(2025)), PaymentStatus::Unknown);
        assert_eq!(
            PaymentStatus::Unknown.badge().map(|b| b.color),
            Some(BadgeColor::Warning)
        );
    }

    #[test]
    fn test_sort_order() {
        assert!(PaymentStatus::Hidden < PaymentStatus::Unknown);
        assert!(PaymentStatus::Unknown < PaymentStatus::Unpaid);
        assert!(PaymentStatus::Unpaid < PaymentStatus::Waived);
        assert!(PaymentStatus::Waived < PaymentStatus::Paid);
    }
}
