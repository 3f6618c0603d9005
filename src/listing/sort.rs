//! Column sorting through a registry of typed comparators.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::normalize::collate;
use crate::errors::AppError;
use crate::models::Member;

/// Column ids, matching the source dataset's field names.
pub mod columns {
    pub const MEMBERSHIP_NUMBER: &str = "numeroSocio";
    pub const NAME: &str = "name";
    pub const STATUS: &str = "status";
    pub const INITIATION_FEE: &str = "joiaPaga";
    pub const GROUP_CHANNEL: &str = "adicionadoWhatsApp";
    pub const ONBOARDING_KIT: &str = "kitEntregue";

    /// Column id of a yearly fee, e.g. `quota2026Paga`.
    pub fn fee(year: u16) -> String {
        format!("quota{}Paga", year)
    }

    /// Year of a fee column id.
    pub fn fee_year(column: &str) -> Option<u16> {
        let digits = column.strip_prefix("quota")?.strip_suffix("Paga")?;
        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Which column the table is sorted by, and in which direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortDescriptor {
    pub column: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortDescriptor {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

impl Default for SortDescriptor {
    fn default() -> Self {
        Self::new(columns::MEMBERSHIP_NUMBER, SortDirection::Ascending)
    }
}

type Comparator = Box<dyn Fn(&Member, &Member) -> Ordering + Send + Sync>;

/// Maps sortable column ids to their comparison functions.
pub struct ComparatorRegistry {
    comparators: HashMap<String, Comparator>,
    order: Vec<String>,
}

impl ComparatorRegistry {
    pub fn new() -> Self {
        Self {
            comparators: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// The member table's sortable columns, including one fee column per tracked year.
    pub fn for_members(tracked_years: &[u16]) -> Self {
        let mut registry = Self::new();
        registry.register(columns::MEMBERSHIP_NUMBER, |a, b| {
            a.membership_number.cmp(&b.membership_number)
        });
        registry.register(columns::NAME, |a, b| collate(&a.name, &b.name));
        registry.register(columns::STATUS, |a, b| {
            collate(a.status.label(), b.status.label())
        });
        registry.register(columns::INITIATION_FEE, |a, b| {
            a.initiation_fee_paid.cmp(&b.initiation_fee_paid)
        });
        for &year in tracked_years {
            registry.register(columns::fee(year), move |a, b| a.fee(year).cmp(&b.fee(year)));
        }
        registry.register(columns::GROUP_CHANNEL, |a, b| {
            a.added_to_group_channel.cmp(&b.added_to_group_channel)
        });
        registry.register(columns::ONBOARDING_KIT, |a, b| {
            a.onboarding_kit_delivered.cmp(&b.onboarding_kit_delivered)
        });
        registry
    }

    /// Register (or replace) the comparator of a column.
    pub fn register<F>(&mut self, column: impl Into<String>, compare: F)
    where
        F: Fn(&Member, &Member) -> Ordering + Send + Sync + 'static,
    {
        let column = column.into();
        if !self.comparators.contains_key(&column) {
            self.order.push(column.clone());
        }
        self.comparators.insert(column, Box::new(compare));
    }

    /// Sortable column ids in registration order.
    pub fn columns(&self) -> &[String] {
        &self.order
    }

    pub fn is_sortable(&self, column: &str) -> bool {
        self.comparators.contains_key(column)
    }

    /// Look up the comparator for a descriptor.
    pub fn resolve(&self, descriptor: &SortDescriptor) -> Result<ResolvedComparator<'_>, AppError> {
        let compare = self.comparators.get(&descriptor.column).ok_or_else(|| {
            AppError::BadRequest(format!("Column {} is not sortable", descriptor.column))
        })?;

        Ok(ResolvedComparator {
            compare,
            direction: descriptor.direction,
        })
    }
}

impl Default for ComparatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A comparator bound to a direction.
pub struct ResolvedComparator<'a> {
    compare: &'a Comparator,
    direction: SortDirection,
}

impl ResolvedComparator<'_> {
    pub fn compare(&self, a: &Member, b: &Member) -> Ordering {
        let ordering = (self.compare)(a, b);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Stable sort of `members` by `descriptor`; ties keep their current order.
pub fn sort_members(
    members: &mut [&Member],
    registry: &ComparatorRegistry,
    descriptor: &SortDescriptor,
) -> Result<(), AppError> {
    let comparator = registry.resolve(descriptor)?;
    members.sort_by(|a, b| comparator.compare(a, b));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::test_support::{member, member_with};
    use serde_json::json;

    fn usernames(members: &[&Member]) -> Vec<String> {
        members.iter().map(|m| m.username.clone()).collect()
    }

    fn sorted(members: &[Member], column: &str, direction: SortDirection) -> Vec<String> {
        let registry = ComparatorRegistry::for_members(&[2025, 2026]);
        let mut refs: Vec<&Member> = members.iter().collect();
        sort_members(&mut refs, &registry, &SortDescriptor::new(column, direction)).unwrap();
        usernames(&refs)
    }

    #[test]
    fn test_fee_column_ids() {
        assert_eq!(columns::fee(2026), "quota2026Paga");
        assert_eq!(columns::fee_year("quota2025Paga"), Some(2025));
        assert_eq!(columns::fee_year("quotaPaga"), None);
        assert_eq!(columns::fee_year("quota25Paga"), None);
        assert_eq!(columns::fee_year("joiaPaga"), None);
    }

    #[test]
    fn test_default_descriptor() {
        let descriptor = SortDescriptor::default();
        assert_eq!(descriptor.column, "numeroSocio");
        assert_eq!(descriptor.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_numeric_sort_both_directions() {
        let members = vec![
            member("@c", 30, "Carla", "Atraso"),
            member("@a", 2, "Ana", "Atraso"),
            member("@b", 11, "Bruno", "Atraso"),
        ];
        assert_eq!(sorted(&members, "numeroSocio", SortDirection::Ascending), vec!["@a", "@b", "@c"]);
        assert_eq!(sorted(&members, "numeroSocio", SortDirection::Descending), vec!["@c", "@b", "@a"]);
    }

    #[test]
    fn test_descending_reverses_strict_order() {
        let members = vec![
            member("@o", 1, "Óscar", "Atraso"),
            member("@b", 2, "beatriz", "Atraso"),
            member("@al", 3, "Álvaro", "Atraso"),
            member("@an", 4, "Ana", "Atraso"),
        ];
        let ascending = sorted(&members, "name", SortDirection::Ascending);
        assert_eq!(ascending, vec!["@al", "@an", "@b", "@o"]);

        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(sorted(&members, "name", SortDirection::Descending), reversed);
    }

    #[test]
    fn test_boolean_sort_is_stable() {
        let members = vec![
            member_with("@1", 1, "Um", "Atraso", json!({ "kitEntregue": true })),
            member_with("@2", 2, "Dois", "Atraso", json!({ "kitEntregue": false })),
            member_with("@3", 3, "Tres", "Atraso", json!({ "kitEntregue": true })),
            member_with("@4", 4, "Quatro", "Atraso", json!({ "kitEntregue": false })),
        ];
        assert_eq!(sorted(&members, "kitEntregue", SortDirection::Ascending), vec!["@2", "@4", "@1", "@3"]);
        assert_eq!(sorted(&members, "kitEntregue", SortDirection::Descending), vec!["@1", "@3", "@2", "@4"]);
    }

    #[test]
    fn test_status_sorts_by_label() {
        let members = vec![
            member("@r", 1, "R", "Regularizado"),
            member("@n", 2, "N", "Notificado"),
            member("@a", 3, "A", "Atraso"),
            member("@e", 4, "E", "Expulso"),
        ];
        assert_eq!(sorted(&members, "status", SortDirection::Ascending), vec!["@a", "@e", "@n", "@r"]);
    }

    #[test]
    fn test_fee_sort_uses_payment_order() {
        let members = vec![
            member_with("@paid", 1, "P", "Atraso", json!({ "quota2026Paga": true })),
            member_with("@waived", 2, "W", "Atraso", json!({ "quota2026Paga": "Dispensado" })),
            member_with("@hidden", 3, "H", "Atraso", json!({ "quota2026Paga": "-" })),
            member_with("@unpaid", 4, "U", "Atraso", json!({ "quota2026Paga": false })),
        ];
        assert_eq!(
            sorted(&members, "quota2026Paga", SortDirection::Ascending),
            vec!["@hidden", "@unpaid", "@waived", "@paid"]
        );
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        let registry = ComparatorRegistry::for_members(&[2025]);
        let members = vec![member("@a", 1, "A", "Atraso")];
        let mut refs: Vec<&Member> = members.iter().collect();

        let err = sort_members(&mut refs, &registry, &SortDescriptor::new("telemovel", SortDirection::Ascending))
            .unwrap_err();
        assert_eq!(err.error_code(), "BAD_REQUEST");
        assert!(!registry.is_sortable("quota2026Paga"));
        assert!(registry.is_sortable("quota2025Paga"));
    }

    #[test]
    fn test_columns_keep_table_order() {
        let registry = ComparatorRegistry::for_members(&[2025, 2026]);
        assert_eq!(
            registry.columns(),
            &[
                "numeroSocio",
                "name",
                "status",
                "joiaPaga",
                "quota2025Paga",
                "quota2026Paga",
                "adicionadoWhatsApp",
                "kitEntregue"
            ]
        );
    }

    #[test]
    fn test_register_replaces_existing_column() {
        let mut registry = ComparatorRegistry::new();
        registry.register("name", |a, b| a.name.cmp(&b.name));
        registry.register("name", |a, b| b.name.cmp(&a.name));
        assert_eq!(registry.columns().len(), 1);
    }
}
