//! Member record as listed in the "Lista de sócios" table.

use std::collections::BTreeMap;
use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::{CategoryTag, MemberStatus, PaymentStatus};
use crate::errors::AppError;
use crate::listing::normalize::{flatten_search_text, fold_for_search};
use crate::listing::sort::columns;

/// Membership number ("Nº Sócio"). The source may carry it as a number or a numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MembershipNumber(pub u64);

impl fmt::Display for MembershipNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for MembershipNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(MembershipNumber(n)),
            Raw::Text(text) => text.trim().parse().map(MembershipNumber).map_err(|_| {
                de::Error::custom(format!("invalid membership number {:?}", text))
            }),
        }
    }
}

/// Record shape of the bundled dataset. Fee years arrive as `quota<YYYY>Paga` keys.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SourceMember {
    username: String,
    numero_socio: MembershipNumber,
    name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    avatar_url: String,
    #[serde(default)]
    telemovel: String,
    #[serde(default)]
    status: MemberStatus,
    #[serde(default)]
    joia_paga: bool,
    #[serde(default, rename = "adicionadoWhatsApp")]
    adicionado_whatsapp: bool,
    #[serde(default)]
    kit_entregue: bool,
    #[serde(default)]
    tipo: Vec<CategoryTag>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// A member of the association.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub username: String,
    pub membership_number: MembershipNumber,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub avatar_url: String,
    pub phone: String,
    pub status: MemberStatus,
    pub initiation_fee_paid: bool,
    /// Payment state per tracked year.
    pub fees: BTreeMap<u16, PaymentStatus>,
    pub added_to_group_channel: bool,
    pub onboarding_kit_delivered: bool,
    pub tags: Vec<CategoryTag>,
    /// Folded text of the whole source record, matched by the search box.
    #[serde(skip)]
    search_text: String,
}

impl Member {
    /// Build a member from one dataset record.
    pub fn from_source(record: Value) -> Result<Self, AppError> {
        let search_text = fold_for_search(&flatten_search_text(&record));

        let source: SourceMember = serde_json::from_value(record)
            .map_err(|e| AppError::Validation(format!("Invalid member record: {}", e)))?;

        let mut fees = BTreeMap::new();
        for (key, raw) in &source.extra {
            let Some(year) = columns::fee_year(key) else {
                continue;
            };
            let status = PaymentStatus::resolve(raw);
            if status == PaymentStatus::Unknown {
                tracing::warn!(
                    username = %source.username,
                    year,
                    value = %raw,
                    "Unrecognized fee payment value"
                );
            }
            fees.insert(year, status);
        }

        Ok(Self {
            username: source.username,
            membership_number: source.numero_socio,
            name: source.name,
            email: source.email,
            gender: source.gender,
            avatar_url: source.avatar_url,
            phone: source.telemovel,
            status: source.status,
            initiation_fee_paid: source.joia_paga,
            fees,
            added_to_group_channel: source.adicionado_whatsapp,
            onboarding_kit_delivered: source.kit_entregue,
            tags: source.tipo,
            search_text,
        })
    }

    /// Folded search text.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Payment state for `year`, `Hidden` when the year is not tracked.
    pub fn fee(&self, year: u16) -> PaymentStatus {
        self.fees.get(&year).copied().unwrap_or(PaymentStatus::Hidden)
    }

    /// Give every tracked year an entry so all rows expose the same fee columns.
    pub(crate) fn track_years(&mut self, years: &[u16]) {
        for year in years {
            self.fees.entry(*year).or_insert(PaymentStatus::Hidden);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn joao() -> Value {
        json!({
            "name": "João Barbosa",
            "username": "@joao",
            "status": "Regularizado",
            "email": "joao@email.com",
            "tipo": [{ "name": "Fundador", "color": "brand" }],
            "avatarUrl": "https://example.com/joao.webp",
            "numeroSocio": "7",
            "telemovel": "912 345 678",
            "joiaPaga": true,
            "quota2025Paga": true,
            "quota2026Paga": "Dispensado",
            "adicionadoWhatsApp": true,
            "kitEntregue": false
        })
    }

    #[test]
    fn test_from_source_maps_fields() {
        let member = Member::from_source(joao()).unwrap();

        assert_eq!(member.username, "@joao");
        assert_eq!(member.membership_number, MembershipNumber(7));
        assert_eq!(member.phone, "912 345 678");
        assert_eq!(member.status, MemberStatus::Regularized);
        assert!(member.initiation_fee_paid);
        assert!(member.added_to_group_channel);
        assert!(!member.onboarding_kit_delivered);
        assert_eq!(member.fee(2025), PaymentStatus::Paid);
        assert_eq!(member.fee(2026), PaymentStatus::Waived);
        assert_eq!(member.fee(2024), PaymentStatus::Hidden);
        assert_eq!(member.tags[0].name, "Fundador");
    }

    #[test]
    fn test_search_text_is_folded() {
        let member = Member::from_source(joao()).unwrap();
        assert!(member.search_text().contains("joao barbosa"));
        assert!(member.search_text().contains("fundador brand"));
        assert!(member.search_text().contains("dispensado"));
    }

    #[test]
    fn test_numeric_membership_number() {
        let mut record = joao();
        record["numeroSocio"] = json!(42);
        let member = Member::from_source(record).unwrap();
        assert_eq!(member.membership_number.to_string(), "42");
    }

    #[test]
    fn test_invalid_membership_number_is_rejected() {
        let mut record = joao();
        record["numeroSocio"] = json!("sete");
        let err = Member::from_source(record).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_track_years_fills_hidden() {
        let mut member = Member::from_source(joao()).unwrap();
        member.track_years(&[2024, 2025]);
        assert_eq!(member.fees.get(&2024), Some(&PaymentStatus::Hidden));
        assert_eq!(member.fees.get(&2025), Some(&PaymentStatus::Paid));
    }
}
