//! Member status as shown in the "Status" column.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Badge, BadgeColor, Tooltip};
use crate::listing::normalize::fold_for_search;

/// Membership standing of a member.
///
/// The four named variants are the ones the association uses today. Any other
/// label is kept verbatim in `Other` and rendered with a neutral badge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberStatus {
    /// "Regularizado": initiation fee and dues are up to date.
    Regularized,
    /// "Expulso"
    Expelled,
    /// "Atraso": behind on dues.
    Late,
    /// "Notificado": notified about late dues, with a deadline.
    Notified,
    Other(String),
}

impl MemberStatus {
    /// Parse a status label. Matching ignores case and accents.
    pub fn parse(raw: &str) -> Self {
        match fold_for_search(raw).as_str() {
            "regularizado" => MemberStatus::Regularized,
            "expulso" => MemberStatus::Expelled,
            "atraso" => MemberStatus::Late,
            "notificado" => MemberStatus::Notified,
            _ => MemberStatus::Other(raw.trim().to_string()),
        }
    }

    /// Display label.
    pub fn label(&self) -> &str {
        match self {
            MemberStatus::Regularized => "Regularizado",
            MemberStatus::Expelled => "Expulso",
            MemberStatus::Late => "Atraso",
            MemberStatus::Notified => "Notificado",
            MemberStatus::Other(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, MemberStatus::Other(_))
    }

    /// Badge, icon and tooltip for the status cell.
    pub fn badge(&self) -> Badge {
        let (color, icon, title, description) = match self {
            MemberStatus::Regularized => (
                BadgeColor::Success,
                "Check",
                "Estado Regularizado",
                "O membro está regularizado se a jóia e a quota estiverem em dia.",
            ),
            MemberStatus::Expelled => (
                BadgeColor::Gray,
                "UserX01",
                "Estado Expulso",
                "O membro encontra-se expulso por incumprimento prolongado das quotas (mais de 2 anos), violação grave ou repetida dos estatutos, conduta desrespeitosa não corrigida no prazo definido, ou prática de atos ilegais ou prejudiciais à reputação da associação.",
            ),
            MemberStatus::Late => (
                BadgeColor::Warning,
                "ClockSnooze",
                "Estado de Atraso",
                "O membro encontra-se em atraso com as quotas.",
            ),
            MemberStatus::Notified => (
                BadgeColor::Error,
                "Mail01",
                "Estado de Notificado",
                "O membro foi notificado sobre o atraso no pagamento das quotas e tem um prazo para regularizar a situação antes de ser expulso.",
            ),
            MemberStatus::Other(_) => (
                BadgeColor::Gray,
                "HelpCircle",
                "Estado desconhecido",
                "Este estado não é reconhecido pela aplicação.",
            ),
        };

        Badge {
            label: self.label().to_string(),
            color,
            icon: Some(icon),
            tooltip: Some(Tooltip {
                title: title.to_string(),
                description: description.to_string(),
            }),
        }
    }
}

/// A record without a status gets an empty `Other`, shown with the neutral badge.
impl Default for MemberStatus {
    fn default() -> Self {
        MemberStatus::Other(String::new())
    }
}

impl Serialize for MemberStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for MemberStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|raw| MemberStatus::parse(&raw)).unwrap_or_default())
    }
}
