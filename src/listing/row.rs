//! Per-row props for the member table and its action menu.

use serde::Serialize;

use crate::models::{tag_names, Badge, Member, MembershipNumber, TagSummary};

/// Fee cell for one tracked year.
#[derive(Debug, Clone, Serialize)]
pub struct FeeCell {
    pub year: u16,
    /// `None` when there is no data for that year.
    pub badge: Option<Badge>,
}

/// Entry of the row's "Mais ações" menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub action: MenuAction,
    pub label: String,
    pub icon: &'static str,
    pub destructive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuAction {
    ViewProfile,
    Settings,
    Info,
    Remove,
}

/// Header plus grouped entries of the row menu.
#[derive(Debug, Clone, Serialize)]
pub struct RowMenu {
    pub title: String,
    pub subtitle: String,
    pub groups: Vec<Vec<MenuItem>>,
}

/// Everything a table row needs to render one member.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRow {
    pub id: String,
    pub membership_number: MembershipNumber,
    pub name: String,
    pub avatar_url: String,
    /// Tag names under the avatar.
    pub subtitle: String,
    pub status: Badge,
    pub phone: String,
    pub initiation_fee_paid: bool,
    pub fees: Vec<FeeCell>,
    pub added_to_group_channel: bool,
    pub onboarding_kit_delivered: bool,
    pub tags: TagSummary,
    pub menu: RowMenu,
}

impl MemberRow {
    pub fn from_member(member: &Member, tracked_years: &[u16]) -> Self {
        let fees = tracked_years
            .iter()
            .map(|&year| FeeCell {
                year,
                badge: member.fee(year).badge(),
            })
            .collect();

        Self {
            id: member.username.clone(),
            membership_number: member.membership_number,
            name: member.name.clone(),
            avatar_url: member.avatar_url.clone(),
            subtitle: tag_names(&member.tags),
            status: member.status.badge(),
            phone: member.phone.clone(),
            initiation_fee_paid: member.initiation_fee_paid,
            fees,
            added_to_group_channel: member.added_to_group_channel,
            onboarding_kit_delivered: member.onboarding_kit_delivered,
            tags: TagSummary::of(&member.tags),
            menu: row_menu(member),
        }
    }
}

fn item(action: MenuAction, label: String, icon: &'static str) -> MenuItem {
    MenuItem {
        action,
        label,
        icon,
        destructive: action == MenuAction::Remove,
    }
}

fn row_menu(member: &Member) -> RowMenu {
    RowMenu {
        title: member.name.clone(),
        subtitle: format!("#{} - {}", member.membership_number, member.status.label()),
        groups: vec![
            vec![
                item(MenuAction::ViewProfile, "Ver perfil".to_string(), "User01"),
                item(MenuAction::Settings, "Definições".to_string(), "Settings01"),
            ],
            vec![
                item(
                    MenuAction::Info,
                    format!("Estado: {}", member.status.label()),
                    "LayersTwo01",
                ),
                item(
                    MenuAction::Info,
                    format!("N.º Sócio: {}", member.membership_number),
                    "HelpCircle",
                ),
                item(
                    MenuAction::Info,
                    format!("Tipo: {}", tag_names(&member.tags)),
                    "Container",
                ),
            ],
            vec![item(MenuAction::Remove, "Remover".to_string(), "LogOut01")],
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::test_support::member_with;
    use crate::models::BadgeColor;
    use serde_json::json;

    #[test]
    fn test_row_props() {
        let member = member_with(
            "@ana",
            12,
            "Ana Silva",
            "Atraso",
            json!({
                "quota2025Paga": true,
                "quota2026Paga": "",
                "tipo": [
                    { "name": "Motard", "color": "brand" },
                    { "name": "Staff", "color": "blue" },
                    { "name": "Fundador", "color": "orange" },
                    { "name": "Pendura", "color": "pink" }
                ]
            }),
        );
        let row = MemberRow::from_member(&member, &[2025, 2026]);

        assert_eq!(row.id, "@ana");
        assert_eq!(row.subtitle, "Motard, Staff, Fundador, Pendura");
        assert_eq!(row.status.color, BadgeColor::Warning);
        assert_eq!(row.tags.shown.len(), 3);
        assert_eq!(row.tags.overflow, 1);
        assert_eq!(row.fees.len(), 2);
        assert_eq!(row.fees[0].badge.as_ref().map(|b| b.label.as_str()), Some("Pago"));
        assert!(row.fees[1].badge.is_none());
    }

    #[test]
    fn test_row_menu() {
        let member = member_with("@ana", 12, "Ana Silva", "Atraso", json!({}));
        let menu = MemberRow::from_member(&member, &[]).menu;

        assert_eq!(menu.subtitle, "#12 - Atraso");
        assert_eq!(menu.groups.len(), 3);
        assert_eq!(menu.groups[1][1].label, "N.º Sócio: 12");

        let remove = &menu.groups[2][0];
        assert_eq!(remove.action, MenuAction::Remove);
        assert!(remove.destructive);
        assert!(menu.groups[0].iter().all(|entry| !entry.destructive));
    }
}
