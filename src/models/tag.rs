//! Category tags ("Tipo") attached to a member.

use serde::{Deserialize, Serialize};

/// Tags shown inline in a table row before collapsing into an overflow badge.
pub const MAX_VISIBLE_TAGS: usize = 3;

/// A category tag with its badge color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTag {
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "gray".to_string()
}

/// The tags a row actually renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSummary {
    pub shown: Vec<CategoryTag>,
    /// Number of tags hidden behind the "+N" badge.
    pub overflow: usize,
}

impl TagSummary {
    pub fn of(tags: &[CategoryTag]) -> Self {
        Self {
            shown: tags.iter().take(MAX_VISIBLE_TAGS).cloned().collect(),
            overflow: tags.len().saturating_sub(MAX_VISIBLE_TAGS),
        }
    }
}

/// Tag names joined for subtitles and menu entries.
pub fn tag_names(tags: &[CategoryTag]) -> String {
    tags.iter()
        .map(|tag| tag.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<CategoryTag> {
        names
            .iter()
            .map(|name| CategoryTag {
                name: name.to_string(),
                color: "brand".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_summary_caps_at_three() {
        let summary = TagSummary::of(&tags(&["Motard", "Fundador", "Direção", "Staff", "Pendura"]));
        assert_eq!(summary.shown.len(), 3);
        assert_eq!(summary.shown[2].name, "Direção");
        assert_eq!(summary.overflow, 2);
    }

    #[test]
    fn test_summary_without_overflow() {
        let summary = TagSummary::of(&tags(&["Motard"]));
        assert_eq!(summary.shown.len(), 1);
        assert_eq!(summary.overflow, 0);
        assert_eq!(TagSummary::of(&[]).overflow, 0);
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(tag_names(&tags(&["Motard", "Staff"])), "Motard, Staff");
        assert_eq!(tag_names(&[]), "");
    }

    #[test]
    fn test_missing_color_defaults_to_gray() {
        let tag: CategoryTag = serde_json::from_str(r#"{"name":"Motard"}"#).unwrap();
        assert_eq!(tag.color, "gray");
    }
}
