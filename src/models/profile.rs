//! Profile page model ("Perfil").

use serde::{Deserialize, Serialize};

/// One headline figure on the profile page, e.g. "Eventos: 12".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStat {
    pub label: String,
    pub value: String,
}

/// The signed-in member's profile header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub stats: Vec<ProfileStat>,
}
