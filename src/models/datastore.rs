//! Dataset summary returned by the datastore endpoint.

use serde::{Deserialize, Serialize};

/// What was loaded at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetInfo {
    pub member_count: usize,
    pub tracked_years: Vec<u16>,
    /// Sortable column ids, in the order the table shows them.
    pub sortable_columns: Vec<String>,
    pub has_profile: bool,
    pub loaded_at: String,
}
