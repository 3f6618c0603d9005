//! Member dataset loading.
//!
//! The bundled JSON file is the single source of records; it is read once at
//! startup and never written back.

mod repository;

pub use repository::*;

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::listing::sort::columns;
use crate::models::{Member, Profile};

/// On-disk layout: `{ "items": [...], "profile": {...} }`.
#[derive(Debug, Deserialize)]
struct DatasetFile {
    items: Vec<Value>,
    #[serde(default)]
    profile: Option<Profile>,
}

/// Immutable snapshot of the member collection.
#[derive(Debug)]
pub struct Dataset {
    members: Vec<Member>,
    by_username: HashMap<String, usize>,
    tracked_years: Vec<u16>,
    profile: Option<Profile>,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Build a dataset from source records. Usernames must be unique.
    pub fn from_records(records: Vec<Value>, profile: Option<Profile>) -> Result<Self, AppError> {
        let tracked_years: Vec<u16> = records
            .iter()
            .filter_map(Value::as_object)
            .flat_map(|fields| fields.keys())
            .filter_map(|key| columns::fee_year(key))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut members = Vec::with_capacity(records.len());
        let mut by_username = HashMap::with_capacity(records.len());

        for (position, record) in records.into_iter().enumerate() {
            let mut member = Member::from_source(record).map_err(|e| match e {
                AppError::Validation(msg) => {
                    AppError::Validation(format!("Record {}: {}", position, msg))
                }
                other => other,
            })?;
            member.track_years(&tracked_years);

            if by_username.insert(member.username.clone(), position).is_some() {
                return Err(AppError::Validation(format!(
                    "Duplicate username {}",
                    member.username
                )));
            }
            members.push(member);
        }

        Ok(Self {
            members,
            by_username,
            tracked_years,
            profile,
            loaded_at: Utc::now(),
        })
    }

    /// Parse the dataset file contents.
    pub fn parse(json: &str) -> Result<Self, AppError> {
        let file: DatasetFile = serde_json::from_str(json)?;
        Self::from_records(file.items, file.profile)
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, username: &str) -> Option<&Member> {
        self.by_username
            .get(username)
            .map(|&position| &self.members[position])
    }

    /// Fee years present anywhere in the dataset, ascending.
    pub fn tracked_years(&self) -> &[u16] {
        &self.tracked_years
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Read and parse the dataset file.
pub async fn load_dataset(path: &Path) -> Result<Dataset, AppError> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::DataSource(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let dataset = Dataset::parse(&contents)?;

    let unknown_statuses = dataset
        .members()
        .iter()
        .filter(|member| !member.status.is_known())
        .count();
    if unknown_statuses > 0 {
        tracing::warn!(
            "{} members have a status without a dedicated badge",
            unknown_statuses
        );
    }

    Ok(dataset)
}
