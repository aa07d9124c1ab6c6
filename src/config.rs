use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "statuschart.toml";

/// One (status name, rank) entry in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRank {
    pub name: String,
    pub rank: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("duplicate status name in registry: {0}")]
    DuplicateStatus(String),
    #[error("status {0} has rank 0; ranks start at 1")]
    ZeroRank(String),
}

/// Ordered mapping from status name to workflow rank.
///
/// Statically configured, never derived from data. Lookups are case- and
/// punctuation-sensitive. Ranks need not be contiguous; only relative order
/// matters for display. The registry is passed explicitly into consumers so
/// alternative orderings can be exercised in tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRegistry {
    statuses: Vec<StatusRank>,
}

impl Default for StatusRegistry {
    fn default() -> Self {
        let table: &[(&str, u32)] = &[
            ("OPEN", 1),
            ("TO-DO", 2),
            ("In Progress", 3),
            ("IN PROGRESS", 4),
            ("IN REVIEW", 5),
            ("REVIEW", 6),
            ("APPLE REVIEW", 7),
            ("APPROVED", 8),
            ("APPROVED WITH SDK", 9),
            ("PENDING", 10),
            ("WAITING TO INTEGRATE", 11),
            ("INTEGRATED SDK", 12),
            ("OnLP", 19),
            ("DONE", 20),
            ("TERMINATED", 21),
            ("BLOCKED", 22),
            ("REJECTED", 23),
            ("CANCELLED", 24),
            ("CANCELED", 25),
            ("Gone", 26),
        ];
        Self {
            statuses: table
                .iter()
                .map(|(name, rank)| StatusRank {
                    name: (*name).to_string(),
                    rank: *rank,
                })
                .collect(),
        }
    }
}

impl StatusRegistry {
    pub fn new(statuses: Vec<StatusRank>) -> Result<Self, ConfigError> {
        let registry = Self { statuses };
        registry.validate()?;
        Ok(registry)
    }

    /// Build a registry from (name, rank) pairs; test convenience.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        Self {
            statuses: pairs
                .into_iter()
                .map(|(name, rank)| StatusRank {
                    name: name.to_string(),
                    rank,
                })
                .collect(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for entry in &self.statuses {
            if !seen.insert(entry.name.as_str()) {
                return Err(ConfigError::DuplicateStatus(entry.name.clone()));
            }
            if entry.rank == 0 {
                return Err(ConfigError::ZeroRank(entry.name.clone()));
            }
        }
        Ok(())
    }

    pub fn rank(&self, status: &str) -> Option<u32> {
        self.statuses
            .iter()
            .find(|e| e.name == status)
            .map(|e| e.rank)
    }

    pub fn contains(&self, status: &str) -> bool {
        self.rank(status).is_some()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Filter `statuses` to registry members and sort ascending by rank.
    ///
    /// Unknown statuses are excluded here; they stay valid for count
    /// aggregation but have no place on a rank axis.
    pub fn display_order<'a>(&self, statuses: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let ranks: HashMap<&str, u32> = self
            .statuses
            .iter()
            .map(|e| (e.name.as_str(), e.rank))
            .collect();
        let mut known: Vec<(&str, u32)> = statuses
            .into_iter()
            .filter_map(|s| ranks.get(s).map(|&r| (s, r)))
            .collect();
        known.sort_by_key(|&(_, rank)| rank);
        known.into_iter().map(|(s, _)| s.to_string()).collect()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = crate::io::read_file(path)
            .with_context(|| format!("failed to read status config: {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid status config: {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let registry: StatusRegistry = toml::from_str(contents)?;
        registry.validate()?;
        Ok(registry)
    }

    /// Resolve the registry for a CLI invocation.
    ///
    /// An explicit path must load; otherwise `statuschart.toml` in the working
    /// directory is used if present, else the built-in default table.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            log::debug!("loading status registry from {}", local.display());
            return Self::load(local);
        }
        Ok(Self::default())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
