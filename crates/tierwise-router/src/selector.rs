use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{RoutingError, RoutingResult};
use crate::types::{ResourceId, Tier};

/// Host-supplied `Tier -> ResourceId` table, as read from configuration.
///
/// ```yaml
/// resources:
///   LOW: claude-haiku-4-5
///   MEDIUM: claude-sonnet-4-5
///   HIGH: claude-opus-4-5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceTable(BTreeMap<Tier, ResourceId>);

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, tier: Tier, id: impl Into<ResourceId>) -> Self {
        self.insert(tier, id);
        self
    }

    pub fn insert(&mut self, tier: Tier, id: impl Into<ResourceId>) {
        self.0.insert(tier, id.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Tier, &ResourceId)> + '_ {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Tier, &mut ResourceId)> + '_ {
        self.0.iter_mut()
    }

    pub fn select(&self, tier: Tier) -> RoutingResult<&ResourceId> {
        let id = self.0.get(&tier).ok_or(RoutingError::MissingResource(tier))?;
        if id.as_str().trim().is_empty() {
            return Err(RoutingError::EmptyResource(tier));
        }
        Ok(id)
    }

    /// Every tier must map to a non-empty resource id.
    pub fn validate(&self) -> RoutingResult<()> {
        for tier in Tier::ALL {
            self.select(tier)?;
        }
        Ok(())
    }
}

impl FromIterator<(Tier, ResourceId)> for ResourceTable {
    fn from_iter<I: IntoIterator<Item = (Tier, ResourceId)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A validated resource table with an entry for every tier, so selection
/// cannot fail per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierResources {
    pub low: ResourceId,
    pub medium: ResourceId,
    pub high: ResourceId,
}

impl TierResources {
    pub fn from_table(table: &ResourceTable) -> RoutingResult<Self> {
        Ok(Self {
            low: table.select(Tier::Low)?.clone(),
            medium: table.select(Tier::Medium)?.clone(),
            high: table.select(Tier::High)?.clone(),
        })
    }

    pub fn for_tier(&self, tier: Tier) -> &ResourceId {
        match tier {
            Tier::Low => &self.low,
            Tier::Medium => &self.medium,
            Tier::High => &self.high,
        }
    }
}
