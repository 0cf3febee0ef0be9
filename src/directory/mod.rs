//! Expat profiles directory
//!
//! [`ProfileCatalog`] holds the immutable profile collection loaded from the
//! static content file. [`DirectoryFilter`] derives the region/search filtered,
//! paginated view the directory page renders.

mod filter;

pub use filter::{filter_profiles, DirectoryFilter, FilterState, RegionFilter, PAGE_SIZE};

use crate::error::SiteError;
use crate::model::{ProfileRecord, Region};
use log::debug;
use std::collections::HashSet;
use std::path::Path;

/// Number of related profiles shown on a detail page
pub const RELATED_LIMIT: usize = 3;

/// Read-only collection of expat profiles, in authoring order
#[derive(Debug, Clone, Default)]
pub struct ProfileCatalog {
    profiles: Vec<ProfileRecord>,
}

/// Profiles adjacent to a given one in collection order
#[derive(Debug, Clone, Copy, Default)]
pub struct Neighbors<'a> {
    pub previous: Option<&'a ProfileRecord>,
    pub next: Option<&'a ProfileRecord>,
}

/// Filter-chip badge counts, computed over the whole collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionCounts {
    total: usize,
    per_region: Vec<(Region, usize)>,
}

impl RegionCounts {
    /// Count for the "All" chip
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn get(&self, region: Region) -> usize {
        self.per_region
            .iter()
            .find(|(r, _)| *r == region)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Counts in filter-chip order
    pub fn iter(&self) -> impl Iterator<Item = (Region, usize)> + '_ {
        self.per_region.iter().copied()
    }
}

impl ProfileCatalog {
    /// Build a catalog, rejecting duplicate ids
    pub fn new(profiles: Vec<ProfileRecord>) -> Result<Self, SiteError> {
        let mut seen = HashSet::with_capacity(profiles.len());
        for profile in &profiles {
            if !seen.insert(profile.id.as_str()) {
                return Err(SiteError::DuplicateProfileId(profile.id.clone()));
            }
        }
        Ok(Self { profiles })
    }

    /// Parse a JSON array of profile records
    pub fn from_json(json: &str) -> Result<Self, SiteError> {
        let profiles: Vec<ProfileRecord> = serde_json::from_str(json)?;
        Self::new(profiles)
    }

    /// Load the catalog from a JSON content file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SiteError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await?;
        let catalog = Self::from_json(&json)?;
        debug!(
            "Loaded {} expat profiles from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn profiles(&self) -> &[ProfileRecord] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<&ProfileRecord> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn by_region(&self, region: Region) -> Vec<&ProfileRecord> {
        self.profiles.iter().filter(|p| p.region == region).collect()
    }

    /// Other profiles from the same region, at most `limit` of them
    pub fn related(&self, id: &str, limit: usize) -> Vec<&ProfileRecord> {
        let Some(profile) = self.by_id(id) else {
            return Vec::new();
        };

        self.profiles
            .iter()
            .filter(|p| p.region == profile.region && p.id != profile.id)
            .take(limit)
            .collect()
    }

    /// Previous and next profiles for detail-page navigation
    pub fn neighbors(&self, id: &str) -> Neighbors<'_> {
        match self.profiles.iter().position(|p| p.id == id) {
            Some(index) => Neighbors {
                previous: index.checked_sub(1).map(|i| &self.profiles[i]),
                next: self.profiles.get(index + 1),
            },
            None => Neighbors::default(),
        }
    }

    pub fn region_counts(&self) -> RegionCounts {
        RegionCounts {
            total: self.profiles.len(),
            per_region: Region::ALL
                .into_iter()
                .map(|region| {
                    let count = self.profiles.iter().filter(|p| p.region == region).count();
                    (region, count)
                })
                .collect(),
        }
    }
}
