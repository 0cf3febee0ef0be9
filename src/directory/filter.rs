use super::{ProfileCatalog, RegionCounts};
use crate::model::{ProfileRecord, Region};
use log::debug;

/// Profiles revealed initially and added by each "load more"
pub const PAGE_SIZE: usize = 16;

/// Region selector of the directory filter bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionFilter {
    #[default]
    All,
    Only(Region),
}

impl RegionFilter {
    pub fn matches(&self, profile: &ProfileRecord) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Only(region) => profile.region == *region,
        }
    }

    /// Parse "all" or a region slug
    pub fn from_slug(slug: &str) -> Option<RegionFilter> {
        if slug.trim().eq_ignore_ascii_case("all") {
            return Some(RegionFilter::All);
        }
        Region::from_slug(slug).map(RegionFilter::Only)
    }
}

impl From<Region> for RegionFilter {
    fn from(region: Region) -> Self {
        RegionFilter::Only(region)
    }
}

/// Inputs the directory view is derived from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub active_region: RegionFilter,
    /// Stored verbatim; trimmed and lowercased only when matching
    pub search_query: String,
    pub visible_count: usize,
}

impl FilterState {
    pub fn new(page_size: usize) -> Self {
        Self {
            active_region: RegionFilter::All,
            search_query: String::new(),
            visible_count: page_size,
        }
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

/// Apply the region stage, then the search stage. Collection order is preserved.
pub fn filter_profiles<'a>(
    profiles: &'a [ProfileRecord],
    region: RegionFilter,
    query: &str,
) -> Vec<&'a ProfileRecord> {
    let needle = query.trim().to_lowercase();

    profiles
        .iter()
        .filter(|p| region.matches(p))
        .filter(|p| needle.is_empty() || p.matches_query(&needle))
        .collect()
}

/// Filtered, paginated view over a [`ProfileCatalog`]
///
/// Every setter recomputes the filtered sequence immediately, so the read-back
/// accessors are always consistent with [`DirectoryFilter::state`].
#[derive(Debug, Clone)]
pub struct DirectoryFilter<'a> {
    catalog: &'a ProfileCatalog,
    page_size: usize,
    state: FilterState,
    matches: Vec<&'a ProfileRecord>,
}

impl<'a> DirectoryFilter<'a> {
    pub fn new(catalog: &'a ProfileCatalog) -> Self {
        Self::with_page_size(catalog, PAGE_SIZE)
    }

    /// A zero page size is treated as one.
    pub fn with_page_size(catalog: &'a ProfileCatalog, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let mut view = Self {
            catalog,
            page_size,
            state: FilterState::new(page_size),
            matches: Vec::new(),
        };
        view.recompute();
        view
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Select a region. Search text and the visible count are kept.
    pub fn set_region(&mut self, region: impl Into<RegionFilter>) {
        self.state.active_region = region.into();
        self.recompute();
    }

    /// Replace the search text. The visible count is kept.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.state.search_query = query.into();
        self.recompute();
    }

    /// Empty the search box only
    pub fn clear_search(&mut self) {
        self.set_search_query(String::new());
    }

    /// Reveal one more page. Past the end the visible prefix stays capped.
    pub fn load_more(&mut self) {
        self.state.visible_count = self.state.visible_count.saturating_add(self.page_size);
    }

    /// Reset region, search text and visible count together
    pub fn clear_filters(&mut self) {
        self.state = FilterState::new(self.page_size);
        self.recompute();
    }

    /// Every profile matching the active filters
    pub fn filtered(&self) -> &[&'a ProfileRecord] {
        &self.matches
    }

    pub fn filtered_len(&self) -> usize {
        self.matches.len()
    }

    /// Prefix of the filtered sequence currently revealed
    pub fn visible(&self) -> &[&'a ProfileRecord] {
        &self.matches[..self.visible_len()]
    }

    pub fn visible_len(&self) -> usize {
        self.state.visible_count.min(self.matches.len())
    }

    pub fn has_more(&self) -> bool {
        self.visible_len() < self.filtered_len()
    }

    /// No profile matches the active filters
    pub fn is_empty_state(&self) -> bool {
        self.matches.is_empty()
    }

    /// Whether the "Clear filters" control should be offered
    pub fn has_active_filters(&self) -> bool {
        self.state.active_region != RegionFilter::All || !self.state.search_query.is_empty()
    }

    /// Badge counts; independent of the search text
    pub fn region_counts(&self) -> RegionCounts {
        self.catalog.region_counts()
    }

    /// Title above the results grid
    pub fn heading(&self) -> &'static str {
        if !self.state.search_query.is_empty() {
            return "Search Results";
        }
        match self.state.active_region {
            RegionFilter::All => "All Profiles",
            RegionFilter::Only(region) => region.label(),
        }
    }

    /// e.g. `3 expats found for "tango"`
    pub fn results_summary(&self) -> String {
        let count = self.filtered_len();
        let plural = if count == 1 { "" } else { "s" };
        let mut summary = format!("{count} expat{plural} found");
        if !self.state.search_query.is_empty() {
            summary.push_str(&format!(" for \"{}\"", self.state.search_query));
        }
        summary
    }

    /// e.g. `Showing 16 of 30`
    pub fn showing_summary(&self) -> String {
        format!("Showing {} of {}", self.visible_len(), self.filtered_len())
    }

    fn recompute(&mut self) {
        self.matches = filter_profiles(
            self.catalog.profiles(),
            self.state.active_region,
            &self.state.search_query,
        );
        debug!(
            "Directory filter region={:?} query={:?}: {} of {} profiles",
            self.state.active_region,
            self.state.search_query,
            self.matches.len(),
            self.catalog.len()
        );
    }
}
