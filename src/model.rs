use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic grouping used to categorize expat profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    NorthAmerica,
    Europe,
    Asia,
    MiddleEast,
    LatinAmerica,
    Oceania,
}

/// Display metadata attached to a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionStyle {
    pub label: &'static str,
    pub icon: &'static str,
    /// Badge classes used on profile cards
    pub badge: &'static str,
}

impl Region {
    /// All regions in filter-chip order
    pub const ALL: [Region; 6] = [
        Region::NorthAmerica,
        Region::Europe,
        Region::Asia,
        Region::MiddleEast,
        Region::LatinAmerica,
        Region::Oceania,
    ];

    /// Slug used in data files and URLs
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "north-america",
            Region::Europe => "europe",
            Region::Asia => "asia",
            Region::MiddleEast => "middle-east",
            Region::LatinAmerica => "latin-america",
            Region::Oceania => "oceania",
        }
    }

    pub fn style(&self) -> RegionStyle {
        match self {
            Region::NorthAmerica => RegionStyle {
                label: "North America",
                icon: "🇺🇸",
                badge: "bg-blue-100 text-blue-800 border-blue-200",
            },
            Region::Europe => RegionStyle {
                label: "Europe",
                icon: "🇪🇺",
                badge: "bg-indigo-100 text-indigo-800 border-indigo-200",
            },
            Region::Asia => RegionStyle {
                label: "Asia",
                icon: "🇯🇵",
                badge: "bg-rose-100 text-rose-800 border-rose-200",
            },
            Region::MiddleEast => RegionStyle {
                label: "Middle East",
                icon: "🕌",
                badge: "bg-amber-100 text-amber-800 border-amber-200",
            },
            Region::LatinAmerica => RegionStyle {
                label: "Latin America",
                icon: "🌎",
                badge: "bg-emerald-100 text-emerald-800 border-emerald-200",
            },
            Region::Oceania => RegionStyle {
                label: "Oceania",
                icon: "🇦🇺",
                badge: "bg-cyan-100 text-cyan-800 border-cyan-200",
            },
        }
    }

    pub fn label(&self) -> &'static str {
        self.style().label
    }

    /// Parse a region slug, case-insensitively
    pub fn from_slug(slug: &str) -> Option<Region> {
        let slug = slug.trim().to_lowercase();
        Region::ALL.into_iter().find(|r| r.as_str() == slug)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An expat profile as authored in the static content file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub id: String,
    pub name: String,
    pub nationality: String,
    pub bio: String,
    pub region: Region,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub has_screenshot: bool,
    #[serde(rename = "yearsInBA", default)]
    pub years_in_ba: String,
    #[serde(default)]
    pub blog_name: String,
    #[serde(default)]
    pub blog_url: Option<String>,
    #[serde(default)]
    pub seo_description: Option<String>,
}

impl ProfileRecord {
    /// Whether the lowercased `needle` occurs in any searchable field.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_query(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.nationality.to_lowercase().contains(needle)
            || self.bio.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }

    /// Route of the profile detail page
    pub fn detail_path(&self) -> String {
        format!("/expat-profiles/{}", self.id)
    }

    /// Screenshot asset path, if the profile has one
    pub fn screenshot_path(&self) -> Option<String> {
        self.has_screenshot
            .then(|| format!("/images/expat-screenshots/{}.jpg", self.id))
    }

    /// Description for page metadata; falls back to the first 200 characters of the bio
    pub fn seo_description(&self) -> String {
        match &self.seo_description {
            Some(desc) if !desc.is_empty() => desc.clone(),
            _ => self.bio.chars().take(200).collect(),
        }
    }

    /// Page title used for the detail page and its Article schema
    pub fn headline(&self) -> String {
        format!("{} - {} Expat in Buenos Aires", self.name, self.nationality)
    }
}
