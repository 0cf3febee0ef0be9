use crate::error::SiteError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Suggestions shown while typing a nationality
pub const SUGGESTION_LIMIT: usize = 8;

/// Visa-free stay lengths Argentina grants, in days
pub const STAY_DURATIONS: [u16; 3] = [30, 60, 90];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CountryRegion {
    Americas,
    Europe,
    AsiaPacific,
    AfricaMiddleEast,
}

impl CountryRegion {
    pub const ALL: [CountryRegion; 4] = [
        CountryRegion::Americas,
        CountryRegion::Europe,
        CountryRegion::AsiaPacific,
        CountryRegion::AfricaMiddleEast,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CountryRegion::Americas => "americas",
            CountryRegion::Europe => "europe",
            CountryRegion::AsiaPacific => "asia-pacific",
            CountryRegion::AfricaMiddleEast => "africa-middle-east",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CountryRegion::Americas => "Americas",
            CountryRegion::Europe => "Europe",
            CountryRegion::AsiaPacific => "Asia-Pacific",
            CountryRegion::AfricaMiddleEast => "Africa & Middle East",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.trim().to_lowercase();
        Self::ALL.into_iter().find(|r| r.as_str() == slug)
    }
}

impl fmt::Display for CountryRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisaStatus {
    /// Visa-free entry for the country's stay duration
    Exempt,
    /// A visa must be obtained from a consulate before travel
    Required,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsulateInfo {
    pub has_consulate: bool,
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Entry requirements for citizens of one country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryData {
    pub slug: String,
    pub name: String,
    pub flag: String,
    pub region: CountryRegion,
    pub visa_status: VisaStatus,
    /// Days of visa-free stay, one of [`STAY_DURATIONS`]
    pub stay_duration: u16,
    #[serde(default)]
    pub special_conditions: Vec<String>,
    #[serde(default)]
    pub common_concerns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consulate_info: Option<ConsulateInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visa_fee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl CountryData {
    pub fn is_exempt(&self) -> bool {
        self.visa_status == VisaStatus::Exempt
    }

    /// Guide page for this nationality
    pub fn guide_path(&self) -> String {
        format!("/visas/nationalities/{}", self.slug)
    }

    /// Entry note shown under the quiz results
    pub fn entry_note(&self) -> String {
        match self.visa_status {
            VisaStatus::Exempt => format!(
                "{} citizens can enter Argentina visa-free for up to {} days. For longer stays, \
                 you'll need one of the visa types recommended above.",
                self.name, self.stay_duration
            ),
            VisaStatus::Required => format!(
                "{} citizens require a visa to enter Argentina. Contact the nearest Argentine \
                 consulate to begin your application.",
                self.name
            ),
        }
    }
}

/// Shown when the quiz nationality is not in the catalog
pub const UNKNOWN_NATIONALITY_NOTE: &str =
    "Check with the Argentine consulate in your country for specific visa requirements.";

/// Read-only nationality data, in authoring order
#[derive(Debug, Clone, Default)]
pub struct NationalityCatalog {
    countries: Vec<CountryData>,
}

impl NationalityCatalog {
    /// Build a catalog, rejecting duplicate slugs and unknown stay durations
    pub fn new(countries: Vec<CountryData>) -> Result<Self, SiteError> {
        let mut seen = HashSet::with_capacity(countries.len());
        for country in &countries {
            if !seen.insert(country.slug.as_str()) {
                return Err(SiteError::DuplicateCountrySlug(country.slug.clone()));
            }
            if !STAY_DURATIONS.contains(&country.stay_duration) {
                return Err(SiteError::InvalidStayDuration {
                    slug: country.slug.clone(),
                    days: country.stay_duration,
                });
            }
        }
        Ok(Self { countries })
    }

    pub fn from_json(json: &str) -> Result<Self, SiteError> {
        let countries: Vec<CountryData> = serde_json::from_str(json)?;
        Self::new(countries)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SiteError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await?;
        let catalog = Self::from_json(&json)?;
        debug!("Loaded {} countries from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn countries(&self) -> &[CountryData] {
        &self.countries
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn by_slug(&self, slug: &str) -> Option<&CountryData> {
        self.countries.iter().find(|c| c.slug == slug)
    }

    /// Case-insensitive match on the country name, as typed in the quiz
    pub fn by_name(&self, name: &str) -> Option<&CountryData> {
        let name = name.to_lowercase();
        self.countries.iter().find(|c| c.name.to_lowercase() == name)
    }

    pub fn by_visa_status(&self, status: VisaStatus) -> Vec<&CountryData> {
        self.countries
            .iter()
            .filter(|c| c.visa_status == status)
            .collect()
    }

    pub fn by_region(&self, region: CountryRegion) -> Vec<&CountryData> {
        self.countries.iter().filter(|c| c.region == region).collect()
    }

    pub fn slugs(&self) -> Vec<&str> {
        self.countries.iter().map(|c| c.slug.as_str()).collect()
    }

    /// Country names in alphabetical order
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.countries.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Alphabetical names containing `input`, case-insensitive, at most
    /// [`SUGGESTION_LIMIT`]. Empty input suggests nothing.
    pub fn suggest(&self, input: &str) -> Vec<&str> {
        if input.is_empty() {
            return Vec::new();
        }
        let needle = input.to_lowercase();
        self.sorted_names()
            .into_iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .take(SUGGESTION_LIMIT)
            .collect()
    }

    /// Entry note for a quiz nationality answer
    pub fn entry_note(&self, nationality: &str) -> String {
        match self.by_name(nationality) {
            Some(country) => country.entry_note(),
            None => UNKNOWN_NATIONALITY_NOTE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> NationalityCatalog {
        NationalityCatalog::from_json(
            r#"[
                {"slug": "chile", "name": "Chile", "flag": "🇨🇱", "region": "americas",
                 "visaStatus": "exempt", "stayDuration": 90,
                 "specialConditions": ["Mercosur member - can enter with ID card"],
                 "commonConcerns": ["Can I use my Cedula?"]},
                {"slug": "india", "name": "India", "flag": "🇮🇳", "region": "asia-pacific",
                 "visaStatus": "required", "stayDuration": 90, "commonConcerns": [],
                 "consulateInfo": {"hasConsulate": true, "cities": ["New Delhi", "Mumbai"]},
                 "processingTime": "2-4 weeks", "visaFee": "$150-200 USD"},
                {"slug": "canada", "name": "Canada", "flag": "🇨🇦", "region": "americas",
                 "visaStatus": "exempt", "stayDuration": 90, "commonConcerns": []},
                {"slug": "south-africa", "name": "South Africa", "flag": "🇿🇦",
                 "region": "africa-middle-east", "visaStatus": "exempt", "stayDuration": 30,
                 "commonConcerns": []}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_lookups() {
        let catalog = catalog();
        assert_eq!(catalog.by_slug("india").unwrap().name, "India");
        assert!(catalog.by_slug("India").is_none());
        assert_eq!(catalog.by_name("south AFRICA").unwrap().slug, "south-africa");

        let required: Vec<&str> = catalog
            .by_visa_status(VisaStatus::Required)
            .iter()
            .map(|c| c.slug.as_str())
            .collect();
        assert_eq!(required, vec!["india"]);

        let americas: Vec<&str> = catalog
            .by_region(CountryRegion::Americas)
            .iter()
            .map(|c| c.slug.as_str())
            .collect();
        assert_eq!(americas, vec!["chile", "canada"]);
        assert!(catalog.by_region(CountryRegion::Europe).is_empty());
        assert_eq!(catalog.slugs(), vec!["chile", "india", "canada", "south-africa"]);
        assert_eq!(
            catalog.by_slug("chile").unwrap().guide_path(),
            "/visas/nationalities/chile"
        );
    }

    #[test]
    fn test_optional_fields() {
        let catalog = catalog();
        let india = catalog.by_slug("india").unwrap();
        assert_eq!(
            india.consulate_info.as_ref().unwrap().cities,
            vec!["New Delhi", "Mumbai"]
        );
        assert_eq!(india.consulate_info.as_ref().unwrap().notes, None);
        assert!(india.special_conditions.is_empty());
        assert!(catalog.by_slug("chile").unwrap().consulate_info.is_none());
    }

    #[test]
    fn test_suggest() {
        let catalog = catalog();
        assert_eq!(catalog.suggest("a"), vec!["Canada", "India", "South Africa"]);
        assert_eq!(catalog.suggest("CH"), vec!["Chile"]);
        assert!(catalog.suggest("").is_empty());
        assert_eq!(
            catalog.sorted_names(),
            vec!["Canada", "Chile", "India", "South Africa"]
        );
    }

    #[test]
    fn test_entry_note() {
        let catalog = catalog();
        assert_eq!(
            catalog.entry_note("south africa"),
            "South Africa citizens can enter Argentina visa-free for up to 30 days. For longer \
             stays, you'll need one of the visa types recommended above."
        );
        assert!(catalog
            .entry_note("India")
            .starts_with("India citizens require a visa"));
        assert_eq!(catalog.entry_note("Atlantis"), UNKNOWN_NATIONALITY_NOTE);
    }

    #[test]
    fn test_rejects_duplicate_slug() {
        let chile = catalog().by_slug("chile").unwrap().clone();
        let result = NationalityCatalog::new(vec![chile.clone(), chile]);
        assert!(matches!(result, Err(SiteError::DuplicateCountrySlug(slug)) if slug == "chile"));
    }

    #[test]
    fn test_rejects_unknown_stay_duration() {
        let mut chile = catalog().by_slug("chile").unwrap().clone();
        chile.stay_duration = 45;
        let result = NationalityCatalog::new(vec![chile]);
        assert!(matches!(
            result,
            Err(SiteError::InvalidStayDuration { days: 45, .. })
        ));
    }

    #[test]
    fn test_region_names() {
        let names: Vec<&str> = CountryRegion::ALL.iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec!["Americas", "Europe", "Asia-Pacific", "Africa & Middle East"]
        );
        assert_eq!(
            CountryRegion::from_slug("asia-pacific"),
            Some(CountryRegion::AsiaPacific)
        );
    }
}
