use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main site configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SiteConfig {
    /// Site identity used by the structured-data generator
    #[serde(default)]
    pub site: SiteIdentity,
    /// Expat directory settings
    #[serde(default)]
    pub directory: DirectoryConfig,
    /// Contact form addresses
    #[serde(default)]
    pub contact: ContactConfig,
    /// Affiliate referral settings
    #[serde(default)]
    pub referral: ReferralConfig,
    /// Visa quiz settings
    #[serde(default)]
    pub visa: VisaConfig,
}

/// Organization constants emitted in every schema.org object
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SiteIdentity {
    #[serde(default = "default_site_name")]
    pub name: String,
    /// Canonical origin, without trailing slash
    #[serde(default = "default_site_url")]
    pub url: String,
    #[serde(default = "default_logo")]
    pub logo: String,
    /// Organization description
    #[serde(default = "default_organization_description")]
    pub description: String,
    /// WebSite description
    #[serde(default = "default_website_description")]
    pub website_description: String,
    /// Social profile URLs
    #[serde(default)]
    pub same_as: Vec<String>,
    /// Fallback image for articles that don't supply one
    #[serde(default = "default_image")]
    pub default_image: String,
}

impl Default for SiteIdentity {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            url: default_site_url(),
            logo: default_logo(),
            description: default_organization_description(),
            website_description: default_website_description(),
            same_as: Vec::new(),
            default_image: default_image(),
        }
    }
}

/// Configuration for the expat profiles directory
#[derive(Debug, Deserialize, Clone)]
pub struct DirectoryConfig {
    /// Path of the JSON file holding the profile records
    #[serde(default = "default_profiles_path")]
    pub profiles_path: String,
    /// Number of profiles revealed initially and per "load more"
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            profiles_path: default_profiles_path(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContactConfig {
    /// Recipient of contact form submissions
    #[serde(default = "default_contact_email")]
    pub to_email: String,
    #[serde(default = "default_from_email")]
    pub from_email: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            to_email: default_contact_email(),
            from_email: default_from_email(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReferralConfig {
    /// Landing page of the legal services partner
    #[serde(default = "default_referral_base_url")]
    pub base_url: String,
    #[serde(default = "default_utm_source")]
    pub utm_source: String,
}

impl Default for ReferralConfig {
    fn default() -> Self {
        Self {
            base_url: default_referral_base_url(),
            utm_source: default_utm_source(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct VisaConfig {
    /// Path of the JSON file holding per-country entry requirements
    #[serde(default = "default_nationalities_path")]
    pub nationalities_path: String,
}

impl Default for VisaConfig {
    fn default() -> Self {
        Self {
            nationalities_path: default_nationalities_path(),
        }
    }
}

// Default value functions
fn default_site_name() -> String {
    "Buenos Aires Expats".to_string()
}

fn default_site_url() -> String {
    "https://buenosairesexpats.com".to_string()
}

fn default_logo() -> String {
    "https://buenosairesexpats.com/favicon.svg".to_string()
}

fn default_organization_description() -> String {
    "The ultimate resource for expats moving to Buenos Aires. Honest guides, visa information, cost of living data, and a thriving expat community.".to_string()
}

fn default_website_description() -> String {
    "Your complete guide to living in Buenos Aires. Visa guides, cost of living data, neighborhood reviews, and expert advice.".to_string()
}

fn default_image() -> String {
    "https://buenosairesexpats.com/images/og-image.jpg".to_string()
}

fn default_profiles_path() -> String {
    "data/expat-profiles.json".to_string()
}

fn default_nationalities_path() -> String {
    "data/nationalities.json".to_string()
}

fn default_page_size() -> usize {
    16
}

fn default_contact_email() -> String {
    "hello@buenosairesexpats.com".to_string()
}

fn default_from_email() -> String {
    "noreply@buenosairesexpats.com".to_string()
}

fn default_referral_base_url() -> String {
    "https://lucerolegal.org".to_string()
}

fn default_utm_source() -> String {
    "buenosairesexpats".to_string()
}

impl SiteConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with BAEXPATS__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: BAEXPATS__DIRECTORY__PAGE_SIZE
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`SiteConfig::load`] for the precedence rules.
pub fn load_config() -> Result<SiteConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        .add_source(environment_source())
        .build()?;

    settings.try_deserialize()
}

/// Use double underscore for nested: BAEXPATS__CONTACT__TO_EMAIL.
/// `same_as` is comma-separated: BAEXPATS__SITE__SAME_AS=https://a,https://b
fn environment_source() -> Environment {
    Environment::with_prefix("BAEXPATS")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("site.same_as")
}
