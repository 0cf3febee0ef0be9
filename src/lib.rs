//! Core logic of the Buenos Aires Expats site: the expat directory filter,
//! schema.org structured data, the contact form endpoint and the visa quiz.

pub mod config;
pub mod contact;
pub mod content;
pub mod cta;
pub mod directory;
pub mod error;
pub mod model;
pub mod schema;
pub mod visa;

pub use config::{load_config, SiteConfig, SiteIdentity};
pub use contact::{ContactForm, ContactHandler, ContactResponse, ContactSink, LogSink};
pub use directory::{DirectoryFilter, FilterState, ProfileCatalog, RegionFilter, PAGE_SIZE};
pub use error::{ContactError, SiteError};
pub use model::{ProfileRecord, Region};
pub use schema::SchemaGenerator;
pub use visa::{recommend, NationalityCatalog, QuizAnswers};

use log::debug;

/// Load the profile catalog from the path in `config`
pub async fn load_catalog(config: &SiteConfig) -> Result<ProfileCatalog, SiteError> {
    debug!("Loading profiles from {}", config.directory.profiles_path);
    ProfileCatalog::load(&config.directory.profiles_path).await
}

/// Directory view with the configured page size
pub fn directory_view<'a>(catalog: &'a ProfileCatalog, config: &SiteConfig) -> DirectoryFilter<'a> {
    DirectoryFilter::with_page_size(catalog, config.directory.page_size)
}

/// Load the nationality data from the path in `config`
pub async fn load_nationalities(config: &SiteConfig) -> Result<NationalityCatalog, SiteError> {
    debug!("Loading nationalities from {}", config.visa.nationalities_path);
    NationalityCatalog::load(&config.visa.nationalities_path).await
}
