use thiserror::Error;

/// Errors that can occur while loading site configuration and content
#[derive(Error, Debug)]
pub enum SiteError {
    /// Failed to read a content file from disk
    #[error("Failed to read content file: {0}")]
    Io(#[from] std::io::Error),

    /// Content file is not valid profile data
    #[error("Failed to parse profile data: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Two profile records share the same id
    #[error("Duplicate profile id: {0}")]
    DuplicateProfileId(String),

    /// Two nationality records share the same slug
    #[error("Duplicate country slug: {0}")]
    DuplicateCountrySlug(String),

    /// Visa-free stay must be 30, 60 or 90 days
    #[error("Invalid stay duration for {slug}: {days} days")]
    InvalidStayDuration { slug: String, days: u16 },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

/// Reasons a contact form submission is rejected.
///
/// The `Display` text of each variant is the message returned to the visitor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// One of name, email, subject or message is absent or empty
    #[error("All fields are required")]
    MissingField,

    #[error("Name must be between 2 and 100 characters")]
    NameLength,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Subject must be between 3 and 200 characters")]
    SubjectLength,

    #[error("Message must be between 10 and 5000 characters")]
    MessageLength,
}
