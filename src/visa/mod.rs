//! Visa recommendation quiz
//!
//! [`QuizAnswers`] holds the six quiz answers and round-trips them through a
//! shareable query string. [`recommend`] maps answers to a primary visa and
//! up to two alternatives. [`NationalityCatalog`] provides per-country entry
//! requirements for the nationality question.

mod nationality;
mod quiz;
mod recommend;

pub use nationality::{
    ConsulateInfo, CountryData, CountryRegion, NationalityCatalog, VisaStatus, STAY_DURATIONS,
    SUGGESTION_LIMIT, UNKNOWN_NATIONALITY_NOTE,
};
pub use quiz::{Family, Income, JobOffer, QuizAnswers, Reason, StayLength};
pub use recommend::{recommend, Recommendations, VisaKind, VisaRecommendation, MAX_ALTERNATIVES};
