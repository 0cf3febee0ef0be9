use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use url::form_urlencoded;

/// Declares a closed set of quiz options with their URL value and label
macro_rules! quiz_options {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => ($value:literal, $label:literal)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $(#[serde(rename = $value)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Value used in query parameters
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn from_value(value: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|option| option.as_str() == value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

quiz_options! {
    /// Primary reason for coming to Argentina
    Reason {
        RemoteWork => ("remote-work", "Remote work"),
        Employment => ("employment", "Employment with Argentine company"),
        Retirement => ("retirement", "Retirement"),
        Study => ("study", "Study"),
        Investment => ("investment", "Investment or business"),
        Visiting => ("visiting", "Just visiting"),
    }
}

quiz_options! {
    /// Planned length of stay
    StayLength {
        UnderThreeMonths => ("under-3-months", "Under 3 months"),
        ThreeToSixMonths => ("3-6-months", "3–6 months"),
        SixToTwelveMonths => ("6-12-months", "6–12 months"),
        OneYearPlus => ("1-plus-years", "1+ years"),
        Permanently => ("permanently", "Permanently"),
    }
}

quiz_options! {
    Income {
        OverTwoThousand => ("over-2k", "Yes, over $2,000/month"),
        UnderTwoThousand => ("under-2k", "Yes, under $2,000/month"),
        Local => ("local", "I'll earn locally"),
        NoSteadyIncome => ("none", "No steady income"),
    }
}

quiz_options! {
    /// Whether an Argentine company has offered a job
    JobOffer {
        Yes => ("yes", "Yes"),
        No => ("no", "No"),
        SelfEmployed => ("self-employed", "I'm self-employed"),
    }
}

quiz_options! {
    Family {
        JustMe => ("just-me", "Just me"),
        Spouse => ("spouse", "With spouse/partner"),
        Children => ("children", "With children"),
        Extended => ("extended", "Extended family"),
    }
}

impl StayLength {
    /// A year or more
    pub fn is_long_term(&self) -> bool {
        matches!(self, StayLength::OneYearPlus | StayLength::Permanently)
    }
}

/// A completed visa quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswers {
    pub reason: Reason,
    pub duration: StayLength,
    pub income: Income,
    pub job_offer: JobOffer,
    pub family: Family,
    /// Country name as picked from the nationality list
    pub nationality: String,
}

impl QuizAnswers {
    /// Query parameter keys, in question order
    pub const KEYS: [&'static str; 6] = [
        "reason",
        "duration",
        "income",
        "jobOffer",
        "family",
        "nationality",
    ];

    /// Encode the answers as a shareable query string.
    ///
    /// An empty nationality is left out, which makes the result incomplete
    /// for [`QuizAnswers::from_query`].
    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("reason", self.reason.as_str());
        query.append_pair("duration", self.duration.as_str());
        query.append_pair("income", self.income.as_str());
        query.append_pair("jobOffer", self.job_offer.as_str());
        query.append_pair("family", self.family.as_str());
        if !self.nationality.is_empty() {
            query.append_pair("nationality", &self.nationality);
        }
        query.finish()
    }

    /// Path of the quiz page showing these results
    pub fn share_path(&self) -> String {
        format!("/visas/quiz?{}", self.to_query())
    }

    /// Decode answers from a query string, with or without the leading `?`.
    ///
    /// Returns `None` unless all six keys carry a non-empty value and every
    /// choice is a known option. Later duplicates of a key win.
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let params: HashMap<String, String> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .filter(|(_, value)| !value.is_empty())
            .collect();
        let get = |key: &str| params.get(key).map(String::as_str);

        Some(Self {
            reason: Reason::from_value(get("reason")?)?,
            duration: StayLength::from_value(get("duration")?)?,
            income: Income::from_value(get("income")?)?,
            job_offer: JobOffer::from_value(get("jobOffer")?)?,
            family: Family::from_value(get("family")?)?,
            nationality: get("nationality")?.to_string(),
        })
    }

    /// Decode answers from a full page URL
    pub fn from_url(url: &url::Url) -> Option<Self> {
        Self::from_query(url.query().unwrap_or(""))
    }
}
