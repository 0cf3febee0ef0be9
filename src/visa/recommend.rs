use super::quiz::{Income, JobOffer, QuizAnswers, Reason, StayLength};
use log::debug;
use serde::Serialize;

/// Alternatives shown under the primary recommendation
pub const MAX_ALTERNATIVES: usize = 2;

/// Visa categories the quiz can recommend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisaKind {
    DigitalNomad,
    Work,
    Retirement,
    Student,
    Investment,
    Tourist,
}

impl VisaKind {
    pub fn name(&self) -> &'static str {
        match self {
            VisaKind::DigitalNomad => "Digital Nomad Visa",
            VisaKind::Work => "Work Visa",
            VisaKind::Retirement => "Retirement Visa (Rentista)",
            VisaKind::Student => "Student Visa",
            VisaKind::Investment => "Investment Visa",
            VisaKind::Tourist => "Tourist Entry (No Visa Required)",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            VisaKind::DigitalNomad => "digital-nomad",
            VisaKind::Work => "work",
            VisaKind::Retirement => "retirement",
            VisaKind::Student => "student",
            VisaKind::Investment => "investment",
            VisaKind::Tourist => "tourist",
        }
    }

    /// Guide page for the visa. Tourist entry has none and links the hub.
    pub fn href(&self) -> &'static str {
        match self {
            VisaKind::DigitalNomad => "/visas/digital-nomad",
            VisaKind::Work => "/visas/work",
            VisaKind::Retirement => "/visas/retirement",
            VisaKind::Student => "/visas/student",
            VisaKind::Investment => "/visas/investment",
            VisaKind::Tourist => "/visas",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaRecommendation {
    pub visa: VisaKind,
    pub description: &'static str,
    pub match_reasons: Vec<&'static str>,
}

impl VisaRecommendation {
    fn new(visa: VisaKind, description: &'static str, match_reasons: [&'static str; 3]) -> Self {
        Self {
            visa,
            description,
            match_reasons: match_reasons.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendations {
    pub primary: VisaRecommendation,
    /// At most [`MAX_ALTERNATIVES`], in match order
    pub alternatives: Vec<VisaRecommendation>,
}

impl Recommendations {
    /// Primary first, then the alternatives
    pub fn iter(&self) -> impl Iterator<Item = &VisaRecommendation> {
        std::iter::once(&self.primary).chain(&self.alternatives)
    }
}

/// Match quiz answers to visa categories.
///
/// Rules run in a fixed order and every match is kept: digital nomad, work,
/// retirement, student, investment, tourist entry. With no match the digital
/// nomad visa is the fallback. Long-term stays then get retirement (with
/// income over $2,000) and investment appended when the rules did not
/// already produce them. The first match is the primary recommendation.
/// Family and nationality do not affect the result.
pub fn recommend(answers: &QuizAnswers) -> Recommendations {
    let QuizAnswers {
        reason,
        duration,
        income,
        job_offer,
        ..
    } = answers;
    let (reason, duration, income, job_offer) = (*reason, *duration, *income, *job_offer);
    let long_term = duration.is_long_term();
    let mut all = Vec::new();

    if reason == Reason::RemoteWork
        || (reason == Reason::Visiting
            && duration != StayLength::UnderThreeMonths
            && job_offer == JobOffer::SelfEmployed)
    {
        all.push(VisaRecommendation::new(
            VisaKind::DigitalNomad,
            "Work remotely from Argentina for up to 6 months. Designed for location-independent \
             professionals with income from abroad.",
            [
                if reason == Reason::RemoteWork {
                    "You indicated remote work as your primary reason"
                } else {
                    "Self-employed visitors can qualify for the Digital Nomad Visa"
                },
                "Perfect for freelancers and remote employees",
                "Valid for up to 180 days, extendable",
            ],
        ));
    }

    if reason == Reason::Employment || job_offer == JobOffer::Yes {
        all.push(VisaRecommendation::new(
            VisaKind::Work,
            "For those with an employment offer from an Argentine company. Your employer \
             sponsors the visa application.",
            [
                if job_offer == JobOffer::Yes {
                    "You have a job offer from an Argentine company"
                } else {
                    "Employment in Argentina requires a work visa"
                },
                "Allows legal employment with full benefits",
                "Renewable for 1–3 years",
            ],
        ));
    }

    if reason == Reason::Retirement
        || (long_term && income == Income::OverTwoThousand && reason != Reason::Employment)
    {
        all.push(VisaRecommendation::new(
            VisaKind::Retirement,
            "For retirees and those with stable passive income. Offers a path to permanent \
             residency in Argentina.",
            [
                if reason == Reason::Retirement {
                    "Retirement is your primary reason for moving"
                } else {
                    "Your income level qualifies you for a rentista visa"
                },
                if income == Income::OverTwoThousand {
                    "Your income exceeds the typical minimum requirement"
                } else {
                    "Income documentation will be required"
                },
                "Path to permanent residency",
            ],
        ));
    }

    if reason == Reason::Study {
        all.push(VisaRecommendation::new(
            VisaKind::Student,
            "Study at Argentine universities or language schools. Allows part-time work while \
             enrolled.",
            [
                "You plan to study in Argentina",
                "Part-time work permitted while enrolled",
                "Valid for the duration of your studies",
            ],
        ));
    }

    if reason == Reason::Investment
        || (long_term && job_offer == JobOffer::SelfEmployed && reason != Reason::RemoteWork)
    {
        all.push(VisaRecommendation::new(
            VisaKind::Investment,
            "For entrepreneurs and investors starting or acquiring a business in Argentina.",
            [
                if reason == Reason::Investment {
                    "You plan to invest in or start a business in Argentina"
                } else {
                    "Self-employed long-term residents may qualify through investment"
                },
                "Allows you to own and operate an Argentine business",
                "Renewable for 1–3 years",
            ],
        ));
    }

    if reason == Reason::Visiting && duration == StayLength::UnderThreeMonths {
        all.push(VisaRecommendation::new(
            VisaKind::Tourist,
            "Most nationalities can enter Argentina visa-free for up to 90 days. No special visa \
             application needed.",
            [
                "Short visits under 3 months typically don't require a visa",
                "Most nationalities get 90 days on arrival",
                "Extensions available at the immigration office",
            ],
        ));
    }

    if all.is_empty() {
        debug!("No visa rule matched {:?}, falling back to digital nomad", answers);
        all.push(fallback());
    }

    if long_term {
        let has = |kind: VisaKind, all: &[VisaRecommendation]| all.iter().any(|r| r.visa == kind);
        let has_retirement = has(VisaKind::Retirement, &all);
        let has_investment = has(VisaKind::Investment, &all);

        if !has_retirement && income == Income::OverTwoThousand {
            all.push(VisaRecommendation::new(
                VisaKind::Retirement,
                "Your steady income could qualify you for Argentina's rentista visa, offering a \
                 path to permanent residency.",
                [
                    "Your income qualifies you for a rentista visa",
                    "Good option for long-term stays",
                    "Path to permanent residency",
                ],
            ));
        }

        if !has_investment {
            all.push(VisaRecommendation::new(
                VisaKind::Investment,
                "Consider investing in Argentine business or real estate for a long-term \
                 residency path.",
                [
                    "Long-term stays benefit from investment-based residency",
                    "Opens business opportunities",
                    "Renewable for 1–3 years",
                ],
            ));
        }
    }

    let mut matches = all.into_iter();
    let primary = matches.next().unwrap_or_else(fallback);
    Recommendations {
        primary,
        alternatives: matches.take(MAX_ALTERNATIVES).collect(),
    }
}

fn fallback() -> VisaRecommendation {
    VisaRecommendation::new(
        VisaKind::DigitalNomad,
        "A flexible option for those who earn income from abroad. Good starting point while you \
         explore longer-term options.",
        [
            "Based on your answers, this is the most flexible starting visa",
            "Valid for up to 180 days",
            "Can transition to other visa types later",
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visa::quiz::Family;

    fn answers(
        reason: Reason,
        duration: StayLength,
        income: Income,
        job_offer: JobOffer,
    ) -> QuizAnswers {
        QuizAnswers {
            reason,
            duration,
            income,
            job_offer,
            family: Family::JustMe,
            nationality: "Canada".to_string(),
        }
    }

    fn kinds(recommendations: &Recommendations) -> Vec<VisaKind> {
        recommendations.iter().map(|r| r.visa).collect()
    }

    #[test]
    fn test_remote_work_matches_digital_nomad() {
        let result = recommend(&answers(
            Reason::RemoteWork,
            StayLength::ThreeToSixMonths,
            Income::UnderTwoThousand,
            JobOffer::No,
        ));
        assert_eq!(kinds(&result), vec![VisaKind::DigitalNomad]);
        assert_eq!(
            result.primary.match_reasons[0],
            "You indicated remote work as your primary reason"
        );
    }

    #[test]
    fn test_self_employed_visitor_matches_digital_nomad() {
        let result = recommend(&answers(
            Reason::Visiting,
            StayLength::SixToTwelveMonths,
            Income::Local,
            JobOffer::SelfEmployed,
        ));
        assert_eq!(result.primary.visa, VisaKind::DigitalNomad);
        assert_eq!(
            result.primary.match_reasons[0],
            "Self-employed visitors can qualify for the Digital Nomad Visa"
        );
        assert!(result.alternatives.is_empty());
    }

    #[test]
    fn test_job_offer_matches_work_visa() {
        let result = recommend(&answers(
            Reason::Study,
            StayLength::SixToTwelveMonths,
            Income::Local,
            JobOffer::Yes,
        ));
        assert_eq!(kinds(&result), vec![VisaKind::Work, VisaKind::Student]);
        assert_eq!(
            result.primary.match_reasons[0],
            "You have a job offer from an Argentine company"
        );

        let result = recommend(&answers(
            Reason::Employment,
            StayLength::ThreeToSixMonths,
            Income::Local,
            JobOffer::No,
        ));
        assert_eq!(kinds(&result), vec![VisaKind::Work]);
        assert_eq!(
            result.primary.match_reasons[0],
            "Employment in Argentina requires a work visa"
        );
    }

    #[test]
    fn test_retirement_rule() {
        let result = recommend(&answers(
            Reason::Retirement,
            StayLength::ThreeToSixMonths,
            Income::UnderTwoThousand,
            JobOffer::No,
        ));
        assert_eq!(kinds(&result), vec![VisaKind::Retirement]);
        assert_eq!(
            result.primary.match_reasons[1],
            "Income documentation will be required"
        );

        // Long-term income over $2,000 qualifies unless the reason is employment
        let result = recommend(&answers(
            Reason::Visiting,
            StayLength::Permanently,
            Income::OverTwoThousand,
            JobOffer::No,
        ));
        assert_eq!(result.primary.visa, VisaKind::Retirement);
        assert_eq!(
            result.primary.match_reasons[0],
            "Your income level qualifies you for a rentista visa"
        );
    }

    #[test]
    fn test_student_rule() {
        let result = recommend(&answers(
            Reason::Study,
            StayLength::ThreeToSixMonths,
            Income::NoSteadyIncome,
            JobOffer::No,
        ));
        assert_eq!(kinds(&result), vec![VisaKind::Student]);
    }

    #[test]
    fn test_investment_rule() {
        let result = recommend(&answers(
            Reason::Investment,
            StayLength::ThreeToSixMonths,
            Income::Local,
            JobOffer::No,
        ));
        assert_eq!(kinds(&result), vec![VisaKind::Investment]);

        let result = recommend(&answers(
            Reason::Study,
            StayLength::OneYearPlus,
            Income::Local,
            JobOffer::SelfEmployed,
        ));
        assert_eq!(kinds(&result), vec![VisaKind::Student, VisaKind::Investment]);
        assert_eq!(
            result.alternatives[0].match_reasons[0],
            "Self-employed long-term residents may qualify through investment"
        );
    }

    #[test]
    fn test_short_visit_matches_tourist_entry() {
        let result = recommend(&answers(
            Reason::Visiting,
            StayLength::UnderThreeMonths,
            Income::NoSteadyIncome,
            JobOffer::SelfEmployed,
        ));
        assert_eq!(kinds(&result), vec![VisaKind::Tourist]);
        assert_eq!(result.primary.visa.href(), "/visas");
    }

    #[test]
    fn test_fallback_is_digital_nomad() {
        let result = recommend(&answers(
            Reason::Visiting,
            StayLength::SixToTwelveMonths,
            Income::NoSteadyIncome,
            JobOffer::No,
        ));
        assert_eq!(kinds(&result), vec![VisaKind::DigitalNomad]);
        assert_eq!(
            result.primary.match_reasons[0],
            "Based on your answers, this is the most flexible starting visa"
        );
    }

    #[test]
    fn test_long_term_alternatives_follow_fallback() {
        let result = recommend(&answers(
            Reason::Visiting,
            StayLength::OneYearPlus,
            Income::Local,
            JobOffer::No,
        ));
        assert_eq!(kinds(&result), vec![VisaKind::DigitalNomad, VisaKind::Investment]);
        assert_eq!(
            result.alternatives[0].description,
            "Consider investing in Argentine business or real estate for a long-term residency path."
        );
    }

    #[test]
    fn test_long_term_pass_adds_retirement_once() {
        let result = recommend(&answers(
            Reason::Employment,
            StayLength::Permanently,
            Income::OverTwoThousand,
            JobOffer::Yes,
        ));
        assert_eq!(
            kinds(&result),
            vec![VisaKind::Work, VisaKind::Retirement, VisaKind::Investment]
        );
        assert_eq!(
            result.alternatives[0].match_reasons[1],
            "Good option for long-term stays"
        );
    }

    #[test]
    fn test_alternatives_are_capped() {
        // digital nomad, work, retirement and investment all match
        let result = recommend(&answers(
            Reason::RemoteWork,
            StayLength::OneYearPlus,
            Income::OverTwoThousand,
            JobOffer::Yes,
        ));
        assert_eq!(result.primary.visa, VisaKind::DigitalNomad);
        assert_eq!(
            result.alternatives.iter().map(|r| r.visa).collect::<Vec<_>>(),
            vec![VisaKind::Work, VisaKind::Retirement]
        );
    }

    #[test]
    fn test_family_and_nationality_are_ignored() {
        let base = answers(
            Reason::Study,
            StayLength::OneYearPlus,
            Income::Local,
            JobOffer::No,
        );
        let mut other = base.clone();
        other.family = Family::Extended;
        other.nationality = "India".to_string();
        assert_eq!(recommend(&base), recommend(&other));
    }
}
