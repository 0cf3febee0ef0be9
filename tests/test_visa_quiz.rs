use ba_expats::visa::{
    recommend, CountryRegion, Family, Income, JobOffer, NationalityCatalog, QuizAnswers, Reason,
    StayLength, VisaKind, VisaStatus, STAY_DURATIONS,
};
use std::path::PathBuf;

fn nationalities_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/nationalities.json")
}

#[tokio::test]
async fn test_load_bundled_nationalities() {
    let catalog = NationalityCatalog::load(nationalities_path()).await.unwrap();

    assert_eq!(catalog.len(), 100);
    for region in CountryRegion::ALL {
        assert!(!catalog.by_region(region).is_empty(), "no country in {region}");
    }
    assert!(catalog
        .countries()
        .iter()
        .all(|c| STAY_DURATIONS.contains(&c.stay_duration)));

    let brazil = catalog.by_slug("brazil").unwrap();
    assert_eq!(brazil.visa_status, VisaStatus::Exempt);
    assert_eq!(brazil.stay_duration, 90);

    let india = catalog.by_slug("india").unwrap();
    assert_eq!(india.visa_status, VisaStatus::Required);
    assert!(india.consulate_info.as_ref().unwrap().has_consulate);
    assert!(catalog
        .by_visa_status(VisaStatus::Required)
        .iter()
        .any(|c| c.slug == "india"));
}

#[tokio::test]
async fn test_shared_quiz_link_reproduces_results() {
    let catalog = NationalityCatalog::load(nationalities_path()).await.unwrap();
    let answers = QuizAnswers {
        reason: Reason::Retirement,
        duration: StayLength::Permanently,
        income: Income::OverTwoThousand,
        job_offer: JobOffer::No,
        family: Family::Spouse,
        nationality: "Brazil".to_string(),
    };

    let url = url::Url::parse("https://buenosairesexpats.com")
        .unwrap()
        .join(&answers.share_path())
        .unwrap();
    let restored = QuizAnswers::from_url(&url).unwrap();
    assert_eq!(restored, answers);

    let recommendations = recommend(&restored);
    assert_eq!(recommendations.primary.visa, VisaKind::Retirement);
    assert_eq!(
        recommendations.alternatives.iter().map(|r| r.visa).collect::<Vec<_>>(),
        vec![VisaKind::Investment]
    );
    assert!(catalog
        .entry_note(&restored.nationality)
        .starts_with("Brazil citizens can enter Argentina visa-free for up to 90 days."));
}
