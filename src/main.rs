use ba_expats::cta::ReferralLink;
use ba_expats::directory::RELATED_LIMIT;
use ba_expats::schema::{json_ld, ArticleInput, Breadcrumb, FaqEntry, HowToInput, SchemaObject};
use ba_expats::visa::CountryRegion;
use ba_expats::{
    directory_view, load_catalog, load_config, load_nationalities, recommend, ContactHandler,
    ProfileRecord, QuizAnswers, RegionFilter, SchemaGenerator,
};
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

#[derive(Parser)]
#[command(name = "ba-expats")]
#[command(about = "Directory, structured data and contact tooling for the Buenos Aires Expats site")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List directory profiles matching the filters
    Profiles {
        /// Region slug or "all"
        #[arg(long, default_value = "all")]
        region: String,
        #[arg(long, default_value = "")]
        query: String,
        /// Number of "load more" clicks to apply
        #[arg(long, default_value = "0")]
        more: usize,
    },
    /// Show filter-chip badge counts per region
    Regions,
    /// Show one profile with its related profiles and Article JSON-LD
    Profile {
        id: String,
        #[arg(long, default_value = "2024-01-01")]
        date: String,
    },
    /// Print JSON-LD for a schema kind
    Schema {
        #[arg(value_enum)]
        kind: SchemaKind,
        /// JSON input file, required for all kinds except organization and website
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Wrap the payload in a script element
        #[arg(long)]
        script: bool,
    },
    /// Run the contact endpoint on a request body
    Contact {
        #[arg(long, default_value = "POST")]
        method: String,
        /// Request body file; reads stdin when omitted or "-"
        #[arg(long)]
        body: Option<PathBuf>,
    },
    /// Print a referral tracking URL
    Referral {
        #[arg(long)]
        content: Option<String>,
        #[arg(long, default_value = "referral")]
        medium: String,
    },
    /// Recommend visas for quiz answers given as a query string, e.g.
    /// "reason=remote-work&duration=1-plus-years&income=over-2k&jobOffer=no&family=just-me&nationality=Canada"
    Quiz { answers: String },
    /// Show entry requirements for one country, or list countries
    Country {
        /// Country slug; lists countries when omitted
        slug: Option<String>,
        /// Region slug to list (americas, europe, asia-pacific, africa-middle-east)
        #[arg(long)]
        region: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaKind {
    Organization,
    Website,
    Article,
    HowTo,
    Faq,
    Breadcrumbs,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config()?;
    debug!("{:#?}", config);

    match cli.command {
        Command::Profiles {
            region,
            query,
            more,
        } => {
            let region = RegionFilter::from_slug(&region)
                .ok_or_else(|| format!("Unknown region: {region}"))?;
            let catalog = load_catalog(&config).await?;
            let mut view = directory_view(&catalog, &config);
            view.set_region(region);
            view.set_search_query(query);
            for _ in 0..more {
                view.load_more();
            }

            println!("{}", view.heading());
            println!("{}", view.results_summary());
            if view.is_empty_state() {
                println!("No expats found. Try adjusting your search or filter criteria.");
                return Ok(());
            }
            for profile in view.visible() {
                print_card(profile);
            }
            if view.has_more() {
                println!("{} (use --more to load more profiles)", view.showing_summary());
            }
        }
        Command::Regions => {
            let catalog = load_catalog(&config).await?;
            let counts = catalog.region_counts();
            println!("All: {}", counts.total());
            for (region, count) in counts.iter() {
                let style = region.style();
                println!("{} {}: {}", style.icon, style.label, count);
            }
        }
        Command::Profile { id, date } => {
            let catalog = load_catalog(&config).await?;
            let profile = catalog
                .by_id(&id)
                .ok_or_else(|| format!("Profile not found: {id}"))?;

            println!("{}", profile.headline());
            println!("{}", profile.bio);
            if let Some(blog) = &profile.blog_url {
                println!("Blog: {} ({})", profile.blog_name, blog);
            }

            let related = catalog.related(&id, RELATED_LIMIT);
            if !related.is_empty() {
                println!("\nMore from {}:", profile.region.label());
                for other in related {
                    println!("  {} -> {}", other.name, other.detail_path());
                }
            }

            let neighbors = catalog.neighbors(&id);
            if let Some(previous) = neighbors.previous {
                println!("Previous: {}", previous.detail_path());
            }
            if let Some(next) = neighbors.next {
                println!("Next: {}", next.detail_path());
            }

            let generator = SchemaGenerator::new(config.site.clone());
            let article = generator.profile_article(profile, &date);
            println!("\n{}", json_ld::script_tag(&article)?);
        }
        Command::Schema {
            kind,
            input,
            script,
        } => {
            let generator = SchemaGenerator::new(config.site.clone());
            let schema: SchemaObject = match kind {
                SchemaKind::Organization => generator.organization().into(),
                SchemaKind::Website => generator.website().into(),
                SchemaKind::Article => {
                    let input: ArticleInput = read_input(input).await?;
                    generator.article(&input).into()
                }
                SchemaKind::HowTo => {
                    let input: HowToInput = read_input(input).await?;
                    generator.how_to(&input).into()
                }
                SchemaKind::Faq => {
                    let faqs: Vec<FaqEntry> = read_input(input).await?;
                    generator.faq_page(&faqs).into()
                }
                SchemaKind::Breadcrumbs => {
                    let crumbs: Vec<Breadcrumb> = read_input(input).await?;
                    generator.breadcrumbs(&crumbs).into()
                }
            };

            if script {
                println!("{}", json_ld::script_tag(&schema)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
        }
        Command::Contact { method, body } => {
            let body = match body {
                Some(path) if path.as_os_str() != "-" => tokio::fs::read_to_string(path).await?,
                _ => {
                    let mut buffer = String::new();
                    tokio::io::stdin().read_to_string(&mut buffer).await?;
                    buffer
                }
            };

            let handler = ContactHandler::from_config(&config.contact);
            let response = handler.handle(&method, &body).await;
            println!("{}", response.status);
            println!("{}", response.body);
        }
        Command::Referral { content, medium } => {
            let mut link = ReferralLink::new(&config.referral).medium(medium);
            if let Some(content) = content {
                link = link.content(content);
            }
            println!("{}", link.to_url()?);
        }
        Command::Quiz { answers } => {
            let answers = QuizAnswers::from_query(&answers).ok_or(
                "Quiz answers need valid reason, duration, income, jobOffer, family and nationality",
            )?;
            let nationalities = load_nationalities(&config).await?;
            let recommendations = recommend(&answers);

            for (index, recommendation) in recommendations.iter().enumerate() {
                let visa = recommendation.visa;
                let label = if index == 0 { "Recommended" } else { "Also consider" };
                println!("{}: {} ({})", label, visa.name(), visa.href());
                println!("    {}", recommendation.description);
                for reason in &recommendation.match_reasons {
                    println!("    - {}", reason);
                }
            }
            println!(
                "\nNote for {} citizens: {}",
                answers.nationality,
                nationalities.entry_note(&answers.nationality)
            );
            println!("Share: {}", answers.share_path());
        }
        Command::Country { slug, region } => {
            let nationalities = load_nationalities(&config).await?;
            match slug {
                Some(slug) => {
                    let country = nationalities
                        .by_slug(&slug)
                        .ok_or_else(|| format!("Country not found: {slug}"))?;
                    println!("{}", serde_json::to_string_pretty(country)?);
                }
                None => {
                    let countries = match region {
                        Some(region) => {
                            let region = CountryRegion::from_slug(&region)
                                .ok_or_else(|| format!("Unknown region: {region}"))?;
                            nationalities.by_region(region)
                        }
                        None => nationalities.countries().iter().collect(),
                    };
                    for country in countries {
                        let status = if country.is_exempt() {
                            format!("visa-free {} days", country.stay_duration)
                        } else {
                            "visa required".to_string()
                        };
                        println!(
                            "{} {} ({}) {}",
                            country.flag,
                            country.name,
                            status,
                            country.guide_path()
                        );
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_card(profile: &ProfileRecord) {
    let style = profile.region.style();
    println!(
        "{} {} ({} • {}) {}",
        style.icon,
        profile.name,
        profile.nationality,
        profile.years_in_ba,
        profile.detail_path()
    );
    let mut tags: Vec<&str> = profile.tags.iter().take(2).map(String::as_str).collect();
    let extra = profile.tags.len().saturating_sub(2);
    let extra_label = format!("+{extra}");
    if extra > 0 {
        tags.push(&extra_label);
    }
    if !tags.is_empty() {
        println!("    {}", tags.join(" · "));
    }
}

async fn read_input<T: serde::de::DeserializeOwned>(
    path: Option<PathBuf>,
) -> Result<T, Box<dyn std::error::Error>> {
    let path = path.ok_or("This schema kind needs --input <FILE>")?;
    let json = tokio::fs::read_to_string(&path).await?;
    Ok(serde_json::from_str(&json)?)
}
