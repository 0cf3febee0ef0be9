//! schema.org structured data
//!
//! [`SchemaGenerator`] maps page content to JSON-LD object graphs. Every
//! builder is pure: no validation happens here and any input is echoed into
//! the output as given.
//!
//! ```
//! use ba_expats::schema::{generate_faq_page_schema, json_ld, FaqEntry};
//!
//! let faq = generate_faq_page_schema(&[FaqEntry::new(
//!     "Do I need a visa?",
//!     "Most nationalities get 90 days on arrival.",
//! )]);
//! let payload = json_ld::to_json_ld(&faq).unwrap();
//! assert!(payload.contains("\"@type\":\"FAQPage\""));
//! ```

pub mod json_ld;
mod types;

pub use types::*;

use crate::config::SiteIdentity;
use crate::model::ProfileRecord;
use serde::Deserialize;

/// Page input for [`SchemaGenerator::article`]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInput {
    pub headline: String,
    pub description: String,
    pub url: String,
    pub date_published: String,
    pub date_modified: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Page input for [`SchemaGenerator::how_to`]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HowToInput {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub total_time: Option<String>,
    #[serde(default)]
    pub estimated_cost: Option<CostInput>,
    pub steps: Vec<StepInput>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CostInput {
    pub currency: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StepInput {
    pub name: String,
    pub text: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl StepInput {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Breadcrumb {
    pub name: String,
    /// Absolute URL; the current page is usually left without one
    #[serde(default)]
    pub item: Option<String>,
}

impl Breadcrumb {
    pub fn new(name: impl Into<String>, item: Option<&str>) -> Self {
        Self {
            name: name.into(),
            item: item.map(str::to_string),
        }
    }
}

/// Builds schema.org objects for one site identity
#[derive(Debug, Clone, Default)]
pub struct SchemaGenerator {
    site: SiteIdentity,
}

impl SchemaGenerator {
    pub fn new(site: SiteIdentity) -> Self {
        Self { site }
    }

    pub fn site(&self) -> &SiteIdentity {
        &self.site
    }

    pub fn organization(&self) -> OrganizationSchema {
        OrganizationSchema {
            context: SCHEMA_CONTEXT,
            schema_type: "Organization",
            name: self.site.name.clone(),
            url: self.site.url.clone(),
            logo: self.site.logo.clone(),
            description: self.site.description.clone(),
            same_as: self.site.same_as.clone(),
        }
    }

    pub fn website(&self) -> WebSiteSchema {
        WebSiteSchema {
            context: SCHEMA_CONTEXT,
            schema_type: "WebSite",
            name: self.site.name.clone(),
            url: self.site.url.clone(),
            description: self.site.website_description.clone(),
        }
    }

    /// Article authored and published by the site organization.
    ///
    /// An absent or empty `image` falls back to the site's default image.
    pub fn article(&self, input: &ArticleInput) -> ArticleSchema {
        let image = match &input.image {
            Some(image) if !image.is_empty() => image.clone(),
            _ => self.site.default_image.clone(),
        };

        ArticleSchema {
            context: SCHEMA_CONTEXT,
            schema_type: "Article",
            headline: input.headline.clone(),
            description: input.description.clone(),
            url: input.url.clone(),
            date_published: input.date_published.clone(),
            date_modified: input.date_modified.clone(),
            author: AuthorRef {
                schema_type: "Organization",
                name: self.site.name.clone(),
            },
            publisher: Publisher {
                schema_type: "Organization",
                name: self.site.name.clone(),
                logo: ImageObject {
                    schema_type: "ImageObject",
                    url: self.site.logo.clone(),
                },
            },
            image,
        }
    }

    /// Article for an expat profile detail page
    pub fn profile_article(&self, profile: &ProfileRecord, date: &str) -> ArticleSchema {
        self.article(&ArticleInput {
            headline: profile.headline(),
            description: profile.seo_description(),
            url: format!("{}{}", self.site.url, profile.detail_path()),
            date_published: date.to_string(),
            date_modified: date.to_string(),
            image: None,
        })
    }

    /// Steps keep input order and get 1-based positions. Empty optional
    /// fields are left out.
    pub fn how_to(&self, input: &HowToInput) -> HowToSchema {
        HowToSchema {
            context: SCHEMA_CONTEXT,
            schema_type: "HowTo",
            name: input.name.clone(),
            description: input.description.clone(),
            total_time: input.total_time.clone().filter(|t| !t.is_empty()),
            estimated_cost: input.estimated_cost.as_ref().map(|cost| MonetaryAmount {
                schema_type: "MonetaryAmount",
                currency: cost.currency.clone(),
                value: cost.value.clone(),
            }),
            step: input
                .steps
                .iter()
                .enumerate()
                .map(|(index, step)| HowToStep {
                    schema_type: "HowToStep",
                    position: index + 1,
                    name: step.name.clone(),
                    text: step.text.clone(),
                    url: step.url.clone(),
                })
                .collect(),
        }
    }

    pub fn faq_page(&self, faqs: &[FaqEntry]) -> FaqPageSchema {
        FaqPageSchema {
            context: SCHEMA_CONTEXT,
            schema_type: "FAQPage",
            main_entity: faqs
                .iter()
                .map(|faq| Question {
                    schema_type: "Question",
                    name: faq.question.clone(),
                    accepted_answer: Answer {
                        schema_type: "Answer",
                        text: faq.answer.clone(),
                    },
                })
                .collect(),
        }
    }

    pub fn breadcrumbs(&self, items: &[Breadcrumb]) -> BreadcrumbListSchema {
        BreadcrumbListSchema {
            context: SCHEMA_CONTEXT,
            schema_type: "BreadcrumbList",
            item_list_element: items
                .iter()
                .enumerate()
                .map(|(index, crumb)| ListItem {
                    schema_type: "ListItem",
                    position: index + 1,
                    name: crumb.name.clone(),
                    item: crumb.item.clone(),
                })
                .collect(),
        }
    }
}

// Convenience wrappers using the default site identity

pub fn generate_organization_schema() -> OrganizationSchema {
    SchemaGenerator::default().organization()
}

pub fn generate_website_schema() -> WebSiteSchema {
    SchemaGenerator::default().website()
}

pub fn generate_article_schema(input: &ArticleInput) -> ArticleSchema {
    SchemaGenerator::default().article(input)
}

pub fn generate_how_to_schema(input: &HowToInput) -> HowToSchema {
    SchemaGenerator::default().how_to(input)
}

pub fn generate_faq_page_schema(faqs: &[FaqEntry]) -> FaqPageSchema {
    SchemaGenerator::default().faq_page(faqs)
}

pub fn generate_breadcrumb_schema(items: &[Breadcrumb]) -> BreadcrumbListSchema {
    SchemaGenerator::default().breadcrumbs(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn article_input() -> ArticleInput {
        ArticleInput {
            headline: "Digital Nomad Visa".to_string(),
            description: "How to apply".to_string(),
            url: "https://buenosairesexpats.com/visas/digital-nomad".to_string(),
            date_published: "2024-01-15".to_string(),
            date_modified: "2025-02-01".to_string(),
            image: None,
        }
    }

    #[test]
    fn test_organization_schema() {
        let value = serde_json::to_value(generate_organization_schema()).unwrap();
        assert_eq!(value["@context"], "https://schema.org");
        assert_eq!(value["@type"], "Organization");
        assert_eq!(value["name"], "Buenos Aires Expats");
        assert_eq!(value["sameAs"], json!([]));
    }

    #[test]
    fn test_website_schema_has_no_search_action() {
        let value = serde_json::to_value(generate_website_schema()).unwrap();
        assert_eq!(value["@type"], "WebSite");
        assert!(value.get("potentialAction").is_none());
    }

    #[test]
    fn test_article_defaults_image() {
        let value = serde_json::to_value(generate_article_schema(&article_input())).unwrap();
        assert_eq!(value["image"], "https://buenosairesexpats.com/images/og-image.jpg");
        assert_eq!(value["datePublished"], "2024-01-15");
        assert_eq!(value["author"], json!({"@type": "Organization", "name": "Buenos Aires Expats"}));
        assert_eq!(value["publisher"]["logo"]["@type"], "ImageObject");

        let mut input = article_input();
        input.image = Some(String::new());
        let schema = generate_article_schema(&input);
        assert_eq!(schema.image, "https://buenosairesexpats.com/images/og-image.jpg");

        input.image = Some("https://cdn.example.com/hero.jpg".to_string());
        assert_eq!(generate_article_schema(&input).image, "https://cdn.example.com/hero.jpg");
    }

    #[test]
    fn test_article_is_pure() {
        let input = article_input();
        assert_eq!(generate_article_schema(&input), generate_article_schema(&input));
    }

    #[test]
    fn test_how_to_optional_fields() {
        let input = HowToInput {
            name: "Get your DNI".to_string(),
            description: "Steps".to_string(),
            total_time: Some(String::new()),
            estimated_cost: None,
            steps: vec![StepInput::new("Book", "Book a turno")],
        };
        let value = serde_json::to_value(generate_how_to_schema(&input)).unwrap();
        assert!(value.get("totalTime").is_none());
        assert!(value.get("estimatedCost").is_none());
        assert!(value["step"][0].get("url").is_none());
    }

    #[test]
    fn test_how_to_cost_and_positions() {
        let input = HowToInput {
            name: "Get your DNI".to_string(),
            description: "Steps".to_string(),
            total_time: Some("P90D".to_string()),
            estimated_cost: Some(CostInput {
                currency: "ARS".to_string(),
                value: "15000".to_string(),
            }),
            steps: vec![
                StepInput::new("Book", "Book a turno online"),
                StepInput::new("Attend", "Bring your passport"),
                StepInput::new("Collect", "Wait for the card"),
            ],
        };
        let value = serde_json::to_value(generate_how_to_schema(&input)).unwrap();
        assert_eq!(value["totalTime"], "P90D");
        assert_eq!(
            value["estimatedCost"],
            json!({"@type": "MonetaryAmount", "currency": "ARS", "value": "15000"})
        );
        let positions: Vec<u64> = value["step"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["position"].as_u64().unwrap())
            .collect();
        assert_eq!(positions, vec![1, 2, 3]);
        assert_eq!(value["step"][1]["name"], "Attend");
        assert_eq!(value["step"][1]["@type"], "HowToStep");
    }

    #[test]
    fn test_faq_page_preserves_order_without_position() {
        let faqs = vec![
            FaqEntry::new("First?", "One"),
            FaqEntry::new("Second?", "Two"),
        ];
        let value = serde_json::to_value(generate_faq_page_schema(&faqs)).unwrap();
        let entities = value["mainEntity"].as_array().unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0]["name"], "First?");
        assert_eq!(entities[1]["acceptedAnswer"]["text"], "Two");
        assert!(entities.iter().all(|e| e.get("position").is_none()));
    }

    #[test]
    fn test_breadcrumbs() {
        let crumbs = vec![
            Breadcrumb::new("Home", Some("https://buenosairesexpats.com")),
            Breadcrumb::new("Visas", Some("https://buenosairesexpats.com/visas")),
            Breadcrumb::new("Work Visa", None),
        ];
        let value = serde_json::to_value(generate_breadcrumb_schema(&crumbs)).unwrap();
        let items = value["itemListElement"].as_array().unwrap();
        assert_eq!(items[0]["position"], 1);
        assert_eq!(items[2]["position"], 3);
        assert_eq!(items[2]["name"], "Work Visa");
        assert!(items[2].get("item").is_none());
    }

    #[test]
    fn test_custom_site_identity() {
        let site = SiteIdentity {
            name: "Staging".to_string(),
            same_as: vec!["https://x.com/baexpats".to_string()],
            ..SiteIdentity::default()
        };
        let generator = SchemaGenerator::new(site);
        assert_eq!(generator.organization().same_as.len(), 1);
        assert_eq!(generator.article(&article_input()).publisher.name, "Staging");
    }

    #[test]
    fn test_input_deserializes_from_camel_case() {
        let input: ArticleInput = serde_json::from_str(
            r#"{
                "headline": "H",
                "description": "D",
                "url": "https://buenosairesexpats.com/x",
                "datePublished": "2024-01-01",
                "dateModified": "2024-02-01"
            }"#,
        )
        .unwrap();
        assert!(input.image.is_none());
        assert_eq!(input.date_modified, "2024-02-01");
    }
}
