//! The static template catalog: data model, loading, lookup and search.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bundled seed catalog, embedded at compile time.
const BUNDLED_CATALOG: &str = include_str!("../data/conversation-templates.json");

/// Errors produced while constructing a [`TemplateCatalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog JSON could not be parsed.
    #[error("failed to parse template catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two templates share an identifier that must be unique.
    #[error("duplicate template {field}: '{value}'")]
    Duplicate {
        /// Which identifier collided (`id` or `slug`).
        field: &'static str,
        /// The colliding value.
        value: String,
    },
}

/// Value type of a template parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    String,
    /// Multi-line free text; validated like [`ParameterKind::String`].
    Text,
    Number,
    Boolean,
}

/// One typed fill-in field of a template.
///
/// `name` is unique within its template; the prompt references it as
/// `{name}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParameterKind,
    pub required: bool,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

/// A reusable prompt skeleton. Immutable after catalog load; identity is
/// `id`, also addressable by unique `slug`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub prompt: String,
    pub parameters: Vec<TemplateParameter>,
}

#[derive(Debug, Deserialize)]
struct TemplateCollection {
    templates: Vec<Template>,
}

/// Read-only collection of templates, loaded once at startup.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    /// Loads the catalog bundled with the crate.
    ///
    /// # Errors
    /// Returns [`CatalogError`] if the bundled data is malformed. A build
    /// defect, surfaced loudly at startup rather than as empty results.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Parses a catalog from a JSON document of the form
    /// `{ "templates": [...] }`.
    ///
    /// # Errors
    /// - [`CatalogError::Parse`] on malformed JSON
    /// - [`CatalogError::Duplicate`] when two templates share an `id` or `slug`
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let collection: TemplateCollection = serde_json::from_str(json)?;
        Self::from_templates(collection.templates)
    }

    /// Builds a catalog from already-parsed templates, enforcing identifier
    /// uniqueness.
    pub fn from_templates(templates: Vec<Template>) -> Result<Self, CatalogError> {
        for (i, t) in templates.iter().enumerate() {
            for other in &templates[..i] {
                if other.id == t.id {
                    return Err(CatalogError::Duplicate {
                        field: "id",
                        value: t.id.clone(),
                    });
                }
                if other.slug == t.slug {
                    return Err(CatalogError::Duplicate {
                        field: "slug",
                        value: t.slug.clone(),
                    });
                }
            }
        }
        Ok(Self { templates })
    }

    /// Looks a template up by its exact slug.
    pub fn get(&self, slug: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.slug == slug)
    }

    /// Looks a template up by its exact id.
    pub fn get_by_id(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Full catalog snapshot in insertion order.
    pub fn all(&self) -> Vec<Template> {
        self.templates.clone()
    }

    /// Number of templates in the catalog.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True when the catalog holds no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Templates whose category equals `category`, case-insensitively.
    pub fn by_category(&self, category: &str) -> Vec<Template> {
        self.templates
            .iter()
            .filter(|t| t.category.eq_ignore_ascii_case(category))
            .cloned()
            .collect()
    }

    /// Unique categories, lexicographically sorted.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> =
            self.templates.iter().map(|t| t.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Case-insensitive substring search across name, description, category
    /// and tags. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<Template> {
        let term = query.to_lowercase();
        self.templates
            .iter()
            .filter(|t| {
                t.name.to_lowercase().contains(&term)
                    || t.description.to_lowercase().contains(&term)
                    || t.category.to_lowercase().contains(&term)
                    || t.tags.iter().any(|tag| tag.to_lowercase().contains(&term))
            })
            .cloned()
            .collect()
    }
}
