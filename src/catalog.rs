//! Course catalog data model and loading.
//!
//! The catalog is a static, read-only collection of [`Course`] records loaded
//! once at startup. Every user-facing text field is a [`LocalizedText`]
//! carrying one variant per supported locale; the display layer projects it
//! through the active locale with no cross-locale fallback.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::i18n::Locale;

// The builtin catalog shipped with the site, embedded at compile time
const COURSES_JSON: &str = include_str!("../data/courses.json");

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::from_json(COURSES_JSON).expect("embedded courses.json is a valid catalog")
});

/// Errors that can occur while loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate course slug '{0}'")]
    DuplicateSlug(String),
}

/// The same semantic content in every supported locale
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub ru: String,
    pub ua: String,
}

impl LocalizedText {
    /// Project through one locale. An empty variant is returned as-is;
    /// missing course text is a data-entry issue, not a lookup miss.
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::English => &self.en,
            Locale::Russian => &self.ru,
            Locale::Ukrainian => &self.ua,
        }
    }
}

/// One purchasable pricing tier of a course
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tariff {
    pub title: LocalizedText,
    /// Currency-formatted price string, e.g. `"4 800 ₴"` or `"$180"`
    pub price: String,
    /// Pre-discount price rendered struck through
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<String>,
    /// 1-based ids into the global feature list this tariff grants
    #[serde(default)]
    pub include: Vec<u32>,
    /// External payment page; opened in a new browsing context by the host
    pub payment_url: String,
}

/// A named grouping of consecutive lessons within a course program
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Module {
    pub title: LocalizedText,
    pub lessons: Vec<LocalizedText>,
}

/// Course program: either a flat lesson list or titled modules.
/// A course has at most one representation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Program {
    Flat(Vec<LocalizedText>),
    Modular(Vec<Module>),
}

impl Program {
    /// Total lesson count across the whole program, for the host shell's
    /// "N lessons" summary line
    pub fn lesson_count(&self) -> usize {
        match self {
            Program::Flat(lessons) => lessons.len(),
            Program::Modular(modules) => modules.iter().map(|m| m.lessons.len()).sum(),
        }
    }
}

/// One row of the course info list (label is a dictionary key)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InfoRow {
    pub label_key: String,
    pub value: LocalizedText,
}

/// One collapsible FAQ entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: LocalizedText,
    pub answer: LocalizedText,
}

/// A single course record
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Course {
    /// Stable unique id, used in URLs and as the map key
    pub slug: String,
    pub title: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<LocalizedText>,
    pub short_description: LocalizedText,
    pub tariffs_intro: LocalizedText,
    /// Display order on the catalog page; missing sorts last
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    /// Language/category tag used for catalog filtering ("ua", "en", ...)
    pub course_lang: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_width_image_src: Option<String>,
    #[serde(default)]
    pub tariffs: Vec<Tariff>,
    #[serde(default)]
    pub info_rows: Vec<InfoRow>,
    #[serde(default)]
    pub faq: Vec<FaqEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<Program>,
}

#[derive(Deserialize)]
struct RawCatalog {
    courses: Vec<Course>,
}

/// The static course catalog with slug-keyed lookup
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    by_slug: HashMap<String, usize>,
}

impl Catalog {
    /// Parse a catalog from JSON, rejecting duplicate slugs
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;

        let mut by_slug = HashMap::with_capacity(raw.courses.len());
        for (index, course) in raw.courses.iter().enumerate() {
            if by_slug.insert(course.slug.clone(), index).is_some() {
                return Err(CatalogError::DuplicateSlug(course.slug.clone()));
            }
        }

        tracing::debug!("Loaded catalog with {} courses", raw.courses.len());

        Ok(Self {
            courses: raw.courses,
            by_slug,
        })
    }

    /// The catalog embedded in the binary
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// All courses in catalog order
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Look up one course by slug
    pub fn course(&self, slug: &str) -> Option<&Course> {
        self.by_slug.get(slug).map(|&index| &self.courses[index])
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
