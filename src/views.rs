//! Pure view-derivation rules for the catalog and course-detail pages.
//!
//! Everything in this module is a deterministic function of its inputs:
//! the UI recomputes these projections from the current catalog and locale
//! instead of caching them across a locale change.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{Course, Module, Program, Tariff};
use crate::i18n::Locale;

/// Courses without an explicit display order sort after everything else
const ORDER_SENTINEL: u32 = 999;

/// Dictionary keys of the global feature list, in checklist order.
/// A tariff's `include` ids are 1-based positions into this list.
pub const FEATURE_KEYS: &[&str] = &[
    "courseDetails.features.cabinet",
    "courseDetails.features.lifetimeAccess",
    "courseDetails.features.updates",
    "courseDetails.features.homework",
    "courseDetails.features.curatorCheck",
    "courseDetails.features.calls",
    "courseDetails.features.postSupport",
];

/// Info-row keys surfaced as short badges in single-price mode
const SINGLE_META_KEYS: &[&str] = &[
    "course.info.lessonsCount",
    "course.info.access",
    "course.info.lessonDuration",
];

static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\D").expect("non-digit pattern is valid"));

/// Catalog filter selector chosen in the sidebar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selector<'a> {
    /// Keep everything
    All,
    /// Keep the one course with this slug
    Slug(&'a str),
    /// Keep courses with this language/category tag
    Category(&'a str),
}

/// How the tariff section of a course page is rendered
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresentationMode {
    /// One price card, buy goes straight to payment
    Single,
    /// Feature-comparison list, buy opens the tariff-selection step
    Multi,
}

/// One row of the per-tariff feature checklist
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureItem {
    pub label_key: &'static str,
    pub included: bool,
}

/// Partition the catalog by UI locale: English UI shows only English-tagged
/// courses, any other locale shows everything else.
pub fn filter_by_locale<'a>(courses: &'a [Course], ui_locale: Locale) -> Vec<&'a Course> {
    let english = Locale::English.tag();

    courses
        .iter()
        .filter(|c| {
            if ui_locale == Locale::English {
                c.course_lang == english
            } else {
                c.course_lang != english
            }
        })
        .collect()
}

/// Stable ascending sort by display order; ties keep input order
pub fn sort_by_order<'a>(mut courses: Vec<&'a Course>) -> Vec<&'a Course> {
    courses.sort_by_key(|c| c.order.unwrap_or(ORDER_SENTINEL));
    courses
}

/// The course list shown for a UI locale: locale filter, then order sort
pub fn locale_courses<'a>(courses: &'a [Course], ui_locale: Locale) -> Vec<&'a Course> {
    sort_by_order(filter_by_locale(courses, ui_locale))
}

/// Apply the sidebar selector on top of an already locale-filtered list
pub fn filter_by_selector<'a>(courses: &[&'a Course], selector: Selector) -> Vec<&'a Course> {
    match selector {
        Selector::All => courses.to_vec(),
        Selector::Slug(slug) => courses.iter().copied().filter(|c| c.slug == slug).collect(),
        Selector::Category(tag) => courses
            .iter()
            .copied()
            .filter(|c| c.course_lang == tag)
            .collect(),
    }
}

/// Numeric amount embedded in a currency-formatted price string.
///
/// Strips every non-digit character and parses the rest; a string with no
/// digits is treated as infinitely expensive so it never wins a minimum.
pub fn price_amount(price: &str) -> u64 {
    let digits = NON_DIGITS.replace_all(price, "");

    if digits.is_empty() {
        tracing::warn!("Price string '{}' contains no digits", price);
        return u64::MAX;
    }

    digits.parse().unwrap_or(u64::MAX)
}

/// The cheapest tariff by current price, `None` for an empty list.
/// Strict less-than reduction from the left, so the first tariff wins ties.
pub fn min_price_tariff(tariffs: &[Tariff]) -> Option<&Tariff> {
    let first = tariffs.first()?;

    Some(tariffs.iter().skip(1).fold(first, |best, current| {
        if price_amount(&current.price) < price_amount(&best.price) {
            current
        } else {
            best
        }
    }))
}

/// Global 1-based start number for each module.
///
/// Lesson numbering runs continuously across modules: module 0 starts at 1,
/// module i starts at 1 plus the lesson counts of all earlier modules.
/// Lesson j of module i is numbered `starts[i] + j`.
pub fn module_start_numbers(modules: &[Module]) -> Vec<usize> {
    let mut starts = Vec::with_capacity(modules.len());
    let mut next = 1;

    for module in modules {
        starts.push(next);
        next += module.lessons.len();
    }

    starts
}

/// Start numbers per program section, dispatched on the program shape:
/// a flat program is one section starting at lesson 1.
pub fn program_section_starts(program: &Program) -> Vec<usize> {
    match program {
        Program::Flat(_) => vec![1],
        Program::Modular(modules) => module_start_numbers(modules),
    }
}

/// Tariff-section rendering mode.
///
/// Zero tariffs renders as `Single` with no price: [`min_price_tariff`]
/// returns `None` for the same course, so the page shows no price and the
/// buy action has nothing to dispatch.
pub fn presentation_mode(tariff_count: usize) -> PresentationMode {
    if tariff_count >= 2 {
        PresentationMode::Multi
    } else {
        PresentationMode::Single
    }
}

/// Per-tariff row of the global feature checklist shown in multi mode
pub fn feature_checklist(tariff: &Tariff) -> Vec<FeatureItem> {
    FEATURE_KEYS
        .iter()
        .enumerate()
        .map(|(index, &key)| {
            let id = index as u32 + 1;
            FeatureItem {
                label_key: key,
                included: tariff.include.contains(&id),
            }
        })
        .collect()
}

/// Localized value of the info row with this label key, if present
pub fn info_value<'a>(course: &'a Course, label_key: &str, locale: Locale) -> Option<&'a str> {
    course
        .info_rows
        .iter()
        .find(|row| row.label_key == label_key)
        .map(|row| row.value.get(locale))
}

/// Short badge texts for the single-price card, pulled from the info rows
/// so the card stays in sync with the info section. Empty values are skipped.
pub fn single_tariff_meta<'a>(course: &'a Course, locale: Locale) -> Vec<&'a str> {
    SINGLE_META_KEYS
        .iter()
        .filter_map(|key| info_value(course, key, locale))
        .filter(|value| !value.is_empty())
        .collect()
}
