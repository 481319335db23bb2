//! Retouch University - localization and course-catalog core
//!
//! This library provides the locale/translation resolver and the pure
//! course-data derivation rules behind the Retouch University site. Routing,
//! rendering, and styling live in the hosting shell; it calls into this crate
//! with plain data and gets plain data (and "open this URL" decisions) back.
//!
//! ## Module Structure
//!
//! - [`mod@i18n`] - Locale detection, active-locale context, dotted-key translation
//! - [`settings`] - Locale preference persistence and the disk environment
//! - [`catalog`] - Course/Tariff/Module data model and catalog loading
//! - [`views`] - Pure view derivations (filters, sorting, prices, lesson numbering)
//! - [`purchase`] - Tariff-selection flow and outbound navigation

pub mod catalog;
pub mod i18n;
pub mod purchase;
pub mod settings;
pub mod views;
