//! Tariff-selection and purchase dispatch flow.
//!
//! The flow decides WHICH payment URL to open and WHEN; actually opening it
//! is delegated to a [`Navigator`] so the core never performs navigation
//! itself. A course with one tariff dispatches immediately; several tariffs
//! require an explicit selection step first.

use crate::catalog::{Course, Tariff};

/// Outbound-navigation capability of the hosting shell
pub trait Navigator {
    /// Open an external URL in a new browsing context
    fn open_url(&mut self, url: &str);
}

/// Opens URLs in the system default browser
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemNavigator;

impl Navigator for SystemNavigator {
    fn open_url(&mut self, url: &str) {
        if let Err(e) = open::that(url) {
            tracing::warn!("Failed to open '{}': {}", url, e);
        }
    }
}

/// Discards navigation requests; for headless and pre-render contexts
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn open_url(&mut self, _url: &str) {}
}

/// Current state of the tariff-selection flow.
///
/// Dispatch itself is transient (the URL is handed to the navigator and the
/// flow returns to `Closed`), so it is not a stored state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FlowState {
    #[default]
    Closed,
    /// The selection dialog is open for this course
    Selecting { slug: String },
}

/// Per-page purchase flow state machine
#[derive(Clone, Debug, Default)]
pub struct PurchaseFlow {
    state: FlowState,
}

impl PurchaseFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Slug of the course whose selection dialog is open, if any
    pub fn selecting_slug(&self) -> Option<&str> {
        match &self.state {
            FlowState::Selecting { slug } => Some(slug),
            FlowState::Closed => None,
        }
    }

    /// Buy action from a course card or the purchase bar.
    ///
    /// One tariff skips selection and dispatches its payment URL directly;
    /// several open the selection step. Zero tariffs is a no-op (the page
    /// shows no price for such a course).
    pub fn buy(&mut self, course: &Course, navigator: &mut dyn Navigator) {
        match course.tariffs.as_slice() {
            [] => {
                tracing::debug!("Buy on '{}' with no tariffs ignored", course.slug);
            }
            [only] => {
                self.state = FlowState::Closed;
                navigator.open_url(&only.payment_url);
            }
            _ => {
                self.state = FlowState::Selecting {
                    slug: course.slug.clone(),
                };
            }
        }
    }

    /// Explicit tariff choice while the selection dialog is open.
    /// Ignored when the flow is closed.
    pub fn choose(&mut self, tariff: &Tariff, navigator: &mut dyn Navigator) {
        if matches!(self.state, FlowState::Selecting { .. }) {
            self.state = FlowState::Closed;
            navigator.open_url(&tariff.payment_url);
        }
    }

    /// Cancel/dismiss the selection dialog
    pub fn dismiss(&mut self) {
        self.state = FlowState::Closed;
    }
}
