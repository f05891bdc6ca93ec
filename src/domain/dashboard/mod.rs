//! Dashboard domain: session parameters, fetch/selection state, controller.

pub mod state;

use crate::domain::market::wire::MarketsQuery;
use crate::domain::market::MarketEntity;
use crate::error::{FetchError, FetchErrorKind};
use crate::shared::{CurrencyCode, Page, PageSize, SortOrder};
use serde::{Deserialize, Serialize};

pub use state::{CompletionOutcome, DashboardController, FetchCompletion, FetchTicket};

/// Shown in place of the table whenever a fetch fails, whatever the cause.
pub const FAILURE_MESSAGE: &str = "It wasn't possible to get data. The markets API is not working.";

// ─── SessionParameters ───────────────────────────────────────────────────────

/// The user-controlled inputs of one listing request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionParameters {
    pub currency: CurrencyCode,
    pub sort: SortOrder,
    pub page: Page,
    pub page_size: PageSize,
}

impl SessionParameters {
    /// Upstream query for these parameters. Always asks for the 7-day series.
    pub fn query(&self) -> MarketsQuery {
        MarketsQuery {
            vs_currency: self.currency.vs_currency(),
            order: self.sort,
            per_page: self.page_size.get(),
            page: self.page.get(),
            sparkline: true,
        }
    }
}

// ─── FetchState ──────────────────────────────────────────────────────────────

/// Why the current page could not be shown.
///
/// Carries the classified error for logs and diagnostics. Rendering should
/// use [`FetchFailure::user_message`], which is the same for every class.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchFailure {
    error: FetchError,
}

impl FetchFailure {
    pub(crate) fn new(error: FetchError) -> Self {
        Self { error }
    }

    pub fn error(&self) -> &FetchError {
        &self.error
    }

    pub fn kind(&self) -> FetchErrorKind {
        self.error.kind()
    }

    pub fn user_message(&self) -> &'static str {
        FAILURE_MESSAGE
    }
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    /// The page of the latest request, in upstream order.
    Displaying(Vec<MarketEntity>),
    /// The latest request failed. Stays until a parameter changes.
    Failed(FetchFailure),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn entities(&self) -> Option<&[MarketEntity]> {
        match self {
            FetchState::Displaying(entities) => Some(entities),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            FetchState::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

// ─── SelectionState ──────────────────────────────────────────────────────────

/// Which row, if any, has its detail chart open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    None,
    Showing(usize),
}

impl SelectionState {
    pub fn index(&self) -> Option<usize> {
        match self {
            SelectionState::None => None,
            SelectionState::Showing(i) => Some(*i),
        }
    }
}
