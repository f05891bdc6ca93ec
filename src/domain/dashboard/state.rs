//! Dashboard state container: app-owned, SDK-provided update logic.
//!
//! The controller never performs I/O. Every parameter change hands back a
//! [`FetchTicket`]; the app runs it (on whatever executor it has) and feeds
//! the resulting [`FetchCompletion`] to [`DashboardController::complete`].
//! Only the completion of the most recently issued ticket can change what is
//! displayed.

use super::{FetchFailure, FetchState, SelectionState, SessionParameters};
use crate::domain::market::MarketEntity;
use crate::domain::price_history::{self, Window};
use crate::error::FetchError;
use crate::shared::{CurrencyCode, Page, PageSize, Resolution, SortOrder};
use chrono::{DateTime, Utc};
use futures_util::future::{AbortHandle, AbortRegistration, Abortable};
use std::future::Future;

#[cfg(feature = "http")]
use crate::domain::market::client::Markets;

// ─── Ticket / completion ─────────────────────────────────────────────────────

/// A fetch the controller wants run.
///
/// Dropping a ticket without running it is fine; the dashboard stays in
/// `Loading` until the next parameter change.
#[derive(Debug)]
pub struct FetchTicket {
    seq: u64,
    params: SessionParameters,
    registration: AbortRegistration,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn params(&self) -> &SessionParameters {
        &self.params
    }

    /// Run the ticket against the markets API.
    #[cfg(feature = "http")]
    pub async fn execute(self, markets: &Markets<'_>) -> FetchCompletion {
        let result = markets.fetch(&self.params, self.registration).await;
        FetchCompletion {
            seq: self.seq,
            result,
        }
    }

    /// Run the ticket with a custom fetcher.
    ///
    /// The future is wrapped so that superseding the ticket resolves it to
    /// `FetchError::Cancelled` at its next poll.
    pub async fn execute_with<F, Fut>(self, fetch: F) -> FetchCompletion
    where
        F: FnOnce(SessionParameters) -> Fut,
        Fut: Future<Output = Result<Vec<MarketEntity>, FetchError>>,
    {
        let result = match Abortable::new(fetch(self.params), self.registration).await {
            Ok(result) => result,
            Err(_aborted) => Err(FetchError::Cancelled),
        };
        FetchCompletion {
            seq: self.seq,
            result,
        }
    }
}

/// The resolved result of a [`FetchTicket`].
#[derive(Debug, Clone)]
pub struct FetchCompletion {
    pub seq: u64,
    pub result: Result<Vec<MarketEntity>, FetchError>,
}

/// What [`DashboardController::complete`] did with a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Applied: the table now shows `rows` entities.
    Displayed { rows: usize },
    /// Applied: the table now shows the failure message.
    Failed,
    /// A newer ticket was issued since. Discarded.
    Superseded,
    /// The ticket was cancelled (or already completed). Discarded.
    Cancelled,
}

impl CompletionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Displayed { .. } | Self::Failed)
    }
}

// ─── DashboardController ─────────────────────────────────────────────────────

/// Session state of one dashboard: parameters, fetch state, selection.
#[derive(Debug, Default)]
pub struct DashboardController {
    params: SessionParameters,
    fetch: FetchState,
    selection: SelectionState,
    issued: u64,
    in_flight: Option<AbortHandle>,
}

impl DashboardController {
    pub fn new(params: SessionParameters) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    // ── Intents ──────────────────────────────────────────────────────────

    /// Initial load. Only issues a fetch from `Idle`.
    pub fn start(&mut self) -> Option<FetchTicket> {
        match self.fetch {
            FetchState::Idle if self.in_flight.is_none() => Some(self.issue()),
            _ => None,
        }
    }

    pub fn set_currency(&mut self, currency: CurrencyCode) -> Option<FetchTicket> {
        self.update(|p| p.currency = currency)
    }

    pub fn set_sort(&mut self, sort: SortOrder) -> Option<FetchTicket> {
        self.update(|p| p.sort = sort)
    }

    pub fn set_page(&mut self, page: Page) -> Option<FetchTicket> {
        self.update(|p| p.page = page)
    }

    pub fn set_page_size(&mut self, page_size: PageSize) -> Option<FetchTicket> {
        self.update(|p| p.page_size = page_size)
    }

    /// Page and page size together, as a table pager reports them. One fetch.
    pub fn set_pagination(&mut self, page: Page, page_size: PageSize) -> Option<FetchTicket> {
        self.update(|p| {
            p.page = page;
            p.page_size = page_size;
        })
    }

    /// Abort the in-flight fetch without issuing another.
    ///
    /// The dashboard stays in `Loading`. Returns `false` if nothing was in
    /// flight.
    pub fn cancel(&mut self) -> bool {
        match self.in_flight.take() {
            Some(handle) => {
                handle.abort();
                tracing::debug!(seq = self.issued, "Markets fetch cancelled");
                true
            }
            None => false,
        }
    }

    /// Apply a completion if it belongs to the latest in-flight ticket.
    pub fn complete(&mut self, completion: FetchCompletion) -> CompletionOutcome {
        if completion.seq != self.issued {
            tracing::debug!(
                seq = completion.seq,
                latest = self.issued,
                "Discarding superseded markets fetch"
            );
            return CompletionOutcome::Superseded;
        }
        if self.in_flight.take().is_none() {
            tracing::debug!(seq = completion.seq, "Discarding completion of cancelled fetch");
            return CompletionOutcome::Cancelled;
        }

        match completion.result {
            Ok(entities) => {
                let rows = entities.len();
                self.fetch = FetchState::Displaying(entities);
                self.revalidate_selection(rows);
                CompletionOutcome::Displayed { rows }
            }
            Err(FetchError::Cancelled) => {
                tracing::debug!(seq = completion.seq, "Markets fetch dropped");
                CompletionOutcome::Cancelled
            }
            Err(error) => {
                tracing::warn!(
                    seq = completion.seq,
                    kind = ?error.kind(),
                    error = %error,
                    "Markets fetch failed"
                );
                self.fetch = FetchState::Failed(FetchFailure::new(error));
                self.selection = SelectionState::None;
                CompletionOutcome::Failed
            }
        }
    }

    /// Open the detail chart for `row`.
    ///
    /// Rejected (returns `None`, selection unchanged) unless a page is
    /// displayed and `row` is on it.
    pub fn select(&mut self, row: usize) -> Option<&MarketEntity> {
        let FetchState::Displaying(entities) = &self.fetch else {
            return None;
        };
        let entity = entities.get(row)?;
        self.selection = SelectionState::Showing(row);
        Some(entity)
    }

    /// Close the detail chart. Fetch state is untouched.
    pub fn clear_selection(&mut self) {
        self.selection = SelectionState::None;
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn params(&self) -> &SessionParameters {
        &self.params
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    /// Sequence number of the most recently issued ticket (0 before the first).
    pub fn latest_seq(&self) -> u64 {
        self.issued
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Displayed rows. Empty unless in `Displaying`.
    pub fn entities(&self) -> &[MarketEntity] {
        self.fetch.entities().unwrap_or_default()
    }

    /// The entity whose detail chart is open.
    pub fn selected(&self) -> Option<&MarketEntity> {
        self.entities().get(self.selection.index()?)
    }

    /// Daily sparkline of a displayed row.
    pub fn sparkline(&self, row: usize) -> Option<Window<'_>> {
        self.sparkline_at(row, Utc::now())
    }

    pub fn sparkline_at(&self, row: usize, now: DateTime<Utc>) -> Option<Window<'_>> {
        let entity = self.entities().get(row)?;
        Some(price_history::window(&entity.time_series, Resolution::Daily, now))
    }

    /// Hourly series of the selected entity.
    pub fn detail_window(&self) -> Option<Window<'_>> {
        self.detail_window_at(Utc::now())
    }

    pub fn detail_window_at(&self, now: DateTime<Utc>) -> Option<Window<'_>> {
        let entity = self.selected()?;
        Some(price_history::window(&entity.time_series, Resolution::Hourly, now))
    }

    // ── Internal ─────────────────────────────────────────────────────────

    fn update(&mut self, change: impl FnOnce(&mut SessionParameters)) -> Option<FetchTicket> {
        let mut next = self.params;
        change(&mut next);
        if next == self.params {
            return None;
        }
        self.params = next;
        Some(self.issue())
    }

    fn issue(&mut self) -> FetchTicket {
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }
        self.issued += 1;
        let (handle, registration) = AbortHandle::new_pair();
        self.in_flight = Some(handle);
        self.fetch = FetchState::Loading;

        tracing::debug!(
            seq = self.issued,
            currency = %self.params.currency,
            sort = %self.params.sort,
            page = self.params.page.get(),
            per_page = self.params.page_size.get(),
            "Issuing markets fetch"
        );

        FetchTicket {
            seq: self.issued,
            params: self.params,
            registration,
        }
    }

    fn revalidate_selection(&mut self, rows: usize) {
        if let SelectionState::Showing(row) = self.selection {
            if row >= rows {
                tracing::debug!(row, rows, "Clearing selection past the end of the new page");
                self.selection = SelectionState::None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::AssetId;
    use futures_util::future;

    fn entity(name: &str, currency: CurrencyCode) -> MarketEntity {
        MarketEntity {
            id: AssetId::from(name.to_lowercase()),
            name: name.to_string(),
            image: format!("https://example.com/{name}.png"),
            currency,
            current_price: 1.0,
            circulating_supply: 100.0,
            time_series: (0..168).map(f64::from).collect::<Vec<_>>().into(),
        }
    }

    fn rows(n: usize) -> Vec<MarketEntity> {
        (0..n).map(|i| entity(&format!("Coin{i}"), CurrencyCode::Usd)).collect()
    }

    fn ok(ticket: &FetchTicket, entities: Vec<MarketEntity>) -> FetchCompletion {
        FetchCompletion {
            seq: ticket.seq(),
            result: Ok(entities),
        }
    }

    fn displayed(n: usize) -> DashboardController {
        let mut dashboard = DashboardController::default();
        let ticket = dashboard.start().unwrap();
        dashboard.complete(ok(&ticket, rows(n)));
        dashboard
    }

    #[test]
    fn test_start_issues_once() {
        let mut dashboard = DashboardController::default();
        assert_eq!(dashboard.fetch_state(), &FetchState::Idle);
        let ticket = dashboard.start().unwrap();
        assert_eq!(ticket.seq(), 1);
        assert_eq!(ticket.params(), &SessionParameters::default());
        assert!(dashboard.fetch_state().is_loading());
        assert!(dashboard.start().is_none());
    }

    #[test]
    fn test_parameter_change_issues_new_sequence() {
        let mut dashboard = displayed(3);
        let ticket = dashboard.set_currency(CurrencyCode::Eur).unwrap();
        assert_eq!(ticket.seq(), 2);
        assert_eq!(ticket.params().currency, CurrencyCode::Eur);
        assert!(dashboard.fetch_state().is_loading());
        assert_eq!(dashboard.latest_seq(), 2);
    }

    #[test]
    fn test_unchanged_parameter_issues_nothing() {
        let mut dashboard = displayed(3);
        assert!(dashboard.set_currency(CurrencyCode::Usd).is_none());
        assert!(dashboard.set_sort(SortOrder::MarketCapDesc).is_none());
        assert!(dashboard.set_pagination(Page::FIRST, PageSize::Ten).is_none());
        assert_eq!(dashboard.latest_seq(), 1);
        assert_eq!(dashboard.entities().len(), 3);
    }

    #[test]
    fn test_pagination_change_is_one_fetch() {
        let mut dashboard = displayed(10);
        let ticket = dashboard
            .set_pagination(Page::new(4).unwrap(), PageSize::Twenty)
            .unwrap();
        assert_eq!(ticket.seq(), 2);
        assert_eq!(ticket.params().page.get(), 4);
        assert_eq!(ticket.params().page_size, PageSize::Twenty);
    }

    #[test]
    fn test_out_of_order_resolution_shows_latest() {
        let mut dashboard = DashboardController::default();
        let first = dashboard.start().unwrap();
        let second = dashboard.set_currency(CurrencyCode::Brl).unwrap();

        let brl = vec![entity("Bitcoin", CurrencyCode::Brl)];
        assert_eq!(
            dashboard.complete(ok(&second, brl.clone())),
            CompletionOutcome::Displayed { rows: 1 }
        );
        assert_eq!(
            dashboard.complete(ok(&first, rows(5))),
            CompletionOutcome::Superseded
        );
        assert_eq!(dashboard.entities(), &brl[..]);
        assert!(dashboard
            .entities()
            .iter()
            .all(|e| e.currency == dashboard.params().currency));
    }

    #[test]
    fn test_stale_failure_is_discarded() {
        let mut dashboard = DashboardController::default();
        let first = dashboard.start().unwrap();
        let second = dashboard.set_sort(SortOrder::MarketCapAsc).unwrap();
        let stale = FetchCompletion {
            seq: first.seq(),
            result: Err(FetchError::Transport("reset".to_string())),
        };
        assert_eq!(dashboard.complete(stale), CompletionOutcome::Superseded);
        assert!(dashboard.fetch_state().is_loading());
        dashboard.complete(ok(&second, rows(2)));
        assert_eq!(dashboard.entities().len(), 2);
    }

    #[test]
    fn test_cancelled_fetch_stays_loading() {
        let mut dashboard = DashboardController::default();
        let ticket = dashboard.start().unwrap();
        assert!(dashboard.cancel());
        assert!(!dashboard.cancel());

        let late = ok(&ticket, rows(5));
        assert_eq!(dashboard.complete(late), CompletionOutcome::Cancelled);
        assert!(dashboard.fetch_state().is_loading());
    }

    #[test]
    fn test_cancelled_result_is_not_a_failure() {
        let mut dashboard = DashboardController::default();
        let ticket = dashboard.start().unwrap();
        let completion = FetchCompletion {
            seq: ticket.seq(),
            result: Err(FetchError::Cancelled),
        };
        assert_eq!(dashboard.complete(completion), CompletionOutcome::Cancelled);
        assert!(dashboard.fetch_state().is_loading());
    }

    #[test]
    fn test_superseded_ticket_resolves_cancelled() {
        let mut dashboard = DashboardController::default();
        let first = dashboard.start().unwrap();
        let _second = dashboard.set_page_size(PageSize::Five).unwrap();

        let completion =
            tokio_test::block_on(first.execute_with(|_| future::pending()));
        assert!(matches!(completion.result, Err(FetchError::Cancelled)));
        assert_eq!(dashboard.complete(completion), CompletionOutcome::Superseded);
    }

    #[test]
    fn test_execute_with_passes_ticket_parameters() {
        let mut dashboard = DashboardController::default();
        dashboard.start();
        let ticket = dashboard.set_currency(CurrencyCode::Eur).unwrap();
        let completion = tokio_test::block_on(ticket.execute_with(|params| async move {
            Ok(vec![entity("Ether", params.currency)])
        }));
        assert_eq!(
            dashboard.complete(completion),
            CompletionOutcome::Displayed { rows: 1 }
        );
        assert_eq!(dashboard.entities()[0].currency, CurrencyCode::Eur);
    }

    #[test]
    fn test_duplicate_completion_is_ignored() {
        let mut dashboard = DashboardController::default();
        let ticket = dashboard.start().unwrap();
        dashboard.complete(ok(&ticket, rows(3)));
        assert_eq!(
            dashboard.complete(ok(&ticket, rows(1))),
            CompletionOutcome::Cancelled
        );
        assert_eq!(dashboard.entities().len(), 3);
    }

    #[test]
    fn test_failure_shows_message_and_clears_selection() {
        let mut dashboard = displayed(5);
        dashboard.select(2).unwrap();
        let ticket = dashboard.set_page(Page::new(2).unwrap()).unwrap();
        let outcome = dashboard.complete(FetchCompletion {
            seq: ticket.seq(),
            result: Err(FetchError::Upstream {
                status: 503,
                body: "maintenance".to_string(),
            }),
        });
        assert_eq!(outcome, CompletionOutcome::Failed);
        assert!(outcome.is_applied());
        let failure = dashboard.fetch_state().failure().unwrap();
        assert_eq!(failure.user_message(), super::super::FAILURE_MESSAGE);
        assert_eq!(dashboard.selection(), SelectionState::None);
        assert!(dashboard.entities().is_empty());
    }

    #[test]
    fn test_failure_recovers_on_parameter_change() {
        let mut dashboard = DashboardController::default();
        let ticket = dashboard.start().unwrap();
        dashboard.complete(FetchCompletion {
            seq: ticket.seq(),
            result: Err(FetchError::Malformed("missing id".to_string())),
        });
        assert!(dashboard.start().is_none());
        let retry = dashboard.set_currency(CurrencyCode::Eur).unwrap();
        dashboard.complete(ok(&retry, rows(4)));
        assert_eq!(dashboard.entities().len(), 4);
    }

    #[test]
    fn test_selection_past_shrunk_page_is_cleared() {
        let mut dashboard = displayed(5);
        assert_eq!(dashboard.select(3).unwrap().name, "Coin3");
        let ticket = dashboard.set_page_size(PageSize::Five).unwrap();
        dashboard.complete(ok(&ticket, rows(2)));
        assert_eq!(dashboard.selection(), SelectionState::None);
        assert!(dashboard.selected().is_none());
    }

    #[test]
    fn test_selection_within_new_page_is_kept() {
        let mut dashboard = displayed(5);
        dashboard.select(1).unwrap();
        let ticket = dashboard.set_sort(SortOrder::MarketCapAsc).unwrap();
        assert!(dashboard.selected().is_none());
        dashboard.complete(ok(&ticket, rows(5)));
        assert_eq!(dashboard.selection(), SelectionState::Showing(1));
        assert_eq!(dashboard.selected().unwrap().name, "Coin1");
    }

    #[test]
    fn test_select_is_guarded() {
        let mut dashboard = DashboardController::default();
        assert!(dashboard.select(0).is_none());
        let ticket = dashboard.start().unwrap();
        assert!(dashboard.select(0).is_none());
        dashboard.complete(ok(&ticket, rows(2)));
        assert!(dashboard.select(2).is_none());
        assert_eq!(dashboard.selection(), SelectionState::None);
        assert!(dashboard.select(1).is_some());
        assert!(dashboard.select(7).is_none());
        assert_eq!(dashboard.selection(), SelectionState::Showing(1));
    }

    #[test]
    fn test_select_does_not_fetch() {
        let mut dashboard = displayed(3);
        dashboard.select(0);
        assert_eq!(dashboard.latest_seq(), 1);
        assert!(!dashboard.is_in_flight());
    }

    #[test]
    fn test_clear_selection_keeps_fetch_state() {
        let mut dashboard = displayed(3);
        dashboard.select(2);
        dashboard.clear_selection();
        assert_eq!(dashboard.selection(), SelectionState::None);
        assert_eq!(dashboard.entities().len(), 3);
    }

    #[test]
    fn test_sparkline_and_detail_windows() {
        let now = chrono::TimeZone::with_ymd_and_hms(&Utc, 2026, 10, 16, 9, 5, 0).unwrap();
        let mut dashboard = displayed(3);
        assert_eq!(dashboard.sparkline_at(0, now).unwrap().len(), 7);
        assert!(dashboard.sparkline_at(3, now).is_none());
        assert!(dashboard.detail_window_at(now).is_none());
        dashboard.select(1);
        assert_eq!(dashboard.detail_window_at(now).unwrap().len(), 168);
    }
}
