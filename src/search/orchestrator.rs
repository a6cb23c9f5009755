// src/search/orchestrator.rs
// =============================================================================
// The search orchestrator owns the current search parameters and decides
// which response gets displayed.
//
// Flow:
//   submit(params)      -> new parameters, page forced to 1, new request
//   change_page(page)   -> same parameters with only the page replaced
//   complete(ticket, r) -> stores the response if it is still the latest
//
// Every request is tagged with a Ticket from a monotonic counter. When two
// requests are in flight and resolve out of order, only the one carrying the
// latest ticket is shown; the other is dropped. No request is cancelled.
// =============================================================================

use tracing::{debug, info};

use super::params::SearchParams;
use crate::error::{AppError, Result};
use crate::github::SearchResponse;
use crate::pagination::{Affordance, PaginationProps, PaginationView, DEFAULT_MAX_PAGES};

// Anything that can run a repository search. GitHubClient in production,
// in-memory fakes in tests.
pub trait RepositorySearch {
    async fn search(&self, params: &SearchParams) -> Result<SearchResponse>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug)]
pub enum SearchState {
    Idle,
    Loading,
    Loaded(SearchResponse),
    Failed(AppError),
}

pub struct SearchOrchestrator {
    params: Option<SearchParams>,
    state: SearchState,
    latest: u64,
    max_pages: u32,
}

impl Default for SearchOrchestrator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAGES)
    }
}

impl SearchOrchestrator {
    pub fn new(max_pages: u32) -> Self {
        Self {
            params: None,
            state: SearchState::Idle,
            latest: 0,
            max_pages,
        }
    }

    pub fn params(&self) -> Option<&SearchParams> {
        self.params.as_ref()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    // Replaces all parameters (a form submission). Always starts at page 1.
    pub fn submit(&mut self, params: SearchParams) -> Ticket {
        let params = params.with_page(1);
        info!(%params, "new search submitted");
        self.params = Some(params);
        self.issue()
    }

    // Replaces only the page. Returns None before the first submission.
    pub fn change_page(&mut self, page: u32) -> Option<Ticket> {
        let next = self.params.as_ref()?.with_page(page);
        debug!(page = next.page(), "page changed");
        self.params = Some(next);
        Some(self.issue())
    }

    // Routes a click on the pagination control to change_page.
    // Disabled buttons and ellipses never reach here (see PaginationView::click).
    pub fn handle_click(&mut self, view: &PaginationView, affordance: Affordance) -> Option<Ticket> {
        let mut ticket = None;
        view.click(affordance, |page| ticket = self.change_page(page));
        ticket
    }

    // The request that should be in flight right now
    pub fn pending(&self) -> Option<(Ticket, SearchParams)> {
        match (&self.state, &self.params) {
            (SearchState::Loading, Some(params)) => Some((Ticket(self.latest), params.clone())),
            _ => None,
        }
    }

    // Accepts a finished request. Returns false, leaving the displayed state
    // alone, when a newer request has been issued since this one.
    pub fn complete(&mut self, ticket: Ticket, result: Result<SearchResponse>) -> bool {
        if ticket.0 != self.latest {
            debug!(
                ticket = ticket.0,
                latest = self.latest,
                "discarding stale search response"
            );
            return false;
        }

        self.state = match result {
            Ok(response) => SearchState::Loaded(response),
            Err(e) => SearchState::Failed(e),
        };
        true
    }

    // Runs the pending request, if any, against the backend
    pub async fn run<S: RepositorySearch>(&mut self, backend: &S) -> bool {
        let Some((ticket, params)) = self.pending() else {
            return false;
        };

        let result = backend.search(&params).await;
        self.complete(ticket, result)
    }

    // What the pagination control needs. None unless a non-empty page of
    // results is on screen.
    pub fn pagination_props(&self) -> Option<PaginationProps> {
        let params = self.params.as_ref()?;
        match &self.state {
            SearchState::Loaded(response) if !response.items.is_empty() => Some(
                PaginationProps::new(params.page(), response.total_count, params.per_page.get())
                    .with_max_pages(self.max_pages),
            ),
            _ => None,
        }
    }

    fn issue(&mut self) -> Ticket {
        self.latest += 1;
        self.state = SearchState::Loading;
        Ticket(self.latest)
    }
}
