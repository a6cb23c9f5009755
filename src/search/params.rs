// src/search/params.rs
// =============================================================================
// The parameters of one repository search.
//
// A SearchParams value is never edited in place. Submitting the form builds
// a new one (page 1), and changing page builds a copy with only the page
// replaced. Because the whole tuple is Hash + Eq it doubles as the cache
// key for search responses.
// =============================================================================

use serde::Serialize;
use std::fmt;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Sort {
    #[default]
    Stars,
    Forks,
    Updated,
}

impl Sort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sort::Stars => "stars",
            Sort::Forks => "forks",
            Sort::Updated => "updated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

// The page sizes the search form offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, clap::ValueEnum)]
pub enum PerPage {
    #[value(name = "10")]
    Ten,
    #[default]
    #[value(name = "25")]
    TwentyFive,
    #[value(name = "50")]
    Fifty,
}

impl PerPage {
    pub fn get(&self) -> u32 {
        match self {
            PerPage::Ten => 10,
            PerPage::TwentyFive => 25,
            PerPage::Fifty => 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SearchParams {
    query: String,
    pub sort: Sort,
    pub order: Order,
    pub per_page: PerPage,
    page: u32,
}

impl SearchParams {
    // Builds the parameters for a fresh search (page 1).
    // The query is trimmed; a blank query is rejected.
    pub fn new(query: &str, sort: Sort, order: Order, per_page: PerPage) -> Result<Self> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidInput("search query must not be empty".to_string()));
        }

        Ok(Self {
            query: query.to_string(),
            sort,
            order,
            per_page,
            page: 1,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    // Copy of these parameters on another page. Page 0 becomes page 1.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }
}

impl fmt::Display for SearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" sort={} order={} per_page={} page={}",
            self.query,
            self.sort.as_str(),
            self.order.as_str(),
            self.per_page.get(),
            self.page
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_starts_on_page_one() {
        let params = SearchParams::new("  tokio  ", Sort::Forks, Order::Asc, PerPage::Ten).unwrap();
        assert_eq!(params.query(), "tokio");
        assert_eq!(params.page(), 1);
        assert_eq!(params.sort, Sort::Forks);
    }

    #[test]
    fn test_blank_query_rejected() {
        assert!(SearchParams::new("   ", Sort::Stars, Order::Desc, PerPage::TwentyFive).is_err());
    }

    #[test]
    fn test_with_page_only_replaces_page() {
        let params = SearchParams::new("serde", Sort::Updated, Order::Desc, PerPage::Fifty).unwrap();
        let next = params.with_page(7);

        assert_eq!(next.page(), 7);
        assert_eq!(next.query(), "serde");
        assert_eq!(next.sort, Sort::Updated);
        assert_eq!(next.per_page, PerPage::Fifty);
        // The original value is untouched
        assert_eq!(params.page(), 1);
    }

    #[test]
    fn test_with_page_zero_clamps_to_one() {
        let params = SearchParams::new("serde", Sort::Stars, Order::Desc, PerPage::Ten).unwrap();
        assert_eq!(params.with_page(0).page(), 1);
    }

    #[test]
    fn test_defaults_match_search_form() {
        assert_eq!(Sort::default(), Sort::Stars);
        assert_eq!(Order::default(), Order::Desc);
        assert_eq!(PerPage::default().get(), 25);
    }
}
