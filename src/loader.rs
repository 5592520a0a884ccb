//! Incremental Loader
//!
//! Reducer behind the infinite-scroll grid. All transitions go through
//! `&mut LoaderState`, so the component only has to hold one signal.
//!
//! Request lifecycle:
//! 1. [`LoaderState::reset`] / [`LoaderState::request_next_page`] check the
//!    single-flight guard and set it in the same call, returning a [`Ticket`].
//! 2. The caller performs the fetch with `ticket.request`.
//! 3. [`LoaderState::complete`] merges the result, unless the ticket belongs
//!    to an older generation (filters changed or the loader was retired).

use std::collections::HashSet;

use crate::commands::FetchError;
use crate::models::{Filters, Item, PageRequest, PageResponse};

/// Items requested per page
pub const PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    /// Every matching item is loaded; only a filter change restarts loading
    Finished,
    Error(String),
}

/// Permission to perform one page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    reset: bool,
    pub request: PageRequest,
}

/// What [`LoaderState::complete`] did with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merge {
    Loaded { added: usize },
    Finished { added: usize },
    Failed,
    /// Response for an outdated generation; nothing changed
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoaderState {
    items: Vec<Item>,
    seen: HashSet<i64>,
    offset: u64,
    total: u64,
    phase: LoadPhase,
    filters: Filters,
    page_size: u32,
    generation: u64,
    in_flight: bool,
    requests_issued: u32,
}

impl Default for LoaderState {
    fn default() -> Self {
        Self::new(PAGE_SIZE, Filters::default())
    }
}

impl LoaderState {
    pub fn new(page_size: u32, filters: Filters) -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
            offset: 0,
            total: 0,
            phase: LoadPhase::Idle,
            filters,
            page_size: page_size.max(1),
            generation: 0,
            in_flight: false,
            requests_issued: 0,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn is_finished(&self) -> bool {
        self.phase == LoadPhase::Finished
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            LoadPhase::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Page requests admitted since construction
    pub fn requests_issued(&self) -> u32 {
        self.requests_issued
    }

    /// Sequence of the last accumulated item; changes whenever the tail does
    pub fn tail(&self) -> Option<i64> {
        self.items.last().map(|item| item.sequence)
    }

    /// Drop everything, adopt `filters` and start again from `skip = 0`.
    ///
    /// Any request still in flight becomes stale.
    pub fn reset(&mut self, filters: Filters) -> Ticket {
        self.generation += 1;
        self.items.clear();
        self.seen.clear();
        self.offset = 0;
        self.total = 0;
        self.filters = filters;
        self.phase = LoadPhase::Idle;
        self.in_flight = false;
        self.begin(true)
    }

    /// Next page, unless a request is already outstanding or the list is done
    pub fn request_next_page(&mut self) -> Option<Ticket> {
        if self.in_flight || self.is_finished() {
            return None;
        }
        Some(self.begin(false))
    }

    /// Invalidate outstanding tickets without starting a new request
    pub fn retire(&mut self) {
        self.generation += 1;
        self.in_flight = false;
        if self.phase == LoadPhase::Loading {
            self.phase = LoadPhase::Idle;
        }
    }

    fn begin(&mut self, reset: bool) -> Ticket {
        self.in_flight = true;
        self.phase = LoadPhase::Loading;
        self.requests_issued += 1;

        let skip = if reset { 0 } else { self.offset };
        Ticket {
            generation: self.generation,
            reset,
            request: PageRequest::new(skip, self.page_size, &self.filters),
        }
    }

    /// Apply the outcome of the request admitted by `ticket`
    pub fn complete(&mut self, ticket: &Ticket, result: Result<PageResponse, FetchError>) -> Merge {
        if ticket.generation != self.generation {
            return Merge::Stale;
        }
        self.in_flight = false;

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                self.phase = LoadPhase::Error(e.to_string());
                return Merge::Failed;
            }
        };

        if ticket.reset {
            self.items.clear();
            self.seen.clear();
            self.offset = 0;
        }

        let received = page.items.len();
        let before = self.items.len();
        for item in page.items {
            if self.seen.insert(item.sequence) {
                self.items.push(item);
            }
        }
        let added = self.items.len() - before;

        self.offset += received as u64;
        self.total = page.total;

        if received == 0 || self.offset >= self.total {
            self.phase = LoadPhase::Finished;
            Merge::Finished { added }
        } else {
            self.phase = LoadPhase::Loaded;
            Merge::Loaded { added }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortOrder;

    const MAX_LIMIT: usize = 100;

    fn catalog(count: i64) -> Vec<Item> {
        (1..=count)
            .map(|n| Item {
                id: 1000 + n,
                name: format!("Item {n}"),
                category: format!("Category {}", ((n - 1) % 5) + 1),
                image_path: format!("https://picsum.photos/seed/item{n}/300/200"),
                sequence: n,
            })
            .collect()
    }

    /// In-memory stand-in for `GET /api/items`
    fn serve(catalog: &[Item], req: &PageRequest) -> PageResponse {
        let needle = req.search.to_lowercase();
        let mut matches: Vec<Item> = catalog
            .iter()
            .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
            .filter(|item| req.category == "all" || item.category == req.category)
            .cloned()
            .collect();

        match SortOrder::from_param(req.sort) {
            SortOrder::Insertion => matches.sort_by_key(|i| i.sequence),
            SortOrder::Latest => matches.sort_by_key(|i| std::cmp::Reverse(i.sequence)),
            SortOrder::NameAsc => matches.sort_by(|a, b| a.name.cmp(&b.name).then(a.sequence.cmp(&b.sequence))),
            SortOrder::NameDesc => matches.sort_by(|a, b| b.name.cmp(&a.name).then(a.sequence.cmp(&b.sequence))),
        }

        let total = matches.len() as u64;
        let items = matches
            .into_iter()
            .skip(req.skip as usize)
            .take((req.limit as usize).min(MAX_LIMIT))
            .collect();
        PageResponse { items, total }
    }

    fn filters(search: &str, category: &str, sort: SortOrder) -> Filters {
        Filters {
            search: search.to_string(),
            category: category.to_string(),
            sort,
        }
    }

    /// Mount, then keep asking for pages until the loader refuses
    fn load_all(loader: &mut LoaderState, catalog: &[Item]) -> u32 {
        let mut fetches = 0;
        let mut next = Some(loader.reset(loader.filters().clone()));
        while let Some(ticket) = next {
            fetches += 1;
            let response = serve(catalog, &ticket.request);
            loader.complete(&ticket, Ok(response));
            next = loader.request_next_page();
        }
        fetches
    }

    fn sequences(loader: &LoaderState) -> Vec<i64> {
        loader.items().iter().map(|i| i.sequence).collect()
    }

    #[test]
    fn test_loads_every_match_exactly_once() {
        let catalog = catalog(100);
        let configs = [
            filters("", "all", SortOrder::Insertion),
            filters("", "all", SortOrder::Latest),
            filters("Item 1", "all", SortOrder::NameAsc),
            filters("", "Category 3", SortOrder::NameDesc),
            filters("item 2", "Category 2", SortOrder::Latest),
            filters("no such item", "all", SortOrder::Latest),
        ];

        for config in configs {
            let mut loader = LoaderState::new(PAGE_SIZE, config.clone());
            load_all(&mut loader, &catalog);

            let seqs = sequences(&loader);
            let unique: HashSet<i64> = seqs.iter().copied().collect();
            assert_eq!(unique.len(), seqs.len(), "duplicates for {config:?}");
            assert_eq!(seqs.len() as u64, loader.total(), "incomplete for {config:?}");
            assert_eq!(loader.offset(), loader.total());
            assert!(loader.is_finished());
        }
    }

    #[test]
    fn test_single_flight() {
        let catalog = catalog(100);
        let mut loader = LoaderState::default();

        let first = loader.reset(Filters::default());
        assert!(loader.is_loading());
        assert_eq!(loader.request_next_page(), None);
        assert_eq!(loader.request_next_page(), None);
        assert_eq!(loader.requests_issued(), 1);

        loader.complete(&first, Ok(serve(&catalog, &first.request)));
        assert!(!loader.is_loading());

        let second = loader.request_next_page().expect("guard should be released");
        assert_eq!(second.request.skip, 20);
        assert_eq!(loader.request_next_page(), None);
        assert_eq!(loader.requests_issued(), 2);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let catalog = catalog(100);
        let mut loader = LoaderState::default();

        let old = loader.reset(filters("", "all", SortOrder::Latest));
        let new = loader.reset(filters("", "Category 1", SortOrder::Insertion));

        let merged = loader.complete(&old, Ok(serve(&catalog, &old.request)));
        assert_eq!(merged, Merge::Stale);
        assert!(loader.items().is_empty());
        assert!(loader.is_loading(), "new request is still outstanding");

        loader.complete(&new, Ok(serve(&catalog, &new.request)));
        assert!(loader.items().iter().all(|i| i.category == "Category 1"));
        assert_eq!(sequences(&loader)[..3], [1, 6, 11]);
    }

    #[test]
    fn test_stale_error_is_dropped() {
        let mut loader = LoaderState::default();
        let old = loader.reset(Filters::default());
        let _new = loader.reset(filters("Item", "all", SortOrder::Latest));

        let merged = loader.complete(&old, Err(FetchError::Network("offline".to_string())));
        assert_eq!(merged, Merge::Stale);
        assert_eq!(loader.phase(), &LoadPhase::Loading);
    }

    #[test]
    fn test_retire_invalidates_in_flight() {
        let catalog = catalog(10);
        let mut loader = LoaderState::default();
        let ticket = loader.reset(Filters::default());

        loader.retire();
        assert_eq!(loader.complete(&ticket, Ok(serve(&catalog, &ticket.request))), Merge::Stale);
        assert!(loader.items().is_empty());
        assert_eq!(loader.phase(), &LoadPhase::Idle);
    }

    #[test]
    fn test_name_sort_order_is_kept() {
        let catalog = catalog(100);
        for sort in [SortOrder::NameAsc, SortOrder::NameDesc] {
            let mut loader = LoaderState::new(PAGE_SIZE, filters("", "all", sort));
            load_all(&mut loader, &catalog);

            for pair in loader.items().windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                match sort {
                    SortOrder::NameAsc => assert!((&a.name, a.sequence) <= (&b.name, b.sequence)),
                    _ => assert!(a.name > b.name || (a.name == b.name && a.sequence < b.sequence)),
                }
            }
        }
    }

    #[test]
    fn test_sequence_sorts_are_monotonic() {
        let catalog = catalog(100);

        let mut latest = LoaderState::new(PAGE_SIZE, filters("", "all", SortOrder::Latest));
        load_all(&mut latest, &catalog);
        assert_eq!(sequences(&latest), (1..=100).rev().collect::<Vec<_>>());

        let mut insertion = LoaderState::new(PAGE_SIZE, filters("", "all", SortOrder::Insertion));
        load_all(&mut insertion, &catalog);
        assert_eq!(sequences(&insertion), (1..=100).collect::<Vec<_>>());
    }

    #[test]
    fn test_terminates_after_three_pages_of_45() {
        let catalog = catalog(45);
        let mut loader = LoaderState::default();

        let fetches = load_all(&mut loader, &catalog);
        assert_eq!(fetches, 3);
        assert_eq!(loader.requests_issued(), 3);
        assert_eq!(loader.items().len(), 45);
        assert_eq!(loader.request_next_page(), None);
        assert_eq!(loader.requests_issued(), 3);
    }

    #[test]
    fn test_page_sizes_20_20_5() {
        let catalog = catalog(45);
        let mut loader = LoaderState::default();

        let mut added = Vec::new();
        let mut next = Some(loader.reset(Filters::default()));
        while let Some(ticket) = next {
            match loader.complete(&ticket, Ok(serve(&catalog, &ticket.request))) {
                Merge::Loaded { added: n } | Merge::Finished { added: n } => added.push(n),
                other => panic!("unexpected {other:?}"),
            }
            next = loader.request_next_page();
        }
        assert_eq!(added, vec![20, 20, 5]);
    }

    #[test]
    fn test_empty_result_finishes() {
        let mut loader = LoaderState::default();
        let ticket = loader.reset(Filters::default());

        let merged = loader.complete(&ticket, Ok(PageResponse::default()));
        assert_eq!(merged, Merge::Finished { added: 0 });
        assert!(loader.is_finished());
        assert_eq!(loader.request_next_page(), None);
    }

    #[test]
    fn test_error_keeps_items_and_allows_retry() {
        let catalog = catalog(100);
        let mut loader = LoaderState::default();
        let first = loader.reset(Filters::default());
        loader.complete(&first, Ok(serve(&catalog, &first.request)));

        let second = loader.request_next_page().unwrap();
        let merged = loader.complete(&second, Err(FetchError::Timeout));
        assert_eq!(merged, Merge::Failed);
        assert!(loader.error().is_some());
        assert_eq!(loader.items().len(), 20);
        assert!(!loader.is_loading());

        let retry = loader.request_next_page().expect("errors are retryable");
        assert_eq!(retry.request.skip, second.request.skip);
        loader.complete(&retry, Ok(serve(&catalog, &retry.request)));
        assert_eq!(loader.items().len(), 40);
        assert_eq!(loader.phase(), &LoadPhase::Loaded);
    }

    #[test]
    fn test_filter_change_resets_from_zero() {
        let catalog = catalog(100);
        let mut loader = LoaderState::default();
        load_all(&mut loader, &catalog);
        assert!(loader.is_finished());

        let ticket = loader.reset(filters("Item 1", "all", SortOrder::Insertion));
        assert_eq!(ticket.request.skip, 0);
        assert_eq!(ticket.request.search, "Item 1");
        assert!(loader.items().is_empty());
        assert_eq!(loader.offset(), 0);
        assert!(!loader.is_finished());
    }

    #[test]
    fn test_duplicate_sequences_are_not_appended() {
        let catalog = catalog(100);
        let mut loader = LoaderState::default();
        let first = loader.reset(filters("", "all", SortOrder::Insertion));
        let page = serve(&catalog, &first.request);
        loader.complete(&first, Ok(page.clone()));

        // Server returned an overlapping page (e.g. rows shifted underneath)
        let second = loader.request_next_page().unwrap();
        let merged = loader.complete(&second, Ok(page));
        assert_eq!(merged, Merge::Loaded { added: 0 });
        assert_eq!(loader.items().len(), 20);
        assert_eq!(loader.offset(), 40);
    }

    #[test]
    fn test_tail_tracks_last_item() {
        let catalog = catalog(30);
        let mut loader = LoaderState::new(PAGE_SIZE, filters("", "all", SortOrder::Insertion));
        assert_eq!(loader.tail(), None);

        let ticket = loader.reset(loader.filters().clone());
        loader.complete(&ticket, Ok(serve(&catalog, &ticket.request)));
        assert_eq!(loader.tail(), Some(20));
    }
}
