//! Search session state machine
//!
//! Immutable-transition reducer over the search → fetch → paginate flow.
//! The rendering layer reads the session; the event loop feeds it events
//! and executes the fetch effects it returns. Responses carry the sequence
//! number of the request that produced them, and anything but the latest
//! sequence is discarded, so a slow response to an old query can never
//! overwrite a newer result set.

use crate::catalog::{placeholder_list, BookRecord, CardRecord};
use crate::logging;
use crate::pager::Pager;

/// Fetch lifecycle: `Idle → Loading → {Populated | AllPlaceholder}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// No query committed yet.
    Idle,
    /// A fetch is outstanding; the grid shows the skeleton and ignores
    /// navigation.
    Loading,
    /// At least one real record is in the working list.
    Populated,
    /// Every record is a placeholder (fetch failed or zero results); the
    /// grid is replaced by the no-results message.
    AllPlaceholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    Previous,
    Next,
    Jump(usize),
}

/// Events driving the session reducer.
#[derive(Debug)]
pub enum SessionEvent {
    QueryCommitted(String),
    FetchSucceeded { seq: u64, records: Vec<BookRecord> },
    FetchFailed { seq: u64 },
    PageChanged(PageNav),
}

/// Side effect the caller must execute after applying an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Spawn a catalog fetch for `query`, reporting back with `seq`.
    Fetch { seq: u64, query: String },
}

/// The whole search/browse state: committed query, working list,
/// pagination, and in-page card selection.
pub struct Session {
    pub phase: FetchPhase,
    pub committed_query: String,
    pub records: Vec<CardRecord>,
    pub pager: Pager,
    /// Card index within the visible page.
    pub selected_card: usize,
    latest_seq: u64,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: FetchPhase::Idle,
            committed_query: String::new(),
            records: Vec::new(),
            pager: Pager::new(0),
            selected_card: 0,
            latest_seq: 0,
        }
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Apply one event, returning the effect to execute, if any.
    pub fn apply(&mut self, event: SessionEvent) -> Option<Effect> {
        match event {
            SessionEvent::QueryCommitted(query) => {
                self.latest_seq += 1;
                self.phase = FetchPhase::Loading;
                self.committed_query = query.clone();
                logging::info(
                    "SESSION",
                    &format!("committed query '{}' (seq {})", query, self.latest_seq),
                );
                Some(Effect::Fetch {
                    seq: self.latest_seq,
                    query,
                })
            }
            SessionEvent::FetchSucceeded { seq, records } => {
                if seq != self.latest_seq {
                    logging::warn(
                        "SESSION",
                        &format!("discarding stale response (seq {} < {})", seq, self.latest_seq),
                    );
                    return None;
                }
                let records = records.into_iter().map(CardRecord::Book).collect();
                self.install_working_list(records);
                None
            }
            SessionEvent::FetchFailed { seq } => {
                if seq != self.latest_seq {
                    logging::warn(
                        "SESSION",
                        &format!("discarding stale failure (seq {} < {})", seq, self.latest_seq),
                    );
                    return None;
                }
                self.install_working_list(placeholder_list());
                None
            }
            SessionEvent::PageChanged(nav) => {
                // Navigation only exists while a populated grid is shown.
                if self.phase != FetchPhase::Populated {
                    return None;
                }
                match nav {
                    PageNav::Previous => self.pager.previous(),
                    PageNav::Next => self.pager.next(),
                    PageNav::Jump(page) => self.pager.jump(page),
                }
                self.selected_card = 0;
                None
            }
        }
    }

    /// Replace the working list wholesale and reset pagination to page 1.
    fn install_working_list(&mut self, records: Vec<CardRecord>) {
        let has_real = records.iter().any(|r| !r.is_placeholder());
        self.pager = Pager::new(records.len());
        self.records = records;
        self.selected_card = 0;
        self.phase = if has_real {
            FetchPhase::Populated
        } else {
            FetchPhase::AllPlaceholder
        };
    }

    /// Records on the currently visible page.
    pub fn visible_records(&self) -> &[CardRecord] {
        self.pager.page_slice(&self.records)
    }

    /// The real record under the card cursor, if any.
    pub fn selected_book(&self) -> Option<&BookRecord> {
        self.visible_records()
            .get(self.selected_card)
            .and_then(CardRecord::as_book)
    }

    pub fn select_next_card(&mut self) {
        let visible = self.visible_records().len();
        if visible > 0 && self.selected_card + 1 < visible {
            self.selected_card += 1;
        }
    }

    pub fn select_prev_card(&mut self) {
        self.selected_card = self.selected_card.saturating_sub(1);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
