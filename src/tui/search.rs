//! Search input state with quiet-period commit
//!
//! The raw term updates on every keystroke; every edit restarts the quiet
//! timer. Once the term has been stable for [`DEBOUNCE`], the trimmed value
//! is committed — unless it is empty or identical to the previous commit,
//! in which case it is dropped silently and the prior results stay up.
//! Time is passed in by the caller so the commit logic is testable.

use std::time::{Duration, Instant};

/// Quiet interval before a raw term is committed.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

pub struct SearchState {
    pub query: String,
    pub cursor_pos: usize,
    pub focused: bool,
    pending_since: Option<Instant>,
    last_committed: String,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            cursor_pos: 0,
            focused: true,
            pending_since: None,
            last_committed: String::new(),
        }
    }
}

impl SearchState {
    /// Restart the quiet timer; called on every edit.
    fn touch(&mut self, now: Instant) {
        self.pending_since = Some(now);
    }

    /// Commit the raw term if it has been quiet long enough. Returns the
    /// committed term at most once per settled edit burst.
    pub fn poll_commit(&mut self, now: Instant) -> Option<String> {
        let since = self.pending_since?;
        if now.duration_since(since) < DEBOUNCE {
            return None;
        }
        self.pending_since = None;

        let term = self.query.trim();
        if term.is_empty() || term == self.last_committed {
            return None;
        }
        self.last_committed = term.to_string();
        Some(self.last_committed.clone())
    }

    pub fn insert_char(&mut self, c: char, now: Instant) {
        self.query.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
        self.touch(now);
    }

    pub fn backspace(&mut self, now: Instant) {
        if self.cursor_pos > 0 {
            let prev = self.query[..self.cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.query.remove(prev);
            self.cursor_pos = prev;
            self.touch(now);
        }
    }

    pub fn delete(&mut self, now: Instant) {
        if self.cursor_pos < self.query.len() {
            self.query.remove(self.cursor_pos);
            self.touch(now);
        }
    }

    pub fn clear(&mut self, now: Instant) {
        self.query.clear();
        self.cursor_pos = 0;
        self.touch(now);
    }

    pub fn cursor_left(&mut self) {
        if self.cursor_pos > 0 {
            let prev = self.query[..self.cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_pos = prev;
        }
    }

    pub fn cursor_right(&mut self) {
        if self.cursor_pos < self.query.len() {
            let next = self.query[self.cursor_pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_pos + i)
                .unwrap_or(self.query.len());
            self.cursor_pos = next;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_pos = self.query.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rapid_keystrokes_commit_once() {
        let mut search = SearchState::default();
        let start = Instant::now();

        search.insert_char('a', start);
        assert_eq!(search.poll_commit(start + Duration::from_millis(100)), None);

        search.insert_char('b', start + Duration::from_millis(100));
        assert_eq!(search.poll_commit(start + Duration::from_millis(200)), None);

        search.insert_char('c', start + Duration::from_millis(200));
        assert_eq!(search.poll_commit(start + Duration::from_millis(400)), None);

        // 300 ms after the last keystroke the settled term commits, once.
        let settle = start + Duration::from_millis(500);
        assert_eq!(search.poll_commit(settle), Some("abc".to_string()));
        assert_eq!(search.poll_commit(settle + Duration::from_millis(50)), None);
    }

    #[test]
    fn whitespace_only_term_is_dropped() {
        let mut search = SearchState::default();
        let start = Instant::now();
        search.insert_char(' ', start);
        search.insert_char(' ', start);
        assert_eq!(search.poll_commit(start + DEBOUNCE), None);
    }

    #[test]
    fn clearing_after_commit_does_not_recommit_empty() {
        let mut search = SearchState::default();
        let start = Instant::now();
        search.insert_char('x', start);
        assert_eq!(search.poll_commit(start + DEBOUNCE), Some("x".to_string()));

        search.clear(start + DEBOUNCE);
        assert_eq!(search.poll_commit(start + DEBOUNCE * 2), None);
    }

    #[test]
    fn unchanged_term_is_not_recommitted() {
        let mut search = SearchState::default();
        let start = Instant::now();
        search.insert_char('a', start);
        assert_eq!(search.poll_commit(start + DEBOUNCE), Some("a".to_string()));

        // Append and delete: the settled term equals the last commit.
        search.insert_char('b', start + DEBOUNCE);
        search.backspace(start + DEBOUNCE);
        assert_eq!(search.poll_commit(start + DEBOUNCE * 3), None);
    }

    #[test]
    fn committed_term_is_trimmed() {
        let mut search = SearchState::default();
        let start = Instant::now();
        for c in "  dune ".chars() {
            search.insert_char(c, start);
        }
        assert_eq!(
            search.poll_commit(start + DEBOUNCE),
            Some("dune".to_string())
        );
    }

    #[test]
    fn cursor_editing_respects_char_boundaries() {
        let mut search = SearchState::default();
        let now = Instant::now();
        search.insert_char('é', now);
        search.insert_char('x', now);
        search.cursor_left();
        search.cursor_left();
        assert_eq!(search.cursor_pos, 0);
        search.cursor_right();
        assert_eq!(search.cursor_pos, 'é'.len_utf8());
        search.backspace(now);
        assert_eq!(search.query, "x");
    }
}
