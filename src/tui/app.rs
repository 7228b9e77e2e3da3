use crate::catalog::{BookRecord, CatalogClient};
use crate::logging;
use crate::error::Result;
use crate::state::{Effect, PageNav, Session, SessionEvent};
use crate::tui::search::SearchState;
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Messages from background fetch threads
pub enum BgMessage {
    FetchComplete { seq: u64, records: Vec<BookRecord> },
    FetchFailed { seq: u64 },
}

pub struct App {
    pub session: Session,
    pub search: SearchState,

    client: Arc<CatalogClient>,
    bg_receiver: Receiver<BgMessage>,
    bg_sender: Sender<BgMessage>,

    pub should_quit: bool,
}

impl App {
    pub fn new(client: CatalogClient, initial_query: &str) -> Self {
        let (tx, rx) = channel();
        let mut app = Self {
            session: Session::new(),
            search: SearchState::default(),
            client: Arc::new(client),
            bg_receiver: rx,
            bg_sender: tx,
            should_quit: false,
        };

        // Populate the grid immediately so it is never empty at launch.
        app.dispatch(SessionEvent::QueryCommitted(initial_query.to_string()));
        app
    }

    pub fn run(&mut self, terminal: &mut Terminal<impl Backend<Error = std::io::Error>>) -> Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.process_messages();
                if let Some(term) = self.search.poll_commit(Instant::now()) {
                    self.dispatch(SessionEvent::QueryCommitted(term));
                }
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Apply an event to the session and execute any resulting effect.
    fn dispatch(&mut self, event: SessionEvent) {
        if let Some(Effect::Fetch { seq, query }) = self.session.apply(event) {
            self.spawn_fetch(seq, query);
        }
    }

    /// One fetch per committed query. The request is never aborted; stale
    /// completions are discarded by sequence number when they arrive.
    fn spawn_fetch(&self, seq: u64, query: String) {
        let client = Arc::clone(&self.client);
        let tx = self.bg_sender.clone();

        thread::spawn(move || match client.search(&query) {
            Ok(records) => {
                let _ = tx.send(BgMessage::FetchComplete { seq, records });
            }
            Err(e) => {
                logging::error("FETCH", &format!("query '{}' failed: {}", query, e));
                let _ = tx.send(BgMessage::FetchFailed { seq });
            }
        });
    }

    fn process_messages(&mut self) {
        while let Ok(msg) = self.bg_receiver.try_recv() {
            match msg {
                BgMessage::FetchComplete { seq, records } => {
                    self.dispatch(SessionEvent::FetchSucceeded { seq, records });
                }
                BgMessage::FetchFailed { seq } => {
                    self.dispatch(SessionEvent::FetchFailed { seq });
                }
            }
        }
    }

    fn open_selected(&self) {
        if let Some(book) = self.session.selected_book() {
            if book.has_info_link() {
                logging::info("OPEN", &format!("opening {}", book.info_link));
                if let Err(e) = open::that(&book.info_link) {
                    logging::error("OPEN", &format!("failed to open {}: {}", book.info_link, e));
                }
            }
        }
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global keys
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Esc => {
                if self.search.focused && !self.search.query.is_empty() {
                    self.search.clear(Instant::now());
                } else if self.search.focused {
                    self.search.focused = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            _ => {}
        }

        if self.search.focused {
            self.handle_search_key(key);
        } else {
            self.handle_grid_key(key);
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let now = Instant::now();
        match key.code {
            KeyCode::Char(c) => self.search.insert_char(c, now),
            KeyCode::Backspace => self.search.backspace(now),
            KeyCode::Delete => self.search.delete(now),
            KeyCode::Left => self.search.cursor_left(),
            KeyCode::Right => self.search.cursor_right(),
            KeyCode::Home => self.search.cursor_home(),
            KeyCode::End => self.search.cursor_end(),
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
                self.search.focused = false;
            }
            _ => {}
        }
    }

    fn handle_grid_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('p') => {
                self.dispatch(SessionEvent::PageChanged(PageNav::Previous));
            }
            KeyCode::Right | KeyCode::Char('n') => {
                self.dispatch(SessionEvent::PageChanged(PageNav::Next));
            }
            KeyCode::Char(c @ '1'..='9') => {
                let page = c.to_digit(10).unwrap_or(1) as usize;
                self.dispatch(SessionEvent::PageChanged(PageNav::Jump(page)));
            }
            KeyCode::Down | KeyCode::Char('j') => self.session.select_next_card(),
            KeyCode::Up | KeyCode::Char('k') => self.session.select_prev_card(),
            KeyCode::Enter => self.open_selected(),

            KeyCode::Tab | KeyCode::Char('/') => {
                self.search.focused = true;
            }

            // Any other printable char focuses search and types it
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.focused = true;
                self.search.cursor_end();
                self.search.insert_char(c, Instant::now());
            }

            _ => {}
        }
    }
}
