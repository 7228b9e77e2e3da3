use crate::catalog::{BookRecord, CardRecord};
use crate::state::FetchPhase;
use crate::tui::app::App;
use crate::tui::colors;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(8),    // Card grid
            Constraint::Length(1), // Pagination bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_search_bar(frame, app, chunks[0]);

    match app.session.phase {
        FetchPhase::Idle | FetchPhase::Loading => draw_skeleton(frame, chunks[1]),
        FetchPhase::AllPlaceholder => draw_no_results(frame, chunks[1]),
        FetchPhase::Populated => draw_card_grid(frame, app, chunks[1]),
    }

    if app.session.phase == FetchPhase::Populated {
        draw_pagination_bar(frame, app, chunks[2]);
    }

    draw_status_bar(frame, app, chunks[3]);

    // Show cursor in search bar when focused
    if app.search.focused {
        // Border (1) + space (1) + magnifier glyph and space (approx 3 cols)
        let cursor_x = chunks[0].x + 1 + 4 + app.search.cursor_pos as u16;
        let cursor_y = chunks[0].y + 1;
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.search.focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Discover your next read ");

    let search_text = format!(" \u{1F50D} {}", app.search.query);
    let paragraph = Paragraph::new(search_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

/// Six dim skeleton cards while a fetch is outstanding.
fn draw_skeleton(frame: &mut Frame, area: Rect) {
    for cell in grid_cells(area) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(45, 45, 55)));
        frame.render_widget(block, cell);
    }
}

fn draw_no_results(frame: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Percentage(45),
        ])
        .split(area);

    let message = Paragraph::new("No Book found matching your search")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan));
    frame.render_widget(message, rows[1]);
}

fn draw_card_grid(frame: &mut Frame, app: &App, area: Rect) {
    let cells = grid_cells(area);
    let visible = app.session.visible_records();

    for (i, cell) in cells.into_iter().enumerate() {
        match visible.get(i) {
            Some(CardRecord::Book(book)) => {
                let selected = i == app.session.selected_card;
                draw_book_card(frame, book, selected, cell);
            }
            Some(CardRecord::Placeholder { .. }) => draw_placeholder_card(frame, cell),
            None => {}
        }
    }
}

/// Split the grid area into 2 rows x 3 columns of card cells.
fn grid_cells(area: Rect) -> Vec<Rect> {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mut cells = Vec::with_capacity(6);
    for row in rows.iter() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ])
            .split(*row);
        cells.extend(cols.iter().copied());
    }
    cells
}

fn draw_book_card(frame: &mut Frame, book: &BookRecord, selected: bool, area: Rect) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Rgb(70, 70, 85))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Cover art strip: the thumbnail cannot be shown in a terminal, so a
    // present URL renders as a cover marker and a missing one renders the
    // generated initials placeholder.
    let art_line = if book.image_url.is_empty() {
        Line::from(Span::styled(
            book.cover_initials(),
            Style::default()
                .fg(Color::Rgb(74, 85, 104))
                .bg(Color::Rgb(45, 55, 72))
                .add_modifier(Modifier::BOLD),
        ))
        .centered()
    } else {
        Line::from(Span::styled(
            "\u{25A3} cover art",
            Style::default().fg(Color::DarkGray),
        ))
        .centered()
    };

    let stars = format!(
        "{}{}",
        colors::STAR_FILLED.repeat(book.star_count()),
        colors::STAR_EMPTY.repeat(5 - book.star_count()),
    );

    let mut tag_spans: Vec<Span> = Vec::new();
    for (i, tag) in book.category_tags().into_iter().enumerate() {
        if i > 0 {
            tag_spans.push(Span::raw(" "));
        }
        tag_spans.push(Span::styled(
            format!(" {} ", tag),
            Style::default()
                .fg(colors::tag_color(i))
                .bg(Color::Rgb(40, 40, 50)),
        ));
    }

    let lines = vec![
        art_line,
        Line::from(Span::styled(
            colors::format_label(&book.print_type).to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::DIM),
        ))
        .centered(),
        Line::from(Span::styled(
            book.title.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            book.authors.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(vec![
            Span::styled(stars, Style::default().fg(Color::Yellow)),
            Span::raw(" "),
            Span::styled(
                book.rating_display(),
                Style::default().fg(colors::rating_color(book.rating)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Pages: ", Style::default().fg(Color::Gray)),
            Span::styled(book.page_count_display(), Style::default().fg(Color::Cyan)),
            Span::styled("  Ratings: ", Style::default().fg(Color::Gray)),
            Span::styled(
                book.ratings_count.to_string(),
                Style::default().fg(Color::LightBlue),
            ),
        ]),
        Line::from(tag_spans),
    ];

    let card = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(card, inner);
}

/// Degenerate padding card: dashed-looking border, no data.
fn draw_placeholder_card(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(60, 60, 70)));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Percentage(45),
        ])
        .split(inner);

    let label = Paragraph::new("No Book")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(label, rows[1]);
}

fn draw_pagination_bar(frame: &mut Frame, app: &App, area: Rect) {
    let pager = &app.session.pager;

    let control_style = |disabled: bool| {
        if disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan)
        }
    };

    let mut spans = vec![Span::styled(" [Previous] ", control_style(pager.at_first()))];

    for page in 1..=pager.total_pages() {
        let style = if page == pager.current_page {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(format!(" {} ", page), style));
    }

    spans.push(Span::styled(" [Next] ", control_style(pager.at_last())));

    let bar = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(bar, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = match app.session.phase {
        FetchPhase::Idle | FetchPhase::Loading => {
            format!(" \u{23F3} Searching '{}'...", app.session.committed_query)
        }
        FetchPhase::AllPlaceholder => {
            format!(" No results for '{}'", app.session.committed_query)
        }
        FetchPhase::Populated => {
            let real = app
                .session
                .records
                .iter()
                .filter(|r| !r.is_placeholder())
                .count();
            format!(
                " {} books | page {}/{} | '{}'",
                real,
                app.session.pager.current_page,
                app.session.pager.total_pages(),
                app.session.committed_query
            )
        }
    };

    let right_text =
        " Tab:Search  \u{2190}\u{2192}:Page  1-9:Jump  \u{2191}\u{2193}:Card  Enter:Open  Ctrl+Q:Quit ";

    let available_width = area.width as usize;
    let left_len = left_text.chars().count();
    let right_len = right_text.chars().count();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", right_text, padding = padding)
    } else {
        format!("{:width$}", left_text, width = available_width)
    };

    let status = Paragraph::new(status_str)
        .style(Style::default().fg(Color::White).bg(Color::Rgb(0, 95, 135)));

    frame.render_widget(status, area);
}
