//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::{App, DraftField, FilterField, Mode};
use crate::catalog::Track;
use crate::config::UiSettings;
use crate::query::{DerivedView, GroupKey};

/// Key hints: (key, description, needs the mutate capability).
const CONTROLS: &[(&str, &str, bool)] = &[
    ("j/k", "up/down", false),
    ("gg/G", "top/bottom", false),
    ("/", "search", false),
    ("a/b", "artist/album filter", false),
    ("c", "clear filters", false),
    ("s/S", "sort key/direction", false),
    ("v", "group", false),
    ("K", "details", false),
    ("o", "add", true),
    ("dd", "delete", true),
    ("R", "reset", true),
    ("q", "quit", false),
];

/// Render the controls help text for the session's capabilities.
fn controls_text(can_mutate: bool) -> String {
    CONTROLS
        .iter()
        .filter(|(_, _, mutating)| can_mutate || !mutating)
        .map(|(k, v, _)| format!("[{}] {}", k, v))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format seconds as `m:ss`, or `-` when unknown.
fn format_duration(secs: Option<u32>) -> String {
    match secs {
        Some(s) => format!("{}:{:02}", s / 60, s % 60),
        None => "-".to_string(),
    }
}

/// Pad or cut `s` to exactly `width` characters.
fn fit(s: &str, width: usize) -> String {
    let count = s.chars().count();
    if count <= width {
        format!("{s:<width$}")
    } else if width == 0 {
        String::new()
    } else {
        let mut out: String = s.chars().take(width - 1).collect();
        out.push('…');
        out
    }
}

/// Column widths for title, artist and album given the list's inner width.
fn column_widths(inner: usize, show_duration: bool) -> (usize, usize, usize) {
    // year column, duration column and the separating spaces
    let fixed = 5 + if show_duration { 6 } else { 0 } + 3;
    let flexible = inner.saturating_sub(fixed);
    let title = flexible * 2 / 5;
    let artist = flexible * 3 / 10;
    let album = flexible.saturating_sub(title + artist);
    (title, artist, album)
}

fn track_line(track: &Track, inner: usize, show_duration: bool) -> String {
    let (tw, aw, bw) = column_widths(inner, show_duration);
    let year = track
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut line = format!(
        "{} {} {} {:>5}",
        fit(&track.title, tw),
        fit(&track.artist, aw),
        fit(&track.album, bw),
        year
    );
    if show_duration {
        line.push_str(&format!(" {:>5}", format_duration(track.duration_sec)));
    }
    line
}

/// One line of the track list.
enum Row<'a> {
    Header { label: &'a str, count: usize },
    Track(&'a Track),
}

fn rows<'a>(view: &DerivedView<'a>) -> Vec<Row<'a>> {
    match view {
        DerivedView::Flat(tracks) => tracks.iter().map(|&t| Row::Track(t)).collect(),
        DerivedView::Grouped(groups) => {
            let mut rows = Vec::new();
            for g in groups {
                rows.push(Row::Header {
                    label: g.label,
                    count: g.tracks.len(),
                });
                rows.extend(g.tracks.iter().map(|&t| Row::Track(t)));
            }
            rows
        }
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn padded_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

fn status_text(app: &App, shown: usize) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(if app.can_mutate() {
        "ROLE: admin".to_string()
    } else {
        "ROLE: read-only".to_string()
    });
    parts.push(format!(
        "SORT: {} {}",
        app.params.sort_key.label(),
        app.params.direction.label()
    ));
    if app.params.group_by != GroupKey::None {
        parts.push(format!("GROUP: {}", app.params.group_by.label()));
    }
    if app.params.has_filters() {
        parts.push("FILTERED".to_string());
    }
    parts.push(format!("{}/{} tracks", shown, app.tracks().len()));
    if let Some(notice) = &app.notice {
        parts.push(notice.clone());
    }

    parts.join(" • ")
}

fn filter_span<'a>(label: &'a str, value: &'a str, active: bool) -> Span<'a> {
    let text = if active {
        format!("{label}: {value}_")
    } else if value.is_empty() {
        format!("{label}: -")
    } else {
        format!("{label}: {value}")
    };
    if active {
        Span::styled(text, Style::default().add_modifier(Modifier::REVERSED))
    } else {
        Span::raw(text)
    }
}

fn draw_filters(frame: &mut Frame, app: &App, area: Rect) {
    let editing = match app.mode {
        Mode::Filter(f) => Some(f),
        _ => None,
    };
    let line = Line::from(vec![
        filter_span(
            "Search",
            &app.params.search,
            editing == Some(FilterField::Search),
        ),
        Span::raw("   "),
        filter_span(
            "Artist",
            &app.params.artist,
            editing == Some(FilterField::Artist),
        ),
        Span::raw("   "),
        filter_span(
            "Album",
            &app.params.album,
            editing == Some(FilterField::Album),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).block(padded_block(" filters ")), area);
}

fn draw_tracks(
    frame: &mut Frame,
    app: &App,
    view: &DerivedView<'_>,
    settings: &UiSettings,
    area: Rect,
) {
    let rows = rows(view);
    let inner = area.width.saturating_sub(2 + 2) as usize;

    // Center the selected item when possible; only build ListItems for the
    // visible window.
    let total = rows.len();
    let list_height = area.height.saturating_sub(2) as usize;
    let selected = app.selected.as_deref();
    let sel_pos = rows
        .iter()
        .position(|r| matches!(r, Row::Track(t) if Some(t.id.as_str()) == selected));
    let anchor = sel_pos.unwrap_or(0);
    let start = if total <= list_height || list_height == 0 {
        0
    } else {
        anchor.saturating_sub(list_height / 2).min(total - list_height)
    };
    let end = if list_height == 0 {
        total
    } else {
        (start + list_height).min(total)
    };

    let mut items: Vec<ListItem> = rows[start..end]
        .iter()
        .map(|row| match row {
            Row::Header { label, count } => ListItem::new(format!("{} ({})", label, count)).bold(),
            Row::Track(t) => {
                let line = track_line(t, inner.saturating_sub(2), settings.show_duration);
                ListItem::new(format!("  {}", line))
            }
        })
        .collect();

    if view.is_empty() {
        items.push(ListItem::new("  no tracks match").italic());
    }

    let title = if settings.show_duration {
        " title / artist / album / year / time "
    } else {
        " title / artist / album / year "
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    state.select(sel_pos.map(|p| p - start));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_details(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_sized(64, 9, area);
    frame.render_widget(Clear, popup_area);

    let meta = match app.selected_track() {
        Some(track) => format!(
            "Title: {}\nArtist: {}\nAlbum: {}\nYear: {}\nDuration: {}\nId: {}",
            track.title,
            track.artist,
            track.album,
            track
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "-".to_string()),
            format_duration(track.duration_sec),
            track.id
        ),
        None => "No track selected".to_string(),
    };
    let paragraph = Paragraph::new(meta)
        .block(padded_block(" details (K closes) "))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

fn draw_add_form(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_sized(56, 8, area);
    frame.render_widget(Clear, popup_area);

    let fields = [
        (DraftField::Title, "Title*"),
        (DraftField::Artist, "Artist*"),
        (DraftField::Album, "Album*"),
        (DraftField::Year, "Year"),
    ];
    let lines: Vec<Line> = fields
        .iter()
        .map(|&(field, label)| {
            let value = app.draft.field(field);
            if app.draft.focus == field {
                Line::from(Span::styled(
                    format!("{label:<8} {value}_"),
                    Style::default().add_modifier(Modifier::REVERSED),
                ))
            } else {
                Line::from(format!("{label:<8} {value}"))
            }
        })
        .collect();

    let form =
        Paragraph::new(lines).block(padded_block(" add track (enter saves, esc cancels) "));
    frame.render_widget(form, popup_area);
}

fn draw_confirm_reset(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect_sized(52, 5, area);
    frame.render_widget(Clear, popup_area);
    let text = Paragraph::new(
        "Replace the whole catalog with the default tracks?\n[y] yes  [any other key] no",
    )
    .block(padded_block(" reset "))
    .wrap(Wrap { trim: true });
    frame.render_widget(text, popup_area);
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let view = app.view();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" trackshelf ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_text(app, view.len()))
        .block(padded_block(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    draw_filters(frame, app, chunks[2]);
    draw_tracks(frame, app, &view, ui_settings, chunks[3]);

    match app.mode {
        Mode::AddTrack => draw_add_form(frame, app, chunks[3]),
        Mode::ConfirmReset => draw_confirm_reset(frame, chunks[3]),
        Mode::Browse | Mode::Filter(_) => {
            if app.metadata_window {
                draw_details(frame, app, chunks[3]);
            }
        }
    }

    let footer = Paragraph::new(controls_text(app.can_mutate()))
        .block(padded_block(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}
