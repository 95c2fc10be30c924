use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage};
use super::layout::AppLayout;
use crate::models::HistoryEntry;
use crate::presentation::{entry_meta, format_time_ago, item_count_label};
use crate::utils::{single_line, strip_ansi_codes};

const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const ERROR: Color = Color::Rgb(239, 68, 68);
const BAR_BG: Color = Color::Rgb(24, 24, 27);

/// Values drawn outside the entry list
pub struct RenderState<'a> {
    pub search_query: &'a str,
    pub total_count: usize,
    pub max_items: usize,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(
    frame: &mut Frame,
    entries: &[&HistoryEntry],
    selected_idx: usize,
    state: &RenderState,
) {
    let layout = AppLayout::new(frame.area());

    render_search(frame, layout.search_area, state.search_query);
    render_results_list(frame, layout.results_area, entries, selected_idx, state.total_count);
    render_preview(frame, layout.preview_area, entries.get(selected_idx).copied());
    render_status_bar(frame, layout.status_area, entries.len(), selected_idx, state);
}

fn render_search(frame: &mut Frame, area: Rect, search_query: &str) {
    let line = Line::from(vec![
        Span::styled(" Search: ", Style::default().fg(MUTED)),
        Span::styled(strip_ansi_codes(search_query), Style::default().fg(BRIGHT)),
        Span::styled("▏", Style::default().fg(ACCENT)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_results_list(
    frame: &mut Frame,
    area: Rect,
    entries: &[&HistoryEntry],
    selected_idx: usize,
    total_count: usize,
) {
    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let (text_style, meta_style) = if idx == selected_idx {
                let selected = Style::default().fg(BRIGHT).bg(ACCENT);
                (selected.add_modifier(Modifier::BOLD), selected)
            } else {
                (Style::default().fg(BRIGHT), Style::default().fg(MUTED))
            };

            ListItem::new(Text::from(vec![
                Line::styled(single_line(&entry.preview), text_style),
                Line::styled(entry_meta(entry), meta_style),
            ]))
        })
        .collect();

    let title = format!(" History · {} ", item_count_label(total_count));
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED))
            .title(title),
    );

    // Keep the selection scrolled into view
    let mut list_state = ListState::default();
    if !entries.is_empty() {
        list_state.select(Some(selected_idx.min(entries.len() - 1)));
    }

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_preview(frame: &mut Frame, area: Rect, entry: Option<&HistoryEntry>) {
    let content = if let Some(entry) = entry {
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Copied: ", Style::default().fg(MUTED)),
                Span::raw(format_time_ago(&entry.timestamp)),
                Span::styled(
                    format!(" ({})", entry.timestamp.format("%Y-%m-%d %H:%M:%S")),
                    Style::default().fg(MUTED),
                ),
            ]),
            Line::from(vec![
                Span::styled("Length: ", Style::default().fg(MUTED)),
                Span::raw(format!("{} chars", entry.char_count())),
            ]),
            Line::from(vec![
                Span::styled("Id: ", Style::default().fg(MUTED)),
                Span::raw(entry.id.clone()),
            ]),
            Line::from(""),
        ];

        for line in strip_ansi_codes(&entry.text).lines() {
            lines.push(Line::from(line.to_string()));
        }

        Text::from(lines)
    } else {
        Text::from("Nothing copied yet")
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MUTED))
                .title(" Preview "),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    matched_count: usize,
    selected_idx: usize,
    state: &RenderState,
) {
    let (status_text, style) = if let Some(message) = state.status_message {
        let fg = match message.message_type {
            MessageType::Success => ACCENT,
            MessageType::Error => ERROR,
        };
        (format!(" {} ", message.text), Style::default().fg(fg).bg(BAR_BG))
    } else if matched_count == 0 {
        let text = if state.total_count == 0 {
            " Nothing copied yet | Ctrl+C: quit "
        } else {
            " No matches | Esc: clear search | Ctrl+C: quit "
        };
        (text.to_string(), Style::default().fg(BRIGHT).bg(BAR_BG))
    } else {
        let mut parts = vec![];

        if matched_count < state.total_count {
            parts.push(format!("{}/{} matching", matched_count, state.total_count));
        } else {
            parts.push(format!("{}/{} max", state.total_count, state.max_items));
        }
        parts.push(format!("entry {}/{}", selected_idx + 1, matched_count));

        parts.push("Enter: copy".to_string());
        parts.push("Ctrl+D: delete".to_string());
        parts.push("Ctrl+X: clear all".to_string());
        if !state.search_query.is_empty() {
            parts.push("Esc: clear search".to_string());
        }
        parts.push("Ctrl+C: quit".to_string());

        (format!(" {} ", parts.join(" | ")), Style::default().fg(BRIGHT).bg(BAR_BG))
    };

    frame.render_widget(Paragraph::new(status_text).style(style), area);
}
