//! Drawing
//!
//! Draws a core [`View`] into a ratatui frame. The view already holds
//! every string to show; this module only picks widgets, colors and the
//! cursor position.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use sarufi_chat_core::{BotListItem, Footer, RenderedEntry, Speaker, View};

use crate::theme;

/// Key hints for the current view
#[must_use]
pub fn hints(view: &View) -> &'static str {
    match view {
        View::Empty => "",
        View::Error(_) | View::Authenticating { .. } => "esc quit",
        View::BotList { loading: true, .. } => "loading bot… • esc quit",
        View::BotList {
            filter: Some(_), ..
        } => "type to filter • enter chat • esc quit",
        View::BotList { .. } => "↑/↓ navigate • / filter • enter chat • esc quit",
        View::Conversation {
            footer: Footer::Waiting { .. },
            ..
        } => "waiting for reply • esc quit",
        View::Conversation { .. } => "enter send • ctrl+b bots • esc quit",
    }
}

/// Draw one frame
pub fn draw(frame: &mut Frame, view: &View) {
    let [body, footer] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    match view {
        View::Empty => return,
        View::Error(message) => {
            let paragraph = Paragraph::new(message.as_str())
                .style(Style::default().fg(theme::ERROR_RED))
                .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, body);
        }
        View::Authenticating { spinner } => {
            let line = Line::from(vec![
                Span::styled(*spinner, theme::spinner()),
                Span::raw(" Authenticating"),
            ]);
            frame.render_widget(Paragraph::new(line), body);
        }
        View::BotList {
            title,
            items,
            filter,
            selected,
            loading,
        } => draw_bot_list(
            frame,
            body,
            title,
            items,
            filter.as_deref(),
            *selected,
            *loading,
        ),
        View::Conversation {
            header,
            entries,
            footer,
        } => draw_conversation(frame, body, header, entries, footer),
    }

    frame.render_widget(Paragraph::new(hints(view)).style(theme::dim()), footer);
}

fn draw_bot_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: &[BotListItem],
    filter: Option<&str>,
    selected: Option<usize>,
    loading: bool,
) {
    let rows: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let mut lines = vec![Line::from(item.title.as_str())];
            if !item.description.is_empty() {
                lines.push(Line::styled(item.description.as_str(), theme::dim()));
            }
            ListItem::new(lines)
        })
        .collect();

    let mut block_title = vec![Span::styled(title, theme::title())];
    if let Some(filter) = filter {
        block_title.push(Span::raw(format!("  Filter: {filter}")));
    }
    if loading {
        block_title.push(Span::styled(" (loading…)", theme::dim()));
    }

    let list = List::new(rows)
        .block(Block::default().title(Line::from(block_title)))
        .highlight_style(theme::highlight())
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_conversation(
    frame: &mut Frame,
    area: Rect,
    header: &str,
    entries: &[RenderedEntry],
    footer: &Footer,
) {
    let mut lines = vec![Line::styled(header, theme::title())];
    for entry in entries {
        let style = match entry.speaker {
            Speaker::You => Style::default().fg(theme::USER_GREEN),
            Speaker::Bot => Style::default(),
        };
        lines.extend(entry.text.lines().map(|l| Line::styled(l.to_string(), style)));
    }
    lines.push(Line::default());
    lines.push(Line::default());

    let width = area.width.max(1);
    let rows = |line: &Line| to_u16(line.width()).div_ceil(width).max(1);
    let body_rows = lines.iter().fold(0u16, |acc, line| acc.saturating_add(rows(line)));

    let mut cursor_x = None;
    let footer_line = match footer {
        Footer::Input {
            value,
            placeholder,
            cursor,
        } => {
            let before: String = value.chars().take(*cursor).collect();
            cursor_x = Some(2 + to_u16(before.width()));
            if value.is_empty() {
                Line::from(vec![
                    Span::raw("> "),
                    Span::styled(placeholder.as_str(), theme::dim().add_modifier(Modifier::ITALIC)),
                ])
            } else {
                Line::from(format!("> {value}"))
            }
        }
        Footer::Waiting { spinner } => Line::from(Span::styled(*spinner, theme::spinner())),
    };
    let total = body_rows.saturating_add(rows(&footer_line));
    lines.push(footer_line);

    // Keep the newest rows in view; overlong words wrap onto extra rows
    let scroll = total.saturating_sub(area.height);
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);

    if let Some(x) = cursor_x {
        let row = body_rows.saturating_add(x / width);
        if let Some(row) = row.checked_sub(scroll).filter(|row| *row < area.height) {
            frame.set_cursor_position((area.x + x % width, area.y + row));
        }
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
