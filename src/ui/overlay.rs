use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::layout::centered_rect;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptView {
    pub input: String,
    pub cursor: usize,
}

pub fn draw_prompt_overlay(frame: &mut Frame<'_>, area: Rect, view: &PromptView) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let popup = centered_rect(area, area.width.min(72), 4);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Choose a file ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if inner.width == 0 || inner.height < 2 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let input_line = build_prompt_input_line(&view.input, view.cursor, rows[0].width as usize);
    frame.render_widget(Paragraph::new(input_line), rows[0]);
    frame.render_widget(
        Paragraph::new("Enter upload | Esc cancel").style(Style::default().fg(Color::DarkGray)),
        rows[1],
    );
}

/// Renders the path with a software caret, scrolled so the caret stays
/// visible. `cursor` is a char index; columns are measured by display width.
fn build_prompt_input_line(input: &str, cursor: usize, width: usize) -> Line<'static> {
    const PREFIX: &str = " > ";
    let budget = width.saturating_sub(PREFIX.width()).max(1);

    let chars: Vec<char> = input.chars().collect();
    let cursor = cursor.min(chars.len());
    let cell_width = |ch: char| ch.width().unwrap_or(0).max(1);

    let mut used = chars.get(cursor).map_or(1, |ch| cell_width(*ch));
    let mut start = cursor;
    while start > 0 && used + cell_width(chars[start - 1]) <= budget {
        start -= 1;
        used += cell_width(chars[start]);
    }
    let mut end = (cursor + 1).min(chars.len());
    while end < chars.len() && used + cell_width(chars[end]) <= budget {
        used += cell_width(chars[end]);
        end += 1;
    }

    let mut spans = vec![Span::styled(PREFIX, Style::default().fg(Color::White))];
    spans.extend((start..end).map(|idx| {
        let span = Span::raw(chars[idx].to_string());
        if idx == cursor { span.reversed() } else { span }
    }));
    if cursor == chars.len() {
        spans.push(Span::raw(" ").reversed());
    }
    if used < budget {
        spans.push(Span::raw(" ".repeat(budget - used)));
    }
    Line::from(spans)
}
