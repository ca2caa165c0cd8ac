use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::upload::DropZoneView;

pub const LOADING_LATEST_PDF: &str = "Loading Latest PDF...";
pub const NO_DOCUMENT: &str = "No document";
pub const DOCUMENTS_UNAVAILABLE: &str = "Failed to load documents";

pub fn draw_drop_zone(frame: &mut Frame<'_>, area: Rect, view: &DropZoneView) {
    let border_style = if view.uploading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(" upload ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::styled(
        view.label,
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(error) = &view.error {
        lines.push(Line::styled(
            format!("{error} (drop again to retry)"),
            Style::default().fg(Color::Red),
        ));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

/// Centered one-line message for the document area.
pub fn draw_placeholder(frame: &mut Frame<'_>, area: Rect, text: &str, style: Style) {
    if area.height == 0 {
        return;
    }
    let row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
    frame.render_widget(
        Paragraph::new(text.to_string())
            .style(style)
            .alignment(Alignment::Center),
        row,
    );
}

pub fn draw_documents_unavailable(frame: &mut Frame<'_>, area: Rect, error: &str) {
    draw_placeholder(
        frame,
        area,
        &format!("{DOCUMENTS_UNAVAILABLE}: {error} (press r to retry)"),
        Style::default().fg(Color::Red),
    );
}
