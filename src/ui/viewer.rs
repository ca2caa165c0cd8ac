use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::viewer::{ControlView, PaginationView, ViewerView};

use super::layout::split_document;
use super::upload::draw_placeholder;

/// Draws the viewer chrome and returns the area left for the page image.
pub fn draw_viewer(frame: &mut Frame<'_>, area: Rect, view: &ViewerView) -> Option<Rect> {
    let layout = split_document(area, view.pagination.is_some());
    frame.render_widget(
        Paragraph::new(view.title.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
        layout.title,
    );

    if let (Some(pagination), Some(row)) = (&view.pagination, layout.pagination) {
        frame.render_widget(
            Paragraph::new(pagination_line(pagination)).alignment(Alignment::Center),
            row,
        );
    }

    if let Some(failure) = &view.failure {
        draw_placeholder(frame, layout.page, failure, Style::default().fg(Color::Red));
        return None;
    }
    Some(layout.page)
}

pub(crate) fn pagination_line(view: &PaginationView) -> Line<'static> {
    Line::from(vec![
        control_span(&view.previous, "< "),
        Span::raw(format!("  {}  ", view.label)),
        control_span(&view.next, " >"),
    ])
}

fn control_span(control: &ControlView, arrow: &str) -> Span<'static> {
    let text = if arrow.starts_with('<') {
        format!("[{arrow}{}]", control.label)
    } else {
        format!("[{}{arrow}]", control.label)
    };
    let style = if control.enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    };
    Span::styled(text, style)
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::pagination_line;
    use crate::document::DocumentRef;
    use crate::viewer::ViewerController;

    #[test]
    fn first_page_renders_disabled_previous_control() {
        let mut viewer = ViewerController::new(1, DocumentRef::new("/files/a.pdf", "a.pdf"));
        viewer.on_document_loaded(4);
        let view = viewer.view();
        let line = pagination_line(view.pagination.as_ref().expect("loaded viewer paginates"));

        assert_eq!(line.spans[0].content.as_ref(), "[< Previous]");
        assert_eq!(line.spans[0].style.fg, Some(Color::DarkGray));
        assert_eq!(line.spans[1].content.as_ref(), "  Page 1 / 4  ");
        assert_eq!(line.spans[2].content.as_ref(), "[Next >]");
        assert_eq!(line.spans[2].style.fg, Some(Color::Cyan));
    }
}
