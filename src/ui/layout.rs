use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows taken by the drop zone block: borders, label and error line.
pub const DROP_ZONE_HEIGHT: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    pub banner: Rect,
    pub drop_zone: Option<Rect>,
    pub document: Rect,
    pub status: Rect,
}

pub fn split_layout(area: Rect, drop_zone_visible: bool) -> UiLayout {
    let drop_zone_height = if drop_zone_visible { DROP_ZONE_HEIGHT } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(drop_zone_height),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    UiLayout {
        banner: chunks[0],
        drop_zone: drop_zone_visible.then_some(chunks[1]),
        document: chunks[2],
        status: chunks[3],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentLayout {
    pub title: Rect,
    pub page: Rect,
    pub pagination: Option<Rect>,
}

pub fn split_document(area: Rect, with_pagination: bool) -> DocumentLayout {
    let pagination_height = if with_pagination { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(pagination_height),
        ])
        .split(area);

    DocumentLayout {
        title: chunks[0],
        page: chunks[1],
        pagination: with_pagination.then_some(chunks[2]),
    }
}

pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.max(1).min(area.width);
    let height = height.max(1).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::{DROP_ZONE_HEIGHT, split_document, split_layout};

    #[test]
    fn split_layout_reserves_banner_and_status_rows() {
        let layout = split_layout(Rect::new(0, 0, 120, 40), true);
        assert_eq!(layout.banner.height, 1);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.drop_zone.map(|r| r.height), Some(DROP_ZONE_HEIGHT));
        assert_eq!(layout.document.height, 40 - 2 - DROP_ZONE_HEIGHT);
    }

    #[test]
    fn hidden_drop_zone_gives_rows_to_document() {
        let layout = split_layout(Rect::new(0, 0, 120, 40), false);
        assert_eq!(layout.drop_zone, None);
        assert_eq!(layout.document.height, 38);
    }

    #[test]
    fn split_document_places_pagination_below_page() {
        let doc = split_document(Rect::new(0, 1, 80, 20), true);
        assert_eq!(doc.title.height, 1);
        let pagination = doc.pagination.expect("pagination row");
        assert_eq!(pagination.y, 20);
        assert_eq!(doc.page.height, 18);

        assert_eq!(split_document(Rect::new(0, 1, 80, 20), false).pagination, None);
    }

    #[test]
    fn centered_rect_stays_within_area() {
        let area = Rect::new(10, 5, 20, 8);
        let centered = super::centered_rect(area, 99, 99);
        assert_eq!(centered, area);
    }
}
