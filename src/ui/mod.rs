mod chrome;
mod layout;
mod overlay;
mod upload;
mod viewer;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

use crate::upload::{DocumentSlot, UploadView};
use crate::viewer::ViewerView;

pub use chrome::{BANNER_PREFIX, BannerView, StatusLine, draw_banner, draw_status};
pub use layout::{DocumentLayout, UiLayout, split_document, split_layout};
pub use overlay::{PromptView, draw_prompt_overlay};
pub use upload::{DOCUMENTS_UNAVAILABLE, LOADING_LATEST_PDF, NO_DOCUMENT, draw_drop_zone};
pub use viewer::draw_viewer;

/// Everything one frame shows, derived from application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenView {
    pub banner: BannerView,
    pub upload: UploadView,
    pub viewer: Option<ViewerView>,
    pub status: StatusLine,
    pub prompt: Option<PromptView>,
}

/// Draws the screen and returns the area reserved for the page image, if a
/// loaded document is displayed.
pub fn draw_screen(frame: &mut Frame<'_>, view: &ScreenView) -> Option<Rect> {
    let drop_zone = match &view.upload {
        UploadView::Ready { drop_zone, .. } => drop_zone.as_ref(),
        UploadView::Loading => None,
    };
    let layout = split_layout(frame.area(), drop_zone.is_some());

    draw_banner(frame, layout.banner, &view.banner);
    if let (Some(zone), Some(area)) = (drop_zone, layout.drop_zone) {
        draw_drop_zone(frame, area, zone);
    }

    let page_area = match &view.upload {
        UploadView::Loading => {
            upload::draw_placeholder(frame, layout.document, LOADING_LATEST_PDF, Style::default());
            None
        }
        UploadView::Ready {
            document: DocumentSlot::Document(_),
            ..
        } => view
            .viewer
            .as_ref()
            .and_then(|viewer| draw_viewer(frame, layout.document, viewer)),
        UploadView::Ready {
            document: DocumentSlot::NoDocument,
            ..
        } => {
            upload::draw_placeholder(
                frame,
                layout.document,
                NO_DOCUMENT,
                Style::default().fg(Color::DarkGray),
            );
            None
        }
        UploadView::Ready {
            document: DocumentSlot::Unavailable(error),
            ..
        } => {
            upload::draw_documents_unavailable(frame, layout.document, error);
            None
        }
    };

    draw_status(frame, layout.status, &view.status);
    page_area
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::{BannerView, LOADING_LATEST_PDF, NO_DOCUMENT, ScreenView, StatusLine, draw_screen};
    use crate::document::DocumentRef;
    use crate::upload::{DROP_LABEL_IDLE, DocumentSlot, DropZoneView, UploadView};
    use crate::viewer::ViewerController;

    fn status() -> StatusLine {
        StatusLine {
            environment: "test".to_string(),
            counter: 3,
            action: Some("refetch"),
            message: "refetching".to_string(),
            presenter: "ratatui-image/halfblocks".to_string(),
        }
    }

    fn render(view: &ScreenView) -> (String, Option<ratatui::layout::Rect>) {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).expect("test terminal");
        let mut page_area = None;
        terminal
            .draw(|frame| page_area = draw_screen(frame, view))
            .expect("draw should pass");
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        (text, page_area)
    }

    #[test]
    fn loading_screen_shows_only_loading_placeholder() {
        let (text, page) = render(&ScreenView {
            banner: BannerView::Loading,
            upload: UploadView::Loading,
            viewer: None,
            status: status(),
            prompt: None,
        });
        assert!(text.contains(LOADING_LATEST_PDF));
        assert!(!text.contains(DROP_LABEL_IDLE));
        assert!(text.contains("counter 3"));
        assert_eq!(page, None);
    }

    #[test]
    fn empty_slot_shows_drop_zone_and_no_document() {
        let (text, page) = render(&ScreenView {
            banner: BannerView::Message("hi".to_string()),
            upload: UploadView::Ready {
                drop_zone: Some(DropZoneView {
                    label: DROP_LABEL_IDLE,
                    uploading: false,
                    error: None,
                }),
                document: DocumentSlot::NoDocument,
            },
            viewer: None,
            status: status(),
            prompt: None,
        });
        assert!(text.contains("Message from GraphQL server: hi"));
        assert!(text.contains(DROP_LABEL_IDLE));
        assert!(text.contains(NO_DOCUMENT));
        assert_eq!(page, None);
    }

    #[test]
    fn loaded_viewer_reserves_page_area() {
        let doc = DocumentRef::new("/files/a.pdf", "a.pdf");
        let mut viewer = ViewerController::new(2, doc.clone());
        viewer.on_document_loaded(2);
        let (text, page) = render(&ScreenView {
            banner: BannerView::Loading,
            upload: UploadView::Ready {
                drop_zone: None,
                document: DocumentSlot::Document(doc),
            },
            viewer: Some(viewer.view()),
            status: status(),
            prompt: None,
        });
        assert!(text.contains("PDF: a.pdf"));
        assert!(text.contains("Page 1 / 2"));
        let page = page.expect("page area");
        assert!(page.height > 0);
    }
}
