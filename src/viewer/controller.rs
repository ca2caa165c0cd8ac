use tracing::{debug, warn};

use crate::document::DocumentRef;

use super::state::{PageCursor, ViewerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlView {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub previous: ControlView,
    pub label: String,
    pub next: ControlView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerView {
    pub title: String,
    /// Absent until the engine reports the page count.
    pub pagination: Option<PaginationView>,
    pub failure: Option<String>,
    /// Page the embedded engine should display (1-based).
    pub requested_page: usize,
}

/// Paginated viewer bound to one document for its whole lifetime.
#[derive(Debug, Clone)]
pub struct ViewerController {
    id: u64,
    document: DocumentRef,
    state: ViewerState,
}

impl ViewerController {
    pub fn new(id: u64, document: DocumentRef) -> Self {
        Self {
            id,
            document,
            state: ViewerState::Unloaded,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn document(&self) -> &DocumentRef {
        &self.document
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn on_document_loaded(&mut self, total_pages: usize) {
        match PageCursor::first(total_pages) {
            Some(cursor) => {
                debug!(viewer = self.id, total_pages, "document loaded");
                self.state = ViewerState::Loaded(cursor);
            }
            None => {
                warn!(viewer = self.id, "engine reported a document without pages");
                self.state = ViewerState::Failed("document has no pages".to_string());
            }
        }
    }

    /// Reconciles with the page the engine reports as visible.
    pub fn on_page_rendered(&mut self, page: usize) {
        let ViewerState::Loaded(cursor) = &mut self.state else {
            return;
        };
        if page == 0 || page > cursor.total() {
            warn!(
                viewer = self.id,
                page,
                total = cursor.total(),
                "engine reported an out-of-range page"
            );
        }
        cursor.set(page);
    }

    pub fn on_document_failed(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(viewer = self.id, %reason, "document failed to load");
        self.state = ViewerState::Failed(reason);
    }

    pub fn previous(&mut self) -> bool {
        match &mut self.state {
            ViewerState::Loaded(cursor) => cursor.step_back(),
            _ => false,
        }
    }

    pub fn next(&mut self) -> bool {
        match &mut self.state {
            ViewerState::Loaded(cursor) => cursor.step_forward(),
            _ => false,
        }
    }

    pub fn first(&mut self) -> bool {
        self.jump(1)
    }

    pub fn last(&mut self) -> bool {
        let Some(total) = self.state.total_pages() else {
            return false;
        };
        self.jump(total)
    }

    fn jump(&mut self, page: usize) -> bool {
        let ViewerState::Loaded(cursor) = &mut self.state else {
            return false;
        };
        let before = cursor.current();
        cursor.set(page);
        before != cursor.current()
    }

    pub fn view(&self) -> ViewerView {
        let title = format!("PDF: {}", self.document.display_name());
        match &self.state {
            ViewerState::Unloaded => ViewerView {
                title,
                pagination: None,
                failure: None,
                requested_page: 1,
            },
            ViewerState::Loaded(cursor) => ViewerView {
                title,
                pagination: Some(PaginationView {
                    previous: ControlView {
                        label: "Previous",
                        enabled: !cursor.is_first(),
                    },
                    label: format!("Page {} / {}", cursor.current(), cursor.total()),
                    next: ControlView {
                        label: "Next",
                        enabled: !cursor.is_last(),
                    },
                }),
                failure: None,
                requested_page: cursor.current(),
            },
            ViewerState::Failed(reason) => ViewerView {
                title,
                pagination: None,
                failure: Some(format!("Failed to load document: {reason}")),
                requested_page: 1,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ViewerController;
    use crate::document::DocumentRef;
    use crate::viewer::ViewerState;

    fn viewer() -> ViewerController {
        ViewerController::new(1, DocumentRef::new("/files/report.pdf", "report.pdf"))
    }

    #[test]
    fn unloaded_viewer_renders_without_pagination() {
        let viewer = viewer();
        let view = viewer.view();
        assert_eq!(view.title, "PDF: report.pdf");
        assert!(view.pagination.is_none());
        assert!(view.failure.is_none());
        assert_eq!(view.requested_page, 1);
    }

    #[test]
    fn navigation_before_load_is_ignored() {
        let mut viewer = viewer();
        assert!(!viewer.next());
        assert!(!viewer.previous());
        viewer.on_page_rendered(3);
        assert_eq!(viewer.state(), &ViewerState::Unloaded);
    }

    #[test]
    fn document_loaded_starts_on_first_page_with_previous_disabled() {
        for total in [1, 2, 7, 250] {
            let mut viewer = viewer();
            viewer.on_document_loaded(total);
            assert_eq!(viewer.state().current_page(), Some(1));
            assert_eq!(viewer.state().total_pages(), Some(total));
            let pagination = viewer.view().pagination.expect("pagination after load");
            assert!(!pagination.previous.enabled);
        }
    }

    #[test]
    fn two_steps_forward_through_five_pages() {
        let mut viewer = viewer();
        viewer.on_document_loaded(5);
        assert!(viewer.next());
        assert!(viewer.next());

        assert_eq!(viewer.state().current_page(), Some(3));
        let pagination = viewer.view().pagination.expect("pagination after load");
        assert_eq!(pagination.label, "Page 3 / 5");
        assert!(pagination.previous.enabled);
        assert!(pagination.next.enabled);
    }

    #[test]
    fn single_page_document_disables_both_controls() {
        let mut viewer = viewer();
        viewer.on_document_loaded(1);
        let pagination = viewer.view().pagination.expect("pagination after load");
        assert_eq!(pagination.label, "Page 1 / 1");
        assert!(!pagination.previous.enabled);
        assert!(!pagination.next.enabled);
    }

    #[test]
    fn next_on_last_page_and_previous_on_first_page_are_noops() {
        let mut viewer = viewer();
        viewer.on_document_loaded(2);
        assert!(!viewer.previous());
        assert_eq!(viewer.state().current_page(), Some(1));

        assert!(viewer.next());
        let before = viewer.state().clone();
        assert!(!viewer.next());
        assert_eq!(viewer.state(), &before);
        assert!(!viewer.view().pagination.expect("loaded").next.enabled);
    }

    #[test]
    fn arbitrary_navigation_stays_within_bounds() {
        let mut viewer = viewer();
        viewer.on_document_loaded(4);
        // Deterministic pseudo-random walk biased to hit both edges.
        let mut seed = 0x2545_f491_u32;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            if seed % 3 == 0 {
                viewer.previous();
            } else {
                viewer.next();
            }
            let page = viewer.state().current_page().expect("loaded");
            assert!((1..=4).contains(&page), "page {page} escaped bounds");
        }
    }

    #[test]
    fn page_rendered_is_idempotent_and_clamped() {
        let mut viewer = viewer();
        viewer.on_document_loaded(6);

        viewer.on_page_rendered(4);
        let once = viewer.state().clone();
        viewer.on_page_rendered(4);
        assert_eq!(viewer.state(), &once);
        assert_eq!(once.current_page(), Some(4));

        viewer.on_page_rendered(42);
        assert_eq!(viewer.state().current_page(), Some(6));
    }

    #[test]
    fn zero_page_document_fails_instead_of_loading() {
        let mut viewer = viewer();
        viewer.on_document_loaded(0);
        assert!(matches!(viewer.state(), ViewerState::Failed(_)));
        let view = viewer.view();
        assert!(view.pagination.is_none());
        assert_eq!(
            view.failure.as_deref(),
            Some("Failed to load document: document has no pages")
        );
    }

    #[test]
    fn first_and_last_jump_to_edges() {
        let mut viewer = viewer();
        viewer.on_document_loaded(9);
        assert!(viewer.last());
        assert_eq!(viewer.state().current_page(), Some(9));
        assert!(!viewer.last());
        assert!(viewer.first());
        assert_eq!(viewer.state().current_page(), Some(1));
    }
}
