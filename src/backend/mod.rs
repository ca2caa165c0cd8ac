use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::{AppError, AppResult};

mod hayro;
mod source;
mod traits;

pub use hayro::{PDF_HEADER, PdfDoc};
pub use source::{DocumentSource, HttpDocumentSource, ResolvedAddress, resolve_address};
pub use traits::{DocumentEngine, RgbaFrame};

pub fn open_default_engine(address: &str, bytes: Arc<Vec<u8>>) -> AppResult<Box<dyn DocumentEngine>> {
    PdfDoc::open_with_shared_bytes(address, bytes).map(|doc| Box::new(doc) as Box<dyn DocumentEngine>)
}

/// A parsed document kept alive for the viewer it was loaded for, so page
/// renders reuse it instead of reparsing the bytes.
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<Box<dyn DocumentEngine>>>,
    page_count: usize,
}

impl SharedEngine {
    pub fn new(engine: Box<dyn DocumentEngine>) -> Self {
        let page_count = engine.page_count();
        Self {
            inner: Arc::new(Mutex::new(engine)),
            page_count,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Blocks while another render holds the document.
    pub fn render_page(&self, page: usize, scale: f32) -> AppResult<RgbaFrame> {
        let engine = self
            .inner
            .lock()
            .map_err(|_| AppError::unsupported("document engine lock poisoned"))?;
        engine.render_page(page, scale)
    }
}

impl fmt::Debug for SharedEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedEngine")
            .field("page_count", &self.page_count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::{DocumentEngine, RgbaFrame, SharedEngine};
    use crate::error::AppResult;

    struct CountingEngine {
        renders: Arc<AtomicUsize>,
    }

    impl DocumentEngine for CountingEngine {
        fn page_count(&self) -> usize {
            3
        }

        fn render_page(&self, _page: usize, _scale: f32) -> AppResult<RgbaFrame> {
            self.renders.fetch_add(1, Ordering::SeqCst);
            Ok(RgbaFrame {
                width: 1,
                height: 1,
                pixels: vec![0, 0, 0, 255].into(),
            })
        }
    }

    #[test]
    fn clones_render_through_the_same_parsed_document() {
        let renders = Arc::new(AtomicUsize::new(0));
        let engine = SharedEngine::new(Box::new(CountingEngine {
            renders: Arc::clone(&renders),
        }));
        let clone = engine.clone();

        assert_eq!(clone.page_count(), 3);
        engine.render_page(0, 1.0).expect("first render");
        clone.render_page(2, 1.0).expect("second render");
        assert_eq!(renders.load(Ordering::SeqCst), 2);
    }
}
