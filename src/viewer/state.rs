/// Current page within a document with a known page count.
///
/// Pages are 1-based; `1 <= current <= total` holds for every value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    current: usize,
    total: usize,
}

impl PageCursor {
    pub fn first(total: usize) -> Option<Self> {
        (total >= 1).then_some(Self { current: 1, total })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    pub fn is_last(&self) -> bool {
        self.current == self.total
    }

    /// Moves to `page`, clamped into the valid range.
    pub fn set(&mut self, page: usize) {
        self.current = page.clamp(1, self.total);
    }

    pub fn step_back(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn step_forward(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewerState {
    /// The engine has not reported a page count yet.
    #[default]
    Unloaded,
    Loaded(PageCursor),
    Failed(String),
}

impl ViewerState {
    pub fn cursor(&self) -> Option<&PageCursor> {
        match self {
            Self::Loaded(cursor) => Some(cursor),
            _ => None,
        }
    }

    pub fn current_page(&self) -> Option<usize> {
        self.cursor().map(PageCursor::current)
    }

    pub fn total_pages(&self) -> Option<usize> {
        self.cursor().map(PageCursor::total)
    }
}
