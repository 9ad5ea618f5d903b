//! Fixed-size paging over rendered cards.

pub const PAGE_SIZE: usize = 3;

/// `max(1, ceil(len / page_size))`.
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.clamp(1, page_count.max(1))
}

/// Cards plus the current page (1-based). The page is the only mutable state
/// and is always within `[1, page_count]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    cards: Vec<String>,
    current: usize,
}

impl Paginator {
    pub fn new(cards: Vec<String>) -> Self {
        Self { cards, current: 1 }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn page_count(&self) -> usize {
        page_count(self.cards.len(), PAGE_SIZE)
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    /// Jumps to `page`, clamped. Returns the page actually shown.
    pub fn go_to(&mut self, page: usize) -> usize {
        self.current = clamp_page(page, self.page_count());
        self.current
    }

    /// Returns false when already on the last page.
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Returns false when already on the first page.
    pub fn prev(&mut self) -> bool {
        if self.has_prev() {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.page_count()
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    pub fn current_cards(&self) -> &[String] {
        let start = ((self.current - 1) * PAGE_SIZE).min(self.cards.len());
        let end = (start + PAGE_SIZE).min(self.cards.len());
        &self.cards[start..end]
    }

    pub fn render_nav(&self) -> String {
        format!(
            r#"<div class="pagination"><button type="button" class="page-btn page-prev" data-page="{prev}"{prev_disabled}><i class="fas fa-chevron-left"></i> Prev</button><span class="page-indicator">Page {current} of {total}</span><button type="button" class="page-btn page-next" data-page="{next}"{next_disabled}>Next <i class="fas fa-chevron-right"></i></button></div>"#,
            prev = self.current.saturating_sub(1).max(1),
            prev_disabled = disabled_attr(!self.has_prev()),
            current = self.current,
            total = self.page_count(),
            next = (self.current + 1).min(self.page_count()),
            next_disabled = disabled_attr(!self.has_next()),
        )
    }
}

fn disabled_attr(disabled: bool) -> &'static str {
    if disabled {
        " disabled"
    } else {
        ""
    }
}
