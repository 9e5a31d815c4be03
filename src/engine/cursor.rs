use crate::canvas::Canvas;
use crate::config::LayoutConfig;

/// Where a reserved block may be drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WriteOrigin {
    pub page_index: usize,
    /// Top edge of the reserved slot.
    pub y: f32,
    /// The reservation started a fresh page.
    pub new_page: bool,
}

/// Current page and vertical write position. All page breaks go through here.
#[derive(Clone, Debug)]
pub struct Cursor {
    page_index: usize,
    y: f32,
    page_height: f32,
    margin_top: f32,
    margin_bottom: f32,
    first_page_top: f32,
}

impl Cursor {
    pub fn new(layout: &LayoutConfig) -> Self {
        Self {
            page_index: 0,
            y: layout.first_page_top,
            page_height: layout.page_height,
            margin_top: layout.margin_top,
            margin_bottom: layout.margin_bottom,
            first_page_top: layout.first_page_top,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    fn page_top(&self) -> f32 {
        if self.page_index == 0 {
            self.first_page_top
        } else {
            self.margin_top
        }
    }

    /// Lowest y any block may reach.
    pub fn limit(&self) -> f32 {
        self.page_height - self.margin_bottom
    }

    pub fn remaining(&self) -> f32 {
        (self.limit() - self.y).max(0.0)
    }

    /// Height available to a block placed at the top of a fresh page.
    pub fn usable_height(&self) -> f32 {
        self.limit() - self.margin_top
    }

    pub fn at_page_top(&self) -> bool {
        (self.y - self.page_top()).abs() < 0.01
    }

    /// Claim `height` of vertical space, starting a new page first when the
    /// block would cross the bottom margin.
    pub fn reserve(&mut self, canvas: &mut dyn Canvas, height: f32) -> WriteOrigin {
        self.reserve_keep(canvas, height, 0.0)
    }

    /// Like [`reserve`](Self::reserve), but also requires `keep` more space
    /// below the block so it is not stranded at the bottom of a page.
    pub fn reserve_keep(&mut self, canvas: &mut dyn Canvas, height: f32, keep: f32) -> WriteOrigin {
        let mut new_page = false;
        let overflows = self.y + height + keep > self.limit();
        // The first page starts lower, so a tall block may still fit on the next one.
        let roomier_next = self.y + height > self.limit() && self.y > self.margin_top;
        if overflows && (!self.at_page_top() || roomier_next) {
            self.advance_page(canvas);
            new_page = true;
        }
        if self.y + height > self.limit() {
            log::warn!(
                "Block of {height:.1}mm exceeds the usable page height on page {}",
                self.page_index + 1
            );
        }
        let origin = WriteOrigin {
            page_index: self.page_index,
            y: self.y,
            new_page,
        };
        self.y += height;
        origin
    }

    /// Extend the most recent reservation by `extra`. Only meaningful right
    /// after a reservation that opened a new page, where space is known to
    /// be available.
    pub fn grow(&mut self, extra: f32) {
        debug_assert!(self.y + extra <= self.limit() + 0.01);
        self.y += extra;
    }

    /// Inter-block spacing. Never breaks a page and is dropped at a page top.
    pub fn gap(&mut self, amount: f32) {
        if !self.at_page_top() {
            self.y += amount;
        }
    }

    pub fn advance_page(&mut self, canvas: &mut dyn Canvas) {
        self.page_index += 1;
        if canvas.page_count() <= self.page_index {
            canvas.new_page();
        } else {
            canvas.set_page(self.page_index);
        }
        self.y = self.margin_top;
        log::debug!("Page break → page {}", self.page_index + 1);
    }

    /// Start a new page unless nothing has been written to the current one.
    pub fn force_new_page(&mut self, canvas: &mut dyn Canvas) -> bool {
        if self.at_page_top() {
            return false;
        }
        self.advance_page(canvas);
        true
    }
}
