#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// Horizontal geometry of a scrollable region, as laid out by the host.
///
/// `visible_extent` is the viewport width, `content_extent` the total
/// scrollable width and `current_offset` the scroll position from the left.
/// A region that has not been laid out yet reads as all zeros.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollRegion {
    pub visible_extent: f32,
    pub content_extent: f32,
    pub current_offset: f32,
}

impl ScrollRegion {
    pub fn new(visible_extent: f32, content_extent: f32, current_offset: f32) -> Self {
        Self {
            visible_extent,
            content_extent,
            current_offset,
        }
    }

    /// Largest offset the region can be scrolled to; zero when nothing overflows.
    pub fn max_offset(&self) -> f32 {
        (self.content_extent - self.visible_extent).max(0.0)
    }

    pub fn clamp_offset(&self, off: f32) -> f32 {
        off.clamp(0.0, self.max_offset())
    }

    /// Copy with negative or non-finite extents zeroed and the offset clamped
    /// into `[0, max_offset]`.
    pub fn normalized(self) -> Self {
        let finite = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let visible_extent = finite(self.visible_extent);
        let content_extent = finite(self.content_extent);
        let r = Self {
            visible_extent,
            content_extent,
            current_offset: 0.0,
        };
        Self {
            current_offset: r.clamp_offset(finite(self.current_offset)),
            ..r
        }
    }

    pub fn is_laid_out(&self) -> bool {
        self.visible_extent > 0.0
    }
}
