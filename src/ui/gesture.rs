/// Swipe-to-dismiss for the detail modal
///
/// A downward drag on the sheet either scrolls its content back toward the
/// top or, once the content is at the top, pulls the sheet down. Releasing
/// past the threshold dismisses; anything less springs back.

/// What the swipe coordinator may do to the modal's scroll region
pub trait ScrollCapability {
    fn current_offset(&self) -> f32;
    fn scroll_to(&mut self, offset: f32);
}

/// Vertical scroll state of the modal's inner content
#[derive(Debug, Clone, Default)]
pub struct ScrollRegion {
    offset: f32,
    /// Programmatic scroll the view layer hasn't performed yet
    request: Option<f32>,
}

impl ScrollRegion {
    /// Record a scroll performed by the user (wheel, scrollbar)
    pub fn on_scrolled(&mut self, offset: f32) {
        self.offset = offset.max(0.0);
    }

    /// Take the pending programmatic scroll, if any
    pub fn take_request(&mut self) -> Option<f32> {
        self.request.take()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl ScrollCapability for ScrollRegion {
    fn current_offset(&self) -> f32 {
        self.offset
    }

    fn scroll_to(&mut self, offset: f32) {
        let offset = offset.max(0.0);
        self.offset = offset;
        self.request = Some(offset);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Drag {
    Idle,
    Dragging { last_y: f32, translation: f32 },
}

/// Result of letting go of the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    Dismissed,
    /// Not far enough; sheet returns to rest
    Restored,
    /// No drag was in progress
    Ignored,
}

#[derive(Debug, Clone)]
pub struct SwipeDismiss {
    drag: Drag,
    threshold: f32,
    scroll_offset_max: f32,
}

impl SwipeDismiss {
    pub fn new(threshold: f32, scroll_offset_max: f32) -> Self {
        Self {
            drag: Drag::Idle,
            threshold,
            scroll_offset_max,
        }
    }

    pub fn begin(&mut self, y: f32) {
        self.drag = Drag::Dragging {
            last_y: y,
            translation: 0.0,
        };
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, Drag::Dragging { .. })
    }

    /// How far the sheet is pulled down right now
    pub fn translation(&self) -> f32 {
        match self.drag {
            Drag::Idle => 0.0,
            Drag::Dragging { translation, .. } => translation,
        }
    }

    /// Follow the pointer to `y`, sharing the motion with the scroll region
    pub fn drag_to(&mut self, y: f32, scroll: &mut impl ScrollCapability) {
        let Drag::Dragging {
            last_y,
            mut translation,
        } = self.drag
        else {
            return;
        };

        let dy = y - last_y;
        let offset = scroll.current_offset();

        if dy > 0.0 {
            // Pulling down: unscroll the content first, then move the sheet
            let unscroll = dy.min(offset);
            if unscroll > 0.0 {
                scroll.scroll_to(offset - unscroll);
            }
            translation += dy - unscroll;
        } else if dy < 0.0 {
            // Pushing up: retract the sheet first, then scroll the content
            let up = -dy;
            let retract = up.min(translation);
            translation -= retract;

            let remaining = up - retract;
            if remaining > 0.0 && offset < self.scroll_offset_max {
                scroll.scroll_to((offset + remaining).min(self.scroll_offset_max));
            }
        }

        self.drag = Drag::Dragging {
            last_y: y,
            translation,
        };
    }

    pub fn release(&mut self) -> SwipeOutcome {
        let outcome = match self.drag {
            Drag::Idle => SwipeOutcome::Ignored,
            Drag::Dragging { translation, .. } if translation >= self.threshold => {
                SwipeOutcome::Dismissed
            }
            Drag::Dragging { .. } => SwipeOutcome::Restored,
        };
        self.drag = Drag::Idle;
        outcome
    }

    pub fn cancel(&mut self) {
        self.drag = Drag::Idle;
    }
}
