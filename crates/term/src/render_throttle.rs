//! Redraw throttling for a mostly static board.

/// Idle redraw interval when nothing visible changed
pub const STATIC_REDRAW_MS: u64 = 250;

/// Decides per frame whether the view needs to be redrawn.
///
/// A frame is drawn immediately when its fingerprint differs from the last
/// drawn one or while an effect is animating; otherwise at most once per
/// interval (so the clock in the side panel keeps ticking).
#[derive(Debug, Clone)]
pub struct RenderThrottle {
    interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: Option<u64>,
}

impl RenderThrottle {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_render_ms: 0,
            last_fingerprint: None,
        }
    }

    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, animating: bool) -> bool {
        let changed = self.last_fingerprint != Some(fingerprint);
        let due = now_ms.saturating_sub(self.last_render_ms) >= self.interval_ms;

        if changed || animating || due {
            self.last_render_ms = now_ms;
            self.last_fingerprint = Some(fingerprint);
            return true;
        }
        false
    }

    /// Force the next call to render (terminal resize).
    pub fn invalidate(&mut self) {
        self.last_fingerprint = None;
    }
}

impl Default for RenderThrottle {
    fn default() -> Self {
        Self::new(STATIC_REDRAW_MS)
    }
}
