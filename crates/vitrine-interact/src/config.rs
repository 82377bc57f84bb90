use serde::{Deserialize, Serialize};
use vitrine_core::{AnimationSpec, Easing};
use web_time::Duration;

/// Rate limit shared by resize and scroll-settle reactions.
pub const DEFAULT_REACTION_WINDOW: Duration = Duration::from_millis(166);

/// Per-carousel knobs. Missing fields deserialize to their defaults.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Throttle window for viewport-resize reactions.
    pub resize_window: Duration,
    /// Debounce window for scroll-settle reactions.
    pub settle_window: Duration,
    /// Hide the scrollbar track even when content overflows.
    pub disable_scrollbar: bool,
    /// Transition used by prev/next paging. Zero duration jumps.
    pub scroll_animation: AnimationSpec,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            resize_window: DEFAULT_REACTION_WINDOW,
            settle_window: DEFAULT_REACTION_WINDOW,
            disable_scrollbar: false,
            scroll_animation: AnimationSpec::tween(Duration::from_millis(350), Easing::EaseInOut),
        }
    }
}

impl CarouselConfig {
    pub fn resize_window(mut self, w: Duration) -> Self {
        self.resize_window = w;
        self
    }
    pub fn settle_window(mut self, w: Duration) -> Self {
        self.settle_window = w;
        self
    }
    pub fn disable_scrollbar(mut self, on: bool) -> Self {
        self.disable_scrollbar = on;
        self
    }
    pub fn scroll_animation(mut self, spec: AnimationSpec) -> Self {
        self.scroll_animation = spec;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = CarouselConfig::default();
        assert_eq!(c.resize_window, Duration::from_millis(166));
        assert_eq!(c.settle_window, Duration::from_millis(166));
        assert!(!c.disable_scrollbar);
        assert_eq!(c.scroll_animation.duration, Duration::from_millis(350));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: CarouselConfig = serde_json::from_str(
            r#"{
                "disable_scrollbar": true,
                "settle_window": { "secs": 0, "nanos": 50000000 },
                "scroll_animation": { "duration": { "secs": 0, "nanos": 0 }, "easing": "Linear" }
            }"#,
        )
        .unwrap();
        assert!(c.disable_scrollbar);
        assert_eq!(c.settle_window, Duration::from_millis(50));
        assert_eq!(c.resize_window, DEFAULT_REACTION_WINDOW);
        assert!(c.scroll_animation.is_instant());
    }

    #[test]
    fn json_roundtrip_preserves_builder_values() {
        let c = CarouselConfig::default()
            .resize_window(Duration::from_millis(100))
            .disable_scrollbar(true);
        let json = serde_json::to_string(&c).unwrap();
        let back: CarouselConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
