use glow::HasContext;

/// Manages simple GL state to reduce redundant state changes.
///
/// Single-writer/single-reader: the event-loop thread that owns the GL
/// context is the only writer and the only reader, so no synchronization
/// is needed.
#[derive(Debug)]
pub struct GlState {
    // Viewport dimensions
    viewport: [i32; 4], // [x, y, width, height]

    // Clear color
    clear_color: [f32; 4],

    // Depth test capability
    depth_test: bool,
}

impl Default for GlState {
    fn default() -> Self {
        Self::new()
    }
}

impl GlState {
    /// Creates a state cache matching GL context defaults.
    pub fn new() -> Self {
        Self {
            viewport: [0, 0, 0, 0],
            clear_color: [0.0, 0.0, 0.0, 0.0],
            depth_test: false,
        }
    }

    /// Set viewport dimensions.
    pub fn viewport(
        &mut self,
        gl: &glow::Context,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> &mut Self {
        if self.update_viewport([x, y, width, height]) {
            unsafe { gl.viewport(x, y, width, height) };
        }
        self
    }

    /// Set clear color.
    pub fn clear_color(&mut self, gl: &glow::Context, r: f32, g: f32, b: f32, a: f32) -> &mut Self {
        if self.update_clear_color([r, g, b, a]) {
            unsafe { gl.clear_color(r, g, b, a) };
        }
        self
    }

    /// Enable or disable depth testing.
    pub fn depth_test(&mut self, gl: &glow::Context, enable: bool) -> &mut Self {
        if self.update_depth_test(enable) {
            unsafe {
                if enable {
                    gl.enable(glow::DEPTH_TEST);
                } else {
                    gl.disable(glow::DEPTH_TEST);
                }
            }
        }
        self
    }

    // The cache decisions are separated from the GL calls so they can be
    // exercised without a live context.

    fn update_viewport(&mut self, new_viewport: [i32; 4]) -> bool {
        let changed = self.viewport != new_viewport;
        if changed {
            self.viewport = new_viewport;
        }
        changed
    }

    fn update_clear_color(&mut self, new_color: [f32; 4]) -> bool {
        let changed = self.clear_color != new_color;
        if changed {
            self.clear_color = new_color;
        }
        changed
    }

    fn update_depth_test(&mut self, enable: bool) -> bool {
        let changed = self.depth_test != enable;
        if changed {
            self.depth_test = enable;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_issues_only_on_change() {
        let mut state = GlState::new();

        assert!(state.update_viewport([0, 0, 800, 600]));
        assert!(!state.update_viewport([0, 0, 800, 600]));
        assert!(!state.update_viewport([0, 0, 800, 600]));
        assert!(state.update_viewport([0, 0, 400, 300]));
    }

    #[test]
    fn test_viewport_accepts_zero_area() {
        let mut state = GlState::new();
        state.update_viewport([0, 0, 800, 600]);

        // a zero-area rectangle is stored like any other
        assert!(state.update_viewport([0, 0, 0, 0]));
        assert!(!state.update_viewport([0, 0, 0, 0]));
    }

    #[test]
    fn test_depth_test_enable_is_idempotent() {
        let mut state = GlState::new();

        assert!(state.update_depth_test(true));
        assert!(!state.update_depth_test(true));
        assert!(state.update_depth_test(false));
    }

    #[test]
    fn test_clear_color_issues_only_on_change() {
        let mut state = GlState::new();

        assert!(state.update_clear_color([0.0, 0.0, 0.0, 1.0]));
        assert!(!state.update_clear_color([0.0, 0.0, 0.0, 1.0]));
        assert!(state.update_clear_color([0.1, 0.0, 0.0, 1.0]));
    }
}
