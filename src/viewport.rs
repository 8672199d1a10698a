use super::*;

/// Camera state read by the render layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// World position shown at the middle of the screen.
    pub center: DVec2,
    pub zoom: f64,
}
impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: DVec2::ZERO,
            zoom: 1.0,
        }
    }
}
impl Viewport {
    pub fn new(center: DVec2, zoom: f64) -> Self {
        Self { center, zoom }
    }

    /// Screen position of a world point.
    ///
    /// Same chain as the draw step: translate to the middle of the screen,
    /// scale by zoom, translate by `-center`.
    pub fn world_to_screen(&self, world: DVec2, screen_size: DVec2) -> DVec2 {
        (world - self.center) * self.zoom + screen_size * 0.5
    }

    /// Exact inverse of `world_to_screen`.
    pub fn screen_to_world(&self, screen: DVec2, screen_size: DVec2) -> DVec2 {
        (screen - screen_size * 0.5) / self.zoom + self.center
    }

    /// Set zoom, clamped to `[min_zoom, max_zoom]`.
    pub fn set_zoom(&mut self, zoom: f64, configs: &ViewportConfigs) {
        self.zoom = clamp_zoom(zoom, configs);
    }

    /// Move the camera by a screen space drag delta.
    /// Dragging right moves the world right, so the camera goes left.
    pub fn pan_by_screen(&mut self, screen_delta: DVec2) -> DVec2 {
        let world_delta = screen_delta / self.zoom;
        self.center -= world_delta;
        world_delta
    }
}

pub fn clamp_zoom(zoom: f64, configs: &ViewportConfigs) -> f64 {
    if zoom.is_nan() {
        return configs.min_zoom;
    }
    zoom.clamp(configs.min_zoom, configs.max_zoom.max(configs.min_zoom))
}
