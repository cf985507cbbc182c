/// Viewport manages the zoom/pan transform applied to the embedded map surface.
/// Scale and translation combine into a single CSS transform with the origin
/// pinned to the surface's top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pan_anchor: Option<(f64, f64)>,
}

const MIN_SCALE: f64 = 0.5;
const MAX_SCALE: f64 = 5.0;
const ZOOM_IN_FACTOR: f64 = 1.1;
const ZOOM_OUT_FACTOR: f64 = 0.9;

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            pan_anchor: None,
        }
    }
}

impl Viewport {
    /// Zoom one wheel step toward a focus point given in surface-local
    /// coordinates. The translation is recomputed so the point under the
    /// cursor stays visually fixed.
    pub fn zoom_at(&mut self, delta_y: f64, cx: f64, cy: f64) {
        let factor = if delta_y < 0.0 {
            ZOOM_IN_FACTOR
        } else {
            ZOOM_OUT_FACTOR
        };
        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let ratio = new_scale / self.scale;

        self.translate_x = cx - (cx - self.translate_x) * ratio;
        self.translate_y = cy - (cy - self.translate_y) * ratio;
        self.scale = new_scale;
    }

    /// Enter panning mode, anchored at the pointer. Later moves re-base the
    /// translation from this anchor instead of accumulating deltas.
    pub fn begin_pan(&mut self, x: f64, y: f64) {
        self.pan_anchor = Some((x - self.translate_x, y - self.translate_y));
    }

    /// Re-base the translation from the current pointer position. Returns
    /// whether the viewport moved (always false while not panning).
    pub fn pan_to(&mut self, x: f64, y: f64) -> bool {
        let Some((ax, ay)) = self.pan_anchor else {
            return false;
        };
        self.translate_x = x - ax;
        self.translate_y = y - ay;
        true
    }

    /// Leave panning mode. Wired to both pointer-up and pointer-leave so a
    /// drag can never stay stuck active when the pointer exits the surface.
    pub fn end_pan(&mut self) {
        self.pan_anchor = None;
    }

    /// Back to the identity transform.
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.translate_x = 0.0;
        self.translate_y = 0.0;
        self.pan_anchor = None;
    }

    /// CSS transform value combining translation and scale. Callers apply it
    /// with `transform-origin: 0 0`.
    pub fn transform_value(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}
