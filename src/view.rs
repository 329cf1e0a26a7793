// Pan/zoom view state.
//
// A uniform-scale affine transform applied to the whole rendered scene,
// independent of node physics. Zoom is anchored on the pointer, the scale is
// clamped, and "reset framing" runs as a short eased tween advanced by the
// same clock that drives the simulator.

use serde::Serialize;

use crate::layout::PointF;

pub const SCALE_MIN: f32 = 0.1;
pub const SCALE_MAX: f32 = 2.0;

/// Ticks the reset tween takes at the nominal frame rate (~500 ms).
const RESET_TICKS: u32 = 30;

/// scene -> screen: `screen = scene * k + (tx, ty)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewTransform {
    pub tx: f32,
    pub ty: f32,
    pub k: f32,
}

impl ViewTransform {
    /// Framing applied on first render and restored by reset.
    pub fn default_framing() -> Self {
        Self { tx: 150.0, ty: 50.0, k: 0.75 }
    }

    pub fn to_screen(&self, p: PointF) -> PointF {
        PointF {
            x: p.x * self.k + self.tx,
            y: p.y * self.k + self.ty,
        }
    }

    pub fn to_scene(&self, p: PointF) -> PointF {
        PointF {
            x: (p.x - self.tx) / self.k,
            y: (p.y - self.ty) / self.k,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ResetTween {
    from: ViewTransform,
    to: ViewTransform,
    tick: u32,
}

/// View state: the live transform plus the optional reset animation.
/// Survives graph edits; only an explicit reset moves it back.
#[derive(Debug, Clone)]
pub struct View {
    pub transform: ViewTransform,
    tween: Option<ResetTween>,
}

impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}

impl View {
    pub fn new() -> Self {
        Self {
            transform: ViewTransform::default_framing(),
            tween: None,
        }
    }

    /// Translate the scene by a screen-space delta. Cancels a running reset.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.tween = None;
        self.transform.tx += dx;
        self.transform.ty += dy;
    }

    /// Scale about a screen-space anchor, keeping the scene point under the
    /// anchor stationary. The resulting scale is clamped to [0.1, 2.0].
    pub fn zoom_by(&mut self, factor: f32, anchor: PointF) {
        self.tween = None;
        let k0 = self.transform.k;
        let k1 = (k0 * factor).clamp(SCALE_MIN, SCALE_MAX);
        let scene = self.transform.to_scene(anchor);
        self.transform.k = k1;
        self.transform.tx = anchor.x - scene.x * k1;
        self.transform.ty = anchor.y - scene.y * k1;
    }

    /// Start the animated return to the default framing.
    pub fn reset(&mut self) {
        self.tween = Some(ResetTween {
            from: self.transform,
            to: ViewTransform::default_framing(),
            tick: 0,
        });
    }

    pub fn animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Advance the reset tween by one frame, if one is running.
    pub fn tick(&mut self) {
        let Some(mut tween) = self.tween else { return };
        tween.tick += 1;
        let t = tween.tick as f32 / RESET_TICKS as f32;
        if t >= 1.0 {
            self.transform = tween.to;
            self.tween = None;
            return;
        }
        let e = ease_cubic_in_out(t);
        self.transform = ViewTransform {
            tx: tween.from.tx + (tween.to.tx - tween.from.tx) * e,
            ty: tween.from.ty + (tween.to.ty - tween.from.ty) * e,
            k: tween.from.k + (tween.to.k - tween.from.k) * e,
        };
        self.tween = Some(tween);
    }
}

fn ease_cubic_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn test_screen_scene_round_trip() {
        let mut view = View::new();
        view.pan_by(37.0, -12.0);
        view.zoom_by(1.6, PointF { x: 100.0, y: 80.0 });

        let p = PointF { x: 640.0, y: 410.0 };
        let back = view.transform.to_scene(view.transform.to_screen(p));
        assert!(approx_eq!(f32, back.x, p.x, epsilon = 0.01));
        assert!(approx_eq!(f32, back.y, p.y, epsilon = 0.01));
    }

    #[test]
    fn test_zoom_clamps_scale() {
        let mut view = View::new();
        let anchor = PointF { x: 0.0, y: 0.0 };
        view.zoom_by(100.0, anchor);
        assert_eq!(view.transform.k, SCALE_MAX);
        view.zoom_by(0.000_1, anchor);
        assert_eq!(view.transform.k, SCALE_MIN);
    }

    #[test]
    fn test_zoom_keeps_anchor_stationary() {
        let mut view = View::new();
        let anchor = PointF { x: 300.0, y: 200.0 };
        let scene_before = view.transform.to_scene(anchor);
        view.zoom_by(1.5, anchor);
        let screen_after = view.transform.to_screen(scene_before);
        assert!(approx_eq!(f32, screen_after.x, anchor.x, epsilon = 0.01));
        assert!(approx_eq!(f32, screen_after.y, anchor.y, epsilon = 0.01));
    }

    #[test]
    fn test_reset_tween_lands_on_default_framing() {
        let mut view = View::new();
        view.pan_by(500.0, 300.0);
        view.zoom_by(0.5, PointF { x: 0.0, y: 0.0 });
        view.reset();
        assert!(view.animating());

        let mut ticks = 0;
        while view.animating() {
            view.tick();
            ticks += 1;
            assert!(ticks <= 31, "reset tween failed to finish");
        }
        assert_eq!(view.transform, ViewTransform::default_framing());
    }

    #[test]
    fn test_reset_moves_gradually_not_instantly() {
        let mut view = View::new();
        view.pan_by(1000.0, 0.0);
        let start = view.transform;
        view.reset();
        view.tick();
        let mid = view.transform;
        assert!(mid.tx < start.tx);
        assert!(mid.tx > ViewTransform::default_framing().tx);
    }

    #[test]
    fn test_pan_cancels_reset() {
        let mut view = View::new();
        view.pan_by(400.0, 0.0);
        view.reset();
        view.pan_by(1.0, 0.0);
        assert!(!view.animating());
    }

    #[test]
    fn test_tick_without_animation_is_inert() {
        let mut view = View::new();
        let before = view.transform;
        view.tick();
        assert_eq!(view.transform, before);
    }
}
