use glam::Vec2;

/// Side-scrolling camera. Tracks the center of a fixed-size viewport and
/// eases it toward a target each tick.
#[derive(Debug, Clone)]
pub struct Camera2D {
    /// Visible width in world units.
    pub width: f32,
    /// Visible height in world units.
    pub height: f32,
    /// Camera center position in world space.
    pub center: Vec2,
    /// Optional bounds for camera clamping (min_x, min_y, max_x, max_y).
    pub bounds: Option<[f32; 4]>,
    /// Smoothing factor for camera follow (0.0 = instant, 1.0 = never moves).
    pub smoothing: f32,
}

impl Camera2D {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            center: Vec2::new(width / 2.0, height / 2.0),
            bounds: None,
            smoothing: 0.0,
        }
    }

    /// Set world bounds for camera clamping.
    /// Camera will not show areas outside these bounds.
    pub fn set_bounds(&mut self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) {
        self.bounds = Some([min_x, min_y, max_x, max_y]);
    }

    /// 0.0 = instant snap, 0.9 = 10% of the remaining gap per tick at 60 Hz.
    pub fn set_smoothing(&mut self, smoothing: f32) {
        self.smoothing = smoothing.clamp(0.0, 0.99);
    }

    /// Move camera center to target position, clamped to bounds.
    pub fn look_at(&mut self, target: Vec2) {
        self.center = self.clamp_center(target);
    }

    /// Ease the center toward `target`. The target is clamped first, so the
    /// camera approaches the nearest in-bounds position instead of
    /// overshooting a bound and being snapped back.
    pub fn follow(&mut self, target: Vec2, dt: f32) {
        let target = self.clamp_center(target);
        if self.smoothing <= 0.0 {
            self.center = target;
        } else {
            let lerp_factor = 1.0 - self.smoothing.powf(dt * 60.0);
            self.center += (target - self.center) * lerp_factor;
        }
    }

    /// World x of the viewport's left edge.
    pub fn offset_x(&self) -> f32 {
        self.center.x - self.width / 2.0
    }

    fn clamp_center(&self, target: Vec2) -> Vec2 {
        let Some([min_x, min_y, max_x, max_y]) = self.bounds else {
            return target;
        };
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;

        // Viewport larger than bounds: center on the bounds.
        let x = if self.width >= max_x - min_x {
            (min_x + max_x) / 2.0
        } else {
            target.x.clamp(min_x + half_w, max_x - half_w)
        };
        let y = if self.height >= max_y - min_y {
            (min_y + max_y) / 2.0
        } else {
            target.y.clamp(min_y + half_h, max_y - half_h)
        };
        Vec2::new(x, y)
    }

    /// Check if a world-space rectangle (top-left + size) overlaps the viewport.
    pub fn is_rect_visible(&self, top_left: Vec2, size: Vec2) -> bool {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        top_left.x + size.x >= self.center.x - half_w
            && top_left.x <= self.center.x + half_w
            && top_left.y + size.y >= self.center.y - half_h
            && top_left.y <= self.center.y + half_h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_camera() -> Camera2D {
        let mut cam = Camera2D::new(1024.0, 768.0);
        cam.set_bounds(0.0, 0.0, 3000.0, 768.0);
        cam
    }

    #[test]
    fn bounds_clamp_camera() {
        let mut cam = world_camera();
        cam.look_at(Vec2::new(0.0, 0.0));
        assert_eq!(cam.offset_x(), 0.0);
        cam.look_at(Vec2::new(10_000.0, 0.0));
        assert!((cam.offset_x() - (3000.0 - 1024.0)).abs() < 1e-3);
        // Viewport as tall as the world: vertical center is fixed.
        assert_eq!(cam.center.y, 384.0);
    }

    #[test]
    fn follow_with_no_smoothing_snaps() {
        let mut cam = world_camera();
        cam.follow(Vec2::new(1500.0, 384.0), 1.0 / 60.0);
        assert_eq!(cam.center.x, 1500.0);
    }

    #[test]
    fn follow_closes_ten_percent_per_tick() {
        let mut cam = world_camera();
        cam.set_smoothing(0.9);
        cam.look_at(Vec2::new(512.0, 384.0));
        cam.follow(Vec2::new(1512.0, 384.0), 1.0 / 60.0);
        assert!((cam.center.x - 612.0).abs() < 1e-2, "center {}", cam.center.x);
    }

    #[test]
    fn follow_never_leaves_bounds() {
        let mut cam = world_camera();
        cam.set_smoothing(0.9);
        for _ in 0..600 {
            cam.follow(Vec2::new(-5000.0, 384.0), 1.0 / 60.0);
            assert!(cam.offset_x() >= 0.0);
        }
    }

    #[test]
    fn rect_visibility() {
        let cam = world_camera();
        assert!(cam.is_rect_visible(Vec2::new(100.0, 100.0), Vec2::new(32.0, 48.0)));
        assert!(cam.is_rect_visible(Vec2::new(-20.0, 100.0), Vec2::new(32.0, 48.0)));
        assert!(!cam.is_rect_visible(Vec2::new(2000.0, 100.0), Vec2::new(32.0, 48.0)));
    }
}
