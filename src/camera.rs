use crate::constants::*;
use crate::physics::Aabb;
use glam::{Mat4, Vec2};

/// 2D camera in screen-space units with y pointing down.
///
/// `position` is the world point at the center of the viewport.
pub struct Camera {
    pub position: Vec2,
    pub zoom: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    bounds: Option<Aabb>,
    tracking_target: Option<Vec2>,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            position: Vec2::new(viewport_width / 2.0, viewport_height / 2.0),
            zoom: CAMERA_DEFAULT_ZOOM,
            viewport_width,
            viewport_height,
            bounds: None,
            tracking_target: None,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.clamp_to_bounds();
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(CAMERA_MIN_ZOOM, CAMERA_MAX_ZOOM);
        self.clamp_to_bounds();
    }

    /// Restrict the view to `bounds`. A world smaller than the view is centered.
    pub fn set_bounds(&mut self, bounds: Aabb) {
        self.bounds = Some(bounds);
        self.clamp_to_bounds();
    }

    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    pub fn set_tracking_target(&mut self, target: Vec2) {
        self.tracking_target = Some(target);
    }

    pub fn stop_tracking(&mut self) {
        self.tracking_target = None;
    }

    /// Jump straight to the tracking target.
    pub fn snap_to_target(&mut self) {
        if let Some(target) = self.tracking_target {
            self.position = target;
            self.clamp_to_bounds();
        }
    }

    /// Place the top-left corner of the view at `top_left`.
    pub fn scroll_to(&mut self, top_left: Vec2) {
        self.position = top_left + self.half_extent();
        self.clamp_to_bounds();
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(target) = self.tracking_target {
            // Frame-rate independent smoothing
            let t = 1.0 - CAMERA_TRACKING_SMOOTHING.powf(dt * 60.0);
            self.position += (target - self.position) * t;
        }
        self.clamp_to_bounds();
    }

    /// Half the visible area in world units
    pub fn half_extent(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height) / (2.0 * self.zoom)
    }

    fn clamp_to_bounds(&mut self) {
        let Some(bounds) = self.bounds else {
            return;
        };
        let half = self.half_extent();
        let (min, max) = (bounds.min + half, bounds.max() - half);

        self.position.x = if min.x > max.x {
            bounds.center().x
        } else {
            self.position.x.clamp(min.x, max.x)
        };
        self.position.y = if min.y > max.y {
            bounds.center().y
        } else {
            self.position.y.clamp(min.y, max.y)
        };
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.position) * self.zoom + Vec2::new(self.viewport_width, self.viewport_height) / 2.0
    }

    pub fn screen_to_world(&self, screen_x: f32, screen_y: f32) -> Vec2 {
        let offset = Vec2::new(screen_x, screen_y) - Vec2::new(self.viewport_width, self.viewport_height) / 2.0;
        self.position + offset / self.zoom
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let half = self.half_extent();

        let left = self.position.x - half.x;
        let right = self.position.x + half.x;
        // y grows downwards, so the bottom edge has the larger coordinate
        let bottom = self.position.y + half.y;
        let top = self.position.y - half.y;

        Mat4::orthographic_rh(left, right, bottom, top, -1.0, 1.0)
    }

    pub fn visible_bounds(&self) -> Aabb {
        let half = self.half_extent();
        Aabb::new(self.position - half, half * 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_camera_shows_origin_at_top_left() {
        let camera = Camera::new(1200.0, 900.0);
        assert_eq!(camera.visible_bounds().min, Vec2::ZERO);
        assert_eq!(camera.world_to_screen(Vec2::new(400.0, 300.0)), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_screen_world_round_trip_with_zoom() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.position = Vec2::new(1000.0, 500.0);
        camera.set_zoom(2.0);

        let world = camera.screen_to_world(600.0, 150.0);
        assert_eq!(world, Vec2::new(1100.0, 425.0));
        assert_eq!(camera.world_to_screen(world), Vec2::new(600.0, 150.0));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.set_zoom(100.0);
        assert_eq!(camera.zoom, CAMERA_MAX_ZOOM);
        camera.set_zoom(0.0);
        assert_eq!(camera.zoom, CAMERA_MIN_ZOOM);
    }

    #[test]
    fn test_bounds_clamp_position() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.set_bounds(Aabb::new(Vec2::ZERO, Vec2::new(5000.0, 5000.0)));

        camera.set_tracking_target(Vec2::new(10.0, 4990.0));
        camera.snap_to_target();
        assert_eq!(camera.position, Vec2::new(400.0, 4700.0));
    }

    #[test]
    fn test_small_world_is_centered() {
        let mut camera = Camera::new(1200.0, 900.0);
        camera.set_bounds(Aabb::new(Vec2::ZERO, Vec2::new(800.0, 600.0)));
        assert_eq!(camera.position, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_tracking_converges() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.set_tracking_target(Vec2::new(2000.0, 1500.0));
        for _ in 0..300 {
            camera.update(1.0 / 60.0);
        }
        assert!(camera.position.distance(Vec2::new(2000.0, 1500.0)) < 0.01);
    }

    #[test]
    fn test_projection_maps_view_corners() {
        let camera = Camera::new(800.0, 600.0);
        let proj = camera.projection_matrix();

        let top_left = proj.project_point3(glam::Vec3::new(0.0, 0.0, 0.0));
        assert!((top_left.x + 1.0).abs() < 1e-5);
        assert!((top_left.y - 1.0).abs() < 1e-5);

        let bottom_right = proj.project_point3(glam::Vec3::new(800.0, 600.0, 0.0));
        assert!((bottom_right.x - 1.0).abs() < 1e-5);
        assert!((bottom_right.y + 1.0).abs() < 1e-5);
    }
}
