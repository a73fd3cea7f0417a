use foundation::math::{Vec2, Vec3};

use crate::picking::Ray;

/// A viewpoint: where the camera sits and what it looks at.
///
/// Derived each frame while a tween is in flight; otherwise equal to the
/// last-reached zone's destination.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    /// Position and look target interpolate independently; the eased travel
    /// parameter is applied to both.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            look_at: self.look_at.lerp(other.look_at, t),
        }
    }
}

/// Perspective camera over the storefront viewport.
///
/// Owns the pointer-pixel -> NDC -> world-ray mapping; the render layer owns
/// projection matrices and everything GPU-side.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub pose: CameraPose,
    pub fov_y_rad: f64,
    viewport_w: f64,
    viewport_h: f64,
}

/// Vertical field of view used by the storefront viewport (degrees).
pub const DEFAULT_FOV_Y_DEG: f64 = 60.0;

impl Camera {
    pub fn new(pose: CameraPose, viewport_w: f64, viewport_h: f64) -> Self {
        Self {
            pose,
            fov_y_rad: DEFAULT_FOV_Y_DEG.to_radians(),
            viewport_w: viewport_w.max(1.0),
            viewport_h: viewport_h.max(1.0),
        }
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_w = width.max(1.0);
        self.viewport_h = height.max(1.0);
    }

    pub fn viewport(&self) -> (f64, f64) {
        (self.viewport_w, self.viewport_h)
    }

    fn aspect(&self) -> f64 {
        self.viewport_w / self.viewport_h
    }

    /// Viewport pixels to normalized device coordinates.
    ///
    /// `ndc_x = (x/w)*2 - 1`, `ndc_y = -((y/h)*2 - 1)` (screen y grows down,
    /// NDC y grows up).
    pub fn ndc(&self, x_px: f64, y_px: f64) -> Vec2 {
        Vec2::new(
            (x_px / self.viewport_w) * 2.0 - 1.0,
            -((y_px / self.viewport_h) * 2.0 - 1.0),
        )
    }

    /// Camera basis: forward toward the look target, right, and true up.
    ///
    /// `None` when the pose is degenerate (zero-length forward, or looking
    /// straight along the world up axis).
    fn basis(&self) -> Option<(Vec3, Vec3, Vec3)> {
        let forward = (self.pose.look_at - self.pose.position).normalized()?;
        let right = forward.cross(Vec3::UP).normalized()?;
        let up = right.cross(forward);
        Some((forward, right, up))
    }

    /// World-space ray through the given viewport pixel.
    pub fn screen_ray(&self, x_px: f64, y_px: f64) -> Option<Ray> {
        let (forward, right, up) = self.basis()?;
        let ndc = self.ndc(x_px, y_px);
        let tan = (self.fov_y_rad * 0.5).tan();
        let dir = forward + right.scale(ndc.x * tan * self.aspect()) + up.scale(ndc.y * tan);
        Some(Ray::new(self.pose.position, dir))
    }

    /// Projects a world point back to viewport pixels.
    ///
    /// `None` when the pose is degenerate or the point is at or behind the
    /// eye plane.
    pub fn project(&self, point: Vec3) -> Option<(f64, f64)> {
        let (forward, right, up) = self.basis()?;
        let rel = point - self.pose.position;
        let depth = rel.dot(forward);
        if depth <= 0.0 {
            return None;
        }
        let tan = (self.fov_y_rad * 0.5).tan();
        let ndc_x = rel.dot(right) / (depth * tan * self.aspect());
        let ndc_y = rel.dot(up) / (depth * tan);
        let x_px = (ndc_x + 1.0) * 0.5 * self.viewport_w;
        let y_px = (1.0 - (ndc_y + 1.0) * 0.5) * self.viewport_h;
        Some((x_px, y_px))
    }
}

#[cfg(test)]
mod tests {
    use super::{Camera, CameraPose};
    use foundation::math::{Vec2, Vec3};

    fn looking_down_minus_z() -> Camera {
        Camera::new(
            CameraPose::new(Vec3::new(0.0, 1.7, 8.0), Vec3::new(0.0, 1.7, 0.0)),
            800.0,
            600.0,
        )
    }

    #[test]
    fn ndc_maps_corners_and_center() {
        let cam = looking_down_minus_z();
        assert_eq!(cam.ndc(400.0, 300.0), Vec2::new(0.0, 0.0));
        assert_eq!(cam.ndc(0.0, 0.0), Vec2::new(-1.0, 1.0));
        assert_eq!(cam.ndc(800.0, 600.0), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn center_ray_points_forward() {
        let cam = looking_down_minus_z();
        let ray = cam.screen_ray(400.0, 300.0).unwrap();
        let dir = ray.dir.normalized().unwrap();
        assert!((dir.x).abs() < 1e-12);
        assert!((dir.y).abs() < 1e-12);
        assert!((dir.z + 1.0).abs() < 1e-12);
    }

    #[test]
    fn upper_left_ray_leans_up_and_left() {
        let cam = looking_down_minus_z();
        let ray = cam.screen_ray(0.0, 0.0).unwrap();
        // Looking down -Z, screen-left is -X and screen-up is +Y.
        assert!(ray.dir.x < 0.0);
        assert!(ray.dir.y > 0.0);
        assert!(ray.dir.z < 0.0);
    }

    #[test]
    fn degenerate_pose_yields_no_ray() {
        let cam = Camera::new(
            CameraPose::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 0.0, 0.0)),
            800.0,
            600.0,
        );
        // Looking straight down the world up axis: no stable right vector.
        assert!(cam.screen_ray(400.0, 300.0).is_none());
    }

    #[test]
    fn project_inverts_screen_ray() {
        let cam = looking_down_minus_z();
        for &(x, y) in &[(400.0, 300.0), (120.0, 80.0), (700.0, 520.0)] {
            let ray = cam.screen_ray(x, y).unwrap();
            let point = ray.origin + ray.dir.scale(3.5);
            let (px, py) = cam.project(point).unwrap();
            assert!((px - x).abs() < 1e-9, "x: {px} vs {x}");
            assert!((py - y).abs() < 1e-9, "y: {py} vs {y}");
        }
    }

    #[test]
    fn project_rejects_points_behind_eye() {
        let cam = looking_down_minus_z();
        assert!(cam.project(Vec3::new(0.0, 1.7, 20.0)).is_none());
    }
}
