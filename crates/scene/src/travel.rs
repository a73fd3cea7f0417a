use foundation::math::ease_in_out_cubic;
use foundation::time::Time;

use crate::camera::CameraPose;
use crate::zones::{Zone, ZoneId};

/// Fixed camera-rail travel duration (seconds).
pub const TRAVEL_DURATION_S: f64 = 2.0;

/// An in-flight camera transition between two poses.
///
/// At most one tween exists at a time; beginning a new travel discards the
/// old tween outright (last call wins, no blending, no queueing).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TravelTween {
    from: CameraPose,
    to: CameraPose,
    destination: ZoneId,
    started: Time,
    duration_s: f64,
}

impl TravelTween {
    /// Starts travel from the live camera pose toward `zone`'s destination.
    ///
    /// `from` must be read from the live camera at call time, not from a
    /// previous tween's nominal destination; interrupting a tween then
    /// continues from wherever the camera actually is instead of snapping.
    pub fn begin(from: CameraPose, zone: &Zone, now: Time) -> Self {
        Self {
            from,
            to: zone.destination,
            destination: zone.id,
            started: now,
            duration_s: TRAVEL_DURATION_S,
        }
    }

    pub fn destination(&self) -> ZoneId {
        self.destination
    }

    /// Pose at `now`, plus whether the tween has finished.
    ///
    /// Progress is computed from absolute time with `u` clamped to [0, 1], so
    /// a stalled clock (backgrounded tab) jumps to completion instead of
    /// overshooting. At `u >= 1` the pose is exactly the destination; calling
    /// again after that returns the same pose (idempotent, no error path).
    pub fn advance(&self, now: Time) -> (CameraPose, bool) {
        let u = (now.since(self.started) / self.duration_s).clamp(0.0, 1.0);
        if u >= 1.0 {
            return (self.to, true);
        }
        (self.from.lerp(self.to, ease_in_out_cubic(u)), false)
    }
}
