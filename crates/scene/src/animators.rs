//! Idle animations: campfire flicker and product spin.
//!
//! Animated objects are registered once at world construction and iterated
//! directly each frame; nothing walks the scene graph looking for them.

use foundation::time::Time;

use crate::interactable::ObjectId;

/// A campfire: the flame mesh and the point light it drives.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FlamePulse {
    pub flame: ObjectId,
    pub light: ObjectId,
}

/// A shelf product that slowly spins and bobs in place.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpinBob {
    pub object: ObjectId,
    /// Shelf seat index; staggers the phase so neighbors don't move in
    /// lockstep.
    pub seat: usize,
    /// Rest height of the object's center.
    pub base_height: f64,
}

/// One per-frame visual parameter change for the render layer to apply.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum VisualUpdate {
    FlameFlicker {
        object: ObjectId,
        scale_y: f64,
        rotation_y: f64,
    },
    LightIntensity {
        object: ObjectId,
        intensity: f64,
    },
    SpinBob {
        object: ObjectId,
        rotation_y: f64,
        height: f64,
    },
}

impl VisualUpdate {
    pub fn object(&self) -> ObjectId {
        match *self {
            VisualUpdate::FlameFlicker { object, .. } => object,
            VisualUpdate::LightIntensity { object, .. } => object,
            VisualUpdate::SpinBob { object, .. } => object,
        }
    }
}

/// Registry of everything that moves while the scene idles.
#[derive(Debug, Default)]
pub struct IdleAnimators {
    flames: Vec<FlamePulse>,
    spinners: Vec<SpinBob>,
}

impl IdleAnimators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_flame(&mut self, flame: FlamePulse) {
        self.flames.push(flame);
    }

    pub fn register_spinner(&mut self, spinner: SpinBob) {
        self.spinners.push(spinner);
    }

    /// Visual parameters at `time`, registration order.
    ///
    /// Pure function of the clock, so a stalled tab resumes mid-cycle
    /// without drift.
    pub fn advance(&self, time: Time) -> Vec<VisualUpdate> {
        let t = time.0;
        let mut out = Vec::with_capacity(self.flames.len() * 2 + self.spinners.len());

        for flame in &self.flames {
            out.push(VisualUpdate::FlameFlicker {
                object: flame.flame,
                scale_y: 0.9 + (t * 7.0).sin() * 0.12,
                rotation_y: t * 0.8,
            });
            out.push(VisualUpdate::LightIntensity {
                object: flame.light,
                intensity: 2.0 + (t * 9.0).sin() * 0.35,
            });
        }

        for spinner in &self.spinners {
            let phase = spinner.seat as f64;
            out.push(VisualUpdate::SpinBob {
                object: spinner.object,
                rotation_y: t * 0.6 + phase * 0.25,
                height: spinner.base_height + (t * 1.6 + phase).sin() * 0.03,
            });
        }

        out
    }
}
