use foundation::bounds::Aabb3;

use crate::interactable::{Interactable, ObjectId};
use crate::zones::ZoneId;

/// Neutral product emissive color.
pub const GLOW_NEUTRAL: u32 = 0x0b1020;
/// Emissive color of the one selected product.
pub const GLOW_HIGHLIGHT: u32 = 0x203060;

/// Emissive state the render layer applies to a product mesh.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Glow {
    pub emissive: u32,
}

impl Glow {
    pub fn neutral() -> Self {
        Self {
            emissive: GLOW_NEUTRAL,
        }
    }

    pub fn highlighted() -> Self {
        Self {
            emissive: GLOW_HIGHLIGHT,
        }
    }
}

/// The storefront world: id-indexed component columns for every object the
/// controller can reason about.
///
/// Objects and their components are created once at world construction and
/// stay immutable for the session, except product glow, which tracks the
/// current selection.
#[derive(Debug, Default)]
pub struct StoreWorld {
    next_index: u32,
    bounds: Vec<Option<Aabb3>>,
    interactables: Vec<Option<Interactable>>,
    affinities: Vec<Option<ZoneId>>,
    glows: Vec<Option<Glow>>,
    highlighted: Option<ObjectId>,
}

impl StoreWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> ObjectId {
        let id = ObjectId(self.next_index);
        self.next_index += 1;
        self.ensure_capacity(id.index() as usize);
        id
    }

    pub fn set_bounds(&mut self, object: ObjectId, bounds: Aabb3) {
        self.ensure_capacity(object.index() as usize);
        self.bounds[object.index() as usize] = Some(bounds);
    }

    pub fn set_interactable(&mut self, object: ObjectId, interactable: Interactable) {
        self.ensure_capacity(object.index() as usize);
        if matches!(interactable, Interactable::Product(_)) {
            self.glows[object.index() as usize] = Some(Glow::neutral());
        }
        self.interactables[object.index() as usize] = Some(interactable);
    }

    /// Which zone must be current for this object to be pickable.
    ///
    /// Zone triggers stay affinity-less; the gate handles them separately.
    pub fn set_affinity(&mut self, object: ObjectId, zone: ZoneId) {
        self.ensure_capacity(object.index() as usize);
        self.affinities[object.index() as usize] = Some(zone);
    }

    pub fn bounds(&self, object: ObjectId) -> Option<Aabb3> {
        self.bounds.get(object.index() as usize).and_then(|b| *b)
    }

    pub fn interactable(&self, object: ObjectId) -> Option<&Interactable> {
        self.interactables
            .get(object.index() as usize)
            .and_then(|i| i.as_ref())
    }

    pub fn affinity(&self, object: ObjectId) -> Option<ZoneId> {
        self.affinities
            .get(object.index() as usize)
            .and_then(|a| *a)
    }

    pub fn glow(&self, object: ObjectId) -> Option<Glow> {
        self.glows.get(object.index() as usize).and_then(|g| *g)
    }

    /// All interactable objects, in ascending id order.
    pub fn interactables(&self) -> impl Iterator<Item = (ObjectId, &Interactable)> {
        self.interactables
            .iter()
            .enumerate()
            .filter_map(|(idx, i)| i.as_ref().map(|i| (ObjectId(idx as u32), i)))
    }

    /// Highlights one product and resets every other product to neutral, so
    /// at most one product is highlighted at any time.
    ///
    /// A no-op for objects without a glow column (non-products).
    pub fn highlight(&mut self, object: ObjectId) {
        if self
            .glows
            .get(object.index() as usize)
            .is_none_or(|g| g.is_none())
        {
            return;
        }
        for glow in self.glows.iter_mut().flatten() {
            *glow = Glow::neutral();
        }
        self.glows[object.index() as usize] = Some(Glow::highlighted());
        self.highlighted = Some(object);
    }

    pub fn clear_highlight(&mut self) {
        for glow in self.glows.iter_mut().flatten() {
            *glow = Glow::neutral();
        }
        self.highlighted = None;
    }

    pub fn highlighted(&self) -> Option<ObjectId> {
        self.highlighted
    }

    /// Product glow states, in ascending id order, for the render layer.
    pub fn glows(&self) -> impl Iterator<Item = (ObjectId, Glow)> + '_ {
        self.glows
            .iter()
            .enumerate()
            .filter_map(|(idx, g)| g.map(|g| (ObjectId(idx as u32), g)))
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.bounds.len() <= idx {
            let new_len = idx + 1;
            self.bounds.resize(new_len, None);
            self.interactables.resize(new_len, None);
            self.affinities.resize(new_len, None);
            self.glows.resize(new_len, None);
        }
    }
}
