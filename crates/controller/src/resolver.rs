use scene::camera::Camera;
use scene::gate::eligible_targets;
use scene::interactable::Interactable;
use scene::picking::{PickHit, pick_ray};
use scene::world::StoreWorld;
use scene::zones::ZoneId;

use crate::action::Action;

/// Hit test against the zone-gated eligible set.
///
/// Shared by press resolution and hover (cursor affordance). The ray is
/// cast against the eligible set only, never the full world, so an object
/// in another zone can never be hit even when it is the nearest geometry
/// under the pointer.
pub fn hover_pick(
    x_px: f64,
    y_px: f64,
    camera: &Camera,
    world: &StoreWorld,
    current_zone: ZoneId,
    in_transit: bool,
) -> Option<PickHit> {
    let eligible = eligible_targets(world, current_zone, in_transit);
    if eligible.is_empty() {
        return None;
    }
    let ray = camera.screen_ray(x_px, y_px)?;
    pick_ray(world, ray, &eligible)
}

/// Resolves a pointer press to at most one action. Misses are silent.
pub fn resolve_pick(
    x_px: f64,
    y_px: f64,
    camera: &Camera,
    world: &StoreWorld,
    current_zone: ZoneId,
    in_transit: bool,
) -> Option<Action> {
    let hit = hover_pick(x_px, y_px, camera, world, current_zone, in_transit)?;

    match world.interactable(hit.object)? {
        Interactable::ZoneTrigger { target, .. } => Some(Action::Travel(*target)),
        Interactable::Checkout => Some(Action::OpenBasket),
        Interactable::Product(product) => Some(Action::SelectProduct {
            object: hit.object,
            product: product.clone(),
        }),
        Interactable::Book(book) => Some(Action::OpenBook(book.clone())),
    }
}
