//! Zone gating for pointer picks.
//!
//! Gating contract:
//! - An object with a zone affinity is eligible only while that zone is
//!   current.
//! - Affinity-less zone triggers are eligible only from Home; riding a rail
//!   means walking back to the campfire first.
//! - While a travel tween is in flight the eligible set is empty, so nothing
//!   can be picked mid-flight.
//! - Returned ids are in ascending order.

use crate::interactable::{Interactable, ObjectId};
use crate::world::StoreWorld;
use crate::zones::ZoneId;

/// The subset of world objects a pick may hit right now.
///
/// A zone with no registered interactables yields the empty set; picks there
/// detect nothing, which is a normal outcome, not an error.
pub fn eligible_targets(world: &StoreWorld, current_zone: ZoneId, in_transit: bool) -> Vec<ObjectId> {
    if in_transit {
        return Vec::new();
    }

    world
        .interactables()
        .filter(|&(id, interactable)| match world.affinity(id) {
            Some(zone) => zone == current_zone,
            None => {
                matches!(interactable, Interactable::ZoneTrigger { .. })
                    && current_zone == ZoneId::Home
            }
        })
        .map(|(id, _)| id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::eligible_targets;
    use crate::interactable::{Interactable, ObjectId, ProductInfo};
    use crate::world::StoreWorld;
    use crate::zones::ZoneId;

    fn sample_world() -> (StoreWorld, ObjectId, ObjectId, ObjectId) {
        let mut world = StoreWorld::new();

        let sign = world.spawn();
        world.set_interactable(
            sign,
            Interactable::ZoneTrigger {
                target: ZoneId::Shop,
                label: "SHOP".to_string(),
            },
        );

        let product = world.spawn();
        world.set_interactable(
            product,
            Interactable::Product(ProductInfo {
                id: "p1".to_string(),
                name: "Oak Rune Token".to_string(),
                description: String::new(),
                price: 18.0,
                art_tag: String::new(),
            }),
        );
        world.set_affinity(product, ZoneId::Shop);

        let counter = world.spawn();
        world.set_interactable(counter, Interactable::Checkout);
        world.set_affinity(counter, ZoneId::Shop);

        (world, sign, product, counter)
    }

    #[test]
    fn home_sees_only_zone_triggers() {
        let (world, sign, _, _) = sample_world();
        assert_eq!(eligible_targets(&world, ZoneId::Home, false), vec![sign]);
    }

    #[test]
    fn shop_sees_its_products_and_checkout_but_no_triggers() {
        let (world, _, product, counter) = sample_world();
        assert_eq!(
            eligible_targets(&world, ZoneId::Shop, false),
            vec![product, counter]
        );
    }

    #[test]
    fn zone_without_interactables_is_empty() {
        let (world, _, _, _) = sample_world();
        assert!(eligible_targets(&world, ZoneId::About, false).is_empty());
    }

    #[test]
    fn transit_freezes_the_set_to_empty() {
        let (world, _, _, _) = sample_world();
        assert!(eligible_targets(&world, ZoneId::Home, true).is_empty());
        assert!(eligible_targets(&world, ZoneId::Shop, true).is_empty());
    }
}
