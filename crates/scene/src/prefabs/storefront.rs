//! The canned demo storefront: placeholder catalog, library, and campfire.
//!
//! Geometry here is interaction geometry only: pick bounds sized to the
//! meshes the render layer draws. The meshes themselves live in the render
//! layer.

use foundation::bounds::Aabb3;
use foundation::math::Vec3;

use crate::animators::{FlamePulse, IdleAnimators, SpinBob};
use crate::interactable::{BookInfo, Interactable, ProductInfo};
use crate::world::StoreWorld;
use crate::zones::{ZoneId, ZoneRegistry};

/// Everything the controller needs to run the demo world.
#[derive(Debug)]
pub struct Storefront {
    pub world: StoreWorld,
    pub zones: ZoneRegistry,
    pub animators: IdleAnimators,
}

/// Height of a sign face above its ground anchor.
const SIGN_LIFT: f64 = 1.35;
/// Shelf height for product centers.
const PRODUCT_HEIGHT: f64 = 1.55;

pub fn storefront() -> Storefront {
    let mut world = StoreWorld::new();
    let mut animators = IdleAnimators::new();

    // In-world signs ride the camera rails. Pickable from Home only; the
    // HUD's home button covers the trip back.
    add_sign(&mut world, "SHOP", ZoneId::Shop, Vec3::new(-6.0, 0.0, 3.0));
    add_sign(&mut world, "BLOG", ZoneId::Library, Vec3::new(6.0, 0.0, 3.0));
    add_sign(&mut world, "ABOUT", ZoneId::About, Vec3::new(0.0, 0.0, -6.0));

    // Shelf products near the cabin.
    for (seat, product) in demo_products().into_iter().enumerate() {
        let center = Vec3::new(-12.5 + seat as f64 * 1.2, PRODUCT_HEIGHT, 2.6);
        let id = world.spawn();
        world.set_bounds(id, Aabb3::centered(center, Vec3::new(0.35, 0.35, 0.35)));
        world.set_interactable(id, Interactable::Product(product));
        world.set_affinity(id, ZoneId::Shop);
        animators.register_spinner(SpinBob {
            object: id,
            seat,
            base_height: PRODUCT_HEIGHT,
        });
    }

    // The glowing cabin door doubles as the checkout counter.
    let checkout = world.spawn();
    world.set_bounds(
        checkout,
        Aabb3::centered(Vec3::new(-10.0, 1.2, 2.11), Vec3::new(0.65, 1.0, 0.1)),
    );
    world.set_interactable(checkout, Interactable::Checkout);
    world.set_affinity(checkout, ZoneId::Shop);

    // Readable books on the library shelves.
    for (slot, book) in demo_books().into_iter().enumerate() {
        let center = Vec3::new(
            10.0 - 2.4 + slot as f64 * 1.65,
            1.05 + (slot % 2) as f64 * 0.85,
            0.35,
        );
        let id = world.spawn();
        world.set_bounds(id, Aabb3::centered(center, Vec3::new(0.18, 0.3, 0.09)));
        world.set_interactable(id, Interactable::Book(book));
        world.set_affinity(id, ZoneId::Library);
    }

    // Campfire flame + its point light, registered for idle flicker.
    let flame = world.spawn();
    world.set_bounds(
        flame,
        Aabb3::centered(Vec3::new(0.0, 0.55, 0.0), Vec3::new(0.22, 0.3, 0.22)),
    );
    let fire_light = world.spawn();
    animators.register_flame(FlamePulse {
        flame,
        light: fire_light,
    });

    Storefront {
        world,
        zones: ZoneRegistry::storefront(),
        animators,
    }
}

fn add_sign(world: &mut StoreWorld, label: &str, target: ZoneId, anchor: Vec3) {
    let id = world.spawn();
    world.set_bounds(
        id,
        Aabb3::centered(
            anchor + Vec3::new(0.0, SIGN_LIFT, 0.0),
            Vec3::new(1.1, 0.55, 0.075),
        ),
    );
    world.set_interactable(
        id,
        Interactable::ZoneTrigger {
            target,
            label: label.to_string(),
        },
    );
}

fn demo_products() -> Vec<ProductInfo> {
    let entries = [
        (
            "p1",
            "Oak Rune Token",
            "Hand-finished oak token with carved symbol.",
            18.0,
            "WOODCRAFT_01",
        ),
        (
            "p2",
            "Walnut Mini Totem",
            "Small walnut carving, matte oil finish.",
            25.0,
            "WOODCRAFT_02",
        ),
        (
            "p3",
            "Maple Desk Charm",
            "Minimal charm piece for desk or shelf.",
            12.0,
            "WOODCRAFT_03",
        ),
        (
            "p4",
            "Ash Key Fob",
            "Simple key fob, durable and light.",
            9.0,
            "WOODCRAFT_04",
        ),
        (
            "p5",
            "Custom Sigil Block",
            "Commission block — your design, your vibe.",
            45.0,
            "CUSTOM_SIGIL",
        ),
    ];

    entries
        .into_iter()
        .map(|(id, name, description, price, art_tag)| ProductInfo {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price,
            art_tag: art_tag.to_string(),
        })
        .collect()
}

fn demo_books() -> Vec<BookInfo> {
    vec![
        BookInfo {
            title: "Seasoning Green Oak".to_string(),
            date: "2024-03-12".to_string(),
            pages: vec![
                "Fresh-cut oak wants a year in the stack before it goes under the knife. \
                 Rushing it means checks and warps once the piece reaches a heated room."
                    .to_string(),
                "Stack with stickers between each board, out of direct sun, and weight the \
                 top. Patience is most of the craft."
                    .to_string(),
            ],
        },
        BookInfo {
            title: "Why Every Token Is Different".to_string(),
            date: "2024-05-02".to_string(),
            pages: vec![
                "No two blanks share a grain, so no two tokens take the carve the same way. \
                 The symbol bends a little to follow the wood."
                    .to_string(),
                "That variance is the point. A cast trinket is identical a thousand times; \
                 a carved one happened exactly once."
                    .to_string(),
                "If your token's rune sits slightly off-center, that was the grain's call, \
                 not a slipped gouge."
                    .to_string(),
            ],
        },
        BookInfo {
            title: "Notes From the Winter Bench".to_string(),
            date: "2024-11-20".to_string(),
            pages: vec![
                "Cold slows the oil cure, so winter pieces sit by the stove for a week \
                 before they ship. The shop smells like linseed until spring."
                    .to_string(),
            ],
        },
    ]
}
