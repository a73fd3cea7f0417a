use foundation::math::Vec3;

use crate::camera::CameraPose;

/// Named region of the world with one fixed camera destination.
///
/// Checkout is an action, not a zone; the basket overlay opens in place.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ZoneId {
    Home,
    Shop,
    Library,
    About,
}

impl ZoneId {
    pub const ALL: [ZoneId; 4] = [ZoneId::Home, ZoneId::Shop, ZoneId::Library, ZoneId::About];

    /// UI-boundary lookup. Unknown names yield `None`; callers treat that as
    /// "no navigation", never as an error.
    pub fn from_name(name: &str) -> Option<ZoneId> {
        match name {
            "home" => Some(ZoneId::Home),
            "shop" => Some(ZoneId::Shop),
            "library" => Some(ZoneId::Library),
            "about" => Some(ZoneId::About),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ZoneId::Home => "home",
            ZoneId::Shop => "shop",
            ZoneId::Library => "library",
            ZoneId::About => "about",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Zone {
    pub id: ZoneId,
    pub label: &'static str,
    pub destination: CameraPose,
}

/// Static table of zones, read-only after construction.
#[derive(Debug, Clone)]
pub struct ZoneRegistry {
    zones: [Zone; 4],
}

impl ZoneRegistry {
    /// The canonical storefront layout: home campfire at the origin, cabin to
    /// the west, library to the east, plinth to the north.
    pub fn storefront() -> Self {
        Self {
            zones: [
                Zone {
                    id: ZoneId::Home,
                    label: "Home",
                    destination: CameraPose::new(
                        Vec3::new(0.0, 1.7, 8.0),
                        Vec3::new(0.0, 1.4, 0.0),
                    ),
                },
                Zone {
                    id: ZoneId::Shop,
                    label: "Shop (Cabin)",
                    destination: CameraPose::new(
                        Vec3::new(-10.0, 1.7, 6.0),
                        Vec3::new(-10.0, 1.4, 0.0),
                    ),
                },
                Zone {
                    id: ZoneId::Library,
                    label: "Library (Blog)",
                    destination: CameraPose::new(
                        Vec3::new(10.0, 1.7, 6.0),
                        Vec3::new(10.0, 1.4, 0.0),
                    ),
                },
                Zone {
                    id: ZoneId::About,
                    label: "About",
                    destination: CameraPose::new(
                        Vec3::new(0.0, 1.7, -8.0),
                        Vec3::new(0.0, 1.4, -14.0),
                    ),
                },
            ],
        }
    }

    pub fn lookup(&self, id: ZoneId) -> &Zone {
        // Entries are stored in ZoneId::ALL order, so the lookup is total.
        &self.zones[id as usize]
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }
}

#[cfg(test)]
mod tests {
    use super::{ZoneId, ZoneRegistry};

    #[test]
    fn lookup_covers_every_zone() {
        let reg = ZoneRegistry::storefront();
        for id in ZoneId::ALL {
            let zone = reg.lookup(id);
            assert_eq!(zone.id, id);
            assert!(!zone.label.is_empty());
        }
    }

    #[test]
    fn from_name_round_trips_known_zones() {
        for id in ZoneId::ALL {
            assert_eq!(ZoneId::from_name(id.name()), Some(id));
        }
    }

    #[test]
    fn from_name_rejects_unknown() {
        assert_eq!(ZoneId::from_name("checkout"), None);
        assert_eq!(ZoneId::from_name(""), None);
        assert_eq!(ZoneId::from_name("Home"), None);
    }

    #[test]
    fn destinations_are_distinct() {
        let reg = ZoneRegistry::storefront();
        for a in ZoneId::ALL {
            for b in ZoneId::ALL {
                if a != b {
                    assert_ne!(
                        reg.lookup(a).destination.position,
                        reg.lookup(b).destination.position
                    );
                }
            }
        }
    }
}
