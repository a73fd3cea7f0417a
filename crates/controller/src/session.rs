use basket::{Basket, BasketStore};
use foundation::time::Time;
use runtime::{Event, EventBus, EventKind, Frame};
use scene::animators::{IdleAnimators, VisualUpdate};
use scene::camera::{Camera, CameraPose};
use scene::prefabs::Storefront;
use scene::travel::TravelTween;
use scene::world::StoreWorld;
use scene::zones::{ZoneId, ZoneRegistry};

use crate::action::Action;
use crate::overlay::Overlays;
use crate::resolver::{hover_pick, resolve_pick};

/// What one frame tick hands to the render layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TickUpdate {
    pub pose: CameraPose,
    pub visuals: Vec<VisualUpdate>,
    /// Set on the tick a travel tween completes.
    pub arrived: Option<ZoneId>,
}

/// The storefront session: one explicit context object owning every piece of
/// mutable state the controller touches.
///
/// Single writer, single thread. Pointer handlers and the frame tick run
/// atomically with respect to each other, so a travel's close-all-overlays
/// effect is always visible before the next render and a pick can never race
/// a tween's pose update.
pub struct Session {
    zones: ZoneRegistry,
    world: StoreWorld,
    animators: IdleAnimators,
    camera: Camera,
    current_zone: ZoneId,
    tween: Option<TravelTween>,
    overlays: Overlays,
    basket: Basket,
    store: Box<dyn BasketStore>,
    bus: EventBus,
    frame: Frame,
}

impl Session {
    /// Opens a session parked at Home with the basket loaded from `store`.
    pub fn new(
        front: Storefront,
        store: Box<dyn BasketStore>,
        viewport_w: f64,
        viewport_h: f64,
        now: Time,
    ) -> Self {
        let Storefront {
            world,
            zones,
            animators,
        } = front;
        let home = zones.lookup(ZoneId::Home).destination;
        let basket = Basket::load(store.as_ref());
        Self {
            zones,
            world,
            animators,
            camera: Camera::new(home, viewport_w, viewport_h),
            current_zone: ZoneId::Home,
            tween: None,
            overlays: Overlays::new(),
            basket,
            store,
            bus: EventBus::new(),
            frame: Frame::first(now),
        }
    }

    pub fn current_zone(&self) -> ZoneId {
        self.current_zone
    }

    pub fn in_transit(&self) -> bool {
        self.tween.is_some()
    }

    /// HUD label: flips to the destination as soon as travel starts.
    pub fn zone_label(&self) -> &'static str {
        let shown = match &self.tween {
            Some(tween) => tween.destination(),
            None => self.current_zone,
        };
        self.zones.lookup(shown).label
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn world(&self) -> &StoreWorld {
        &self.world
    }

    pub fn overlays(&self) -> &Overlays {
        &self.overlays
    }

    /// Mutable overlay access for the panel close buttons and the book
    /// reader's page controls.
    pub fn overlays_mut(&mut self) -> &mut Overlays {
        &mut self.overlays
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.camera.set_viewport(width, height);
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.bus.drain()
    }

    /// Handles a pointer press, dispatching whatever action it resolves to.
    ///
    /// Returns the resolved action for the shell's benefit; `None` (empty
    /// space, wrong zone, mid-flight) is the frequent, silent outcome.
    pub fn pointer_down(&mut self, x_px: f64, y_px: f64, now: Time) -> Option<Action> {
        let action = resolve_pick(
            x_px,
            y_px,
            &self.camera,
            &self.world,
            self.current_zone,
            self.in_transit(),
        )?;
        self.bus
            .emit(self.frame, EventKind::Pick, action.kind_str());
        self.dispatch(action.clone(), now);
        Some(action)
    }

    /// Hit test for pointer movement: what is under the cursor right now.
    ///
    /// Drives the cursor affordance in the shell; nothing is dispatched and
    /// no state changes.
    pub fn pointer_move(&self, x_px: f64, y_px: f64) -> Option<scene::interactable::ObjectId> {
        hover_pick(
            x_px,
            y_px,
            &self.camera,
            &self.world,
            self.current_zone,
            self.in_transit(),
        )
        .map(|hit| hit.object)
    }

    /// Applies one action. Exhaustive over the action enum.
    pub fn dispatch(&mut self, action: Action, now: Time) {
        match action {
            Action::Travel(zone) => self.begin_travel(zone, now),
            Action::OpenBasket => {
                self.overlays.open_basket();
                self.bus.emit(self.frame, EventKind::Overlay, "basket open");
            }
            Action::SelectProduct { object, product } => {
                self.world.highlight(object);
                self.bus.emit(
                    self.frame,
                    EventKind::Overlay,
                    format!("product {} selected", product.id),
                );
                self.overlays.open_product(product);
            }
            Action::OpenBook(book) => {
                self.bus.emit(
                    self.frame,
                    EventKind::Overlay,
                    format!("book \"{}\" opened", book.title),
                );
                self.overlays.open_book(book);
            }
        }
    }

    /// Travel requested by zone name from the UI surface (the home button).
    ///
    /// Unknown names are silently ignored; nothing navigates.
    pub fn travel_by_name(&mut self, name: &str, now: Time) {
        if let Some(zone) = ZoneId::from_name(name) {
            self.begin_travel(zone, now);
        }
    }

    fn begin_travel(&mut self, zone: ZoneId, now: Time) {
        // Overlays close at travel start, not completion; the selection and
        // highlight go with them.
        self.overlays.close_all();
        self.world.clear_highlight();
        self.bus.emit(
            self.frame,
            EventKind::Travel,
            format!("{} -> {}", self.current_zone.name(), zone.name()),
        );
        // The tween starts from the live pose, so interrupting an in-flight
        // tween continues smoothly instead of snapping.
        self.tween = Some(TravelTween::begin(
            self.camera.pose,
            self.zones.lookup(zone),
            now,
        ));
    }

    /// Per-frame tick: advances the travel tween and the idle animators.
    pub fn tick(&mut self, now: Time) -> TickUpdate {
        self.frame = self.frame.advance(now);

        let mut arrived = None;
        if let Some(tween) = self.tween {
            let (pose, finished) = tween.advance(now);
            self.camera.pose = pose;
            if finished {
                self.current_zone = tween.destination();
                self.tween = None;
                arrived = Some(self.current_zone);
                self.bus.emit(
                    self.frame,
                    EventKind::Arrival,
                    self.current_zone.name(),
                );
            }
        }

        TickUpdate {
            pose: self.camera.pose,
            visuals: self.animators.advance(now),
            arrived,
        }
    }

    /// Adds the selected product to the basket, persists, and makes sure the
    /// basket panel is showing.
    ///
    /// Returns `false` when no product is selected.
    pub fn add_selected_to_basket(&mut self) -> bool {
        let Some(product) = self.overlays.selected().cloned() else {
            return false;
        };
        self.basket.add(&product.id, &product.name, product.price);
        self.bus.emit(
            self.frame,
            EventKind::Basket,
            format!("add {}", product.id),
        );
        self.persist_basket();
        self.overlays.open_basket();
        true
    }

    pub fn increment_line(&mut self, index: usize) {
        if self.basket.increment(index) {
            self.bus
                .emit(self.frame, EventKind::Basket, format!("increment {index}"));
            self.persist_basket();
        }
    }

    pub fn decrement_line(&mut self, index: usize) {
        if self.basket.decrement(index) {
            self.bus
                .emit(self.frame, EventKind::Basket, format!("decrement {index}"));
            self.persist_basket();
        }
    }

    /// Every mutation writes the whole basket back to the external store.
    /// A failed write degrades to in-memory operation for this session.
    fn persist_basket(&mut self) {
        let outcome = self
            .basket
            .to_stored()
            .and_then(|raw| self.store.save(&raw));
        if let Err(err) = outcome {
            self.bus
                .emit(self.frame, EventKind::Storage, err.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::action::Action;
    use basket::{BasketError, BasketStore, InMemoryBasketStore};
    use foundation::math::Vec3;
    use foundation::time::Time;
    use runtime::EventKind;
    use scene::interactable::Interactable;
    use scene::prefabs::storefront;
    use scene::travel::TRAVEL_DURATION_S;
    use scene::world::GLOW_HIGHLIGHT;
    use scene::zones::ZoneId;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Store whose backing string stays inspectable after the session takes
    /// ownership of the box.
    #[derive(Clone, Default)]
    struct SharedStore {
        raw: Rc<RefCell<Option<String>>>,
    }

    impl BasketStore for SharedStore {
        fn load(&self) -> Result<Option<String>, BasketError> {
            Ok(self.raw.borrow().clone())
        }

        fn save(&mut self, raw: &str) -> Result<(), BasketError> {
            *self.raw.borrow_mut() = Some(raw.to_string());
            Ok(())
        }
    }

    fn session() -> Session {
        Session::new(
            storefront(),
            Box::new(InMemoryBasketStore::new()),
            1280.0,
            720.0,
            Time(0.0),
        )
    }

    /// Screen-projects the center of the first eligible object matching
    /// `pred` in the given zone.
    fn projected_center(
        session: &Session,
        zone: ZoneId,
        pred: impl Fn(&Interactable) -> bool,
    ) -> (f64, f64) {
        let world = session.world();
        let target = scene::gate::eligible_targets(world, zone, false)
            .into_iter()
            .find(|id| world.interactable(*id).is_some_and(&pred))
            .expect("zone has a matching object");
        let center = world.bounds(target).expect("pick bounds").center();
        session
            .camera()
            .project(center)
            .expect("object in front of camera")
    }

    #[test]
    fn starts_parked_at_home() {
        let s = session();
        assert_eq!(s.current_zone(), ZoneId::Home);
        assert!(!s.in_transit());
        assert_eq!(s.zone_label(), "Home");
    }

    #[test]
    fn travel_flips_zone_only_on_completion() {
        let mut s = session();
        s.dispatch(Action::Travel(ZoneId::Shop), Time(1.0));

        assert!(s.in_transit());
        assert_eq!(s.current_zone(), ZoneId::Home);
        assert_eq!(s.zone_label(), "Shop (Cabin)");

        let mid = s.tick(Time(1.0 + TRAVEL_DURATION_S / 2.0));
        assert!(mid.arrived.is_none());
        assert_eq!(s.current_zone(), ZoneId::Home);

        let done = s.tick(Time(1.0 + TRAVEL_DURATION_S));
        assert_eq!(done.arrived, Some(ZoneId::Shop));
        assert_eq!(s.current_zone(), ZoneId::Shop);
        assert!(!s.in_transit());
        let shop_dest = Vec3::new(-10.0, 1.7, 6.0);
        assert_eq!(done.pose.position, shop_dest);
    }

    #[test]
    fn travel_closes_every_overlay() {
        let mut s = session();
        // Contrived pre-state: all three panels open at once.
        let product = scene::interactable::ProductInfo {
            id: "p1".to_string(),
            name: "Oak Rune Token".to_string(),
            description: String::new(),
            price: 18.0,
            art_tag: String::new(),
        };
        let book = scene::interactable::BookInfo {
            title: "t".to_string(),
            date: "d".to_string(),
            pages: vec!["p".to_string()],
        };
        s.overlays_mut().open_product(product);
        s.overlays_mut().open_book(book);
        s.overlays_mut().open_basket();

        s.dispatch(Action::Travel(ZoneId::About), Time(0.5));

        assert!(!s.overlays().product_open());
        assert!(!s.overlays().basket_open());
        assert!(!s.overlays().book_open());
        assert!(s.overlays().selected().is_none());
        assert!(s.overlays().reader().is_none());
    }

    #[test]
    fn picks_resolve_to_nothing_while_in_transit() {
        let mut s = session();
        let (x, y) = projected_center(&s, ZoneId::Home, |i| {
            matches!(i, Interactable::ZoneTrigger { .. })
        });
        assert!(s.pointer_move(x, y).is_some());
        s.dispatch(Action::Travel(ZoneId::Shop), Time(0.0));
        assert!(s.pointer_down(x, y, Time(0.5)).is_none());
        assert!(s.pointer_move(x, y).is_none());
    }

    #[test]
    fn interrupting_travel_continues_from_the_live_pose() {
        let mut s = session();
        s.dispatch(Action::Travel(ZoneId::Shop), Time(0.0));
        let mid = s.tick(Time(0.8));

        // Change of heart mid-flight: the new tween starts where the camera
        // actually is, not at either zone's nominal pose.
        s.dispatch(Action::Travel(ZoneId::Library), Time(0.8));
        let restart = s.tick(Time(0.8));
        assert_eq!(restart.pose, mid.pose);

        let done = s.tick(Time(0.8 + TRAVEL_DURATION_S));
        assert_eq!(done.arrived, Some(ZoneId::Library));
    }

    #[test]
    fn unknown_zone_names_are_silently_ignored() {
        let mut s = session();
        s.travel_by_name("basement", Time(0.0));
        assert!(!s.in_transit());
        s.travel_by_name("home", Time(0.0));
        assert!(s.in_transit());
    }

    #[test]
    fn basket_mutations_persist_to_the_store() {
        let shared = SharedStore::default();
        let mut s = Session::new(
            storefront(),
            Box::new(shared.clone()),
            1280.0,
            720.0,
            Time(0.0),
        );

        s.overlays_mut().open_product(scene::interactable::ProductInfo {
            id: "p1".to_string(),
            name: "Oak Rune Token".to_string(),
            description: String::new(),
            price: 18.0,
            art_tag: String::new(),
        });
        assert!(s.add_selected_to_basket());
        assert!(s.overlays().basket_open());

        let raw = shared.raw.borrow().clone().expect("saved after add");
        assert!(raw.contains("\"p1\""));

        s.decrement_line(0);
        let raw = shared.raw.borrow().clone().expect("saved after decrement");
        assert_eq!(raw, "[]");
    }

    #[test]
    fn basket_loads_from_the_store_at_session_start() {
        let shared = SharedStore::default();
        *shared.raw.borrow_mut() = Some(
            r#"[{"id":"p4","name":"Ash Key Fob","unit_price":9.0,"qty":3}]"#.to_string(),
        );
        let s = Session::new(
            storefront(),
            Box::new(shared),
            1280.0,
            720.0,
            Time(0.0),
        );
        assert_eq!(s.basket().len(), 1);
        assert_eq!(s.basket().total(), 27.0);
    }

    #[test]
    fn add_without_selection_is_a_no_op() {
        let mut s = session();
        assert!(!s.add_selected_to_basket());
        assert!(s.basket().is_empty());
        assert!(!s.overlays().basket_open());
    }

    #[test]
    fn full_shopping_trip() {
        let mut s = session();

        // Pick the shop sign from home.
        let (x, y) = projected_center(&s, ZoneId::Home, |i| {
            matches!(i, Interactable::ZoneTrigger { target, .. } if *target == ZoneId::Shop)
        });
        let action = s.pointer_down(x, y, Time(0.0));
        assert_eq!(action, Some(Action::Travel(ZoneId::Shop)));

        // Ride the rail.
        let done = s.tick(Time(TRAVEL_DURATION_S));
        assert_eq!(done.arrived, Some(ZoneId::Shop));

        // Pick the token off the shelf.
        let (x, y) = projected_center(&s, ZoneId::Shop, |i| {
            matches!(i, Interactable::Product(p) if p.name == "Oak Rune Token")
        });
        let action = s.pointer_down(x, y, Time(TRAVEL_DURATION_S + 0.1));
        let Some(Action::SelectProduct { object, product }) = action else {
            panic!("expected a product selection, got {action:?}");
        };
        assert_eq!(product.name, "Oak Rune Token");
        assert_eq!(product.price, 18.0);
        assert!(s.overlays().product_open());
        assert_eq!(s.world().glow(object).unwrap().emissive, GLOW_HIGHLIGHT);

        // Add to basket.
        assert!(s.add_selected_to_basket());
        assert_eq!(s.basket().len(), 1);
        assert_eq!(s.basket().lines()[0].qty, 1);
        assert_eq!(s.basket().total(), 18.0);
        assert!(s.overlays().basket_open());

        // The trip left a travel, an arrival, picks, and a basket mutation
        // on the bus.
        let kinds: Vec<EventKind> = s.drain_events().into_iter().map(|e| e.kind).collect();
        assert!(kinds.contains(&EventKind::Travel));
        assert!(kinds.contains(&EventKind::Arrival));
        assert!(kinds.contains(&EventKind::Pick));
        assert!(kinds.contains(&EventKind::Basket));
    }
}
