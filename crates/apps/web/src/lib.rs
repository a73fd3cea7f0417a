//! Browser shell for the storefront controller.
//!
//! The render layer (JS) owns meshes, materials, and the canvas. This crate
//! owns the session: pointer events come in as viewport pixels, camera poses
//! and visual updates go out as JSON once per animation frame, and UI
//! snapshots feed the overlay panels.

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use wasm_bindgen::prelude::*;

use basket::{BASKET_STORAGE_KEY, BasketStore, InMemoryBasketStore, format_price};
use controller::Session;
use foundation::time::Time;
use runtime::Event;
use scene::animators::VisualUpdate;
use scene::camera::CameraPose;
use scene::interactable::Interactable;
use scene::prefabs::storefront;

static INITIALIZED: AtomicBool = AtomicBool::new(false);

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

fn with_session<F, R>(f: F) -> Result<R, JsValue>
where
    F: FnOnce(&mut Session) -> R,
{
    SESSION.with(|cell| {
        let mut slot = cell.borrow_mut();
        let session = slot
            .as_mut()
            .ok_or_else(|| JsValue::from_str("session not initialized"))?;
        Ok(f(session))
    })
}

fn init_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        web_sys::console::error_1(&JsValue::from_str(&info.to_string()));
    }));
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Avoid double-initialization (can happen during hot-reload edge cases).
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    init_panic_hook();
    Ok(())
}

fn basket_store() -> Box<dyn BasketStore> {
    #[cfg(target_arch = "wasm32")]
    {
        match basket::LocalStorageBasketStore::new(BASKET_STORAGE_KEY) {
            Ok(store) => return Box::new(store),
            Err(err) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!(
                    "basket storage unavailable, running in-memory: {err}"
                )));
            }
        }
    }
    let _ = BASKET_STORAGE_KEY;
    Box::new(InMemoryBasketStore::new())
}

/// Builds the session parked at Home. Must run before any other export.
#[wasm_bindgen]
pub fn init_session(viewport_w: f64, viewport_h: f64, now_ms: f64) -> Result<(), JsValue> {
    let session = Session::new(
        storefront(),
        basket_store(),
        viewport_w,
        viewport_h,
        Time::from_millis(now_ms),
    );
    SESSION.with(|cell| {
        *cell.borrow_mut() = Some(session);
    });
    Ok(())
}

#[wasm_bindgen]
pub fn set_canvas_size(width: f64, height: f64) -> Result<(), JsValue> {
    with_session(|s| s.set_viewport(width, height))
}

/// Pointer press at viewport pixels.
///
/// Returns `{picked: bool, action?: string}`; a miss is the frequent,
/// expected outcome and carries no action.
#[wasm_bindgen]
pub fn pointer_down(x_px: f64, y_px: f64, now_ms: f64) -> Result<JsValue, JsValue> {
    let action = with_session(|s| {
        s.pointer_down(x_px, y_px, Time::from_millis(now_ms))
            .map(|a| a.kind_str())
    })?;
    let out = js_sys::Object::new();
    match action {
        Some(kind) => {
            js_sys::Reflect::set(&out, &JsValue::from_str("picked"), &JsValue::TRUE)?;
            js_sys::Reflect::set(&out, &JsValue::from_str("action"), &JsValue::from_str(kind))?;
        }
        None => {
            js_sys::Reflect::set(&out, &JsValue::from_str("picked"), &JsValue::FALSE)?;
        }
    }
    Ok(out.into())
}

/// Pointer move hit test: `true` when a pickable object is under the
/// cursor, so the shell can swap the cursor style.
#[wasm_bindgen]
pub fn pointer_move(x_px: f64, y_px: f64) -> Result<bool, JsValue> {
    with_session(|s| s.pointer_move(x_px, y_px).is_some())
}

/// One animation-frame tick: advances travel and idle animations, drains the
/// event bus to the console, and returns the frame's render payload as JSON.
#[wasm_bindgen]
pub fn tick(now_ms: f64) -> Result<String, JsValue> {
    let (json, events) = with_session(|s| {
        let json = tick_json(s, Time::from_millis(now_ms));
        (json, s.drain_events())
    })?;
    for event in &events {
        log_event(event);
    }
    json.map_err(|e| JsValue::from_str(&e))
}

/// Overlay/HUD snapshot as JSON; the DOM layer renders it verbatim.
#[wasm_bindgen]
pub fn ui_state() -> Result<String, JsValue> {
    with_session(|s| ui_json(s))?.map_err(|e| JsValue::from_str(&e))
}

/// One-time description of every interactable, so the render layer can bind
/// meshes to object ids.
#[wasm_bindgen]
pub fn scene_manifest() -> Result<String, JsValue> {
    with_session(|s| manifest_json(s))?.map_err(|e| JsValue::from_str(&e))
}

/// Travel requested from the HUD (the home button). Unknown zone names do
/// nothing.
#[wasm_bindgen]
pub fn travel_to(zone_name: &str, now_ms: f64) -> Result<(), JsValue> {
    with_session(|s| s.travel_by_name(zone_name, Time::from_millis(now_ms)))
}

#[wasm_bindgen]
pub fn add_selected_to_basket() -> Result<bool, JsValue> {
    with_session(|s| s.add_selected_to_basket())
}

#[wasm_bindgen]
pub fn increment_basket_line(index: usize) -> Result<(), JsValue> {
    with_session(|s| s.increment_line(index))
}

#[wasm_bindgen]
pub fn decrement_basket_line(index: usize) -> Result<(), JsValue> {
    with_session(|s| s.decrement_line(index))
}

#[wasm_bindgen]
pub fn open_basket_panel() -> Result<(), JsValue> {
    with_session(|s| s.overlays_mut().open_basket())
}

#[wasm_bindgen]
pub fn close_basket_panel() -> Result<(), JsValue> {
    with_session(|s| s.overlays_mut().close_basket())
}

#[wasm_bindgen]
pub fn close_product_panel() -> Result<(), JsValue> {
    with_session(|s| s.overlays_mut().close_product())
}

#[wasm_bindgen]
pub fn close_book_panel() -> Result<(), JsValue> {
    with_session(|s| s.overlays_mut().close_book())
}

#[wasm_bindgen]
pub fn book_next_page() -> Result<(), JsValue> {
    with_session(|s| {
        if let Some(reader) = s.overlays_mut().reader_mut() {
            reader.next_page();
        }
    })
}

#[wasm_bindgen]
pub fn book_prev_page() -> Result<(), JsValue> {
    with_session(|s| {
        if let Some(reader) = s.overlays_mut().reader_mut() {
            reader.prev_page();
        }
    })
}

fn log_event(event: &Event) {
    web_sys::console::log_1(&JsValue::from_str(&format!(
        "[{}#{}] {}",
        event.kind.as_str(),
        event.frame_index,
        event.message
    )));
}

// ---- JSON payloads ---------------------------------------------------------

#[derive(Serialize)]
struct PoseJs {
    position: [f64; 3],
    look_at: [f64; 3],
}

impl From<CameraPose> for PoseJs {
    fn from(pose: CameraPose) -> Self {
        Self {
            position: [pose.position.x, pose.position.y, pose.position.z],
            look_at: [pose.look_at.x, pose.look_at.y, pose.look_at.z],
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum VisualJs {
    FlameFlicker {
        object: u32,
        scale_y: f64,
        rotation_y: f64,
    },
    LightIntensity {
        object: u32,
        intensity: f64,
    },
    SpinBob {
        object: u32,
        rotation_y: f64,
        height: f64,
    },
}

impl From<VisualUpdate> for VisualJs {
    fn from(update: VisualUpdate) -> Self {
        match update {
            VisualUpdate::FlameFlicker {
                object,
                scale_y,
                rotation_y,
            } => VisualJs::FlameFlicker {
                object: object.index(),
                scale_y,
                rotation_y,
            },
            VisualUpdate::LightIntensity { object, intensity } => VisualJs::LightIntensity {
                object: object.index(),
                intensity,
            },
            VisualUpdate::SpinBob {
                object,
                rotation_y,
                height,
            } => VisualJs::SpinBob {
                object: object.index(),
                rotation_y,
                height,
            },
        }
    }
}

#[derive(Serialize)]
struct GlowJs {
    object: u32,
    emissive: u32,
}

#[derive(Serialize)]
struct TickJs {
    pose: PoseJs,
    visuals: Vec<VisualJs>,
    glows: Vec<GlowJs>,
    arrived: Option<&'static str>,
    zone_label: &'static str,
    in_transit: bool,
}

fn tick_json(session: &mut Session, now: Time) -> Result<String, String> {
    let update = session.tick(now);
    let payload = TickJs {
        pose: update.pose.into(),
        visuals: update.visuals.into_iter().map(VisualJs::from).collect(),
        glows: session
            .world()
            .glows()
            .map(|(object, glow)| GlowJs {
                object: object.index(),
                emissive: glow.emissive,
            })
            .collect(),
        arrived: update.arrived.map(|z| z.name()),
        zone_label: session.zone_label(),
        in_transit: session.in_transit(),
    };
    serde_json::to_string(&payload).map_err(|e| e.to_string())
}

#[derive(Serialize)]
struct ProductPanelJs {
    name: String,
    description: String,
    price: String,
    art_tag: String,
}

#[derive(Serialize)]
struct BookPanelJs {
    title: String,
    date: String,
    page: usize,
    page_count: usize,
    page_text: String,
}

#[derive(Serialize)]
struct BasketRowJs {
    name: String,
    unit_price: String,
    qty: u32,
}

#[derive(Serialize)]
struct UiJs {
    zone_label: &'static str,
    in_transit: bool,
    product_open: bool,
    basket_open: bool,
    book_open: bool,
    product: Option<ProductPanelJs>,
    book: Option<BookPanelJs>,
    basket: Vec<BasketRowJs>,
    basket_total: String,
}

fn ui_json(session: &Session) -> Result<String, String> {
    let overlays = session.overlays();
    let payload = UiJs {
        zone_label: session.zone_label(),
        in_transit: session.in_transit(),
        product_open: overlays.product_open(),
        basket_open: overlays.basket_open(),
        book_open: overlays.book_open(),
        product: overlays.selected().map(|p| ProductPanelJs {
            name: p.name.clone(),
            description: p.description.clone(),
            price: format_price(p.price),
            art_tag: p.art_tag.clone(),
        }),
        book: overlays.reader().map(|r| BookPanelJs {
            title: r.title().to_string(),
            date: r.date().to_string(),
            page: r.page(),
            page_count: r.page_count(),
            page_text: r.page_text().to_string(),
        }),
        basket: session
            .basket()
            .lines()
            .iter()
            .map(|line| BasketRowJs {
                name: line.name.clone(),
                unit_price: format_price(line.unit_price),
                qty: line.qty,
            })
            .collect(),
        basket_total: format_price(session.basket().total()),
    };
    serde_json::to_string(&payload).map_err(|e| e.to_string())
}

#[derive(Serialize)]
struct ManifestEntryJs {
    object: u32,
    kind: &'static str,
    label: Option<String>,
    center: [f64; 3],
    half_extents: [f64; 3],
}

fn manifest_json(session: &Session) -> Result<String, String> {
    let world = session.world();
    let entries: Vec<ManifestEntryJs> = world
        .interactables()
        .filter_map(|(id, interactable)| {
            let bounds = world.bounds(id)?;
            let center = bounds.center();
            let half = bounds.max - center;
            let label = match interactable {
                Interactable::ZoneTrigger { label, .. } => Some(label.clone()),
                Interactable::Product(p) => Some(p.name.clone()),
                Interactable::Book(b) => Some(b.title.clone()),
                Interactable::Checkout => None,
            };
            Some(ManifestEntryJs {
                object: id.index(),
                kind: interactable.kind_str(),
                label,
                center: [center.x, center.y, center.z],
                half_extents: [half.x, half.y, half.z],
            })
        })
        .collect();
    serde_json::to_string(&entries).map_err(|e| e.to_string())
}
