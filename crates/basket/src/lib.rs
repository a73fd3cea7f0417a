use serde::{Deserialize, Serialize};

/// Key the serialized basket lives under in the external store.
pub const BASKET_STORAGE_KEY: &str = "emberwood.basket";

/// One product-and-quantity entry in the persisted basket.
///
/// Encoded with tagged fields (not positionally), so the stored form
/// survives reordering and added fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketLine {
    pub id: String,
    pub name: String,
    pub unit_price: f64,
    pub qty: u32,
}

/// The basket: lines in insertion order, quantity >= 1 for every line.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Basket {
    lines: Vec<BasketLine>,
}

impl Basket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a stored basket string.
    ///
    /// Malformed text is an empty basket, not an error; the previous session
    /// may have been written by a newer or older revision.
    pub fn from_stored(raw: &str) -> Self {
        let lines = serde_json::from_str::<Vec<BasketLine>>(raw).unwrap_or_default();
        // Persisted quantities of zero would break the line invariant.
        let lines = lines.into_iter().filter(|l| l.qty >= 1).collect();
        Self { lines }
    }

    /// Loads from the external store; absent or unreadable means empty.
    pub fn load(store: &dyn BasketStore) -> Self {
        match store.load() {
            Ok(Some(raw)) => Self::from_stored(&raw),
            Ok(None) | Err(_) => Self::new(),
        }
    }

    pub fn to_stored(&self) -> Result<String, BasketError> {
        serde_json::to_string(&self.lines).map_err(|e| BasketError::Io(e.to_string()))
    }

    /// Adds one unit of a product: existing line bumps its quantity, new
    /// products append a line with quantity 1.
    pub fn add(&mut self, id: &str, name: &str, unit_price: f64) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == id) {
            line.qty += 1;
            return;
        }
        self.lines.push(BasketLine {
            id: id.to_string(),
            name: name.to_string(),
            unit_price,
            qty: 1,
        });
    }

    /// Bumps the quantity of the line at `index`.
    ///
    /// Returns `true` if the basket changed; out-of-range indices are a
    /// no-op.
    pub fn increment(&mut self, index: usize) -> bool {
        let Some(line) = self.lines.get_mut(index) else {
            return false;
        };
        line.qty += 1;
        true
    }

    /// Drops the quantity of the line at `index`; a line reaching zero is
    /// removed entirely.
    ///
    /// Returns `true` if the basket changed.
    pub fn decrement(&mut self, index: usize) -> bool {
        let Some(line) = self.lines.get_mut(index) else {
            return false;
        };
        if line.qty <= 1 {
            self.lines.remove(index);
        } else {
            line.qty -= 1;
        }
        true
    }

    /// Running total, computed fresh on every call.
    pub fn total(&self) -> f64 {
        self.lines
            .iter()
            .map(|l| l.unit_price * l.qty as f64)
            .sum()
    }

    pub fn lines(&self) -> &[BasketLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Prices render as pounds with two decimals.
///
/// Non-finite input renders as zero rather than propagating NaN text into
/// the UI.
pub fn format_price(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    format!("£{amount:.2}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BasketError {
    StorageUnavailable,
    Io(String),
}

impl std::fmt::Display for BasketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BasketError::StorageUnavailable => write!(f, "browser storage unavailable"),
            BasketError::Io(msg) => write!(f, "basket storage error: {msg}"),
        }
    }
}

impl std::error::Error for BasketError {}

/// External key-value text store holding the serialized basket.
pub trait BasketStore {
    fn load(&self) -> Result<Option<String>, BasketError>;
    fn save(&mut self, raw: &str) -> Result<(), BasketError>;
}

/// Store for tests and for sessions without browser storage.
#[derive(Debug, Default)]
pub struct InMemoryBasketStore {
    raw: Option<String>,
}

impl InMemoryBasketStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }
}

impl BasketStore for InMemoryBasketStore {
    fn load(&self) -> Result<Option<String>, BasketError> {
        Ok(self.raw.clone())
    }

    fn save(&mut self, raw: &str) -> Result<(), BasketError> {
        self.raw = Some(raw.to_string());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_storage {
    use super::{BasketError, BasketStore};

    /// Basket persistence backed by `window.localStorage`.
    #[derive(Debug)]
    pub struct LocalStorageBasketStore {
        key: String,
    }

    impl LocalStorageBasketStore {
        /// Fails up front when the window or its storage is unavailable, so
        /// callers can fall back to an in-memory store once instead of on
        /// every save.
        pub fn new(key: impl Into<String>) -> Result<Self, BasketError> {
            let store = Self { key: key.into() };
            window_local_storage()?;
            Ok(store)
        }
    }

    impl BasketStore for LocalStorageBasketStore {
        fn load(&self) -> Result<Option<String>, BasketError> {
            let storage = window_local_storage()?;
            storage
                .get_item(&self.key)
                .map_err(|e| BasketError::Io(format!("get_item failed: {:?}", e)))
        }

        fn save(&mut self, raw: &str) -> Result<(), BasketError> {
            let storage = window_local_storage()?;
            storage
                .set_item(&self.key, raw)
                .map_err(|e| BasketError::Io(format!("set_item failed: {:?}", e)))
        }
    }

    fn window_local_storage() -> Result<web_sys::Storage, BasketError> {
        let win = web_sys::window().ok_or(BasketError::StorageUnavailable)?;
        win.local_storage()
            .map_err(|e| BasketError::Io(format!("localStorage error: {:?}", e)))?
            .ok_or(BasketError::StorageUnavailable)
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_storage::LocalStorageBasketStore;

#[cfg(test)]
mod tests {
    use super::{Basket, BasketStore, InMemoryBasketStore, format_price};
    use pretty_assertions::assert_eq;

    #[test]
    fn add_twice_merges_into_one_line() {
        let mut basket = Basket::new();
        basket.add("p1", "Oak Rune Token", 18.0);
        basket.add("p1", "Oak Rune Token", 18.0);

        assert_eq!(basket.len(), 1);
        assert_eq!(basket.lines()[0].qty, 2);
        assert_eq!(basket.total(), 36.0);

        assert!(basket.decrement(0));
        assert_eq!(basket.lines()[0].qty, 1);
        assert_eq!(basket.total(), 18.0);

        assert!(basket.decrement(0));
        assert!(basket.is_empty());
        assert_eq!(basket.total(), 0.0);
    }

    #[test]
    fn lines_keep_insertion_order() {
        let mut basket = Basket::new();
        basket.add("p2", "Walnut Mini Totem", 25.0);
        basket.add("p1", "Oak Rune Token", 18.0);
        basket.add("p2", "Walnut Mini Totem", 25.0);

        let ids: Vec<&str> = basket.lines().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p1"]);
        assert_eq!(basket.total(), 68.0);
    }

    #[test]
    fn out_of_range_mutations_are_no_ops() {
        let mut basket = Basket::new();
        basket.add("p1", "Oak Rune Token", 18.0);
        assert!(!basket.increment(5));
        assert!(!basket.decrement(5));
        assert_eq!(basket.total(), 18.0);
    }

    #[test]
    fn stored_round_trip_preserves_lines() {
        let mut basket = Basket::new();
        basket.add("p1", "Oak Rune Token", 18.0);
        basket.add("p3", "Maple Desk Charm", 12.0);
        basket.increment(0);

        let raw = basket.to_stored().unwrap();
        let restored = Basket::from_stored(&raw);
        assert_eq!(restored, basket);
    }

    #[test]
    fn malformed_stored_text_is_an_empty_basket() {
        assert!(Basket::from_stored("").is_empty());
        assert!(Basket::from_stored("not json").is_empty());
        assert!(Basket::from_stored("{\"id\":\"p1\"}").is_empty());
    }

    #[test]
    fn stored_zero_quantities_are_dropped() {
        let raw = r#"[{"id":"p1","name":"Oak Rune Token","unit_price":18.0,"qty":0},
                      {"id":"p2","name":"Walnut Mini Totem","unit_price":25.0,"qty":2}]"#;
        let basket = Basket::from_stored(raw);
        assert_eq!(basket.len(), 1);
        assert_eq!(basket.lines()[0].id, "p2");
    }

    #[test]
    fn load_treats_absent_store_as_empty() {
        let store = InMemoryBasketStore::new();
        assert!(Basket::load(&store).is_empty());

        let store = InMemoryBasketStore::with_raw("garbage");
        assert!(Basket::load(&store).is_empty());
    }

    #[test]
    fn save_then_load_round_trips_through_a_store() {
        let mut store = InMemoryBasketStore::new();
        let mut basket = Basket::new();
        basket.add("p5", "Custom Sigil Block", 45.0);
        store.save(&basket.to_stored().unwrap()).unwrap();

        let restored = Basket::load(&store);
        assert_eq!(restored, basket);
    }

    #[test]
    fn prices_format_as_pounds() {
        assert_eq!(format_price(18.0), "£18.00");
        assert_eq!(format_price(9.5), "£9.50");
        assert_eq!(format_price(0.0), "£0.00");
        assert_eq!(format_price(f64::NAN), "£0.00");
    }
}
