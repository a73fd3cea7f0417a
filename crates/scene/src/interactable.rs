use crate::zones::ZoneId;

/// Dense object id within a [`StoreWorld`](crate::world::StoreWorld).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl ObjectId {
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Catalog payload carried by a product object.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Placeholder art tag shown where a product photo would go.
    pub art_tag: String,
}

/// A readable book: blog post shelved in the library.
#[derive(Debug, Clone, PartialEq)]
pub struct BookInfo {
    pub title: String,
    pub date: String,
    pub pages: Vec<String>,
}

/// What a clickable world object is, with only the fields that kind needs.
///
/// Pick dispatch matches exhaustively on this enum; there is no string
/// tagging and no catch-all arm.
#[derive(Debug, Clone, PartialEq)]
pub enum Interactable {
    /// An in-world sign that rides the camera to `target` when clicked.
    ZoneTrigger { target: ZoneId, label: String },
    Product(ProductInfo),
    Book(BookInfo),
    /// The shop counter; opens the basket overlay.
    Checkout,
}

impl Interactable {
    pub fn kind_str(&self) -> &'static str {
        match self {
            Interactable::ZoneTrigger { .. } => "zone-trigger",
            Interactable::Product(_) => "product",
            Interactable::Book(_) => "book",
            Interactable::Checkout => "checkout",
        }
    }
}
