use scene::interactable::{BookInfo, ObjectId, ProductInfo};
use scene::zones::ZoneId;

/// What a resolved pick asks the session to do.
///
/// Exactly one action per pick; a pointer event that hits nothing produces
/// no action at all.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Ride the camera rail to a zone.
    Travel(ZoneId),
    /// Show the basket overlay.
    OpenBasket,
    /// Show the product detail overlay and highlight the picked mesh.
    SelectProduct {
        object: ObjectId,
        product: ProductInfo,
    },
    /// Show the book reader at page 0.
    OpenBook(BookInfo),
}

impl Action {
    pub fn kind_str(&self) -> &'static str {
        match self {
            Action::Travel(_) => "travel",
            Action::OpenBasket => "open-basket",
            Action::SelectProduct { .. } => "select-product",
            Action::OpenBook(_) => "open-book",
        }
    }
}
