use scene::interactable::{BookInfo, ProductInfo};

/// The open book reader.
#[derive(Debug, Clone, PartialEq)]
pub struct BookReader {
    book: BookInfo,
    page: usize,
}

impl BookReader {
    /// Opens a book at page 0.
    pub fn new(book: BookInfo) -> Self {
        Self { book, page: 0 }
    }

    pub fn title(&self) -> &str {
        &self.book.title
    }

    pub fn date(&self) -> &str {
        &self.book.date
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.book.pages.len()
    }

    pub fn page_text(&self) -> &str {
        self.book
            .pages
            .get(self.page)
            .map(|p| p.as_str())
            .unwrap_or("")
    }

    /// Page navigation clamps to [0, page_count - 1]; it never errors and
    /// never wraps.
    pub fn next_page(&mut self) {
        let last = self.page_count().saturating_sub(1);
        self.page = (self.page + 1).min(last);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }
}

/// Visibility of the three overlay panels plus their transient content.
///
/// The flags are independent: opening one panel does not close another.
/// The only forced transition is travel, which closes all three and clears
/// the selection and the open book before the camera starts moving.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Overlays {
    product_open: bool,
    basket_open: bool,
    book_open: bool,
    selected: Option<ProductInfo>,
    reader: Option<BookReader>,
}

impl Overlays {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn product_open(&self) -> bool {
        self.product_open
    }

    pub fn basket_open(&self) -> bool {
        self.basket_open
    }

    pub fn book_open(&self) -> bool {
        self.book_open
    }

    pub fn selected(&self) -> Option<&ProductInfo> {
        self.selected.as_ref()
    }

    pub fn reader(&self) -> Option<&BookReader> {
        self.reader.as_ref()
    }

    pub fn reader_mut(&mut self) -> Option<&mut BookReader> {
        self.reader.as_mut()
    }

    pub fn open_product(&mut self, product: ProductInfo) {
        self.selected = Some(product);
        self.product_open = true;
    }

    pub fn open_basket(&mut self) {
        self.basket_open = true;
    }

    pub fn open_book(&mut self, book: BookInfo) {
        self.reader = Some(BookReader::new(book));
        self.book_open = true;
    }

    pub fn close_product(&mut self) {
        self.product_open = false;
    }

    pub fn close_basket(&mut self) {
        self.basket_open = false;
    }

    pub fn close_book(&mut self) {
        self.book_open = false;
    }

    /// Travel starts: every panel closes and transient content is dropped,
    /// so no overlay can reference stale zone content after arrival.
    pub fn close_all(&mut self) {
        self.product_open = false;
        self.basket_open = false;
        self.book_open = false;
        self.selected = None;
        self.reader = None;
    }
}
