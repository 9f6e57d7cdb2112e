//! Collection state snapshot.

/// State of one entity collection as the table views see it.
///
/// `items` preserves server response order (or insertion order for
/// prepend-on-create stores). `total` is the server-reported count across
/// all pages; for unpaginated fetches it equals `items.len()`.
#[derive(Debug, Clone)]
pub struct CollectionState<R> {
    pub items: Vec<R>,
    pub loading: bool,
    pub error: Option<String>,
    pub total: u64,
}

impl<R> Default for CollectionState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            total: 0,
        }
    }
}

impl<R> CollectionState<R> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
