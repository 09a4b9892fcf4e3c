/// Visibility and label of the favorites counter badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoritesCounter {
    pub count: usize,
    pub show_zero: bool,
}

impl FavoritesCounter {
    pub fn new(count: usize, show_zero: bool) -> Self {
        Self { count, show_zero }
    }

    /// Hidden when there are no favorites, unless `show_zero` is set
    pub fn is_visible(&self) -> bool {
        self.count > 0 || self.show_zero
    }

    /// Default English label, e.g. `1 favorite` or `3 favorites`
    pub fn label(&self) -> String {
        if self.count == 1 {
            "1 favorite".to_string()
        } else {
            format!("{} favorites", self.count)
        }
    }
}
