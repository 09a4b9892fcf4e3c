use serde::{Deserialize, Serialize};

/// Ids of favorited posts, duplicate-free, in insertion order.
///
/// Serializes as a plain JSON array of strings, which is the persisted format.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FavoriteIds(Vec<String>);

impl FavoriteIds {
    /// Create an empty set
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Check if a post id is favorited (exact, case-sensitive)
    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|existing| existing == id)
    }

    /// Remove `id` if present, otherwise append it.
    ///
    /// Returns `true` if the id is a favorite afterwards. An id that is
    /// removed and re-added lands at the end.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(index) = self.0.iter().position(|existing| existing == id) {
            self.0.remove(index);
            false
        } else {
            self.0.push(id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Serialize to the persisted JSON form
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }

    /// Parse the persisted JSON form
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let ids: Vec<String> = serde_json::from_str(json)?;
        Ok(Self::from(ids))
    }
}

impl From<Vec<String>> for FavoriteIds {
    fn from(ids: Vec<String>) -> Self {
        let mut set = Self(Vec::with_capacity(ids.len()));
        for id in ids {
            if !set.contains(&id) {
                set.0.push(id);
            }
        }
        set
    }
}

impl From<FavoriteIds> for Vec<String> {
    fn from(ids: FavoriteIds) -> Self {
        ids.0
    }
}

impl<S: Into<String>> FromIterator<S> for FavoriteIds {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from(iter.into_iter().map(Into::into).collect::<Vec<String>>())
    }
}
