use serde::Serialize;

use crate::{
    model::{City, Favorite},
    reorder::{ROW_HEIGHT_PX, index_from_offset},
};

/// Ordered list of pinned cities, at most one entry per city.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Favorites(Vec<Favorite>);

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Favorite> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Favorite] {
        &self.0
    }

    pub fn contains(&self, city: &City) -> bool {
        self.position(city).is_some()
    }

    pub fn get(&self, city: &City) -> Option<&Favorite> {
        self.0.iter().find(|f| &f.city == city)
    }

    fn position(&self, city: &City) -> Option<usize> {
        self.0.iter().position(|f| &f.city == city)
    }

    /// Appends `favorite`; returns `false` and changes nothing if its city is already pinned.
    pub fn push(&mut self, favorite: Favorite) -> bool {
        if self.contains(&favorite.city) {
            return false;
        }
        self.0.push(favorite);
        true
    }

    /// Returns whether anything was removed.
    pub fn remove(&mut self, city: &City) -> bool {
        let before = self.0.len();
        self.0.retain(|f| &f.city != city);
        self.0.len() != before
    }

    /// Moves `city` to the row under a drag that ended `offset_px` below the top of the list.
    /// Returns the new index, or `None` when the city is not pinned.
    pub fn reorder(&mut self, city: &City, offset_px: f64) -> Option<usize> {
        let from = self.position(city)?;
        let to = index_from_offset(offset_px, ROW_HEIGHT_PX, self.0.len());

        let dragged = self.0.remove(from);
        self.0.insert(to, dragged);
        Some(to)
    }
}

impl<'a> IntoIterator for &'a Favorites {
    type Item = &'a Favorite;
    type IntoIter = std::slice::Iter<'a, Favorite>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
