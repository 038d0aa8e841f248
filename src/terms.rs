pub use fixed_map::Key as Term;
pub use fixed_map::Key;
use fixed_map::Map as FixedMap;

use crate::error::Result;
use crate::trapezoid::Trapezoid;

/// The shapes of one variable's linguistic terms, keyed by a fixed vocabulary.
#[derive(Default)]
pub struct Terms<K: Term>(pub(crate) FixedMap<K, Trapezoid>);

impl<K: Term> Terms<K> {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    pub fn insert(&mut self, key: K, shape: Trapezoid) {
        self.0.insert(key, shape);
    }

    /// Validates `points` as a trapezoid before inserting it.
    pub fn insert_points(&mut self, key: K, points: [f64; 4]) -> Result<()> {
        self.insert(key, Trapezoid::new(points)?);

        Ok(())
    }

    pub fn get(&self, key: K) -> Option<&Trapezoid> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
