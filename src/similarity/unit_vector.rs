//! Sparse unit vectors
//!
//! L2-normalized sparse vectors over vocabulary feature IDs. Cosine
//! similarity between two unit vectors is their dot product.

use rustc_hash::FxHashMap;

/// A sparse unit vector representation of a sentence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitVector {
    /// Non-zero dimensions: feature ID -> weight
    pub dimensions: FxHashMap<u32, f64>,
    /// L2 norm of the vector before normalization
    pub norm: f64,
}

impl UnitVector {
    /// Create a new empty unit vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a map of dimensions, normalizing to unit length
    pub fn from_dimensions(mut dimensions: FxHashMap<u32, f64>) -> Self {
        dimensions.retain(|_, v| *v != 0.0);
        let norm = Self::compute_norm(&dimensions);
        if norm > 0.0 {
            for value in dimensions.values_mut() {
                *value /= norm;
            }
        }
        Self { dimensions, norm }
    }

    fn compute_norm(dimensions: &FxHashMap<u32, f64>) -> f64 {
        dimensions.values().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Compute cosine similarity with another vector
    pub fn cosine_similarity(&self, other: &UnitVector) -> f64 {
        let (small, large) = if self.dimensions.len() <= other.dimensions.len() {
            (self, other)
        } else {
            (other, self)
        };

        small
            .dimensions
            .iter()
            .filter_map(|(key, value)| large.dimensions.get(key).map(|o| value * o))
            .sum()
    }

    /// Weight of a feature (0.0 when absent)
    pub fn get(&self, feature: u32) -> f64 {
        self.dimensions.get(&feature).copied().unwrap_or(0.0)
    }

    /// Check if the vector is empty
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(entries: &[(u32, f64)]) -> UnitVector {
        UnitVector::from_dimensions(entries.iter().copied().collect())
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let v1 = vector(&[(0, 1.0), (1, 2.0)]);
        let v2 = vector(&[(0, 1.0), (1, 2.0)]);

        let sim = v1.cosine_similarity(&v2);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let v1 = vector(&[(0, 1.0)]);
        let v2 = vector(&[(1, 1.0)]);

        assert!(v1.cosine_similarity(&v2).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_is_symmetric() {
        let v1 = vector(&[(0, 1.0), (1, 3.0), (4, 0.5)]);
        let v2 = vector(&[(1, 2.0), (4, 1.0)]);

        let a = v1.cosine_similarity(&v2);
        let b = v2.cosine_similarity(&v1);
        assert!((a - b).abs() < 1e-12);
        assert!(a > 0.0 && a < 1.0);
    }

    #[test]
    fn test_empty_vector() {
        let v = UnitVector::new();
        assert!(v.is_empty());
        assert!((v.norm - 0.0).abs() < 1e-6);
        assert_eq!(v.cosine_similarity(&vector(&[(0, 1.0)])), 0.0);
    }

    #[test]
    fn test_unit_normalization() {
        let v = vector(&[(0, 3.0), (1, 4.0)]);

        let actual_norm: f64 = v.dimensions.values().map(|x| x * x).sum::<f64>().sqrt();
        assert!((actual_norm - 1.0).abs() < 1e-6);
        assert!((v.norm - 5.0).abs() < 1e-9);
        assert!((v.get(0) - 0.6).abs() < 1e-9);
    }
}
