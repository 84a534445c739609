//! Top-K sentence selection and summary assembly

use crate::types::Sentence;

/// Picks the highest-ranked sentences and joins them in document order
#[derive(Debug, Clone)]
pub struct SentenceSelector {
    num_sentences: usize,
}

impl Default for SentenceSelector {
    fn default() -> Self {
        Self::new(3)
    }
}

impl SentenceSelector {
    /// Create a selector that keeps `num_sentences` sentences
    pub fn new(num_sentences: usize) -> Self {
        Self { num_sentences }
    }

    pub fn num_sentences(&self) -> usize {
        self.num_sentences
    }

    /// Positions of the top-K scores, in ascending position order.
    ///
    /// Equal scores keep their original relative order, so the earlier
    /// sentence wins a tie. K larger than the input selects everything.
    pub fn select(&self, scores: &[f64]) -> Vec<usize> {
        let mut ranked: Vec<usize> = (0..scores.len()).collect();
        // sort_by is stable
        ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        ranked.truncate(self.num_sentences);
        ranked.sort_unstable();
        ranked
    }

    /// Join the selected sentences with a single space
    pub fn assemble(&self, sentences: &[Sentence], positions: &[usize]) -> String {
        positions
            .iter()
            .filter_map(|&p| sentences.get(p))
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(texts: &[&str]) -> Vec<Sentence> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Sentence::new(*t, i, 0, t.len()))
            .collect()
    }

    #[test]
    fn test_select_top_k_in_document_order() {
        let selector = SentenceSelector::new(2);
        let picked = selector.select(&[0.1, 0.4, 0.2, 0.3]);
        assert_eq!(picked, vec![1, 3]);
    }

    #[test]
    fn test_ties_prefer_earlier_sentences() {
        let selector = SentenceSelector::new(2);
        assert_eq!(selector.select(&[0.25, 0.25, 0.25, 0.25]), vec![0, 1]);
        assert_eq!(selector.select(&[0.1, 0.3, 0.3, 0.3]), vec![1, 2]);
    }

    #[test]
    fn test_k_larger_than_input() {
        let selector = SentenceSelector::new(10);
        assert_eq!(selector.select(&[0.5, 0.2, 0.3]), vec![0, 1, 2]);
        assert!(selector.select(&[]).is_empty());
    }

    #[test]
    fn test_assemble_joins_with_space() {
        let selector = SentenceSelector::new(2);
        let sents = sentences(&["First one.", "Second one.", "Third one."]);
        assert_eq!(selector.assemble(&sents, &[0, 2]), "First one. Third one.");
        assert_eq!(selector.assemble(&sents, &[]), "");
    }
}
