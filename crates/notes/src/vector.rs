//! Vector similarity and ranking utilities.

use studyagent_core::note::{Note, ScoredNote};
use tracing::warn;

/// Added to the norm product so a zero vector scores 0 instead of NaN.
const EPSILON: f64 = 1e-10;

/// Compute cosine similarity between two vectors.
///
/// `dot(a, b) / (‖a‖·‖b‖ + 1e-10)`, accumulated in f64. Norms always cover
/// the whole vector; the dot product covers the common prefix when the
/// lengths differ. An empty or zero vector scores 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| x as f64 * y as f64)
        .sum();

    (dot / (norm(a) * norm(b) + EPSILON)) as f32
}

fn norm(v: &[f32]) -> f64 {
    v.iter().map(|&x| x as f64 * x as f64).sum::<f64>().sqrt()
}

/// Rank notes by cosine similarity to a query embedding.
///
/// Notes without an embedding are skipped. The sort is stable, so notes
/// with equal scores keep their collection order. At most `limit` results.
pub fn rank_notes(notes: &[Note], query_embedding: &[f32], limit: usize) -> Vec<ScoredNote> {
    let mut mismatched = 0usize;
    let mut scored: Vec<ScoredNote> = notes
        .iter()
        .filter_map(|note| {
            let emb = note.embedding.as_ref()?;
            if emb.len() != query_embedding.len() {
                mismatched += 1;
            }
            Some(ScoredNote {
                id: note.id.clone(),
                text: note.text.clone(),
                score: cosine_similarity(emb, query_embedding),
            })
        })
        .collect();

    if mismatched > 0 {
        warn!(
            count = mismatched,
            query_dims = query_embedding.len(),
            "Note embeddings differ in size from the query; re-index after changing embedding_model"
        );
    }

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, embedding: Option<Vec<f32>>) -> Note {
        Note {
            id: id.into(),
            text: format!("Text for {id}"),
            embedding,
        }
    }

    #[test]
    fn cosine_identical_vectors() {
        let v = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_orthogonal_vectors() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn cosine_opposite_vectors() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) - (-1.0)).abs() < 1e-6);
    }

    #[test]
    fn cosine_zero_vector_is_finite() {
        let a = vec![0.0, 0.0, 0.0];
        let b = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&a, &b);
        assert!(sim.is_finite());
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn cosine_empty_vectors() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn cosine_known_value() {
        // [1,1] · [1,0] = 1, |[1,1]| = sqrt(2), |[1,0]| = 1
        let a = vec![1.0, 1.0];
        let b = vec![1.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 0.7071).abs() < 0.001);
    }

    #[test]
    fn cosine_length_mismatch_uses_full_norms() {
        // dot over the prefix = 1, |a| = sqrt(2), |b| = 1
        let a = vec![1.0, 0.0, 1.0];
        let b = vec![1.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 0.7071).abs() < 0.001);
        assert!((cosine_similarity(&b, &a) - 0.7071).abs() < 0.001);
    }

    #[test]
    fn rank_orders_by_similarity() {
        let query = vec![1.0, 0.0, 0.0];
        let notes = vec![
            note("a", Some(vec![0.0, 1.0, 0.0])), // orthogonal
            note("b", Some(vec![1.0, 0.0, 0.0])), // identical
            note("c", Some(vec![0.5, 0.5, 0.0])), // ~0.707
        ];

        let results = rank_notes(&notes, &query, 10);
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn rank_is_stable_for_ties() {
        let query = vec![1.0, 0.0];
        let notes = vec![
            note("first", Some(vec![2.0, 0.0])),
            note("second", Some(vec![1.0, 0.0])),
        ];
        let results = rank_notes(&notes, &query, 10);
        assert_eq!(results[0].id, "first");
        assert_eq!(results[1].id, "second");
    }

    #[test]
    fn rank_respects_limit_and_skips_missing() {
        let query = vec![1.0, 0.0];
        let mut notes: Vec<_> = (0..6)
            .map(|i| note(&format!("n{i}"), Some(vec![1.0, i as f32 * 0.1])))
            .collect();
        notes.push(note("bare", None));

        let results = rank_notes(&notes, &query, 4);
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.id != "bare"));
        assert_eq!(results[0].id, "n0");
    }
}
