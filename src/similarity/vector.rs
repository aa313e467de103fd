// Dense vector helpers shared by the semantic scorer and the aligner.
//
// Every embedding is L2-normalised before comparison, so cosine similarity
// reduces to a dot product in [-1, 1].

/// Scale a vector to unit length in place. The zero vector is left as is.
pub fn l2_normalize(v: &mut [f64]) {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > f64::EPSILON {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Normalise every vector of a batch.
pub fn normalize_all(mut vectors: Vec<Vec<f64>>) -> Vec<Vec<f64>> {
    for v in &mut vectors {
        l2_normalize(v);
    }
    vectors
}

/// Dot product. Mismatched dimensions compare as 0.0.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Maximum of a sequence of similarities, with max-of-empty defined as 0.0.
pub fn max_or_zero(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().fold(None, |best: Option<f64>, v| match best {
        Some(b) if b >= v => Some(b),
        _ => Some(v),
    })
    .unwrap_or(0.0)
}

/// Convert a document-level cosine into a percentage in [0, 100].
pub fn to_percentage(cosine: f64) -> f64 {
    (cosine * 100.0).clamp(0.0, 100.0)
}
