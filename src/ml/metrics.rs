//! Evaluation metrics for the classifier.

/// Confusion matrix for a `K`-class classifier.
#[derive(Debug, Clone)]
pub struct ConfusionMatrix {
    /// Number of classes.
    pub n_classes: usize,
    /// Row-major `KxK` counts (`truth * K + predicted`).
    pub counts: Vec<u32>,
}

impl ConfusionMatrix {
    /// Create an empty `KxK` confusion matrix.
    pub fn new(n_classes: usize) -> Self {
        Self {
            n_classes,
            counts: vec![0; n_classes * n_classes],
        }
    }

    pub fn add(&mut self, truth: usize, predicted: usize) {
        if truth >= self.n_classes || predicted >= self.n_classes {
            return;
        }
        let idx = truth * self.n_classes + predicted;
        self.counts[idx] = self.counts[idx].saturating_add(1);
    }

    pub fn get(&self, truth: usize, predicted: usize) -> u32 {
        self.counts[truth * self.n_classes + predicted]
    }

    /// Overall accuracy: diagonal mass over total mass, 0 when empty.
    pub fn accuracy(&self) -> f32 {
        let total: u32 = self.counts.iter().sum();
        if total == 0 {
            return 0.0;
        }
        let hits: u32 = (0..self.n_classes).map(|idx| self.get(idx, idx)).sum();
        hits as f32 / total as f32
    }
}

/// Precision/recall statistics for a single class.
#[derive(Debug, Clone)]
pub struct PerClassStats {
    /// `TP / (TP + FP)`.
    pub precision: f32,
    /// `TP / (TP + FN)`.
    pub recall: f32,
    /// Total number of true examples for the class.
    pub support: u32,
}

/// Compute per-class precision and recall from a confusion matrix.
pub fn precision_recall_by_class(cm: &ConfusionMatrix) -> Vec<PerClassStats> {
    let k = cm.n_classes;
    let mut stats = Vec::with_capacity(k);
    for class_idx in 0..k {
        let tp = cm.get(class_idx, class_idx) as f32;
        let mut support = 0u32;
        let mut predicted = 0f32;
        for j in 0..k {
            support = support.saturating_add(cm.get(class_idx, j));
            predicted += cm.get(j, class_idx) as f32;
        }
        let truth_total = support as f32;
        stats.push(PerClassStats {
            precision: if predicted > 0.0 { tp / predicted } else { 0.0 },
            recall: if truth_total > 0.0 { tp / truth_total } else { 0.0 },
            support,
        });
    }
    stats
}

/// Numerically stable softmax over one logit row.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    if logits.is_empty() {
        return Vec::new();
    }
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut out: Vec<f32> = logits.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = out.iter().sum();
    if sum == 0.0 {
        let uniform = 1.0 / logits.len() as f32;
        out.iter_mut().for_each(|v| *v = uniform);
        return out;
    }
    out.iter_mut().for_each(|v| *v /= sum);
    out
}

/// Index of the largest logit, 0 for an empty row.
pub fn argmax(row: &[f32]) -> usize {
    let mut best = 0usize;
    let mut best_val = f32::NEG_INFINITY;
    for (idx, &value) in row.iter().enumerate() {
        if value > best_val {
            best_val = value;
            best = idx;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_is_diagonal_over_total() {
        let mut cm = ConfusionMatrix::new(2);
        cm.add(0, 0);
        cm.add(0, 0);
        cm.add(0, 1);
        cm.add(1, 1);
        assert!((cm.accuracy() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn per_class_stats_track_support() {
        let mut cm = ConfusionMatrix::new(2);
        cm.add(0, 0);
        cm.add(0, 1);
        cm.add(1, 1);
        let stats = precision_recall_by_class(&cm);
        assert_eq!(stats[0].support, 2);
        assert!((stats[0].recall - 0.5).abs() < 1e-6);
        assert!((stats[1].precision - 0.5).abs() < 1e-6);
    }

    #[test]
    fn softmax_sums_to_one_and_orders_like_logits() {
        let probs = softmax(&[1.0, 3.0, 2.0]);
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert_eq!(argmax(&probs), 1);
    }
}
