use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::model::{Error, Regressor};

const MIN_IMPROVEMENT: f64 = 1e-9;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: 12,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind")]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
        samples: usize,
    },
}

/// CART regression tree minimising squared error. Node 0 is the root.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RegressionTree {
    params: TreeParams,
    n_features: usize,
    nodes: Vec<Node>,
}

struct Split {
    feature: usize,
    threshold: f64,
    sse: f64,
}

impl RegressionTree {
    pub fn new(params: TreeParams) -> Self {
        Self {
            params,
            n_features: 0,
            nodes: Vec::new(),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], index: usize) -> usize {
            match nodes[index] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, left).max(walk(nodes, right)),
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                Node::Leaf { value, .. } => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[feature] <= threshold { left } else { right };
                }
            }
        }
    }

    fn grow(&mut self, rows: &[Vec<f64>], targets: &[f64], indexes: Vec<usize>, depth: usize) -> usize {
        let node_index = self.nodes.len();
        let n = indexes.len();
        let (sum, sum_sq) = indexes
            .iter()
            .fold((0.0, 0.0), |(s, sq), i| (s + targets[*i], sq + targets[*i] * targets[*i]));
        self.nodes.push(Node::Leaf {
            value: sum / n as f64,
            samples: n,
        });

        if depth >= self.params.max_depth || n < self.params.min_samples_split.max(2) {
            return node_index;
        }
        let first = targets[indexes[0]];
        if indexes.iter().all(|i| targets[*i] == first) {
            return node_index;
        }
        let parent_sse = sum_sq - sum * sum / n as f64;
        if parent_sse <= MIN_IMPROVEMENT {
            return node_index;
        }

        let min_leaf = self.params.min_samples_leaf.max(1);
        let best = (0..self.n_features)
            .into_par_iter()
            .filter_map(|feature| best_split(rows, targets, &indexes, feature, min_leaf))
            .min_by(|a, b| {
                a.sse
                    .total_cmp(&b.sse)
                    .then_with(|| a.feature.cmp(&b.feature))
            });
        let Some(split) = best else {
            return node_index;
        };
        if split.sse >= parent_sse - MIN_IMPROVEMENT {
            return node_index;
        }

        let (left, right): (Vec<usize>, Vec<usize>) = indexes
            .into_iter()
            .partition(|i| rows[*i][split.feature] <= split.threshold);
        let left = self.grow(rows, targets, left, depth + 1);
        let right = self.grow(rows, targets, right, depth + 1);
        self.nodes[node_index] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        node_index
    }
}

fn best_split(
    rows: &[Vec<f64>],
    targets: &[f64],
    indexes: &[usize],
    feature: usize,
    min_leaf: usize,
) -> Option<Split> {
    let n = indexes.len();
    let mut sorted = indexes.to_vec();
    sorted.sort_by(|a, b| {
        rows[*a][feature]
            .partial_cmp(&rows[*b][feature])
            .unwrap_or(Ordering::Equal)
    });

    let (total, total_sq) = sorted
        .iter()
        .fold((0.0, 0.0), |(s, sq), i| (s + targets[*i], sq + targets[*i] * targets[*i]));
    let mut left = 0.0;
    let mut left_sq = 0.0;
    let mut best: Option<Split> = None;

    for k in 0..n - 1 {
        let y = targets[sorted[k]];
        left += y;
        left_sq += y * y;
        let n_left = k + 1;
        let n_right = n - n_left;
        if n_left < min_leaf || n_right < min_leaf {
            continue;
        }
        let value = rows[sorted[k]][feature];
        let next = rows[sorted[k + 1]][feature];
        if value == next {
            continue;
        }
        let right = total - left;
        let right_sq = total_sq - left_sq;
        let sse = (left_sq - left * left / n_left as f64)
            + (right_sq - right * right / n_right as f64);
        if best.as_ref().is_none_or(|best| sse < best.sse) {
            best = Some(Split {
                feature,
                threshold: (value + next) / 2.0,
                sse,
            });
        }
    }
    best
}

impl Regressor for RegressionTree {
    fn fit(&mut self, rows: &[Vec<f64>], targets: &[f64]) -> Result<(), Error> {
        if rows.is_empty() {
            return Err(Error::EmptyTrainingSet);
        }
        if rows.len() != targets.len() {
            return Err(Error::TargetMismatch {
                rows: rows.len(),
                targets: targets.len(),
            });
        }
        let n_features = rows[0].len();
        if let Some(row) = rows.iter().find(|row| row.len() != n_features) {
            return Err(Error::Shape {
                expected: n_features,
                actual: row.len(),
            });
        }

        self.n_features = n_features;
        self.nodes.clear();
        self.grow(rows, targets, (0..rows.len()).collect(), 0);
        Ok(())
    }

    /// Children must point forward, so every walk from the root terminates.
    fn validate(&self) -> Result<(), Error> {
        if self.nodes.is_empty() {
            return Err(Error::Malformed("tree has no nodes".into()));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match *node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= self.n_features {
                        return Err(Error::Malformed(format!(
                            "node {index} splits on feature {feature} of {}",
                            self.n_features
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(Error::Malformed(format!(
                            "node {index} has threshold {threshold}"
                        )));
                    }
                    for child in [left, right] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(Error::Malformed(format!(
                                "node {index} points to node {child} of {}",
                                self.nodes.len()
                            )));
                        }
                    }
                }
                Node::Leaf { value, .. } => {
                    if !value.is_finite() {
                        return Err(Error::Malformed(format!("leaf {index} has value {value}")));
                    }
                }
            }
        }
        Ok(())
    }

    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, Error> {
        if self.nodes.is_empty() {
            return Err(Error::NotFitted);
        }
        rows.iter()
            .map(|row| {
                if row.len() != self.n_features {
                    return Err(Error::Shape {
                        expected: self.n_features,
                        actual: row.len(),
                    });
                }
                Ok(self.predict_row(row))
            })
            .collect()
    }
}
