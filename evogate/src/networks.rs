//! Deterministic evaluation models that read their connection
//! weights positionally from an individual's genes.
//!
//! The network structure is fixed for the whole run and shared
//! by every individual; only the weight values bound to it vary.

use crate::lessons::Lesson;

use std::num::NonZeroUsize;

/// An evaluation model mapping a gene vector and a lesson's
/// inputs to a predicted boolean output.
///
/// Each connection in the model's fixed structure consumes
/// exactly one gene, in a stable creation order. Implementations
/// must be deterministic and side-effect-free.
pub trait Predictor {
    /// Number of genes the model consumes, one per connection.
    fn gene_count(&self) -> usize;

    /// Predicts the output for `lesson`'s inputs, using `genes`
    /// as the connection weights.
    fn predict(&self, genes: &[f32], lesson: &Lesson) -> bool;
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

fn as_signal(input: bool) -> f32 {
    if input {
        1.0
    } else {
        0.0
    }
}

/// A fixed 2-2-1 perceptron with a shared firing threshold.
///
/// Genes 0–3 weight the input-to-hidden connections of the two
/// hidden units, genes 4–5 the hidden-to-output connections.
/// A unit outputs 1 when its weighted input sum reaches the
/// threshold, and 0 otherwise.
///
/// # Examples
/// ```
/// use evogate::lessons::Lesson;
/// use evogate::networks::{Predictor, ThresholdNetwork};
///
/// let network = ThresholdNetwork::new(1.5);
/// let genes = [1.0; ThresholdNetwork::GENE_COUNT];
///
/// // With unit weights and a 1.5 threshold, the output unit
/// // fires only when both inputs are set.
/// assert!(network.predict(
///     &genes,
///     &Lesson { input_a: true, input_b: true, expected: true },
/// ));
/// assert!(!network.predict(
///     &genes,
///     &Lesson { input_a: false, input_b: true, expected: false },
/// ));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ThresholdNetwork {
    threshold: f32,
}

impl ThresholdNetwork {
    /// Number of connections, and therefore genes, in the
    /// fixed 2-2-1 structure.
    pub const GENE_COUNT: usize = 6;

    /// Returns a network whose units fire at `threshold`.
    pub fn new(threshold: f32) -> ThresholdNetwork {
        ThresholdNetwork { threshold }
    }

    fn fire(&self, sum: f32) -> f32 {
        if sum >= self.threshold {
            1.0
        } else {
            0.0
        }
    }
}

impl Predictor for ThresholdNetwork {
    fn gene_count(&self) -> usize {
        Self::GENE_COUNT
    }

    fn predict(&self, genes: &[f32], lesson: &Lesson) -> bool {
        let a = as_signal(lesson.input_a);
        let b = as_signal(lesson.input_b);
        let hidden1 = self.fire(a * genes[0] + b * genes[1]);
        let hidden2 = self.fire(a * genes[2] + b * genes[3]);
        self.fire(hidden1 * genes[4] + hidden2 * genes[5]) == 1.0
    }
}

/// A layered feed-forward sigmoid network with a topology
/// fixed at construction.
///
/// The layering is `[2, n, n, ..., 1]`: the two inputs,
/// `hidden_layers` hidden layers of `neurons_per_layer` units
/// each, and a single output unit. Adjacent layers are fully
/// connected, and each connection consumes one gene in creation
/// order (layer by layer, source unit first). Every non-input
/// unit applies a sigmoid to its weighted input sum; the output
/// unit's activation is rounded to produce the prediction.
#[derive(Clone, Debug)]
pub struct SigmoidNetwork {
    layer_sizes: Vec<usize>,
    gene_count: usize,
}

impl SigmoidNetwork {
    /// Builds the layering and counts its connections.
    ///
    /// # Examples
    /// ```
    /// use evogate::networks::{Predictor, SigmoidNetwork};
    /// use std::num::NonZeroUsize;
    ///
    /// let network = SigmoidNetwork::new(2, NonZeroUsize::new(5).unwrap());
    ///
    /// assert_eq!(network.layer_sizes(), &[2, 5, 5, 1]);
    /// assert_eq!(network.gene_count(), 2 * 5 + 5 * 5 + 5 * 1);
    /// ```
    pub fn new(hidden_layers: usize, neurons_per_layer: NonZeroUsize) -> SigmoidNetwork {
        let mut layer_sizes = Vec::with_capacity(hidden_layers + 2);
        layer_sizes.push(2);
        layer_sizes.extend(std::iter::repeat(neurons_per_layer.get()).take(hidden_layers));
        layer_sizes.push(1);
        let gene_count = layer_sizes.windows(2).map(|pair| pair[0] * pair[1]).sum();
        SigmoidNetwork {
            layer_sizes,
            gene_count,
        }
    }

    /// Returns the layer sizes, input layer first.
    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }
}

impl Predictor for SigmoidNetwork {
    fn gene_count(&self) -> usize {
        self.gene_count
    }

    fn predict(&self, genes: &[f32], lesson: &Lesson) -> bool {
        let mut activations = vec![as_signal(lesson.input_a), as_signal(lesson.input_b)];
        let mut next_gene = 0;
        for pair in self.layer_sizes.windows(2) {
            let mut sums = vec![0.0; pair[1]];
            for activation in &activations {
                for sum in sums.iter_mut() {
                    *sum += activation * genes[next_gene];
                    next_gene += 1;
                }
            }
            for sum in sums.iter_mut() {
                *sum = sigmoid(*sum);
            }
            activations = sums;
        }
        activations[0].round() == 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(a: bool, b: bool) -> Lesson {
        Lesson {
            input_a: a,
            input_b: b,
            expected: false,
        }
    }

    #[test]
    fn threshold_network_with_unit_weights_computes_and() {
        let network = ThresholdNetwork::new(1.5);
        let genes = [1.0; ThresholdNetwork::GENE_COUNT];
        assert!(!network.predict(&genes, &lesson(false, false)));
        assert!(!network.predict(&genes, &lesson(false, true)));
        assert!(!network.predict(&genes, &lesson(true, false)));
        assert!(network.predict(&genes, &lesson(true, true)));
    }

    #[test]
    fn threshold_network_is_deterministic() {
        let network = ThresholdNetwork::new(0.5);
        let genes = [0.3, 0.4, 0.1, 0.9, 0.6, 0.2];
        let first = network.predict(&genes, &lesson(true, true));
        for _ in 0..10 {
            assert_eq!(network.predict(&genes, &lesson(true, true)), first);
        }
    }

    #[test]
    fn sigmoid_network_counts_one_gene_per_connection() {
        let network = SigmoidNetwork::new(2, NonZeroUsize::new(5).unwrap());
        assert_eq!(network.gene_count(), 40);
        assert_eq!(network.layer_sizes(), &[2, 5, 5, 1]);

        let direct = SigmoidNetwork::new(0, NonZeroUsize::new(3).unwrap());
        assert_eq!(direct.layer_sizes(), &[2, 1]);
        assert_eq!(direct.gene_count(), 2);
    }

    #[test]
    fn sigmoid_network_rounds_output_activation() {
        // With no hidden layers the output is sigmoid(a*g0 + b*g1).
        let network = SigmoidNetwork::new(0, NonZeroUsize::new(1).unwrap());
        // sigmoid(10) ~ 1.0, rounds to 1.
        assert!(network.predict(&[10.0, 10.0], &lesson(true, true)));
        // sigmoid(-10) ~ 0.0, rounds to 0.
        assert!(!network.predict(&[-10.0, -10.0], &lesson(true, true)));
        // sigmoid(0) = 0.5, rounds away from zero to 1.
        assert!(network.predict(&[0.3, 0.9], &lesson(false, false)));
    }

    #[test]
    fn sigmoid_network_reads_genes_in_creation_order() {
        // Layers [2, 2, 1]: genes 0..4 feed the hidden layer
        // (source-major), genes 4..6 feed the output unit.
        let network = SigmoidNetwork::new(1, NonZeroUsize::new(2).unwrap());
        assert_eq!(network.gene_count(), 6);

        let genes = [5.0, -5.0, 5.0, -5.0, 10.0, 10.0];
        // Input (1, 0): hidden = [sigmoid(5), sigmoid(-5)] ~ [1, 0],
        // output ~ sigmoid(10) -> 1.
        assert!(network.predict(&genes, &lesson(true, false)));
        // Input (0, 0): hidden = [0.5, 0.5], output = sigmoid(10) -> 1.
        assert!(network.predict(&genes, &lesson(false, false)));
    }
}
