use nalgebra as na;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Layer {
    weights: na::DMatrix<f64>,
    biases: na::DVector<f64>,
}

/// Fully connected action-value approximator: linear layers with ReLU hidden
/// activations and a linear output, trained by single SGD steps on
/// mean-squared error. These parameters are the only state a checkpoint
/// persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueNetwork {
    layers: Vec<Layer>,
}

impl ValueNetwork {
    /// Builds a network with the given layer sizes (input first, output
    /// last), weights drawn uniformly with Glorot bounds.
    pub fn new<R: Rng>(sizes: &[usize], rng: &mut R) -> Self {
        assert!(sizes.len() >= 2, "a network needs an input and an output layer");
        let layers = sizes
            .windows(2)
            .map(|pair| {
                let (fan_in, fan_out) = (pair[0], pair[1]);
                let bound = (6.0 / (fan_in + fan_out) as f64).sqrt();
                Layer {
                    weights: na::DMatrix::from_fn(fan_out, fan_in, |_, _| {
                        rng.gen_range(-bound..bound)
                    }),
                    biases: na::DVector::zeros(fan_out),
                }
            })
            .collect();
        ValueNetwork { layers }
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].weights.ncols()
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].weights.nrows()
    }

    /// Action values for a single observation.
    pub fn forward(&self, input: &na::DVector<f64>) -> na::DVector<f64> {
        assert_eq!(input.len(), self.input_size(), "observation length mismatch");
        let last = self.layers.len() - 1;
        let mut activation = input.clone();
        for (i, layer) in self.layers.iter().enumerate() {
            let mut z = &layer.weights * &activation + &layer.biases;
            if i < last {
                z.apply(|v| *v = v.max(0.0));
            }
            activation = z;
        }
        activation
    }

    /// One SGD step minimizing the mean-squared error between the network
    /// outputs and `targets` over a batch laid out column-per-sample.
    /// Returns the pre-step loss.
    pub fn train_batch(
        &mut self,
        states: &na::DMatrix<f64>,
        targets: &na::DMatrix<f64>,
        learning_rate: f64,
    ) -> f64 {
        assert_eq!(states.nrows(), self.input_size(), "observation length mismatch");
        assert_eq!(targets.nrows(), self.output_size());
        assert_eq!(states.ncols(), targets.ncols());

        let last = self.layers.len() - 1;

        // Forward pass, keeping each layer's activation for backprop.
        let mut activations: Vec<na::DMatrix<f64>> = Vec::with_capacity(self.layers.len() + 1);
        activations.push(states.clone());
        for (i, layer) in self.layers.iter().enumerate() {
            let mut z = &layer.weights * activations.last().expect("non-empty");
            for mut column in z.column_iter_mut() {
                column += &layer.biases;
            }
            if i < last {
                z.apply(|v| *v = v.max(0.0));
            }
            activations.push(z);
        }

        let output = activations.last().expect("non-empty");
        let residual = output - targets;
        let element_count = (residual.nrows() * residual.ncols()) as f64;
        let loss = residual.map(|r| r * r).sum() / element_count;

        // Backward pass: delta is dLoss/dz for the current layer.
        let mut delta = residual * (2.0 / element_count);
        for i in (0..self.layers.len()).rev() {
            let grad_weights = &delta * activations[i].transpose();
            let grad_biases: na::DVector<f64> = delta.column_sum();

            let next_delta = if i > 0 {
                let mut d = self.layers[i].weights.transpose() * &delta;
                // ReLU derivative, read off the stored hidden activation.
                d.zip_apply(&activations[i], |v, activation| {
                    if activation <= 0.0 {
                        *v = 0.0;
                    }
                });
                Some(d)
            } else {
                None
            };

            let layer = &mut self.layers[i];
            layer.weights -= grad_weights * learning_rate;
            layer.biases -= grad_biases * learning_rate;

            if let Some(d) = next_delta {
                delta = d;
            }
        }

        loss
    }
}
