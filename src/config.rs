use crate::decoder::LSTMDecoder;
use burn::tensor::backend::Backend;
use serde::{Deserialize, Serialize};

/// Configuration struct for building (and serializing the hyperparameters of)
/// a decoder
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Seq2SeqConfig {
    /// Width of the step inputs and of the target embedding vectors
    pub input_size: usize,
    /// Width of every recurrent layer
    pub hidden_size: usize,
    /// Width of the output logits
    pub output_size: usize,
    /// Number of entries in the target embedding table
    pub vocab_size: usize,
    /// Number of stacked recurrent layers
    pub num_layers: usize,
    /// Inter-layer dropout rate
    pub dropout_rate: f64,
}

impl Seq2SeqConfig {
    /// Create a configuration with a single layer and no dropout
    pub fn new(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        vocab_size: usize,
    ) -> Self {
        Self {
            input_size,
            hidden_size,
            output_size,
            vocab_size,
            num_layers: 1,
            dropout_rate: 0.0,
        }
    }

    /// Set the number of stacked layers
    pub fn with_num_layers(mut self, num_layers: usize) -> Self {
        self.num_layers = num_layers;
        self
    }

    /// Set the inter-layer dropout rate
    pub fn with_dropout_rate(mut self, dropout_rate: f64) -> Self {
        self.dropout_rate = dropout_rate;
        self
    }

    /// Build a decoder on the given device
    ///
    /// # Panics
    /// If any field fails the component constructors' validation.
    pub fn init<B: Backend>(&self, device: &B::Device) -> LSTMDecoder<B> {
        LSTMDecoder::new(
            self.input_size,
            self.hidden_size,
            self.output_size,
            self.vocab_size,
            self.num_layers,
            self.dropout_rate,
            device,
        )
    }
}
