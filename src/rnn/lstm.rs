use crate::rnn::{LstmState, MultiLayerLSTM};
use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Multi-layer LSTM with a linear output projection
///
/// Wraps [`MultiLayerLSTM`] with a final `hidden_size -> output_size` map,
/// applied independently at every (batch, time) position. No activation
/// follows the projection; outputs are logits and their interpretation is the
/// caller's business.
///
/// # Type Parameters
/// * `B` - The backend type
#[derive(Module, Debug)]
pub struct LSTM<B: Backend> {
    stack: MultiLayerLSTM<B>,
    fc: Linear<B>,
    hidden_size: usize,
    output_size: usize,
}

impl<B: Backend> LSTM<B> {
    /// Create a new projected LSTM
    ///
    /// # Arguments
    /// * `input_size` - Number of input features
    /// * `hidden_size` - Width of every recurrent layer
    /// * `output_size` - Width of the projected output
    /// * `num_layers` - Number of stacked layers, at least 1
    /// * `dropout_rate` - Inter-layer dropout rate in `[0, 1)`
    /// * `device` - Device to create the module on
    pub fn new(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        num_layers: usize,
        dropout_rate: f64,
        device: &B::Device,
    ) -> Self {
        if output_size == 0 {
            panic!("output_size must be positive, got 0");
        }

        let stack = MultiLayerLSTM::new(input_size, hidden_size, num_layers, dropout_rate, device);
        let fc = LinearConfig::new(hidden_size, output_size)
            .with_bias(true)
            .init(device);

        Self {
            stack,
            fc,
            hidden_size,
            output_size,
        }
    }

    /// Get the input size
    pub fn input_size(&self) -> usize {
        self.stack.input_size()
    }

    /// Get the hidden size
    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Get the output size
    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Get the number of layers
    pub fn num_layers(&self) -> usize {
        self.stack.num_layers()
    }

    /// Sequence mode: process a whole input sequence
    ///
    /// The top layer's hidden sequence is flattened over batch x time, pushed
    /// through the projection, and reshaped back.
    ///
    /// # Arguments
    /// * `input_seq` - Input tensor of shape `[batch_size, seq_len, input_size]`
    /// * `state` - Optional initial state; zero-filled when `None`
    ///
    /// # Returns
    /// Tuple of (output_seq, final_state) where output_seq has shape
    /// `[batch_size, seq_len, output_size]`.
    pub fn forward(
        &self,
        input_seq: Tensor<B, 3>,
        state: Option<LstmState<B>>,
    ) -> (Tensor<B, 3>, LstmState<B>) {
        let (hidden_seq, state) = self.stack.forward(input_seq, state);

        let [batch_size, seq_len, _] = hidden_seq.dims();
        let flat = hidden_seq.reshape([batch_size * seq_len, self.hidden_size]);
        let output_seq = self
            .fc
            .forward(flat)
            .reshape([batch_size, seq_len, self.output_size]);

        (output_seq, state)
    }

    /// Single-step mode: process one timestep
    ///
    /// # Arguments
    /// * `x_t` - Input tensor of shape `[batch_size, input_size]`
    /// * `state` - Optional previous state; zero-filled when `None`
    ///
    /// # Returns
    /// Tuple of (output_t, new_state) where output_t has shape
    /// `[batch_size, output_size]`. The state discipline of
    /// [`MultiLayerLSTM::step`] carries over unchanged.
    pub fn step(
        &self,
        x_t: Tensor<B, 2>,
        state: Option<LstmState<B>>,
    ) -> (Tensor<B, 2>, LstmState<B>) {
        let (h, state) = self.stack.step(x_t, state);
        (self.fc.forward(h), state)
    }
}
