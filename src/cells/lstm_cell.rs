use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Standard LSTM cell
///
/// Implements the standard LSTM equations:
/// - g = tanh(W_ig @ x + b_ig + W_hg @ h)
/// - i = sigmoid(W_ii @ x + b_ii + W_hi @ h)
/// - f = sigmoid(W_if @ x + b_if + W_hf @ h + 1)
/// - o = sigmoid(W_io @ x + b_io + W_ho @ h)
/// - c' = f * c + i * g
/// - h' = o * tanh(c')
///
/// The four gate projections are fused into a single `4 * hidden_size` map
/// per source (input and recurrent).
#[derive(Module, Debug)]
pub struct LSTMCell<B: Backend> {
    input_size: usize,
    hidden_size: usize,
    input_map: Linear<B>,     // Maps input to 4 * hidden_size (with bias)
    recurrent_map: Linear<B>, // Maps hidden state to 4 * hidden_size (no bias)
}

impl<B: Backend> LSTMCell<B> {
    /// Create a new LSTM cell
    ///
    /// # Arguments
    /// * `input_size` - Size of the input features
    /// * `hidden_size` - Size of the hidden and cell states
    /// * `device` - Device to create the module on
    pub fn new(input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        let input_map = LinearConfig::new(input_size, 4 * hidden_size)
            .with_bias(true)
            .init(device);

        let recurrent_map = LinearConfig::new(hidden_size, 4 * hidden_size)
            .with_bias(false)
            .init(device);

        Self {
            input_size,
            hidden_size,
            input_map,
            recurrent_map,
        }
    }

    /// Get the input size
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Get the hidden size
    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Perform one timestep transition
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape `[batch_size, input_size]`
    /// * `states` - Tuple of (hidden_state, cell_state), each of shape `[batch_size, hidden_size]`
    ///
    /// # Returns
    /// Tuple of (new_hidden_state, new_cell_state). The state tensors passed
    /// in are left untouched; the returned states are fresh storage.
    pub fn forward(
        &self,
        input: Tensor<B, 2>,
        states: (Tensor<B, 2>, Tensor<B, 2>),
    ) -> (Tensor<B, 2>, Tensor<B, 2>) {
        let (hidden_state, cell_state) = states;

        // Compute combined transformation
        let input_contrib = self.input_map.forward(input);
        let recurrent_contrib = self.recurrent_map.forward(hidden_state);
        let z = input_contrib + recurrent_contrib;

        // Split into 4 gates
        let chunks = z.chunk(4, 1);
        let cell_candidate = chunks[0].clone(); // g
        let input_gate = chunks[1].clone(); // i
        let forget_gate = chunks[2].clone(); // f
        let output_gate = chunks[3].clone(); // o

        // Apply activations
        let cell_candidate = cell_candidate.tanh();
        let input_gate = activation::sigmoid(input_gate);
        let forget_gate = activation::sigmoid(forget_gate + 1.0); // Add 1.0 bias to forget gate
        let output_gate = activation::sigmoid(output_gate);

        // Update cell state: c' = f * c + i * g
        let new_cell = cell_state * forget_gate + cell_candidate * input_gate;

        // Update hidden state: h' = o * tanh(c')
        let new_hidden = new_cell.clone().tanh() * output_gate;

        (new_hidden, new_cell)
    }

    /// Run the cell across a whole sequence
    ///
    /// Iterates [`Self::forward`] over the time axis, collecting the hidden
    /// state at every timestep.
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape `[batch_size, seq_len, input_size]`
    /// * `states` - Initial (hidden_state, cell_state), each `[batch_size, hidden_size]`
    ///
    /// # Returns
    /// Tuple of (hidden_seq, (h_final, c_final)) where hidden_seq has shape
    /// `[batch_size, seq_len, hidden_size]`.
    pub fn forward_sequence(
        &self,
        input: Tensor<B, 3>,
        states: (Tensor<B, 2>, Tensor<B, 2>),
    ) -> (Tensor<B, 3>, (Tensor<B, 2>, Tensor<B, 2>)) {
        let [_, seq_len, _] = input.dims();
        let (mut hidden_state, mut cell_state) = states;

        let mut outputs: Vec<Tensor<B, 2>> = Vec::with_capacity(seq_len);

        for t in 0..seq_len {
            // input[batch, t, features] -> [batch, features]
            let step_input = input.clone().narrow(1, t, 1).squeeze(1);

            let (new_hidden, new_cell) = self.forward(step_input, (hidden_state, cell_state));
            hidden_state = new_hidden;
            cell_state = new_cell;

            outputs.push(hidden_state.clone());
        }

        let hidden_seq = Tensor::stack(outputs, 1); // [batch, seq_len, hidden_size]
        (hidden_seq, (hidden_state, cell_state))
    }
}
