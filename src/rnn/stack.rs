use crate::cells::LSTMCell;
use crate::rnn::LstmState;
use burn::module::Module;
use burn::nn::{Dropout, DropoutConfig};
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Multi-layer LSTM stack
///
/// Composes LSTM cells vertically: layer 0 consumes the raw input, every
/// layer above consumes the output of the layer below. No skip connections.
/// Dropout, when configured with a non-zero rate, is applied to each layer's
/// output before it feeds the next layer (never after the top layer) and is
/// only active during autodiff-enabled (training) execution.
///
/// One type carries both execution modes: [`Self::forward`] for whole
/// sequences and [`Self::step`] for one timestep at a time.
///
/// # Type Parameters
/// * `B` - The backend type
#[derive(Module, Debug)]
pub struct MultiLayerLSTM<B: Backend> {
    /// One cell per layer; layer 0 maps `input_size`, the rest `hidden_size`
    cells: Vec<LSTMCell<B>>,
    /// Inter-layer dropout, absent when the rate is 0
    dropout: Option<Dropout>,
    input_size: usize,
    hidden_size: usize,
    num_layers: usize,
}

impl<B: Backend> MultiLayerLSTM<B> {
    /// Create a new multi-layer LSTM stack
    ///
    /// # Arguments
    /// * `input_size` - Number of input features (layer 0 only)
    /// * `hidden_size` - Width of every layer's hidden and cell state
    /// * `num_layers` - Number of stacked layers, at least 1
    /// * `dropout_rate` - Inter-layer dropout rate in `[0, 1)`
    /// * `device` - Device to create the module on
    pub fn new(
        input_size: usize,
        hidden_size: usize,
        num_layers: usize,
        dropout_rate: f64,
        device: &B::Device,
    ) -> Self {
        if num_layers == 0 {
            panic!("num_layers must be at least 1, got 0");
        }
        if input_size == 0 || hidden_size == 0 {
            panic!(
                "input_size and hidden_size must be positive, got {} and {}",
                input_size, hidden_size
            );
        }
        if !(0.0..1.0).contains(&dropout_rate) {
            panic!("dropout_rate must be in [0, 1), got {}", dropout_rate);
        }

        let mut cells = vec![LSTMCell::new(input_size, hidden_size, device)];
        for _ in 1..num_layers {
            cells.push(LSTMCell::new(hidden_size, hidden_size, device));
        }

        let dropout = if dropout_rate > 0.0 {
            Some(DropoutConfig::new(dropout_rate).init())
        } else {
            None
        };

        Self {
            cells,
            dropout,
            input_size,
            hidden_size,
            num_layers,
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

    /// Get the number of layers
    pub fn num_layers(&self) -> usize {
        self.num_layers
    }

    /// Sequence mode: process a whole input sequence
    ///
    /// Layer 0 consumes `input_seq` across the full time axis; each layer
    /// above consumes the output sequence of the layer below.
    ///
    /// # Arguments
    /// * `input_seq` - Input tensor of shape `[batch_size, seq_len, input_size]`
    /// * `state` - Optional initial state; zero-filled (and detached) when `None`
    ///
    /// # Returns
    /// Tuple of (hidden_seq, final_state) where hidden_seq is the top layer's
    /// output at every timestep, shape `[batch_size, seq_len, hidden_size]`.
    pub fn forward(
        &self,
        input_seq: Tensor<B, 3>,
        state: Option<LstmState<B>>,
    ) -> (Tensor<B, 3>, LstmState<B>) {
        let [batch_size, _, features] = input_seq.dims();
        if features != self.input_size {
            panic!(
                "input feature width {} does not match configured input_size {}",
                features, self.input_size
            );
        }

        let device = input_seq.device();
        let state = state.unwrap_or_else(|| {
            LstmState::zeros(self.num_layers, batch_size, self.hidden_size, &device)
        });
        self.check_state(&state, batch_size);

        let mut hidden_layers: Vec<Tensor<B, 2>> = Vec::with_capacity(self.num_layers);
        let mut cell_layers: Vec<Tensor<B, 2>> = Vec::with_capacity(self.num_layers);

        let mut layer_input = input_seq;
        for (i, cell) in self.cells.iter().enumerate() {
            let (hidden_seq, (h, c)) =
                cell.forward_sequence(layer_input, (state.hidden(i), state.cell(i)));
            hidden_layers.push(h);
            cell_layers.push(c);

            layer_input = hidden_seq;
            if i + 1 < self.num_layers {
                if let Some(ref dropout) = self.dropout {
                    layer_input = dropout.forward(layer_input);
                }
            }
        }

        (
            layer_input,
            LstmState::from_layers(hidden_layers, cell_layers),
        )
    }

    /// Single-step mode: process one timestep
    ///
    /// Layer 0 consumes `x_t`; each layer above consumes the new hidden
    /// vector of the layer below (not the previous timestep's hidden vector).
    ///
    /// The returned state is freshly allocated per layer; the caller-supplied
    /// state tensors are never written to, so tensors already woven into a
    /// gradient computation stay valid.
    ///
    /// # Arguments
    /// * `x_t` - Input tensor of shape `[batch_size, input_size]`
    /// * `state` - Optional previous state; zero-filled when `None`
    ///
    /// # Returns
    /// Tuple of (h, new_state) where h is the top layer's new hidden vector,
    /// shape `[batch_size, hidden_size]`.
    pub fn step(
        &self,
        x_t: Tensor<B, 2>,
        state: Option<LstmState<B>>,
    ) -> (Tensor<B, 2>, LstmState<B>) {
        let [batch_size, features] = x_t.dims();
        if features != self.input_size {
            panic!(
                "input feature width {} does not match configured input_size {}",
                features, self.input_size
            );
        }

        let device = x_t.device();
        let state = state.unwrap_or_else(|| {
            LstmState::zeros(self.num_layers, batch_size, self.hidden_size, &device)
        });
        self.check_state(&state, batch_size);

        let mut hidden_layers: Vec<Tensor<B, 2>> = Vec::with_capacity(self.num_layers);
        let mut cell_layers: Vec<Tensor<B, 2>> = Vec::with_capacity(self.num_layers);

        let mut layer_input = x_t;
        for (i, cell) in self.cells.iter().enumerate() {
            let (h, c) = cell.forward(layer_input, (state.hidden(i), state.cell(i)));

            layer_input = h.clone();
            hidden_layers.push(h);
            cell_layers.push(c);

            if i + 1 < self.num_layers {
                if let Some(ref dropout) = self.dropout {
                    layer_input = dropout.forward(layer_input);
                }
            }
        }

        (
            layer_input,
            LstmState::from_layers(hidden_layers, cell_layers),
        )
    }

    fn check_state(&self, state: &LstmState<B>, batch_size: usize) {
        if state.num_layers() != self.num_layers {
            panic!(
                "state has {} layers, stack has {}",
                state.num_layers(),
                self.num_layers
            );
        }
        if state.hidden_size() != self.hidden_size {
            panic!(
                "state hidden width {} does not match configured hidden_size {}",
                state.hidden_size(),
                self.hidden_size
            );
        }
        if state.batch_size() != batch_size {
            panic!(
                "state batch size {} does not match input batch size {}",
                state.batch_size(),
                batch_size
            );
        }
    }
}
