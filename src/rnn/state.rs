use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Per-layer recurrent memory of a multi-layer LSTM
///
/// Holds one (hidden, cell) pair of `[batch_size, hidden_size]` tensors per
/// layer, ordered bottom to top. Layer states always have shape
/// `[batch_size, hidden_size]` regardless of the layer's input width.
///
/// A state handed into a layer call is never written to; updated states come
/// back as fresh storage. This keeps earlier timesteps' tensors valid inside
/// an active gradient computation.
#[derive(Clone, Debug)]
pub struct LstmState<B: Backend> {
    hidden: Vec<Tensor<B, 2>>,
    cell: Vec<Tensor<B, 2>>,
}

impl<B: Backend> LstmState<B> {
    /// Create a zero-filled state for `num_layers` layers
    ///
    /// Zero tensors carry no gradient history, so a fresh state is detached
    /// from any prior computation graph.
    pub fn zeros(
        num_layers: usize,
        batch_size: usize,
        hidden_size: usize,
        device: &B::Device,
    ) -> Self {
        if num_layers == 0 {
            panic!("num_layers must be at least 1, got 0");
        }

        let hidden = (0..num_layers)
            .map(|_| Tensor::<B, 2>::zeros([batch_size, hidden_size], device))
            .collect();
        let cell = (0..num_layers)
            .map(|_| Tensor::<B, 2>::zeros([batch_size, hidden_size], device))
            .collect();

        Self { hidden, cell }
    }

    /// Build a state from per-layer hidden and cell tensors
    ///
    /// # Panics
    /// If the two collections differ in length, are empty, or contain tensors
    /// of inconsistent shapes.
    pub fn from_layers(hidden: Vec<Tensor<B, 2>>, cell: Vec<Tensor<B, 2>>) -> Self {
        if hidden.is_empty() {
            panic!("state must contain at least one layer");
        }
        if hidden.len() != cell.len() {
            panic!(
                "hidden and cell layer counts differ: {} vs {}",
                hidden.len(),
                cell.len()
            );
        }

        let dims = hidden[0].dims();
        for (i, tensor) in hidden.iter().chain(cell.iter()).enumerate() {
            if tensor.dims() != dims {
                panic!(
                    "inconsistent state shapes: expected {:?}, got {:?} at entry {}",
                    dims,
                    tensor.dims(),
                    i
                );
            }
        }

        Self { hidden, cell }
    }

    /// Build a state from stacked `[num_layers, batch_size, hidden_size]`
    /// hidden and cell tensors, e.g. an encoder's final state
    pub fn from_stacked(hidden: Tensor<B, 3>, cell: Tensor<B, 3>) -> Self {
        if hidden.dims() != cell.dims() {
            panic!(
                "stacked hidden and cell shapes differ: {:?} vs {:?}",
                hidden.dims(),
                cell.dims()
            );
        }

        let [num_layers, _, _] = hidden.dims();
        let split = |stacked: Tensor<B, 3>| -> Vec<Tensor<B, 2>> {
            (0..num_layers)
                .map(|i| stacked.clone().narrow(0, i, 1).squeeze(0))
                .collect()
        };

        Self::from_layers(split(hidden), split(cell))
    }

    /// Number of layers in this state
    pub fn num_layers(&self) -> usize {
        self.hidden.len()
    }

    /// Batch size of the layer states
    pub fn batch_size(&self) -> usize {
        self.hidden[0].dims()[0]
    }

    /// Hidden width of the layer states
    pub fn hidden_size(&self) -> usize {
        self.hidden[0].dims()[1]
    }

    /// The hidden state of one layer, shape `[batch_size, hidden_size]`
    pub fn hidden(&self, layer: usize) -> Tensor<B, 2> {
        self.hidden[layer].clone()
    }

    /// The cell state of one layer, shape `[batch_size, hidden_size]`
    pub fn cell(&self, layer: usize) -> Tensor<B, 2> {
        self.cell[layer].clone()
    }

    /// All hidden states stacked into `[num_layers, batch_size, hidden_size]`
    pub fn stacked_hidden(&self) -> Tensor<B, 3> {
        Tensor::stack(self.hidden.clone(), 0)
    }

    /// All cell states stacked into `[num_layers, batch_size, hidden_size]`
    pub fn stacked_cell(&self) -> Tensor<B, 3> {
        Tensor::stack(self.cell.clone(), 0)
    }
}
