//! # seq2seq-lstm
//!
//! A from-scratch multi-layer LSTM sequence encoder/decoder built on the Burn
//! framework.
//!
//! ## Features
//!
//! - **LSTMCell**: the standard LSTM recurrence, usable one timestep at a time
//!   or over a whole sequence
//! - **MultiLayerLSTM**: vertical composition of cells with both a sequence
//!   mode and a single-step mode on one type
//! - **LSTM**: the stack plus a linear output projection (logits out)
//! - **LSTMDecoder**: autoregressive decoding with teacher forcing,
//!   temperature-controlled sampling, and per-sequence finished masking
//! - **Injectable randomness**: every stochastic draw goes through a
//!   caller-supplied `rand::Rng`, so decoding is reproducible under a seed
//!
//! ## Quick Start
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use seq2seq_lstm::prelude::*;
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//!
//! // 8-token vocabulary embedded into 3 features, 2 stacked layers of width 4,
//! // 5-way output logits.
//! let decoder = Seq2SeqConfig::new(3, 4, 5, 8)
//!     .with_num_layers(2)
//!     .init::<Backend>(&device);
//!
//! // Reference input sequence [batch=2, time=4, features=3] and the encoder's
//! // final state (zeros here).
//! let input_seq = Tensor::<Backend, 3>::zeros([2, 4, 3], &device);
//! let state = LstmState::zeros(2, 2, 4, &device);
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let (outputs, tokens) = decoder.decode(input_seq, state, 0.5, 1.0, &mut rng);
//!
//! assert_eq!(outputs.dims(), [2, 4, 5]);
//! assert_eq!(tokens.dims(), [2, 4]);
//! ```
//!
//! ## Layer-level Usage
//!
//! For direct access to the recurrent core (e.g. to run the encoder side):
//!
//! ```ignore
//! use seq2seq_lstm::rnn::MultiLayerLSTM;
//!
//! let stack = MultiLayerLSTM::<Backend>::new(16, 32, 2, 0.0, &device);
//!
//! // Sequence mode: [batch, time, features] in, [batch, time, hidden] out.
//! let (hidden_seq, state) = stack.forward(input_seq, None);
//!
//! // Single-step mode: [batch, features] in, fresh per-layer state out.
//! let (h, state) = stack.step(x_t, Some(state));
//! ```

pub mod cells;
pub mod config;
pub mod decoder;
pub mod rnn;
pub mod sampling;

pub mod prelude {
    pub use crate::cells::LSTMCell;
    pub use crate::config::Seq2SeqConfig;
    pub use crate::decoder::{LSTMDecoder, EOS_TOKEN, PAD_TOKEN};
    pub use crate::rnn::{LstmState, MultiLayerLSTM, LSTM};
    pub use crate::sampling::TemperatureSampler;
}
