//! # Recurrent Cell Implementations
//!
//! Single-timestep transition functions. A cell maps
//! `(input, previous hidden, previous cell)` to `(new hidden, new cell)` and
//! is wrapped by the higher-level layers in [`crate::rnn`] for multi-layer
//! sequence processing.
//!
//! ## Tensor Shapes
//!
//! | Tensor | Shape | Description |
//! |--------|-------|-------------|
//! | `input` | `[batch, input_size]` | Input features |
//! | `hidden_state` | `[batch, hidden_size]` | Previous hidden state |
//! | `cell_state` | `[batch, hidden_size]` | Previous cell state |
//! | `new_hidden` | `[batch, hidden_size]` | Updated hidden state |
//! | `new_cell` | `[batch, hidden_size]` | Updated cell state |
//!
//! Cells never write into the state tensors they are given; every call
//! returns freshly allocated state.

pub mod lstm_cell;

pub use lstm_cell::LSTMCell;
