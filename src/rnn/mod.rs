//! # Multi-layer Recurrent Layers
//!
//! This module provides the multi-layer LSTM stack and the projected model
//! built on top of it. **These are the primary APIs most users should use.**
//!
//! ## Available Layers
//!
//! | Layer | Description |
//! |-------|-------------|
//! | [`MultiLayerLSTM`] | Vertical stack of LSTM cells, hidden output |
//! | [`LSTM`] | Stack plus linear output projection, logits output |
//!
//! Both layers expose two execution modes on one type:
//!
//! - **Sequence mode** (`forward`): consume a whole `[batch, time, features]`
//!   sequence and return the top layer's output at every timestep plus the
//!   final per-layer state.
//! - **Single-step mode** (`step`): consume one `[batch, features]` timestep
//!   and return the top layer's new hidden vector plus the full updated
//!   per-layer state. The decoder drives this mode.
//!
//! ## Tensor Shapes
//!
//! ### Input Tensor
//!
//! | Mode | Shape |
//! |------|-------|
//! | Sequence | `[batch, seq_len, input_size]` |
//! | Single-step | `[batch, input_size]` |
//!
//! ### Output Tensor
//!
//! | Layer, mode | Shape |
//! |-------------|-------|
//! | `MultiLayerLSTM`, sequence | `[batch, seq_len, hidden_size]` |
//! | `MultiLayerLSTM`, single-step | `[batch, hidden_size]` |
//! | `LSTM`, sequence | `[batch, seq_len, output_size]` |
//! | `LSTM`, single-step | `[batch, output_size]` |
//!
//! ### Recurrent State
//!
//! [`LstmState`] holds one (hidden, cell) pair of `[batch, hidden_size]`
//! tensors per layer. States default to zeros when not supplied. A state
//! returned from any call is independent storage from the state passed in;
//! callers may keep using (or backpropagate through) the old handles safely.
//!
//! ## Common Patterns
//!
//! ### Encode a sequence, then decode step by step
//!
//! ```ignore
//! let (hidden_seq, state) = stack.forward(source_seq, None);
//!
//! let mut state = state;
//! for _ in 0..horizon {
//!     let (h, next_state) = stack.step(x_t, Some(state));
//!     state = next_state;
//!     // pick the next x_t from h ...
//! }
//! ```
//!
//! ### Stateful processing (preserve state across batches)
//!
//! ```ignore
//! let (out1, state) = stack.forward(batch1, None);
//! let (out2, state) = stack.forward(batch2, Some(state));
//! ```

pub mod lstm;
pub mod stack;
pub mod state;

pub use lstm::LSTM;
pub use stack::MultiLayerLSTM;
pub use state::LstmState;
