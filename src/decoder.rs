//! Autoregressive LSTM decoding with teacher forcing, temperature sampling,
//! and per-sequence finished masking.

use crate::rnn::{LstmState, LSTM};
use crate::sampling::TemperatureSampler;
use burn::module::Module;
use burn::nn::{Embedding, EmbeddingConfig};
use burn::tensor::backend::Backend;
use burn::tensor::{Int, Tensor};
use rand::Rng;

/// Token id substituted for every step after a sequence has finished
pub const PAD_TOKEN: i64 = 0;

/// Token id whose emission marks a sequence as finished
pub const EOS_TOKEN: i64 = 3;

/// Autoregressive LSTM decoder
///
/// Drives the single-step [`LSTM`] across a target sequence length, feeding
/// each step's input from either the reference sequence (teacher forcing) or
/// the embedding of the model's own sampled token, and masking tokens of
/// sequences that already emitted [`EOS_TOKEN`] with [`PAD_TOKEN`].
///
/// The target embedding table lives on the decoder; its vocabulary must use
/// the same padding and end-of-sequence ids as the constants above.
///
/// # Type Parameters
/// * `B` - The backend type
#[derive(Module, Debug)]
pub struct LSTMDecoder<B: Backend> {
    lstm: LSTM<B>,
    tgt_embedding: Embedding<B>,
    vocab_size: usize,
}

impl<B: Backend> LSTMDecoder<B> {
    /// Create a new decoder
    ///
    /// # Arguments
    /// * `input_size` - Width of the step inputs; also the embedding dimension
    /// * `hidden_size` - Width of every recurrent layer
    /// * `output_size` - Width of the output logits
    /// * `vocab_size` - Number of entries in the target embedding table
    /// * `num_layers` - Number of stacked layers, at least 1
    /// * `dropout_rate` - Inter-layer dropout rate in `[0, 1)`
    /// * `device` - Device to create the module on
    pub fn new(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        vocab_size: usize,
        num_layers: usize,
        dropout_rate: f64,
        device: &B::Device,
    ) -> Self {
        if vocab_size as i64 <= EOS_TOKEN {
            panic!(
                "vocab_size must exceed the end-of-sequence id {}, got {}",
                EOS_TOKEN, vocab_size
            );
        }
        if vocab_size < output_size {
            panic!(
                "vocab_size {} cannot be smaller than output_size {}: sampled token ids index the embedding table",
                vocab_size, output_size
            );
        }

        let lstm = LSTM::new(
            input_size,
            hidden_size,
            output_size,
            num_layers,
            dropout_rate,
            device,
        );
        let tgt_embedding = EmbeddingConfig::new(vocab_size, input_size).init(device);

        Self {
            lstm,
            tgt_embedding,
            vocab_size,
        }
    }

    /// Get the vocabulary size of the target embedding
    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    /// The projected recurrent model the decoder steps
    pub fn lstm(&self) -> &LSTM<B> {
        &self.lstm
    }

    /// Look up the embeddings of one token per batch row
    ///
    /// # Arguments
    /// * `tokens` - Token ids of shape `[batch_size]`
    ///
    /// # Returns
    /// Embedded features of shape `[batch_size, input_size]`.
    pub fn embed(&self, tokens: Tensor<B, 1, Int>) -> Tensor<B, 2> {
        let ids = tokens.unsqueeze_dim(1); // [batch, 1]
        self.tgt_embedding.forward(ids).squeeze(1)
    }

    /// Decode a full target sequence autoregressively
    ///
    /// Whether teacher forcing applies is drawn ONCE per call by comparing a
    /// single uniform sample against `teacher_forcing_ratio`; that one draw
    /// governs the input source for every step of this sequence.
    ///
    /// Each step runs the single-step model, samples one token per row from
    /// the temperature-scaled output distribution, substitutes [`PAD_TOKEN`]
    /// for rows that finished on an earlier step, and marks rows that just
    /// sampled [`EOS_TOKEN`] as finished from the next step on (the step that
    /// emits the end token still records it). The loop always runs the full
    /// `seq_len` steps; finishing early only masks tokens, never skips work,
    /// and the returned logits are never masked.
    ///
    /// # Arguments
    /// * `input_seq` - Reference inputs `[batch_size, seq_len, input_size]`;
    ///   timestep 0 seeds the first step, timestep t+1 is the teacher-forced
    ///   input for step t+1
    /// * `state` - Initial recurrent state, e.g. the encoder's final state
    /// * `teacher_forcing_ratio` - Probability in `[0, 1]` of teacher forcing
    ///   this call
    /// * `temperature` - Sampling temperature, strictly positive
    /// * `rng` - Random source for the teacher-forcing draw and every
    ///   categorical sample
    ///
    /// # Returns
    /// Tuple of (outputs, predicted_tokens) where outputs are the raw
    /// per-step logits `[batch_size, seq_len, output_size]` and
    /// predicted_tokens are the post-masking ids `[batch_size, seq_len]`.
    pub fn decode<R: Rng>(
        &self,
        input_seq: Tensor<B, 3>,
        state: LstmState<B>,
        teacher_forcing_ratio: f64,
        temperature: f64,
        rng: &mut R,
    ) -> (Tensor<B, 3>, Tensor<B, 2, Int>) {
        if !(0.0..=1.0).contains(&teacher_forcing_ratio) {
            panic!(
                "teacher_forcing_ratio must be in [0, 1], got {}",
                teacher_forcing_ratio
            );
        }
        let sampler = TemperatureSampler::new(temperature);

        let [batch_size, seq_len, _] = input_seq.dims();
        if seq_len == 0 {
            panic!("input_seq must contain at least one timestep");
        }
        let device = input_seq.device();

        // One draw per decode call, consumed regardless of the ratio so rng
        // streams stay aligned across ratios
        let use_teacher_forcing = rng.gen::<f64>() < teacher_forcing_ratio;

        let mut outputs: Vec<Tensor<B, 2>> = Vec::with_capacity(seq_len);
        let mut predicted: Vec<Tensor<B, 1, Int>> = Vec::with_capacity(seq_len);
        let mut finished = vec![false; batch_size];

        let mut state = state;
        let mut current_input: Tensor<B, 2> = input_seq.clone().narrow(1, 0, 1).squeeze(1);

        for t in 0..seq_len {
            let (output_t, next_state) = self.lstm.step(current_input, Some(state));
            state = next_state;

            let sampled = sampler.sample_batch(output_t.clone(), rng);

            // Predicate-select over the batch: finished rows emit padding,
            // active rows keep their sample
            let tokens: Vec<i64> = sampled
                .iter()
                .zip(finished.iter())
                .map(|(&id, &done)| if done { PAD_TOKEN } else { id })
                .collect();

            // A row that just emitted the end token freezes from the next
            // step on; its own end token stays recorded. Already-frozen rows
            // emit PAD_TOKEN above and cannot re-trigger here.
            for (row, &id) in tokens.iter().enumerate() {
                if id == EOS_TOKEN {
                    finished[row] = true;
                }
            }

            let token_t = Tensor::<B, 1, Int>::from_ints(tokens.as_slice(), &device);

            outputs.push(output_t);
            predicted.push(token_t.clone());

            current_input = if t + 1 < seq_len && use_teacher_forcing {
                input_seq.clone().narrow(1, t + 1, 1).squeeze(1)
            } else {
                self.embed(token_t)
            };
        }

        (Tensor::stack(outputs, 1), Tensor::stack(predicted, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::backend::Backend as BurnBackend;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type TestBackend = NdArray<f32>;
    type TestDevice = <TestBackend as BurnBackend>::Device;

    fn get_test_device() -> TestDevice {
        Default::default()
    }

    #[test]
    fn test_decoder_creation() {
        let device = get_test_device();
        let decoder = LSTMDecoder::<TestBackend>::new(8, 16, 10, 12, 2, 0.0, &device);

        assert_eq!(decoder.vocab_size(), 12);
        assert_eq!(decoder.lstm().input_size(), 8);
        assert_eq!(decoder.lstm().output_size(), 10);
    }

    #[test]
    fn test_embed_shapes() {
        let device = get_test_device();
        let decoder = LSTMDecoder::<TestBackend>::new(8, 16, 10, 12, 1, 0.0, &device);

        let tokens = Tensor::<TestBackend, 1, Int>::from_ints([0, 3, 7], &device);
        let embedded = decoder.embed(tokens);

        assert_eq!(embedded.dims(), [3, 8]);
    }

    #[test]
    fn test_decode_shapes() {
        let device = get_test_device();
        let decoder = LSTMDecoder::<TestBackend>::new(8, 16, 10, 12, 2, 0.0, &device);

        let input_seq = Tensor::<TestBackend, 3>::zeros([4, 6, 8], &device);
        let state = LstmState::zeros(2, 4, 16, &device);
        let mut rng = StdRng::seed_from_u64(5);

        let (outputs, tokens) = decoder.decode(input_seq, state, 0.5, 1.0, &mut rng);

        assert_eq!(outputs.dims(), [4, 6, 10]);
        assert_eq!(tokens.dims(), [4, 6]);
    }

    #[test]
    #[should_panic]
    fn test_invalid_ratio_rejected() {
        let device = get_test_device();
        let decoder = LSTMDecoder::<TestBackend>::new(8, 16, 10, 12, 1, 0.0, &device);

        let input_seq = Tensor::<TestBackend, 3>::zeros([2, 3, 8], &device);
        let state = LstmState::zeros(1, 2, 16, &device);
        let mut rng = StdRng::seed_from_u64(5);

        let _ = decoder.decode(input_seq, state, 1.5, 1.0, &mut rng);
    }

    #[test]
    #[should_panic]
    fn test_invalid_temperature_rejected() {
        let device = get_test_device();
        let decoder = LSTMDecoder::<TestBackend>::new(8, 16, 10, 12, 1, 0.0, &device);

        let input_seq = Tensor::<TestBackend, 3>::zeros([2, 3, 8], &device);
        let state = LstmState::zeros(1, 2, 16, &device);
        let mut rng = StdRng::seed_from_u64(5);

        let _ = decoder.decode(input_seq, state, 0.5, 0.0, &mut rng);
    }

    #[test]
    #[should_panic]
    fn test_small_vocab_rejected() {
        let device = get_test_device();
        let _ = LSTMDecoder::<TestBackend>::new(8, 16, 10, 3, 1, 0.0, &device);
    }

    #[test]
    #[should_panic]
    fn test_vocab_smaller_than_output_rejected() {
        let device = get_test_device();
        let _ = LSTMDecoder::<TestBackend>::new(8, 16, 10, 6, 1, 0.0, &device);
    }
}
