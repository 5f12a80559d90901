//! Temperature-controlled categorical sampling over batched logits.

use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Samples one token per batch row from temperature-scaled logits
///
/// Logits are divided by the temperature and softmaxed on-tensor; the
/// resulting distribution is brought to the host and each row is drawn from
/// with a single categorical sample. Low temperatures sharpen the
/// distribution towards the arg-max index, high temperatures flatten it.
///
/// All randomness comes from the rng the caller passes in, so sampling is
/// reproducible under a seeded generator.
pub struct TemperatureSampler {
    temperature: f64,
}

impl TemperatureSampler {
    /// Create a sampler with the given temperature
    ///
    /// # Panics
    /// If `temperature` is not strictly positive.
    pub fn new(temperature: f64) -> Self {
        if !(temperature > 0.0) {
            panic!("temperature must be > 0, got {}", temperature);
        }
        Self { temperature }
    }

    /// Get the temperature
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Draw one token id per batch row
    ///
    /// # Arguments
    /// * `logits` - Tensor of shape `[batch_size, num_classes]`
    /// * `rng` - Random source for the categorical draws
    ///
    /// # Panics
    /// If any row's distribution is non-finite or has zero mass. A NaN or Inf
    /// in the logits is an upstream bug and is surfaced here rather than
    /// papered over.
    pub fn sample_batch<B: Backend, R: Rng>(
        &self,
        logits: Tensor<B, 2>,
        rng: &mut R,
    ) -> Vec<i64> {
        let [batch_size, num_classes] = logits.dims();

        let probs = activation::softmax(logits.div_scalar(self.temperature), 1);
        let host: Vec<f32> = probs
            .into_data()
            .to_vec()
            .expect("probability buffer transfers to host");

        let mut sampled = Vec::with_capacity(batch_size);
        for (row_idx, row) in host.chunks(num_classes).enumerate() {
            if !row.iter().all(|p| p.is_finite()) {
                panic!(
                    "non-finite sampling distribution in batch row {} (logits contain NaN or Inf)",
                    row_idx
                );
            }
            let dist = WeightedIndex::new(row).unwrap_or_else(|err| {
                panic!("cannot sample batch row {}: {}", row_idx, err);
            });
            sampled.push(dist.sample(rng) as i64);
        }

        sampled
    }
}
