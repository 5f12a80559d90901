//! Basic decoding example
//!
//! Builds a small decoder, seeds it with a zero encoder state, and decodes a
//! short target sequence twice (once mostly teacher-forced, once fully
//! free-running), printing the sampled token ids.

use burn::backend::NdArray;
use burn::tensor::Tensor;
use rand::rngs::StdRng;
use rand::SeedableRng;
use seq2seq_lstm::prelude::*;

fn main() {
    println!("=== seq2seq-lstm decoding example ===\n");

    // Use the NdArray backend (CPU)
    type Backend = NdArray<f32>;
    let device = Default::default();

    // 16-token vocabulary embedded into 8 features, 2 layers of width 32,
    // logits over the same 16 tokens
    let config = Seq2SeqConfig::new(8, 32, 16, 16).with_num_layers(2);
    let decoder = config.init::<Backend>(&device);

    println!("Created decoder:");
    println!("  Input/embedding size: 8");
    println!("  Hidden size: 32");
    println!("  Layers: 2");
    println!("  Vocabulary: 16");
    println!();

    // Reference inputs [batch=2, time=6, features=8] and a zero encoder state
    let input_seq = Tensor::<Backend, 3>::random(
        [2, 6, 8],
        burn::tensor::Distribution::Uniform(-1.0, 1.0),
        &device,
    );
    let state = LstmState::zeros(2, 2, 32, &device);

    // Mostly teacher-forced decode
    let mut rng = StdRng::seed_from_u64(7);
    let (outputs, tokens) = decoder.decode(
        input_seq.clone(),
        state.clone(),
        0.9,
        1.0,
        &mut rng,
    );

    println!("Teacher-forced decode:");
    println!("  Logit shape:  {:?}", outputs.dims());
    println!("  Token shape:  {:?}", tokens.dims());
    println!(
        "  Tokens:       {:?}",
        tokens.to_data().to_vec::<i64>().unwrap()
    );
    println!();

    // Free-running decode at a lower temperature (sharper sampling)
    let mut rng = StdRng::seed_from_u64(7);
    let (_, tokens) = decoder.decode(input_seq, state, 0.0, 0.5, &mut rng);

    println!("Free-running decode (temperature 0.5):");
    println!(
        "  Tokens:       {:?}",
        tokens.to_data().to_vec::<i64>().unwrap()
    );
    println!("  (a {} in a row ends it; later steps emit {})", EOS_TOKEN, PAD_TOKEN);
    println!();

    println!("=== Example completed successfully! ===");
}
