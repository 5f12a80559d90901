#[cfg(test)]
mod tests {
    use burn::backend::NdArray;
    use burn::tensor::Tensor;
    use seq2seq_lstm::cells::LSTMCell;

    type Backend = NdArray<f32>;

    #[test]
    fn test_lstm_cell_creation() {
        let device = Default::default();
        let cell = LSTMCell::<Backend>::new(20, 50, &device);

        assert_eq!(cell.input_size(), 20);
        assert_eq!(cell.hidden_size(), 50);
    }

    #[test]
    fn test_lstm_cell_forward() {
        let device = Default::default();
        let cell = LSTMCell::<Backend>::new(20, 50, &device);

        let batch_size = 4;
        let input = Tensor::<Backend, 2>::zeros([batch_size, 20], &device);
        let h = Tensor::<Backend, 2>::zeros([batch_size, 50], &device);
        let c = Tensor::<Backend, 2>::zeros([batch_size, 50], &device);

        let (new_h, new_c) = cell.forward(input, (h, c));

        assert_eq!(new_h.dims(), [batch_size, 50]);
        assert_eq!(new_c.dims(), [batch_size, 50]);
    }

    #[test]
    fn test_lstm_cell_state_evolves() {
        let device = Default::default();
        let cell = LSTMCell::<Backend>::new(10, 20, &device);

        let input = Tensor::<Backend, 2>::random(
            [2, 10],
            burn::tensor::Distribution::Uniform(0.0, 1.0),
            &device,
        );

        let mut h = Tensor::<Backend, 2>::zeros([2, 20], &device);
        let mut c = Tensor::<Backend, 2>::zeros([2, 20], &device);

        for _ in 0..3 {
            (h, c) = cell.forward(input.clone(), (h, c));
        }

        let h_sum = h.abs().sum().into_scalar();
        let c_sum = c.abs().sum().into_scalar();
        assert!(
            h_sum > 0.0 || c_sum > 0.0,
            "States should have changed after processing inputs"
        );
    }

    #[test]
    fn test_lstm_cell_does_not_mutate_inputs() {
        let device = Default::default();
        let cell = LSTMCell::<Backend>::new(10, 20, &device);

        let h = Tensor::<Backend, 2>::random(
            [2, 20],
            burn::tensor::Distribution::Uniform(-1.0, 1.0),
            &device,
        );
        let c = Tensor::<Backend, 2>::random(
            [2, 20],
            burn::tensor::Distribution::Uniform(-1.0, 1.0),
            &device,
        );
        let input = Tensor::<Backend, 2>::ones([2, 10], &device);

        let h_before: Vec<f32> = h.to_data().to_vec().unwrap();
        let c_before: Vec<f32> = c.to_data().to_vec().unwrap();

        let _ = cell.forward(input.clone(), (h.clone(), c.clone()));
        let _ = cell.forward(input, (h.clone(), c.clone()));

        let h_after: Vec<f32> = h.to_data().to_vec().unwrap();
        let c_after: Vec<f32> = c.to_data().to_vec().unwrap();

        assert_eq!(h_before, h_after, "Hidden state input must stay untouched");
        assert_eq!(c_before, c_after, "Cell state input must stay untouched");
    }

    #[test]
    fn test_lstm_cell_sequence_mode() {
        let device = Default::default();
        let cell = LSTMCell::<Backend>::new(20, 50, &device);

        let input = Tensor::<Backend, 3>::random(
            [4, 10, 20],
            burn::tensor::Distribution::Uniform(-1.0, 1.0),
            &device,
        );
        let h0 = Tensor::<Backend, 2>::zeros([4, 50], &device);
        let c0 = Tensor::<Backend, 2>::zeros([4, 50], &device);

        let (hidden_seq, (h_final, c_final)) = cell.forward_sequence(input, (h0, c0));

        assert_eq!(hidden_seq.dims(), [4, 10, 50]);
        assert_eq!(h_final.dims(), [4, 50]);
        assert_eq!(c_final.dims(), [4, 50]);

        // The last sequence slot must be the final hidden state
        let last = hidden_seq.narrow(1, 9, 1).squeeze::<2>(1);
        let diff = (last - h_final).abs().max().into_scalar();
        assert!(diff < 1e-6);
    }
}
