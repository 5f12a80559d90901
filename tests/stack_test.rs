#[cfg(test)]
mod tests {
    use burn::backend::{Autodiff, NdArray};
    use burn::tensor::Tensor;
    use seq2seq_lstm::rnn::{LstmState, MultiLayerLSTM};

    type Backend = NdArray<f32>;
    type AdBackend = Autodiff<NdArray<f32>>;

    #[test]
    fn test_shape_law() {
        let device = Default::default();

        for (layers, batch, hidden, seq_len) in [(1, 1, 4, 1), (2, 4, 8, 10), (3, 2, 16, 5)] {
            let stack = MultiLayerLSTM::<Backend>::new(6, hidden, layers, 0.0, &device);

            let input_seq = Tensor::<Backend, 3>::zeros([batch, seq_len, 6], &device);
            let (hidden_seq, state) = stack.forward(input_seq, None);
            assert_eq!(hidden_seq.dims(), [batch, seq_len, hidden]);
            assert_eq!(state.stacked_hidden().dims(), [layers, batch, hidden]);
            assert_eq!(state.stacked_cell().dims(), [layers, batch, hidden]);

            let x_t = Tensor::<Backend, 2>::zeros([batch, 6], &device);
            let (h, state) = stack.step(x_t, None);
            assert_eq!(h.dims(), [batch, hidden]);
            assert_eq!(state.stacked_hidden().dims(), [layers, batch, hidden]);
        }
    }

    #[test]
    fn test_no_mutation_law() {
        let device = Default::default();
        let stack = MultiLayerLSTM::<Backend>::new(6, 8, 2, 0.0, &device);

        let layer_state = || {
            Tensor::<Backend, 2>::random(
                [3, 8],
                burn::tensor::Distribution::Uniform(-1.0, 1.0),
                &device,
            )
        };
        let hidden = vec![layer_state(), layer_state()];
        let cell = vec![layer_state(), layer_state()];

        let before: Vec<Vec<f32>> = hidden
            .iter()
            .chain(cell.iter())
            .map(|t| t.to_data().to_vec().unwrap())
            .collect();

        let state = LstmState::from_layers(hidden.clone(), cell.clone());
        let x_t = Tensor::<Backend, 2>::ones([3, 6], &device);

        // Two calls with the same state objects; the originals must survive both
        let _ = stack.step(x_t.clone(), Some(state.clone()));
        let _ = stack.step(x_t, Some(state));

        let after: Vec<Vec<f32>> = hidden
            .iter()
            .chain(cell.iter())
            .map(|t| t.to_data().to_vec().unwrap())
            .collect();

        assert_eq!(before, after, "Caller-supplied state must stay untouched");
    }

    #[test]
    fn test_step_returns_fresh_state() {
        let device = Default::default();
        let stack = MultiLayerLSTM::<Backend>::new(6, 8, 2, 0.0, &device);

        let initial = LstmState::<Backend>::zeros(2, 3, 8, &device);
        let x_t = Tensor::<Backend, 2>::ones([3, 6], &device);

        let (_, updated) = stack.step(x_t, Some(initial.clone()));

        // The update must land in the returned state only
        let initial_sum = initial.stacked_hidden().abs().sum().into_scalar();
        let updated_sum = updated.stacked_hidden().abs().sum().into_scalar();
        assert_eq!(initial_sum, 0.0);
        assert!(updated_sum > 0.0);
    }

    #[test]
    fn test_sequence_mode_matches_stepping() {
        let device = Default::default();
        let stack = MultiLayerLSTM::<Backend>::new(6, 8, 3, 0.0, &device);

        let input_seq = Tensor::<Backend, 3>::random(
            [2, 7, 6],
            burn::tensor::Distribution::Uniform(-1.0, 1.0),
            &device,
        );

        let (hidden_seq, final_state) = stack.forward(input_seq.clone(), None);

        let mut state: Option<LstmState<Backend>> = None;
        for t in 0..7 {
            let x_t = input_seq.clone().narrow(1, t, 1).squeeze(1);
            let (h, next) = stack.step(x_t, state.take());
            state = Some(next);

            let expected = hidden_seq.clone().narrow(1, t, 1).squeeze::<2>(1);
            let diff = (h - expected).abs().max().into_scalar();
            assert!(diff < 1e-5, "Step output diverged at t={}", t);
        }

        let state = state.unwrap();
        let h_diff = (state.stacked_hidden() - final_state.stacked_hidden())
            .abs()
            .max()
            .into_scalar();
        let c_diff = (state.stacked_cell() - final_state.stacked_cell())
            .abs()
            .max()
            .into_scalar();
        assert!(h_diff < 1e-5);
        assert!(c_diff < 1e-5);
    }

    #[test]
    fn test_gradients_flow_to_initial_state() {
        let device = Default::default();
        let stack = MultiLayerLSTM::<AdBackend>::new(4, 6, 2, 0.0, &device);

        let h0 = Tensor::<AdBackend, 2>::random(
            [2, 6],
            burn::tensor::Distribution::Uniform(-1.0, 1.0),
            &device,
        )
        .require_grad();
        let c0 = Tensor::<AdBackend, 2>::random(
            [2, 6],
            burn::tensor::Distribution::Uniform(-1.0, 1.0),
            &device,
        )
        .require_grad();
        let h1 = Tensor::<AdBackend, 2>::zeros([2, 6], &device);
        let c1 = Tensor::<AdBackend, 2>::zeros([2, 6], &device);

        let state = LstmState::from_layers(vec![h0.clone(), h1], vec![c0.clone(), c1]);

        let x1 = Tensor::<AdBackend, 2>::ones([2, 4], &device);
        let x2 = Tensor::<AdBackend, 2>::ones([2, 4], &device) * 0.5;

        // Two chained steps; the loss must reach the state supplied before
        // the first one
        let (_, mid) = stack.step(x1, Some(state));
        let (h, _) = stack.step(x2, Some(mid));

        let grads = h.sum().backward();

        assert!(
            h0.grad(&grads).is_some(),
            "Hidden state must receive a gradient through both steps"
        );
        assert!(
            c0.grad(&grads).is_some(),
            "Cell state must receive a gradient through both steps"
        );
    }
}
