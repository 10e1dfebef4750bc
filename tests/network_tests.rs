// Integration tests for the network core: pixel encoding, the prediction
// rule, the reinforcement rule, input validation, and reset behavior.

use approx::assert_abs_diff_eq;
use glyphnet::network::{Connection, Network, NetworkError, CLASS_COUNT, INPUT_COUNT};
use rstest::rstest;

const INK: i32 = -16_777_216;
const BLANK: i32 = -1;

#[rstest]
#[case(-2, 1.0)]
#[case(-1, 0.0)]
#[case(0, 0.0)]
#[case(INK, 1.0)]
fn pixel_encoding_threshold(#[case] pixel: i32, #[case] expected: f64) {
    let mut network = Network::with_dimensions(1, 1);
    network.step(&[pixel], 0, false).unwrap();
    assert_eq!(network.input_signal(0), expected);
}

#[test]
fn rejects_wrong_pixel_count() {
    let mut network = Network::new();
    let err = network.step(&[BLANK; 10], 0, true).unwrap_err();
    assert_eq!(
        err,
        NetworkError::PixelCountMismatch {
            expected: INPUT_COUNT,
            actual: 10,
        }
    );
}

#[test]
fn rejects_out_of_range_label() {
    let mut network = Network::new();
    let err = network.step(&[BLANK; INPUT_COUNT], 10, true).unwrap_err();
    assert_eq!(
        err,
        NetworkError::LabelOutOfRange {
            label: 10,
            classes: CLASS_COUNT,
        }
    );
    // validation fires before any weight moves
    for class in 0..CLASS_COUNT {
        for input in 0..INPUT_COUNT {
            assert_eq!(network.link_weight(class, input), 0.0);
        }
    }
}

#[test]
fn classify_rejects_wrong_pixel_count() {
    let mut network = Network::new();
    assert!(network.classify(&[INK; 3]).is_err());
}

#[test]
fn wrong_prediction_reinforces_only_the_labeled_output() {
    let mut network = Network::with_dimensions(4, 3);
    // ink on inputs 0 and 2; all signals tie at zero, so class 0 wins the
    // scan and label 1 is a miss
    let pixels = [INK, BLANK, INK, BLANK];
    let predicted = network.step(&pixels, 1, true).unwrap();
    assert_eq!(predicted, 0);
    assert_eq!(network.link_weight(1, 0), Connection::FAILURE_RATE);
    assert_eq!(network.link_weight(1, 1), 0.0);
    assert_eq!(network.link_weight(1, 2), Connection::FAILURE_RATE);
    assert_eq!(network.link_weight(1, 3), 0.0);
    for class in [0, 2] {
        for input in 0..4 {
            assert_eq!(network.link_weight(class, input), 0.0);
        }
    }
}

#[test]
fn correct_prediction_reinforces_at_half_strength() {
    let mut network = Network::with_dimensions(2, 2);
    // label 0 matches the all-zero tie-break, so the success rate applies
    network.step(&[INK, BLANK], 0, true).unwrap();
    assert_eq!(network.link_weight(0, 0), Connection::SUCCESS_RATE);
    assert_eq!(network.link_weight(0, 1), 0.0);
    assert_eq!(network.link_weight(1, 0), 0.0);
    assert_eq!(network.link_weight(1, 1), 0.0);
}

#[test]
fn evaluation_step_never_moves_weights() {
    let mut network = Network::with_dimensions(2, 2);
    network.step(&[INK, INK], 1, false).unwrap();
    assert_eq!(network.link_weight(1, 0), 0.0);
    assert_eq!(network.link_weight(1, 1), 0.0);
}

#[test]
fn output_signal_is_the_mean_not_the_sum() {
    let mut network = Network::with_dimensions(3, 1);
    let ink = [INK; 3];
    // a single-class network always predicts 0, so the step counts as
    // correct and puts the success rate on every link
    network.step(&ink, 0, true).unwrap();
    network.classify(&ink).unwrap();
    // three links each contribute 1.0 * SUCCESS_RATE, divided by three
    assert_abs_diff_eq!(
        network.output_signal(0),
        Connection::SUCCESS_RATE,
        epsilon = 1e-15
    );
}

#[test]
fn all_blank_sample_predicts_class_zero_without_weight_motion() {
    let mut network = Network::new();
    let blank = vec![BLANK; INPUT_COUNT];
    let predicted = network.step(&blank, 3, true).unwrap();
    assert_eq!(predicted, 0);
    // the miss reinforces label 3, but every origin signal is 0.0
    for input in 0..INPUT_COUNT {
        assert_eq!(network.link_weight(3, input), 0.0);
    }
}

#[test]
fn ink_makes_the_labeled_weights_grow() {
    let mut network = Network::new();
    let mut pixels = vec![BLANK; INPUT_COUNT];
    pixels[42] = INK;
    network.step(&pixels, 3, true).unwrap();
    assert_eq!(network.link_weight(3, 42), Connection::FAILURE_RATE);
    assert_eq!(network.link_weight(3, 41), 0.0);
    assert_eq!(network.link_weight(3, 43), 0.0);
}

#[test]
fn reset_restores_a_fresh_topology() {
    let mut network = Network::new();
    let pixels = vec![INK; INPUT_COUNT];
    for label in 0..CLASS_COUNT {
        network.step(&pixels, label, true).unwrap();
    }
    network.reset();
    assert_eq!(network.input_count(), INPUT_COUNT);
    assert_eq!(network.class_count(), CLASS_COUNT);
    for class in 0..CLASS_COUNT {
        for input in 0..INPUT_COUNT {
            assert_eq!(network.link_weight(class, input), 0.0);
        }
    }
}
