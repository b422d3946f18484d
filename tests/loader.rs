mod common;

use std::fs;

use neurodraw::{Loader, NeuroError};

use common::{all_digits, write_testing, write_training};

#[test]
fn missing_training_split_falls_back_to_testing() {
    let dir = tempfile::tempdir().unwrap();
    write_testing(dir.path(), &all_digits(2));

    let dataset = Loader::load(dir.path()).unwrap();

    assert!(dataset.used_fallback());
    assert!(dataset.train.shares_data_with(&dataset.test));
    assert_eq!(dataset.train.len(), 20);
    let fallback = dataset.fallback.as_ref().unwrap();
    assert!(fallback.path.ends_with("training"));
    assert!(!fallback.reason.is_empty());
}

#[test]
fn both_splits_load_independently() {
    let dir = tempfile::tempdir().unwrap();
    write_testing(dir.path(), &all_digits(1));
    write_training(dir.path(), &all_digits(3));

    let dataset = Loader::load(dir.path()).unwrap();

    assert!(!dataset.used_fallback());
    assert!(!dataset.train.shares_data_with(&dataset.test));
    assert_eq!(dataset.train.len(), 30);
    assert_eq!(dataset.test.len(), 10);
    assert_eq!((dataset.train.rows, dataset.train.cols), (28, 28));
}

#[test]
fn pixels_are_rescaled() {
    let dir = tempfile::tempdir().unwrap();
    write_testing(dir.path(), &all_digits(1));

    let dataset = Loader::load(dir.path()).unwrap();
    let image = &dataset.test.images[0];

    assert_eq!(image.len(), 784);
    assert!(image.iter().all(|&v| (0.0..=1.0).contains(&v)));
    assert!(image.iter().any(|&v| v == 1.0));
}

#[test]
fn exemplars_are_first_occurrences() {
    let dir = tempfile::tempdir().unwrap();
    write_testing(dir.path(), &all_digits(1));
    let mut labels = vec![5, 5, 0];
    labels.extend(all_digits(1));
    write_training(dir.path(), &labels);

    let dataset = Loader::load(dir.path()).unwrap();

    assert_eq!(dataset.examples[5], 0);
    assert_eq!(dataset.examples[0], 2);
    assert_eq!(dataset.examples[1], 4);
    assert_eq!(dataset.example(5).unwrap(), dataset.train.images[0].as_slice());
    assert!(dataset.example(10).is_none());
}

#[test]
fn exemplar_preview_is_upscaled() {
    let dir = tempfile::tempdir().unwrap();
    write_testing(dir.path(), &all_digits(1));

    let dataset = Loader::load(dir.path()).unwrap();
    let preview = dataset.example_image(3, 100).unwrap();

    assert_eq!(preview.dimensions(), (100, 100));
    assert!(preview.pixels().any(|p| p.0[0] > 0));
}

#[test]
fn missing_testing_split_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_training(dir.path(), &all_digits(1));

    let err = Loader::load(dir.path()).unwrap_err();

    assert!(matches!(err, NeuroError::MissingSplit { split: "testing", .. }));
    assert!(err.is_fatal_load());
}

#[test]
fn malformed_testing_split_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_testing(dir.path(), &all_digits(1));
    fs::write(dir.path().join("testing/t10k-images.idx3-ubyte"), [0u8, 0, 8, 3, 0]).unwrap();

    let err = Loader::load(dir.path()).unwrap_err();

    assert!(matches!(err, NeuroError::Malformed { .. }), "{}", err);
}

#[test]
fn count_mismatch_between_containers_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    write_testing(dir.path(), &all_digits(1));
    fs::write(
        dir.path().join("testing/t10k-labels.idx1-ubyte"),
        common::label_container(&[0, 1, 2]),
    )
    .unwrap();

    assert!(matches!(Loader::load(dir.path()), Err(NeuroError::Malformed { .. })));
}

#[test]
fn malformed_training_split_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    write_testing(dir.path(), &all_digits(1));
    write_training(dir.path(), &all_digits(1));
    fs::write(dir.path().join("training/train-labels.idx1-ubyte"), [1u8, 2, 3]).unwrap();

    let dataset = Loader::load(dir.path()).unwrap();

    assert!(dataset.used_fallback());
    assert!(dataset.fallback.unwrap().reason.contains("malformed"));
}

#[test]
fn missing_digit_in_training_labels_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_testing(dir.path(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);

    let err = Loader::load(dir.path()).unwrap_err();

    assert!(matches!(err, NeuroError::MissingLabel(9)));
}
