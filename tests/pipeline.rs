mod common;

use std::cell::Cell;

use neurodraw::{
    evaluate, Canvas, CanvasEvent, Config, Insight, Loader, Network, Point, PredictionHistory,
    TrainingDriver,
};

use common::{all_digits, write_testing};

#[test]
fn blank_canvas_gives_zero_confidences() {
    let config = Config::default();
    let network = Network::new(&config.network);
    let canvas = Canvas::new(config.canvas.clone());

    let outputs = network.forward(canvas.normalized().as_slice()).unwrap();

    assert_eq!(outputs, vec![0.0; 10]);
}

#[test]
fn drawn_stroke_reaches_the_network() {
    let config = Config::default();
    let network = Network::new(&config.network);
    let mut canvas = Canvas::new(config.canvas.clone());

    canvas.handle(CanvasEvent::PointerDown(Point::new(140.0, 40.0)));
    let live = canvas.handle(CanvasEvent::PointerMove(Point::new(140.0, 240.0))).unwrap();
    let done = canvas.handle(CanvasEvent::PointerUp).unwrap();
    assert_eq!(live, done);

    let outputs = network.forward(done.as_slice()).unwrap();
    assert_eq!(outputs.len(), 10);
    assert!(outputs.iter().all(|&p| p > 0.0 && p < 1.0));

    let insight = Insight::capture(&network, done.as_slice(), &config.visualization).unwrap();
    assert_eq!(insight.outputs, outputs);
    assert!(!insight.input_links.is_empty());

    let mut trace = PredictionHistory::new(10, config.visualization.max_history_size);
    trace.record(&outputs);
    assert_eq!(trace.len(), 1);
}

#[test]
fn training_on_loaded_data_lowers_error() {
    let dir = tempfile::tempdir().unwrap();
    write_testing(dir.path(), &all_digits(3));
    let dataset = Loader::load(dir.path()).unwrap();

    let mut config = Config::default();
    config.training.epochs = 8;
    config.training.batch_size = 4;

    let mut network = Network::new(&config.network);
    let before = evaluate(&network, &dataset.test.images, &dataset.test.labels).unwrap();

    let mut progress_calls = 0;
    let report = TrainingDriver::from_split(&dataset.train)
        .run(&mut network, &config.training, |_| progress_calls += 1, || false)
        .unwrap();

    assert_eq!(report.total_batches, 8 * 8);
    assert_eq!(progress_calls, report.total_batches);
    assert!(report.final_error().unwrap() < report.epoch_errors[0]);

    let after = evaluate(&network, &dataset.test.images, &dataset.test.labels).unwrap();
    assert!(after.mean_error < before.mean_error);
}

#[test]
fn cancelled_training_keeps_partial_progress() {
    let dir = tempfile::tempdir().unwrap();
    write_testing(dir.path(), &all_digits(2));
    let dataset = Loader::load(dir.path()).unwrap();
    let config = Config::default();

    let untouched = Network::new(&config.network);
    let mut network = Network::new(&config.network);
    let batches = Cell::new(0);
    let report = TrainingDriver::from_split(&dataset.train)
        .run(
            &mut network,
            &config.training,
            |_| batches.set(batches.get() + 1),
            || batches.get() >= 1,
        )
        .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.completed_batches, 1);
    assert_ne!(network.output_weights(), untouched.output_weights());
}
