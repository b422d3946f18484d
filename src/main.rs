// Headless session: load the dataset, train, score, then classify a stroke
// drawn through the same canvas path a UI would use.
//
//   neurodraw [config.json]
//
// RUST_LOG=debug shows per-batch progress.
use std::path::PathBuf;

use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use neurodraw::{
    evaluate, Canvas, CanvasEvent, ConfidenceBand, Config, Loader, Network, Point, TrainingDriver,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    Registry::default().with(filter).with(fmt_layer).init();
}

fn run() -> neurodraw::Result<()> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Config::load_json(&path)?,
        None => Config::default(),
    };
    config.validate()?;

    let dataset = Loader::load(&config.data_dir)?;
    if let Some(fallback) = &dataset.fallback {
        warn!(
            path = %fallback.path.display(),
            "no training split, the network trains on the testing split"
        );
    }

    let mut network = Network::new(&config.network);
    let driver = TrainingDriver::from_split(&dataset.train);
    let report = driver.run(
        &mut network,
        &config.training,
        |progress| {
            if progress.batch == 1 || progress.completed == progress.total {
                info!(
                    epoch = progress.epoch,
                    epochs = progress.total_epochs,
                    done = %format!("{:.0}%", progress.fraction() * 100.0),
                    error = progress.running_error,
                    "training"
                );
            }
        },
        || false,
    )?;
    info!(batches = report.completed_batches, examples = report.examples_seen, "training complete");

    let score = evaluate(&network, &dataset.test.images, &dataset.test.labels)?;
    info!(
        accuracy = %format!("{:.2}%", score.accuracy * 100.0),
        error = score.mean_error,
        samples = score.samples,
        "test split"
    );

    for digit in 0..10 {
        if let Some(example) = dataset.example(digit) {
            let guess = network.predict(example)?;
            info!(digit, guess = ?guess.map(|p| p.digit), "exemplar");
        }
    }

    // A single vertical drag down the middle of the canvas.
    let mut canvas = Canvas::new(config.canvas.clone());
    let mid = config.canvas.canvas_size / 2.0;
    canvas.handle(CanvasEvent::PointerDown(Point::new(mid, mid * 0.3)));
    canvas.handle(CanvasEvent::PointerMove(Point::new(mid, mid * 1.7)));
    let tensor = canvas.handle(CanvasEvent::PointerUp).unwrap_or_else(|| canvas.normalized());

    match network.predict(tensor.as_slice())? {
        Some(prediction) => info!(
            digit = prediction.digit,
            confidence = prediction.confidence,
            band = ?ConfidenceBand::of(prediction.confidence),
            "drawn stroke"
        ),
        None => info!("drawn stroke is blank"),
    }
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        error!("{}", err);
        std::process::exit(1);
    }
}
