// src/main.rs
// Entry point for the glyphnet demo: trains the recognizer on the built-in
// digit glyphs, then measures recognition on a frozen evaluation run.

use std::env;
use std::error::Error;

use log::info;

use glyphnet::{
    GlyphSource, GlyphnetConfig, Mode, Network, Session, SessionStats, StepObserver, StepOutcome,
    StopFlag,
};

/// Logs a progress line every `interval` steps.
struct ProgressLogger {
    interval: u64,
}

impl StepObserver for ProgressLogger {
    fn on_step(&mut self, outcome: StepOutcome, stats: SessionStats) {
        if self.interval > 0 && stats.total_steps % self.interval == 0 {
            info!(
                "{} of {} samples recognized ({:.2}%), last digit {} read as {}",
                stats.correct_steps,
                stats.total_steps,
                stats.recognition_rate() * 100.0,
                outcome.label,
                outcome.predicted
            );
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging for debugging
    env_logger::init();
    info!("Starting glyphnet digit recognizer...");

    // Optional YAML configuration path as the first argument
    let config = match env::args().nth(1) {
        Some(path) => GlyphnetConfig::load(&path)?,
        None => GlyphnetConfig::default(),
    };

    let source = match config.rng_seed {
        Some(seed) => GlyphSource::seeded(config.noise_level, seed),
        None => GlyphSource::new(config.noise_level),
    };
    let mut session = Session::new(Network::new(), source);
    let stop = StopFlag::new();
    let mut progress = ProgressLogger {
        interval: config.status_interval,
    };
    info!(
        "Network ready: {} inputs, {} classes, noise level {}",
        session.network().input_count(),
        session.network().class_count(),
        config.noise_level
    );

    // Learning pass: weights are reinforced after every sample
    let trained = session.run_steps(Mode::Training, config.training_steps, &stop, &mut progress)?;
    info!(
        "Training done: {} of {} recognized ({:.2}%)",
        trained.correct_steps,
        trained.total_steps,
        trained.recognition_rate() * 100.0
    );

    // Frozen pass: same loop, weights untouched
    let finished = session.run_steps(Mode::Evaluation, config.evaluation_steps, &stop, &mut progress)?;
    let eval_total = finished.total_steps - trained.total_steps;
    let eval_correct = finished.correct_steps - trained.correct_steps;
    if eval_total > 0 {
        info!(
            "Evaluation done: {} of {} recognized ({:.2}%)",
            eval_correct,
            eval_total,
            eval_correct as f64 / eval_total as f64 * 100.0
        );
    }

    info!("glyphnet demo completed");
    Ok(())
}
