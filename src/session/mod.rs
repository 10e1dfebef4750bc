//! Training and evaluation loop around the network core.
//!
//! The loop feeds one labeled sample per step into the network, keeps the
//! running recognition rate, and reports every outcome to an observer. A
//! cloneable stop flag lets a control surface end a run cooperatively: the
//! flag is checked once per iteration, never preemptively.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::network::{Network, NetworkError};
use crate::samples::{SampleError, SampleSource};

/// Whether a run adjusts the network weights or leaves them frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Weights are reinforced after every step.
    Training,
    /// Weights stay untouched; the network only classifies.
    Evaluation,
}

impl Mode {
    /// True when the mode adjusts weights.
    pub fn is_training(self) -> bool {
        matches!(self, Mode::Training)
    }
}

/// Running counters for a session.
///
/// The counters accumulate across training and evaluation runs; only a
/// session reset clears them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Samples processed so far.
    pub total_steps: u64,
    /// Samples whose recognized class matched the label.
    pub correct_steps: u64,
}

impl SessionStats {
    /// Ratio of correct to total steps, 0.0 before the first step.
    pub fn recognition_rate(&self) -> f64 {
        if self.total_steps == 0 {
            0.0
        } else {
            self.correct_steps as f64 / self.total_steps as f64
        }
    }
}

/// Result of a single classification step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Class the network picked.
    pub predicted: usize,
    /// Ground-truth class of the sample.
    pub label: usize,
    /// Whether predicted class and label agree.
    pub correct: bool,
}

/// Receives every step result as a run progresses.
#[cfg_attr(test, mockall::automock)]
pub trait StepObserver {
    /// Called after each step with the outcome and the cumulative counters.
    fn on_step(&mut self, outcome: StepOutcome, stats: SessionStats);
}

/// Cooperative cancellation switch for long-running loops.
///
/// Clones share the same flag, so a control thread can hold one clone and
/// raise it while a worker loops on another.
#[derive(Debug, Clone, Default)]
pub struct StopFlag {
    stopped: Arc<AtomicBool>,
}

impl StopFlag {
    /// Creates a flag in the running state.
    pub fn new() -> Self {
        StopFlag::default()
    }

    /// Requests that the current run finishes its step and exits.
    pub fn request_stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    /// True once a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

/// Drives a network against a sample source, one digit at a time.
///
/// Samples are requested for digits 0 through 9 in a repeating cycle. The
/// session owns the network, so training and evaluation runs can never
/// overlap on the same weights.
pub struct Session<S: SampleSource> {
    network: Network,
    source: S,
    stats: SessionStats,
    current_digit: usize,
}

impl<S: SampleSource> Session<S> {
    /// Creates a session around an existing network and sample source.
    pub fn new(network: Network, source: S) -> Self {
        Session {
            network,
            source,
            stats: SessionStats::default(),
            current_digit: 0,
        }
    }

    /// Processes one sample in the given mode and updates the counters.
    pub fn step(&mut self, mode: Mode) -> Result<StepOutcome, SessionError> {
        let sample = self.source.next_sample(self.current_digit)?;
        let predicted = self
            .network
            .step(&sample.pixels, sample.label, mode.is_training())?;
        let correct = predicted == sample.label;
        self.stats.total_steps += 1;
        if correct {
            self.stats.correct_steps += 1;
        }
        self.current_digit += 1;
        if self.current_digit >= self.network.class_count() {
            self.current_digit = 0;
        }
        log::debug!(
            "step {}: digit {} read as {} ({:.2}% recognized overall)",
            self.stats.total_steps,
            sample.label,
            predicted,
            self.stats.recognition_rate() * 100.0
        );
        Ok(StepOutcome {
            predicted,
            label: sample.label,
            correct,
        })
    }

    /// Runs until the stop flag is raised, reporting every step to the
    /// observer.
    pub fn run(
        &mut self,
        mode: Mode,
        stop: &StopFlag,
        observer: &mut dyn StepObserver,
    ) -> Result<SessionStats, SessionError> {
        log::info!("{} started", run_name(mode));
        while !stop.is_stopped() {
            let outcome = self.step(mode)?;
            observer.on_step(outcome, self.stats);
        }
        log::info!(
            "{} finished after {} total steps",
            run_name(mode),
            self.stats.total_steps
        );
        Ok(self.stats)
    }

    /// Runs at most `steps` iterations, still honoring the stop flag
    /// between steps.
    pub fn run_steps(
        &mut self,
        mode: Mode,
        steps: u64,
        stop: &StopFlag,
        observer: &mut dyn StepObserver,
    ) -> Result<SessionStats, SessionError> {
        log::info!("{} started ({} steps)", run_name(mode), steps);
        for _ in 0..steps {
            if stop.is_stopped() {
                break;
            }
            let outcome = self.step(mode)?;
            observer.on_step(outcome, self.stats);
        }
        log::info!(
            "{} finished after {} total steps",
            run_name(mode),
            self.stats.total_steps
        );
        Ok(self.stats)
    }

    /// Discards all learned weights and zeroes the counters and the digit
    /// cursor.
    pub fn reset(&mut self) {
        self.network.reset();
        self.stats = SessionStats::default();
        self.current_digit = 0;
    }

    /// Cumulative counters for this session.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Read access to the underlying network.
    pub fn network(&self) -> &Network {
        &self.network
    }
}

fn run_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Training => "training",
        Mode::Evaluation => "evaluation",
    }
}

/// Errors surfaced by a training or evaluation run.
#[derive(Debug)]
pub enum SessionError {
    /// The sample source failed to produce a sample.
    Sample(SampleError),
    /// The network rejected a sample.
    Network(NetworkError),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SessionError::Sample(err) => write!(f, "sample source error: {}", err),
            SessionError::Network(err) => write!(f, "network error: {}", err),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Sample(err) => Some(err),
            SessionError::Network(err) => Some(err),
        }
    }
}

impl From<SampleError> for SessionError {
    fn from(err: SampleError) -> Self {
        SessionError::Sample(err)
    }
}

impl From<NetworkError> for SessionError {
    fn from(err: NetworkError) -> Self {
        SessionError::Network(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::INPUT_COUNT;
    use crate::samples::GridSample;

    struct BlankSource;

    impl SampleSource for BlankSource {
        fn next_sample(&mut self, digit: usize) -> Result<GridSample, SampleError> {
            Ok(GridSample {
                pixels: vec![-1; INPUT_COUNT],
                label: digit,
            })
        }
    }

    #[test]
    fn observer_sees_every_step() {
        let mut session = Session::new(Network::new(), BlankSource);
        let stop = StopFlag::new();
        let mut observer = MockStepObserver::new();
        observer.expect_on_step().times(3).returning(|_, _| ());
        let stats = session
            .run_steps(Mode::Training, 3, &stop, &mut observer)
            .unwrap();
        assert_eq!(stats.total_steps, 3);
    }

    #[test]
    fn raised_flag_prevents_any_step() {
        let mut session = Session::new(Network::new(), BlankSource);
        let stop = StopFlag::new();
        stop.request_stop();
        let mut observer = MockStepObserver::new();
        observer.expect_on_step().times(0);
        let stats = session.run(Mode::Training, &stop, &mut observer).unwrap();
        assert_eq!(stats.total_steps, 0);
    }

    #[test]
    fn blank_samples_only_score_on_class_zero() {
        let mut session = Session::new(Network::new(), BlankSource);
        // all signals tie at zero, so every prediction lands on class 0
        for expected in [true, false, false] {
            let outcome = session.step(Mode::Evaluation).unwrap();
            assert_eq!(outcome.predicted, 0);
            assert_eq!(outcome.correct, expected);
        }
        assert_eq!(session.stats().correct_steps, 1);
    }

    #[test]
    fn recognition_rate_handles_the_empty_session() {
        assert_eq!(SessionStats::default().recognition_rate(), 0.0);
    }
}
