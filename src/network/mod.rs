//! Network core for the digit recognizer.
//!
//! This module holds the complete bipartite topology of input and output
//! neurons, the forward-signal computation, and the reinforcement rule that
//! adjusts connection weights after each classification step.

pub mod connection;
pub mod neuron;

pub use connection::Connection;
pub use neuron::Neuron;

/// Width of the input pixel grid.
pub const GRID_WIDTH: usize = 15;

/// Height of the input pixel grid.
pub const GRID_HEIGHT: usize = 15;

/// Number of input neurons, one per pixel of the grid.
pub const INPUT_COUNT: usize = GRID_WIDTH * GRID_HEIGHT;

/// Number of output classes, one per digit.
pub const CLASS_COUNT: usize = 10;

/// A single-layer network mapping a pixel grid to a digit class.
///
/// Every output neuron owns one connection per input neuron, ordered so that
/// connection `i` of any output always originates from input neuron `i`.
/// Weights start at 0.0 and only move through the reinforcement rule; the
/// network itself carries no mode state, training is requested per step.
pub struct Network {
    inputs: Vec<Neuron>,
    outputs: Vec<Neuron>,
    connections: Vec<Vec<Connection>>,
}

impl Network {
    /// Creates the default recognizer topology: one input neuron per grid
    /// pixel, one output neuron per digit class, all weights 0.0.
    pub fn new() -> Self {
        Self::with_dimensions(INPUT_COUNT, CLASS_COUNT)
    }

    /// Creates a complete bipartite network with arbitrary dimensions.
    ///
    /// # Panics
    ///
    /// Panics when either dimension is zero.
    pub fn with_dimensions(inputs: usize, classes: usize) -> Self {
        assert!(inputs > 0 && classes > 0);
        let connections = (0..classes)
            .map(|_| (0..inputs).map(Connection::new).collect())
            .collect();
        log::debug!("created network: {} inputs, {} classes", inputs, classes);
        Network {
            inputs: (0..inputs).map(|_| Neuron::new()).collect(),
            outputs: (0..classes).map(|_| Neuron::new()).collect(),
            connections,
        }
    }

    /// Discards the current topology and rebuilds it with the same
    /// dimensions and all weights back at 0.0.
    pub fn reset(&mut self) {
        *self = Network::with_dimensions(self.inputs.len(), self.outputs.len());
        log::info!("network reset, all weights cleared");
    }

    /// Number of input neurons.
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Number of output classes.
    pub fn class_count(&self) -> usize {
        self.outputs.len()
    }

    /// Signal of the input neuron at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    pub fn input_signal(&self, index: usize) -> f64 {
        self.inputs[index].signal()
    }

    /// Signal of the output neuron for `class`.
    ///
    /// # Panics
    ///
    /// Panics when `class` is out of range.
    pub fn output_signal(&self, class: usize) -> f64 {
        self.outputs[class].signal()
    }

    /// Weight of the connection from input neuron `input` into the output
    /// neuron for `class`.
    ///
    /// # Panics
    ///
    /// Panics when either index is out of range.
    pub fn link_weight(&self, class: usize, input: usize) -> f64 {
        self.connections[class][input].weight()
    }

    /// Classifies a raw pixel grid without touching any weights.
    pub fn classify(&mut self, pixels: &[i32]) -> Result<usize, NetworkError> {
        self.check_pixels(pixels)?;
        self.fill_inputs(pixels);
        self.propagate();
        Ok(self.strongest_class())
    }

    /// Processes one labeled sample: encodes the pixels, propagates the
    /// signals, picks the strongest class and, when `train` is set,
    /// reinforces the connections of the true label's output neuron.
    ///
    /// Returns the recognized class, correct or not. Validation happens
    /// before any state is mutated.
    pub fn step(&mut self, pixels: &[i32], label: usize, train: bool) -> Result<usize, NetworkError> {
        self.check_pixels(pixels)?;
        if label >= self.outputs.len() {
            return Err(NetworkError::LabelOutOfRange {
                label,
                classes: self.outputs.len(),
            });
        }
        self.fill_inputs(pixels);
        self.propagate();
        let recognized = self.strongest_class();
        if train {
            self.reinforce(label, recognized == label);
        }
        Ok(recognized)
    }

    fn check_pixels(&self, pixels: &[i32]) -> Result<(), NetworkError> {
        if pixels.len() != self.inputs.len() {
            return Err(NetworkError::PixelCountMismatch {
                expected: self.inputs.len(),
                actual: pixels.len(),
            });
        }
        Ok(())
    }

    /// Drives the input neurons from raw pixel data. A pixel carries ink
    /// when its packed color value lies below -1 (opaque white); ink maps to
    /// a signal of 1.0, everything else to 0.0.
    fn fill_inputs(&mut self, pixels: &[i32]) {
        for (neuron, &pixel) in self.inputs.iter_mut().zip(pixels) {
            if pixel < -1 {
                neuron.set_signal(1.0);
            } else {
                neuron.set_signal(0.0);
            }
        }
    }

    /// Recalculates every output signal as the arithmetic mean of
    /// signal-times-weight over the output's incoming connections.
    fn propagate(&mut self) {
        let inputs = &self.inputs;
        for (neuron, links) in self.outputs.iter_mut().zip(self.connections.iter()) {
            let mut total = 0.0;
            for link in links {
                total += inputs[link.origin()].signal() * link.weight();
            }
            neuron.set_signal(total / links.len() as f64);
        }
    }

    /// Index of the output neuron with the strongest signal. Classes are
    /// scanned in ascending order keeping the first strict maximum, so ties
    /// resolve to the lowest index.
    fn strongest_class(&self) -> usize {
        let mut strongest = 0;
        for (class, neuron) in self.outputs.iter().enumerate() {
            if neuron.signal() > self.outputs[strongest].signal() {
                strongest = class;
            }
        }
        strongest
    }

    /// Reinforces the connections of the true label's output neuron, each by
    /// the learning rate times its origin signal. Wrong predictions
    /// reinforce twice as strongly as correct ones; competing outputs are
    /// never touched.
    fn reinforce(&mut self, label: usize, correct: bool) {
        let rate = if correct {
            Connection::SUCCESS_RATE
        } else {
            Connection::FAILURE_RATE
        };
        let inputs = &self.inputs;
        for link in self.connections[label].iter_mut() {
            link.increase_weight(rate * inputs[link.origin()].signal());
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::new()
    }
}

/// Errors raised when a sample violates the network's fixed dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// The pixel slice does not match the number of input neurons.
    PixelCountMismatch {
        /// Number of input neurons.
        expected: usize,
        /// Length of the offending pixel slice.
        actual: usize,
    },
    /// The class label lies outside the range of output neurons.
    LabelOutOfRange {
        /// The offending label.
        label: usize,
        /// Number of output classes.
        classes: usize,
    },
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            NetworkError::PixelCountMismatch { expected, actual } => {
                write!(f, "expected {} pixels, got {}", expected, actual)
            }
            NetworkError::LabelOutOfRange { label, classes } => {
                write!(f, "label {} out of range for {} classes", label, classes)
            }
        }
    }
}

impl std::error::Error for NetworkError {}
