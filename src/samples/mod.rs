//! Sample acquisition for the recognizer.
//!
//! A sample source hands one labeled pixel grid to the loop per step. The
//! built-in [`GlyphSource`] renders embedded digit patterns to packed color
//! values and can degrade them with random noise pixels to make recognition
//! harder.

mod glyphs;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::network::INPUT_COUNT;

/// Packed color value of an ink cell: opaque black in ARGB order, read as a
/// signed 32-bit integer.
const INK: i32 = -16_777_216;

/// Packed color value of a background cell: opaque white in ARGB order.
const BLANK: i32 = -1;

/// Noise corruption odds: each round gives every pixel a one-in-ten chance
/// of being replaced.
const CORRUPTION_CHANCE: u32 = 10;

/// A labeled pixel grid handed to the network one step at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSample {
    /// Packed color values, row-major, one per input neuron.
    pub pixels: Vec<i32>,
    /// Ground-truth digit class of the grid.
    pub label: usize,
}

/// Supplies labeled samples to a training or evaluation loop.
pub trait SampleSource {
    /// Produces the next sample for the requested digit class.
    fn next_sample(&mut self, digit: usize) -> Result<GridSample, SampleError>;
}

/// Sample source backed by the built-in digit glyphs.
///
/// Renders the requested digit to packed color values and, when a noise
/// level is set, corrupts pixels at random. Random colors may land on blank
/// white, which the network's encoding threshold reads as background rather
/// than ink.
#[derive(Debug)]
pub struct GlyphSource {
    noise_level: u32,
    rng: StdRng,
}

impl GlyphSource {
    /// Creates a source with the given noise level, seeded from entropy.
    pub fn new(noise_level: u32) -> Self {
        GlyphSource {
            noise_level,
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a deterministic source for reproducible runs.
    pub fn seeded(noise_level: u32, seed: u64) -> Self {
        GlyphSource {
            noise_level,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Currently configured noise level.
    pub fn noise_level(&self) -> u32 {
        self.noise_level
    }

    /// Changes the noise level for subsequent samples.
    pub fn set_noise_level(&mut self, level: u32) {
        log::info!("noise level changed to {}", level);
        self.noise_level = level;
    }

    /// Runs one corruption round per noise level, replacing roughly one
    /// pixel in ten with a random packed color each round.
    fn corrupt(&mut self, pixels: &mut [i32]) {
        for _ in 0..self.noise_level {
            for pixel in pixels.iter_mut() {
                if self.rng.gen_ratio(1, CORRUPTION_CHANCE) {
                    *pixel = self.rng.gen_range(INK..=BLANK);
                }
            }
        }
    }
}

impl SampleSource for GlyphSource {
    fn next_sample(&mut self, digit: usize) -> Result<GridSample, SampleError> {
        let glyph = glyphs::pattern(digit).ok_or(SampleError::UnknownDigit(digit))?;
        let mut pixels = render(glyph);
        if self.noise_level > 0 {
            self.corrupt(&mut pixels);
        }
        Ok(GridSample {
            pixels,
            label: digit,
        })
    }
}

/// Renders a glyph pattern to one packed color value per grid cell.
fn render(glyph: &str) -> Vec<i32> {
    let mut pixels = Vec::with_capacity(INPUT_COUNT);
    for line in glyph.lines().filter(|line| !line.is_empty()) {
        for cell in line.chars() {
            pixels.push(if cell == '#' { INK } else { BLANK });
        }
    }
    debug_assert_eq!(pixels.len(), INPUT_COUNT);
    pixels
}

/// Sample acquisition error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    /// No glyph exists for the requested digit class.
    UnknownDigit(usize),
}

impl std::fmt::Display for SampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SampleError::UnknownDigit(digit) => {
                write!(f, "no glyph for digit {}", digit)
            }
        }
    }
}

impl std::error::Error for SampleError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_glyph_renders_to_the_grid_size() {
        for digit in 0..10 {
            let pixels = render(glyphs::pattern(digit).unwrap());
            assert_eq!(pixels.len(), INPUT_COUNT, "digit {}", digit);
            assert!(pixels.iter().all(|&p| p == INK || p == BLANK));
            assert!(pixels.iter().any(|&p| p == INK));
        }
    }

    #[test]
    fn corruption_only_writes_packed_colors() {
        let mut source = GlyphSource::seeded(3, 99);
        let sample = source.next_sample(4).unwrap();
        assert!(sample.pixels.iter().all(|&p| (INK..=BLANK).contains(&p)));
    }

    #[test]
    fn zero_noise_renders_the_clean_glyph() {
        let mut noisy = GlyphSource::seeded(0, 1);
        let mut clean = GlyphSource::seeded(0, 2);
        assert_eq!(
            noisy.next_sample(7).unwrap(),
            clean.next_sample(7).unwrap()
        );
    }
}
