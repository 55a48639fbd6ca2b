//! Tunable parameters for rendering and comparing `Factor`s.

/// Formatting and comparison settings.
///
/// ```
/// use tally::Config;
///
/// let config = Config::default().with_significant_digits(4);
/// assert_eq!(config.significant_digits(), 4);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Significant digits used by the general number format of the table printer
    significant_digits: usize,

    /// Absolute tolerance for floating point comparisons
    tolerance: f64
}

impl Default for Config {
    fn default() -> Self {
        Config {
            significant_digits: 6,
            tolerance: 1e-9
        }
    }
}

impl Config {

    /// Set the number of significant digits. At least one digit is always printed.
    pub fn with_significant_digits(mut self, digits: usize) -> Self {
        self.significant_digits = digits.max(1);
        self
    }

    /// Set the absolute tolerance. Negative values are treated as zero.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    pub fn significant_digits(&self) -> usize {
        self.significant_digits
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

}
