//! One Euro Filter - adaptive low-pass filter for landmark jitter
//!
//! Smooth when the hand is still, responsive while it moves. One instance
//! per scalar channel.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Tuning shared by every channel of a filter bank
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    /// Minimum cutoff frequency (Hz) - lower = smoother at rest
    pub min_cutoff: f32,
    /// Speed coefficient - higher = less lag during fast motion
    pub beta: f32,
    /// Derivative cutoff frequency (Hz)
    pub d_cutoff: f32,
}

impl FilterParams {
    /// Low-latency preset used for sign recognition
    pub fn for_signing() -> Self {
        Self {
            min_cutoff: 1.5,
            beta: 8.0,
            d_cutoff: 1.0,
        }
    }
}

impl Default for FilterParams {
    fn default() -> Self {
        Self::for_signing()
    }
}

/// Adaptive low-pass filter for a single channel
#[derive(Clone, Debug)]
pub struct OneEuroFilter {
    params: FilterParams,

    // State
    x_prev: f32,
    dx_prev: f32,
    t_prev: f64,
    initialized: bool,
}

impl OneEuroFilter {
    pub fn new(params: FilterParams) -> Self {
        Self {
            params,
            x_prev: 0.0,
            dx_prev: 0.0,
            t_prev: 0.0,
            initialized: false,
        }
    }

    /// Calculate smoothing factor alpha
    fn smoothing_factor(t_e: f32, cutoff: f32) -> f32 {
        let r = 2.0 * PI * cutoff * t_e;
        r / (r + 1.0)
    }

    /// Filter a single value
    ///
    /// - `t`: timestamp in seconds
    /// - `x`: raw input value
    ///
    /// The first observation seeds the state and passes through. A
    /// non-increasing timestamp also passes `x` through and leaves the
    /// state untouched.
    pub fn filter(&mut self, t: f64, x: f32) -> f32 {
        if !self.initialized {
            self.x_prev = x;
            self.t_prev = t;
            self.initialized = true;
            return x;
        }

        let t_e = (t - self.t_prev) as f32;
        if t_e <= 0.0 {
            return x;
        }

        // 1. Estimate derivative (velocity)
        let a_d = Self::smoothing_factor(t_e, self.params.d_cutoff);
        let dx = (x - self.x_prev) / t_e;
        let dx_hat = a_d * dx + (1.0 - a_d) * self.dx_prev;

        // 2. Adaptive cutoff: more smoothing when slow, less when fast
        let cutoff = self.params.min_cutoff + self.params.beta * dx_hat.abs();
        let a = Self::smoothing_factor(t_e, cutoff);

        // 3. Apply filter
        let x_hat = a * x + (1.0 - a) * self.x_prev;

        self.x_prev = x_hat;
        self.dx_prev = dx_hat;
        self.t_prev = t;

        x_hat
    }

    /// Last filtered value, or `None` before the first observation
    pub fn last_value(&self) -> Option<f32> {
        self.initialized.then_some(self.x_prev)
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.initialized.then_some(self.t_prev)
    }

    pub fn last_derivative(&self) -> f32 {
        self.dx_prev
    }
}

impl Default for OneEuroFilter {
    fn default() -> Self {
        Self::new(FilterParams::for_signing())
    }
}
