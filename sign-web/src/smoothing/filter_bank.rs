//! Per-channel filter bank for a whole landmark frame
//!
//! 63 independent channels (21 landmarks × 3 axes), channel index
//! `landmark * 3 + axis`. Filters are created on first observation of their
//! channel and live as long as the tracking session.

use std::collections::HashMap;

use super::one_euro::{FilterParams, OneEuroFilter};
use crate::error::{Result, SignError};
use crate::landmarks::{Landmark, LandmarkFrame, LANDMARK_COUNT};

pub struct FilterBank {
    params: FilterParams,
    channels: HashMap<usize, OneEuroFilter>,
}

impl FilterBank {
    pub fn new(params: FilterParams) -> Self {
        Self {
            params,
            channels: HashMap::with_capacity(LANDMARK_COUNT * 3),
        }
    }

    /// Smooth every coordinate of `frame` observed at time `t` (seconds)
    ///
    /// A frame carrying any non-finite coordinate is refused before a single
    /// channel is touched, so a bad frame cannot poison the derivative state.
    pub fn smooth(&mut self, frame: &LandmarkFrame, t: f64) -> Result<LandmarkFrame> {
        if let Some(index) = frame.first_non_finite() {
            return Err(SignError::NonFiniteCoordinate { index });
        }

        let mut smoothed = [Landmark::default(); LANDMARK_COUNT];
        for (i, (out, raw)) in smoothed.iter_mut().zip(frame.points()).enumerate() {
            out.x = self.channel(i * 3).filter(t, raw.x);
            out.y = self.channel(i * 3 + 1).filter(t, raw.y);
            out.z = self.channel(i * 3 + 2).filter(t, raw.z);
        }
        Ok(LandmarkFrame::new(smoothed))
    }

    fn channel(&mut self, index: usize) -> &mut OneEuroFilter {
        let params = self.params;
        self.channels
            .entry(index)
            .or_insert_with(|| OneEuroFilter::new(params))
    }

    /// Number of channels observed so far
    pub fn active_channels(&self) -> usize {
        self.channels.len()
    }

    pub fn params(&self) -> FilterParams {
        self.params
    }
}

impl Default for FilterBank {
    fn default() -> Self {
        Self::new(FilterParams::for_signing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_at(offset: f32) -> LandmarkFrame {
        let mut points = [Landmark::default(); LANDMARK_COUNT];
        for (i, p) in points.iter_mut().enumerate() {
            *p = Landmark::new(0.1 + offset + i as f32 * 0.01, 0.5 + offset, -0.02);
        }
        LandmarkFrame::new(points)
    }

    #[test]
    fn test_channels_created_lazily() {
        let mut bank = FilterBank::default();
        assert_eq!(bank.active_channels(), 0);
        let out = bank.smooth(&frame_at(0.0), 1.0).unwrap();
        assert_eq!(bank.active_channels(), 63);
        assert_eq!(out, frame_at(0.0));
    }

    #[test]
    fn test_non_finite_frame_leaves_state() {
        let mut bank = FilterBank::default();
        bank.smooth(&frame_at(0.0), 1.0).unwrap();

        let mut points = *frame_at(0.2).points();
        points[3].z = f32::INFINITY;
        let bad = LandmarkFrame::new(points);
        assert!(matches!(
            bank.smooth(&bad, 1.1),
            Err(SignError::NonFiniteCoordinate { index: 3 })
        ));

        // Still seeded from the first frame only
        let next = bank.smooth(&frame_at(0.0), 1.2).unwrap();
        assert!((next.get(0).x - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_channels_are_independent() {
        let mut bank = FilterBank::default();
        bank.smooth(&frame_at(0.0), 0.0).unwrap();

        let mut points = *frame_at(0.0).points();
        points[8].y += 0.3;
        let out = bank.smooth(&LandmarkFrame::new(points), 1.0 / 30.0).unwrap();

        assert!(out.get(8).y > 0.5 && out.get(8).y < 0.8);
        assert!((out.get(8).x - frame_at(0.0).get(8).x).abs() < 1e-6);
        assert!((out.get(7).y - 0.5).abs() < 1e-6);
    }
}
