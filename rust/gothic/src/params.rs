// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operator parameters and their declared bounds.
//!
//! Each parameter struct has defaults matching the operator panel and a
//! `validate` that rejects out-of-range values before any mesh is touched.

use crate::error::{OperatorError, Result};

/// Inclusive range a parameter must fall in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Fails with [`OperatorError::ParameterOutOfRange`] unless `value` is in range.
    pub fn check(&self, name: &'static str, value: f64) -> Result<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(OperatorError::ParameterOutOfRange {
                name,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

// --- Cone tools ---

/// Parameters of the apex bisection ("add edge loop to cone").
#[derive(Debug, Clone, PartialEq)]
pub struct ApexBisectParams {
    /// Fraction of each edge, measured from the apex, at which to cut.
    pub fraction: f64,
    /// Use the highest vertex as apex instead of the selected one.
    pub auto_detect: bool,
}

impl ApexBisectParams {
    pub const FRACTION: Bounds = Bounds::new(0.01, 0.99);

    pub fn validate(&self) -> Result<()> {
        Self::FRACTION.check("fraction", self.fraction)
    }
}

impl Default for ApexBisectParams {
    fn default() -> Self {
        Self {
            fraction: 0.5,
            auto_detect: true,
        }
    }
}

/// Parameters of the fan-to-lancet conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct FanToLancetParams {
    pub fraction: f64,
}

impl FanToLancetParams {
    pub const FRACTION: Bounds = Bounds::new(0.01, 0.99);

    pub fn validate(&self) -> Result<()> {
        Self::FRACTION.check("fraction", self.fraction)
    }
}

impl Default for FanToLancetParams {
    fn default() -> Self {
        Self { fraction: 0.5 }
    }
}

// --- Lancet window ---

/// Parameters of the inset-to-lancet-window conversion.
///
/// The declared sharpness ranges are wider than the easing clamp
/// (`ease_clamp`), which is applied separately when the curve is evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct LancetParams {
    /// Extra edge loops inserted per side between the highest wall and the top.
    pub curve_segments: usize,
    /// Fraction of the height at which the wall starts to curve.
    pub start_fraction: f64,
    pub sharpness_in: f64,
    pub sharpness_out: f64,
    pub ease_clamp: Bounds,
    /// Absolute Z tolerance for recognising top edges.
    pub top_tolerance: f64,
}

impl LancetParams {
    pub const CURVE_SEGMENTS: Bounds = Bounds::new(0.0, 40.0);
    pub const START_FRACTION: Bounds = Bounds::new(0.0, 1.0);
    pub const SHARPNESS_IN: Bounds = Bounds::new(-2.0, 3.0);
    pub const SHARPNESS_OUT: Bounds = Bounds::new(-1.0, 3.0);

    pub fn validate(&self) -> Result<()> {
        Self::CURVE_SEGMENTS.check("curve_segments", self.curve_segments as f64)?;
        Self::START_FRACTION.check("start_fraction", self.start_fraction)?;
        Self::SHARPNESS_IN.check("sharpness_in", self.sharpness_in)?;
        Self::SHARPNESS_OUT.check("sharpness_out", self.sharpness_out)?;
        Bounds::new(0.0, f64::MAX).check("top_tolerance", self.top_tolerance)
    }
}

impl Default for LancetParams {
    fn default() -> Self {
        Self {
            curve_segments: 0,
            start_fraction: 0.6,
            sharpness_in: 0.0,
            sharpness_out: 0.0,
            ease_clamp: crate::primitives::EASE_CLAMP,
            top_tolerance: 0.001,
        }
    }
}

// --- Buttress generators ---

#[derive(Debug, Clone, PartialEq)]
pub struct FlyingButtressParams {
    pub height: f64,
    pub width: f64,
    pub depth: f64,
    /// How far the arch sags from the top towards the far end (0 = flat).
    pub curvature: f64,
}

impl FlyingButtressParams {
    pub const HEIGHT: Bounds = Bounds::new(1.0, 10.0);
    pub const WIDTH: Bounds = Bounds::new(0.1, 3.0);
    pub const DEPTH: Bounds = Bounds::new(0.1, 5.0);
    pub const CURVATURE: Bounds = Bounds::new(0.0, 1.0);

    pub fn validate(&self) -> Result<()> {
        Self::HEIGHT.check("height", self.height)?;
        Self::WIDTH.check("width", self.width)?;
        Self::DEPTH.check("depth", self.depth)?;
        Self::CURVATURE.check("curvature", self.curvature)
    }
}

impl Default for FlyingButtressParams {
    fn default() -> Self {
        Self {
            height: 3.0,
            width: 0.5,
            depth: 1.0,
            curvature: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DivineButtressParams {
    pub pier_width: f64,
    pub pier_depth: f64,
    pub pier_height: f64,
    pub arch_span: f64,
    pub arch_height: f64,
    pub arch_thickness: f64,
    pub arch_segments: usize,
}

impl DivineButtressParams {
    pub const PIER_WIDTH: Bounds = Bounds::new(0.1, 5.0);
    pub const PIER_DEPTH: Bounds = Bounds::new(0.1, 5.0);
    pub const PIER_HEIGHT: Bounds = Bounds::new(1.0, 20.0);
    pub const ARCH_SPAN: Bounds = Bounds::new(1.0, 20.0);
    pub const ARCH_HEIGHT: Bounds = Bounds::new(0.1, 10.0);
    pub const ARCH_THICKNESS: Bounds = Bounds::new(0.1, 5.0);
    pub const ARCH_SEGMENTS: Bounds = Bounds::new(4.0, 50.0);

    pub fn validate(&self) -> Result<()> {
        Self::PIER_WIDTH.check("pier_width", self.pier_width)?;
        Self::PIER_DEPTH.check("pier_depth", self.pier_depth)?;
        Self::PIER_HEIGHT.check("pier_height", self.pier_height)?;
        Self::ARCH_SPAN.check("arch_span", self.arch_span)?;
        Self::ARCH_HEIGHT.check("arch_height", self.arch_height)?;
        Self::ARCH_THICKNESS.check("arch_thickness", self.arch_thickness)?;
        Self::ARCH_SEGMENTS.check("arch_segments", self.arch_segments as f64)
    }
}

impl Default for DivineButtressParams {
    fn default() -> Self {
        Self {
            pier_width: 1.0,
            pier_depth: 1.0,
            pier_height: 5.0,
            arch_span: 4.0,
            arch_height: 3.0,
            arch_thickness: 0.5,
            arch_segments: 12,
        }
    }
}
