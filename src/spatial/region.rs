//! Bounding regions and origin spacing
//!
//! Coordinates are unprojected geographic degrees (x = longitude,
//! y = latitude). Areas derived from them are planar degree areas, which
//! shrink in true ground terms away from the equator.

use crate::io::error::{GridError, Result, invalid_parameter};
use geo::{Coord, Rect};
use std::fmt;
use std::str::FromStr;

/// Axis-aligned rectangle to be covered by tiles
///
/// Always finite with positive width and height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Region {
    /// Create a region from its corner coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if any coordinate is not finite or the region has
    /// zero or negative extent on either axis
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        let corners = [min_x, min_y, max_x, max_y];
        let describe = || format!("({min_x}, {min_y}, {max_x}, {max_y})");

        if corners.iter().any(|value| !value.is_finite()) {
            return Err(invalid_parameter(
                "region",
                &describe(),
                &"coordinates must be finite",
            ));
        }
        if min_x >= max_x || min_y >= max_y {
            return Err(invalid_parameter(
                "region",
                &describe(),
                &"region must have positive width and height",
            ));
        }

        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Create a region from a `geo` rectangle
    ///
    /// # Errors
    ///
    /// Returns an error if the rectangle is degenerate or not finite
    pub fn from_rect(rect: &Rect<f64>) -> Result<Self> {
        Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }

    /// Western edge
    pub const fn min_x(&self) -> f64 {
        self.min_x
    }

    /// Southern edge
    pub const fn min_y(&self) -> f64 {
        self.min_y
    }

    /// Eastern edge
    pub const fn max_x(&self) -> f64 {
        self.max_x
    }

    /// Northern edge
    pub const fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Extent along x
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along y
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Planar area in squared coordinate units
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Region as a `geo` rectangle
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.min_x,
                y: self.min_y,
            },
            Coord {
                x: self.max_x,
                y: self.max_y,
            },
        )
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

impl FromStr for Region {
    type Err = GridError;

    /// Parse `min_x,min_y,max_x,max_y`
    fn from_str(s: &str) -> Result<Self> {
        let values = parse_floats("region", s)?;
        match values.as_slice() {
            &[min_x, min_y, max_x, max_y] => Self::new(min_x, min_y, max_x, max_y),
            _ => Err(invalid_parameter(
                "region",
                &s,
                &"expected four comma-separated numbers: min_x,min_y,max_x,max_y",
            )),
        }
    }
}

/// Spacing between consecutive tile origins on each axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Horizontal spacing
    pub x: f64,
    /// Vertical spacing
    pub y: f64,
}

impl Step {
    /// Step with independent spacing per axis
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Step with the same spacing on both axes
    pub const fn uniform(spacing: f64) -> Self {
        Self {
            x: spacing,
            y: spacing,
        }
    }

    /// Check that both components are positive and finite
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending component
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("step.x", self.x), ("step.y", self.y)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &"must be positive and finite",
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Step {
    type Err = GridError;

    /// Parse `x,y`, or a single value applied to both axes
    fn from_str(s: &str) -> Result<Self> {
        let values = parse_floats("step", s)?;
        let step = match values.as_slice() {
            &[spacing] => Self::uniform(spacing),
            &[x, y] => Self::new(x, y),
            _ => {
                return Err(invalid_parameter(
                    "step",
                    &s,
                    &"expected one or two comma-separated numbers",
                ));
            }
        };
        step.validate()?;
        Ok(step)
    }
}

fn parse_floats(parameter: &'static str, s: &str) -> Result<Vec<f64>> {
    s.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| invalid_parameter(parameter, &s, &e))
        })
        .collect()
}
