//! Half-open stepping along a single axis
//!
//! Origins are produced as `min + i * step` for every `i` with
//! `min + i * step < max`. Each origin is computed by multiplication so long
//! runs do not accumulate rounding drift.

use crate::io::error::{Result, invalid_parameter};
use num_traits::ToPrimitive;

/// Number of origins emitted when stepping from `min` towards `max`
///
/// # Errors
///
/// Returns an error if the bounds are not finite and ordered, or the step is
/// not a positive finite value
pub fn origin_count(min: f64, max: f64, step: f64) -> Result<usize> {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(invalid_parameter(
            "axis bounds",
            &format!("{min}..{max}"),
            &"must be finite with min < max",
        ));
    }
    if !step.is_finite() || step <= 0.0 {
        return Err(invalid_parameter("step", &step, &"must be positive and finite"));
    }
    if origin_at(min, step, 1) <= min {
        return Err(invalid_parameter(
            "step",
            &step,
            &format!("too small to advance from {min}"),
        ));
    }

    let estimate = ((max - min) / step).ceil();
    let mut count = estimate.to_usize().ok_or_else(|| {
        invalid_parameter("step", &step, &"produces more origins than can be indexed")
    })?;

    // The division can land one either side of the exact half-open count
    while count > 0 && origin_at(min, step, count - 1) >= max {
        count -= 1;
    }
    while origin_at(min, step, count) < max {
        count += 1;
    }

    Ok(count)
}

/// Origin at position `index` along the axis
pub fn origin_at(min: f64, step: f64, index: usize) -> f64 {
    (index as f64).mul_add(step, min)
}

/// All origins from `min` towards `max`, in ascending order
///
/// # Errors
///
/// Returns an error under the same conditions as [`origin_count`]
pub fn axis_origins(min: f64, max: f64, step: f64) -> Result<Vec<f64>> {
    let count = origin_count(min, max, step)?;
    Ok((0..count).map(|index| origin_at(min, step, index)).collect())
}
