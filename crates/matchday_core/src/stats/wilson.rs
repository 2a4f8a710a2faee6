//! Wilson score interval
//!
//! Pure functions. `size` is the number of trials the proportion was observed over.

pub use crate::calibration::general::NORMAL_CONFIDENCE;

fn centre_and_spread(p: f64, z: f64, size: u32) -> (f64, f64, f64) {
    let n = size as f64;
    let z2 = z * z;
    let centre = p + z2 / (2.0 * n);
    let spread = z * ((p * (1.0 - p) + z2 / (4.0 * n)) / n).sqrt();
    let denom = 1.0 + z2 / n;
    (centre, spread, denom)
}

/// Lower bound of the interval.
pub fn wilson_min(p: f64, z: f64, size: u32) -> f64 {
    let (centre, spread, denom) = centre_and_spread(p, z, size);
    (centre - spread) / denom
}

/// Upper bound of the interval.
pub fn wilson_max(p: f64, z: f64, size: u32) -> f64 {
    let (centre, spread, denom) = centre_and_spread(p, z, size);
    (centre + spread) / denom
}

/// Mean of the two bounds: the observed rate shrunk towards 1/2 for small samples.
pub fn wilson_confidence(p: f64, z: f64, size: u32) -> f64 {
    (wilson_min(p, z, size) + wilson_max(p, z, size)) / 2.0
}
