/// Vector math utilities for Sun-separation calculations
///
/// This module provides helper functions for vector operations used in
/// the visibility checks, including coordinate conversions, vector
/// normalization, and angular separation calculations.
use ndarray::{Array1, Array2};

/// Convert RA/Dec coordinates to a unit vector
///
/// # Arguments
/// * `ra_deg` - Right ascension in degrees
/// * `dec_deg` - Declination in degrees
///
/// # Returns
/// Unit vector [x, y, z] in ICRS/J2000 frame
pub fn radec_to_unit_vector(ra_deg: f64, dec_deg: f64) -> [f64; 3] {
    let ra_rad = ra_deg.to_radians();
    let dec_rad = dec_deg.to_radians();
    let cos_dec = dec_rad.cos();
    [
        cos_dec * ra_rad.cos(),
        cos_dec * ra_rad.sin(),
        dec_rad.sin(),
    ]
}

/// Convert a Cartesian direction to RA/Dec in degrees
///
/// RA is wrapped to [0, 360). A zero vector maps to (0, 0).
pub fn vector_to_radec(v: &[f64; 3]) -> (f64, f64) {
    let unit = normalize_vector(v);
    let ra_deg = unit[1].atan2(unit[0]).to_degrees().rem_euclid(360.0);
    let dec_deg = unit[2].clamp(-1.0, 1.0).asin().to_degrees();
    (ra_deg, dec_deg)
}

/// Normalize a 3D vector to unit length
///
/// # Returns
/// Normalized unit vector, or [0, 0, 0] if input magnitude is zero
pub fn normalize_vector(v: &[f64; 3]) -> [f64; 3] {
    let mag = vector_magnitude(v);
    if mag > 0.0 {
        [v[0] / mag, v[1] / mag, v[2] / mag]
    } else {
        [0.0, 0.0, 0.0]
    }
}

/// Calculate the dot product of two 3D vectors
pub fn dot_product(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Calculate the magnitude (length) of a 3D vector
pub fn vector_magnitude(v: &[f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Angle between two unit vectors in degrees, in [0, 180]
pub fn angle_between_deg(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    dot_product(a, b).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Great-circle separation between two RA/Dec positions in degrees
pub fn angular_separation_deg(ra1_deg: f64, dec1_deg: f64, ra2_deg: f64, dec2_deg: f64) -> f64 {
    angle_between_deg(
        &radec_to_unit_vector(ra1_deg, dec1_deg),
        &radec_to_unit_vector(ra2_deg, dec2_deg),
    )
}

// ============================================================================
// Vectorized batch operations
// ============================================================================

/// Calculate angular separations between one target and many body directions
///
/// # Arguments
/// * `target_vec` - Unit vector pointing to the target (ICRS/J2000)
/// * `body_vectors` - Array2 with shape (N_times, 3) containing body positions
///   relative to the observer (any length unit, normalized internally)
///
/// # Returns
/// Array1 with shape (N_times,) containing angular separations in degrees
pub fn angular_separations_batch(target_vec: &[f64; 3], body_vectors: &Array2<f64>) -> Array1<f64> {
    let n_times = body_vectors.nrows();
    let mut separations = Array1::<f64>::zeros(n_times);

    for t in 0..n_times {
        let body = [
            body_vectors[[t, 0]],
            body_vectors[[t, 1]],
            body_vectors[[t, 2]],
        ];
        let body_unit = normalize_vector(&body);
        separations[t] = angle_between_deg(target_vec, &body_unit);
    }

    separations
}
