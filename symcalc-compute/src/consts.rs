//! Named mathematical constants available to every expression.

/// Euler's number.
pub const E: f64 = std::f64::consts::E;

/// The golden ratio.
pub const PHI: f64 = 1.618033988749895;

pub const PI: f64 = std::f64::consts::PI;

pub const TAU: f64 = std::f64::consts::TAU;

/// The named constants bound by the default evaluation context, in `(name, value)` form.
pub const ALL: &[(&str, f64)] = &[
    ("e", E),
    ("phi", PHI),
    ("pi", PI),
    ("tau", TAU),
];
