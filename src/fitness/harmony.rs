//! Interval preference table used by the harmony term.
//!
//! Thirds, fourths, fifths and sixths are rewarded; unisons, the tritone and
//! sevenths are penalized. The second octave repeats the shape with slightly
//! smaller rewards.

/// Weight per interval in semitones, `0..=25`.
pub const HARMONY_TABLE: [f64; 26] = [
    -20.0, // unison
    5.0,   // minor 2nd
    5.0,   // major 2nd
    50.0,  // minor 3rd
    50.0,  // major 3rd
    30.0,  // perfect 4th
    -10.0, // tritone
    50.0,  // perfect 5th
    10.0,  // minor 6th
    40.0,  // major 6th
    -2.0,  // minor 7th
    -2.0,  // major 7th
    10.0,  // octave
    2.0,
    4.0,
    40.0,
    40.0,
    25.0,
    -15.0,
    40.0,
    8.0,
    30.0,
    -5.0,
    -5.0,
    8.0,
    0.0,
];

/// Looks up the weight for an interval; anything wider than the table scores 0.
pub fn interval_weight(semitones: u8) -> f64 {
    HARMONY_TABLE
        .get(semitones as usize)
        .copied()
        .unwrap_or(0.0)
}
