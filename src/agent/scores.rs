/// A certain win for the maximizing player.
pub const WIN: f64 = 1.0;

/// A certain loss for the maximizing player. Also the initial best score of a search.
pub const LOSS: f64 = -1.0;

/// An unknown or drawn outcome.
pub const NEUTRAL: f64 = 0.0;

/// The number of decimal digits kept when averaging child scores.
const PRECISION: i32 = 8;

/// Averages child scores, rounded to the score precision.
///
/// Assumes at least one score.
pub fn mean(total: f64, count: usize) -> f64
{
    let scale = 10f64.powi(PRECISION);
    (total / count as f64 * scale).round() / scale
}

/// Whether a score is a certain outcome rather than an estimate.
pub fn decisive(score: f64) -> bool
{
    score >= WIN || score <= LOSS
}
