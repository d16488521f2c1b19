//! Rounding helpers shared by the model and the assembler.
//!
//! Percentages and prices round differently. Percentages use
//! `floor(x * 10^n + 0.5)`, which works on the scaled double. Prices round
//! the exact binary value to cents, so `1.115` (stored as `1.11499..`)
//! becomes `1.11`.

/// `floor(value * 10^places + 0.5) / 10^places`.
///
/// The scaling multiply can itself round, so a value just below a half may
/// land on it and round up.
pub fn round_dp(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor + 0.5).floor() / factor
}

/// Four-decimal rounding used for every percentage in the output.
pub fn round_pct(value: f64) -> f64 {
    round_dp(value, 4)
}

/// Two-decimal rounding of the exact stored value, used for prices.
///
/// Exact ties such as `10.125` round away from zero.
pub fn round_price(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let magnitude = value.abs();
    let rounded = if is_exact_cent_tie(magnitude) {
        // magnitude * 100 is exact for a representable tie.
        (magnitude * 100.0 + 0.5).floor() / 100.0
    } else {
        format!("{magnitude:.2}").parse().unwrap_or(magnitude)
    };
    rounded.copysign(value)
}

/// True when the exact decimal expansion is `d.dd5` with nothing after it.
fn is_exact_cent_tie(magnitude: f64) -> bool {
    let digits = format!("{magnitude:.20}");
    digits.split_once('.').is_some_and(|(_, frac)| {
        let frac = frac.as_bytes();
        frac.len() > 3 && frac[2] == b'5' && frac[3..].iter().all(|b| *b == b'0')
    })
}
