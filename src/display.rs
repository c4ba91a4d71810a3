//! Display rendering policy.
//!
//! The four-digit display shows two two-digit fields: the previous cycle's
//! temperature on the left, the current one on the right, with the centre
//! colon always lit ("07:05" reads as "was 7, now 5").  A field whose value
//! fails the plausibility check renders the error glyph in both digits
//! instead of numerals, so a glitched probe is visible at a glance.
//!
//! Pure policy — a [`Frame`] is computed here and pushed through the
//! `ActuatorPort` by the control loop; the TM1637 driver knows nothing about
//! temperatures.

use crate::config::ValidRange;

/// Number of digit positions on the display.
pub const SLOTS: usize = 4;

/// One digit position: a numeral or the error marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// A numeral 0–9.
    Digit(u8),
    /// The error marker (rendered as `F` by the TM1637 segment table).
    Error,
}

/// A full display refresh, left to right.
pub type Frame = [Glyph; SLOTS];

/// Compose the frame for one control cycle.
///
/// The current value arrives untruncated so that NaN and out-of-range
/// readings still fail the plausibility check; digits are derived by
/// integer truncation.  Each field is checked independently: a bad current
/// reading must not blank the (still trustworthy) previous one.
pub fn render_frame(current_celsius: f32, previous: i32, valid: ValidRange) -> Frame {
    let (p_tens, p_ones) = field_glyphs(previous as f32, valid);
    let (c_tens, c_ones) = field_glyphs(current_celsius, valid);
    [p_tens, p_ones, c_tens, c_ones]
}

fn field_glyphs(celsius: f32, valid: ValidRange) -> (Glyph, Glyph) {
    if valid.is_plausible(celsius) {
        let value = celsius as i32;
        // rem_euclid keeps sub-zero in-range values (e.g. -3 °C) on the
        // numeral table instead of underflowing the digit.
        let tens = (value / 10).rem_euclid(10) as u8;
        let ones = value.rem_euclid(10) as u8;
        (Glyph::Digit(tens), Glyph::Digit(ones))
    } else {
        (Glyph::Error, Glyph::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: ValidRange = ValidRange {
        min: -4.0,
        max: 40.0,
    };

    #[test]
    fn two_digit_split_with_truncation() {
        let frame = render_frame(21.7, 7, VALID);
        assert_eq!(
            frame,
            [
                Glyph::Digit(0),
                Glyph::Digit(7),
                Glyph::Digit(2),
                Glyph::Digit(1),
            ]
        );
    }

    #[test]
    fn implausible_current_renders_error_pair() {
        let frame = render_frame(50.0, 21, VALID);
        assert_eq!(frame[0], Glyph::Digit(2));
        assert_eq!(frame[1], Glyph::Digit(1));
        assert_eq!(frame[2], Glyph::Error);
        assert_eq!(frame[3], Glyph::Error);
    }

    #[test]
    fn implausible_previous_keeps_current_numerals() {
        let frame = render_frame(6.4, -120, VALID);
        assert_eq!(frame[0], Glyph::Error);
        assert_eq!(frame[1], Glyph::Error);
        assert_eq!(frame[2], Glyph::Digit(0));
        assert_eq!(frame[3], Glyph::Digit(6));
    }

    #[test]
    fn nan_current_renders_error_pair() {
        let frame = render_frame(f32::NAN, 5, VALID);
        assert_eq!(frame[2], Glyph::Error);
        assert_eq!(frame[3], Glyph::Error);
    }

    #[test]
    fn boundary_values_are_errors() {
        // The plausibility check is strict, so 40 exactly is a glitch.
        let frame = render_frame(40.0, -4, VALID);
        assert_eq!(frame, [Glyph::Error; 4]);
    }

    #[test]
    fn negative_in_range_value_stays_on_numeral_table() {
        let frame = render_frame(-3.0, 5, VALID);
        assert_eq!(frame[2], Glyph::Digit(0));
        assert_eq!(frame[3], Glyph::Digit(7)); // -3 onto the 0-9 wheel
    }
}
