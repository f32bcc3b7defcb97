// Chart domain models
use super::sample::Channel;

const FRACTION_MASK: u64 = (1 << 52) - 1;

/// Label-ready point; `y` is already formatted to two decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub x: String,
    pub y: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub channel: Channel,
    pub data: Vec<SeriesPoint>,
}

impl Series {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            data: Vec::new(),
        }
    }
}

/// Format a reading with two decimals, rounding to the nearest hundredth of the
/// exact binary value. Exact ties round away from zero.
pub fn format_reading(value: f64) -> String {
    if value == 0.0 {
        return "0.00".to_string();
    }
    match tie_hundredths(value) {
        Some(hundredths) => {
            let sign = if value < 0.0 { "-" } else { "" };
            format!("{}{}.{:02}", sign, hundredths / 100, hundredths % 100)
        }
        None => format!("{:.2}", value),
    }
}

/// When `|value|` sits exactly halfway between two hundredths, the larger one.
fn tie_hundredths(value: f64) -> Option<u128> {
    if !value.is_finite() {
        return None;
    }
    let bits = value.abs().to_bits();
    let exponent = (bits >> 52) as i32;
    let mantissa = if exponent == 0 {
        (bits & FRACTION_MASK) << 1
    } else {
        (bits & FRACTION_MASK) | (1 << 52)
    };

    // |value| = mantissa * 2^-shift; a tie means 200 * |value| is an odd integer.
    let shift = 1075 - exponent;
    if shift <= 0 || shift >= 128 {
        return None;
    }
    let scaled = u128::from(mantissa) * 200;
    if scaled.trailing_zeros() != shift as u32 {
        return None;
    }
    Some(((scaled >> shift) + 1) / 2)
}

/// Running min/max of the average channel. Only ever widened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds {
    pub x_min: f64,
    pub x_max: f64,
}

impl Default for ViewBounds {
    fn default() -> Self {
        Self {
            x_min: 100.0,
            x_max: 0.0,
        }
    }
}

impl ViewBounds {
    pub fn widen(&mut self, value: f64) {
        if value < self.x_min {
            self.x_min = value;
        }
        if value > self.x_max {
            self.x_max = value;
        }
    }

    /// Vertical axis range handed to the chart.
    pub fn axis_range(&self) -> (f64, f64) {
        (self.x_min - 2.0, self.x_max + 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_reading_ties_round_up() {
        assert_eq!(format_reading(20.125), "20.13");
        assert_eq!(format_reading(0.125), "0.13");
        assert_eq!(format_reading(18.625), "18.63");
        assert_eq!(format_reading(20.375), "20.38");
        assert_eq!(format_reading(21.0625), "21.06");
        assert_eq!(format_reading(-0.125), "-0.13");
    }

    #[test]
    fn test_format_reading_non_ties() {
        // 19.555 is stored just below the halfway point.
        assert_eq!(format_reading(19.555), "19.55");
        assert_eq!(format_reading(1.005), "1.00");
        assert_eq!(format_reading(0.005), "0.01");
        assert_eq!(format_reading(20.0), "20.00");
        assert_eq!(format_reading(-3.1), "-3.10");
        assert_eq!(format_reading(-0.0), "0.00");
        assert_eq!(format_reading(1e-9), "0.00");
        assert_eq!(format_reading(1234567.891), "1234567.89");
        assert_eq!(format_reading(1e20), "100000000000000000000.00");
    }

    #[test]
    fn test_widen_never_narrows() {
        let mut bounds = ViewBounds::default();
        bounds.widen(21.0);
        bounds.widen(19.5);
        bounds.widen(20.0);

        assert_eq!(bounds, ViewBounds { x_min: 19.5, x_max: 21.0 });
        assert_eq!(bounds.axis_range(), (17.5, 23.0));
    }
}
