//! Free-text numeric entry with staged edit and commit.
//!
//! Keystrokes only replace the text buffer. The buffer is parsed and clamped
//! when it is committed (blur or enter) or when a step button is pressed, so
//! partially typed numbers are never reformatted mid-entry.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl InputBounds {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

impl Default for InputBounds {
    fn default() -> Self {
        Self::new(0.0, 99_999.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundedInput {
    bounds: InputBounds,
    value: f64,
    buffer: String,
}

impl BoundedInput {
    pub fn new(value: f64, bounds: InputBounds) -> Self {
        Self {
            bounds,
            value,
            buffer: format_number(value),
        }
    }

    /// Last committed value.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn focus(&mut self) {
        self.buffer = format_number(self.value);
    }

    pub fn edit(&mut self, raw: impl Into<String>) {
        self.buffer = raw.into();
    }

    /// Parses the buffer, clamps it and reports the result to `on_change`.
    /// Unparsable text commits as 0 (clamped).
    pub fn commit(&mut self, on_change: impl FnOnce(f64)) -> f64 {
        let parsed = parse_number(&self.buffer).unwrap_or(0.0);
        self.settle(parsed, on_change)
    }

    pub fn increment(&mut self, on_change: impl FnOnce(f64)) -> f64 {
        self.settle(self.value + self.bounds.step, on_change)
    }

    pub fn decrement(&mut self, on_change: impl FnOnce(f64)) -> f64 {
        self.settle(self.value - self.bounds.step, on_change)
    }

    fn settle(&mut self, candidate: f64, on_change: impl FnOnce(f64)) -> f64 {
        let value = tidy(self.bounds.clamp(candidate));
        self.value = value;
        self.buffer = format_number(value);
        on_change(value);
        value
    }
}

/// Reads the leading decimal number of `raw`, ignoring surrounding
/// whitespace and any trailing text ("12kg" reads as 12).
pub fn parse_number(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse::<f64>().ok().filter(|value| value.is_finite())
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|byte| byte.is_ascii_digit()).count()
}

/// Stepping by 0.1 accumulates binary noise; keep values at the precision
/// a person would type.
fn tidy(value: f64) -> f64 {
    let rounded = (value * 1e6).round() / 1e6;
    if rounded == 0.0 { 0.0 } else { rounded }
}

pub fn format_number(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps_input(value: f64) -> BoundedInput {
        BoundedInput::new(value, InputBounds::new(0.0, 10_000.0, 500.0))
    }

    #[test]
    fn commit_clamps_to_max() {
        let mut input = steps_input(0.0);
        input.focus();
        input.edit("15000");
        let mut reported = None;
        input.commit(|value| reported = Some(value));

        assert_eq!(reported, Some(10_000.0));
        assert_eq!(input.buffer(), "10000");
        assert_eq!(input.value(), 10_000.0);
    }

    #[test]
    fn commit_of_garbage_reports_zero() {
        let mut input = steps_input(1200.0);
        input.edit("abc");
        let mut reported = None;
        input.commit(|value| reported = Some(value));

        assert_eq!(reported, Some(0.0));
        assert_eq!(input.buffer(), "0");
    }

    #[test]
    fn editing_keeps_text_verbatim() {
        let mut input = steps_input(0.0);
        input.edit("15");
        assert_eq!(input.buffer(), "15");
        input.edit("150000");
        assert_eq!(input.buffer(), "150000");
        assert_eq!(input.value(), 0.0);
    }

    #[test]
    fn focus_discards_stale_buffer() {
        let mut input = steps_input(300.0);
        input.edit("99");
        input.focus();
        assert_eq!(input.buffer(), "300");
    }

    #[test]
    fn increment_steps_from_current_value() {
        let mut input = BoundedInput::new(5.0, InputBounds::new(0.0, 99_999.0, 500.0));
        let mut reported = None;
        input.increment(|value| reported = Some(value));
        assert_eq!(reported, Some(505.0));
        assert_eq!(input.buffer(), "505");
    }

    #[test]
    fn increment_stops_at_max() {
        let mut input = BoundedInput::new(5.0, InputBounds::new(0.0, 300.0, 500.0));
        assert_eq!(input.increment(|_| {}), 300.0);
    }

    #[test]
    fn decrement_stops_at_min() {
        let mut input = BoundedInput::new(0.5, InputBounds::new(0.0, 24.0, 1.0));
        assert_eq!(input.decrement(|_| {}), 0.0);
        assert_eq!(input.buffer(), "0");
    }

    #[test]
    fn fractional_steps_stay_tidy() {
        let mut input = BoundedInput::new(70.0, InputBounds::new(0.0, 300.0, 0.1));
        input.increment(|_| {});
        input.increment(|_| {});
        input.increment(|_| {});
        assert_eq!(input.buffer(), "70.3");
    }

    #[test]
    fn focus_after_commit_shows_committed_value() {
        let mut input = steps_input(1000.0);
        input.edit("1500 steps");
        input.commit(|_| {});
        input.edit("15");
        input.focus();
        assert_eq!(input.buffer(), "1500");
    }

    #[test]
    fn defaults_match_plain_inputs() {
        let bounds = InputBounds::default();
        assert_eq!((bounds.min, bounds.max, bounds.step), (0.0, 99_999.0, 1.0));
    }

    #[test]
    fn parse_number_reads_leading_number() {
        assert_eq!(parse_number("  42"), Some(42.0));
        assert_eq!(parse_number("7.5hrs"), Some(7.5));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("2e"), Some(2.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
    }
}
