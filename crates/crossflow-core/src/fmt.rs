//! Human-readable formatting for durations and probabilities.
//!
//! These render the strings that appear in driver logs and estimate
//! displays, so tests may grep them.

/// Format a millisecond count as `h:mm:ss.mmm`.
pub fn format_duration(millis: u64) -> String {
    let ms = millis % 1_000;
    let total_secs = millis / 1_000;
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let hours = total_mins / 60;
    format!("{}:{:02}:{:02}.{:03}", hours, mins, secs, ms)
}

/// Format a probability in `[0, 1]` as `xx.x%`.
pub fn format_percentage(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(format_duration(0), "0:00:00.000");
        assert_eq!(format_duration(1_234), "0:00:01.234");
        assert_eq!(format_duration(3_600_000 + 2 * 60_000 + 3_000 + 45), "1:02:03.045");
    }

    #[test]
    fn percentages() {
        assert_eq!(format_percentage(0.9), "90.0%");
        assert_eq!(format_percentage(0.725), "72.5%");
    }
}
