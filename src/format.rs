//! Display helpers for clock readouts and player tokens.

/// `MM:SS` for a number of seconds; fractions are truncated and minutes are
/// not wrapped at an hour.
pub fn format_seconds(seconds: f64) -> String {
    let s = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let minutes = (s / 60.0).floor() as u64;
    let secs = (s % 60.0).floor() as u64;
    format!("{:02}:{:02}", minutes, secs)
}

/// Colour band of a player's elapsed-time badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Green,
    Yellow,
    Orange,
    Red,
}

impl BadgeTone {
    /// Under 20 minutes green, then yellow, orange from 40 and red from 60.
    pub fn for_seconds(seconds: f64) -> BadgeTone {
        let minutes = (seconds.max(0.0) / 60.0).floor();
        if minutes >= 60.0 {
            BadgeTone::Red
        } else if minutes >= 40.0 {
            BadgeTone::Orange
        } else if minutes >= 20.0 {
            BadgeTone::Yellow
        } else {
            BadgeTone::Green
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BadgeTone::Green => "green",
            BadgeTone::Yellow => "yellow",
            BadgeTone::Orange => "orange",
            BadgeTone::Red => "red",
        }
    }
}

/// Token label: first three letters of a single name, otherwise the first
/// letters of the first and last names.
pub fn initials(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    match parts.as_slice() {
        [] => String::new(),
        [single] => single.chars().take(3).collect::<String>().to_uppercase(),
        [first, .., last] => first
            .chars()
            .take(1)
            .chain(last.chars().take(1))
            .collect::<String>()
            .to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_seconds(0.0), "00:00");
        assert_eq!(format_seconds(65.9), "01:05");
        assert_eq!(format_seconds(5400.0), "90:00");
        assert_eq!(format_seconds(-3.0), "00:00");
    }

    #[test]
    fn badge_tone_thresholds() {
        assert_eq!(BadgeTone::for_seconds(1199.0), BadgeTone::Green);
        assert_eq!(BadgeTone::for_seconds(1200.0), BadgeTone::Yellow);
        assert_eq!(BadgeTone::for_seconds(2400.0), BadgeTone::Orange);
        assert_eq!(BadgeTone::for_seconds(3600.0), BadgeTone::Red);
    }

    #[test]
    fn initials_from_names() {
        assert_eq!(initials("pele"), "PEL");
        assert_eq!(initials("  Zinedine Yazid Zidane "), "ZZ");
        assert_eq!(initials(""), "");
    }
}
