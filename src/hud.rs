//! HUD text formatting
//!
//! Turns a [`Stats`] snapshot into the strings shown on screen. The DOM side
//! only copies these into elements.

use crate::sim::{PowerUpKind, Stats};

/// Integer with thousands separators: 12345 -> "12,345"
pub fn group_thousands(value: f64) -> String {
    let n = value.max(0.0).floor() as u64;
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Live HUD strings
#[derive(Debug, Clone, PartialEq)]
pub struct HudText {
    pub score: String,
    pub distance: String,
    pub combo: String,
    pub speed: String,
    /// (element id, active, whole seconds left)
    pub power_ups: [(&'static str, bool, String); 4],
}

impl HudText {
    pub fn from_stats(stats: &Stats) -> Self {
        Self {
            score: group_thousands(stats.score),
            distance: format!("{}m", stats.distance.floor()),
            combo: format!("x{}", trim_float(stats.combo)),
            speed: format!("{:.1}x", stats.speed),
            power_ups: stats.power_ups.map(|s| {
                let secs = if s.active {
                    s.remaining.ceil().to_string()
                } else {
                    String::new()
                };
                (indicator_id(s.kind), s.active, secs)
            }),
        }
    }
}

/// Game-over summary strings
#[derive(Debug, Clone, PartialEq)]
pub struct FinalText {
    pub score: String,
    pub distance: String,
    pub max_combo: String,
    pub power_ups_used: String,
}

impl FinalText {
    pub fn from_stats(stats: &Stats) -> Self {
        Self {
            score: group_thousands(stats.score),
            distance: format!("{}m", stats.distance.floor()),
            max_combo: format!("x{}", trim_float(stats.max_combo)),
            power_ups_used: stats.power_ups_used.to_string(),
        }
    }
}

/// One decimal, dropping a trailing ".0"
fn trim_float(v: f32) -> String {
    let s = format!("{:.1}", v);
    s.strip_suffix(".0").map(str::to_owned).unwrap_or(s)
}

/// Element id for a power-up's HUD indicator
pub fn indicator_id(kind: PowerUpKind) -> &'static str {
    kind.name()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::GameSession;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.9), "999");
        assert_eq!(group_thousands(1000.0), "1,000");
        assert_eq!(group_thousands(1234567.0), "1,234,567");
        assert_eq!(group_thousands(-5.0), "0");
    }

    #[test]
    fn test_hud_from_fresh_run() {
        let mut session = GameSession::new(1, Tuning::default());
        session.start();
        let hud = HudText::from_stats(&session.stats());
        assert_eq!(hud.score, "0");
        assert_eq!(hud.distance, "0m");
        assert_eq!(hud.combo, "x1");
        assert_eq!(hud.speed, "1.0x");
        assert!(hud.power_ups.iter().all(|(_, active, secs)| !active && secs.is_empty()));
    }

    #[test]
    fn test_timer_rounds_up() {
        let mut session = GameSession::new(1, Tuning::default());
        session.start();
        session.active_power_ups.activate(PowerUpKind::Magnet);
        session.active_power_ups.age(0.5);
        let hud = HudText::from_stats(&session.stats());
        let magnet = &hud.power_ups[PowerUpKind::Magnet.index()];
        assert_eq!(magnet.0, indicator_id(PowerUpKind::Magnet));
        assert!(magnet.1);
        assert_eq!(magnet.2, "8");
    }

    #[test]
    fn test_final_text() {
        let mut session = GameSession::new(1, Tuning::default());
        session.start();
        session.score = 12_345.6;
        session.distance = 987.4;
        session.combo = 1.5;
        session.max_combo = 1.5;
        session.power_ups_used = 3;
        let text = FinalText::from_stats(&session.stats());
        assert_eq!(text.score, "12,345");
        assert_eq!(text.distance, "987m");
        assert_eq!(text.max_combo, "x1.5");
        assert_eq!(text.power_ups_used, "3");
    }
}
