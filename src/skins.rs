//! Player skins
//!
//! Skins unlock at fixed score milestones. The milestone is checked against the
//! best score seen since the page loaded; nothing is stored between visits.

use rand::Rng;
use serde::Serialize;

/// A cosmetic player skin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Skin {
    pub name: &'static str,
    pub color: &'static str,
    pub hat: &'static str,
}

/// Score needed per skin index
pub const UNLOCK_STEP: f64 = 10_000.0;

pub const SKINS: [Skin; 6] = [
    Skin { name: "Classic", color: "#FF6B6B", hat: "🎩" },
    Skin { name: "Space", color: "#4ECDC4", hat: "🚀" },
    Skin { name: "Ninja", color: "#2C3E50", hat: "🥷" },
    Skin { name: "Pirate", color: "#8B4513", hat: "🏴‍☠️" },
    Skin { name: "Robot", color: "#95A5A6", hat: "🤖" },
    Skin { name: "Wizard", color: "#9B59B6", hat: "🧙" },
];

impl Default for Skin {
    fn default() -> Self {
        SKINS[0]
    }
}

/// Skins available at the given best score (Classic is always unlocked)
pub fn unlocked(best_score: f64) -> &'static [Skin] {
    let count = SKINS
        .iter()
        .enumerate()
        .take_while(|(i, _)| *i == 0 || best_score >= *i as f64 * UNLOCK_STEP)
        .count();
    &SKINS[..count]
}

/// Pick a random unlocked skin
pub fn pick(rng: &mut impl Rng, best_score: f64) -> Skin {
    let available = unlocked(best_score);
    available[rng.random_range(0..available.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_only_classic_at_zero() {
        assert_eq!(unlocked(0.0), &SKINS[..1]);
    }

    #[test]
    fn test_milestones() {
        assert_eq!(unlocked(9_999.0).len(), 1);
        assert_eq!(unlocked(10_000.0).len(), 2);
        assert_eq!(unlocked(35_000.0).len(), 4);
        assert_eq!(unlocked(1e9).len(), SKINS.len());
    }

    #[test]
    fn test_pick_stays_unlocked() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let skin = pick(&mut rng, 20_000.0);
            assert!(unlocked(20_000.0).contains(&skin));
        }
    }
}
