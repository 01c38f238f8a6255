//! Player preferences
//!
//! Presentation-side knobs only. Nothing here changes gameplay outcomes: the
//! particle cap and trail length feed cosmetic state, the rest is read by the
//! audio sink and the web driver.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "&'static str")]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 60,
            QualityPreset::Medium => 250,
            QualityPreset::High => 1000,
        }
    }

    /// Fraction of the tuned trail length kept
    pub fn trail_quality(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.3,
            QualityPreset::Medium => 0.6,
            QualityPreset::High => 1.0,
        }
    }
}

impl From<String> for QualityPreset {
    fn from(name: String) -> Self {
        Self::from_name(&name).unwrap_or_else(|| {
            log::warn!("Unknown quality '{}', using medium", name);
            Self::default()
        })
    }
}

impl From<QualityPreset> for &'static str {
    fn from(preset: QualityPreset) -> Self {
        preset.as_str()
    }
}

/// Presentation preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Visual quality tier
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Particle bursts (pickups, shield hits, environment transitions)
    pub particles: bool,
    /// Player trail
    pub trails: bool,

    // === Audio ===
    pub sound_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background drone volume (0.0 - 1.0)
    pub music_volume: f32,

    /// Pause when the window loses focus or the tab is hidden
    pub pause_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            particles: true,
            trails: true,

            sound_enabled: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,

            pause_on_blur: true,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Live particle cap after the particle toggle
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Effective trail length given the tuned maximum
    pub fn trail_length(&self, max_len: usize) -> usize {
        if !self.trails {
            0
        } else {
            (max_len as f32 * self.quality.trail_quality()).round() as usize
        }
    }

    /// Effective sound effect gain
    pub fn sfx_gain(&self) -> f32 {
        if !self.sound_enabled {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective background drone gain
    pub fn music_gain(&self) -> f32 {
        if !self.sound_enabled {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Parse settings JSON (missing keys use defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names() {
        assert_eq!(QualityPreset::from_name("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_name("ultra"), None);
        assert_eq!(QualityPreset::High.as_str(), "High");
    }

    #[test]
    fn test_particles_off_caps_to_zero() {
        let settings = Settings {
            particles: false,
            ..Settings::from_preset(QualityPreset::High)
        };
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_trail_length_scales_with_quality() {
        assert_eq!(Settings::from_preset(QualityPreset::High).trail_length(10), 10);
        assert_eq!(Settings::from_preset(QualityPreset::Low).trail_length(10), 3);
    }

    #[test]
    fn test_muted_gain() {
        let settings = Settings {
            sound_enabled: false,
            ..Settings::default()
        };
        assert_eq!(settings.sfx_gain(), 0.0);
        assert_eq!(settings.music_gain(), 0.0);
    }

    #[test]
    fn test_from_json_partial() {
        let settings = Settings::from_json(r#"{ "quality": "Low" }"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(settings.sound_enabled);
    }

    #[test]
    fn test_unknown_quality_falls_back() {
        let settings = Settings::from_json(r#"{ "quality": "ultra" }"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::Medium);
        let settings = Settings::from_json(r#"{ "quality": "high" }"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::High);
    }
}
