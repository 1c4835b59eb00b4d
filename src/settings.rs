//! # Caller-Owned Settings
//!
//! Inputs supplied by the host on every processing call: transposition,
//! notation alphabet, render toggles and song metadata. The engine never keeps
//! any of these between calls.
//!
//! [`EngineConfig`] lets the same settings be loaded from a YAML file
//! (kebab-case keys, every field optional):
//!
//! ```yaml
//! transpose: -3
//! notation: solfege
//! chords-visible: false
//! font-family: Georgia
//! font-scale-em: 1.25
//! ```

use crate::ast::SongHeader;
use crate::error::ChordError;
use serde::Deserialize;
use std::ops::{Add, Neg};

/// Alphabet used to name chord roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotationSystem {
    /// A-G letter names.
    #[default]
    Latin,
    /// Do-Si syllables.
    #[serde(alias = "solfège")]
    Solfege,
}

/// Semitone offset normalized into 0..12.
///
/// The raw value may be any integer; it is wrapped with
/// `((d % 12) + 12) % 12`, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TransposeState {
    semitones: u8,
}

impl TransposeState {
    pub fn new(raw: i32) -> Self {
        Self {
            semitones: (((raw % 12) + 12) % 12) as u8,
        }
    }

    pub fn semitones(self) -> i32 {
        self.semitones as i32
    }

    pub fn is_identity(self) -> bool {
        self.semitones == 0
    }

    /// Shortest signed interval: `+1..+6` or `-1..-5`.
    pub fn signed(self) -> i32 {
        let s = self.semitones();
        if s > 6 {
            s - 12
        } else {
            s
        }
    }

    /// Header label such as `+2` or `-1`; `None` when there is no transposition.
    pub fn label(self) -> Option<String> {
        if self.is_identity() {
            None
        } else {
            Some(format!("{:+}", self.signed()))
        }
    }
}

impl Add for TransposeState {
    type Output = TransposeState;

    fn add(self, other: TransposeState) -> TransposeState {
        TransposeState::new(self.semitones() + other.semitones())
    }
}

impl Neg for TransposeState {
    type Output = TransposeState;

    fn neg(self) -> TransposeState {
        TransposeState::new(-self.semitones())
    }
}

/// Display toggles applied as style, never by changing the document.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub chords_visible: bool,
    pub font_scale_em: f32,
    pub font_family: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            chords_visible: true,
            font_scale_em: 1.0,
            font_family: "sans-serif".to_string(),
        }
    }
}

/// Song metadata supplied by the storage layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SongMeta {
    pub author: Option<String>,
    pub original_key: Option<String>,
    pub capo: Option<u32>,
}

impl SongMeta {
    /// Fill fields the caller left empty from the markup's own header directives.
    pub fn merged_with(&self, header: &SongHeader) -> SongMeta {
        SongMeta {
            author: non_empty(&self.author).or_else(|| non_empty(&header.artist)),
            original_key: non_empty(&self.original_key).or_else(|| non_empty(&header.key)),
            capo: self.capo.or(header.capo),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Raw settings file for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfig {
    transpose: Option<i32>,
    notation: Option<NotationSystem>,
    chords_visible: Option<bool>,
    font_family: Option<String>,
    font_scale_em: Option<f32>,
}

/// Engine settings loaded from a YAML file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineConfig {
    pub transpose: i32,
    pub notation: NotationSystem,
    pub render: RenderSettings,
}

impl EngineConfig {
    pub fn from_yaml(content: &str) -> Result<Self, ChordError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| ChordError::ConfigError(e.to_string()))?;

        let defaults = RenderSettings::default();
        Ok(Self {
            transpose: raw.transpose.unwrap_or(0),
            notation: raw.notation.unwrap_or_default(),
            render: RenderSettings {
                chords_visible: raw.chords_visible.unwrap_or(defaults.chords_visible),
                font_scale_em: raw.font_scale_em.unwrap_or(defaults.font_scale_em),
                font_family: raw.font_family.unwrap_or(defaults.font_family),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose_normalization() {
        assert_eq!(TransposeState::new(0).semitones(), 0);
        assert_eq!(TransposeState::new(2).semitones(), 2);
        assert_eq!(TransposeState::new(-1).semitones(), 11);
        assert_eq!(TransposeState::new(14).semitones(), 2);
        assert_eq!(TransposeState::new(-25).semitones(), 11);
        assert_eq!(TransposeState::new(i32::MIN).semitones(), 4);
        assert_eq!(TransposeState::new(i32::MAX).semitones(), 7);
    }

    #[test]
    fn test_transpose_label() {
        assert_eq!(TransposeState::new(0).label(), None);
        assert_eq!(TransposeState::new(2).label(), Some("+2".to_string()));
        assert_eq!(TransposeState::new(-1).label(), Some("-1".to_string()));
        assert_eq!(TransposeState::new(11).label(), Some("-1".to_string()));
        assert_eq!(TransposeState::new(6).label(), Some("+6".to_string()));
        assert_eq!(TransposeState::new(7).label(), Some("-5".to_string()));
    }

    #[test]
    fn test_transpose_arithmetic() {
        let a = TransposeState::new(5);
        let b = TransposeState::new(9);
        assert_eq!((a + b).semitones(), 2);
        assert!((a + -a).is_identity());
    }

    #[test]
    fn test_meta_merge_prefers_caller() {
        let header = SongHeader {
            artist: Some("Header Artist".to_string()),
            key: Some("G".to_string()),
            capo: Some(1),
            ..Default::default()
        };
        let meta = SongMeta {
            author: Some("Caller".to_string()),
            original_key: Some("  ".to_string()),
            capo: None,
        };
        let merged = meta.merged_with(&header);
        assert_eq!(merged.author.as_deref(), Some("Caller"));
        assert_eq!(merged.original_key.as_deref(), Some("G"));
        assert_eq!(merged.capo, Some(1));
    }

    #[test]
    fn test_config_from_yaml() {
        let config = EngineConfig::from_yaml(
            "transpose: -3\nnotation: solfege\nchords-visible: false\nfont-family: Georgia\nfont-scale-em: 1.25\n",
        )
        .unwrap();
        assert_eq!(config.transpose, -3);
        assert_eq!(config.notation, NotationSystem::Solfege);
        assert!(!config.render.chords_visible);
        assert_eq!(config.render.font_family, "Georgia");
        assert_eq!(config.render.font_scale_em, 1.25);
    }

    #[test]
    fn test_config_defaults_and_errors() {
        assert_eq!(EngineConfig::from_yaml("").unwrap(), EngineConfig::default());
        let partial = EngineConfig::from_yaml("transpose: 4").unwrap();
        assert_eq!(partial.transpose, 4);
        assert!(partial.render.chords_visible);

        let err = EngineConfig::from_yaml("colour: red").unwrap_err();
        assert!(matches!(err, ChordError::ConfigError(_)));
    }
}
