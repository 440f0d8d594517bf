//! Optional TOML theme manifest overriding occupant presentation.
//!
//! The manifest carries a version so stale files fail loudly instead of
//! silently rendering wrong. Entries override the glyph and color per
//! occupant kind; anything not mentioned keeps the built-in appearance. A
//! player glyph override replaces all four facing glyphs.

use anyhow::{bail, Context, Result};
use maze_chase_core::Occupant;
use maze_chase_rendering::{CellPresentation, Color};
use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Presentation overrides applied on top of the built-in appearance.
#[derive(Clone, Debug, Default)]
pub struct Theme {
    overrides: HashMap<ThemeKey, ThemeOverride>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum ThemeKey {
    Empty,
    Wall,
    Pellet,
    PowerPellet,
    Ghost,
    Player,
}

impl ThemeKey {
    fn for_occupant(occupant: Occupant) -> Self {
        match occupant {
            Occupant::Empty => Self::Empty,
            Occupant::Wall => Self::Wall,
            Occupant::Pellet => Self::Pellet,
            Occupant::PowerPellet => Self::PowerPellet,
            Occupant::Ghost(_) => Self::Ghost,
            Occupant::Player { .. } => Self::Player,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct ThemeOverride {
    glyph: Option<char>,
    color: Option<Color>,
}

impl Theme {
    /// Loads a theme from the manifest located at the provided path.
    pub fn from_manifest_path(path: impl AsRef<Path>) -> Result<Self> {
        let manifest_path = path.as_ref();
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!(
                "failed to read theme manifest at {}",
                manifest_path.display()
            )
        })?;
        Self::from_manifest_str(&contents)
    }

    /// Parses a theme from manifest text.
    pub fn from_manifest_str(contents: &str) -> Result<Self> {
        let manifest: Manifest =
            toml::from_str(contents).context("failed to parse theme manifest toml contents")?;
        if manifest.version != SUPPORTED_MANIFEST_VERSION {
            bail!(
                "unsupported theme manifest version {}; expected {}",
                manifest.version,
                SUPPORTED_MANIFEST_VERSION
            );
        }

        let mut overrides = HashMap::new();
        for (name, entry) in manifest.occupants {
            let key = parse_theme_key(&name)
                .with_context(|| format!("unknown occupant `{name}` in theme manifest"))?;
            let glyph = entry
                .glyph
                .as_deref()
                .map(parse_glyph)
                .transpose()
                .with_context(|| format!("invalid glyph for occupant `{name}`"))?;
            let color = entry
                .color
                .as_deref()
                .map(parse_color)
                .transpose()
                .with_context(|| format!("invalid color for occupant `{name}`"))?;
            let _ = overrides.insert(key, ThemeOverride { glyph, color });
        }
        Ok(Self { overrides })
    }

    /// Appearance of the provided occupant with theme overrides applied.
    #[must_use]
    pub fn presentation(&self, occupant: Occupant) -> CellPresentation {
        let key = ThemeKey::for_occupant(occupant);
        let overridden = self.overrides.get(&key).copied().unwrap_or_default();
        CellPresentation::new(
            overridden.glyph.unwrap_or_else(|| occupant.glyph()),
            overridden
                .color
                .unwrap_or_else(|| Color::from(occupant.color())),
        )
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    version: u32,
    #[serde(default)]
    occupants: HashMap<String, ManifestEntry>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    glyph: Option<String>,
    color: Option<String>,
}

fn parse_theme_key(name: &str) -> Result<ThemeKey> {
    Ok(match name {
        "empty" => ThemeKey::Empty,
        "wall" => ThemeKey::Wall,
        "pellet" => ThemeKey::Pellet,
        "power_pellet" => ThemeKey::PowerPellet,
        "ghost" => ThemeKey::Ghost,
        "player" => ThemeKey::Player,
        other => bail!("no occupant kind is named `{other}`"),
    })
}

fn parse_glyph(value: &str) -> Result<char> {
    let mut chars = value.chars();
    let (Some(glyph), None) = (chars.next(), chars.next()) else {
        bail!("glyph must be exactly one character (received `{value}`)");
    };
    Ok(glyph)
}

fn parse_color(value: &str) -> Result<Color> {
    if value.len() != 6 || !value.chars().all(|ch| ch.is_ascii_hexdigit()) {
        bail!("color must be six hex digits (received `{value}`)");
    }
    let channel = |range: std::ops::Range<usize>| -> Result<u8> {
        u8::from_str_radix(&value[range], 16).context("color channel is not valid hex")
    };
    Ok(Color::from_rgb_u8(
        channel(0..2)?,
        channel(2..4)?,
        channel(4..6)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::Theme;
    use maze_chase_core::{Direction, GhostId, Occupant};
    use maze_chase_rendering::Color;

    #[test]
    fn default_theme_passes_builtin_presentation_through() {
        let theme = Theme::default();
        let pellet = theme.presentation(Occupant::Pellet);

        assert_eq!(pellet.glyph, Occupant::Pellet.glyph());
        assert_eq!(pellet.color, Color::from(Occupant::Pellet.color()));
    }

    #[test]
    fn manifest_overrides_glyph_and_color() {
        let theme = Theme::from_manifest_str(
            "version = 1\n\n[occupants.wall]\nglyph = \"#\"\ncolor = \"2b6ede\"\n",
        )
        .expect("valid manifest");

        let wall = theme.presentation(Occupant::Wall);
        assert_eq!(wall.glyph, '#');
        assert_eq!(wall.color, Color::from_rgb_u8(0x2b, 0x6e, 0xde));

        // Unmentioned kinds keep their built-in appearance.
        let ghost = theme.presentation(Occupant::Ghost(GhostId::new(0)));
        assert_eq!(ghost.glyph, 'M');
    }

    #[test]
    fn partial_overrides_keep_the_other_channel() {
        let theme = Theme::from_manifest_str("version = 1\n\n[occupants.ghost]\ncolor = \"00ff00\"\n")
            .expect("valid manifest");

        let ghost = theme.presentation(Occupant::Ghost(GhostId::new(1)));
        assert_eq!(ghost.glyph, 'M');
        assert_eq!(ghost.color, Color::from_rgb_u8(0, 255, 0));
    }

    #[test]
    fn player_glyph_override_replaces_every_facing() {
        let theme = Theme::from_manifest_str("version = 1\n\n[occupants.player]\nglyph = \"@\"\n")
            .expect("valid manifest");

        for facing in Direction::ALL {
            assert_eq!(theme.presentation(Occupant::Player { facing }).glyph, '@');
        }
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let error = Theme::from_manifest_str("version = 9\n").expect_err("version 9 is unsupported");
        assert!(error.to_string().contains("unsupported theme manifest"));
    }

    #[test]
    fn unknown_occupant_names_are_rejected() {
        let error = Theme::from_manifest_str("version = 1\n\n[occupants.portal]\nglyph = \"O\"\n")
            .expect_err("portal is not an occupant kind");
        assert!(error.to_string().contains("portal"));
    }

    #[test]
    fn multi_character_glyphs_are_rejected() {
        let error = Theme::from_manifest_str("version = 1\n\n[occupants.wall]\nglyph = \"##\"\n")
            .expect_err("two characters cannot fill one cell");
        assert!(error.to_string().contains("invalid glyph"));
    }

    #[test]
    fn malformed_colors_are_rejected() {
        let error = Theme::from_manifest_str("version = 1\n\n[occupants.wall]\ncolor = \"red\"\n")
            .expect_err("named colors are not supported");
        assert!(error.to_string().contains("invalid color"));
    }
}
