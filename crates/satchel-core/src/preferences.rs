//! Appearance preferences: theme, primary colour, font size.
//!
//! Each value is stored as plain text under its own key. A stored value that
//! does not parse is ignored in favour of the default.

use std::{fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, persist, store::KvStore};

pub const THEME_KEY: &str = "theme";
pub const THEME_COLOR_KEY: &str = "theme-color";
pub const FONT_SIZE_KEY: &str = "font-size";

// ─── Theme ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
  Light,
  Dark,
  #[default]
  System,
}

impl Theme {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Light => "light",
      Self::Dark => "dark",
      Self::System => "system",
    }
  }
}

impl FromStr for Theme {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "light" => Ok(Self::Light),
      "dark" => Ok(Self::Dark),
      "system" => Ok(Self::System),
      other => Err(Error::InvalidPreference { key: THEME_KEY, value: other.into() }),
    }
  }
}

// ─── Theme colour ────────────────────────────────────────────────────────────

/// A named HSL triple from the fixed palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColor {
  pub name:  &'static str,
  /// `H S% L%`, as consumed by a CSS `hsl()` custom property.
  pub value: &'static str,
}

pub const PALETTE: [ThemeColor; 5] = [
  ThemeColor { name: "Blue", value: "221 83% 53%" },
  ThemeColor { name: "Teal", value: "174 51% 33%" },
  ThemeColor { name: "Green", value: "142 76% 36%" },
  ThemeColor { name: "Orange", value: "25 95% 53%" },
  ThemeColor { name: "Rose", value: "347 90% 49%" },
];

impl Default for ThemeColor {
  fn default() -> Self { PALETTE[0] }
}

impl FromStr for ThemeColor {
  type Err = Error;

  /// Accepts either the palette name or its HSL value.
  fn from_str(s: &str) -> Result<Self> {
    PALETTE
      .iter()
      .find(|c| c.value == s || c.name.eq_ignore_ascii_case(s))
      .copied()
      .ok_or_else(|| Error::InvalidPreference {
        key:   THEME_COLOR_KEY,
        value: s.into(),
      })
  }
}

impl Serialize for ThemeColor {
  fn serialize<Ser: serde::Serializer>(
    &self,
    serializer: Ser,
  ) -> std::result::Result<Ser::Ok, Ser::Error> {
    serializer.serialize_str(self.value)
  }
}

// ─── Font size ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSize {
  Small,
  #[default]
  Normal,
  Large,
}

impl FontSize {
  pub fn rem(self) -> f64 {
    match self {
      Self::Small => 0.75,
      Self::Normal => 1.0,
      Self::Large => 1.25,
    }
  }

  pub fn from_rem(rem: f64) -> Option<Self> {
    [Self::Small, Self::Normal, Self::Large]
      .into_iter()
      .find(|size| size.rem() == rem)
  }
}

impl FromStr for FontSize {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    s.trim()
      .parse::<f64>()
      .ok()
      .and_then(Self::from_rem)
      .ok_or_else(|| Error::InvalidPreference { key: FONT_SIZE_KEY, value: s.into() })
  }
}

impl fmt::Display for FontSize {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.rem())
  }
}

impl Serialize for FontSize {
  fn serialize<Ser: serde::Serializer>(
    &self,
    serializer: Ser,
  ) -> std::result::Result<Ser::Ok, Ser::Error> {
    serializer.serialize_f64(self.rem())
  }
}

// ─── Preferences ─────────────────────────────────────────────────────────────

/// A snapshot of the current preference values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceValues {
  pub theme:       Theme,
  pub theme_color: ThemeColor,
  pub font_size:   FontSize,
}

/// The persisted appearance settings.
pub struct Preferences<S> {
  store:  Arc<S>,
  values: PreferenceValues,
}

impl<S: KvStore> Preferences<S> {
  pub fn open(store: Arc<S>) -> Self {
    let values = PreferenceValues {
      theme:       load_or_default(store.as_ref(), THEME_KEY),
      theme_color: load_or_default(store.as_ref(), THEME_COLOR_KEY),
      font_size:   load_or_default(store.as_ref(), FONT_SIZE_KEY),
    };
    Self { store, values }
  }

  pub fn values(&self) -> PreferenceValues { self.values }

  pub fn theme(&self) -> Theme { self.values.theme }

  pub fn theme_color(&self) -> ThemeColor { self.values.theme_color }

  pub fn font_size(&self) -> FontSize { self.values.font_size }

  pub fn set_theme(&mut self, theme: Theme) {
    self.values.theme = theme;
    persist::save_text(self.store.as_ref(), THEME_KEY, theme.as_str());
  }

  pub fn set_theme_color(&mut self, color: ThemeColor) {
    self.values.theme_color = color;
    persist::save_text(self.store.as_ref(), THEME_COLOR_KEY, color.value);
  }

  pub fn set_font_size(&mut self, size: FontSize) {
    self.values.font_size = size;
    persist::save_text(self.store.as_ref(), FONT_SIZE_KEY, &size.to_string());
  }
}

fn load_or_default<S, T>(store: &S, key: &str) -> T
where
  S: KvStore,
  T: FromStr + Default,
{
  let Some(raw) = persist::load_text(store, key) else {
    return T::default();
  };
  raw.parse().unwrap_or_else(|_| {
    tracing::warn!(key, value = %raw, "ignoring invalid stored preference");
    T::default()
  })
}
