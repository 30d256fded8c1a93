//! Handlers for `/preferences`.
//!
//! `PUT` accepts any subset of the fields returned by `GET`. Every supplied
//! value is validated before any is applied.

use axum::{Json, extract::State};
use satchel_core::{
  preferences::{FONT_SIZE_KEY, FontSize, PreferenceValues, Theme, ThemeColor},
  store::KvStore,
};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

/// `GET /preferences`
pub async fn get<S: KvStore, G>(
  State(state): State<AppState<S, G>>,
) -> Result<Json<PreferenceValues>, ApiError> {
  Ok(Json(state.library()?.preferences().values()))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBody {
  /// `light`, `dark` or `system`.
  pub theme:       Option<String>,
  /// Palette name (`Teal`) or its HSL value (`174 51% 33%`).
  pub theme_color: Option<String>,
  /// Root font size in rem: `0.75`, `1` or `1.25`.
  pub font_size:   Option<f64>,
}

/// `PUT /preferences`
pub async fn update<S: KvStore + 'static, G>(
  State(state): State<AppState<S, G>>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<PreferenceValues>, ApiError> {
  let theme = body.theme.as_deref().map(str::parse::<Theme>).transpose()?;
  let color = body
    .theme_color
    .as_deref()
    .map(str::parse::<ThemeColor>)
    .transpose()?;
  let size = body
    .font_size
    .map(|rem| {
      FontSize::from_rem(rem).ok_or_else(|| satchel_core::Error::InvalidPreference {
        key:   FONT_SIZE_KEY,
        value: rem.to_string(),
      })
    })
    .transpose()?;

  state
    .run(move |library, _| {
      let prefs = library.preferences_mut();
      if let Some(theme) = theme {
        prefs.set_theme(theme);
      }
      if let Some(color) = color {
        prefs.set_theme_color(color);
      }
      if let Some(size) = size {
        prefs.set_font_size(size);
      }
      Ok(Json(prefs.values()))
    })
    .await
}
