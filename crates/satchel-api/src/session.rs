//! Handlers for `/session`.
//!
//! | Method   | Path       | Notes |
//! |----------|------------|-------|
//! | `GET`    | `/session` | Current user or `null` |
//! | `POST`   | `/session` | Body: `{"name"?, "email"}`; switches document scope |
//! | `DELETE` | `/session` | Back to the guest scope; 204 |

use axum::{Json, extract::State, http::StatusCode};
use satchel_core::{session::User, store::KvStore};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

/// `GET /session`
pub async fn current<S: KvStore, G>(
  State(state): State<AppState<S, G>>,
) -> Result<Json<Option<User>>, ApiError> {
  let library = state.library()?;
  Ok(Json(library.session().current().cloned()))
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  #[serde(default)]
  pub name:  Option<String>,
  pub email: String,
}

/// `POST /session`
pub async fn login<S: KvStore + 'static, G>(
  State(state): State<AppState<S, G>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<User>, ApiError> {
  let name = body.name.filter(|n| !n.trim().is_empty());
  let user = state
    .run(move |library, _| Ok(library.login(name, &body.email)?))
    .await?;
  Ok(Json(user))
}

/// `DELETE /session`
pub async fn logout<S: KvStore + 'static, G>(
  State(state): State<AppState<S, G>>,
) -> Result<StatusCode, ApiError> {
  state
    .run(|library, _| {
      library.logout();
      Ok(())
    })
    .await?;
  Ok(StatusCode::NO_CONTENT)
}
