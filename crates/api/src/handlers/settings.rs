//! Handlers for per-user settings.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use campus_core::access::{Operation, Resource};
use campus_core::error::CoreError;
use campus_core::settings::{resolve_theme, NotificationPreference, Theme};
use campus_core::types::DbId;
use campus_db::models::settings::{Settings, SettingsUpdate, UpsertSettings};
use campus_db::repositories::SettingsRepo;
use serde::Serialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::TargetUserParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Client hint carrying the OS colour-scheme preference.
const PREFERS_COLOR_SCHEME: &str = "sec-ch-prefers-color-scheme";

/// Settings as the client should apply them.
#[derive(Debug, Serialize)]
pub struct EffectiveSettings {
    pub user_id: DbId,
    pub theme: Theme,
    pub language: String,
    pub notification_preference: NotificationPreference,
    pub privacy_controls: serde_json::Value,
    /// `false` when nothing is stored yet and defaults were used.
    pub stored: bool,
}

fn prefers_dark(headers: &HeaderMap) -> bool {
    headers
        .get(PREFERS_COLOR_SCHEME)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim_matches('"').eq_ignore_ascii_case("dark"))
}

/// GET /api/v1/settings?user_id=
///
/// Stored settings, or defaults with the theme taken from the
/// `Sec-CH-Prefers-Color-Scheme` hint.
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    headers: HeaderMap,
    Query(target): Query<TargetUserParams>,
) -> AppResult<Json<DataResponse<EffectiveSettings>>> {
    let user_id = user.authorize(Resource::Settings, Operation::Read, target.user_id)?;
    let stored = SettingsRepo::find_for_user(&state.pool, user_id).await?;
    let theme = resolve_theme(
        stored.as_ref().map(|s| s.theme.as_str()),
        prefers_dark(&headers),
    );

    let effective = match stored {
        Some(row) => EffectiveSettings {
            user_id,
            theme,
            language: row.language,
            notification_preference: row.notification_preference,
            privacy_controls: row.privacy_controls,
            stored: true,
        },
        None => {
            let defaults = UpsertSettings::default();
            EffectiveSettings {
                user_id,
                theme,
                language: defaults.language,
                notification_preference: defaults.notification_preference,
                privacy_controls: defaults.privacy_controls,
                stored: false,
            }
        }
    };
    Ok(Json(DataResponse::new(effective)))
}

/// PUT /api/v1/settings
///
/// Replace every setting, creating the row if needed.
pub async fn put(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpsertSettings>,
) -> AppResult<Json<DataResponse<Settings>>> {
    let user_id = user.authorize(Resource::Settings, Operation::Update, None)?;
    input.validate()?;
    if !input.privacy_controls.is_object() {
        return Err(CoreError::Validation("privacy_controls must be a JSON object".into()).into());
    }

    let settings = SettingsRepo::upsert(&state.pool, user_id, &input).await?;
    tracing::info!(user_id, "Settings saved");
    Ok(Json(DataResponse::new(settings)))
}

/// PATCH /api/v1/settings
///
/// Change a single setting; the others keep their stored or default value.
pub async fn patch(
    State(state): State<AppState>,
    user: AuthUser,
    Json(update): Json<SettingsUpdate>,
) -> AppResult<Json<DataResponse<Settings>>> {
    let user_id = user.authorize(Resource::Settings, Operation::Update, None)?;
    match &update {
        SettingsUpdate::Language { language } if !(2..=10).contains(&language.len()) => {
            return Err(CoreError::Validation("language must be 2-10 characters".into()).into());
        }
        SettingsUpdate::PrivacyControls { privacy_controls } if !privacy_controls.is_object() => {
            return Err(
                CoreError::Validation("privacy_controls must be a JSON object".into()).into(),
            );
        }
        _ => {}
    }

    let settings = SettingsRepo::update(&state.pool, user_id, &update).await?;
    tracing::info!(user_id, "Setting updated");
    Ok(Json(DataResponse::new(settings)))
}
