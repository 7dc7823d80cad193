use json_patch::Patch;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Applies `patch` to a detached copy of `current` and returns the patched
/// value only if it still satisfies its validation rules. `current` is never
/// touched, so a rejected patch leaves the caller's state as it was.
pub fn apply_patch<T>(current: &T, patch: &Patch) -> AppResult<T>
where
    T: Serialize + DeserializeOwned + Validate,
{
    let original = serde_json::to_value(current)
        .map_err(|e| AppError::Internal(format!("Failed to project patch target: {}", e)))?;

    let mut patched = original.clone();
    json_patch::patch(&mut patched, &patch.0).map_err(|e| AppError::field("patch", e.to_string()))?;

    match (&original, &patched) {
        (Value::Object(before), Value::Object(after)) => {
            if let Some(unknown) = after.keys().find(|k| !before.contains_key(*k)) {
                return Err(AppError::field(
                    unknown.clone(),
                    format!(
                        "The target location specified by path segment '{}' was not found.",
                        unknown
                    ),
                ));
            }
        }
        _ => {
            return Err(AppError::field(
                "patch",
                "The patch document must not replace the whole resource.",
            ));
        }
    }

    let candidate: T =
        serde_json::from_value(patched).map_err(|e| AppError::field("patch", e.to_string()))?;
    candidate.validate()?;

    Ok(candidate)
}
