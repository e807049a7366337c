//! Fixed choice lists and field normalization shared by the venue and
//! artist forms.

use crate::error::FyyurError;

/// Genre names a venue or artist may list.
pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// US state codes (plus DC) accepted in the `state` field.
pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Trims `value` and rejects it when empty.
///
/// # Errors
///
/// Returns [`FyyurError::ValidationFailure`] naming `field` when the value
/// is blank.
pub fn required(field: &str, value: &str) -> Result<String, FyyurError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FyyurError::invalid(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional value; blank becomes `None`.
#[must_use]
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Like [`optional`], but a present value must be an `http(s)` URL.
///
/// # Errors
///
/// Returns [`FyyurError::ValidationFailure`] for a non-URL value.
pub fn optional_link(field: &str, value: Option<String>) -> Result<Option<String>, FyyurError> {
    match optional(value) {
        Some(link) if link.starts_with("http://") || link.starts_with("https://") => {
            Ok(Some(link))
        }
        Some(link) => Err(FyyurError::invalid(format!(
            "{field} `{link}` is not an http(s) URL"
        ))),
        None => Ok(None),
    }
}

/// Validates a state code against [`STATES`].
///
/// # Errors
///
/// Returns [`FyyurError::ValidationFailure`] for an unknown code.
pub fn state(value: &str) -> Result<String, FyyurError> {
    let code = required("state", value)?;
    if STATES.contains(&code.as_str()) {
        Ok(code)
    } else {
        Err(FyyurError::invalid(format!(
            "state `{code}` is not a recognized state code"
        )))
    }
}

/// Validates genres against [`GENRES`], dropping repeats and keeping the
/// submitted order.
///
/// # Errors
///
/// Returns [`FyyurError::ValidationFailure`] when the list is empty or
/// names an unknown genre.
pub fn genres(values: Vec<String>) -> Result<Vec<String>, FyyurError> {
    let mut accepted: Vec<String> = Vec::with_capacity(values.len());
    for raw in values {
        let genre = raw.trim();
        if !GENRES.contains(&genre) {
            return Err(FyyurError::invalid(format!("unknown genre `{genre}`")));
        }
        if !accepted.iter().any(|g| g == genre) {
            accepted.push(genre.to_string());
        }
    }
    if accepted.is_empty() {
        return Err(FyyurError::invalid("at least one genre is required"));
    }
    Ok(accepted)
}
