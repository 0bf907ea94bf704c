use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Car — the core data model, stored as JSON under `car:{id}`
// ---------------------------------------------------------------------------

/// A single car listing.
///
/// `id` and `created_at` are assigned by the service at creation and never
/// change afterwards. Everything else is caller-supplied and overwritten
/// wholesale on update (full replace, not a patch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: String,

    pub make: String,
    pub model: String,
    /// Calendar year, strictly positive.
    pub year: i64,
    /// Asking price, non-negative. Currency unit is up to the caller.
    pub price: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    pub is_available: bool,
    pub owner_email: String,

    // --- timestamps (RFC 3339) ---
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(
        rename = "updatedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<String>,
}

// ---------------------------------------------------------------------------
// CarPayload — caller-facing create/update body
// ---------------------------------------------------------------------------

/// Body for `POST /cars` and `PUT /cars/{id}`.
///
/// The same shape and validation rules apply to both: create and update are
/// full-replace operations over the mutable fields.
#[derive(Debug, Clone, Deserialize)]
pub struct CarPayload {
    pub make: String,
    pub model: String,
    pub year: i64,
    pub price: i64,

    /// Defaults to `""` when absent.
    #[serde(default)]
    pub description: Option<String>,

    /// Defaults to `""` when absent.
    #[serde(default)]
    pub image_url: Option<String>,

    pub is_available: bool,
    pub owner_email: String,
}
