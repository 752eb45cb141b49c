//! A veterinary clinic and the rules that turn client input into one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Row, sqlite::SqliteRow};
use thiserror::Error;

use super::{
    account::{Account, AccountId},
    decode_micros, decode_unsigned,
};

/// Identifier of a clinic. `0` means the store has not assigned one yet.
pub type VeterinaryId = u64;

pub const UNASSIGNED_ID: VeterinaryId = 0;

/// A veterinary clinic owned by a single account.
///
/// The same type is used for raw client payloads (missing fields default),
/// for rows read back from SQLite and for responses.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Veterinary {
    /// Store-assigned; anything a client sends is discarded by `normalize`.
    pub id: VeterinaryId,

    /// Unique clinic name.
    pub name: String,

    pub address: String,

    pub phone: Option<String>,

    /// Account that owns this clinic. Fixed at creation.
    #[serde(alias = "user_id")]
    pub owner_id: AccountId,

    /// Snapshot of the owning account, attached on every read and write.
    #[serde(alias = "user")]
    pub owner: Option<Account>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// A clinic payload failed structural validation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub &'static str);

impl Veterinary {
    /// Canonicalize a raw payload, stamping both timestamps with the current time.
    pub fn normalize(self) -> Self {
        self.normalize_at(Utc::now())
    }

    /// Canonicalize a raw payload using `now` for both timestamps.
    ///
    /// Trims and markup-escapes `name` and `address`, resets `id` to
    /// [`UNASSIGNED_ID`] and drops any client-supplied owner snapshot.
    pub fn normalize_at(self, now: DateTime<Utc>) -> Self {
        Self {
            id: UNASSIGNED_ID,
            name: escape_markup(self.name.trim()),
            address: escape_markup(self.address.trim()),
            owner: None,
            created_at: now,
            updated_at: now,
            ..self
        }
    }

    /// Check required fields. `phone` is optional and never inspected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError("name required"));
        }
        if self.address.is_empty() {
            return Err(ValidationError("address required"));
        }
        if self.owner_id < 1 {
            return Err(ValidationError("owner required"));
        }
        Ok(())
    }
}

impl<'r> FromRow<'r, SqliteRow> for Veterinary {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: decode_unsigned(row, "id")?,
            name: row.try_get("name")?,
            address: row.try_get("address")?,
            phone: row.try_get("phone")?,
            owner_id: decode_unsigned(row, "owner_id")?,
            owner: None,
            created_at: decode_micros(row, "created_at")?,
            updated_at: decode_micros(row, "updated_at")?,
        })
    }
}

/// Escape characters that are significant in HTML.
///
/// An `&` that already opens a character reference (`&amp;`, `&#39;`,
/// `&#x27;`) is kept, so escaping an escaped string is a no-op.
pub fn escape_markup(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for (idx, ch) in value.char_indices() {
        match ch {
            '&' if opens_char_reference(&value[idx + 1..]) => escaped.push('&'),
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// `rest` is the text right after an `&`.
fn opens_char_reference(rest: &str) -> bool {
    let Some(end) = rest.find(';') else {
        return false;
    };
    let body = &rest[..end];
    match body.strip_prefix('#') {
        Some(numeric) => match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !numeric.is_empty() && numeric.chars().all(|c| c.is_ascii_digit()),
        },
        None => !body.is_empty() && body.chars().all(|c| c.is_ascii_alphanumeric()),
    }
}
