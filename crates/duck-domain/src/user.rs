//! User records as far as compliance checking needs them

use crate::Dictionary;
use serde::{Deserialize, Serialize};

/// A user of the system
///
/// Credentials are managed elsewhere and are not part of this model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    /// User identifier
    pub id: String,

    /// Contact address
    pub email: String,

    /// Given name
    pub firstname: String,

    /// Family name
    pub lastname: String,

    /// Preferred locale
    pub locale: String,

    /// Default assumption set for new documents
    pub assumption_set: String,

    /// Store revision token
    pub revision: String,

    /// The user's global vocabulary
    pub global_dictionary: Dictionary,
}
