//! Signed-in user identity.

use serde::{Deserialize, Serialize};

use crate::types::id::UserId;

/// The identity supplied by the hosted auth provider.
///
/// This layer only reads identity; session lifecycle (sign-in, token
/// refresh, sign-out) belongs entirely to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Provider-assigned user identifier.
    pub uid: UserId,
    /// Display name, when the provider has one.
    pub display_name: Option<String>,
    /// Email address, when the provider shares it.
    pub email: Option<String>,
    /// Avatar URL.
    pub photo_url: Option<String>,
}
