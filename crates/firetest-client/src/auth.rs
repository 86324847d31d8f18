//! Identity credentials for emulator requests.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use firetest_core::constants::OWNER_BEARER_TOKEN;

/// How long minted tokens stay valid; a suite run is far shorter.
const TOKEN_LIFETIME_SECS: i64 = 3600;

/// Identity a client presents to the emulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Privileged bypass identity; the emulator skips rules evaluation.
    Owner,

    /// Authenticated end user with the given uid.
    User { uid: String },

    /// No Authorization header at all.
    Anonymous,
}

impl Credential {
    /// Builds an authenticated-user credential.
    #[must_use]
    pub fn user(uid: impl Into<String>) -> Self {
        Self::User { uid: uid.into() }
    }

    /// ## Summary
    /// Returns the Authorization header value for this credential, if any.
    ///
    /// User tokens are unsigned JWTs; the emulator accepts `alg: "none"`
    /// with an empty signature and trusts the claims as-is.
    #[must_use]
    pub fn authorization(&self, project_id: &str) -> Option<String> {
        match self {
            Self::Owner => Some(format!("Bearer {OWNER_BEARER_TOKEN}")),
            Self::User { uid } => {
                Some(format!("Bearer {}", mint_unsigned_token(project_id, uid)))
            }
            Self::Anonymous => None,
        }
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => f.write_str("owner"),
            Self::User { uid } => write!(f, "user:{uid}"),
            Self::Anonymous => f.write_str("anonymous"),
        }
    }
}

/// ## Summary
/// Mints an unsigned emulator token asserting the identity `uid`.
///
/// The claim set matches what the emulator's auth layer issues for custom
/// sign-in, so rules see `request.auth.uid == uid`.
#[must_use]
pub fn mint_unsigned_token(project_id: &str, uid: &str) -> String {
    let issued_at = Utc::now().timestamp();

    let header = serde_json::json!({
        "alg": "none",
        "kid": "fakekid",
        "typ": "JWT",
    });
    let claims = serde_json::json!({
        "iss": format!("https://securetoken.google.com/{project_id}"),
        "aud": project_id,
        "iat": issued_at,
        "exp": issued_at + TOKEN_LIFETIME_SECS,
        "auth_time": issued_at,
        "sub": uid,
        "user_id": uid,
        "firebase": {
            "sign_in_provider": "custom",
            "identities": {},
        },
    });

    // Header and claims, then a trailing dot and no signature.
    format!(
        "{}.{}.",
        URL_SAFE_NO_PAD.encode(header.to_string()),
        URL_SAFE_NO_PAD.encode(claims.to_string()),
    )
}
