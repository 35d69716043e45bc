//! Error types for the Subsonic API client.
//!
//! Two families of errors exist:
//!
//! - [`ApiError`] is what the server reports inside a `failed` envelope
//!   (`{"code": 40, "message": "Wrong username or password"}`).
//! - [`SubsonicError`] is everything a client call can return, including
//!   transport failures and purely local conditions that never appear on
//!   the wire.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::fmt;

/// Numeric error code carried by a server-reported [`ApiError`].
///
/// | Code | Meaning                                                   |
/// |------|-----------------------------------------------------------|
/// | 0    | Generic error                                             |
/// | 10   | Required parameter is missing                             |
/// | 20   | Client must upgrade                                       |
/// | 30   | Server must upgrade                                       |
/// | 40   | Wrong username or password                                |
/// | 41   | Token authentication not supported for LDAP users         |
/// | 42   | Authentication mechanism not supported (OpenSubsonic)     |
/// | 43   | Conflicting authentication mechanisms (OpenSubsonic)      |
/// | 44   | Invalid API key (OpenSubsonic)                            |
/// | 50   | User is not authorized for the given operation            |
/// | 60   | Trial period is over                                      |
/// | 70   | Requested data was not found                              |
///
/// Codes outside the catalog are kept as [`ErrorCode::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ErrorCode {
    Generic,
    MissingParameter,
    ClientMustUpgrade,
    ServerMustUpgrade,
    WrongUsernameOrPassword,
    TokenAuthNotSupported,
    AuthMechanismNotSupported,
    ConflictingAuthMechanisms,
    InvalidApiKey,
    NotAuthorized,
    TrialExpired,
    NotFound,
    Other(i32),
}

impl ErrorCode {
    /// The numeric wire value.
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Generic => 0,
            Self::MissingParameter => 10,
            Self::ClientMustUpgrade => 20,
            Self::ServerMustUpgrade => 30,
            Self::WrongUsernameOrPassword => 40,
            Self::TokenAuthNotSupported => 41,
            Self::AuthMechanismNotSupported => 42,
            Self::ConflictingAuthMechanisms => 43,
            Self::InvalidApiKey => 44,
            Self::NotAuthorized => 50,
            Self::TrialExpired => 60,
            Self::NotFound => 70,
            Self::Other(code) => code,
        }
    }

    /// Canonical message for catalogued codes.
    pub fn default_message(self) -> &'static str {
        match self {
            Self::Generic => "generic error",
            Self::MissingParameter => "required parameter is missing",
            Self::ClientMustUpgrade => {
                "client is too old, server requires newer protocol version"
            }
            Self::ServerMustUpgrade => {
                "server is too old, client requires newer protocol version"
            }
            Self::WrongUsernameOrPassword => "wrong username or password",
            Self::TokenAuthNotSupported => {
                "token-based authentication not supported for LDAP users"
            }
            Self::AuthMechanismNotSupported => "provided authentication mechanism not supported",
            Self::ConflictingAuthMechanisms => {
                "multiple conflicting authentication mechanisms provided"
            }
            Self::InvalidApiKey => "invalid API key",
            Self::NotAuthorized => "user is not authorized for the given operation",
            Self::TrialExpired => "trial period expired",
            Self::NotFound => "requested data was not found",
            Self::Other(_) => "unknown error",
        }
    }
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::Generic,
            10 => Self::MissingParameter,
            20 => Self::ClientMustUpgrade,
            30 => Self::ServerMustUpgrade,
            40 => Self::WrongUsernameOrPassword,
            41 => Self::TokenAuthNotSupported,
            42 => Self::AuthMechanismNotSupported,
            43 => Self::ConflictingAuthMechanisms,
            44 => Self::InvalidApiKey,
            50 => Self::NotAuthorized,
            60 => Self::TrialExpired,
            70 => Self::NotFound,
            other => Self::Other(other),
        }
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.as_i32()
    }
}

/// An error reported by the Subsonic server.
///
/// Wire shape: `{ "code": <int>, "message": <string, optional> }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub code: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// OpenSubsonic addition: link to further explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,
}

impl ApiError {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: None,
            help_url: None,
        }
    }

    /// Two errors are the same kind iff their codes match; message text is
    /// ignored.
    pub fn same_kind(&self, other: &ApiError) -> bool {
        self.code == other.code
    }

    /// Server message, or the canonical one for the code.
    pub fn message(&self) -> &str {
        match self.message.as_deref() {
            Some(m) if !m.is_empty() => m,
            _ => self.code.default_message(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error {}: {}", self.code.as_i32(), self.message())
    }
}

impl std::error::Error for ApiError {}

/// Errors that can occur when talking to a Subsonic server.
#[derive(Debug, Error)]
pub enum SubsonicError {
    /// HTTP transport error (connection refused, timeout, TLS failure, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success HTTP status.
    #[error("{method} returned HTTP status {status}")]
    HttpStatus { method: String, status: u16 },

    /// The server reported a failure inside the response envelope.
    #[error("server {0}")]
    Api(#[from] ApiError),

    /// The JSON document carried no `subsonic-response` object.
    #[error("server returned invalid JSON: no subsonic-response present")]
    NoSubsonicResponse,

    /// An OpenSubsonic-only endpoint was called on a server that has not
    /// advertised OpenSubsonic support.
    #[error("server does not support OpenSubsonic")]
    OpenSubsonicUnsupported,

    /// A request parameter was declared with an empty wire name.
    #[error("invalid parameter name {0:?}")]
    InvalidParamName(String),

    /// A request parameter could not be rendered as query text.
    #[error("cannot encode parameter {name:?}: {source}")]
    InvalidQueryValue {
        name: String,
        source: QueryTextError,
    },

    /// The envelope decoded fine but carried a different result than the
    /// endpoint produces.
    #[error("expected {expected} in response, found {}", .found.unwrap_or("nothing"))]
    UnexpectedResponse {
        expected: &'static str,
        found: Option<&'static str>,
    },

    /// The configured server URL could not be parsed.
    #[error("invalid server URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// No server configuration is stored. Run `login` first.
    #[error("no server configured")]
    NoServerConfigured,

    /// File I/O error (config read/write, download write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors (e.g. missing config directory).
    #[error("{0}")]
    Other(String),
}

impl SubsonicError {
    /// Numeric code of an API error or of one of the two local
    /// pseudo-errors (`-1` no envelope, `-2` no OpenSubsonic).
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Api(e) => Some(e.code.as_i32()),
            Self::NoSubsonicResponse => Some(-1),
            Self::OpenSubsonicUnsupported => Some(-2),
            _ => None,
        }
    }

    /// The server-reported error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// Why a parameter value has no query-string form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryTextError {
    #[error("non-finite number {0}")]
    NonFinite(f64),

    #[error("{value} is outside {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },
}

/// Convenience alias for `Result<T, SubsonicError>`.
pub type Result<T> = std::result::Result<T, SubsonicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_kind_ignores_message() {
        let a = ApiError {
            code: ErrorCode::NotFound,
            message: Some("Album not found".into()),
            help_url: None,
        };
        let b = ApiError::new(ErrorCode::NotFound);
        assert!(a.same_kind(&b));
        assert!(!a.same_kind(&ApiError::new(ErrorCode::Generic)));
    }

    #[test]
    fn decode_known_and_unknown_codes() {
        let e: ApiError = serde_json::from_str(r#"{"code":40,"message":"nope"}"#).unwrap();
        assert_eq!(e.code, ErrorCode::WrongUsernameOrPassword);
        assert_eq!(e.message(), "nope");

        let e: ApiError = serde_json::from_str(r#"{"code":99}"#).unwrap();
        assert_eq!(e.code, ErrorCode::Other(99));
        assert_eq!(e.code.as_i32(), 99);
        assert_eq!(e.message(), "unknown error");
    }

    #[test]
    fn display_falls_back_to_catalog_message() {
        let e = ApiError::new(ErrorCode::MissingParameter);
        assert_eq!(e.to_string(), "error 10: required parameter is missing");
    }

    #[test]
    fn local_codes_do_not_collide() {
        assert_eq!(SubsonicError::NoSubsonicResponse.code(), Some(-1));
        assert_eq!(SubsonicError::OpenSubsonicUnsupported.code(), Some(-2));
        // A server sending -1 stays a server error.
        let server = SubsonicError::Api(ApiError::new(ErrorCode::from(-1)));
        assert_eq!(server.code(), Some(-1));
        assert!(server.api_error().is_some());
        assert!(SubsonicError::NoSubsonicResponse.api_error().is_none());
    }

    #[test]
    fn query_value_error_keeps_its_cause() {
        use std::error::Error as _;

        let err = SubsonicError::InvalidQueryValue {
            name: "gain".into(),
            source: QueryTextError::NonFinite(f64::INFINITY),
        };
        assert_eq!(err.to_string(), "cannot encode parameter \"gain\": non-finite number inf");
        let cause = err.source().unwrap();
        assert_eq!(cause.to_string(), "non-finite number inf");
    }
}
