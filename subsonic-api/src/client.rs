//! HTTP transport and per-connection session state.
//!
//! Every call is a GET to `<server>/rest/<method>.view` with the request
//! parameters in the query string:
//!
//! 1. Identity: `v` (protocol version), `c` (client name), `f=json`
//! 2. Credentials: `u` plus `t`+`s` (salted token) or `p` (password)
//! 3. The marshalled request descriptor
//!
//! JSON replies are decoded into a [`SubsonicResponse`]; binary endpoints
//! (`stream`, `download`, `getCoverArt`, ...) return the body as is unless
//! the server answered with a JSON error document instead.
//!
//! # Version ratchet
//!
//! The client starts out advertising protocol `1.8.0`. After each decoded
//! envelope, failed ones included, the [`Session`] adopts the version the
//! server reported, so later requests speak the server's own version back.

use crate::auth::write_credentials;
use crate::config::ServerConfig;
use crate::error::{Result, SubsonicError};
use crate::response::{ResponseBody, SubsonicResponse, decode_envelope};
use crate::values::{QueryParams, QueryValues, marshal_values};

use reqwest::Url;
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use std::cmp::Ordering;
use std::time::Duration;

/// Protocol version advertised before the server has told us its own.
pub const INITIAL_VERSION: &str = "1.8.0";
/// Default value of the `c` parameter.
pub const DEFAULT_CLIENT_NAME: &str = "subsonic-rs";

/// Query keys owned by the transport; callers cannot set them.
const RESERVED_KEYS: [&str; 7] = ["v", "c", "f", "u", "t", "s", "p"];

/// What the client has learned about the server so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Protocol version sent as `v`.
    pub version: String,
    pub server_type: Option<String>,
    pub server_version: Option<String>,
    pub open_subsonic: bool,
    /// False after a transport failure or error status, true after any
    /// successful HTTP exchange.
    pub server_available: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            version: INITIAL_VERSION.to_owned(),
            server_type: None,
            server_version: None,
            open_subsonic: false,
            server_available: false,
        }
    }
}

impl Session {
    /// Adopt the version and server metadata of a decoded envelope.
    pub fn observe(&mut self, env: &SubsonicResponse) {
        if !env.version.is_empty() {
            self.version.clone_from(&env.version);
        }
        if env.server_type.is_some() {
            self.server_type.clone_from(&env.server_type);
        }
        if env.server_version.is_some() {
            self.server_version.clone_from(&env.server_version);
        }
        self.open_subsonic = env.open_subsonic;
    }

    /// Whether the negotiated version is `required` or newer.
    pub fn version_at_least(&self, required: &str) -> bool {
        compare_versions(&self.version, required) != Ordering::Less
    }

    pub fn can_get_genres(&self) -> bool {
        self.version_at_least("1.9.0")
    }

    pub fn can_use_play_queue(&self) -> bool {
        self.version_at_least("1.12.0")
    }

    pub fn can_filter_album_list_by_year_and_genre(&self) -> bool {
        self.version_at_least("1.10.1")
    }
}

/// Compare dotted numeric versions; missing parts count as zero.
fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> {
        v.split('.')
            .map(|p| p.trim().parse().unwrap_or(0))
            .collect()
    };
    let (a, b) = (parse(a), parse(b));
    for i in 0..a.len().max(b.len()) {
        let ord = a.get(i).unwrap_or(&0).cmp(b.get(i).unwrap_or(&0));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Blocking client for one Subsonic server.
///
/// Holds a [`reqwest::blocking::Client`], the [`ServerConfig`] and the
/// [`Session`]. Endpoint methods are implemented in separate modules
/// (`system`, `browsing`, `lists`, ...) as `impl SubsonicClient` blocks.
///
/// Calls take `&mut self` because they update the session; share one
/// client between threads behind a `Mutex`.
pub struct SubsonicClient {
    http: Client,
    config: ServerConfig,
    base: Url,
    client_name: String,
    session: Session,
}

impl SubsonicClient {
    /// Create a client for `config`. No request is made.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let base = Url::parse(&config.url).map_err(|e| SubsonicError::InvalidUrl {
            url: config.url.clone(),
            reason: e.to_string(),
        })?;
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .danger_accept_invalid_certs(!config.verify_cert)
            .build()?;
        Ok(Self {
            http,
            config,
            base,
            client_name: DEFAULT_CLIENT_NAME.to_owned(),
            session: Session::default(),
        })
    }

    /// Create a client from the saved `server.json`.
    pub fn from_saved() -> Result<Self> {
        Self::new(ServerConfig::load_required()?)
    }

    /// Override the `c` parameter.
    #[must_use]
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn version_at_least(&self, required: &str) -> bool {
        self.session.version_at_least(required)
    }

    /// Identity and credential parameters, with a fresh salt.
    fn base_query(&self) -> QueryValues {
        let mut q = QueryValues::new();
        q.set("v", self.session.version.as_str());
        q.set("c", self.client_name.as_str());
        q.set("f", "json");
        write_credentials(
            &mut q,
            &self.config.username,
            &self.config.password,
            self.config.auth_mode(),
        );
        q
    }

    /// Fully authenticated URL of `method` with `params`.
    ///
    /// Identity and credential keys in `params` are dropped.
    pub fn request_url(&self, method: &str, params: QueryValues) -> String {
        let mut q = self.base_query();
        for (key, values) in params.iter() {
            if RESERVED_KEYS.contains(&key) {
                warn!(method, key, "ignoring reserved query parameter");
                continue;
            }
            q.insert_all(key, values.to_vec());
        }
        let base = self.base.as_str().trim_end_matches('/');
        format!("{base}/rest/{method}.view?{}", q.encode())
    }

    fn send(&mut self, method: &str, params: QueryValues) -> Result<Response> {
        let url = self.request_url(method, params);
        debug!(method, version = %self.session.version, "subsonic request");

        let resp = match self.http.get(&url).send() {
            Ok(resp) => resp,
            Err(e) => {
                warn!(method, error = %e, "subsonic request failed");
                self.session.server_available = false;
                return Err(e.into());
            }
        };

        let status = resp.status();
        if !status.is_success() {
            warn!(method, status = status.as_u16(), "subsonic server returned error status");
            self.session.server_available = false;
            return Err(SubsonicError::HttpStatus {
                method: method.to_owned(),
                status: status.as_u16(),
            });
        }
        self.session.server_available = true;
        Ok(resp)
    }

    /// Decode a JSON reply body and apply it to the session.
    pub(crate) fn handle_body(&mut self, bytes: &[u8]) -> Result<ResponseBody> {
        let env = decode_envelope(bytes)?;
        self.session.observe(&env);
        Ok(env.into_result()?)
    }

    /// Call a JSON endpoint with pre-built parameters.
    pub(crate) fn call(&mut self, method: &str, params: QueryValues) -> Result<ResponseBody> {
        let resp = self.send(method, params)?;
        let bytes = resp.bytes()?;
        self.handle_body(&bytes)
    }

    /// Call a JSON endpoint with a request descriptor.
    pub(crate) fn call_with<P: QueryParams + ?Sized>(
        &mut self,
        method: &str,
        req: &P,
    ) -> Result<ResponseBody> {
        let params = marshal_values(req)?;
        self.call(method, params)
    }

    /// Call a binary endpoint; a JSON reply is decoded so a server error
    /// surfaces as [`SubsonicError::Api`].
    pub(crate) fn get_raw(&mut self, method: &str, params: QueryValues) -> Result<Response> {
        let resp = self.send(method, params)?;
        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("json"));
        if !is_json {
            return Ok(resp);
        }
        let bytes = resp.bytes()?;
        let body = self.handle_body(&bytes)?;
        Err(SubsonicError::UnexpectedResponse {
            expected: "binary data",
            found: body.key(),
        })
    }

    /// Like [`get_raw`](Self::get_raw), reading the whole body.
    pub(crate) fn get_bytes(&mut self, method: &str, params: QueryValues) -> Result<Vec<u8>> {
        let resp = self.get_raw(method, params)?;
        Ok(resp.bytes()?.to_vec())
    }
}

/// Extract one [`ResponseBody`] variant or fail with
/// [`SubsonicError::UnexpectedResponse`].
///
/// With `or_default`, an empty body yields the payload's default value;
/// servers leave out empty lists entirely.
macro_rules! expect_body {
    ($body:expr, $key:literal => $variant:ident) => {
        match $body {
            $crate::response::ResponseBody::$variant(v) => Ok(v),
            other => Err($crate::error::SubsonicError::UnexpectedResponse {
                expected: $key,
                found: other.key(),
            }),
        }
    };
    ($body:expr, $key:literal => $variant:ident, or_default) => {
        match $body {
            $crate::response::ResponseBody::$variant(v) => Ok(v),
            $crate::response::ResponseBody::Empty => Ok(Default::default()),
            other => Err($crate::error::SubsonicError::UnexpectedResponse {
                expected: $key,
                found: other.key(),
            }),
        }
    };
}

pub(crate) use expect_body;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn client(use_salt_auth: bool) -> SubsonicClient {
        let mut config = ServerConfig::new("music.example.com/", "alice", "sesame");
        config.use_salt_auth = use_salt_auth;
        SubsonicClient::new(config).unwrap()
    }

    fn query_of(url: &str) -> Vec<(String, String)> {
        let url = Url::parse(url).unwrap();
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn request_url_carries_identity_and_token() {
        let c = client(true);
        let mut params = QueryValues::new();
        params.set("id", "al-1");
        let url = c.request_url("getAlbum", params);
        assert!(url.starts_with("https://music.example.com/rest/getAlbum.view?"));

        let pairs = query_of(&url);
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["v", "c", "f", "u", "t", "s", "id"]);
        let get = |k: &str| pairs.iter().find(|(key, _)| key == k).unwrap().1.clone();
        assert_eq!(get("v"), INITIAL_VERSION);
        assert_eq!(get("c"), DEFAULT_CLIENT_NAME);
        assert_eq!(get("f"), "json");
        assert_eq!(get("t"), crate::auth::token("sesame", &get("s")));
    }

    #[test]
    fn caller_cannot_override_identity() {
        let c = client(true);
        let mut params = QueryValues::new();
        params.set("f", "xml");
        params.set("u", "mallory");
        params.set("p", "guess");
        params.set("id", "t1");
        let pairs = query_of(&c.request_url("ping", params));

        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["v", "c", "f", "u", "t", "s", "id"]);
        assert!(pairs.contains(&("f".to_owned(), "json".to_owned())));
        assert!(pairs.contains(&("u".to_owned(), "alice".to_owned())));
        assert!(!pairs.iter().any(|(_, v)| v == "mallory" || v == "xml"));
    }

    #[test]
    fn plain_auth_sends_password() {
        let c = client(false).with_client_name("my player");
        let pairs = query_of(&c.request_url("ping", QueryValues::new()));
        assert!(pairs.contains(&("p".to_owned(), "sesame".to_owned())));
        assert!(pairs.contains(&("c".to_owned(), "my player".to_owned())));
        assert!(!pairs.iter().any(|(k, _)| k == "t"));
    }

    #[test]
    fn invalid_url_is_rejected() {
        let config = ServerConfig {
            url: "https://bad host".into(),
            username: "u".into(),
            password: "p".into(),
            use_salt_auth: true,
            verify_cert: true,
        };
        assert!(matches!(
            SubsonicClient::new(config),
            Err(SubsonicError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn version_ratchets_on_ok_and_failed_envelopes() {
        let mut c = client(true);
        let body = c
            .handle_body(
                br#"{"subsonic-response":{"status":"ok","version":"1.16.1",
                    "type":"navidrome","serverVersion":"0.53.3","openSubsonic":true}}"#,
            )
            .unwrap();
        assert_eq!(body, ResponseBody::Empty);
        assert_eq!(c.session().version, "1.16.1");
        assert_eq!(c.session().server_type.as_deref(), Some("navidrome"));
        assert!(c.session().open_subsonic);

        let err = c
            .handle_body(
                br#"{"subsonic-response":{"status":"failed","version":"1.15.0",
                    "error":{"code":40,"message":"Wrong username or password"}}}"#,
            )
            .unwrap_err();
        assert_eq!(err.api_error().unwrap().code, ErrorCode::WrongUsernameOrPassword);
        assert_eq!(c.session().version, "1.15.0");
        assert!(c.request_url("ping", QueryValues::new()).contains("v=1.15.0"));
    }

    #[test]
    fn missing_envelope_leaves_session_untouched() {
        let mut c = client(true);
        let err = c.handle_body(br#"{"foo":1}"#).unwrap_err();
        assert!(matches!(err, SubsonicError::NoSubsonicResponse));
        assert_eq!(c.session().version, INITIAL_VERSION);
    }

    #[test]
    fn transport_failure_marks_server_unavailable() {
        let config = ServerConfig::new("http://127.0.0.1:9", "u", "p");
        let mut c = SubsonicClient::new(config).unwrap();
        c.session.server_available = true;
        let err = c.call("ping", QueryValues::new()).unwrap_err();
        assert!(matches!(err, SubsonicError::Http(_)));
        assert!(!c.session().server_available);
    }

    #[test]
    fn version_comparison() {
        let mut s = Session::default();
        assert!(s.version_at_least("1.8.0"));
        assert!(!s.can_get_genres());
        s.version = "1.10.2".into();
        assert!(s.can_get_genres());
        assert!(s.can_filter_album_list_by_year_and_genre());
        assert!(!s.can_use_play_queue());
        s.version = "1.16".into();
        assert!(s.version_at_least("1.16.0"));
        assert!(!s.version_at_least("1.16.1"));
        assert_eq!(compare_versions("1.9.0", "1.10.0"), Ordering::Less);
    }

    #[test]
    fn expect_body_reports_mismatch() {
        let body = ResponseBody::Empty;
        let r: Result<crate::objects::Genres> = expect_body!(body, "genres" => Genres, or_default);
        assert!(r.unwrap().genre.is_empty());

        let body = ResponseBody::ScanStatus(crate::objects::ScanStatus::default());
        let r: Result<crate::objects::Genres> = expect_body!(body, "genres" => Genres);
        match r.unwrap_err() {
            SubsonicError::UnexpectedResponse { expected, found } => {
                assert_eq!(expected, "genres");
                assert_eq!(found, Some("scanStatus"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
