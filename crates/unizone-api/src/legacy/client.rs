// Legacy API HTTP client
//
// Wraps `reqwest::Client` with UniFi-specific URL construction, envelope
// unwrapping, and platform-aware path prefixing. Endpoint methods live in
// sibling modules as inherent impls.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::ControllerPlatform;
use crate::error::{Error, body_preview};
use crate::legacy::models::LegacyResponse;

/// UniFi OS wraps some errors as `{"error":{"code":N,"message":"..."}}` with HTTP 200.
#[derive(serde::Deserialize)]
struct UnifiOsError {
    error: Option<UnifiOsErrorInner>,
}

#[derive(serde::Deserialize)]
struct UnifiOsErrorInner {
    code: u16,
    message: Option<String>,
}

/// Raw HTTP client for the UniFi controller's legacy API.
///
/// Handles the `{ data: [], meta: { rc, msg } }` envelope, site-scoped
/// URL construction, and platform-aware path prefixing. All methods return
/// unwrapped `data` payloads.
pub struct LegacyClient {
    http: reqwest::Client,
    base_url: Url,
    site: String,
    platform: ControllerPlatform,
}

impl LegacyClient {
    /// Create a legacy client around a pre-built `reqwest::Client`.
    ///
    /// The client must carry a cookie jar (see
    /// [`TransportConfig::with_cookie_jar`](crate::TransportConfig::with_cookie_jar))
    /// so the session cookie set by [`login`](Self::login) is replayed.
    /// `base_url` is the controller root (e.g. `https://192.168.1.1` for
    /// UniFi OS or `https://controller:8443` for standalone).
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        site: String,
        platform: ControllerPlatform,
    ) -> Self {
        Self {
            http,
            base_url,
            site,
            platform,
        }
    }

    /// The current site identifier.
    pub fn site(&self) -> &str {
        &self.site
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The controller platform this client talks to.
    pub fn platform(&self) -> ControllerPlatform {
        self.platform
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a site-scoped URL: `{base}{prefix}/api/s/{site}/{path}`
    pub(crate) fn site_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let prefix = self.platform.legacy_prefix().trim_end_matches('/');
        let full = format!("{base}{prefix}/api/s/{}/{path}", self.site);
        Ok(Url::parse(&full)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and unwrap the legacy envelope.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        Self::parse_envelope(resp).await
    }

    /// Parse the `{ meta, data }` envelope, returning `data` on success
    /// or an `Error::LegacyApi` if `meta.rc != "ok"`.
    ///
    /// Also handles UniFi OS error responses that use a different shape:
    /// `{"error": {"code": 403, "message": "..."}}` (returned with HTTP 200).
    async fn parse_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<Vec<T>, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "session expired or invalid credentials".into(),
            });
        }

        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::LegacyApi {
                message: "insufficient permissions (HTTP 403)".into(),
            });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::LegacyApi {
                message: format!("HTTP {status}: {}", body_preview(&body)),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        if let Ok(UnifiOsError { error: Some(err) }) = serde_json::from_str::<UnifiOsError>(&body)
        {
            let msg = err.message.unwrap_or_default();
            return Err(if err.code == 401 {
                Error::Authentication { message: msg }
            } else {
                Error::LegacyApi {
                    message: format!("UniFi OS error {}: {msg}", err.code),
                }
            });
        }

        let envelope: LegacyResponse<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: format!("{e} (body preview: {:?})", body_preview(&body)),
                body: body.clone(),
            })?;

        match envelope.meta.rc.as_str() {
            "ok" => Ok(envelope.data),
            _ => Err(Error::LegacyApi {
                message: envelope
                    .meta
                    .msg
                    .unwrap_or_else(|| format!("rc={}", envelope.meta.rc)),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str, platform: ControllerPlatform) -> LegacyClient {
        LegacyClient::with_client(
            reqwest::Client::new(),
            Url::parse(base).expect("valid test URL"),
            "default".into(),
            platform,
        )
    }

    #[test]
    fn site_url_unifi_os_prefix() {
        let c = client("https://192.168.1.1/", ControllerPlatform::UnifiOs);
        let url = c.site_url("rest/user").expect("url");
        assert_eq!(
            url.as_str(),
            "https://192.168.1.1/proxy/network/api/s/default/rest/user"
        );
    }

    #[test]
    fn site_url_classic_has_no_prefix() {
        let c = client("https://controller:8443", ControllerPlatform::ClassicController);
        let url = c.site_url("rest/user").expect("url");
        assert_eq!(url.as_str(), "https://controller:8443/api/s/default/rest/user");
    }
}
