//! Configuration for the `unizone` binary.
//!
//! One TOML file, `UNIZONE_*` environment variables, and command-line
//! overrides, layered with figment, then translated into
//! `unizone_core::SyncConfig`. Core never reads config files.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use unizone_core::{ControllerConfig, ControllerPlatform, SyncConfig, TlsVerification};

/// Environment variable consulted for the password when `password_env`
/// doesn't name one.
pub const PASSWORD_ENV: &str = "UNIZONE_PASSWORD";

/// Keyring service name; the entry's user is the controller username.
pub const KEYRING_SERVICE: &str = "unizone";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("missing required setting '{field}'")]
    Missing { field: String },

    #[error("no password found for controller user '{username}'")]
    NoCredentials { username: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// The merged configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Controller base URL (e.g., "https://192.168.1.1").
    #[serde(default, deserialize_with = "text::optional")]
    pub controller: Option<String>,

    /// Site whose clients feed the directory.
    #[serde(default = "default_site", deserialize_with = "text::required")]
    pub site: String,

    /// Controller username.
    #[serde(default, deserialize_with = "text::optional")]
    pub username: Option<String>,

    /// Password (plaintext -- prefer keyring or env var).
    #[serde(default, deserialize_with = "text::optional")]
    pub password: Option<String>,

    /// Environment variable name containing the password.
    #[serde(default, deserialize_with = "text::optional")]
    pub password_env: Option<String>,

    /// Skip TLS certificate verification.
    #[serde(default)]
    pub insecure: bool,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// "auto", "unifi-os", or "classic".
    #[serde(default = "default_platform", deserialize_with = "text::required")]
    pub platform: String,

    /// Zone file to reconcile.
    pub zone_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            controller: None,
            site: default_site(),
            username: None,
            password: None,
            password_env: None,
            insecure: false,
            ca_cert: None,
            timeout: default_timeout(),
            platform: default_platform(),
            zone_file: None,
        }
    }
}

fn default_site() -> String {
    "default".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_platform() -> String {
    "auto".into()
}

/// String settings that tolerate scalar input.
///
/// The env provider parses `UNIZONE_USERNAME=1000` as an integer and
/// `UNIZONE_SITE=true` as a bool; both are still meant as text.
mod text {
    use std::fmt;

    use serde::Deserializer;
    use serde::de::{self, Visitor};

    struct Scalar(String);

    impl<'de> de::Deserialize<'de> for Scalar {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(ScalarVisitor).map(Scalar)
        }
    }

    struct ScalarVisitor;

    impl Visitor<'_> for ScalarVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_char<E: de::Error>(self, v: char) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i128<E: de::Error>(self, v: i128) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    pub(super) fn required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        de::Deserialize::deserialize(deserializer).map(|Scalar(s)| s)
    }

    pub(super) fn optional<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let value: Option<Scalar> = de::Deserialize::deserialize(deserializer)?;
        Ok(value.map(|Scalar(s)| s))
    }
}

/// Command-line overrides. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_file: Option<PathBuf>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "unizone", "unizone").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("unizone");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Build the layered figment: defaults < file < env < overrides.
///
/// `UNIZONE_PASSWORD` is deliberately left out of the env layer; it is
/// consulted by [`resolve_password`] ahead of the keyring.
pub fn figment(path: &Path, overrides: &Overrides) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("UNIZONE_").ignore(&["password", "config"]))
        .merge(Serialized::defaults(overrides))
}

/// Load the configuration.
///
/// With `explicit_path` the file must exist; otherwise the platform default
/// path is used if present.
pub fn load(explicit_path: Option<&Path>, overrides: &Overrides) -> Result<Config, ConfigError> {
    let path = match explicit_path {
        Some(path) if !path.is_file() => {
            return Err(ConfigError::Validation {
                field: "config".into(),
                reason: format!("file not found: {}", path.display()),
            });
        }
        Some(path) => path.to_path_buf(),
        None => config_path(),
    };

    Ok(figment(&path, overrides).extract()?)
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the controller password.
///
/// 1. the variable named by `password_env`
/// 2. `UNIZONE_PASSWORD`
/// 3. system keyring entry `unizone/<username>`
/// 4. plaintext `password`
pub fn resolve_password(config: &Config, username: &str) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = config.password_env {
        if let Ok(pw) = std::env::var(env_name) {
            return Ok(SecretString::from(pw));
        }
    }

    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Ok(SecretString::from(pw));
    }

    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, username) {
        if let Ok(pw) = entry.get_password() {
            return Ok(SecretString::from(pw));
        }
    }

    if let Some(ref pw) = config.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        username: username.into(),
    })
}

// ── Translation ─────────────────────────────────────────────────────

/// Parse the `platform` setting. `auto` means detect at connect time.
pub fn parse_platform(value: &str) -> Result<Option<ControllerPlatform>, ConfigError> {
    if value == "auto" {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|reason| ConfigError::Validation {
            field: "platform".into(),
            reason,
        })
}

/// Build the controller half of the runtime config.
pub fn controller_config(config: &Config) -> Result<ControllerConfig, ConfigError> {
    let url_str = config.controller.as_deref().ok_or_else(|| ConfigError::Missing {
        field: "controller".into(),
    })?;
    let url: url::Url = url_str.parse().map_err(|_| ConfigError::Validation {
        field: "controller".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    let username = config
        .username
        .clone()
        .ok_or_else(|| ConfigError::Missing {
            field: "username".into(),
        })?;
    let password = resolve_password(config, &username)?;

    let tls = if config.insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = config.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(ControllerConfig {
        url,
        site: config.site.clone(),
        username,
        password,
        tls,
        timeout: Duration::from_secs(config.timeout),
        platform: parse_platform(&config.platform)?,
    })
}

/// Build the full runtime config for a `sync` run.
pub fn sync_config(config: &Config) -> Result<SyncConfig, ConfigError> {
    let zone_file = config.zone_file.clone().ok_or_else(|| ConfigError::Missing {
        field: "zone_file".into(),
    })?;
    Ok(SyncConfig {
        controller: controller_config(config)?,
        zone_file,
    })
}

#[cfg(test)]
mod tests {
    use figment::Jail;
    use secrecy::ExposeSecret;

    use super::*;

    fn full() -> Config {
        Config {
            controller: Some("https://unifi.example.net".into()),
            username: Some("svc-dns".into()),
            password: Some("hunter2".into()),
            password_env: Some("UNIZONE_TEST_UNSET_PASSWORD_VAR".into()),
            zone_file: Some("zone.json".into()),
            ..Config::default()
        }
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.site, "default");
        assert_eq!(config.timeout, 30);
        assert_eq!(config.platform, "auto");
        assert!(!config.insecure);
    }

    // Loading reads `UNIZONE_*` from the process env, so every test that
    // calls `load` runs inside a `Jail`, which serializes them.

    #[test]
    fn loads_file_and_applies_overrides() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "unizone.toml",
                "controller = \"https://10.0.0.1\"\n\
                 username = \"admin\"\n\
                 site = \"home\"\n\
                 insecure = true\n\
                 zone_file = \"/srv/dns/zone.json\"\n",
            )?;
            let overrides = Overrides {
                site: Some("lab".into()),
                timeout: Some(5),
                ..Overrides::default()
            };

            let config = load(Some(Path::new("unizone.toml")), &overrides).expect("loads");

            assert_eq!(config.controller.as_deref(), Some("https://10.0.0.1"));
            assert_eq!(config.site, "lab");
            assert_eq!(config.timeout, 5);
            assert!(config.insecure);
            assert_eq!(config.zone_file, Some(PathBuf::from("/srv/dns/zone.json")));
            Ok(())
        });
    }

    #[test]
    fn env_layer_sits_between_file_and_flags() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "unizone.toml",
                "controller = \"https://file.example.net\"\nsite = \"home\"\n",
            )?;
            jail.set_env("UNIZONE_CONTROLLER", "https://env.example.net");
            jail.set_env("UNIZONE_ZONE_FILE", "/srv/dns/zone.json");
            jail.set_env("UNIZONE_INSECURE", "true");
            jail.set_env("UNIZONE_SITE", "office");
            let overrides = Overrides {
                site: Some("lab".into()),
                ..Overrides::default()
            };

            let config = load(Some(Path::new("unizone.toml")), &overrides).expect("loads");

            assert_eq!(config.controller.as_deref(), Some("https://env.example.net"));
            assert_eq!(config.zone_file, Some(PathBuf::from("/srv/dns/zone.json")));
            assert!(config.insecure);
            assert_eq!(config.site, "lab");
            Ok(())
        });
    }

    #[test]
    fn numeric_env_values_stay_text() {
        Jail::expect_with(|jail| {
            jail.create_file("unizone.toml", "")?;
            jail.set_env("UNIZONE_CONTROLLER", "https://10.0.0.1");
            jail.set_env("UNIZONE_USERNAME", "1000");
            jail.set_env("UNIZONE_SITE", "123");
            jail.set_env("UNIZONE_ZONE_FILE", "zone.json");
            jail.set_env("UNIZONE_INSECURE", "true");

            let config = load(Some(Path::new("unizone.toml")), &Overrides::default())
                .expect("numeric strings load");

            assert_eq!(config.username.as_deref(), Some("1000"));
            assert_eq!(config.site, "123");
            assert!(config.insecure);

            let sync = sync_config(&Config {
                password: Some("pw".into()),
                ..config
            })
            .expect("translates");
            assert_eq!(sync.controller.username, "1000");
            assert_eq!(sync.controller.site, "123");
            assert_eq!(sync.controller.tls, TlsVerification::DangerAcceptInvalid);
            Ok(())
        });
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = load(Some(Path::new("/nonexistent/unizone.toml")), &Overrides::default())
            .expect_err("missing file");
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "config"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("unizone.toml", "timeout = \"soon\"\n")?;
            let err = load(Some(Path::new("unizone.toml")), &Overrides::default())
                .expect_err("bad type");
            assert!(matches!(err, ConfigError::Figment(_)));
            Ok(())
        });
    }

    #[test]
    fn translates_to_sync_config() {
        let sync = sync_config(&full()).expect("valid");
        assert_eq!(sync.zone_file, PathBuf::from("zone.json"));
        assert_eq!(sync.controller.url.as_str(), "https://unifi.example.net/");
        assert_eq!(sync.controller.site, "default");
        assert_eq!(sync.controller.tls, TlsVerification::SystemDefaults);
        assert_eq!(sync.controller.platform, None);
        assert_eq!(sync.controller.timeout, Duration::from_secs(30));
    }

    #[test]
    fn insecure_beats_ca_cert() {
        let config = Config {
            insecure: true,
            ca_cert: Some("/etc/ssl/unifi.pem".into()),
            ..full()
        };
        let controller = controller_config(&config).expect("valid");
        assert_eq!(controller.tls, TlsVerification::DangerAcceptInvalid);

        let config = Config {
            ca_cert: Some("/etc/ssl/unifi.pem".into()),
            ..full()
        };
        let controller = controller_config(&config).expect("valid");
        assert_eq!(
            controller.tls,
            TlsVerification::CustomCa("/etc/ssl/unifi.pem".into())
        );
    }

    #[test]
    fn missing_required_settings() {
        let err = sync_config(&Config {
            zone_file: None,
            ..full()
        })
        .expect_err("no zone file");
        assert!(matches!(err, ConfigError::Missing { ref field } if field == "zone_file"));

        let err = controller_config(&Config {
            controller: None,
            ..full()
        })
        .expect_err("no controller");
        assert!(matches!(err, ConfigError::Missing { ref field } if field == "controller"));

        let err = controller_config(&Config {
            controller: Some("not a url".into()),
            ..full()
        })
        .expect_err("bad url");
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn platform_setting() {
        assert_eq!(parse_platform("auto").expect("auto"), None);
        assert_eq!(
            parse_platform("unifi-os").expect("unifi-os"),
            Some(ControllerPlatform::UnifiOs)
        );
        assert_eq!(
            parse_platform("classic").expect("classic"),
            Some(ControllerPlatform::ClassicController)
        );
        assert!(parse_platform("cloud").is_err());
    }

    #[test]
    fn password_env_is_consulted_first() {
        Jail::expect_with(|jail| {
            jail.set_env("DNS_SYNC_TEST_SECRET", "from-named-var");
            jail.set_env(PASSWORD_ENV, "from-unizone-password");
            let config = Config {
                password_env: Some("DNS_SYNC_TEST_SECRET".into()),
                ..full()
            };

            let password = resolve_password(&config, "svc-dns").expect("resolves");
            assert_eq!(password.expose_secret(), "from-named-var");
            Ok(())
        });
    }

    #[test]
    fn unset_password_env_falls_through_to_unizone_password() {
        Jail::expect_with(|jail| {
            jail.set_env(PASSWORD_ENV, "from-unizone-password");

            let password = resolve_password(&full(), "svc-dns").expect("resolves");
            assert_eq!(password.expose_secret(), "from-unizone-password");
            Ok(())
        });
    }

    #[test]
    fn plaintext_password_is_last_resort() {
        Jail::expect_with(|_| {
            // Only meaningful when neither env var nor keyring supplies one.
            if std::env::var(PASSWORD_ENV).is_ok() {
                return Ok(());
            }
            let password = resolve_password(&full(), "unizone-test-user-without-keyring-entry")
                .expect("plaintext fallback");
            assert_eq!(password.expose_secret(), "hunter2");
            Ok(())
        });
    }
}
