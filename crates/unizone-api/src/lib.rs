// unizone-api: Async Rust client for the UniFi controller legacy API.
//
// Only the read path needed to build a device directory lives here:
// platform detection, cookie session login/logout, and the known-client
// listing. Everything is wrapped in the standard legacy envelope.

pub mod auth;
pub mod error;
pub mod legacy;
pub mod transport;

pub use auth::ControllerPlatform;
pub use error::Error;
pub use legacy::LegacyClient;
pub use legacy::models::KnownClient;
pub use transport::{TlsMode, TransportConfig};
