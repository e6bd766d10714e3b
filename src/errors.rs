/*!

Error taxonomy for the login keyring check.

Only the mutating half of the flow produces errors for the caller: failures
while querying the default keyring or listing keyring names are swallowed by
the check (logged, treated as "not found"), so they never appear here.

*/

/// An error reported by the secret-service backend for a single call.
///
/// The DBus Secret Service reports failures as named DBus errors rather
/// than numeric result codes, so this carries the backend's rendering of
/// the error verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ServiceError(pub String);

impl From<dbus_secret_service::Error> for ServiceError {
    fn from(err: dbus_secret_service::Error) -> Self {
        Self(err.to_string())
    }
}

impl From<dbus::Error> for ServiceError {
    fn from(err: dbus::Error) -> Self {
        Self(err.to_string())
    }
}

/// Failures of `ensure_login_keyring`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Could not connect to the Secret Service at all.
    #[error("failed to connect to the secret service: {source}")]
    Connect {
        /// Underlying service error.
        source: ServiceError,
    },

    /// Keyring creation failed; the default keyring was not changed.
    #[error("failed to create keyring '{name}': {source}")]
    CreateFailed {
        /// Label of the keyring that could not be created.
        name: String,

        /// Underlying service error.
        source: ServiceError,
    },

    /// The keyring was created but could not be made the default.
    #[error("failed to set default keyring '{name}': {source}")]
    SetDefaultFailed {
        /// Label of the keyring that could not be made the default.
        name: String,

        /// Underlying service error.
        source: ServiceError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
