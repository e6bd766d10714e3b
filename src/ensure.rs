/*!

The login keyring check itself.

The flow mirrors what display managers expect of a session: a keyring
named `login` exists and is the default, so PAM modules and applications
can unlock and use it without further setup.

*/

use log::{debug, warn};

use crate::errors::{Error, Result};
use crate::service::{SecretServiceClient, Service};

/// Name of the keyring this crate provisions.
pub const LOGIN_KEYRING: &str = "login";

/// Runs the keyring check against a secret-service client.
pub struct Ensurer<C> {
    client: C,
}

impl Ensurer<Service> {
    /// Connect to the DBus Secret Service and wrap it in an ensurer.
    pub fn connect() -> Result<Self> {
        let client = Service::connect().map_err(|source| Error::Connect { source })?;
        Ok(Self::new(client))
    }
}

impl<C: SecretServiceClient> Ensurer<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Ensure the `login` keyring exists and is the default.
    ///
    /// Returns `Ok(())` without touching the service when the keyring is
    /// already in place. Otherwise creates it with an empty password and
    /// makes it the default; a failure of either mutation is returned and
    /// the second one is not attempted after the first fails.
    pub fn ensure(&self) -> Result<()> {
        if self.is_default_name(LOGIN_KEYRING) {
            return Ok(());
        }
        if self.name_exists(LOGIN_KEYRING) {
            return Ok(());
        }

        self.client
            .create_keyring(LOGIN_KEYRING, "")
            .map_err(|source| Error::CreateFailed {
                name: LOGIN_KEYRING.to_string(),
                source,
            })?;
        self.client
            .set_default_keyring(LOGIN_KEYRING)
            .map_err(|source| Error::SetDefaultFailed {
                name: LOGIN_KEYRING.to_string(),
                source,
            })?;
        Ok(())
    }

    /// True if the default keyring is named `name`.
    ///
    /// A lookup failure (service unreachable, no default configured yet)
    /// counts as "no", so the check can fall through to creation.
    fn is_default_name(&self, name: &str) -> bool {
        let current = match self.client.default_keyring_name() {
            Ok(current) => current,
            Err(err) => {
                warn!("failed to get default keyring: {err}");
                return false;
            }
        };
        let Some(current) = current else {
            return false;
        };
        debug!("default keyring: {current}");
        current == name
    }

    /// True if any keyring is named `name`. Lookup failures count as "no".
    fn name_exists(&self, name: &str) -> bool {
        let names = match self.client.keyring_names() {
            Ok(names) => names,
            Err(err) => {
                warn!("failed to list keyring names: {err}");
                return false;
            }
        };
        for candidate in &names {
            debug!("keyring name: {candidate}");
            if candidate == name {
                return true;
            }
        }
        false
    }
}

/// Ensure the `login` keyring exists in the DBus Secret Service and is the
/// default, connecting to the service first.
///
/// Intended for session startup code: map `Ok(())` to a zero process status
/// and any error to a nonzero one.
pub fn ensure_login_keyring() -> Result<()> {
    Ensurer::connect()?.ensure()
}
