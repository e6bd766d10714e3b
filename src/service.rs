/*!

Secret-service access.

This module defines the client interface the keyring check is written
against, plus the real DBus-backed implementation. Each ensurer holds one
client; the DBus client keeps its connection behind a mutex so shared
ensurers stay usable from multiple threads.

*/

use std::sync::Mutex;

use dbus::blocking::Connection;
use dbus_secret_service::{EncryptionType, SecretService};

use crate::errors::ServiceError;

/// The four keyring operations the check needs from a secret service.
///
/// Keyrings are identified by name (collection label); names are compared
/// case-sensitively. A fake implementation of this trait is enough to test
/// the whole check without a running keyring daemon.
pub trait SecretServiceClient {
    /// Name of the default keyring, or `None` if no default is configured.
    fn default_keyring_name(&self) -> Result<Option<String>, ServiceError>;

    /// Names of all keyrings known to the service, in service order.
    fn keyring_names(&self) -> Result<Vec<String>, ServiceError>;

    /// Create a keyring with the given name and password.
    ///
    /// The DBus Secret Service delegates collection passwords to the
    /// service's own prompter, so the real client only accepts an empty
    /// password; backends that can set one directly may honor it.
    fn create_keyring(&self, name: &str, password: &str) -> Result<(), ServiceError>;

    /// Make the keyring with the given name the service default.
    fn set_default_keyring(&self, name: &str) -> Result<(), ServiceError>;
}

/// The real client, backed by the DBus Secret Service.
///
/// The session is unencrypted: this client never transfers secret
/// material, it only creates and aliases collections.
pub struct Service {
    ss: Mutex<SecretService>,
}

impl Service {
    pub fn connect() -> Result<Self, ServiceError> {
        let ss = SecretService::connect(EncryptionType::Plain).map_err(ServiceError::from)?;
        Ok(Self { ss: Mutex::new(ss) })
    }
}

impl SecretServiceClient for Service {
    fn default_keyring_name(&self) -> Result<Option<String>, ServiceError> {
        let ss = self
            .ss
            .lock()
            .expect("Mutex failure in secret-service client: please report a bug");
        let collection = ss.get_default_collection().map_err(ServiceError::from)?;
        let label = collection.get_label().map_err(ServiceError::from)?;
        if label.is_empty() {
            Ok(None)
        } else {
            Ok(Some(label))
        }
    }

    fn keyring_names(&self) -> Result<Vec<String>, ServiceError> {
        let ss = self
            .ss
            .lock()
            .expect("Mutex failure in secret-service client: please report a bug");
        let all = ss.get_all_collections().map_err(ServiceError::from)?;
        // Collections whose label can't be read are skipped rather than
        // failing the whole listing.
        let names = all.iter().filter_map(|c| c.get_label().ok()).collect();
        Ok(names)
    }

    fn create_keyring(&self, name: &str, password: &str) -> Result<(), ServiceError> {
        if !password.is_empty() {
            return Err(ServiceError(
                "collection passwords are set by the service prompt; only an empty password is supported".to_string(),
            ));
        }
        let ss = self
            .ss
            .lock()
            .expect("Mutex failure in secret-service client: please report a bug");
        ss.create_collection(name, "").map_err(ServiceError::from)?;
        Ok(())
    }

    fn set_default_keyring(&self, name: &str) -> Result<(), ServiceError> {
        // dbus-secret-service does not expose SetAlias, so this one call
        // goes straight over the bus.
        let conn = Connection::new_session().map_err(ServiceError::from)?;
        let path = util::find_collection_path(&conn, name)?;
        let service = conn.with_proxy(util::BUS_NAME, util::SERVICE_PATH, util::TIMEOUT);
        let () = service
            .method_call(util::SERVICE_IFACE, "SetAlias", ("default", path))
            .map_err(ServiceError::from)?;
        Ok(())
    }
}

/// Raw DBus plumbing for the alias call: this module is private because
/// these can't be called except from the methods of the Service struct.
mod util {
    use std::time::Duration;

    use dbus::Path;
    use dbus::blocking::Connection;
    use dbus::blocking::stdintf::org_freedesktop_dbus::Properties;

    use super::ServiceError;

    pub(crate) const BUS_NAME: &str = "org.freedesktop.secrets";
    pub(crate) const SERVICE_PATH: &str = "/org/freedesktop/secrets";
    pub(crate) const SERVICE_IFACE: &str = "org.freedesktop.Secret.Service";
    const COLLECTION_IFACE: &str = "org.freedesktop.Secret.Collection";
    pub(crate) const TIMEOUT: Duration = Duration::from_secs(5);

    /// Find the object path of the collection whose label is the given name.
    pub(crate) fn find_collection_path(
        conn: &Connection,
        name: &str,
    ) -> Result<Path<'static>, ServiceError> {
        let service = conn.with_proxy(BUS_NAME, SERVICE_PATH, TIMEOUT);
        let collections: Vec<Path<'static>> = service
            .get(SERVICE_IFACE, "Collections")
            .map_err(ServiceError::from)?;
        for path in collections {
            let collection = conn.with_proxy(BUS_NAME, path.clone(), TIMEOUT);
            let label: Result<String, _> = collection.get(COLLECTION_IFACE, "Label");
            if label.map(|l| l.eq(name)).unwrap_or(false) {
                return Ok(path);
            }
        }
        Err(ServiceError(format!("no keyring named '{name}'")))
    }
}
