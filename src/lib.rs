/*!

# Login keyring setup for the DBus Secret Service

This crate makes sure a keyring named `login` exists in the
[Secret Service](https://specifications.freedesktop.org/secret-service/)
and is the default keyring, creating it with an empty password when absent.
It is meant to run early in a desktop session, before any application tries
to store secrets, so that those applications always find a usable default
collection. The whole operation is idempotent: running it against an
already-provisioned service performs no mutation at all.

The check is three linear steps, each with an early-success exit:

1. If the default keyring is already named `login`, stop.
2. If a keyring named `login` exists at all, stop.
3. Otherwise create an empty-password `login` keyring and make it the default.

## Error policy

Lookup failures (no default configured yet, service still starting up) are
logged as warnings and treated as "condition not met" so the flow falls
through to creation; they never abort the check. Failures of the two
mutating calls are fatal and are returned to the caller. See
[`errors::Error`] for the taxonomy.

## Terminology

The Secret Service organizes secrets into *collections*; what desktop
environments call a keyring is a collection, identified here by its label.
The default keyring is the collection the service aliases as `default`.

## Headless usage

Provisioning often runs before any graphical session exists. Getting dbus
and a keyring daemon going in such environments takes extra setup (a
session bus, an unlocked `gnome-keyring-daemon`); see
[this answer on ServerFault](https://serverfault.com/a/906224/79617) for
a thorough treatment.

 */

pub mod ensure;
pub mod errors;
pub mod service;
pub use ensure::{Ensurer, LOGIN_KEYRING, ensure_login_keyring};
