//! Attaching named roles (pilot, copilot, astromech droid, ...) to a host record.

use echobase_shared::Record;
use serde_json::Value;

/// Write each `(role, record)` pair onto `host` as a top-level field.
///
/// An existing field with the same name is overwritten in place.
pub fn assign_roles<K, I>(mut host: Record, roles: I) -> Record
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Record)>,
{
    for (role, record) in roles {
        host.insert(role.into(), Value::Object(record));
    }
    host
}
