//! Override-wins shallow merge.

use echobase_shared::Record;

/// Merge `overrides` onto `defaults`.
///
/// Keys only in `defaults` keep their value and position. Keys in both take
/// the override's value as a whole, nested records included. Keys only in
/// `overrides` are appended in the override's order.
pub fn combine(mut defaults: Record, overrides: Record) -> Record {
    for (key, value) in overrides {
        defaults.insert(key, value);
    }
    defaults
}
