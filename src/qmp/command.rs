//! QMP command and response shapes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A command understood by the monitor.
///
/// Serializes to the `{"execute": ..., "arguments": {...}}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "execute", content = "arguments", rename_all = "kebab-case")]
pub enum Request<'a> {
    /// Leaves the greeting's capabilities negotiation mode.
    #[serde(rename = "qmp_capabilities")]
    Capabilities,
    /// Lists the properties (and child objects) of the object at `path`.
    QomList {
        /// Object-model path, e.g. `/machine/peripheral`.
        path: &'a str,
    },
    /// Reads one property of the object at `path`.
    QomGet {
        /// Object-model path.
        path: &'a str,
        /// Property name.
        property: &'a str,
    },
}

/// One entry of a `qom-list` answer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObjectProperty {
    /// Property name.
    pub name: String,
    /// Type tag, e.g. `string` or `child<virtio-net-pci>`.
    #[serde(rename = "type")]
    pub type_name: String,
}

/// The `{"return": ...}` envelope of a successful answer.
#[derive(Debug, Deserialize)]
struct Response<T> {
    #[serde(rename = "return")]
    value: T,
}

/// Extracts the typed `return` member from a raw response.
///
/// # Errors
///
/// Returns an error if the response has no `return` member or its
/// value does not deserialize into `T`.
pub fn decode_return<T: DeserializeOwned>(response: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value::<Response<T>>(response).map(|r| r.value)
}
