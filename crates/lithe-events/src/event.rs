use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Data carried by an event, handed to every listener unmodified.
pub type Payload = Map<String, Value>;

/// An immutable named event.
///
/// The dispatcher routes on [`Event::name`] only; the payload is opaque to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    name: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    payload: Payload,
}

impl Event {
    /// Names are not validated here. [`EventDispatcher::on`](crate::EventDispatcher::on)
    /// rejects the empty name, so an event named `""` is never delivered.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: Payload::new(),
        }
    }

    pub fn with_payload(name: impl Into<String>, payload: Payload) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    /// Builder-style helper used while an event is being assembled, before it is emitted.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }
}
