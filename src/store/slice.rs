//! Slice state and its reducers

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Loading phase of a slice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    #[serde(rename = "")]
    Idle,
    #[serde(rename = "pending")]
    Pending,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "",
            Phase::Pending => "pending",
        }
    }
}

/// How a settled response is written into a slice
#[derive(Debug, Clone, PartialEq)]
pub enum SliceUpdate<T> {
    /// Replace the whole value. The value was deserialized onto the default
    /// shape, so no field of the previous value survives.
    FullReplace(T),
    /// Overwrite exactly one top-level field, keeping its siblings
    FieldPatch { field: String, value: Value },
    /// Leave the data untouched
    Keep,
}

/// Data, loading phase and last error for one piece of client state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Slice<T> {
    pub data: T,
    pub phase: Phase,
    pub error: Option<String>,
}

impl<T> Slice<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    /// Mark the slice pending. A pending slice stays pending; returns whether
    /// the transition happened.
    pub fn begin(&mut self) -> bool {
        if self.phase == Phase::Idle {
            self.phase = Phase::Pending;
            true
        } else {
            false
        }
    }

    /// Restore the data to its default shape
    pub fn reset(&mut self) {
        self.data = T::default();
    }

    /// Settle a successful operation
    pub fn fulfill(&mut self, update: SliceUpdate<T>) -> Result<(), serde_json::Error> {
        self.phase = Phase::Idle;
        let applied = match update {
            SliceUpdate::FullReplace(value) => {
                self.data = value;
                Ok(())
            }
            SliceUpdate::FieldPatch { field, value } => self.patch(&field, value),
            SliceUpdate::Keep => Ok(()),
        };

        match applied {
            Ok(()) => {
                self.error = None;
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Settle a failed operation
    pub fn reject(&mut self, message: impl Into<String>) {
        self.phase = Phase::Idle;
        self.error = Some(message.into());
    }

    fn patch(&mut self, field: &str, value: Value) -> Result<(), serde_json::Error> {
        let mut current = serde_json::to_value(&self.data)?;
        if let Value::Object(map) = &mut current {
            map.insert(field.to_string(), value);
        }
        self.data = serde_json::from_value(current)?;
        Ok(())
    }
}
