use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::time::Duration;


pub type HeaderMultiMap = BTreeMap<String, Vec<String>>;

/// Payload of the `DoRequest` command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestInput {
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, alias = "header", deserialize_with = "null_as_default")]
    pub headers: HeaderMultiMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timeout: Timeout,
}

impl RequestInput {
    /// Deserializes a raw command payload, reading `timeout` in `unit`.
    pub fn from_slice(raw: &[u8], unit: TimeoutUnit) -> serde_json::Result<Self> {
        let mut input: RequestInput = serde_json::from_slice(raw)?;
        input.timeout.unit = unit;
        if input.timeout.exceeds_max() {
            return Err(de::Error::custom(format!(
                "invalid timeout {}{}: longer than {}ns",
                input.timeout.count, unit, MAX_TIMEOUT_NANOS
            )));
        }
        Ok(input)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeoutUnit {
    #[default]
    Nanos,
    Millis,
    Seconds,
}

impl TimeoutUnit {
    pub fn duration(self, count: u64) -> Duration {
        match self {
            TimeoutUnit::Nanos => Duration::from_nanos(count),
            TimeoutUnit::Millis => Duration::from_millis(count),
            TimeoutUnit::Seconds => Duration::from_secs(count),
        }
    }
}

impl FromStr for TimeoutUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ns" => Ok(TimeoutUnit::Nanos),
            "ms" => Ok(TimeoutUnit::Millis),
            "s" => Ok(TimeoutUnit::Seconds),
            other => Err(other.to_string()),
        }
    }
}

impl Display for TimeoutUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeoutUnit::Nanos => "ns",
            TimeoutUnit::Millis => "ms",
            TimeoutUnit::Seconds => "s",
        })
    }
}

/// Longest timeout accepted, the range of a signed 64-bit nanosecond count.
pub const MAX_TIMEOUT_NANOS: u128 = i64::MAX as u128;

/// Request timeout as it travels on the wire: an integer carried in a JSON
/// string, counted in a unit fixed by pack configuration. Zero means no
/// timeout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeout {
    pub count: u64,
    pub unit: TimeoutUnit,
}

impl Timeout {
    pub fn new(count: u64, unit: TimeoutUnit) -> Self {
        Timeout { count, unit }
    }

    pub fn exceeds_max(&self) -> bool {
        self.unit.duration(self.count).as_nanos() > MAX_TIMEOUT_NANOS
    }

    pub fn duration(&self) -> Option<Duration> {
        match self.count {
            0 => None,
            count => Some(self.unit.duration(count)),
        }
    }
}

impl Serialize for Timeout {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.count)
    }
}

impl<'de> Deserialize<'de> for Timeout {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        let count = match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text
                .trim()
                .parse::<u64>()
                .map_err(|e| de::Error::custom(format!("invalid timeout {:?}: {}", text, e)))?,
            Raw::Number(count) => count,
        };
        Ok(Timeout::new(count, TimeoutUnit::default()))
    }
}

/// Payload of the `DoRequestSuccess` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseOutput {
    pub status_code: u16,
    pub header: HeaderMultiMap,
    pub body: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// Response declared itself as `application/json`; bytes are untouched.
    Json(Vec<u8>),
    /// URL-safe base64 of any other body.
    Base64(String),
}

impl Serialize for ResponseBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // servers do lie about content types, such bodies are encoded like any other
            ResponseBody::Json(bytes) => match serde_json::from_slice::<Box<RawValue>>(bytes) {
                Ok(raw) => raw.serialize(serializer),
                Err(_) => serializer.serialize_str(&URL_SAFE.encode(bytes)),
            },
            ResponseBody::Base64(encoded) => serializer.serialize_str(encoded),
        }
    }
}

/// Payload of the `DoRequestFailed` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorOutput {
    #[serde(flatten)]
    pub input: RequestInput,
    pub error: String,
}

impl ErrorOutput {
    pub fn new(input: RequestInput, error: &dyn Display) -> Self {
        ErrorOutput {
            input,
            error: error.to_string(),
        }
    }
}
