use crate::error::{ExecuteError, MalformedInput};
use crate::executor::do_request;
use crate::http_client::reqwest::ReqwestHttpClient;
use crate::http_client::{ClientConfig, HttpClient};
use crate::model::{ErrorOutput, RequestInput, ResponseOutput, TimeoutUnit};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use tracing::{info, warn};


pub const DO_REQUEST: &str = "DoRequest";

pub const DO_REQUEST_SUCCESS: EventDef = EventDef {
    name: "DoRequestSuccess",
};
pub const DO_REQUEST_FAILED: EventDef = EventDef {
    name: "DoRequestFailed",
};
pub const FATAL: EventDef = EventDef { name: "FATAL" };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventDef {
    pub name: &'static str,
}

pub type Handler = fn(&[u8], TimeoutUnit) -> Event;

/// A unit of work offered to the host: its name, the handler invoked with the
/// raw JSON input and the events it may answer with.
#[derive(Clone, Serialize)]
pub struct Command {
    pub name: &'static str,
    #[serde(skip)]
    pub handler: Handler,
    #[serde(rename = "events")]
    pub output_events: Vec<EventDef>,
}

impl Command {
    pub fn handle(&self, raw_input: &[u8], unit: TimeoutUnit) -> Event {
        (self.handler)(raw_input, unit)
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("output_events", &self.output_events)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Success(ResponseOutput),
    Failed(ErrorOutput),
    /// The input could not even be read; carries the message only.
    Fatal(String),
}

impl Event {
    pub fn event_def(&self) -> EventDef {
        match self {
            Event::Success(_) => DO_REQUEST_SUCCESS,
            Event::Failed(_) => DO_REQUEST_FAILED,
            Event::Fatal(_) => FATAL,
        }
    }
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Event", 2)?;
        state.serialize_field("event", self.event_def().name)?;
        match self {
            Event::Success(payload) => state.serialize_field("payload", payload)?,
            Event::Failed(payload) => state.serialize_field("payload", payload)?,
            Event::Fatal(message) => state.serialize_field("payload", message)?,
        }
        state.end()
    }
}

pub fn do_request_command() -> Command {
    Command {
        name: DO_REQUEST,
        handler: handle_do_request::<ReqwestHttpClient>,
        output_events: vec![DO_REQUEST_SUCCESS, DO_REQUEST_FAILED],
    }
}

/// Runs one `DoRequest` invocation with a fresh `C` bounded by the input's
/// timeout.
pub fn handle_do_request<C: HttpClient>(raw_input: &[u8], unit: TimeoutUnit) -> Event {
    let input = match RequestInput::from_slice(raw_input, unit) {
        Ok(input) => input,
        Err(err) => {
            let err = MalformedInput::from(err);
            warn!(error = %err, "rejecting DoRequest input");
            return Event::Fatal(err.to_string());
        }
    };

    let client = match C::create(ClientConfig::new(input.timeout.duration())) {
        Ok(client) => client,
        Err(err) => return failed(input, ExecuteError::from(err)),
    };

    match do_request(&client, &input) {
        Ok(output) => {
            info!(method = %input.method, url = %input.url, status = output.status_code, "request done");
            Event::Success(output)
        }
        Err(err) => failed(input, err),
    }
}

fn failed(input: RequestInput, err: ExecuteError) -> Event {
    warn!(method = %input.method, url = %input.url, error = %err, "request failed");
    Event::Failed(ErrorOutput::new(input, &err))
}
