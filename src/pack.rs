use crate::commands::{do_request_command, Command};
use serde::Serialize;

pub const PACK_NAME: &str = "Http";

pub const HELP_URL: &str = "https://github.com/HotelsDotCom/flyte-http/blob/master/README.md";

/// What the host is told about this pack when it registers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackDef {
    pub name: &'static str,
    #[serde(rename = "helpURL")]
    pub help_url: &'static str,
    pub commands: Vec<Command>,
}

impl PackDef {
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|command| command.name == name)
    }
}

pub fn pack_def() -> PackDef {
    PackDef {
        name: PACK_NAME,
        help_url: HELP_URL,
        commands: vec![do_request_command()],
    }
}
