use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the only slash command this service answers to.
pub const SLASH_COMMAND: &str = "/schedule";

/// Action carried in the context payload of an attachment button.
pub const DELETE_ACTION: &str = "delete";

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(EventId);

/// Operations reachable through the `text` field of a slash command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Delete,
}

impl Operation {
    pub const AVAILABLE: &'static str = "list, delete";

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "list" => Some(Self::List),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub id: EventId,
    pub label: &'static str,
    pub title: &'static str,
}

const SCHEDULE: [ScheduledEvent; 3] = [
    ScheduledEvent {
        id: EventId(1),
        label: "2024-02-20 10:00 AM",
        title: "Team Meeting",
    },
    ScheduledEvent {
        id: EventId(2),
        label: "2024-02-21 2:30 PM",
        title: "Project Review",
    },
    ScheduledEvent {
        id: EventId(3),
        label: "2024-02-22 11:00 AM",
        title: "Client Call",
    },
];

/// The fixed schedule. Nothing at runtime adds to or removes from it.
pub fn scheduled_events() -> &'static [ScheduledEvent] {
    &SCHEDULE
}
