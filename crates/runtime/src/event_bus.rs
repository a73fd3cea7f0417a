use crate::frame::Frame;

/// What part of the controller produced an event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// A travel tween was started.
    Travel,
    /// A travel tween completed and the zone flipped.
    Arrival,
    /// A pointer pick resolved to an action.
    Pick,
    /// An overlay panel opened or closed.
    Overlay,
    /// A basket mutation (add/increment/decrement) was applied.
    Basket,
    /// Persistence trouble; the session degrades to in-memory operation.
    Storage,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Travel => "travel",
            EventKind::Arrival => "arrival",
            EventKind::Pick => "pick",
            EventKind::Overlay => "overlay",
            EventKind::Basket => "basket",
            EventKind::Storage => "storage",
        }
    }
}

/// One recorded controller decision, stamped with the frame it happened on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub frame_index: u64,
    pub kind: EventKind,
    pub message: String,
}

/// Traceability sink for the session controller.
///
/// Picks, travels, and basket mutations are appended here as they happen;
/// the shell drains the bus once per frame and forwards it to the console.
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, frame: Frame, kind: EventKind, message: impl Into<String>) {
        self.events.push(Event {
            frame_index: frame.index,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
