//! Outcomes raised while a tick is processed.
//!
//! Nothing in a tick can fail; eliminations and scoring are reported as
//! events so drivers can log them and tests can observe them.

/// Something that happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// An agent hit a barrier and was removed.
    Collided {
        /// Genome ID of the agent.
        id: usize,
    },
    /// An agent touched the ground or left the top of the screen and was removed.
    OutOfBounds {
        /// Genome ID of the agent.
        id: usize,
    },
    /// An obstacle was passed.
    Scored {
        /// Session score after the increment.
        score: u32,
    },
}

/// Events of one tick in the order they happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    events: Vec<TickEvent>,
}

impl TickReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Appends an event.
    pub fn push(&mut self, event: TickEvent) {
        self.events.push(event);
    }

    /// All events, oldest first.
    pub fn events(&self) -> &[TickEvent] {
        &self.events
    }

    /// Whether nothing happened.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of agents removed this tick.
    pub fn eliminations(&self) -> usize {
        self.events
            .iter()
            .filter(|event| {
                matches!(
                    event,
                    TickEvent::Collided { .. } | TickEvent::OutOfBounds { .. }
                )
            })
            .count()
    }

    /// Whether an obstacle was passed this tick.
    pub fn scored(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, TickEvent::Scored { .. }))
    }
}
