/// Monotonic request counter for one renderer.
///
/// Each request takes a [`Ticket`]; when the response arrives it is applied
/// only if no newer ticket has been issued since. Responses to superseded
/// filters are discarded instead of overwriting newer output.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    latest: u64,
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}
