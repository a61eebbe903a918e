//! Monotonic tickets that let a session discard superseded completions.

/// Identifies one unit of scheduled work (a suggestion fetch or a lookup run).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Issues tickets for one kind of work and admits only the latest.
///
/// Issuing a ticket supersedes every earlier one. Invalidating supersedes
/// all tickets without issuing a new one.
#[derive(Debug, Default)]
pub struct SequenceGate {
    latest: u64,
    outstanding: bool,
}

impl SequenceGate {
    pub fn issue(&mut self) -> Ticket {
        self.latest = self.latest.wrapping_add(1);
        self.outstanding = true;
        Ticket(self.latest)
    }

    pub fn invalidate(&mut self) {
        self.latest = self.latest.wrapping_add(1);
        self.outstanding = false;
    }

    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Accepts the completion for `ticket` if it is the latest issued.
    /// An accepted ticket is no longer outstanding.
    pub fn accept(&mut self, ticket: Ticket) -> bool {
        if self.outstanding && self.is_current(ticket) {
            self.outstanding = false;
            true
        } else {
            false
        }
    }

    /// `true` while the latest ticket has been issued but not yet accepted.
    #[must_use]
    pub fn is_outstanding(&self) -> bool {
        self.outstanding
    }
}
