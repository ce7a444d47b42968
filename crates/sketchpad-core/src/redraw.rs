//! Single-slot redraw scheduling.
//!
//! Restoring a snapshot means decoding an image, which on some platforms only
//! completes later. A [`RedrawSlot`] admits one redraw at a time and hands out
//! increasing tickets, so completions can only land in the order they were
//! requested.

/// Identifies one redraw request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RedrawTicket(u64);

impl RedrawTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct RedrawSlot {
    next: u64,
    in_flight: Option<RedrawTicket>,
    last_completed: Option<RedrawTicket>,
}

impl RedrawSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot. Returns `None` while another redraw is still in flight.
    pub fn begin(&mut self) -> Option<RedrawTicket> {
        if self.in_flight.is_some() {
            return None;
        }
        let ticket = RedrawTicket(self.next);
        self.next += 1;
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Release the slot for `ticket`. Returns false for a ticket that is not in flight.
    pub fn finish(&mut self, ticket: RedrawTicket) -> bool {
        if self.in_flight != Some(ticket) {
            log::warn!("Ignoring completion of stale redraw {}", ticket.0);
            return false;
        }
        self.in_flight = None;
        self.last_completed = Some(ticket);
        true
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_completed(&self) -> Option<RedrawTicket> {
        self.last_completed
    }
}
