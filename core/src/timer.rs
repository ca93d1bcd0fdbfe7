use std::time::Duration;

/// Identifies one scheduled hide. Tickets grow monotonically within a game, so a
/// fire that arrives after its task was superseded can be recognised and
/// dropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HideTicket(pub u64);

/// Deferred, cancellable execution of the mismatch hide.
///
/// `schedule` arranges for the driver to call
/// [`Game::hide_elapsed`](crate::Game::hide_elapsed) with `ticket` once `delay`
/// has passed. The returned handle is given back to `cancel` if the hide gets
/// superseded before it fires; a handle whose task already fired is dropped
/// without being cancelled.
pub trait HideTimer {
    type Handle;

    fn schedule(&mut self, ticket: HideTicket, delay: Duration) -> Self::Handle;

    fn cancel(&mut self, handle: Self::Handle);
}

/// Timer that only records what it was asked to do. The driver decides when a
/// task fires.
#[derive(Clone, Debug, Default)]
pub struct ManualTimer {
    scheduled: Vec<(HideTicket, Duration)>,
    cancelled: Vec<HideTicket>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheduled(&self) -> &[(HideTicket, Duration)] {
        &self.scheduled
    }

    pub fn cancelled(&self) -> &[HideTicket] {
        &self.cancelled
    }

    pub fn last_scheduled(&self) -> Option<HideTicket> {
        self.scheduled.last().map(|&(ticket, _)| ticket)
    }

    /// Scheduled tickets that were never cancelled.
    pub fn live(&self) -> impl Iterator<Item = HideTicket> + '_ {
        self.scheduled
            .iter()
            .map(|&(ticket, _)| ticket)
            .filter(|ticket| !self.cancelled.contains(ticket))
    }
}

impl HideTimer for ManualTimer {
    type Handle = HideTicket;

    fn schedule(&mut self, ticket: HideTicket, delay: Duration) -> HideTicket {
        self.scheduled.push((ticket, delay));
        ticket
    }

    fn cancel(&mut self, handle: HideTicket) {
        self.cancelled.push(handle);
    }
}

impl<T: HideTimer + ?Sized> HideTimer for &mut T {
    type Handle = T::Handle;

    fn schedule(&mut self, ticket: HideTicket, delay: Duration) -> Self::Handle {
        (**self).schedule(ticket, delay)
    }

    fn cancel(&mut self, handle: Self::Handle) {
        (**self).cancel(handle)
    }
}
