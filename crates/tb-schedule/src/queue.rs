//! `EventQueue` — tick-ordered pending events with cancellable recurrences.
//!
//! # Layout
//!
//! Pending events live in a `BTreeMap` keyed by `(tick, priority, sequence)`.
//! The map gives O(log n) insert, O(log n) pop of the earliest event and
//! O(log n) removal of an arbitrary key, which is what cancellation needs.
//!
//! Recurring registrations additionally keep a record (interval + the key
//! of their single pending firing) in a side table indexed by registration
//! id.  Popping a recurring firing re-arms it one interval later *before*
//! the event is handed to the caller, so cancelling during dispatch removes
//! the next firing cleanly.
//!
//! # Cancellation
//!
//! [`EventQueue::cancel`] is idempotent: cancelling a handle whose
//! registration is unknown or already cancelled is a no-op returning
//! `false`.

use std::collections::{BTreeMap, HashMap};

use log::trace;
use tb_core::{EventId, Tick};

use crate::{Event, ScheduleError, ScheduleResult};

/// Ordering key of one pending firing.
type Key = (Tick, u8, EventId);

/// Opaque token identifying a recurring registration.
///
/// Deliberately neither `Clone` nor `Copy`: the citizen that registered the
/// recurrence owns the only handle and gives it up to cancel.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct EventHandle(EventId);

impl EventHandle {
    /// The registration id behind this handle, for diagnostics and
    /// [`EventQueue::is_registered`].
    #[inline]
    pub fn id(&self) -> EventId {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Pending {
    event: Event,
    /// Registration id for recurring firings; `None` for one-time events.
    registration: Option<EventId>,
}

#[derive(Debug)]
struct Recurrence {
    interval: u64,
    /// Key of the single pending firing of this registration.
    pending: Key,
}

/// Discrete-event priority queue.
#[derive(Default, Debug)]
pub struct EventQueue {
    pending: BTreeMap<Key, Pending>,
    recurring: HashMap<EventId, Recurrence>,
    /// Next sequence number; doubles as the FIFO tie-breaker.
    next_seq: u64,
    /// Tick of the event being dispatched (or the tick the caller advanced to).
    now: Tick,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// The queue's notion of "now": the base for relative delays.
    #[inline]
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Move "now" forward to `tick`.  Called by the run loop at the start of
    /// every tick so delays registered by the tick's first event are
    /// relative to the right base even when nothing has been popped yet.
    ///
    /// Moving backwards is ignored.
    pub fn advance_to(&mut self, tick: Tick) {
        if tick > self.now {
            self.now = tick;
        }
    }

    /// Schedule `event` to fire once, `delay` ticks after [`now`](Self::now).
    ///
    /// A zero delay fires later in the current tick (after everything
    /// already queued for this tick with the same or lower priority).
    pub fn schedule_once(&mut self, delay: u64, event: Event) {
        let at = self.now + delay;
        let key = self.key_for(at, &event);
        trace!("schedule {} for {} at {at}", event.kind, event.agent);
        self.pending.insert(key, Pending { event, registration: None });
    }

    /// Schedule `event` to fire at absolute tick `start` and then every
    /// `interval` ticks until cancelled.
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::ZeroInterval`] if `interval == 0`.
    /// - [`ScheduleError::InPast`] if `start` is before [`now`](Self::now).
    pub fn schedule_recurring(
        &mut self,
        start:    Tick,
        interval: u64,
        event:    Event,
    ) -> ScheduleResult<EventHandle> {
        if interval == 0 {
            return Err(ScheduleError::ZeroInterval);
        }
        if start < self.now {
            return Err(ScheduleError::InPast { at: start, now: self.now });
        }
        let key = self.key_for(start, &event);
        let registration = key.2;
        trace!(
            "schedule recurring {} for {} from {start} every {interval}",
            event.kind, event.agent
        );
        self.pending.insert(key, Pending { event, registration: Some(registration) });
        self.recurring.insert(registration, Recurrence { interval, pending: key });
        Ok(EventHandle(registration))
    }

    /// Cancel a recurring registration and drop its pending firing.
    ///
    /// Returns `true` if the registration was live.  Unknown or already
    /// cancelled handles are a no-op returning `false`.
    pub fn cancel(&mut self, handle: &EventHandle) -> bool {
        match self.recurring.remove(&handle.0) {
            Some(recurrence) => {
                self.pending.remove(&recurrence.pending);
                trace!("cancelled recurring registration {}", handle.0);
                true
            }
            None => false,
        }
    }

    /// `true` while the recurring registration `id` has not been cancelled.
    pub fn is_registered(&self, id: EventId) -> bool {
        self.recurring.contains_key(&id)
    }

    /// `true` while `handle` still has a firing pending.
    #[inline]
    pub fn is_pending(&self, handle: &EventHandle) -> bool {
        self.is_registered(handle.0)
    }

    /// Remove and return the earliest event whose tick is `<= until`.
    ///
    /// Advances [`now`](Self::now) to the event's tick.  Recurring firings
    /// are re-armed at `tick + interval` before returning.
    pub fn pop_due(&mut self, until: Tick) -> Option<(Tick, Event)> {
        let (&(tick, _, _), _) = self.pending.first_key_value()?;
        if tick > until {
            return None;
        }
        let ((tick, priority, _), pending) = self.pending.pop_first()?;
        self.now = tick;

        if let Some(registration) = pending.registration {
            if let Some(recurrence) = self.recurring.get_mut(&registration) {
                let next = (tick + recurrence.interval, priority, EventId(self.next_seq));
                self.next_seq += 1;
                recurrence.pending = next;
                self.pending.insert(next, pending.clone());
            }
        }

        Some((tick, pending.event))
    }

    /// The earliest tick with at least one pending event, or `None` if empty.
    pub fn next_tick(&self) -> Option<Tick> {
        self.pending.keys().next().map(|&(tick, _, _)| tick)
    }

    /// Number of pending firings (one per live recurrence plus one-time events).
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of live recurring registrations.
    pub fn recurring_count(&self) -> usize {
        self.recurring.len()
    }

    /// Pending events scheduled for exactly `tick`, in firing order.
    pub fn events_at(&self, tick: Tick) -> impl Iterator<Item = &Event> + '_ {
        self.pending
            .range((tick, 0, EventId(0))..=(tick, u8::MAX, EventId(u64::MAX)))
            .map(|(_, p)| &p.event)
    }

    /// Every pending event in firing order, with its tick.
    pub fn iter(&self) -> impl Iterator<Item = (Tick, &Event)> + '_ {
        self.pending.iter().map(|(&(tick, _, _), p)| (tick, &p.event))
    }

    fn key_for(&mut self, at: Tick, event: &Event) -> Key {
        let seq = EventId(self.next_seq);
        self.next_seq += 1;
        (at, event.kind.priority(), seq)
    }
}
