//! Deferred actions keyed to elapsed widget time.
//!
//! `schedule` hands back a [`TimerHandle`]; cancelling a handle that already
//! fired (or was cancelled) is a no-op. Callers that want "at most one pending
//! action" keep a single `Option<TimerHandle>` and cancel before replacing it.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Pending<A> {
    id: u64,
    fire_at: f64,
    action: A,
}

#[derive(Debug, Clone)]
pub struct Scheduler<A> {
    now: f64,
    next_id: u64,
    pending: Vec<Pending<A>>,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Scheduler<A> {
    pub const fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 1,
            pending: Vec::new(),
        }
    }

    pub fn schedule(&mut self, delay: f32, action: A) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            fire_at: self.now + f64::from(delay.max(0.0)),
            action,
        });
        TimerHandle(id)
    }

    /// Returns `true` if the handle was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != handle.0);
        before != self.pending.len()
    }

    #[inline(always)]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Pops the earliest action due within `window` seconds from now and moves
    /// the clock to its fire time. Returns how far the clock moved.
    ///
    /// Call repeatedly until `None`, then [`advance`](Self::advance) by what is
    /// left of the frame, so work done by a fired action starts at the right
    /// moment instead of at the frame boundary.
    pub fn next_due(&mut self, window: f32) -> Option<(f32, TimerHandle, A)> {
        let limit = self.now + f64::from(window.max(0.0));
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.fire_at <= limit)
            .min_by(|(_, a), (_, b)| {
                a.fire_at
                    .partial_cmp(&b.fire_at)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.id.cmp(&b.id))
            })
            .map(|(i, _)| i)?;
        let p = self.pending.remove(idx);
        let moved = (p.fire_at - self.now).max(0.0);
        self.now += moved;
        Some((moved as f32, TimerHandle(p.id), p.action))
    }

    pub fn advance(&mut self, dt: f32) {
        self.now += f64::from(dt.max(0.0));
    }
}
