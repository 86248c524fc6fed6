/// Handle of one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequest(pub u64);

/// Host primitive for "call me back before the next frame".
pub trait FrameScheduler {
    /// Ask the host for one frame callback.
    fn request_frame(&mut self) -> FrameRequest;

    /// Withdraw a request. Cancelling a request that already fired is a no-op.
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// The one outstanding request of a host whose frame callbacks cannot be
/// told apart from host-initiated repaints (window redraw events).
///
/// The host takes the slot when a repaint arrives: a request means the
/// scheduled frame fired, an empty slot means the repaint came from the host.
#[derive(Debug, Default)]
pub struct FrameSlot {
    next_id: u64,
    outstanding: Option<FrameRequest>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new request, replacing any outstanding one.
    pub fn request(&mut self) -> FrameRequest {
        self.next_id += 1;
        let request = FrameRequest(self.next_id);
        self.outstanding = Some(request);
        request
    }

    /// Clear the slot if `request` is the outstanding one.
    pub fn cancel(&mut self, request: FrameRequest) {
        if self.outstanding == Some(request) {
            self.outstanding = None;
        }
    }

    /// Consume the outstanding request, if any.
    pub fn take(&mut self) -> Option<FrameRequest> {
        self.outstanding.take()
    }

    pub fn outstanding(&self) -> Option<FrameRequest> {
        self.outstanding
    }
}

/// Scheduler for headless hosts: requests queue up until the host drains them.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<FrameRequest>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the oldest outstanding request, as the host would when a frame fires.
    pub fn fire(&mut self) -> Option<FrameRequest> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    /// Outstanding requests that have not fired or been cancelled.
    pub fn pending(&self) -> &[FrameRequest] {
        &self.pending
    }

    /// Total requests made over the scheduler's lifetime.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total cancellations received, including no-op ones.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        self.next_id += 1;
        self.requested += 1;
        let request = FrameRequest(self.next_id);
        self.pending.push(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.cancelled += 1;
        self.pending.retain(|pending| *pending != request);
    }
}
