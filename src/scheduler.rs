//! Frame scheduling.
//!
//! The carousel never loops on its own: every step asks a [`FrameScheduler`]
//! for exactly one future frame and is re-entered through
//! [`Carousel::on_frame`](crate::carousel::Carousel::on_frame) when it fires.
//! Holding the returned [`FrameHandle`] is what makes a pending frame
//! cancelable.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::marker::PhantomData;
use std::rc::Rc;
use std::time::{Duration, Instant};

use calloop::timer::{TimeoutAction, Timer};
use calloop::{LoopHandle, RegistrationToken};

/// Identifies one scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A delivered frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub handle: FrameHandle,
    /// Milliseconds since the scheduler's origin
    pub timestamp_ms: f64,
}

/// Host animation-frame primitive.
pub trait FrameScheduler {
    /// Request one frame. `None` means the host could not schedule it.
    fn schedule(&mut self) -> Option<FrameHandle>;

    /// Cancel a pending frame. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: FrameHandle);
}

/// Receives frames fired by a [`LoopScheduler`].
pub trait FrameSink {
    fn on_frame(&mut self, frame: Frame);
}

/// Deterministic scheduler with a simulated clock.
///
/// Nothing fires on its own; call [`tick`](Self::tick) to advance the clock
/// by one frame interval and take the oldest pending frame.
#[derive(Debug)]
pub struct VirtualScheduler {
    now_ms: f64,
    interval_ms: f64,
    next_id: u64,
    pending: VecDeque<FrameHandle>,
    scheduled: u64,
    cancelled: u64,
}

impl VirtualScheduler {
    /// Scheduler firing every `interval_ms`, starting the clock at zero
    pub fn new(interval_ms: f64) -> Self {
        Self {
            now_ms: 0.0,
            interval_ms,
            next_id: 1,
            pending: VecDeque::new(),
            scheduled: 0,
            cancelled: 0,
        }
    }

    /// Advance the clock one interval and deliver the oldest pending frame.
    pub fn tick(&mut self) -> Option<Frame> {
        let handle = self.pending.pop_front()?;
        self.now_ms += self.interval_ms;
        Some(Frame {
            handle,
            timestamp_ms: self.now_ms,
        })
    }

    /// Current simulated time
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Frames requested and not yet delivered or cancelled
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains(&handle)
    }

    /// Total number of `schedule` calls
    pub fn scheduled_count(&self) -> u64 {
        self.scheduled
    }

    /// Total number of effective `cancel` calls
    pub fn cancelled_count(&self) -> u64 {
        self.cancelled
    }
}

impl Default for VirtualScheduler {
    fn default() -> Self {
        Self::new(16.0)
    }
}

impl FrameScheduler for VirtualScheduler {
    fn schedule(&mut self) -> Option<FrameHandle> {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.scheduled += 1;
        self.pending.push_back(handle);
        Some(handle)
    }

    fn cancel(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|h| *h != handle);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}

/// Frame scheduler on a `calloop` event loop.
///
/// Each frame is a one-shot timer `interval` in the future; when it fires the
/// loop's shared data receives it through [`FrameSink::on_frame`].
pub struct LoopScheduler<D> {
    handle: LoopHandle<'static, D>,
    interval: Duration,
    origin: Instant,
    next_id: u64,
    tokens: Rc<RefCell<HashMap<u64, RegistrationToken>>>,
    _data: PhantomData<fn(&mut D)>,
}

impl<D: FrameSink + 'static> LoopScheduler<D> {
    pub fn new(handle: LoopHandle<'static, D>, interval: Duration) -> Self {
        Self {
            handle,
            interval,
            origin: Instant::now(),
            next_id: 1,
            tokens: Rc::new(RefCell::new(HashMap::new())),
            _data: PhantomData,
        }
    }

    /// Milliseconds since this scheduler was created, on the same clock as
    /// delivered frame timestamps
    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    /// Timers registered and not yet fired
    pub fn pending_count(&self) -> usize {
        self.tokens.borrow().len()
    }
}

impl<D: FrameSink + 'static> FrameScheduler for LoopScheduler<D> {
    fn schedule(&mut self) -> Option<FrameHandle> {
        let id = self.next_id;
        self.next_id += 1;
        let handle = FrameHandle(id);

        let tokens = Rc::clone(&self.tokens);
        let origin = self.origin;
        let timer = Timer::from_duration(self.interval);
        let inserted = self
            .handle
            .insert_source(timer, move |deadline, _, data: &mut D| {
                tokens.borrow_mut().remove(&id);
                let timestamp_ms = deadline.saturating_duration_since(origin).as_secs_f64() * 1000.0;
                data.on_frame(Frame {
                    handle,
                    timestamp_ms,
                });
                TimeoutAction::Drop
            });

        match inserted {
            Ok(token) => {
                self.tokens.borrow_mut().insert(id, token);
                Some(handle)
            }
            Err(err) => {
                log::error!("Failed to schedule frame timer: {}", err.error);
                None
            }
        }
    }

    fn cancel(&mut self, handle: FrameHandle) {
        let token = self.tokens.borrow_mut().remove(&handle.id());
        if let Some(token) = token {
            self.handle.remove(token);
        }
    }
}
