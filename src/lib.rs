pub mod animation;
pub mod apps;
pub mod carousel;
pub mod config;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod scheduler;
pub mod scroll;
pub mod transform;

use std::time::Duration;

use calloop::channel::{self, Channel, Sender};
use calloop::{EventLoop, LoopSignal};

use apps::{default_apps, LauncherApp};
use carousel::{Carousel, CarouselEvent};
use config::CarouselConfig;
use input::Event;
use layout::{StripConfig, StripLayout};
use scheduler::{Frame, FrameSink, LoopScheduler};

pub mod prelude {
    pub use crate::animation::{Transition, TimingFunction};
    pub use crate::apps::{default_apps, LauncherApp};
    pub use crate::carousel::{Carousel, CarouselEvent, CenterItem};
    pub use crate::config::{CarouselConfig, KeyBindings};
    pub use crate::geometry::Rect;
    pub use crate::input::{Event, EventResponse, InputSource, Key, ScriptedInput};
    pub use crate::layout::{LayoutProvider, ScrollSurface, StripConfig, StripLayout};
    pub use crate::scheduler::{FrameScheduler, VirtualScheduler};
    pub use crate::{Launcher, LauncherError};
}

#[derive(Debug, thiserror::Error)]
pub enum LauncherError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] calloop::Error),
    #[error("failed to register input channel: {0}")]
    InputSource(calloop::Error),
}

/// Shared data of the launcher's event loop
pub struct LauncherState {
    pub carousel: Carousel<StripLayout, LoopScheduler<LauncherState>>,
    signal: LoopSignal,
}

impl FrameSink for LauncherState {
    fn on_frame(&mut self, frame: Frame) {
        self.carousel.on_frame(frame);
    }
}

/// Runs a carousel on a `calloop` event loop.
///
/// Key events arrive through [`sender`](Self::sender); the loop exits once
/// every sender has been dropped.
pub struct Launcher {
    config: CarouselConfig,
    strip: StripConfig,
    apps: Vec<LauncherApp>,
    listener: Option<Box<dyn FnMut(CarouselEvent)>>,
    sender: Sender<Event>,
    channel: Channel<Event>,
}

impl Launcher {
    pub fn new() -> Self {
        Self::with_config(CarouselConfig::default())
    }

    pub fn with_config(config: CarouselConfig) -> Self {
        let (sender, channel) = channel::channel();
        Self {
            config,
            strip: StripConfig::default(),
            apps: default_apps(),
            listener: None,
            sender,
            channel,
        }
    }

    pub fn strip(mut self, strip: StripConfig) -> Self {
        self.strip = strip;
        self
    }

    pub fn apps(mut self, apps: Vec<LauncherApp>) -> Self {
        self.apps = apps;
        self
    }

    /// Receive press-mode and center-change notifications, e.g. to report
    /// the current index to another process.
    pub fn on_event<F: FnMut(CarouselEvent) + 'static>(mut self, listener: F) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Handle for the window system to push key events into
    pub fn sender(&self) -> Sender<Event> {
        self.sender.clone()
    }

    pub fn app_list(&self) -> &[LauncherApp] {
        &self.apps
    }

    pub fn run(self) -> Result<(), LauncherError> {
        // Ignore the error when a logger is already installed
        let _ = env_logger::try_init();

        let Launcher {
            config,
            strip,
            apps,
            listener,
            sender,
            channel,
        } = self;
        // Only external senders keep the loop alive
        drop(sender);

        let mut event_loop: EventLoop<'static, LauncherState> = EventLoop::try_new()?;
        let handle = event_loop.handle();

        let interval = Duration::from_millis(config.frame_interval_ms);
        let scheduler = LoopScheduler::new(handle.clone(), interval);
        let surface = StripLayout::new(strip, apps.len());
        let mut carousel = Carousel::new(surface, scheduler, config);
        if let Some(listener) = listener {
            carousel.set_listener(listener);
        }

        handle
            .insert_source(channel, |event, _, state: &mut LauncherState| match event {
                channel::Event::Msg(event) => {
                    state.carousel.handle_event(&event);
                }
                channel::Event::Closed => {
                    log::info!("Input channel closed, stopping launcher");
                    state.signal.stop();
                }
            })
            .map_err(|err| LauncherError::InputSource(err.error))?;

        let mut state = LauncherState {
            carousel,
            signal: event_loop.get_signal(),
        };

        log::info!("Launcher running with {} apps", apps.len());
        let now = state.carousel.scheduler().now_ms();
        state.carousel.mount(now);

        event_loop.run(None, &mut state, |_| {})?;

        state.carousel.unmount();
        Ok(())
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new()
    }
}
