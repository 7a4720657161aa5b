use crate::braille::BrailleSurface;
use crate::scheduler::{FrameLoop, Timeout};
use crate::simulation::{ParticleField, Viewport};
use crate::typewriter::Typewriter;
use log::{debug, info};
use std::time::{Duration, Instant};

/// Signals delivered by the host environment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The viewport changed size (logical pixels)
    Resize(Viewport),
    /// The pointer moved to (x, y) in pointer coordinates
    PointerMove { x: f64, y: f64 },
}

/// Which host signals the component is currently subscribed to
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Listeners {
    pub resize: bool,
    pub pointer_move: bool,
}

/// Main application state: the particle field plus its lifecycle
pub struct App {
    pub field: ParticleField,
    pub surface: BrailleSurface,
    pub frames: FrameLoop,
    pub typewriter: Typewriter,
    typewriter_timeout: Timeout,
    listeners: Listeners,
    /// Set once the field has a canvas to draw on
    pub mounted: bool,
    pub paused: bool,
    pub fullscreen_mode: bool,
    pub show_help: bool,
    pub frame_count: u64,
}

impl App {
    pub fn new(field: ParticleField, typewriter: Typewriter, fps: u32) -> Self {
        Self {
            field,
            surface: BrailleSurface::default(),
            frames: FrameLoop::new(fps),
            typewriter,
            typewriter_timeout: Timeout::default(),
            listeners: Listeners::default(),
            mounted: false,
            paused: false,
            fullscreen_mode: false,
            show_help: false,
            frame_count: 0,
        }
    }

    /// Start the component: build the field, kick off the frame loop and
    /// the typewriter, then subscribe to host signals.
    ///
    /// A viewport with no area means there is no canvas yet; the field
    /// stays empty until a resize provides one.
    pub fn mount(&mut self, viewport: Viewport, now: Instant) {
        if has_area(viewport) {
            self.init_canvas(viewport);
        } else {
            debug!("No canvas area at startup, waiting for a resize");
        }
        self.frames.request_frame(now);
        self.type_next(now);
        self.listeners = Listeners {
            resize: true,
            pointer_move: true,
        };
        info!(
            "Mounted with {} particles (staticity {}, ease {})",
            self.field.settings.quantity, self.field.settings.staticity, self.field.settings.ease
        );
    }

    fn init_canvas(&mut self, viewport: Viewport) {
        self.field.init_canvas(&mut self.surface, viewport);
        self.mounted = true;
    }

    /// Dispatch a host signal. Signals without a listener are dropped.
    pub fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::Resize(viewport) if self.listeners.resize => {
                if has_area(viewport) {
                    debug!("Resize to {}x{}", viewport.width, viewport.height);
                    self.init_canvas(viewport);
                }
            }
            HostEvent::PointerMove { x, y } if self.listeners.pointer_move => {
                self.field.on_pointer_move(x, y);
            }
            _ => {}
        }
    }

    /// Run whatever is due: the typewriter step and the animation frame.
    /// Returns true if a frame was drawn.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.typewriter_timeout.take_expired(now) {
            self.type_next(now);
        }

        if !self.frames.take_due(now) {
            return false;
        }
        if self.mounted {
            self.field.animate(&mut self.surface);
            self.frame_count += 1;
        }
        self.frames.request_frame(now);
        true
    }

    fn type_next(&mut self, now: Instant) {
        if let Some(delay) = self.typewriter.step() {
            self.typewriter_timeout.set(now, delay);
        }
    }

    /// How long the host may sleep before something is due
    pub fn next_wakeup(&self, now: Instant) -> Duration {
        let frame = self.frames.time_until_due(now);
        let typing = self.typewriter_timeout.time_until_expiry(now);
        match (frame, typing) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => self.frames.interval(),
        }
    }

    /// Toggle pause state. Pausing drops the pending frame.
    pub fn toggle_pause(&mut self, now: Instant) {
        if self.frames.is_cancelled() {
            return;
        }
        self.paused = !self.paused;
        if self.paused {
            self.frames.suspend();
        } else {
            self.frames.request_frame(now);
        }
    }

    /// Rebuild the field at its current size
    pub fn reset(&mut self) {
        if self.mounted {
            let viewport = Viewport {
                width: self.field.canvas_size.w,
                height: self.field.canvas_size.h,
            };
            self.init_canvas(viewport);
        }
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen_mode = !self.fullscreen_mode;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Stop everything the component started. Safe to call twice.
    pub fn teardown(&mut self) {
        self.typewriter_timeout.clear();
        self.listeners = Listeners::default();
        self.frames.cancel();
        info!("Torn down after {} frames", self.frame_count);
    }

    pub fn listeners(&self) -> Listeners {
        self.listeners
    }
}

fn has_area(viewport: Viewport) -> bool {
    viewport.width > 0.0 && viewport.height > 0.0
}
