//! The pointer sensor state machine and the consumer callback trait.

use crate::click::{ClickBlocker, ClickGuard};
use crate::error::{Error, Result};
use crate::event::{EventType, PointerEvent, Position};
use crate::options::SensorOptions;
use crate::schedule::{FrameScheduler, MovementScheduler};
use crate::state::CaptureMarshal;
use crate::window::{BindOptions, Binding, EventChannel, WindowChannel, window_bindings};
use std::fmt;

/// How the consumer should animate the dragged item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementMode {
    /// Follow the pointer continuously.
    Fluid,
}

/// Arguments passed to [`SensorCallbacks::on_lift`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiftArgs {
    /// Client position of the move that started the drag.
    pub client_selection: Position,
    /// Movement mode; pointer drags are always [`MovementMode::Fluid`].
    pub movement_mode: MovementMode,
}

/// Callbacks into the drag pipeline hosting a sensor.
///
/// All methods run synchronously inside the sensor's event handling, after
/// the sensor has finished its own transition.
pub trait SensorCallbacks {
    /// Decide whether a pointer-down may start a gesture.
    ///
    /// Evaluated on every unclaimed pointer-down before any state changes.
    fn can_start_capturing(&mut self, event: &PointerEvent) -> bool;

    /// A pending gesture moved far enough to become a drag.
    fn on_lift(&mut self, args: LiftArgs);

    /// Coalesced drag movement, at most once per frame.
    fn on_move(&mut self, _point: Position) {}

    /// The drag ended with a pointer release.
    fn on_drop(&mut self);

    /// The gesture was terminated externally.
    fn on_cancel(&mut self);
}

/// Current gesture state of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SensorState {
    /// No gesture is pending or active.
    #[default]
    Idle,
    /// A pointer-down was claimed; waiting for movement or release.
    Pending {
        /// Screen position of the pointer-down.
        origin: Position,
    },
    /// The movement threshold was reached and the consumer was told.
    Dragging,
}

/// Result of offering a pointer-down to a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerDownOutcome {
    /// The sensor claimed the gesture and is now pending.
    Captured,
    /// Another sensor already claimed this pointer-down.
    AlreadyHandled,
    /// The consumer refused to start capturing.
    Declined,
    /// The pointer-down came from a non-primary pointer.
    Ignored,
}

enum Teardown {
    Unbind,
    Keep,
}

/// Recognizes drags from raw pointer events.
///
/// The host forwards pointer-downs on its element to
/// [`on_pointer_down`](Self::on_pointer_down), routes window events arriving
/// through the bound listeners to
/// [`handle_window_event`](Self::handle_window_event), and calls
/// [`on_frame`](Self::on_frame) once per animation frame.
///
/// Dropping a sensor tears down any gesture silently, like [`kill`](Self::kill).
pub struct PointerSensor<C, W = EventChannel, G = ClickBlocker, S = FrameScheduler>
where
    C: SensorCallbacks,
    W: WindowChannel,
    G: ClickGuard,
    S: MovementScheduler,
{
    callbacks: C,
    window: W,
    click_guard: G,
    scheduler: S,
    marshal: CaptureMarshal,
    options: SensorOptions,
    bindings: Vec<Binding>,
    state: SensorState,
    bound: bool,
}

impl<C: SensorCallbacks> PointerSensor<C> {
    /// Create a sensor with default options and collaborators, sharing the
    /// process-wide [`CaptureMarshal`].
    pub fn new(callbacks: C) -> Self {
        Self::assemble(
            callbacks,
            EventChannel::new(),
            ClickBlocker::new(),
            FrameScheduler::new(),
            SensorOptions::default(),
        )
    }

    /// Create a sensor with custom options and default collaborators.
    pub fn with_options(callbacks: C, options: SensorOptions) -> Result<Self> {
        Self::from_parts(
            callbacks,
            EventChannel::new(),
            ClickBlocker::new(),
            FrameScheduler::new(),
            options,
        )
    }
}

impl<C, W, G, S> PointerSensor<C, W, G, S>
where
    C: SensorCallbacks,
    W: WindowChannel,
    G: ClickGuard,
    S: MovementScheduler,
{
    /// Create a sensor from explicit collaborators.
    pub fn from_parts(
        callbacks: C,
        window: W,
        click_guard: G,
        scheduler: S,
        options: SensorOptions,
    ) -> Result<Self> {
        options.validate()?;
        Ok(Self::assemble(
            callbacks,
            window,
            click_guard,
            scheduler,
            options,
        ))
    }

    fn assemble(
        callbacks: C,
        window: W,
        click_guard: G,
        scheduler: S,
        options: SensorOptions,
    ) -> Self {
        let bindings = window_bindings(options.visibility_event);
        Self {
            callbacks,
            window,
            click_guard,
            scheduler,
            marshal: CaptureMarshal::global(),
            options,
            bindings,
            state: SensorState::Idle,
            bound: false,
        }
    }

    /// Use a different claim marshal. Sensors that must not double-handle a
    /// pointer-down have to share one.
    ///
    /// Any gesture in progress is killed first so the old claim is released.
    pub fn with_marshal(mut self, marshal: CaptureMarshal) -> Self {
        self.teardown();
        self.marshal = marshal;
        self
    }

    /// Offer a pointer-down from the hosting element.
    ///
    /// Returns [`Error::AlreadyCapturing`] if a gesture is already pending or
    /// dragging; that is a routing bug in the host and nothing changes.
    pub fn on_pointer_down(&mut self, event: &mut PointerEvent) -> Result<PointerDownOutcome> {
        if self.is_capturing() {
            return Err(Error::AlreadyCapturing);
        }
        if !event.is_primary {
            return Ok(PointerDownOutcome::Ignored);
        }
        if !event.screen.is_finite() {
            log::warn!("pointer-down at non-finite screen position, ignoring");
            return Ok(PointerDownOutcome::Ignored);
        }
        if self.marshal.is_claimed() {
            log::trace!("pointer-down already handled by another sensor");
            return Ok(PointerDownOutcome::AlreadyHandled);
        }
        if !self.callbacks.can_start_capturing(event) {
            return Ok(PointerDownOutcome::Declined);
        }

        self.marshal.try_claim()?;
        // Keeps the press from moving focus or starting a native drag.
        event.prevent_default();
        self.start_pending(event.screen);
        Ok(PointerDownOutcome::Captured)
    }

    /// Handle an event delivered through the bound window listeners.
    pub fn handle_window_event(&mut self, event: &mut PointerEvent) {
        match event.event_type {
            EventType::PointerMove => {
                suppress(event);
                self.on_window_move(event);
            }
            EventType::PointerUp => {
                suppress(event);
                self.on_window_up(event);
            }
            EventType::MouseMove | EventType::LostPointerCapture => suppress(event),
            EventType::VisibilityChange => self.on_visibility_change(),
            EventType::PointerDown | EventType::Click => {
                log::warn!(
                    "{} is not a window listener event, ignoring",
                    event.event_type.name()
                );
            }
        }
    }

    /// Deliver the movement scheduled since the last frame, if any.
    pub fn on_frame(&mut self) {
        if self.state != SensorState::Dragging {
            return;
        }
        if let Some(point) = self.scheduler.take() {
            self.callbacks.on_move(point);
        }
    }

    /// Hard stop without notifying the consumer.
    ///
    /// A pending gesture is abandoned; a drag is stopped and the following
    /// click suppressed. Does nothing while idle.
    pub fn kill(&mut self) {
        self.kill_inner(None::<fn(&mut C)>);
    }

    /// Hard stop, calling `on_stopped` if a drag was in progress.
    pub fn kill_with<F>(&mut self, on_stopped: F)
    where
        F: FnOnce(&mut C),
    {
        self.kill_inner(Some(on_stopped));
    }

    fn kill_inner<F>(&mut self, on_stopped: Option<F>)
    where
        F: FnOnce(&mut C),
    {
        match self.state {
            SensorState::Idle => {}
            SensorState::Pending { .. } => self.abandon_pending(Teardown::Unbind),
            SensorState::Dragging => {
                self.stop_dragging(Teardown::Unbind);
                if let Some(on_stopped) = on_stopped {
                    on_stopped(&mut self.callbacks);
                }
            }
        }
    }

    /// Forced termination, reported to the consumer through `on_cancel`.
    pub fn cancel(&mut self) {
        match self.state {
            SensorState::Idle => return,
            SensorState::Pending { .. } => self.abandon_pending(Teardown::Unbind),
            SensorState::Dragging => self.stop_dragging(Teardown::Unbind),
        }
        log::debug!("gesture cancelled");
        self.callbacks.on_cancel();
    }

    /// Stop any gesture, drop retained listeners and release the click guard.
    pub fn unmount(mut self) {
        self.teardown();
        self.click_guard.abort();
    }

    /// Current state.
    pub fn state(&self) -> SensorState {
        self.state
    }

    /// Check whether a drag is in progress.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.state == SensorState::Dragging
    }

    /// Check whether a gesture is pending or dragging.
    #[inline]
    pub fn is_capturing(&self) -> bool {
        self.state != SensorState::Idle
    }

    /// Check whether the window listener set is bound.
    pub fn has_window_bindings(&self) -> bool {
        self.bound
    }

    /// The consumer callbacks.
    pub fn callbacks(&self) -> &C {
        &self.callbacks
    }

    /// Mutable access to the consumer callbacks.
    pub fn callbacks_mut(&mut self) -> &mut C {
        &mut self.callbacks
    }

    /// The window channel.
    pub fn window(&self) -> &W {
        &self.window
    }

    /// The click guard.
    pub fn click_guard(&self) -> &G {
        &self.click_guard
    }

    /// Mutable access to the click guard, for filtering clicks.
    pub fn click_guard_mut(&mut self) -> &mut G {
        &mut self.click_guard
    }

    /// The movement scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The claim marshal this sensor arbitrates through.
    pub fn marshal(&self) -> &CaptureMarshal {
        &self.marshal
    }

    /// The options this sensor was built with.
    pub fn options(&self) -> &SensorOptions {
        &self.options
    }

    fn on_window_move(&mut self, event: &PointerEvent) {
        // A NaN distance never reaches the threshold, and a NaN point must not
        // reach the consumer.
        if !event.has_finite_coordinates() {
            log::warn!("pointer move with non-finite coordinates, ignoring");
            return;
        }
        match self.state {
            SensorState::Idle => {}
            SensorState::Pending { origin } => {
                if event.screen.distance(origin) >= self.options.drag_threshold {
                    self.lift(event.client);
                }
            }
            SensorState::Dragging => {
                log::trace!("drag move to ({}, {})", event.client.x, event.client.y);
                self.scheduler.schedule(event.client);
            }
        }
    }

    fn on_window_up(&mut self, event: &PointerEvent) {
        if !event.is_primary && self.is_capturing() {
            let taps = self.marshal.record_secondary_tap();
            log::trace!("secondary pointer {} released ({taps} taps)", event.pointer_id);
        }

        let teardown = if event.is_primary {
            Teardown::Unbind
        } else {
            Teardown::Keep
        };

        match self.state {
            SensorState::Pending { .. } => self.abandon_pending(teardown),
            SensorState::Dragging => {
                self.stop_dragging(teardown);
                log::debug!("drag dropped");
                self.callbacks.on_drop();
            }
            SensorState::Idle => {
                if event.is_primary && self.bound {
                    log::debug!("primary pointer released, dropping retained listeners");
                    self.unbind();
                }
            }
        }
    }

    fn on_visibility_change(&mut self) {
        if self.is_capturing() {
            self.cancel();
        } else if self.bound {
            self.unbind();
        }
    }

    fn start_pending(&mut self, origin: Position) {
        log::debug!("gesture pending at ({}, {})", origin.x, origin.y);
        self.state = SensorState::Pending { origin };
        if !self.bound {
            self.window.bind(&self.bindings, self.bind_options());
            self.bound = true;
        }
    }

    fn lift(&mut self, client_selection: Position) {
        log::debug!(
            "drag lifted at ({}, {})",
            client_selection.x,
            client_selection.y
        );
        self.state = SensorState::Dragging;
        self.callbacks.on_lift(LiftArgs {
            client_selection,
            movement_mode: MovementMode::Fluid,
        });
    }

    fn abandon_pending(&mut self, teardown: Teardown) {
        log::debug!("pending gesture abandoned");
        self.marshal.release();
        if let Teardown::Unbind = teardown {
            self.unbind();
        }
        self.state = SensorState::Idle;
    }

    fn stop_dragging(&mut self, teardown: Teardown) {
        self.scheduler.cancel();
        self.marshal.release();
        if let Teardown::Unbind = teardown {
            self.unbind();
        }
        self.click_guard.prevent_next();
        self.state = SensorState::Idle;
    }

    fn unbind(&mut self) {
        if self.bound {
            self.window.unbind(&self.bindings, self.bind_options());
            self.bound = false;
        }
    }

    fn bind_options(&self) -> BindOptions {
        BindOptions {
            capture: self.options.capture,
            passive: false,
        }
    }

    fn teardown(&mut self) {
        self.kill();
        self.unbind();
    }
}

/// The sensor is the only consumer of window pointer events while bound.
fn suppress(event: &mut PointerEvent) {
    event.prevent_default();
    event.stop_propagation();
}

impl<C, W, G, S> Drop for PointerSensor<C, W, G, S>
where
    C: SensorCallbacks,
    W: WindowChannel,
    G: ClickGuard,
    S: MovementScheduler,
{
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<C, W, G, S> fmt::Debug for PointerSensor<C, W, G, S>
where
    C: SensorCallbacks,
    W: WindowChannel,
    G: ClickGuard,
    S: MovementScheduler,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerSensor")
            .field("state", &self.state)
            .field("bound", &self.bound)
            .field("marshal", &self.marshal)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
