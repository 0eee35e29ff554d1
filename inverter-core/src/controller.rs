//! Clock display controller
//!
//! The controller is the whole application: it owns every UI object it
//! creates on the host, formats the label once per tick and restarts the
//! inverting sweep. The host is injected into each operation, so the
//! controller can be driven by a mock host in tests.
//!
//! Lifecycle:
//! - [`ClockController::activate`] creates the window, label, optional
//!   inverter layer and sweep animation, then subscribes to ticks
//! - [`ClockController::on_tick`] updates the label and restarts the sweep
//! - [`ClockController::deactivate`] unsubscribes and releases objects
//!   according to the [`TeardownPolicy`]

use inverter_hal::{
    AnimationId, FrameAnimation, HostError, HostEvent, HostServices, LayerId, LocalTime,
    WindowId,
};

use crate::config::{ClockConfig, RestartPolicy, TeardownPolicy};
use crate::state::{Event, State};
use crate::time::{format_time, TimeText};

/// Errors returned by controller operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerError {
    /// A host service failed
    Host(HostError),
    /// `activate` called while already active
    AlreadyActive,
    /// Operation requires an active controller
    NotActive,
}

impl From<HostError> for ControllerError {
    fn from(e: HostError) -> Self {
        ControllerError::Host(e)
    }
}

/// Handles of the sweep overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SweepHandles {
    /// Inverter layer
    pub layer: LayerId,
    /// Frame animation moving `layer`
    pub animation: AnimationId,
}

/// Handles of every object created by `activate`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Handles {
    /// Application window
    pub window: WindowId,
    /// Time label
    pub label: LayerId,
    /// Sweep overlay, if configured
    pub sweep: Option<SweepHandles>,
}

/// Objects created so far during setup, released if a later step fails
#[derive(Default)]
struct Setup {
    window: Option<WindowId>,
    label: Option<LayerId>,
    inverter: Option<LayerId>,
    animation: Option<AnimationId>,
}

impl Setup {
    /// Destroy in reverse creation order; failures are ignored
    fn rollback<H: HostServices>(self, host: &mut H) {
        if let Some(animation) = self.animation {
            let _ = host.animation_destroy(animation);
        }
        if let Some(layer) = self.inverter {
            let _ = host.inverter_layer_destroy(layer);
        }
        if let Some(layer) = self.label {
            let _ = host.text_layer_destroy(layer);
        }
        if let Some(window) = self.window {
            let _ = host.window_destroy(window);
        }
    }
}

/// Application context of the watchapp
pub struct ClockController {
    config: ClockConfig,
    state: State,
    handles: Option<Handles>,
    /// Label text, overwritten in place on each tick
    text: TimeText,
}

impl ClockController {
    /// Create an inactive controller
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            state: State::Uninitialized,
            handles: None,
            text: TimeText::new(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Get the current lifecycle state
    pub fn state(&self) -> State {
        self.state
    }

    /// Get the handles of live objects (`None` while inactive)
    pub fn handles(&self) -> Option<&Handles> {
        self.handles.as_ref()
    }

    /// Text last pushed to the label (empty before the first tick)
    pub fn label(&self) -> &str {
        self.text.as_str()
    }

    /// Create the UI and subscribe to ticks
    ///
    /// On failure everything created so far is destroyed again and the
    /// controller stays inactive.
    pub fn activate<H: HostServices>(&mut self, host: &mut H) -> Result<(), ControllerError> {
        if self.handles.is_some() {
            return Err(ControllerError::AlreadyActive);
        }

        let mut setup = Setup::default();
        match self.build(host, &mut setup) {
            Ok(handles) => {
                self.handles = Some(handles);
                self.text.clear();
                self.state = self.state.transition(Event::Activated);
                Ok(())
            }
            Err(e) => {
                setup.rollback(host);
                Err(e)
            }
        }
    }

    fn build<H: HostServices>(
        &self,
        host: &mut H,
        setup: &mut Setup,
    ) -> Result<Handles, ControllerError> {
        let layout = &self.config.layout;

        let window = host.window_create()?;
        setup.window = Some(window);
        host.window_push(window, true)?;
        host.window_set_background(window, layout.background)?;
        let root = host.window_root_layer(window)?;

        let label = host.text_layer_create(layout.label_frame)?;
        setup.label = Some(label);
        host.text_layer_set_style(label, &layout.label_style)?;
        host.layer_add_child(root, label)?;

        let sweep = match self.config.sweep {
            Some(sweep) => {
                let (from, to) = sweep.frames(layout.screen);

                let layer = host.inverter_layer_create(from)?;
                setup.inverter = Some(layer);
                host.layer_add_child(root, layer)?;

                let animation = host.frame_animation_create(&FrameAnimation {
                    layer,
                    from,
                    to,
                    duration_ms: sweep.duration_ms,
                    curve: sweep.curve,
                })?;
                setup.animation = Some(animation);

                Some(SweepHandles { layer, animation })
            }
            None => None,
        };

        host.tick_subscribe(self.config.tick_unit)?;

        Ok(Handles {
            window,
            label,
            sweep,
        })
    }

    /// Handle a tick: update the label and restart the sweep
    pub fn on_tick<H: HostServices>(
        &mut self,
        host: &mut H,
        time: &LocalTime,
    ) -> Result<(), ControllerError> {
        let handles = self.handles.ok_or(ControllerError::NotActive)?;

        format_time(time, &mut self.text);
        host.text_layer_set_text(handles.label, &self.text)?;

        if let (Some(overlay), Some(sweep)) = (handles.sweep, self.config.sweep) {
            if sweep.restart == RestartPolicy::CancelThenRestart {
                host.animation_unschedule(overlay.animation)?;
                self.state = self.state.transition(Event::SweepStopped);
            }
            host.animation_schedule(overlay.animation)?;
            self.state = self.state.transition(Event::SweepStarted);
        }

        Ok(())
    }

    /// Handle an animation stop report
    ///
    /// Reports for other animations, and stale reports for a run that has
    /// already been restarted, are ignored.
    pub fn on_animation_stopped<H: HostServices>(
        &mut self,
        host: &mut H,
        animation: AnimationId,
    ) -> Result<(), ControllerError> {
        let Some(overlay) = self.handles.and_then(|h| h.sweep) else {
            return Ok(());
        };

        if overlay.animation == animation && !host.animation_is_scheduled(animation) {
            self.state = self.state.transition(Event::SweepStopped);
        }

        Ok(())
    }

    /// Dispatch a host event to the matching handler
    pub fn handle_event<H: HostServices>(
        &mut self,
        host: &mut H,
        event: HostEvent,
    ) -> Result<(), ControllerError> {
        match event {
            HostEvent::Tick { time, .. } => self.on_tick(host, &time),
            HostEvent::AnimationStopped { animation, .. } => {
                self.on_animation_stopped(host, animation)
            }
        }
    }

    /// Unsubscribe from ticks and release UI objects
    ///
    /// Every release step is attempted even if an earlier one fails; the
    /// first failure is returned afterwards. The controller ends up inactive
    /// either way.
    pub fn deactivate<H: HostServices>(&mut self, host: &mut H) -> Result<(), ControllerError> {
        let handles = self.handles.take().ok_or(ControllerError::NotActive)?;
        self.state = self.state.transition(Event::Deactivated);

        let mut first_error = host.tick_unsubscribe().err();
        let mut record = |result: Result<(), HostError>| {
            if let Err(e) = result {
                first_error.get_or_insert(e);
            }
        };

        match self.config.teardown {
            TeardownPolicy::Full => {
                if let Some(overlay) = handles.sweep {
                    if host.animation_is_scheduled(overlay.animation) {
                        record(host.animation_unschedule(overlay.animation));
                    }
                    record(host.animation_destroy(overlay.animation));
                    record(host.inverter_layer_destroy(overlay.layer));
                }
                record(host.text_layer_destroy(handles.label));
                record(host.window_destroy(handles.window));
            }
            TeardownPolicy::TimerOnly => {}
        }

        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}
