//! Software host
//!
//! [`SoftHost`] implements every host service on top of a [`Scene`], an
//! [`Animator`] and a [`Framebuffer`]. Its event loop is frame paced: each
//! frame advances animations, checks the wall clock against the tick
//! subscription, and re-renders when something visible changed.

use heapless::Deque;
use inverter_hal::{
    AnimationId, AnimationService, Color, EventLoop, FrameAnimation, HostError, HostEvent,
    InverterLayerService, LayerId, LayerService, LocalTime, Rect, TextLayerService, TextStyle,
    TickService, TimeUnits, WindowId, WindowService,
};

use crate::animator::Animator;
use crate::framebuffer::Framebuffer;
use crate::platform::Platform;
use crate::render::render;
use crate::scene::{LayerKind, Scene};

/// Pending events; the oldest is dropped on overflow
pub const EVENT_QUEUE_LEN: usize = 8;

/// Host implementation shared by every board
pub struct SoftHost<P: Platform> {
    platform: P,
    scene: Scene,
    animator: Animator,
    framebuffer: Framebuffer,
    subscription: Option<TimeUnits>,
    last_time: Option<LocalTime>,
    now_ms: u32,
    events: Deque<HostEvent, EVENT_QUEUE_LEN>,
}

impl<P: Platform> SoftHost<P> {
    /// Create a host with an empty scene
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            scene: Scene::new(Framebuffer::bounds()),
            animator: Animator::new(),
            framebuffer: Framebuffer::new(),
            subscription: None,
            last_time: None,
            now_ms: 0,
            events: Deque::new(),
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Last rendered frame
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Time of the last frame
    pub fn now_ms(&self) -> u32 {
        self.now_ms
    }

    fn queue(&mut self, event: HostEvent) {
        if self.events.is_full() {
            self.events.pop_front();
        }
        let _ = self.events.push_back(event);
    }

    /// Advance the host to `now_ms`
    fn step(&mut self, now_ms: u32) {
        self.now_ms = now_ms;

        if !self.animator.is_idle() {
            for step in self.animator.advance(now_ms) {
                let moved = self
                    .scene
                    .layer(step.layer)
                    .is_ok_and(|layer| layer.frame != step.frame);
                if moved {
                    if let Ok(layer) = self.scene.layer_mut(step.layer) {
                        layer.frame = step.frame;
                    }
                }
                if step.finished {
                    self.queue(HostEvent::AnimationStopped {
                        animation: step.animation,
                        finished: true,
                    });
                }
            }
        }

        if let Some(unit) = self.subscription {
            let time = self.platform.local_time();
            if let Some(previous) = self.last_time.replace(time) {
                let changed = time.changed_since(&previous);
                if changed.triggers(unit) {
                    self.queue(HostEvent::Tick { time, changed });
                }
            }
        }
    }
}

impl<P: Platform> WindowService for SoftHost<P> {
    fn window_create(&mut self) -> Result<WindowId, HostError> {
        self.scene.create_window()
    }

    fn window_push(&mut self, window: WindowId, _animated: bool) -> Result<(), HostError> {
        // No slide-in transition; the window appears on the next frame
        self.scene.push_window(window)
    }

    fn window_set_background(&mut self, window: WindowId, color: Color) -> Result<(), HostError> {
        self.scene.set_background(window, color)
    }

    fn window_root_layer(&self, window: WindowId) -> Result<LayerId, HostError> {
        self.scene.root_layer(window)
    }

    fn window_destroy(&mut self, window: WindowId) -> Result<(), HostError> {
        self.scene.destroy_window(window)
    }
}

impl<P: Platform> LayerService for SoftHost<P> {
    fn layer_add_child(&mut self, parent: LayerId, child: LayerId) -> Result<(), HostError> {
        self.scene.add_child(parent, child)
    }

    fn layer_frame(&self, layer: LayerId) -> Result<Rect, HostError> {
        Ok(self.scene.layer(layer)?.frame)
    }

    fn layer_set_frame(&mut self, layer: LayerId, frame: Rect) -> Result<(), HostError> {
        self.scene.layer_mut(layer)?.frame = frame;
        Ok(())
    }
}

impl<P: Platform> TextLayerService for SoftHost<P> {
    fn text_layer_create(&mut self, frame: Rect) -> Result<LayerId, HostError> {
        self.scene.create_layer(
            frame,
            LayerKind::Text {
                style: TextStyle::default(),
                text: heapless::String::new(),
            },
        )
    }

    fn text_layer_set_style(
        &mut self,
        layer: LayerId,
        style: &TextStyle,
    ) -> Result<(), HostError> {
        match &mut self.scene.layer_mut(layer)?.kind {
            LayerKind::Text { style: current, .. } => {
                *current = *style;
                Ok(())
            }
            _ => Err(HostError::WrongLayerKind),
        }
    }

    fn text_layer_set_text(&mut self, layer: LayerId, text: &str) -> Result<(), HostError> {
        match &mut self.scene.layer_mut(layer)?.kind {
            LayerKind::Text { text: current, .. } => {
                current.clear();
                current
                    .push_str(text)
                    .map_err(|_| HostError::OutOfResources)
            }
            _ => Err(HostError::WrongLayerKind),
        }
    }

    fn text_layer_destroy(&mut self, layer: LayerId) -> Result<(), HostError> {
        self.scene
            .destroy_layer(layer, |kind| matches!(kind, LayerKind::Text { .. }))
    }
}

impl<P: Platform> InverterLayerService for SoftHost<P> {
    fn inverter_layer_create(&mut self, frame: Rect) -> Result<LayerId, HostError> {
        self.scene.create_layer(frame, LayerKind::Inverter)
    }

    fn inverter_layer_destroy(&mut self, layer: LayerId) -> Result<(), HostError> {
        self.scene
            .destroy_layer(layer, |kind| matches!(kind, LayerKind::Inverter))
    }
}

impl<P: Platform> AnimationService for SoftHost<P> {
    fn frame_animation_create(&mut self, params: &FrameAnimation) -> Result<AnimationId, HostError> {
        self.scene.layer(params.layer)?;
        self.animator.create(params)
    }

    fn animation_schedule(&mut self, animation: AnimationId) -> Result<(), HostError> {
        let params = *self.animator.params(animation)?;
        self.scene.layer_mut(params.layer)?.frame = params.from;
        self.animator.schedule(animation, self.now_ms)
    }

    fn animation_unschedule(&mut self, animation: AnimationId) -> Result<(), HostError> {
        if self.animator.unschedule(animation)? {
            self.queue(HostEvent::AnimationStopped {
                animation,
                finished: false,
            });
        }
        Ok(())
    }

    fn animation_is_scheduled(&self, animation: AnimationId) -> bool {
        self.animator.is_scheduled(animation)
    }

    /// Destroying a running animation stops it without a stop report
    fn animation_destroy(&mut self, animation: AnimationId) -> Result<(), HostError> {
        self.animator.destroy(animation).map(|_| ())
    }
}

impl<P: Platform> TickService for SoftHost<P> {
    fn tick_subscribe(&mut self, unit: TimeUnits) -> Result<(), HostError> {
        if self.subscription.is_some() {
            return Err(HostError::AlreadySubscribed);
        }
        self.subscription = Some(unit);
        self.last_time = None;
        Ok(())
    }

    fn tick_unsubscribe(&mut self) -> Result<(), HostError> {
        self.subscription.take().ok_or(HostError::NotSubscribed)?;
        self.last_time = None;
        Ok(())
    }
}

impl<P: Platform> EventLoop for SoftHost<P> {
    async fn next_event(&mut self) -> Option<HostEvent> {
        loop {
            if let Some(event) = self.events.pop_front() {
                return Some(event);
            }

            let now_ms = self.platform.next_frame().await?;
            self.step(now_ms);

            if self.scene.take_dirty() {
                render(&self.scene, &mut self.framebuffer);
                self.platform.present(&self.framebuffer).await;
            }
        }
    }
}
