//! Mock host for unit tests
//!
//! Records every mutating call, tracks live objects and running animations,
//! and replays a scripted event queue. Individual setup steps can be made to
//! fail to exercise rollback.

use heapless::{Deque, String, Vec};
use inverter_hal::{
    AnimationId, AnimationService, Color, EventLoop, FrameAnimation, HostError, HostEvent,
    InverterLayerService, LayerId, LayerService, Rect, TextLayerService, TextStyle, TickService,
    TimeUnits, WindowId, WindowService,
};

const MAX_WINDOWS: usize = 4;
const MAX_LAYERS: usize = 12;
const MAX_ANIMATIONS: usize = 4;

/// A recorded host call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    WindowCreate(WindowId),
    WindowPush(WindowId, bool),
    WindowSetBackground(WindowId, Color),
    WindowDestroy(WindowId),
    AddChild(LayerId, LayerId),
    SetFrame(LayerId, Rect),
    TextLayerCreate(LayerId, Rect),
    TextLayerSetStyle(LayerId, TextStyle),
    SetText(LayerId),
    TextLayerDestroy(LayerId),
    InverterLayerCreate(LayerId, Rect),
    InverterLayerDestroy(LayerId),
    AnimationCreate(AnimationId, u32),
    Schedule(AnimationId),
    Unschedule(AnimationId),
    AnimationDestroy(AnimationId),
    TickSubscribe(TimeUnits),
    TickUnsubscribe,
}

/// Host call forced to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    WindowCreate,
    SetText,
    TextLayerCreate,
    InverterLayerCreate,
    AnimationCreate,
    TickSubscribe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Root,
    Text,
    Inverter,
}

struct MockLayer {
    kind: Kind,
    frame: Rect,
    text: String<16>,
}

struct MockAnimation {
    params: FrameAnimation,
    running: bool,
}

pub struct MockHost {
    calls: Vec<Call, 256>,
    windows: [Option<LayerId>; MAX_WINDOWS],
    layers: [Option<MockLayer>; MAX_LAYERS],
    animations: [Option<MockAnimation>; MAX_ANIMATIONS],
    subscribed: Option<TimeUnits>,
    subscribe_count: usize,
    unsubscribe_count: usize,
    schedule_count: usize,
    unschedule_count: usize,
    overlapping: usize,
    fail: Option<FailPoint>,
    events: Deque<HostEvent, 16>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            windows: [None; MAX_WINDOWS],
            layers: core::array::from_fn(|_| None),
            animations: core::array::from_fn(|_| None),
            subscribed: None,
            subscribe_count: 0,
            unsubscribe_count: 0,
            schedule_count: 0,
            unschedule_count: 0,
            overlapping: 0,
            fail: None,
            events: Deque::new(),
        }
    }

    fn record(&mut self, call: Call) {
        let _ = self.calls.push(call);
    }

    fn should_fail(&self, point: FailPoint) -> bool {
        self.fail == Some(point)
    }

    fn alloc_layer(&mut self, kind: Kind, frame: Rect) -> Result<LayerId, HostError> {
        let index = self
            .layers
            .iter()
            .position(Option::is_none)
            .ok_or(HostError::OutOfResources)?;
        self.layers[index] = Some(MockLayer {
            kind,
            frame,
            text: String::new(),
        });
        Ok(LayerId::new(index as u8))
    }

    fn layer(&self, layer: LayerId) -> Result<&MockLayer, HostError> {
        self.layers
            .get(layer.raw() as usize)
            .and_then(Option::as_ref)
            .ok_or(HostError::InvalidHandle)
    }

    fn layer_mut(&mut self, layer: LayerId) -> Result<&mut MockLayer, HostError> {
        self.layers
            .get_mut(layer.raw() as usize)
            .and_then(Option::as_mut)
            .ok_or(HostError::InvalidHandle)
    }

    fn free_layer(&mut self, layer: LayerId, kind: Kind) -> Result<(), HostError> {
        if self.layer(layer)?.kind != kind {
            return Err(HostError::WrongLayerKind);
        }
        self.layers[layer.raw() as usize] = None;
        Ok(())
    }

    fn animation_mut(&mut self, animation: AnimationId) -> Result<&mut MockAnimation, HostError> {
        self.animations
            .get_mut(animation.raw() as usize)
            .and_then(Option::as_mut)
            .ok_or(HostError::InvalidHandle)
    }

    // Test controls and inspection

    pub fn fail_at(&mut self, point: FailPoint) {
        self.fail = Some(point);
    }

    pub fn push_event(&mut self, event: HostEvent) {
        let _ = self.events.push_back(event);
    }

    /// Let a running animation reach its end
    pub fn finish_animation(&mut self, animation: AnimationId) {
        if let Ok(a) = self.animation_mut(animation) {
            a.running = false;
        }
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn root_of(&self, window: WindowId) -> LayerId {
        self.windows[window.raw() as usize].unwrap()
    }

    pub fn text_of(&self, layer: LayerId) -> Option<&str> {
        self.layer(layer).ok().map(|l| l.text.as_str())
    }

    pub fn animation_params(&self, animation: AnimationId) -> Option<FrameAnimation> {
        self.animations[animation.raw() as usize]
            .as_ref()
            .map(|a| a.params)
    }

    pub fn live_windows(&self) -> usize {
        self.windows.iter().flatten().count()
    }

    /// Live layers, not counting window root layers
    pub fn live_layers(&self) -> usize {
        self.layers
            .iter()
            .flatten()
            .filter(|l| l.kind != Kind::Root)
            .count()
    }

    pub fn live_animations(&self) -> usize {
        self.animations.iter().flatten().count()
    }

    pub fn live_objects(&self) -> usize {
        self.live_windows() + self.live_layers() + self.live_animations()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed.is_some()
    }

    pub fn subscribe_count(&self) -> usize {
        self.subscribe_count
    }

    pub fn unsubscribe_count(&self) -> usize {
        self.unsubscribe_count
    }

    pub fn schedule_count(&self) -> usize {
        self.schedule_count
    }

    pub fn unschedule_count(&self) -> usize {
        self.unschedule_count
    }

    /// Schedules issued while the same animation was still running
    pub fn overlapping_schedules(&self) -> usize {
        self.overlapping
    }
}

impl WindowService for MockHost {
    fn window_create(&mut self) -> Result<WindowId, HostError> {
        if self.should_fail(FailPoint::WindowCreate) {
            return Err(HostError::OutOfResources);
        }
        let index = self
            .windows
            .iter()
            .position(Option::is_none)
            .ok_or(HostError::OutOfResources)?;
        let root = self.alloc_layer(Kind::Root, Rect::screen(144, 168))?;
        self.windows[index] = Some(root);
        let window = WindowId::new(index as u8);
        self.record(Call::WindowCreate(window));
        Ok(window)
    }

    fn window_push(&mut self, window: WindowId, animated: bool) -> Result<(), HostError> {
        self.window_root_layer(window)?;
        self.record(Call::WindowPush(window, animated));
        Ok(())
    }

    fn window_set_background(&mut self, window: WindowId, color: Color) -> Result<(), HostError> {
        self.window_root_layer(window)?;
        self.record(Call::WindowSetBackground(window, color));
        Ok(())
    }

    fn window_root_layer(&self, window: WindowId) -> Result<LayerId, HostError> {
        self.windows
            .get(window.raw() as usize)
            .copied()
            .flatten()
            .ok_or(HostError::InvalidHandle)
    }

    fn window_destroy(&mut self, window: WindowId) -> Result<(), HostError> {
        let root = self.window_root_layer(window)?;
        self.free_layer(root, Kind::Root)?;
        self.windows[window.raw() as usize] = None;
        self.record(Call::WindowDestroy(window));
        Ok(())
    }
}

impl LayerService for MockHost {
    fn layer_add_child(&mut self, parent: LayerId, child: LayerId) -> Result<(), HostError> {
        self.layer(parent)?;
        self.layer(child)?;
        self.record(Call::AddChild(parent, child));
        Ok(())
    }

    fn layer_frame(&self, layer: LayerId) -> Result<Rect, HostError> {
        Ok(self.layer(layer)?.frame)
    }

    fn layer_set_frame(&mut self, layer: LayerId, frame: Rect) -> Result<(), HostError> {
        self.layer_mut(layer)?.frame = frame;
        self.record(Call::SetFrame(layer, frame));
        Ok(())
    }
}

impl TextLayerService for MockHost {
    fn text_layer_create(&mut self, frame: Rect) -> Result<LayerId, HostError> {
        if self.should_fail(FailPoint::TextLayerCreate) {
            return Err(HostError::OutOfResources);
        }
        let layer = self.alloc_layer(Kind::Text, frame)?;
        self.record(Call::TextLayerCreate(layer, frame));
        Ok(layer)
    }

    fn text_layer_set_style(
        &mut self,
        layer: LayerId,
        style: &TextStyle,
    ) -> Result<(), HostError> {
        if self.layer(layer)?.kind != Kind::Text {
            return Err(HostError::WrongLayerKind);
        }
        self.record(Call::TextLayerSetStyle(layer, *style));
        Ok(())
    }

    fn text_layer_set_text(&mut self, layer: LayerId, text: &str) -> Result<(), HostError> {
        if self.should_fail(FailPoint::SetText) {
            return Err(HostError::OutOfResources);
        }
        let l = self.layer_mut(layer)?;
        if l.kind != Kind::Text {
            return Err(HostError::WrongLayerKind);
        }
        l.text.clear();
        l.text
            .push_str(text)
            .map_err(|_| HostError::OutOfResources)?;
        self.record(Call::SetText(layer));
        Ok(())
    }

    fn text_layer_destroy(&mut self, layer: LayerId) -> Result<(), HostError> {
        self.free_layer(layer, Kind::Text)?;
        self.record(Call::TextLayerDestroy(layer));
        Ok(())
    }
}

impl InverterLayerService for MockHost {
    fn inverter_layer_create(&mut self, frame: Rect) -> Result<LayerId, HostError> {
        if self.should_fail(FailPoint::InverterLayerCreate) {
            return Err(HostError::OutOfResources);
        }
        let layer = self.alloc_layer(Kind::Inverter, frame)?;
        self.record(Call::InverterLayerCreate(layer, frame));
        Ok(layer)
    }

    fn inverter_layer_destroy(&mut self, layer: LayerId) -> Result<(), HostError> {
        self.free_layer(layer, Kind::Inverter)?;
        self.record(Call::InverterLayerDestroy(layer));
        Ok(())
    }
}

impl AnimationService for MockHost {
    fn frame_animation_create(&mut self, params: &FrameAnimation) -> Result<AnimationId, HostError> {
        if self.should_fail(FailPoint::AnimationCreate) {
            return Err(HostError::OutOfResources);
        }
        self.layer(params.layer)?;
        let index = self
            .animations
            .iter()
            .position(Option::is_none)
            .ok_or(HostError::OutOfResources)?;
        self.animations[index] = Some(MockAnimation {
            params: *params,
            running: false,
        });
        let animation = AnimationId::new(index as u8);
        self.record(Call::AnimationCreate(animation, params.duration_ms));
        Ok(animation)
    }

    fn animation_schedule(&mut self, animation: AnimationId) -> Result<(), HostError> {
        let a = self.animation_mut(animation)?;
        let overlapped = a.running;
        a.running = true;
        if overlapped {
            self.overlapping += 1;
        }
        self.schedule_count += 1;
        self.record(Call::Schedule(animation));
        Ok(())
    }

    fn animation_unschedule(&mut self, animation: AnimationId) -> Result<(), HostError> {
        self.animation_mut(animation)?.running = false;
        self.unschedule_count += 1;
        self.record(Call::Unschedule(animation));
        Ok(())
    }

    fn animation_is_scheduled(&self, animation: AnimationId) -> bool {
        self.animations
            .get(animation.raw() as usize)
            .and_then(Option::as_ref)
            .is_some_and(|a| a.running)
    }

    fn animation_destroy(&mut self, animation: AnimationId) -> Result<(), HostError> {
        self.animation_mut(animation)?;
        self.animations[animation.raw() as usize] = None;
        self.record(Call::AnimationDestroy(animation));
        Ok(())
    }
}

impl TickService for MockHost {
    fn tick_subscribe(&mut self, unit: TimeUnits) -> Result<(), HostError> {
        if self.should_fail(FailPoint::TickSubscribe) || self.subscribed.is_some() {
            return Err(HostError::AlreadySubscribed);
        }
        self.subscribed = Some(unit);
        self.subscribe_count += 1;
        self.record(Call::TickSubscribe(unit));
        Ok(())
    }

    fn tick_unsubscribe(&mut self) -> Result<(), HostError> {
        self.subscribed.take().ok_or(HostError::NotSubscribed)?;
        self.unsubscribe_count += 1;
        self.record(Call::TickUnsubscribe);
        Ok(())
    }
}

impl EventLoop for MockHost {
    async fn next_event(&mut self) -> Option<HostEvent> {
        let event = self.events.pop_front()?;
        if let HostEvent::AnimationStopped {
            animation,
            finished: true,
        } = event
        {
            self.finish_animation(animation);
        }
        Some(event)
    }
}
