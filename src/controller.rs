use super::*;
use crossbeam_channel::Sender;
use indexmap::IndexMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// What the map controller tells the rest of the client.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Camera moved or zoomed. The render layer should redraw.
    ViewportChanged(Viewport),
    /// A click selected a system, or nothing.
    SystemSelected(Option<SystemId>),
    MoveIssued(MoveIssued),
    FleetArrived { fleet: FleetId, system: SystemId },
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    last_position: DVec2,
    last_time: u64,
    /// Total screen distance travelled since the press.
    distance: f64,
}

#[derive(Debug, Clone, Copy)]
enum PointerState {
    Idle,
    Dragging(Drag),
}

#[derive(Debug, Clone, Copy)]
struct Inertia {
    frame: FrameHandle,
    last_time: u64,
}

/// Owns the camera and fleet transit state of the galaxy map.
///
/// Every mutation goes through the input methods or `on_frame`.
/// Changes are reported as `MapEvent` on the event channel.
pub struct MapController<C: Clock, F: FrameScheduler> {
    configs: ViewportConfigs,
    transit_configs: TransitConfigs,

    graph: Arc<GalaxyGraph>,
    clock: C,
    frames: F,
    events: Sender<MapEvent>,

    viewport: Viewport,
    screen_size: DVec2,

    pointer: PointerState,
    /// World units per ms, estimated from the last pointer move.
    velocity: DVec2,
    inertia: Option<Inertia>,

    selected: Option<SystemId>,

    fleets: IndexMap<FleetId, Fleet, ahash::RandomState>,
    /// Fleet waiting for a destination click.
    armed_fleet: Option<FleetId>,
    transit_frame: Option<FrameHandle>,
}
impl<C: Clock, F: FrameScheduler> MapController<C, F> {
    pub fn new(graph: Arc<GalaxyGraph>, configs: &Configs, clock: C, frames: F, events: Sender<MapEvent>) -> Self {
        Self {
            configs: configs.viewport.clone(),
            transit_configs: configs.transit.clone(),
            graph,
            clock,
            frames,
            events,
            viewport: Viewport::default(),
            screen_size: DVec2::ZERO,
            pointer: PointerState::Idle,
            velocity: DVec2::ZERO,
            inertia: None,
            selected: None,
            fleets: Default::default(),
            armed_fleet: None,
            transit_frame: None,
        }
    }

    pub fn graph(&self) -> &GalaxyGraph {
        &self.graph
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn screen_size(&self) -> DVec2 {
        self.screen_size
    }

    pub fn frames(&self) -> &F {
        &self.frames
    }

    pub fn selected_system(&self) -> Option<&System> {
        self.selected.and_then(|id| self.graph.system(id))
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.pointer, PointerState::Dragging(_))
    }

    /// Whether an inertia animation is running.
    pub fn is_coasting(&self) -> bool {
        self.inertia.is_some()
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn screen_to_world(&self, screen: DVec2) -> DVec2 {
        self.viewport.screen_to_world(screen, self.screen_size)
    }

    pub fn world_to_screen(&self, world: DVec2) -> DVec2 {
        self.viewport.world_to_screen(world, self.screen_size)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.screen_size = DVec2::new(width, height);
        self.emit(MapEvent::ViewportChanged(self.viewport));
    }

    /// Replace the camera, clamping zoom.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport.center = viewport.center;
        self.viewport.set_zoom(viewport.zoom, &self.configs);
        self.emit(MapEvent::ViewportChanged(self.viewport));
    }

    /// Look at `system` at zoom 1. Unknown systems are ignored.
    pub fn center_on(&mut self, system: SystemId) {
        if let Some(position) = self.graph.system(system).map(|s| s.position) {
            self.stop_inertia();
            self.set_viewport(Viewport::new(position, 1.0));
        }
    }

    pub fn pointer_down(&mut self, position: DVec2, button: PointerButton) {
        if button != PointerButton::Primary {
            return;
        }
        self.stop_inertia();
        self.velocity = DVec2::ZERO;
        self.pointer = PointerState::Dragging(Drag {
            last_position: position,
            last_time: self.clock.now(),
            distance: 0.0,
        });
    }

    pub fn pointer_move(&mut self, position: DVec2) {
        let PointerState::Dragging(mut drag) = self.pointer else {
            return;
        };

        let now = self.clock.now();
        let screen_delta = position - drag.last_position;
        let dt = now
            .saturating_sub(drag.last_time)
            .max(self.configs.min_sample_interval)
            .max(1) as f64;

        drag.distance += screen_delta.length();
        let world_delta = self.viewport.pan_by_screen(screen_delta);
        self.velocity = -world_delta / dt;

        drag.last_position = position;
        drag.last_time = now;
        self.pointer = PointerState::Dragging(drag);

        self.emit(MapEvent::ViewportChanged(self.viewport));
    }

    pub fn pointer_up(&mut self, position: DVec2, button: PointerButton) {
        if button != PointerButton::Primary {
            return;
        }
        let PointerState::Dragging(drag) = self.pointer else {
            return;
        };
        self.pointer = PointerState::Idle;

        if drag.distance <= self.configs.drag_threshold {
            self.click(position);
        } else {
            self.start_inertia();
        }
    }

    /// Pointer left the map. Ends a drag without a click or inertia.
    pub fn pointer_leave(&mut self) {
        self.pointer = PointerState::Idle;
    }

    pub fn wheel(&mut self, delta: f64) {
        self.stop_inertia();

        let factor = if delta > 0.0 {
            self.configs.zoom_out_factor
        } else if delta < 0.0 {
            self.configs.zoom_in_factor
        } else {
            return;
        };
        self.viewport.set_zoom(self.viewport.zoom * factor, &self.configs);

        self.emit(MapEvent::ViewportChanged(self.viewport));
    }

    fn click(&mut self, position: DVec2) {
        let world = self.screen_to_world(position);
        self.selected = self
            .graph
            .hit_test(world, self.configs.selection_radius)
            .map(|system| system.id);
        self.emit(MapEvent::SystemSelected(self.selected));

        if let (Some(fleet), Some(target)) = (self.armed_fleet, self.selected) {
            if self.issue_move(fleet, target).is_some() {
                self.armed_fleet = None;
            }
        }
    }

    fn start_inertia(&mut self) {
        self.stop_inertia();
        let frame = self.frames.schedule_frame();
        self.inertia = Some(Inertia {
            frame,
            last_time: self.clock.now(),
        });
    }

    fn stop_inertia(&mut self) {
        if let Some(inertia) = self.inertia.take() {
            self.frames.cancel_frame(inertia.frame);
        }
    }

    fn step_inertia(&mut self, mut inertia: Inertia) {
        let now = self.clock.now();
        let dt = now.saturating_sub(inertia.last_time) as f64;
        inertia.last_time = now;

        if self.velocity.length() < self.configs.inertia_min_speed || self.is_dragging() {
            self.inertia = None;
            return;
        }

        self.viewport.center += self.velocity * dt;
        self.velocity *= self.configs.inertia_decay;
        self.emit(MapEvent::ViewportChanged(self.viewport));

        inertia.frame = self.frames.schedule_frame();
        self.inertia = Some(inertia);
    }

    /// Run the frame callback for `frame`.
    /// Handles that were cancelled or replaced do nothing.
    pub fn on_frame(&mut self, frame: FrameHandle) {
        if let Some(inertia) = self.inertia.filter(|inertia| inertia.frame == frame) {
            self.step_inertia(inertia);
        } else if self.transit_frame == Some(frame) {
            self.transit_frame = None;
            self.step_transits();
        } else {
            log::trace!("Ignoring stale frame {:?}.", frame);
        }
    }

    /// Run every frame that is due.
    pub fn pump_frames(&mut self) {
        for frame in self.frames.take_due() {
            self.on_frame(frame);
        }
    }

    pub fn add_fleet(&mut self, fleet: Fleet) {
        let in_transit = fleet.is_in_transit();
        self.fleets.insert(fleet.id, fleet);
        if in_transit {
            self.watch_transits();
        }
    }

    pub fn fleet(&self, id: FleetId) -> Option<&Fleet> {
        self.fleets.get(&id)
    }

    pub fn fleets(&self) -> impl Iterator<Item = &Fleet> {
        self.fleets.values()
    }

    /// Idle fleet at `system`, if any.
    pub fn fleet_at(&self, system: SystemId) -> Option<&Fleet> {
        self.fleets
            .values()
            .find(|fleet| !fleet.is_in_transit() && fleet.location() == system)
    }

    pub fn fleet_position(&self, id: FleetId) -> Option<DVec2> {
        self.fleets.get(&id)?.position(&self.graph, self.clock.now())
    }

    /// Wait for a destination click for `fleet`. `None` cancels.
    pub fn arm_fleet(&mut self, fleet: Option<FleetId>) {
        self.armed_fleet = fleet.filter(|id| self.fleets.contains_key(id));
    }

    pub fn armed_fleet(&self) -> Option<FleetId> {
        self.armed_fleet
    }

    /// Systems the armed fleet can be sent to.
    pub fn move_targets(&self) -> &[SystemId] {
        self.armed_fleet
            .and_then(|id| self.fleets.get(&id))
            .map(|fleet| fleet.move_targets(&self.graph))
            .unwrap_or(&[])
    }

    /// Send `fleet` to `to`. Does nothing unless the fleet is idle and a lane
    /// joins its location to `to`.
    pub fn issue_move(&mut self, fleet: FleetId, to: SystemId) -> Option<MoveIssued> {
        let now = self.clock.now();
        let issued = self
            .fleets
            .get_mut(&fleet)?
            .depart(to, &self.graph, &self.transit_configs, now);

        match issued {
            Some(issued) => {
                self.emit(MapEvent::MoveIssued(issued));
                self.watch_transits();
            }
            None => log::debug!("Rejected move of {} to {}.", fleet, to),
        }
        issued
    }

    fn watch_transits(&mut self) {
        if self.transit_frame.is_none() {
            self.transit_frame = Some(self.frames.schedule_frame());
        }
    }

    fn step_transits(&mut self) {
        let now = self.clock.now();
        let mut arrived = Vec::new();
        let mut travelling = false;
        for fleet in self.fleets.values_mut() {
            if let Some(system) = fleet.arrive_if_due(now) {
                arrived.push((fleet.id, system));
            } else if fleet.is_in_transit() {
                travelling = true;
            }
        }

        for (fleet, system) in arrived {
            self.emit(MapEvent::FleetArrived { fleet, system });
        }
        if travelling {
            self.watch_transits();
        }
    }

    fn emit(&self, event: MapEvent) {
        // Nobody listening is fine.
        let _ = self.events.send(event);
    }
}
