use glam::{Vec2, Vec3};
use orrery::{
    compose, hit_test, CameraUniform, Command, ConfigError, InputEvent, InputQueue, OrbitCamera,
    SceneBuffer, SimConfig, SimEvent, Simulation,
};

/// Pointer travel (pixels) beyond which a press becomes a drag instead of a click.
pub const DRAG_THRESHOLD: f32 = 5.0;

#[derive(Debug, Default)]
struct PointerState {
    down: bool,
    dragged: bool,
    start: Vec2,
    last: Vec2,
}

/// Parse an optional config document. If the document does not pin
/// `phase_seed`, the seed comes from `random_seed`.
pub fn load_config(json: Option<&str>, random_seed: impl FnOnce() -> u64) -> Result<SimConfig, ConfigError> {
    let (mut config, pinned) = match json {
        Some(json) => {
            let value: serde_json::Value = serde_json::from_str(json)?;
            let pinned = value.get("phase_seed").is_some();
            (serde_json::from_value::<SimConfig>(value)?, pinned)
        }
        None => (SimConfig::default(), false),
    };
    if !pinned {
        config.phase_seed = random_seed();
    }
    config.validate()?;
    Ok(config)
}

/// Drives one [`Simulation`] from host frames and input, and owns the
/// buffers the host renderer reads after each tick.
pub struct SimulationRunner {
    sim: Simulation,
    camera: OrbitCamera,
    input: InputQueue,
    scene: SceneBuffer,
    uniform: CameraUniform,
    events: Vec<SimEvent>,
    pointer: PointerState,
}

impl SimulationRunner {
    pub fn new(sim: Simulation, screen_width: f32, screen_height: f32) -> Self {
        let camera = OrbitCamera::new(&sim.config().camera, screen_width, screen_height);
        let bodies = sim.list_bodies().len();
        Self {
            uniform: camera.uniform(),
            scene: SceneBuffer::with_capacity(bodies + 1, bodies * 65),
            sim,
            camera,
            input: InputQueue::new(),
            events: Vec::with_capacity(8),
            pointer: PointerState::default(),
        }
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: apply queued input, advance the simulation, ease the
    /// camera, rebuild the scene buffers and emit state events.
    pub fn tick(&mut self, frame_dt: f32) {
        self.events.clear();

        for event in self.input.drain() {
            self.handle_input(event);
        }

        self.sim.tick(frame_dt);
        let dt = self.sim.clock().clamp_delta(frame_dt);
        self.camera.follow(self.sim.camera_target(), dt);
        self.uniform = self.camera.uniform();

        compose(&self.sim, &self.camera, &mut self.scene);
        self.emit_events();
    }

    fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => {
                let at = Vec2::new(x, y);
                self.pointer = PointerState { down: true, dragged: false, start: at, last: at };
            }
            InputEvent::PointerMove { x, y } => {
                if !self.pointer.down {
                    return;
                }
                let at = Vec2::new(x, y);
                if at.distance(self.pointer.start) > DRAG_THRESHOLD {
                    self.pointer.dragged = true;
                }
                if self.pointer.dragged {
                    let delta = at - self.pointer.last;
                    self.camera.orbit(delta.x, delta.y);
                }
                self.pointer.last = at;
            }
            InputEvent::PointerUp { x, y } => {
                if self.pointer.down && !self.pointer.dragged {
                    self.click(Vec2::new(x, y));
                }
                self.pointer.down = false;
            }
            InputEvent::Wheel { delta } => self.camera.zoom(delta),
            InputEvent::Custom { kind, a, b, c } => match Command::from_custom(kind, a, b, c) {
                Some(cmd) => self.apply(cmd),
                None => log::warn!("ignoring unknown custom event kind {kind}"),
            },
        }
    }

    /// Clicking a body selects it; clicking empty space keeps the selection.
    fn click(&mut self, at: Vec2) {
        let hit = hit_test(&self.sim.render_state(), &self.camera, at).map(str::to_owned);
        if let Some(id) = hit {
            self.sim.select(Some(id.as_str()));
        }
    }

    fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::SetPaused(paused) => self.sim.set_paused(paused),
            Command::SetSpeed(speed) => {
                self.sim.set_speed_multiplier(speed);
            }
            Command::SetScaleCode(code) => {
                self.sim.set_scale_code(code);
            }
            Command::SelectPosition(None) => {
                self.sim.select(None);
            }
            Command::SelectPosition(Some(position)) => {
                let id = self.sim.registry().by_position(position).map(|b| b.id.clone());
                match id {
                    Some(id) => {
                        self.sim.select(Some(id.as_str()));
                    }
                    None => log::warn!("no body at display position {position}"),
                }
            }
            Command::SetShowOrbits(show) => self.sim.set_show_orbits(show),
            Command::TogglePause => {
                self.sim.toggle_pause();
            }
            Command::ResetView => self.camera.reset(),
            Command::Resize { width, height } => self.camera.set_screen_size(width, height),
        }
    }

    fn emit_events(&mut self) {
        let sim = &self.sim;
        self.events.push(SimEvent::clock(sim.speed_multiplier(), sim.is_paused()));

        let selected = sim.selected();
        let orbit_radius = selected
            .and_then(|b| sim.orbit_state(&b.id))
            .map_or(0.0, |s| s.orbit_radius() as f32);
        self.events.push(SimEvent::selection(selected.map(|b| b.position), orbit_radius));

        self.events.push(SimEvent::scale(sim.scale_mode(), sim.show_orbits()));
    }

    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn scene(&self) -> &SceneBuffer {
        &self.scene
    }

    // ---- Pointer accessors for host-side reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.scene.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.scene.instance_count()
    }

    pub fn glow_start(&self) -> u32 {
        self.scene.glow_start
    }

    pub fn orbit_vertices_ptr(&self) -> *const f32 {
        self.scene.orbit_vertices_ptr()
    }

    pub fn orbit_vertex_count(&self) -> u32 {
        self.scene.orbit_vertex_count()
    }

    pub fn ring_stride(&self) -> u32 {
        self.scene.ring_stride
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.events.len() as u32
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.uniform as *const CameraUniform as *const f32
    }

    pub fn camera_eye(&self) -> Vec3 {
        self.camera.position()
    }

    pub fn camera_target(&self) -> Vec3 {
        self.camera.target
    }
}
