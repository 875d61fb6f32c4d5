/// Raw input events from the host page. Pointer coordinates are canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    /// Wheel scroll; positive `delta` zooms out.
    Wheel { delta: f32 },
    /// A control-panel event. `kind` selects a [`Command`]; `a`, `b`, `c` carry its data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A decoded control-panel command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SetPaused(bool),
    SetSpeed(f32),
    /// Numeric scale mode code, validated by the simulation.
    SetScaleCode(f32),
    /// Select by display position; None clears the selection.
    SelectPosition(Option<u32>),
    SetShowOrbits(bool),
    TogglePause,
    ResetView,
    Resize { width: f32, height: f32 },
}

impl Command {
    pub const SET_PAUSED: u32 = 1;
    pub const SET_SPEED: u32 = 2;
    pub const SET_SCALE: u32 = 3;
    pub const SELECT: u32 = 4;
    pub const SET_SHOW_ORBITS: u32 = 5;
    pub const TOGGLE_PAUSE: u32 = 6;
    pub const RESET_VIEW: u32 = 7;
    pub const RESIZE: u32 = 99;

    /// Decode a custom event. Unknown kinds yield None.
    pub fn from_custom(kind: u32, a: f32, b: f32, _c: f32) -> Option<Self> {
        let cmd = match kind {
            Self::SET_PAUSED => Self::SetPaused(a != 0.0),
            Self::SET_SPEED => Self::SetSpeed(a),
            Self::SET_SCALE => Self::SetScaleCode(a),
            Self::SELECT => {
                // NaN and negatives both clear
                let position = (a >= 0.0).then(|| a.round() as u32);
                Self::SelectPosition(position)
            }
            Self::SET_SHOW_ORBITS => Self::SetShowOrbits(a != 0.0),
            Self::TOGGLE_PAUSE => Self::TogglePause,
            Self::RESET_VIEW => Self::ResetView,
            Self::RESIZE => Self::Resize { width: a, height: b },
            _ => return None,
        };
        Some(cmd)
    }
}

/// Host code pushes events as they arrive; the runner drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
