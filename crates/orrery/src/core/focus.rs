use glam::Vec3;

/// Where the focus state machine currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum FocusState {
    /// Nothing selected; the camera is free and the target sits at the origin.
    Unfocused,
    /// A body was just selected. The target is parked at the origin until
    /// `remaining` seconds have elapsed.
    Settling { body: String, remaining: f32 },
    /// The target follows the selected body's live position every tick.
    Tracking { body: String },
}

/// Selection plus the camera target point derived from it.
///
/// Selecting a body parks the target at the star first, then after
/// `retarget_delay` seconds switches to the body's live position and keeps
/// re-reading it each tick. A new selection always replaces whatever
/// transition is in flight.
#[derive(Debug, Clone)]
pub struct SelectionFocus {
    state: FocusState,
    target: Vec3,
    retarget_delay: f32,
}

impl SelectionFocus {
    pub fn new(retarget_delay: f32) -> Self {
        Self {
            state: FocusState::Unfocused,
            target: Vec3::ZERO,
            retarget_delay: retarget_delay.max(0.0),
        }
    }

    pub fn select(&mut self, body: &str) {
        log::debug!("focus: select {body}");
        self.target = Vec3::ZERO;
        self.state = FocusState::Settling {
            body: body.to_string(),
            remaining: self.retarget_delay,
        };
    }

    pub fn deselect(&mut self) {
        log::debug!("focus: deselect");
        self.target = Vec3::ZERO;
        self.state = FocusState::Unfocused;
    }

    /// Advance the transition by `dt` real seconds and refresh the target.
    /// `locate` returns the live position of a body id.
    pub fn tick(&mut self, dt: f32, locate: impl Fn(&str) -> Option<Vec3>) {
        if let FocusState::Settling { body, remaining } = &mut self.state {
            *remaining -= dt.max(0.0);
            if *remaining <= 0.0 {
                self.state = FocusState::Tracking { body: std::mem::take(body) };
            }
        }
        if let FocusState::Tracking { body } = &self.state {
            self.target = locate(body).unwrap_or(Vec3::ZERO);
        }
    }

    pub fn selected(&self) -> Option<&str> {
        match &self.state {
            FocusState::Unfocused => None,
            FocusState::Settling { body, .. } | FocusState::Tracking { body } => Some(body),
        }
    }

    pub fn state(&self) -> &FocusState {
        &self.state
    }

    /// The point the camera should ease toward.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn retarget_delay(&self) -> f32 {
        self.retarget_delay
    }
}

impl Default for SelectionFocus {
    fn default() -> Self {
        Self::new(0.1)
    }
}
