//! Lifecycle phases

use std::fmt;

/// One of the six points in the lifecycle where callbacks execute.
///
/// The three startup phases run once before the loop begins; the three update
/// phases run once per iteration. Declaration order is execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    EarlyStart,
    Start,
    LateStart,
    EarlyUpdate,
    Update,
    LateUpdate,
}

impl Phase {
    /// All phases in execution order
    pub const ALL: [Phase; 6] = [
        Phase::EarlyStart,
        Phase::Start,
        Phase::LateStart,
        Phase::EarlyUpdate,
        Phase::Update,
        Phase::LateUpdate,
    ];

    /// Phases run once, before the first iteration
    pub const STARTUP: [Phase; 3] = [Phase::EarlyStart, Phase::Start, Phase::LateStart];

    /// Phases run every iteration
    pub const UPDATE: [Phase; 3] = [Phase::EarlyUpdate, Phase::Update, Phase::LateUpdate];

    /// The method name that binds to this phase without an explicit marker.
    pub fn conventional_name(self) -> &'static str {
        match self {
            Phase::EarlyStart => "EarlyStart",
            Phase::Start => "Start",
            Phase::LateStart => "LateStart",
            Phase::EarlyUpdate => "EarlyUpdate",
            Phase::Update => "Update",
            Phase::LateUpdate => "LateUpdate",
        }
    }

    pub fn is_startup(self) -> bool {
        matches!(self, Phase::EarlyStart | Phase::Start | Phase::LateStart)
    }

    /// Position in execution order, 0..6
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.conventional_name())
    }
}
