use serde::{Deserialize, Serialize};

/// Index of a ship within one run, in `[0, n)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShipId(pub(crate) usize);

impl ShipId {
    /// Create a new ship ID
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw index
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ShipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Size category drawn when a ship arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipSize {
    Small,
    Medium,
    Large,
}

impl ShipSize {
    pub const ALL: [ShipSize; 3] = [ShipSize::Small, ShipSize::Medium, ShipSize::Large];

    /// Map a category index (0, 1, 2) onto a size
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            ShipSize::Small => 0,
            ShipSize::Medium => 1,
            ShipSize::Large => 2,
        }
    }
}

/// Side of the harbor the tugboat is waiting at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TugboatPosition {
    AtDocks,
    AtPort,
}

impl std::fmt::Display for TugboatPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TugboatPosition::AtDocks => write!(f, "docks"),
            TugboatPosition::AtPort => write!(f, "port"),
        }
    }
}

/// Lifecycle step a queued event applies to its ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    /// Ship reaches the port approach
    Enqueue,
    /// Ship asks the tugboat for a tow to a free dock
    Move,
    /// Ship is berthed and starts loading
    Dock,
    /// Loading finished
    Ready,
    /// Ship asks the tugboat for a tow out of the docks
    Depart,
    /// Ship leaves the harbor
    Done,
}

impl Transition {
    /// Whether the transition can be deferred for lack of a resource
    pub fn is_contended(&self) -> bool {
        matches!(self, Transition::Move | Transition::Depart)
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Transition::Enqueue => "enqueue",
            Transition::Move => "move",
            Transition::Dock => "dock",
            Transition::Ready => "ready",
            Transition::Depart => "depart",
            Transition::Done => "done",
        };
        write!(f, "{}", name)
    }
}
