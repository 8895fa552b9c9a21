//! Node and time window types.

use serde::{Deserialize, Serialize};

/// A feasibility window for visiting a node.
///
/// Arriving before `open` means waiting until `open`; arriving after `close`
/// is allowed but accumulates lateness.
///
/// # Examples
///
/// ```
/// use tw_dei::models::TimeWindow;
///
/// let tw = TimeWindow::new(100, 200);
/// assert!(tw.contains(150));
/// assert_eq!(tw.lateness(250), 50);
/// assert_eq!(tw.lateness(150), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    open: i64,
    close: i64,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(open: i64, close: i64) -> Self {
        Self { open, close }
    }

    /// Earliest time service can start.
    pub fn open(&self) -> i64 {
        self.open
    }

    /// Latest arrival time without lateness.
    pub fn close(&self) -> i64 {
        self.close
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: i64) -> bool {
        time >= self.open && time <= self.close
    }

    /// Lateness incurred by arriving at the given time: `max(0, time - close)`.
    pub fn lateness(&self, time: i64) -> i64 {
        (time - self.close).max(0)
    }

    /// Returns `true` if arriving at the given time violates this window.
    pub fn is_violated(&self, time: i64) -> bool {
        time > self.close
    }
}

/// A location to visit within a time window.
///
/// The `id` doubles as the row/column index in the
/// [`DistanceMatrix`](crate::distance::DistanceMatrix), so IDs are expected
/// to be 0-indexed and dense.
///
/// # Examples
///
/// ```
/// use tw_dei::models::Node;
///
/// let n = Node::new(1, 10, 0, 5, 20);
/// assert_eq!(n.id(), 1);
/// assert_eq!(n.open(), 5);
/// assert_eq!(n.close(), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    id: usize,
    x: i64,
    y: i64,
    window: TimeWindow,
}

impl Node {
    /// Creates a new node.
    pub fn new(id: usize, x: i64, y: i64, open: i64, close: i64) -> Self {
        Self {
            id,
            x,
            y,
            window: TimeWindow::new(open, close),
        }
    }

    /// Node ID (index into the distance matrix).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> i64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> i64 {
        self.y
    }

    /// The node's time window.
    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    /// Opening time of the window.
    pub fn open(&self) -> i64 {
        self.window.open
    }

    /// Closing time of the window.
    pub fn close(&self) -> i64 {
        self.window.close
    }

    /// Euclidean distance to another node, truncated toward zero.
    pub fn distance_to(&self, other: &Node) -> i64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt() as i64
    }
}
