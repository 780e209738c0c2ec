//! The occupancy grid.
//!
//! # Data layout
//!
//! Per-agent arrays are indexed by `AgentId` (SoA, like the citizen store):
//!
//! ```text
//! positions[agent] : Option<Point>   continuous position
//! cells[agent]     : Option<Cell>    truncated position
//! ```
//!
//! plus a sparse `Cell → Vec<AgentId>` map holding only occupied cells.
//! Occupant lists keep arrival order, so iteration over a cell is
//! deterministic for a given event history.

use tb_core::{AgentId, Cell, Point};

use crate::{SpatialError, SpatialResult};

#[cfg(feature = "fx-hash")]
type CellMap<V> = rustc_hash::FxHashMap<Cell, V>;
#[cfg(not(feature = "fx-hash"))]
type CellMap<V> = std::collections::HashMap<Cell, V>;

/// One cell of a neighborhood query and the agents currently in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellOccupants<'a> {
    pub cell:   Cell,
    pub agents: &'a [AgentId],
}

/// Bounded continuous space `[0, width) x [0, height)` overlaid by a
/// `width x height` grid of unit cells.
pub struct Grid {
    width:     u32,
    height:    u32,
    positions: Vec<Option<Point>>,
    cells:     Vec<Option<Cell>>,
    occupancy: CellMap<Vec<AgentId>>,
}

impl Grid {
    /// Create an empty grid able to track `agent_count` agents.
    pub fn new(width: u32, height: u32, agent_count: usize) -> SpatialResult<Self> {
        if width == 0 || height == 0 {
            return Err(SpatialError::EmptyGrid { width, height });
        }
        Ok(Self {
            width,
            height,
            positions: vec![None; agent_count],
            cells:     vec![None; agent_count],
            occupancy: CellMap::default(),
        })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of agents this grid can track.
    pub fn agent_count(&self) -> usize {
        self.positions.len()
    }

    /// `true` if `point` lies inside the space (upper bounds exclusive).
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.width as f64
            && point.y < self.height as f64
    }

    /// Fail with [`SpatialError::OutOfBounds`] unless `point` is inside.
    pub fn check_point(&self, point: Point) -> SpatialResult<()> {
        if self.contains(point) {
            Ok(())
        } else {
            Err(SpatialError::OutOfBounds { point, width: self.width, height: self.height })
        }
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Move `agent` to `point`, updating its continuous position, its cell
    /// and the occupancy index in one step.
    ///
    /// The first call for an agent places it.
    pub fn move_to(&mut self, agent: AgentId, point: Point) -> SpatialResult<()> {
        if agent.index() >= self.positions.len() {
            return Err(SpatialError::AgentNotFound(agent));
        }
        self.check_point(point)?;

        let cell = point.cell();
        let previous = self.cells[agent.index()];
        if previous != Some(cell) {
            if let Some(old) = previous {
                self.leave(agent, old);
            }
            self.occupancy.entry(cell).or_default().push(agent);
            self.cells[agent.index()] = Some(cell);
        }
        self.positions[agent.index()] = Some(point);
        Ok(())
    }

    fn leave(&mut self, agent: AgentId, cell: Cell) {
        if let Some(agents) = self.occupancy.get_mut(&cell) {
            agents.retain(|&a| a != agent);
            if agents.is_empty() {
                self.occupancy.remove(&cell);
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// The cell `agent` occupies, or `None` if it was never placed.
    #[inline]
    pub fn location_of(&self, agent: AgentId) -> Option<Cell> {
        self.cells.get(agent.index()).copied().flatten()
    }

    /// The continuous position of `agent`, or `None` if it was never placed.
    #[inline]
    pub fn position_of(&self, agent: AgentId) -> Option<Point> {
        self.positions.get(agent.index()).copied().flatten()
    }

    /// Agents currently in `cell` (empty slice if none).
    pub fn occupants(&self, cell: Cell) -> &[AgentId] {
        self.occupancy.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of cells with at least one occupant.
    pub fn occupied_cell_count(&self) -> usize {
        self.occupancy.len()
    }

    /// Moore neighborhood of `center` with extent `radius` in both axes,
    /// clipped to the grid.
    ///
    /// `radius = 0, include_self = true` yields exactly the center cell.
    /// Empty cells are included with an empty occupant slice.  Cells are
    /// returned row by row (ascending `y`, then ascending `x`).
    pub fn neighborhood(&self, center: Cell, radius: u32, include_self: bool) -> Vec<CellOccupants<'_>> {
        let x_min = center.x.saturating_sub(radius);
        let y_min = center.y.saturating_sub(radius);
        let x_max = center.x.saturating_add(radius).min(self.width - 1);
        let y_max = center.y.saturating_add(radius).min(self.height - 1);

        let mut out = Vec::new();
        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let cell = Cell::new(x, y);
                if cell == center && !include_self {
                    continue;
                }
                out.push(CellOccupants { cell, agents: self.occupants(cell) });
            }
        }
        out
    }
}
