//! Per-cell search bookkeeping, kept in a flat arena indexed like the grid.
//!
//! Every search starts from a clean slate. Rather than rewriting every node, the arena stamps each
//! node with the generation it was last touched in; a node from an older generation reads as
//! fresh and is reinitialised on its first write.

/// Stands in for an unknown path cost.
pub const INFINITE_COST: i32 = i32::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NodeState {
    #[default]
    Unvisited,
    Open,
    Closed,
}

/// Search state of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchNode {
    g_cost: i32,
    h_cost: i32,
    f_cost: i32,
    parent: Option<usize>,
    state: NodeState,
}

impl Default for SearchNode {
    fn default() -> SearchNode {
        SearchNode {
            g_cost: INFINITE_COST,
            h_cost: 0,
            f_cost: INFINITE_COST,
            parent: None,
            state: NodeState::Unvisited,
        }
    }
}

impl SearchNode {
    pub fn g_cost(&self) -> i32 {
        self.g_cost
    }

    pub fn h_cost(&self) -> i32 {
        self.h_cost
    }

    pub fn f_cost(&self) -> i32 {
        self.f_cost
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    /// The only way costs are written, so `f_cost` can never drift from `g_cost + h_cost`.
    pub fn set_costs(&mut self, g_cost: i32, h_cost: i32) {
        self.g_cost = g_cost;
        self.h_cost = h_cost;
        self.f_cost = g_cost.saturating_add(h_cost);
    }

    pub fn set_parent(&mut self, parent: Option<usize>) {
        self.parent = parent;
    }

    pub fn set_state(&mut self, state: NodeState) {
        self.state = state;
    }
}

/// Arena of [SearchNode]s with O(1) reset.
#[derive(Clone, Debug, Default)]
pub struct SearchContext {
    nodes: Vec<SearchNode>,
    stamps: Vec<u32>,
    generation: u32,
}

impl SearchContext {
    pub fn new() -> SearchContext {
        SearchContext::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Invalidates every node and makes room for `len` of them.
    pub fn reset(&mut self, len: usize) {
        if self.nodes.len() != len {
            self.nodes = vec![SearchNode::default(); len];
            self.stamps = vec![0; len];
            self.generation = 0;
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Stamps from 2^32 searches ago would look current again
            self.stamps.fill(0);
            self.generation = 1;
        }
    }

    /// Current state of a node, or a fresh node if it was not touched in this search.
    pub fn node(&self, ix: usize) -> SearchNode {
        if self.stamps[ix] == self.generation {
            self.nodes[ix]
        } else {
            SearchNode::default()
        }
    }

    pub fn node_mut(&mut self, ix: usize) -> &mut SearchNode {
        if self.stamps[ix] != self.generation {
            self.stamps[ix] = self.generation;
            self.nodes[ix] = SearchNode::default();
        }
        &mut self.nodes[ix]
    }
}
