use crate::engine::OpenSet;
use crate::grid::GridModel;
use crate::models::Cell;

/// Back-link of a search node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Parent {
    /// Not reached by the current search.
    #[default]
    None,
    /// The search started here.
    Root,
    /// Reached from the node at this grid index.
    Index(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub cell: Cell,
    pub parent: Parent,
    pub g: u32,
    pub h: u32,
    pub f: u32,
    pub open: bool,
    pub closed: bool,
    pub collidable: bool,
}

impl SearchNode {
    fn fresh(cell: Cell, collidable: bool) -> Self {
        Self { cell, parent: Parent::None, g: 0, h: 0, f: 0, open: false, closed: false, collidable }
    }

    /// Walkable and not yet finalized.
    pub fn is_candidate(&self) -> bool {
        !self.collidable && !self.closed
    }
}

/// Reusable per-engine search buffers. Nothing here is readable or writable
/// until [`SearchScratch::init`] has reset it against a grid.
#[derive(Debug)]
pub struct SearchScratch {
    nodes: Vec<SearchNode>,
    open: OpenSet,
    closed: usize,
}

impl SearchScratch {
    pub fn new(open_capacity: usize) -> Self {
        Self { nodes: Vec::new(), open: OpenSet::with_capacity(open_capacity), closed: 0 }
    }

    /// Restores every node from the grid's static flags, empties the open set
    /// and zeroes the closed counter.
    pub fn init<'a>(&'a mut self, grid: &'a GridModel) -> NodeStore<'a> {
        self.nodes.clear();
        self.nodes.extend((0..grid.len()).map(|i| SearchNode::fresh(grid.cell_of(i), grid.is_collidable(i))));
        self.open.reset(grid.len());
        self.closed = 0;
        NodeStore { grid, nodes: &mut self.nodes, open: &mut self.open, closed: &mut self.closed }
    }
}

/// Initialized view over [`SearchScratch`] for exactly one search.
pub struct NodeStore<'a> {
    grid: &'a GridModel,
    nodes: &'a mut Vec<SearchNode>,
    open: &'a mut OpenSet,
    closed: &'a mut usize,
}

impl<'a> NodeStore<'a> {
    pub fn grid(&self) -> &'a GridModel {
        self.grid
    }

    pub fn open_capacity(&self) -> usize {
        self.open.capacity()
    }

    pub fn node(&self, index: usize) -> &SearchNode {
        &self.nodes[index]
    }

    pub fn nodes(&self) -> &[SearchNode] {
        &self.nodes[..]
    }

    pub fn closed_count(&self) -> usize {
        *self.closed
    }

    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    /// Marks `index` as the closed root of the search.
    pub fn close_root(&mut self, index: usize) {
        let node = &mut self.nodes[index];
        node.parent = Parent::Root;
        node.closed = true;
        *self.closed += 1;
    }

    /// First visit: record scores and push onto the open set.
    pub fn open_node(&mut self, index: usize, parent: usize, g: u32, h: u32) {
        let node = &mut self.nodes[index];
        debug_assert!(!node.open && !node.closed);
        node.parent = Parent::Index(parent as u32);
        node.g = g;
        node.h = h;
        node.f = g + h;
        node.open = true;
        self.open.insert(index as u32, node.f);
    }

    /// Cheaper route to an already-open node. `h` is unchanged.
    pub fn improve(&mut self, index: usize, parent: usize, g: u32) {
        let node = &mut self.nodes[index];
        debug_assert!(node.open && g < node.g);
        node.parent = Parent::Index(parent as u32);
        node.g = g;
        node.f = g + node.h;
        self.open.replace(index as u32, node.f);
    }

    /// Moves the lowest-F open node to the closed set.
    pub fn close_min(&mut self) -> Option<usize> {
        let index = self.open.extract_min()? as usize;
        let node = &mut self.nodes[index];
        node.open = false;
        node.closed = true;
        *self.closed += 1;
        Some(index)
    }

    /// Follows parent links from `index` back to the root and returns the
    /// visited cells in root-to-`index` order, root excluded.
    pub fn backtrack(&self, index: usize) -> Vec<Cell> {
        let mut path = Vec::new();
        let mut cur = index;
        loop {
            let node = &self.nodes[cur];
            match node.parent {
                Parent::Index(p) => {
                    path.push(node.cell);
                    cur = p as usize;
                }
                Parent::Root | Parent::None => break,
            }
        }
        path.reverse();
        path
    }
}
