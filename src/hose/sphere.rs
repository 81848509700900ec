use std::collections::HashSet;

use petgraph::graph::NodeIndex;
use tracing::trace;

use crate::bond::BondOrder;
use crate::hose::error::{HoseError, Result};
use crate::hose::table::{self, TERMINAL_SEED_MULTIPLIER};
use crate::mol::Mol;
use crate::traits::{HasAtomicNum, HasBondOrder, HasFormalCharge};

/// What a sphere node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An atom reached for the first time in this sphere.
    Atom(NodeIndex),
    /// An atom already reached in an inner sphere; written as `&`.
    RingClosure(NodeIndex),
    /// Placeholder below an atom whose only neighbour is its parent.
    Terminal,
}

impl NodeKind {
    pub fn atom(self) -> Option<NodeIndex> {
        match self {
            NodeKind::Atom(a) | NodeKind::RingClosure(a) => Some(a),
            NodeKind::Terminal => None,
        }
    }
}

/// Bond class of the edge leading to a node. The discriminants are the
/// numeric classes used by the notation (aromatic is 4, not 1.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondClass {
    #[default]
    None = 0,
    Single = 1,
    Double = 2,
    Triple = 3,
    Aromatic = 4,
}

impl BondClass {
    pub fn numeric(self) -> u8 {
        self as u8
    }
}

impl From<BondOrder> for BondClass {
    fn from(order: BondOrder) -> Self {
        match order {
            BondOrder::Single => BondClass::Single,
            BondOrder::Double => BondClass::Double,
            BondOrder::Triple => BondClass::Triple,
            BondOrder::Aromatic => BondClass::Aromatic,
        }
    }
}

/// Parent link of a sphere node; an index into [`SphereTree`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parent {
    Root,
    Node(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SphereNode {
    pub kind: NodeKind,
    pub parent: Parent,
    /// 0-based sphere index (bond distance to the root minus one).
    pub sphere: usize,
    pub bond: BondClass,
    /// Bond count of the node's atom, 0 for terminal placeholders.
    pub degree: usize,
    /// Copied from the atom so ranking and rendering need no graph access.
    pub atomic_num: u8,
    pub formal_charge: i8,
    pub rank_score: i128,
    pub subtree_degree_sum: i64,
    /// Position within the sphere after the latest sort; 1 is last.
    pub sort_order: usize,
    pub children: Vec<usize>,
}

impl SphereNode {
    /// Element symbol used for ranking. Ring closures rank as the element
    /// they close onto; placeholders rank as `,`.
    pub fn rank_symbol(&self) -> Option<&'static str> {
        match self.kind {
            NodeKind::Atom(_) | NodeKind::RingClosure(_) => Some(table::atom_symbol(self.atomic_num)),
            NodeKind::Terminal => None,
        }
    }

    pub fn is_expandable(&self) -> bool {
        matches!(self.kind, NodeKind::Atom(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RootNode {
    pub atom: NodeIndex,
    pub rank_score: i128,
    pub subtree_degree_sum: i64,
    pub sort_order: usize,
    pub children: Vec<usize>,
}

/// Breadth-first tree around one root atom.
///
/// Nodes live in a flat arena; `spheres[i]` lists the ids of the nodes at
/// bond distance `i + 1` in their current order. After ranking that order
/// is the canonical one the code is written in.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereTree {
    pub(crate) root: RootNode,
    pub(crate) nodes: Vec<SphereNode>,
    pub(crate) spheres: Vec<Vec<usize>>,
    pub(crate) max_depth: usize,
}

impl SphereTree {
    fn new(root: NodeIndex, max_depth: usize) -> Self {
        Self {
            root: RootNode {
                atom: root,
                rank_score: 0,
                subtree_degree_sum: 0,
                sort_order: 1,
                children: Vec::new(),
            },
            nodes: Vec::new(),
            spheres: Vec::with_capacity(max_depth),
            max_depth,
        }
    }

    pub fn root(&self) -> &RootNode {
        &self.root
    }

    pub fn root_atom(&self) -> NodeIndex {
        self.root.atom
    }

    /// Number of spheres requested; empty trailing spheres are kept.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn node(&self, id: usize) -> &SphereNode {
        &self.nodes[id]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node ids of the 0-based sphere `sphere`, in current order.
    pub fn sphere_ids(&self, sphere: usize) -> &[usize] {
        self.spheres.get(sphere).map_or(&[], Vec::as_slice)
    }

    pub fn nodes_in_sphere(&self, sphere: usize) -> impl Iterator<Item = &SphereNode> + '_ {
        self.sphere_ids(sphere).iter().map(|&id| &self.nodes[id])
    }

    /// Atoms of the 0-based sphere `sphere`, ring closures and
    /// placeholders excluded.
    pub fn atoms_in_sphere(&self, sphere: usize) -> Vec<NodeIndex> {
        self.nodes_in_sphere(sphere)
            .filter_map(|n| match n.kind {
                NodeKind::Atom(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    /// Atom of a node's parent, the root atom for sphere 0.
    pub fn parent_atom(&self, id: usize) -> Option<NodeIndex> {
        match self.nodes[id].parent {
            Parent::Root => Some(self.root.atom),
            Parent::Node(p) => self.nodes[p].kind.atom(),
        }
    }

    pub(crate) fn parent_rank(&self, parent: Parent) -> (usize, i128) {
        match parent {
            Parent::Root => (self.root.sort_order, self.root.rank_score),
            Parent::Node(p) => (self.nodes[p].sort_order, self.nodes[p].rank_score),
        }
    }

    pub(crate) fn add_to_parent_score(&mut self, parent: Parent, score: i128) {
        match parent {
            Parent::Root => self.root.rank_score += score,
            Parent::Node(p) => self.nodes[p].rank_score += score,
        }
    }

    pub(crate) fn add_to_parent_degrees(&mut self, parent: Parent, degrees: i64) {
        match parent {
            Parent::Root => self.root.subtree_degree_sum += degrees,
            Parent::Node(p) => self.nodes[p].subtree_degree_sum += degrees,
        }
    }

    /// Copy of a ranked tree in which every atom appears at most once per
    /// sphere. The first sighting in canonical order stays an atom; later
    /// ones become ring closures and lose their subtrees. Scores are reset,
    /// so the copy has to be ranked again. `None` when nothing repeats.
    pub(crate) fn collapse_repeats(&self) -> Option<SphereTree> {
        let mut kept = vec![true; self.nodes.len()];
        let mut closed = vec![false; self.nodes.len()];
        let mut changed = false;
        for sphere in &self.spheres {
            let mut written = HashSet::new();
            for &id in sphere {
                if let Parent::Node(p) = self.nodes[id].parent {
                    if !kept[p] || closed[p] {
                        kept[id] = false;
                        continue;
                    }
                }
                if let NodeKind::Atom(atom) = self.nodes[id].kind {
                    if !written.insert(atom) {
                        closed[id] = true;
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            return None;
        }

        let mut tree = SphereTree::new(self.root.atom, self.max_depth);
        let mut remap: Vec<Option<usize>> = vec![None; self.nodes.len()];
        for sphere in &self.spheres {
            let mut ids = Vec::with_capacity(sphere.len());
            for &id in sphere {
                if !kept[id] {
                    continue;
                }
                let old = &self.nodes[id];
                let parent = match old.parent {
                    Parent::Root => Parent::Root,
                    Parent::Node(p) => match remap[p] {
                        Some(p) => Parent::Node(p),
                        None => continue,
                    },
                };
                let kind = match old.kind {
                    NodeKind::Atom(atom) if closed[id] => NodeKind::RingClosure(atom),
                    kind => kind,
                };
                let new_id = tree.push(SphereNode {
                    kind,
                    parent,
                    sphere: old.sphere,
                    bond: old.bond,
                    degree: old.degree,
                    atomic_num: old.atomic_num,
                    formal_charge: old.formal_charge,
                    rank_score: 0,
                    subtree_degree_sum: 0,
                    sort_order: 1,
                    children: Vec::new(),
                });
                remap[id] = Some(new_id);
                ids.push(new_id);
            }
            tree.spheres.push(ids);
        }
        Some(tree)
    }

    fn push(&mut self, node: SphereNode) -> usize {
        let id = self.nodes.len();
        match node.parent {
            Parent::Root => self.root.children.push(id),
            Parent::Node(p) => self.nodes[p].children.push(id),
        }
        self.nodes.push(node);
        id
    }
}

fn bond_class<A, B>(mol: &Mol<A, B>, a: NodeIndex, b: NodeIndex) -> Result<BondClass>
where
    B: HasBondOrder,
{
    let edge = mol
        .bond_between(a, b)
        .ok_or(HoseError::GraphInconsistency {
            atom: a.index(),
            neighbor: b.index(),
        })?;
    Ok(mol.bond(edge).bond_order().into())
}

fn atom_node<A, B>(
    mol: &Mol<A, B>,
    kind: NodeKind,
    atom: NodeIndex,
    parent: Parent,
    sphere: usize,
    bond: BondClass,
) -> SphereNode
where
    A: HasAtomicNum + HasFormalCharge,
{
    let a = mol.atom(atom);
    SphereNode {
        kind,
        parent,
        sphere,
        bond,
        degree: mol.degree(atom),
        atomic_num: a.atomic_num(),
        formal_charge: a.formal_charge(),
        rank_score: 0,
        subtree_degree_sum: 0,
        sort_order: 1,
        children: Vec::new(),
    }
}

/// Expand `max_depth` spheres around `root`.
///
/// An atom reached from two branches of the same sphere gets a node in
/// both; the set of seen atoms is only extended once the sphere is
/// complete, so insertion order never decides which branch owns the atom.
/// Once ranked, [`SphereTree::collapse_repeats`] keeps the canonical first.
///
/// A bond from an atom to itself is reported as
/// [`HoseError::GraphInconsistency`].
pub(crate) fn build<A, B>(mol: &Mol<A, B>, root: NodeIndex, max_depth: usize) -> Result<SphereTree>
where
    A: HasAtomicNum + HasFormalCharge,
    B: HasBondOrder,
{
    let mut tree = SphereTree::new(root, max_depth);
    if max_depth == 0 {
        return Ok(tree);
    }

    let mut seen: HashSet<NodeIndex> = HashSet::from([root]);

    let mut first = Vec::new();
    for nb in mol.neighbors(root) {
        if nb == root {
            return Err(HoseError::GraphInconsistency {
                atom: root.index(),
                neighbor: root.index(),
            });
        }
        let bond = bond_class(mol, root, nb)?;
        let node = atom_node(mol, NodeKind::Atom(nb), nb, Parent::Root, 0, bond);
        first.push(tree.push(node));
        seen.insert(nb);
    }
    trace!(sphere = 1, nodes = first.len(), "sphere expanded");
    tree.spheres.push(first);

    for sphere in 1..max_depth {
        let mut next = Vec::new();
        let mut reached = Vec::new();
        let previous = tree.spheres[sphere - 1].clone();

        for id in previous {
            let NodeKind::Atom(atom) = tree.nodes[id].kind else {
                continue;
            };
            let parent_atom = tree
                .parent_atom(id)
                .ok_or(HoseError::GraphInconsistency {
                    atom: atom.index(),
                    neighbor: atom.index(),
                })?;

            let neighbors: Vec<NodeIndex> = mol.neighbors(atom).collect();
            if neighbors.contains(&atom) {
                return Err(HoseError::GraphInconsistency {
                    atom: atom.index(),
                    neighbor: atom.index(),
                });
            }
            if !neighbors.contains(&parent_atom) {
                return Err(HoseError::GraphInconsistency {
                    atom: atom.index(),
                    neighbor: parent_atom.index(),
                });
            }

            if neighbors.len() == 1 {
                let seed = tree.nodes[id]
                    .rank_score
                    .saturating_mul(TERMINAL_SEED_MULTIPLIER);
                next.push(tree.push(SphereNode {
                    kind: NodeKind::Terminal,
                    parent: Parent::Node(id),
                    sphere,
                    bond: BondClass::None,
                    degree: 0,
                    atomic_num: 0,
                    formal_charge: 0,
                    rank_score: seed,
                    subtree_degree_sum: 0,
                    sort_order: 1,
                    children: Vec::new(),
                }));
                continue;
            }

            for m in neighbors {
                if m == parent_atom {
                    continue;
                }
                let bond = bond_class(mol, atom, m)?;
                let kind = if seen.contains(&m) {
                    NodeKind::RingClosure(m)
                } else {
                    reached.push(m);
                    NodeKind::Atom(m)
                };
                let node = atom_node(mol, kind, m, Parent::Node(id), sphere, bond);
                next.push(tree.push(node));
            }
        }

        seen.extend(reached);
        trace!(sphere = sphere + 1, nodes = next.len(), "sphere expanded");
        tree.spheres.push(next);
    }

    Ok(tree)
}
