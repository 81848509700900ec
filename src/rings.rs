use std::collections::VecDeque;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::mol::Mol;

/// Size of the smallest cycle through every bond.
///
/// For each bond `a–b` this is one plus the shortest `a → b` path that does
/// not use the bond itself; acyclic bonds get `None`. The per-atom view
/// (`atom_ring_sizes`) is what HOSE center codes report when ring sizes are
/// requested.
#[derive(Debug, Clone)]
pub struct RingInfo {
    bond_rings: Vec<Option<usize>>,
}

impl RingInfo {
    pub fn smallest_bond_rings<A, B>(mol: &Mol<A, B>) -> Self {
        let bond_rings = mol
            .bonds()
            .map(|edge| {
                let (a, b) = mol.bond_endpoints(edge)?;
                shortest_detour(mol, a, b).map(|len| len + 1)
            })
            .collect();
        Self { bond_rings }
    }

    pub fn bond_ring_size(&self, edge: EdgeIndex) -> Option<usize> {
        self.bond_rings.get(edge.index()).copied().flatten()
    }

    pub fn is_ring_bond(&self, edge: EdgeIndex) -> bool {
        self.bond_ring_size(edge).is_some()
    }

    pub fn is_ring_atom<A, B>(&self, mol: &Mol<A, B>, atom: NodeIndex) -> bool {
        mol.bonds_of(atom).any(|e| self.is_ring_bond(e))
    }

    /// Distinct ring sizes around `atom`, ascending.
    pub fn atom_ring_sizes<A, B>(&self, mol: &Mol<A, B>, atom: NodeIndex) -> Vec<usize> {
        let mut sizes: Vec<usize> = mol
            .bonds_of(atom)
            .filter_map(|e| self.bond_ring_size(e))
            .collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }
}

/// Length in bonds of the shortest `from → to` path that skips the direct
/// `from–to` bond.
fn shortest_detour<A, B>(mol: &Mol<A, B>, from: NodeIndex, to: NodeIndex) -> Option<usize> {
    let mut dist = vec![usize::MAX; mol.atom_count()];
    dist[from.index()] = 0;
    let mut queue = VecDeque::from([from]);
    while let Some(cur) = queue.pop_front() {
        let d = dist[cur.index()];
        for nb in mol.neighbors(cur) {
            if cur == from && nb == to {
                continue;
            }
            if dist[nb.index()] == usize::MAX {
                if nb == to {
                    return Some(d + 1);
                }
                dist[nb.index()] = d + 1;
                queue.push_back(nb);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smiles::from_smiles;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    #[test]
    fn cyclohexane() {
        let mol = from_smiles("C1CCCCC1").unwrap();
        let ri = RingInfo::smallest_bond_rings(&mol);
        for e in mol.bonds() {
            assert_eq!(ri.bond_ring_size(e), Some(6));
        }
        assert_eq!(ri.atom_ring_sizes(&mol, n(0)), vec![6]);
    }

    #[test]
    fn cyclopropane() {
        let mol = from_smiles("C1CC1").unwrap();
        let ri = RingInfo::smallest_bond_rings(&mol);
        assert_eq!(ri.atom_ring_sizes(&mol, n(2)), vec![3]);
    }

    #[test]
    fn acyclic() {
        let mol = from_smiles("CCCC").unwrap();
        let ri = RingInfo::smallest_bond_rings(&mol);
        assert!(mol.bonds().all(|e| !ri.is_ring_bond(e)));
        assert!(ri.atom_ring_sizes(&mol, n(1)).is_empty());
    }

    #[test]
    fn substituent_is_not_in_ring() {
        let mol = from_smiles("Cc1ccccc1").unwrap();
        let ri = RingInfo::smallest_bond_rings(&mol);
        assert!(!ri.is_ring_atom(&mol, n(0)));
        assert!(ri.is_ring_atom(&mol, n(1)));
        assert_eq!(ri.atom_ring_sizes(&mol, n(1)), vec![6]);
    }

    #[test]
    fn naphthalene_fusion_atom() {
        let mol = from_smiles("c1ccc2ccccc2c1").unwrap();
        let ri = RingInfo::smallest_bond_rings(&mol);
        assert_eq!(ri.atom_ring_sizes(&mol, n(3)), vec![6]);
    }

    #[test]
    fn spiro_center_sees_both_rings() {
        let mol = from_smiles("C1CCC2(CC1)CCC2").unwrap();
        let ri = RingInfo::smallest_bond_rings(&mol);
        assert_eq!(ri.atom_ring_sizes(&mol, n(3)), vec![4, 6]);
    }
}
