//! Canonical ordering of a [`SphereTree`].
//!
//! Scores are built in five passes so that a node's place in its sphere
//! depends on its element, its bond, everything below it and finally the
//! position of its parent. Every sort is descending, and after each sort
//! `sort_order` is reassigned as `len - position`. Equal scores are settled
//! by the structure of the subtrees, never by the order nodes were created.

use crate::hose::error::{HoseError, Result};
use crate::hose::sphere::{NodeKind, SphereTree};
use crate::hose::table::{self, MAX_SPHERES, POSITION_EXPONENT_OFFSET};

/// Kind, element, charge, bond class, degree and the sorted classes of the
/// children.
type SubtreeKey = (u8, u8, i8, u8, usize, Vec<usize>);

pub(crate) fn rank(tree: &mut SphereTree) -> Result<()> {
    let classes = subtree_classes(tree);
    propagate_degrees(tree);
    score_locally(tree, &classes);
    propagate_scores(tree);
    fold_in_degrees(tree, &classes);
    weight_positions(tree, &classes)
}

/// Numbers the distinct subtrees of every sphere, outermost first. Two nodes
/// of one sphere share a class exactly when their subtrees look the same.
fn subtree_classes(tree: &SphereTree) -> Vec<usize> {
    let mut classes = vec![0; tree.nodes.len()];
    for sphere in (0..tree.spheres.len()).rev() {
        let mut keyed: Vec<(SubtreeKey, usize)> = tree.spheres[sphere]
            .iter()
            .map(|&id| {
                let node = &tree.nodes[id];
                let mut children: Vec<usize> = node.children.iter().map(|&c| classes[c]).collect();
                children.sort_unstable();
                let kind = match node.kind {
                    NodeKind::Terminal => 0,
                    NodeKind::RingClosure(_) => 1,
                    NodeKind::Atom(_) => 2,
                };
                let key = (
                    kind,
                    node.atomic_num,
                    node.formal_charge,
                    node.bond.numeric(),
                    node.degree,
                    children,
                );
                (key, id)
            })
            .collect();
        keyed.sort();

        let mut class = 0;
        for i in 0..keyed.len() {
            if i > 0 && keyed[i].0 != keyed[i - 1].0 {
                class += 1;
            }
            classes[keyed[i].1] = class;
        }
    }
    classes
}

/// Each node hands its own degree to its parent.
fn propagate_degrees(tree: &mut SphereTree) {
    for sphere in (0..tree.spheres.len()).rev() {
        for i in 0..tree.spheres[sphere].len() {
            let node = &tree.nodes[tree.spheres[sphere][i]];
            let (parent, degree) = (node.parent, node.degree as i64);
            tree.add_to_parent_degrees(parent, degree);
        }
    }
}

fn score_locally(tree: &mut SphereTree, classes: &[usize]) {
    for sphere in 0..tree.spheres.len() {
        for i in 0..tree.spheres[sphere].len() {
            let node = &mut tree.nodes[tree.spheres[sphere][i]];
            let element = match node.kind {
                NodeKind::Atom(_) | NodeKind::RingClosure(_) => table::element_rank(node.atomic_num),
                NodeKind::Terminal => table::symbol_rank(",").unwrap_or_default(),
            };
            node.rank_score += i128::from(element + table::bond_rank(node.bond));
        }
        sort_sphere(tree, sphere, classes);
    }
}

fn propagate_scores(tree: &mut SphereTree) {
    for sphere in (0..tree.spheres.len()).rev() {
        for i in 0..tree.spheres[sphere].len() {
            let node = &tree.nodes[tree.spheres[sphere][i]];
            let (parent, score) = (node.parent, node.rank_score);
            tree.add_to_parent_score(parent, score);
        }
    }
}

fn fold_in_degrees(tree: &mut SphereTree, classes: &[usize]) {
    for sphere in 0..tree.spheres.len() {
        for i in 0..tree.spheres[sphere].len() {
            let node = &mut tree.nodes[tree.spheres[sphere][i]];
            node.rank_score += i128::from(node.subtree_degree_sum);
        }
        sort_sphere(tree, sphere, classes);
    }
}

/// Root outward: a node inherits its parent's (already weighted) score plus
/// the parent's position scaled by `10^(max_depth - f + 7)`, `f` being the
/// node's 0-based sphere.
fn weight_positions(tree: &mut SphereTree, classes: &[usize]) -> Result<()> {
    let overflow = HoseError::DepthOverflow {
        requested: tree.max_depth,
        max: MAX_SPHERES,
    };
    for sphere in 0..tree.spheres.len() {
        let exponent = (tree.max_depth + POSITION_EXPONENT_OFFSET as usize)
            .checked_sub(sphere)
            .and_then(|e| u32::try_from(e).ok())
            .ok_or_else(|| overflow.clone())?;
        let weight = 10i128.checked_pow(exponent).ok_or_else(|| overflow.clone())?;

        for i in 0..tree.spheres[sphere].len() {
            let id = tree.spheres[sphere][i];
            let (parent_order, parent_score) = tree.parent_rank(tree.nodes[id].parent);
            let node = &mut tree.nodes[id];
            node.rank_score = weight
                .checked_mul(parent_order as i128)
                .and_then(|w| w.checked_add(parent_score))
                .and_then(|w| w.checked_add(node.rank_score))
                .ok_or_else(|| overflow.clone())?;
        }
        sort_sphere(tree, sphere, classes);
    }
    Ok(())
}

fn sort_sphere(tree: &mut SphereTree, sphere: usize, classes: &[usize]) {
    let mut ids = std::mem::take(&mut tree.spheres[sphere]);
    ids.sort_by(|&a, &b| {
        tree.nodes[b]
            .rank_score
            .cmp(&tree.nodes[a].rank_score)
            .then(classes[b].cmp(&classes[a]))
    });
    let len = ids.len();
    for (pos, &id) in ids.iter().enumerate() {
        tree.nodes[id].sort_order = len - pos;
    }
    tree.spheres[sphere] = ids;
}
