use petgraph::graph::NodeIndex;

use crate::hose::sphere::{NodeKind, Parent, SphereTree};
use crate::hose::table;
use crate::hose::HoseOptions;
use crate::mol::Mol;
use crate::rings::RingInfo;
use crate::traits::{HasAtomicNum, HasFormalCharge, HasHydrogenCount};

/// Spheres always written, whatever depth was requested.
const MIN_WRITTEN_SPHERES: usize = 4;

/// Charge suffix: empty when neutral, a bare sign for ±1, otherwise the
/// signed value in single quotes (`'+2'`, `'-3'`).
pub fn charge_code(charge: i8) -> String {
    match charge {
        0 => String::new(),
        1 => "+".to_string(),
        -1 => "-".to_string(),
        c if c > 0 => format!("'+{c}'"),
        c => format!("'{c}'"),
    }
}

/// `symbol-partners[charge][-ringsizes];` for the root atom.
pub(crate) fn center_code<A, B>(mol: &Mol<A, B>, root: NodeIndex, options: &HoseOptions) -> String
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount,
{
    let atom = mol.atom(root);
    let partners = mol.degree(root) + usize::from(atom.hydrogen_count());

    let mut code = String::new();
    code.push_str(table::atom_symbol(atom.atomic_num()));
    code.push('-');
    code.push_str(&partners.to_string());
    code.push_str(&charge_code(atom.formal_charge()));

    if options.ring_sizes {
        let sizes = RingInfo::smallest_bond_rings(mol).atom_ring_sizes(mol, root);
        if !sizes.is_empty() {
            code.push('-');
            for size in sizes {
                code.push_str(&size.to_string());
            }
        }
    }

    code.push(';');
    code
}

/// Writes the ranked spheres with their delimiters, padded to four spheres.
///
/// Expects a tree from [`HoseCodeGenerator::spheres`], where every atom
/// appears at most once per sphere.
///
/// [`HoseCodeGenerator::spheres`]: crate::hose::HoseCodeGenerator::spheres
pub(crate) fn sphere_code(tree: &SphereTree, options: &HoseOptions) -> String {
    let mut code = String::new();
    for sphere in 0..tree.max_depth() {
        let mut branch: Option<Parent> = None;
        for node in tree.nodes_in_sphere(sphere) {
            if branch.is_some_and(|b| b != node.parent) {
                code.push(',');
            }
            branch = Some(node.parent);

            match node.kind {
                NodeKind::Terminal => {}
                NodeKind::RingClosure(_) => {
                    code.push_str(table::bond_symbol(node.bond));
                    code.push('&');
                }
                NodeKind::Atom(_) => {
                    code.push_str(table::bond_symbol(node.bond));
                    let symbol = table::atom_symbol(node.atomic_num);
                    if options.bremser {
                        code.push_str(table::bremser_symbol(symbol));
                    } else {
                        code.push_str(symbol);
                    }
                    code.push_str(&charge_code(node.formal_charge));
                }
            }
        }
        code.push_str(table::sphere_delimiter(sphere + 1).unwrap_or_default());
    }

    for sphere in tree.max_depth()..MIN_WRITTEN_SPHERES {
        code.push_str(table::sphere_delimiter(sphere + 1).unwrap_or_default());
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hose::HoseCodeGenerator;
    use crate::smiles::from_smiles;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn spheres(smiles: &str, root: usize, depth: usize, options: &HoseOptions) -> String {
        let mol = from_smiles(smiles).unwrap();
        let tree = HoseCodeGenerator::new().spheres(&mol, n(root), depth).unwrap();
        sphere_code(&tree, options)
    }

    #[test]
    fn charge_codes() {
        assert_eq!(charge_code(0), "");
        assert_eq!(charge_code(1), "+");
        assert_eq!(charge_code(-1), "-");
        assert_eq!(charge_code(2), "'+2'");
        assert_eq!(charge_code(-2), "'-2'");
        assert_eq!(charge_code(3), "'+3'");
    }

    #[test]
    fn center_counts_bonds_and_hydrogens() {
        let opts = HoseOptions::default();
        let mol = from_smiles("CC(=O)[O-]").unwrap();
        assert_eq!(center_code(&mol, n(0), &opts), "C-4;");
        assert_eq!(center_code(&mol, n(1), &opts), "C-3;");
        assert_eq!(center_code(&mol, n(3), &opts), "O-1-;");
    }

    #[test]
    fn center_keeps_plain_symbol() {
        let mol = from_smiles("CCl").unwrap();
        assert_eq!(center_code(&mol, n(1), &HoseOptions::default()), "Cl-1;");
    }

    #[test]
    fn center_ring_sizes() {
        let opts = HoseOptions {
            ring_sizes: true,
            ..HoseOptions::default()
        };
        let mol = from_smiles("C1CCC2(CC1)CCC2").unwrap();
        assert_eq!(center_code(&mol, n(3), &opts), "C-4-46;");
        assert_eq!(center_code(&mol, n(0), &opts), "C-4-6;");

        let chain = from_smiles("CCC").unwrap();
        assert_eq!(center_code(&chain, n(1), &opts), "C-4;");
    }

    #[test]
    fn empty_spheres_still_delimited() {
        assert_eq!(spheres("C", 0, 4, &HoseOptions::default()), "(//)");
        assert_eq!(spheres("C", 0, 6, &HoseOptions::default()), "(//)//");
    }

    #[test]
    fn shallow_depth_is_padded() {
        let opts = HoseOptions::default();
        assert_eq!(spheres("CCO", 0, 1, &opts), "C(//)");
        assert_eq!(spheres("CCO", 0, 2, &opts), "C(O//)");
        assert_eq!(spheres("CCO", 0, 0, &opts), "(//)");
    }

    #[test]
    fn terminals_separate_branches() {
        assert_eq!(spheres("CCC", 1, 4, &HoseOptions::default()), "CC(,//)");
    }

    #[test]
    fn sphere_atoms_carry_charge() {
        assert_eq!(
            spheres("CC(=O)[O-]", 1, 2, &HoseOptions::default()),
            "=OCO-(,,//)"
        );
    }

    #[test]
    fn bremser_toggle() {
        let on = HoseOptions::default();
        let off = HoseOptions {
            bremser: false,
            ..HoseOptions::default()
        };
        assert_eq!(spheres("CCl", 0, 4, &on), "X(//)");
        assert_eq!(spheres("CCl", 0, 4, &off), "Cl(//)");
        assert_eq!(spheres("C[Si](C)(C)C", 0, 1, &on), "Q(//)");
    }

    #[test]
    fn ring_closure_stops_branch() {
        assert_eq!(
            spheres("C1CC1", 0, 6, &HoseOptions::default()),
            "CC(&,&//)//"
        );
    }

    #[test]
    fn four_ring_closes_on_far_atom() {
        assert_eq!(
            spheres("C1CCC1", 0, 4, &HoseOptions::default()),
            "CC(C,&/&/)"
        );
    }

    #[test]
    fn atom_met_twice_is_written_once() {
        assert_eq!(
            spheres("c1ccccc1", 0, 4, &HoseOptions::default()),
            "*C*C(*C,*C/*C,*&/*&)"
        );
    }
}
