use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::bond::{Bond, BondOrder};
use crate::mol::Mol;
use crate::smiles::parse_tree::ParseTree;
use crate::smiles::tokenizer::{AtomToken, BondToken};

pub fn build_mol(tree: &ParseTree) -> Mol<Atom, Bond> {
    let mut mol = Mol::new();

    let indices: Vec<NodeIndex> = tree
        .atoms
        .iter()
        .map(|tok| {
            mol.add_atom(Atom {
                atomic_num: tok.element.map_or(0, |e| e.atomic_num()),
                formal_charge: tok.charge,
                isotope: tok.isotope,
                hydrogen_count: 0,
                is_aromatic: tok.is_aromatic,
            })
        })
        .collect();

    for edge in &tree.edges {
        let order = resolve_bond_order(
            edge.bond,
            tree.atoms[edge.from].is_aromatic,
            tree.atoms[edge.to].is_aromatic,
        );
        mol.add_bond(indices[edge.from], indices[edge.to], Bond::new(order));
    }

    for (tok, &idx) in tree.atoms.iter().zip(&indices) {
        let h = if tok.is_bracket {
            tok.hcount.unwrap_or(0)
        } else {
            implicit_hydrogens(&mol, idx, tok)
        };
        mol.atom_mut(idx).hydrogen_count = h;
    }

    mol
}

fn resolve_bond_order(bond: Option<BondToken>, from_aromatic: bool, to_aromatic: bool) -> BondOrder {
    match bond {
        Some(BondToken::Single) => BondOrder::Single,
        Some(BondToken::Double) => BondOrder::Double,
        Some(BondToken::Triple) => BondOrder::Triple,
        Some(BondToken::Aromatic) => BondOrder::Aromatic,
        None if from_aromatic && to_aromatic => BondOrder::Aromatic,
        None => BondOrder::Single,
    }
}

fn implicit_hydrogens(mol: &Mol<Atom, Bond>, node: NodeIndex, tok: &AtomToken) -> u8 {
    let Some(element) = tok.element else {
        return 0;
    };
    let used: u8 = mol
        .bonds_of(node)
        .map(|e| mol.bond(e).order.valence_contribution())
        .fold(0u8, u8::saturating_add);

    let Some(target) = element
        .default_valences()
        .iter()
        .copied()
        .find(|&v| v >= used)
    else {
        return 0;
    };

    let h = target - used;
    if tok.is_aromatic && h > 0 {
        h - 1
    } else {
        h
    }
}
