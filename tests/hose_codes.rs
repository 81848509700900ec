use hosecrab::{from_smiles, hose_code, Atom, Bond, HoseCodeGenerator, HoseError, Mol};
use petgraph::graph::NodeIndex;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Copy of `mol` with atom `i` stored at index `order[i]` and the bonds
/// added in reverse order.
fn permuted(mol: &Mol<Atom, Bond>, order: &[usize]) -> Mol<Atom, Bond> {
    let mut slots: Vec<Option<Atom>> = vec![None; mol.atom_count()];
    for atom in mol.atoms() {
        slots[order[atom.index()]] = Some(mol.atom(atom).clone());
    }
    let mut out = Mol::new();
    for atom in slots {
        out.add_atom(atom.unwrap());
    }
    let bonds: Vec<_> = mol.bonds().collect();
    for &edge in bonds.iter().rev() {
        let (a, b) = mol.bond_endpoints(edge).unwrap();
        out.add_bond(
            NodeIndex::new(order[b.index()]),
            NodeIndex::new(order[a.index()]),
            mol.bond(edge).clone(),
        );
    }
    out
}

fn orders(n: usize) -> Vec<Vec<usize>> {
    let reversed: Vec<usize> = (0..n).rev().collect();
    let rotated: Vec<usize> = (0..n).map(|i| (i + n / 2 + 1) % n).collect();
    let mut interleaved = vec![0; n];
    let (evens, odds): (Vec<usize>, Vec<usize>) = (0..n).partition(|i| i % 2 == 0);
    for (slot, atom) in evens.into_iter().chain(odds).enumerate() {
        interleaved[atom] = slot;
    }
    vec![reversed, rotated, interleaved]
}

// ---------------------------------------------------------------------------
// 1. Known codes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct CodeEntry {
    smiles: String,
    atom: usize,
    depth: usize,
    code: String,
}

#[test]
fn approval_hose_codes() {
    let data: Vec<CodeEntry> =
        serde_json::from_str(include_str!("approval_data/hose_codes.json")).unwrap();

    let mut failures = Vec::new();
    for entry in &data {
        let mol = from_smiles(&entry.smiles).unwrap();
        let code = hose_code(&mol, NodeIndex::new(entry.atom), entry.depth).unwrap();
        if code != entry.code {
            failures.push(format!(
                "{} atom {} depth {}: expected {:?}, got {:?}",
                entry.smiles, entry.atom, entry.depth, entry.code, code
            ));
        }
    }

    assert!(failures.is_empty(), "{} mismatches:\n{}", failures.len(), failures.join("\n"));
}

// ---------------------------------------------------------------------------
// 2. Insertion order
// ---------------------------------------------------------------------------

const ORDER_CASES: &[&str] = &[
    "CC(C)C",
    "CC(C)(C)O",
    "CC(=O)O",
    "CC(O)CN",
    "CCC(=O)OC",
    "C1CCCCC1",
    "c1ccccc1",
    "n1ccccc1",
    "Cc1ccccc1",
    "Clc1ccccc1",
    "OC(=O)c1ccccc1",
    "OCCNCOC",
];

#[test]
fn codes_ignore_atom_and_bond_order() {
    let generator = HoseCodeGenerator::new();
    for smiles in ORDER_CASES {
        let mol = from_smiles(smiles).unwrap();
        let expected = generator.generate_all(&mol, 6).unwrap();
        for order in orders(mol.atom_count()) {
            let shuffled = permuted(&mol, &order);
            for atom in mol.atoms() {
                let code = generator
                    .generate(&shuffled, NodeIndex::new(order[atom.index()]), 6)
                    .unwrap();
                assert_eq!(code, expected[atom.index()], "{smiles} atom {}", atom.index());
            }
        }
    }
}

#[test]
fn equivalent_atoms_share_codes() {
    let benzene = from_smiles("c1ccccc1").unwrap();
    let codes = HoseCodeGenerator::new().generate_all(&benzene, 6).unwrap();
    assert!(codes.iter().all(|c| *c == codes[0]));

    let isobutane = from_smiles("CC(C)C").unwrap();
    let codes = HoseCodeGenerator::new().generate_all(&isobutane, 4).unwrap();
    assert_eq!(codes[0], codes[2]);
    assert_eq!(codes[0], codes[3]);
    assert_ne!(codes[0], codes[1]);
}

#[test]
fn mirrored_chains_share_code() {
    // N with -CH2-CH2-OH and -CH2-O-CH3, written in either direction
    for smiles in ["OCCNCOC", "COCNCCO"] {
        let mol = from_smiles(smiles).unwrap();
        assert_eq!(
            hose_code(&mol, NodeIndex::new(3), 4).unwrap(),
            "N-3;CC(O,C/C,O/,)",
            "{smiles}"
        );
    }
}

#[test]
fn pyridine_ring_carbon() {
    let mol = from_smiles("n1ccccc1").unwrap();
    let expected = "C-3;*C*C(*N,*C/*C,*&/*&)";
    assert_eq!(hose_code(&mol, NodeIndex::new(2), 4).unwrap(), expected);
    for order in orders(mol.atom_count()) {
        let shuffled = permuted(&mol, &order);
        let code = hose_code(&shuffled, NodeIndex::new(order[2]), 4).unwrap();
        assert_eq!(code, expected);
    }
}

// ---------------------------------------------------------------------------
// 3. Shape of the output
// ---------------------------------------------------------------------------

#[test]
fn every_code_has_at_least_four_spheres() {
    let mol = from_smiles("OC(=O)c1ccccc1Cl").unwrap();
    for depth in 0..=8 {
        for code in HoseCodeGenerator::new().generate_all(&mol, depth).unwrap() {
            let closes = code.matches(')').count();
            assert_eq!(closes, 1, "{code}");
            let body = &code[code.find(';').unwrap() + 1..];
            let delimiters = body.chars().filter(|c| matches!(c, '(' | '/' | ')')).count();
            assert_eq!(delimiters, depth.max(4), "{code}");
        }
    }
}

#[test]
fn errors_leave_no_partial_code() {
    let mol = from_smiles("CCO").unwrap();
    assert!(matches!(
        hose_code(&mol, NodeIndex::new(0), 13),
        Err(HoseError::DepthOverflow { requested: 13, max: 12 })
    ));
    assert!(matches!(
        hose_code(&mol, NodeIndex::new(3), 4),
        Err(HoseError::AtomOutOfRange { index: 3, count: 3 })
    ));
}

#[test]
fn shared_generator_across_threads() {
    let mol = from_smiles("CC(=O)Nc1ccc(O)cc1").unwrap();
    let generator = HoseCodeGenerator::new();
    let expected = generator.generate_all(&mol, 5).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| generator.generate_all(&mol, 5).unwrap()))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}

#[cfg(feature = "serde")]
#[test]
fn options_deserialize_with_defaults() {
    let opts: hosecrab::HoseOptions = serde_json::from_str(r#"{"ring_sizes": true}"#).unwrap();
    assert!(opts.ring_sizes);
    assert!(opts.bremser);
}
