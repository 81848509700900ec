use crate::smiles::error::SmilesError;
use crate::smiles::tokenizer::{AtomToken, BondToken, Token};

#[derive(Debug, Clone)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub bond: Option<BondToken>,
}

/// Atoms in input order plus the edges between them, with branches and
/// ring closures already resolved.
#[derive(Debug, Clone, Default)]
pub struct ParseTree {
    pub atoms: Vec<AtomToken>,
    pub edges: Vec<Edge>,
}

impl ParseTree {
    fn has_edge(&self, a: usize, b: usize) -> bool {
        self.edges
            .iter()
            .any(|e| (e.from == a && e.to == b) || (e.from == b && e.to == a))
    }
}

pub fn build_parse_tree(tokens: &[Token]) -> Result<ParseTree, SmilesError> {
    let mut tree = ParseTree::default();
    let mut stack: Vec<usize> = Vec::new();
    let mut current: Option<usize> = None;
    let mut pending_bond: Option<BondToken> = None;
    let mut ring_opens: Vec<Option<(usize, Option<BondToken>)>> = vec![None; 100];

    for token in tokens {
        match token {
            Token::Atom(atom_tok) => {
                let idx = tree.atoms.len();
                tree.atoms.push(atom_tok.clone());
                if let Some(cur) = current {
                    tree.edges.push(Edge {
                        from: cur,
                        to: idx,
                        bond: pending_bond.take(),
                    });
                } else {
                    pending_bond = None;
                }
                current = Some(idx);
            }
            Token::Bond(b) => pending_bond = Some(*b),
            Token::RingClosure { bond, digit, pos } => {
                let cur = current.ok_or(SmilesError::InvalidRingBond {
                    digit: *digit,
                    pos: *pos,
                })?;
                let slot = &mut ring_opens[*digit as usize];
                match slot.take() {
                    Some((open_idx, open_bond)) => {
                        let bond = match (*bond, open_bond) {
                            (Some(b1), Some(b2)) if b1 != b2 => {
                                return Err(SmilesError::RingBondConflict { digit: *digit });
                            }
                            (b1, b2) => b1.or(b2),
                        };
                        if open_idx == cur || tree.has_edge(open_idx, cur) {
                            return Err(SmilesError::DuplicateBond { digit: *digit });
                        }
                        tree.edges.push(Edge {
                            from: open_idx,
                            to: cur,
                            bond,
                        });
                    }
                    None => *slot = Some((cur, *bond)),
                }
            }
            Token::OpenParen(pos) => {
                let cur = current.ok_or(SmilesError::UnmatchedParen { pos: *pos })?;
                stack.push(cur);
            }
            Token::CloseParen(pos) => {
                current = Some(stack.pop().ok_or(SmilesError::UnmatchedParen { pos: *pos })?);
                pending_bond = None;
            }
            Token::Dot(_) => {
                current = None;
                pending_bond = None;
            }
        }
    }

    if !stack.is_empty() {
        return Err(SmilesError::UnmatchedParen { pos: 0 });
    }

    if let Some(digit) = ring_opens.iter().position(Option::is_some) {
        return Err(SmilesError::UnclosedRing {
            digit: digit as u16,
        });
    }

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smiles::tokenizer::tokenize;

    fn tree(s: &str) -> ParseTree {
        build_parse_tree(&tokenize(s).unwrap()).unwrap()
    }

    #[test]
    fn ethane_tree() {
        let t = tree("CC");
        assert_eq!(t.atoms.len(), 2);
        assert_eq!(t.edges.len(), 1);
        assert_eq!((t.edges[0].from, t.edges[0].to), (0, 1));
    }

    #[test]
    fn cyclohexane_tree() {
        let t = tree("C1CCCCC1");
        assert_eq!(t.atoms.len(), 6);
        assert_eq!(t.edges.len(), 6);
        assert!(t.has_edge(0, 5));
    }

    #[test]
    fn branch_tree() {
        let t = tree("CC(C)C");
        assert_eq!(t.atoms.len(), 4);
        assert!(t.has_edge(1, 2));
        assert!(t.has_edge(1, 3));
        assert!(!t.has_edge(2, 3));
    }

    #[test]
    fn ring_bond_from_opening_side() {
        let t = tree("C=1CCC1");
        let closure = t.edges.iter().find(|e| e.from == 0 && e.to == 3).unwrap();
        assert_eq!(closure.bond, Some(BondToken::Double));
    }

    #[test]
    fn unclosed_ring_error() {
        let err = build_parse_tree(&tokenize("C1CC").unwrap()).unwrap_err();
        assert_eq!(err, SmilesError::UnclosedRing { digit: 1 });
    }

    #[test]
    fn conflicting_ring_bonds() {
        let err = build_parse_tree(&tokenize("C=1CC#1").unwrap()).unwrap_err();
        assert_eq!(err, SmilesError::RingBondConflict { digit: 1 });
    }

    #[test]
    fn unmatched_paren_error() {
        assert!(build_parse_tree(&tokenize("C(C").unwrap()).is_err());
        assert!(build_parse_tree(&tokenize("C)C").unwrap()).is_err());
    }

    #[test]
    fn disconnected() {
        let t = tree("[Na+].[Cl-]");
        assert_eq!(t.atoms.len(), 2);
        assert!(t.edges.is_empty());
    }
}
