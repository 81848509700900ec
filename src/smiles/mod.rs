//! SMILES reader producing `Mol<Atom, Bond>`.
//!
//! Aromatic input is kept aromatic: lowercase atoms are flagged on the atom
//! and implicit bonds between two aromatic atoms get [`BondOrder::Aromatic`].
//! No kekulization or aromaticity perception is performed.
//!
//! [`BondOrder::Aromatic`]: crate::bond::BondOrder::Aromatic

mod builder;
pub mod error;
mod parse_tree;
mod tokenizer;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::mol::Mol;
pub use error::SmilesError;

pub fn from_smiles(s: &str) -> Result<Mol<Atom, Bond>, SmilesError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(SmilesError::EmptyInput);
    }
    let tokens = tokenizer::tokenize(trimmed)?;
    let tree = parse_tree::build_parse_tree(&tokens)?;
    Ok(builder::build_mol(&tree))
}
