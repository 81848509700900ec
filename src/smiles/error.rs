use thiserror::Error;

/// Errors produced when reading a SMILES string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmilesError {
    /// The input string was empty or contained only whitespace.
    #[error("empty SMILES input")]
    EmptyInput,
    /// An unexpected character was encountered at the given position.
    #[error("unexpected character {ch:?} at position {pos}")]
    UnexpectedChar { pos: usize, ch: char },
    /// An unrecognized element symbol was found.
    #[error("invalid element {text:?} at position {pos}")]
    InvalidElement { pos: usize, text: String },
    /// A bracket atom `[` was opened but never closed with `]`.
    #[error("unclosed bracket atom starting at position {pos}")]
    UnclosedBracket { pos: usize },
    /// A charge specifier inside a bracket atom could not be parsed.
    #[error("invalid charge in bracket atom at position {pos}")]
    InvalidCharge { pos: usize },
    /// A parenthesis was opened without a matching close, or vice versa.
    #[error("unmatched parenthesis at position {pos}")]
    UnmatchedParen { pos: usize },
    /// A ring-closure digit appeared before any atom.
    #[error("ring closure {digit} at position {pos} has no preceding atom")]
    InvalidRingBond { digit: u16, pos: usize },
    /// A ring-opening digit was never matched by a ring-closing digit.
    #[error("ring {digit} was never closed")]
    UnclosedRing { digit: u16 },
    /// Both ends of a ring closure carry different explicit bond symbols.
    #[error("conflicting bond symbols on ring closure {digit}")]
    RingBondConflict { digit: u16 },
    /// A ring closure would join an atom to itself or duplicate a bond.
    #[error("ring closure {digit} duplicates an existing bond")]
    DuplicateBond { digit: u16 },
}
