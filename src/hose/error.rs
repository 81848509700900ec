use thiserror::Error;

/// Errors that abort a HOSE code computation. No partial code is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HoseError {
    /// The graph reported contradictory connectivity around `atom`: a
    /// listed neighbour with no bond to it, a traversal parent missing
    /// from its neighbour list, or a bond from the atom to itself.
    #[error("inconsistent connectivity between atoms {atom} and {neighbor}")]
    GraphInconsistency { atom: usize, neighbor: usize },
    /// The requested number of spheres cannot be encoded.
    #[error("cannot encode {requested} spheres (at most {max})")]
    DepthOverflow { requested: usize, max: usize },
    /// The root atom index is not part of the molecule.
    #[error("atom index {index} out of range for molecule with {count} atoms")]
    AtomOutOfRange { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, HoseError>;
