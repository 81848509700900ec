//! Canonical HOSE (Hierarchically Ordered Spherical Environment) codes.
//!
//! A code describes the surroundings of one root atom sphere by sphere,
//! where sphere `n` holds the atoms `n` bonds away:
//!
//! ```text
//! C-4;C(O//)
//! ^^^^ center: symbol, bonds + implicit H, charge
//!     ^^^^^^ spheres 1..4, each closed by its delimiter
//! ```
//!
//! Atoms inside a sphere are written in a canonical order, so the code only
//! depends on the structure around the root and never on the order atoms
//! and bonds were added to the [`Mol`].
//!
//! ```
//! use hosecrab::{from_smiles, hose_code};
//! use petgraph::graph::NodeIndex;
//!
//! let ethanol = from_smiles("CCO").unwrap();
//! assert_eq!(hose_code(&ethanol, NodeIndex::new(0), 4).unwrap(), "C-4;C(O//)");
//! ```

mod assemble;
pub mod error;
mod rank;
pub mod sphere;
pub mod table;

use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::mol::Mol;
use crate::traits::{HasAtomicNum, HasBondOrder, HasFormalCharge, HasHydrogenCount};

pub use assemble::charge_code;
pub use error::HoseError;
use error::Result;
pub use sphere::{BondClass, NodeKind, Parent, SphereNode, SphereTree};
pub use table::{bond_symbol, bremser_symbol, MAX_SPHERES};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HoseOptions {
    /// Append the sizes of the smallest rings through the root's bonds to
    /// the center code (`C-3-56;`).
    pub ring_sizes: bool,
    /// Write Si, Cl and Br in the spheres as Q, X and Y.
    pub bremser: bool,
}

impl Default for HoseOptions {
    fn default() -> Self {
        Self {
            ring_sizes: false,
            bremser: true,
        }
    }
}

/// Produces HOSE codes with a fixed set of [`HoseOptions`].
///
/// The generator holds no per-call state and only borrows the molecule, so
/// one instance can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct HoseCodeGenerator {
    options: HoseOptions,
}

impl HoseCodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: HoseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &HoseOptions {
        &self.options
    }

    /// HOSE code of `root` covering `depth` spheres. Codes shorter than four
    /// spheres are padded with empty spheres.
    ///
    /// # Errors
    ///
    /// [`HoseError::DepthOverflow`] when `depth` exceeds [`MAX_SPHERES`],
    /// [`HoseError::AtomOutOfRange`] when `root` is not in `mol`.
    pub fn generate<A, B>(&self, mol: &Mol<A, B>, root: NodeIndex, depth: usize) -> Result<String>
    where
        A: HasAtomicNum + HasFormalCharge + HasHydrogenCount,
        B: HasBondOrder,
    {
        let tree = self.spheres(mol, root, depth)?;
        let mut code = assemble::center_code(mol, root, &self.options);
        code.push_str(&assemble::sphere_code(&tree, &self.options));
        debug!(root = root.index(), depth, code = %code, "generated HOSE code");
        Ok(code)
    }

    /// The ranked sphere tree behind [`generate`](Self::generate), with
    /// every sphere already in canonical order.
    pub fn spheres<A, B>(&self, mol: &Mol<A, B>, root: NodeIndex, depth: usize) -> Result<SphereTree>
    where
        A: HasAtomicNum + HasFormalCharge,
        B: HasBondOrder,
    {
        if depth > MAX_SPHERES {
            return Err(HoseError::DepthOverflow {
                requested: depth,
                max: MAX_SPHERES,
            });
        }
        if !mol.contains_atom(root) {
            return Err(HoseError::AtomOutOfRange {
                index: root.index(),
                count: mol.atom_count(),
            });
        }
        let mut tree = sphere::build(mol, root, depth)?;
        rank::rank(&mut tree)?;
        if let Some(mut collapsed) = tree.collapse_repeats() {
            rank::rank(&mut collapsed)?;
            tree = collapsed;
        }
        Ok(tree)
    }

    /// One code per atom, in atom index order.
    pub fn generate_all<A, B>(&self, mol: &Mol<A, B>, depth: usize) -> Result<Vec<String>>
    where
        A: HasAtomicNum + HasFormalCharge + HasHydrogenCount,
        B: HasBondOrder,
    {
        mol.atoms()
            .map(|atom| self.generate(mol, atom, depth))
            .collect()
    }
}

/// [`HoseCodeGenerator::generate`] with default options.
pub fn hose_code<A, B>(mol: &Mol<A, B>, root: NodeIndex, depth: usize) -> Result<String>
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount,
    B: HasBondOrder,
{
    HoseCodeGenerator::new().generate(mol, root, depth)
}
