pub mod atom;
pub mod bond;
pub mod element;
pub mod hose;
pub mod mol;
pub mod rings;
pub mod smiles;
pub mod traits;

pub use atom::Atom;
pub use bond::{Bond, BondOrder};
pub use element::Element;
pub use hose::{hose_code, HoseCodeGenerator, HoseError, HoseOptions, SphereTree};
pub use mol::Mol;
pub use rings::RingInfo;
pub use smiles::{from_smiles, SmilesError};
pub use traits::{
    HasAromaticity, HasAtomicNum, HasBondOrder, HasFormalCharge, HasHydrogenCount, HasIsotope,
};
