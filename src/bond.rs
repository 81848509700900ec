/// Bond multiplicity as stored on the graph.
///
/// `Aromatic` is its own order rather than a 1.5 approximation: aromatic
/// bonds read from lowercase SMILES atoms keep that label, and consumers
/// that care (the HOSE encoder does) treat it as a separate class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Valence units the bond uses up on each endpoint when counting
    /// implicit hydrogens. Aromatic bonds count as one; the extra pi
    /// contribution is handled per atom.
    pub fn valence_contribution(self) -> u8 {
        match self {
            BondOrder::Single | BondOrder::Aromatic => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bond {
    pub order: BondOrder,
}

impl Bond {
    pub fn new(order: BondOrder) -> Self {
        Self { order }
    }
}

impl crate::traits::HasBondOrder for Bond {
    fn bond_order(&self) -> BondOrder {
        self.order
    }
}
