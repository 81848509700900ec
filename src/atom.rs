/// Default atom type for a molecular graph node.
///
/// `Atom` stores what the HOSE encoder and the SMILES reader need to know
/// about a node: its element, charge, isotope label, how many hydrogens are
/// folded into it, and whether it was read as aromatic. Stereochemistry is
/// not modelled; chirality marks in SMILES input are accepted and dropped.
///
/// # Examples
///
/// ```
/// use hosecrab::Atom;
///
/// let carbon = Atom {
///     atomic_num: 6,
///     formal_charge: 0,
///     isotope: 0,
///     hydrogen_count: 3,
///     is_aromatic: false,
/// };
/// assert_eq!(carbon.atomic_num, 6);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Atom {
    /// Atomic number (1 = H, 6 = C, 7 = N, …). `0` marks a pseudo atom
    /// such as an R group or the SMILES wildcard `*`.
    pub atomic_num: u8,
    /// Formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Mass number. `0` means natural isotopic abundance.
    pub isotope: u16,
    /// Number of implicit (suppressed) hydrogens on this atom.
    ///
    /// These are not graph nodes. HOSE center codes add this count to the
    /// number of explicit bonds.
    pub hydrogen_count: u8,
    /// Whether the atom was written as aromatic.
    pub is_aromatic: bool,
}

impl Atom {
    /// A neutral, non-aromatic atom with no implicit hydrogens.
    pub fn new(atomic_num: u8) -> Self {
        Self {
            atomic_num,
            ..Self::default()
        }
    }

    pub fn with_hydrogens(mut self, count: u8) -> Self {
        self.hydrogen_count = count;
        self
    }

    pub fn with_charge(mut self, charge: i8) -> Self {
        self.formal_charge = charge;
        self
    }

    pub fn aromatic(mut self) -> Self {
        self.is_aromatic = true;
        self
    }
}

impl crate::traits::HasAtomicNum for Atom {
    fn atomic_num(&self) -> u8 {
        self.atomic_num
    }
}

impl crate::traits::HasFormalCharge for Atom {
    fn formal_charge(&self) -> i8 {
        self.formal_charge
    }
}

impl crate::traits::HasIsotope for Atom {
    fn isotope(&self) -> u16 {
        self.isotope
    }
}

impl crate::traits::HasHydrogenCount for Atom {
    fn hydrogen_count(&self) -> u8 {
        self.hydrogen_count
    }
}

impl crate::traits::HasAromaticity for Atom {
    fn is_aromatic(&self) -> bool {
        self.is_aromatic
    }
}
