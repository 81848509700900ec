//! Fixed lookup data of the HOSE notation: symbol priorities, bond ranks and
//! symbols, Bremser substitutions and sphere delimiters.

use tracing::warn;

use crate::element::Element;
use crate::hose::sphere::BondClass;

/// Most spheres a code can carry; one delimiter per sphere is defined.
pub const MAX_SPHERES: usize = 12;

/// Rank of an element with neither a table entry nor isotope data.
pub const UNKNOWN_ELEMENT_RANK: i64 = 800_000;

/// Seed multiplier applied to a terminal placeholder's parent score.
pub(crate) const TERMINAL_SEED_MULTIPLIER: i128 = 1_000_000;

/// Offset added to `max_depth - sphere` to get the positional weight exponent.
pub(crate) const POSITION_EXPONENT_OFFSET: u32 = 7;

const RANKED_SYMBOLS: [(&str, i64); 15] = [
    ("C", 9000),
    ("O", 8900),
    ("N", 8800),
    ("S", 8700),
    ("P", 8600),
    ("Si", 8500),
    ("B", 8400),
    ("F", 8300),
    ("Cl", 8200),
    ("Br", 8100),
    (";", 8000),
    ("I", 7900),
    ("#", 1200),
    ("&", 1100),
    (",", 1000),
];

const SPHERE_DELIMITERS: [&str; MAX_SPHERES] =
    ["(", "/", "/", ")", "/", "/", "/", "/", "/", "/", "/", "/"];

/// Symbol written for a pseudo atom (atomic number 0).
pub const PSEUDO_ATOM_SYMBOL: &str = "R";

/// Priority of a symbol listed in the ranking table.
pub fn symbol_rank(symbol: &str) -> Option<i64> {
    RANKED_SYMBOLS
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|&(_, rank)| rank)
}

/// Priority of an element: the table value when listed, otherwise
/// `800000 - mass number of the major isotope`.
pub fn element_rank(atomic_num: u8) -> i64 {
    match Element::from_atomic_num(atomic_num) {
        Some(element) => symbol_rank(element.symbol()).unwrap_or_else(|| {
            UNKNOWN_ELEMENT_RANK - i64::from(element.major_isotope_mass_number())
        }),
        None => {
            warn!(atomic_num, "no rank or isotope data for element, using fixed rank");
            UNKNOWN_ELEMENT_RANK
        }
    }
}

pub fn bond_rank(bond: BondClass) -> i64 {
    match bond {
        BondClass::None | BondClass::Single => 0,
        BondClass::Double => 200_000,
        BondClass::Triple => 300_000,
        BondClass::Aromatic => 100_000,
    }
}

pub fn bond_symbol(bond: BondClass) -> &'static str {
    match bond {
        BondClass::None | BondClass::Single => "",
        BondClass::Double => "=",
        BondClass::Triple => "%",
        BondClass::Aromatic => "*",
    }
}

/// Element symbol as stored, `R` for pseudo atoms.
pub fn atom_symbol(atomic_num: u8) -> &'static str {
    Element::from_atomic_num(atomic_num).map_or(PSEUDO_ATOM_SYMBOL, Element::symbol)
}

/// Historical one-letter substitutions: Si → Q, Cl → X, Br → Y.
pub fn bremser_symbol(symbol: &str) -> &str {
    match symbol {
        "Si" => "Q",
        "Cl" => "X",
        "Br" => "Y",
        other => other,
    }
}

/// Delimiter closing the 1-based sphere `sphere`.
pub fn sphere_delimiter(sphere: usize) -> Option<&'static str> {
    sphere
        .checked_sub(1)
        .and_then(|i| SPHERE_DELIMITERS.get(i))
        .copied()
}
