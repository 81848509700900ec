use crate::element::Element;
use crate::smiles::error::SmilesError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Atom(AtomToken),
    Bond(BondToken),
    RingClosure {
        bond: Option<BondToken>,
        digit: u16,
        pos: usize,
    },
    OpenParen(usize),
    CloseParen(usize),
    Dot(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomToken {
    /// `None` for the `*` wildcard.
    pub element: Option<Element>,
    pub is_aromatic: bool,
    pub isotope: u16,
    pub hcount: Option<u8>,
    pub charge: i8,
    pub is_bracket: bool,
}

/// Directional bonds (`/`, `\`) carry no stereo here and read as single.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondToken {
    Single,
    Double,
    Triple,
    Aromatic,
}

// Two-letter symbols come first so `Cl` is not read as `C` + `l`.
const ORGANIC_SUBSET: [(&str, Element, bool); 16] = [
    ("Cl", Element::Cl, false),
    ("Br", Element::Br, false),
    ("B", Element::B, false),
    ("C", Element::C, false),
    ("N", Element::N, false),
    ("O", Element::O, false),
    ("P", Element::P, false),
    ("S", Element::S, false),
    ("F", Element::F, false),
    ("I", Element::I, false),
    ("b", Element::B, true),
    ("c", Element::C, true),
    ("n", Element::N, true),
    ("o", Element::O, true),
    ("p", Element::P, true),
    ("s", Element::S, true),
];

const BRACKET_AROMATIC: [(&str, Element); 8] = [
    ("se", Element::Se),
    ("te", Element::Te),
    ("b", Element::B),
    ("c", Element::C),
    ("n", Element::N),
    ("o", Element::O),
    ("p", Element::P),
    ("s", Element::S),
];

pub fn tokenize(input: &str) -> Result<Vec<Token>, SmilesError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            ' ' | '\t' | '\r' | '\n' => i += 1,
            '[' => {
                let (tok, next) = parse_bracket_atom(&chars, i)?;
                tokens.push(Token::Atom(tok));
                i = next;
            }
            '*' => {
                tokens.push(Token::Atom(bare_atom(None, false)));
                i += 1;
            }
            '-' | '/' | '\\' => {
                tokens.push(Token::Bond(BondToken::Single));
                i += 1;
            }
            '=' => {
                tokens.push(Token::Bond(BondToken::Double));
                i += 1;
            }
            '#' => {
                tokens.push(Token::Bond(BondToken::Triple));
                i += 1;
            }
            ':' => {
                tokens.push(Token::Bond(BondToken::Aromatic));
                i += 1;
            }
            '(' => {
                tokens.push(Token::OpenParen(i));
                i += 1;
            }
            ')' => {
                tokens.push(Token::CloseParen(i));
                i += 1;
            }
            '.' => {
                tokens.push(Token::Dot(i));
                i += 1;
            }
            '%' => {
                let digit = parse_percent_ring(&chars, i)?;
                let bond = try_consume_pending_bond(&mut tokens);
                tokens.push(Token::RingClosure { bond, digit, pos: i });
                i += 3;
            }
            d @ '0'..='9' => {
                let bond = try_consume_pending_bond(&mut tokens);
                tokens.push(Token::RingClosure {
                    bond,
                    digit: d as u16 - '0' as u16,
                    pos: i,
                });
                i += 1;
            }
            _ => {
                let (element, aromatic, len) = organic_atom(&chars, i)
                    .ok_or(SmilesError::UnexpectedChar { pos: i, ch })?;
                tokens.push(Token::Atom(bare_atom(Some(element), aromatic)));
                i += len;
            }
        }
    }

    Ok(tokens)
}

fn organic_atom(chars: &[char], i: usize) -> Option<(Element, bool, usize)> {
    ORGANIC_SUBSET.iter().find_map(|&(pat, element, aromatic)| {
        let len = pat.chars().count();
        let matches = chars.len() >= i + len && pat.chars().zip(&chars[i..]).all(|(p, &c)| p == c);
        matches.then_some((element, aromatic, len))
    })
}

fn bare_atom(element: Option<Element>, aromatic: bool) -> AtomToken {
    AtomToken {
        element,
        is_aromatic: aromatic,
        isotope: 0,
        hcount: None,
        charge: 0,
        is_bracket: false,
    }
}

fn try_consume_pending_bond(tokens: &mut Vec<Token>) -> Option<BondToken> {
    match tokens.last() {
        Some(Token::Bond(b)) => {
            let b = *b;
            tokens.pop();
            Some(b)
        }
        _ => None,
    }
}

fn parse_percent_ring(chars: &[char], start: usize) -> Result<u16, SmilesError> {
    match (chars.get(start + 1), chars.get(start + 2)) {
        (Some(a), Some(b)) if a.is_ascii_digit() && b.is_ascii_digit() => {
            Ok((*a as u16 - '0' as u16) * 10 + (*b as u16 - '0' as u16))
        }
        _ => Err(SmilesError::UnexpectedChar { pos: start, ch: '%' }),
    }
}

fn parse_bracket_atom(chars: &[char], start: usize) -> Result<(AtomToken, usize), SmilesError> {
    let mut i = start + 1;

    let isotope = parse_number(chars, &mut i).unwrap_or(0);
    let (element, is_aromatic) = parse_bracket_element(chars, &mut i, start)?;
    skip_chirality(chars, &mut i);
    let hcount = parse_hcount(chars, &mut i);
    let charge = parse_charge(chars, &mut i, start)?;

    // Atom classes are accepted and dropped.
    if chars.get(i) == Some(&':') {
        i += 1;
        parse_number(chars, &mut i);
    }

    if chars.get(i) != Some(&']') {
        return Err(SmilesError::UnclosedBracket { pos: start });
    }

    Ok((
        AtomToken {
            element,
            is_aromatic,
            isotope,
            hcount: Some(hcount.unwrap_or(0)),
            charge,
            is_bracket: true,
        },
        i + 1,
    ))
}

fn parse_number(chars: &[char], i: &mut usize) -> Option<u16> {
    let mut val: Option<u16> = None;
    while let Some(d) = chars.get(*i).and_then(|c| c.to_digit(10)) {
        val = Some(val.unwrap_or(0).saturating_mul(10).saturating_add(d as u16));
        *i += 1;
    }
    val
}

fn parse_bracket_element(
    chars: &[char],
    i: &mut usize,
    bracket_start: usize,
) -> Result<(Option<Element>, bool), SmilesError> {
    let Some(&first) = chars.get(*i) else {
        return Err(SmilesError::UnclosedBracket { pos: bracket_start });
    };

    if first == '*' {
        *i += 1;
        return Ok((None, false));
    }

    for &(pat, elem) in &BRACKET_AROMATIC {
        let len = pat.len();
        if chars.len() >= *i + len && pat.chars().zip(&chars[*i..]).all(|(p, &c)| p == c) {
            *i += len;
            return Ok((Some(elem), true));
        }
    }

    if first.is_ascii_uppercase() {
        if let Some(&second) = chars.get(*i + 1).filter(|c| c.is_ascii_lowercase()) {
            let sym: String = [first, second].iter().collect();
            if let Some(e) = Element::from_symbol(&sym) {
                *i += 2;
                return Ok((Some(e), false));
            }
        }
        if let Some(e) = Element::from_symbol(&first.to_string()) {
            *i += 1;
            return Ok((Some(e), false));
        }
    }

    Err(SmilesError::InvalidElement {
        pos: *i,
        text: first.to_string(),
    })
}

fn skip_chirality(chars: &[char], i: &mut usize) {
    if chars.get(*i) != Some(&'@') {
        return;
    }
    while chars.get(*i) == Some(&'@') {
        *i += 1;
    }
    // @TH1, @SP2, @OH15 and friends
    if chars.get(*i).is_some_and(|c| c.is_ascii_uppercase() && *c != 'H') {
        while chars.get(*i).is_some_and(|c| c.is_ascii_uppercase()) {
            *i += 1;
        }
        parse_number(chars, i);
    }
}

fn parse_hcount(chars: &[char], i: &mut usize) -> Option<u8> {
    if chars.get(*i) != Some(&'H') {
        return None;
    }
    *i += 1;
    match chars.get(*i).and_then(|c| c.to_digit(10)) {
        Some(d) => {
            *i += 1;
            Some(d as u8)
        }
        None => Some(1),
    }
}

fn parse_charge(chars: &[char], i: &mut usize, bracket_start: usize) -> Result<i8, SmilesError> {
    let sign: i8 = match chars.get(*i) {
        Some('+') => 1,
        Some('-') => -1,
        _ => return Ok(0),
    };
    let sym = chars[*i];
    *i += 1;

    let invalid = SmilesError::InvalidCharge { pos: bracket_start };
    if chars.get(*i) == Some(&sym) {
        // `++`, `---`
        let mut count: i8 = 1;
        while chars.get(*i) == Some(&sym) {
            count = count.checked_add(1).ok_or(invalid.clone())?;
            *i += 1;
        }
        return Ok(sign * count);
    }

    match parse_number(chars, i) {
        Some(n) => i8::try_from(n).map(|n| sign * n).map_err(|_| invalid),
        None => Ok(sign),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(tok: &Token) -> &AtomToken {
        match tok {
            Token::Atom(a) => a,
            other => panic!("expected atom, got {other:?}"),
        }
    }

    #[test]
    fn organic_two_letter_symbols() {
        let tokens = tokenize("ClCBr").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(atom(&tokens[0]).element, Some(Element::Cl));
        assert_eq!(atom(&tokens[1]).element, Some(Element::C));
        assert_eq!(atom(&tokens[2]).element, Some(Element::Br));
    }

    #[test]
    fn aromatic_lowercase() {
        let tokens = tokenize("c1ccncc1").unwrap();
        let atoms: Vec<_> = tokens
            .iter()
            .filter_map(|t| match t {
                Token::Atom(a) => Some(a),
                _ => None,
            })
            .collect();
        assert_eq!(atoms.len(), 6);
        assert!(atoms.iter().all(|a| a.is_aromatic));
        assert_eq!(atoms[3].element, Some(Element::N));
    }

    #[test]
    fn bracket_atom_fields() {
        let tokens = tokenize("[13CH3+]").unwrap();
        let a = atom(&tokens[0]);
        assert_eq!(a.element, Some(Element::C));
        assert_eq!(a.isotope, 13);
        assert_eq!(a.hcount, Some(3));
        assert_eq!(a.charge, 1);
        assert!(a.is_bracket);
    }

    #[test]
    fn bracket_charges() {
        assert_eq!(atom(&tokenize("[O-2]").unwrap()[0]).charge, -2);
        assert_eq!(atom(&tokenize("[Fe++]").unwrap()[0]).charge, 2);
        assert_eq!(atom(&tokenize("[Fe+3]").unwrap()[0]).charge, 3);
        assert_eq!(atom(&tokenize("[N---]").unwrap()[0]).charge, -3);
    }

    #[test]
    fn bracket_chirality_and_class_skipped() {
        let tokens = tokenize("[C@@H:7]").unwrap();
        let a = atom(&tokens[0]);
        assert_eq!(a.element, Some(Element::C));
        assert_eq!(a.hcount, Some(1));
    }

    #[test]
    fn bracket_aromatic_selenium() {
        let a = atom(&tokenize("[se]").unwrap()[0]).clone();
        assert_eq!(a.element, Some(Element::Se));
        assert!(a.is_aromatic);
    }

    #[test]
    fn wildcard_atom() {
        assert_eq!(atom(&tokenize("*").unwrap()[0]).element, None);
        assert_eq!(atom(&tokenize("[*]").unwrap()[0]).element, None);
    }

    #[test]
    fn ring_closure_takes_pending_bond() {
        let tokens = tokenize("C=1CC1").unwrap();
        assert_eq!(
            tokens[1],
            Token::RingClosure {
                bond: Some(BondToken::Double),
                digit: 1,
                pos: 2
            }
        );
    }

    #[test]
    fn percent_ring_closure() {
        let tokens = tokenize("C%12CC%12").unwrap();
        assert!(matches!(tokens[1], Token::RingClosure { digit: 12, .. }));
    }

    #[test]
    fn unclosed_bracket() {
        assert_eq!(
            tokenize("[CH4").unwrap_err(),
            SmilesError::UnclosedBracket { pos: 0 }
        );
    }

    #[test]
    fn unknown_bare_character() {
        assert_eq!(
            tokenize("CX").unwrap_err(),
            SmilesError::UnexpectedChar { pos: 1, ch: 'X' }
        );
    }
}
