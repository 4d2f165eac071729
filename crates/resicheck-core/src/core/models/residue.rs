use super::atom::Atom;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Classification of a residue by name, decided once when the residue is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResidueKind {
    Standard,    // Standard amino acid or nucleotide with a canonical template
    NonStandard, // Polymer residue (ATOM record) outside the standard set, e.g. MSE
    Hetero,      // Ligand or other HETATM group
    Solvent,     // Water and its common aliases
}

impl ResidueKind {
    /// Whether this residue falls into the heteroatom/solvent group.
    pub fn is_hetero_or_solvent(&self) -> bool {
        matches!(self, ResidueKind::Hetero | ResidueKind::Solvent)
    }
}

#[derive(Debug, Error)]
#[error("Invalid residue kind string")]
pub struct ParseResidueKindError;

impl FromStr for ResidueKind {
    type Err = ParseResidueKindError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(ResidueKind::Standard),
            "non-standard" | "nonstandard" | "non_standard" => Ok(ResidueKind::NonStandard),
            "hetero" | "heteroatom" => Ok(ResidueKind::Hetero),
            "solvent" | "water" => Ok(ResidueKind::Solvent),
            _ => Err(ParseResidueKindError),
        }
    }
}

impl fmt::Display for ResidueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ResidueKind::Standard => "Standard",
                ResidueKind::NonStandard => "NonStandard",
                ResidueKind::Hetero => "Hetero",
                ResidueKind::Solvent => "Solvent",
            }
        )
    }
}

/// Identity of a residue within its chain: sequence number plus insertion code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    pub number: isize,
    pub insertion_code: Option<char>,
}

impl ResidueKey {
    pub fn new(number: isize, insertion_code: Option<char>) -> Self {
        Self {
            number,
            insertion_code,
        }
    }
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.insertion_code {
            Some(code) => write!(f, "{}{}", self.number, code),
            None => write!(f, "{}", self.number),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    key: ResidueKey,                       // Sequence number and insertion code from the source file
    name: String,                          // Normalized residue name (e.g., "ALA", "HOH")
    kind: ResidueKind,                     // Classification by name
    atoms: Vec<Atom>,                      // Atoms in parse order
    atom_name_map: HashMap<String, usize>, // Map from atom name to its index in `atoms`
}

impl Residue {
    pub(crate) fn new(key: ResidueKey, name: &str, kind: ResidueKind) -> Self {
        Self {
            key,
            name: name.to_string(),
            kind,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    /// Adds an atom, or replaces the atom of the same name in place.
    ///
    /// Replacing keeps the original slot so the parse order of names never changes.
    /// Returns the replaced atom, if any.
    pub(crate) fn upsert_atom(&mut self, atom: Atom) -> Option<Atom> {
        match self.atom_name_map.get(atom.name()) {
            Some(&index) => Some(std::mem::replace(&mut self.atoms[index], atom)),
            None => {
                self.atom_name_map
                    .insert(atom.name().to_string(), self.atoms.len());
                self.atoms.push(atom);
                None
            }
        }
    }

    pub fn key(&self) -> ResidueKey {
        self.key
    }

    pub fn number(&self) -> isize {
        self.key.number
    }

    pub fn insertion_code(&self) -> Option<char> {
        self.key.insertion_code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ResidueKind {
        self.kind
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, name: &str) -> Option<&Atom> {
        self.atom_name_map.get(name).map(|&index| &self.atoms[index])
    }

    pub fn has_atom(&self, name: &str) -> bool {
        self.atom_name_map.contains_key(name)
    }

    /// Observed atom names in parse order.
    pub fn atom_names(&self) -> impl Iterator<Item = &str> {
        self.atoms.iter().map(Atom::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn atom(name: &str, x: f64) -> Atom {
        Atom::new(name, "", Point3::new(x, 0.0, 0.0))
    }

    #[test]
    fn new_residue_initializes_fields_correctly() {
        let residue = Residue::new(ResidueKey::new(10, None), "GLY", ResidueKind::Standard);
        assert_eq!(residue.number(), 10);
        assert_eq!(residue.insertion_code(), None);
        assert_eq!(residue.name(), "GLY");
        assert_eq!(residue.kind(), ResidueKind::Standard);
        assert!(residue.atoms().is_empty());
        assert!(residue.atom("CA").is_none());
    }

    #[test]
    fn upsert_atom_appends_new_names_in_order() {
        let mut residue = Residue::new(ResidueKey::new(1, None), "SER", ResidueKind::Standard);
        assert!(residue.upsert_atom(atom("N", 0.0)).is_none());
        assert!(residue.upsert_atom(atom("CA", 1.0)).is_none());
        assert!(residue.upsert_atom(atom("OG", 2.0)).is_none());
        let names: Vec<_> = residue.atom_names().collect();
        assert_eq!(names, vec!["N", "CA", "OG"]);
        assert!(residue.has_atom("OG"));
    }

    #[test]
    fn upsert_atom_replaces_in_place_without_duplicating() {
        let mut residue = Residue::new(ResidueKey::new(1, None), "SER", ResidueKind::Standard);
        residue.upsert_atom(atom("N", 0.0));
        residue.upsert_atom(atom("CA", 1.0));
        let replaced = residue.upsert_atom(atom("N", 5.0));

        assert_eq!(replaced.map(|a| a.position().x), Some(0.0));
        assert_eq!(residue.atoms().len(), 2);
        assert_eq!(residue.atoms()[0].name(), "N");
        assert_eq!(residue.atom("N").map(|a| a.position().x), Some(5.0));
    }

    #[test]
    fn residue_key_orders_by_number_then_insertion_code() {
        let plain = ResidueKey::new(52, None);
        let inserted = ResidueKey::new(52, Some('A'));
        let next = ResidueKey::new(53, None);
        assert!(plain < inserted);
        assert!(inserted < next);
    }

    #[test]
    fn residue_key_display_appends_insertion_code() {
        assert_eq!(ResidueKey::new(52, Some('A')).to_string(), "52A");
        assert_eq!(ResidueKey::new(-3, None).to_string(), "-3");
    }

    #[test]
    fn residue_kind_from_str_parses_valid_strings() {
        assert_eq!("standard".parse::<ResidueKind>().unwrap(), ResidueKind::Standard);
        assert_eq!("Non-Standard".parse::<ResidueKind>().unwrap(), ResidueKind::NonStandard);
        assert_eq!("HETERO".parse::<ResidueKind>().unwrap(), ResidueKind::Hetero);
        assert_eq!("water".parse::<ResidueKind>().unwrap(), ResidueKind::Solvent);
        assert!("ligandish".parse::<ResidueKind>().is_err());
    }

    #[test]
    fn residue_kind_hetero_group_covers_solvent() {
        assert!(ResidueKind::Solvent.is_hetero_or_solvent());
        assert!(ResidueKind::Hetero.is_hetero_or_solvent());
        assert!(!ResidueKind::Standard.is_hetero_or_solvent());
        assert!(!ResidueKind::NonStandard.is_hetero_or_solvent());
    }
}
