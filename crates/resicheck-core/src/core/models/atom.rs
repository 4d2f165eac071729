use nalgebra::Point3;

/// Represents one parsed atom of a macromolecular structure.
///
/// Atoms are immutable once the reader has produced them: every field is private
/// and only exposed through accessors. The name is scoped to the owning residue
/// and is stored in normalized form (trimmed, upper-case), which is the form used
/// for every completeness comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    name: String,
    element: String,
    position: Point3<f64>,
    occupancy: Option<f64>,
    b_factor: Option<f64>,
    serial: Option<usize>,
    alt_loc: Option<char>,
}

impl Atom {
    /// Creates a new `Atom` with the given name, element symbol, and position.
    ///
    /// Optional crystallographic fields start out empty and are filled in with the
    /// `with_*` methods while the reader is still assembling the record.
    ///
    /// # Arguments
    ///
    /// * `name` - The atom name as it appears in the source file; it is normalized here.
    /// * `element` - The element symbol; an empty symbol is inferred from the name.
    /// * `position` - The Cartesian coordinates of the atom in Angstroms.
    pub fn new(name: &str, element: &str, position: Point3<f64>) -> Self {
        let name = crate::core::utils::identifiers::normalize_atom_name(name);
        let element = match element.trim() {
            "" => infer_element(&name),
            symbol => symbol.to_ascii_uppercase(),
        };
        Self {
            name,
            element,
            position,
            occupancy: None,
            b_factor: None,
            serial: None,
            alt_loc: None,
        }
    }

    pub fn with_occupancy(mut self, occupancy: Option<f64>) -> Self {
        self.occupancy = occupancy;
        self
    }

    pub fn with_b_factor(mut self, b_factor: Option<f64>) -> Self {
        self.b_factor = b_factor;
        self
    }

    pub fn with_serial(mut self, serial: Option<usize>) -> Self {
        self.serial = serial;
        self
    }

    pub fn with_alt_loc(mut self, alt_loc: Option<char>) -> Self {
        self.alt_loc = alt_loc;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn position(&self) -> &Point3<f64> {
        &self.position
    }

    pub fn occupancy(&self) -> Option<f64> {
        self.occupancy
    }

    pub fn b_factor(&self) -> Option<f64> {
        self.b_factor
    }

    pub fn serial(&self) -> Option<usize> {
        self.serial
    }

    /// The alternate-location indicator of the conformer that was kept, if any.
    pub fn alt_loc(&self) -> Option<char> {
        self.alt_loc
    }

    /// Occupancy used when ranking alternate locations; a missing value counts as full.
    pub(crate) fn ranking_occupancy(&self) -> f64 {
        self.occupancy.unwrap_or(1.0)
    }
}

// PDB names pad one-letter elements into column 14, so after trimming the
// leading character is the element for everything but the rare two-letter metals.
fn infer_element(name: &str) -> String {
    name.chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_normalizes_name_and_keeps_position() {
        let atom = Atom::new(" ca ", "C", Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.name(), "CA");
        assert_eq!(atom.element(), "C");
        assert_eq!(atom.position(), &Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.occupancy(), None);
        assert_eq!(atom.b_factor(), None);
        assert_eq!(atom.serial(), None);
        assert_eq!(atom.alt_loc(), None);
    }

    #[test]
    fn empty_element_is_inferred_from_name() {
        assert_eq!(Atom::new("OD1", "", Point3::origin()).element(), "O");
        assert_eq!(Atom::new("1HB", " ", Point3::origin()).element(), "H");
        assert_eq!(Atom::new("sg", "", Point3::origin()).element(), "S");
    }

    #[test]
    fn explicit_element_is_upper_cased() {
        assert_eq!(Atom::new("ZN", "zn", Point3::origin()).element(), "ZN");
    }

    #[test]
    fn builder_methods_set_optional_fields() {
        let atom = Atom::new("N", "N", Point3::origin())
            .with_occupancy(Some(0.5))
            .with_b_factor(Some(12.3))
            .with_serial(Some(7))
            .with_alt_loc(Some('B'));
        assert_eq!(atom.occupancy(), Some(0.5));
        assert_eq!(atom.b_factor(), Some(12.3));
        assert_eq!(atom.serial(), Some(7));
        assert_eq!(atom.alt_loc(), Some('B'));
    }

    #[test]
    fn ranking_occupancy_defaults_to_full() {
        let atom = Atom::new("N", "N", Point3::origin());
        assert_eq!(atom.ranking_occupancy(), 1.0);
        let partial = atom.with_occupancy(Some(0.25));
        assert_eq!(partial.ranking_occupancy(), 0.25);
    }
}
