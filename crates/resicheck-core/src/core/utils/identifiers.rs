use phf::{Set, phf_set};

static N_TERMINAL_HYDROGEN_NAMES: Set<&'static str> = phf_set! {
    "H1", "H2", "H3", "HN1", "HN2", "HN3", "HT1", "HT2", "HT3", "1H", "2H", "3H",
};

/// Normalizes an atom name for comparison: surrounding whitespace removed, upper-case.
pub fn normalize_atom_name(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}

/// Normalizes a residue name for lookup: surrounding whitespace removed, upper-case.
pub fn normalize_residue_name(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}

pub fn is_heavy_atom(atom_name: &str) -> bool {
    let first_char = atom_name
        .trim()
        .chars()
        .find(|c| !c.is_ascii_digit())
        .map(|c| c.to_ascii_uppercase());
    !matches!(first_char, Some('H') | Some('D'))
}

/// Whether an atom name is one of the hydrogens carried by a free N-terminal amine.
pub fn is_n_terminal_hydrogen(atom_name: &str) -> bool {
    N_TERMINAL_HYDROGEN_NAMES.contains(atom_name.trim())
}

/// Maps a PDB v2 hydrogen name (`HN`, `1HB`, `2HG1`) to its v3 form.
///
/// A leading digit moves to the end. When the template has no `...1` slot for that
/// stem, the hydrogens were renumbered from 2 in v3 (`1HB`, `2HB` become `HB2`, `HB3`).
/// Returns `None` unless the result is a name `in_template` accepts.
pub fn modern_hydrogen_name(atom_name: &str, in_template: impl Fn(&str) -> bool) -> Option<String> {
    let atom_name = atom_name.trim();
    if atom_name == "HN" {
        return in_template("H").then(|| "H".to_string());
    }

    let mut chars = atom_name.chars();
    let digit = chars.next()?.to_digit(10)?;
    let stem = chars.as_str();
    if !stem.starts_with('H') {
        return None;
    }

    let candidate = if in_template(&format!("{stem}1")) {
        format!("{stem}{digit}")
    } else {
        format!("{stem}{}", digit + 1)
    };
    in_template(&candidate).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_atom_name_trims_and_upper_cases() {
        assert_eq!(normalize_atom_name(" ca "), "CA");
        assert_eq!(normalize_atom_name("O5'"), "O5'");
        assert_eq!(normalize_atom_name("\tOG1\n"), "OG1");
        assert_eq!(normalize_atom_name(""), "");
    }

    #[test]
    fn normalize_residue_name_trims_and_upper_cases() {
        assert_eq!(normalize_residue_name("  a"), "A");
        assert_eq!(normalize_residue_name("hoh"), "HOH");
    }

    #[test]
    fn is_heavy_atom_returns_false_for_hydrogen_and_deuterium() {
        assert!(!is_heavy_atom("H"));
        assert!(!is_heavy_atom("HA"));
        assert!(!is_heavy_atom("1HB"));
        assert!(!is_heavy_atom("D"));
        assert!(!is_heavy_atom("D2"));
    }

    #[test]
    fn is_heavy_atom_returns_true_for_non_hydrogen_atoms() {
        assert!(is_heavy_atom("C"));
        assert!(is_heavy_atom("CA"));
        assert!(is_heavy_atom(" SG "));
        assert!(is_heavy_atom("O5'"));
    }

    #[test]
    fn n_terminal_hydrogens_are_recognized() {
        assert!(is_n_terminal_hydrogen("H1"));
        assert!(is_n_terminal_hydrogen(" H3 "));
        assert!(is_n_terminal_hydrogen("HT2"));
        assert!(!is_n_terminal_hydrogen("H"));
        assert!(!is_n_terminal_hydrogen("HA"));
        assert!(is_n_terminal_hydrogen("2H"));
    }

    #[test]
    fn legacy_hydrogen_names_map_onto_template_names() {
        let leucine = ["H", "HA", "HB2", "HB3", "HG", "HD11", "HD12", "HD13"];
        let in_leucine = |name: &str| leucine.contains(&name);

        assert_eq!(modern_hydrogen_name("HN", in_leucine), Some("H".to_string()));
        assert_eq!(modern_hydrogen_name("1HB", in_leucine), Some("HB2".to_string()));
        assert_eq!(modern_hydrogen_name("2HB", in_leucine), Some("HB3".to_string()));
        assert_eq!(modern_hydrogen_name("3HD1", in_leucine), Some("HD13".to_string()));
        assert_eq!(modern_hydrogen_name("HB2", in_leucine), None);
        assert_eq!(modern_hydrogen_name("1CB", in_leucine), None);
        assert_eq!(modern_hydrogen_name("3HB", in_leucine), None);
    }
}
