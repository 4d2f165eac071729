use crate::cli::CatalogArgs;
use crate::error::{CliError, Result};
use resicheck::core::topology::registry::{ResidueCatalog, ResidueTemplate};
use std::io::{self, Write};
use tracing::{info, warn};

pub fn run(args: CatalogArgs) -> Result<()> {
    let custom_catalog;
    let catalog = match &args.catalog {
        Some(path) => {
            info!("Loading residue catalog from {:?}", path);
            custom_catalog = ResidueCatalog::load(path)?;
            let missing = custom_catalog.missing_standard_names();
            if !missing.is_empty() {
                warn!(
                    "Custom catalog has no template for {} standard residue(s): {}",
                    missing.len(),
                    missing.join(", ")
                );
            }
            &custom_catalog
        }
        None => ResidueCatalog::standard(),
    };

    let templates = match args.residue.as_deref() {
        Some(name) => vec![catalog.lookup(name).ok_or_else(|| {
            CliError::Argument(format!("No template for residue '{}'", name))
        })?],
        None => catalog.templates(),
    };

    write_templates(io::stdout().lock(), &templates)
}

fn write_templates<W: Write>(mut writer: W, templates: &[&ResidueTemplate]) -> Result<()> {
    for template in templates {
        writeln!(
            writer,
            "{:<4} {:<13} {}",
            template.name(),
            template.polymer().to_string(),
            template.heavy_atoms().join(" ")
        )?;
        if !template.hydrogens().is_empty() {
            writeln!(writer, "{:<18} H: {}", "", template.hydrogens().join(" "))?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(templates: &[&ResidueTemplate]) -> String {
        let mut buffer = Vec::new();
        write_templates(&mut buffer, templates).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn lists_heavy_atoms_then_hydrogens() {
        let catalog = ResidueCatalog::standard();
        let gly = catalog.lookup("GLY").unwrap();
        let text = render(&[gly]);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("GLY  protein"));
        assert!(lines[0].ends_with("N CA C O"));
        assert!(lines[1].trim_start().starts_with("H: "));
    }

    #[test]
    fn template_without_hydrogens_takes_one_line() {
        let catalog = ResidueCatalog::from_toml_str(
            "[XYZ]\npolymer = \"protein\"\nheavy-atoms = [\"N\", \"CA\"]\n",
        )
        .unwrap();
        let text = render(&catalog.templates());
        assert_eq!(text, format!("XYZ  {:<13} N CA\n", "protein"));
    }

    #[test]
    fn unknown_residue_is_an_argument_error() {
        let result = run(CatalogArgs {
            residue: Some("HOH".to_string()),
            catalog: None,
        });
        assert!(matches!(result, Err(CliError::Argument(_))));
    }

    #[test]
    fn missing_catalog_file_is_a_catalog_error() {
        let result = run(CatalogArgs {
            residue: None,
            catalog: Some("/nonexistent/catalog.toml".into()),
        });
        assert!(matches!(result, Err(CliError::Catalog(_))));
    }
}
