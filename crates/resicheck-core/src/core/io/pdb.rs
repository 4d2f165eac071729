use super::error::ParseError;
use super::format::StructureFormat;
use super::traits::{ParseOptions, StructureReader};
use crate::core::models::atom::Atom;
use crate::core::models::builder::{AtomRecord, StructureBuilder};
use crate::core::models::residue::ResidueKey;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use tracing::{debug, trace};

/// Shortest `ATOM`/`HETATM` line that still carries all three coordinates.
const MIN_ATOM_LINE_LEN: usize = 54;

/// Length of an `ATOM`/`HETATM` line through the B-factor field.
const B_FACTOR_END: usize = 66;

fn column(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or("")
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    column(line, start, end).trim()
}

fn optional_char(line: &str, index: usize) -> Option<char> {
    column(line, index, index + 1)
        .chars()
        .next()
        .filter(|c| !c.is_whitespace())
}

/// Maps an AutoDock atom type to the element it stands for.
fn element_from_autodock_type(ad_type: &str) -> &str {
    match ad_type {
        "A" => "C",
        "NA" | "NS" => "N",
        "OA" | "OS" => "O",
        "SA" => "S",
        "HD" | "HS" => "H",
        other => other,
    }
}

/// Reader for wwPDB fixed-column coordinate files.
pub struct PdbFile;

/// Reader for AutoDock PDBQT files.
///
/// PDBQT shares the PDB atom columns; the element comes from the AutoDock atom type in
/// columns 78-79 and the torsion-tree records are ignored.
pub struct PdbqtFile;

impl StructureReader for PdbFile {
    const FORMAT: StructureFormat = StructureFormat::Pdb;

    fn read_str(text: &str, options: &ParseOptions) -> Result<Structure, ParseError> {
        read_fixed_columns(text, options, Self::FORMAT)
    }
}

impl StructureReader for PdbqtFile {
    const FORMAT: StructureFormat = StructureFormat::Pdbqt;

    fn read_str(text: &str, options: &ParseOptions) -> Result<Structure, ParseError> {
        read_fixed_columns(text, options, Self::FORMAT)
    }
}

struct OpenModel {
    serial: usize,
    line: usize,
}

/// A model must end with `ENDMDL`; reaching anything else that closes it means the
/// terminator was lost.
fn unclosed_model(
    format: StructureFormat,
    line_num: usize,
    open: &OpenModel,
    reached: &str,
) -> ParseError {
    ParseError::truncated(
        format.name(),
        line_num,
        format!(
            "MODEL {} opened on line {} is not closed by ENDMDL before {}",
            open.serial, open.line, reached
        ),
    )
}

fn read_fixed_columns(
    text: &str,
    options: &ParseOptions,
    format: StructureFormat,
) -> Result<Structure, ParseError> {
    let mut builder = StructureBuilder::new(options.alt_loc_policy);
    let mut open_model: Option<OpenModel> = None;
    let mut models_seen = 0usize;

    let lines: Vec<&str> = text.lines().collect();
    let last_is_unterminated = !text.is_empty() && !text.ends_with('\n');

    for (idx, line) in lines.iter().enumerate() {
        let line_num = idx + 1;
        let record = slice_and_trim(line, 0, 6);

        match record {
            "ATOM" | "HETATM" => {
                let at_eof = last_is_unterminated && line_num == lines.len();
                let parsed = parse_atom_line(line, line_num, format, at_eof)?;
                builder.add_atom(AtomRecord {
                    chain_id: parsed.chain_id,
                    residue_name: parsed.residue_name,
                    residue_key: parsed.residue_key,
                    is_hetero: record == "HETATM",
                    atom: parsed.atom,
                });
            }
            "MODEL" => {
                if let Some(open) = &open_model {
                    return Err(unclosed_model(format, line_num, open, "MODEL"));
                }
                let serial_str = slice_and_trim(line, 6, 14);
                let serial = if serial_str.is_empty() {
                    models_seen + 1
                } else {
                    serial_str.parse::<usize>().map_err(|_| {
                        ParseError::malformed(
                            format.name(),
                            line_num,
                            format!("invalid model serial '{}'", serial_str),
                        )
                    })?
                };
                models_seen += 1;
                builder.start_model(serial);
                open_model = Some(OpenModel {
                    serial,
                    line: line_num,
                });
                trace!(serial, line = line_num, "Opened model.");
            }
            "ENDMDL" => {
                if open_model.take().is_none() {
                    return Err(ParseError::malformed(
                        format.name(),
                        line_num,
                        "ENDMDL record without a matching MODEL",
                    ));
                }
                builder.end_model();
            }
            "END" => {
                if let Some(open) = &open_model {
                    return Err(unclosed_model(format, line_num, open, "END"));
                }
                debug!(line = line_num, "Reached END record; ignoring the rest of the input.");
                break;
            }
            _ => {}
        }
    }

    if let Some(open) = open_model {
        return Err(unclosed_model(format, lines.len().max(1), &open, "end of input"));
    }

    Ok(builder.build().with_format(format))
}

struct ParsedAtom<'a> {
    chain_id: &'a str,
    residue_name: &'a str,
    residue_key: ResidueKey,
    atom: Atom,
}

fn parse_atom_line<'a>(
    line: &'a str,
    line_num: usize,
    format: StructureFormat,
    at_eof: bool,
) -> Result<ParsedAtom<'a>, ParseError> {
    let fmt_name = format.name();

    if line.len() < MIN_ATOM_LINE_LEN {
        let details = format!(
            "atom record has {} characters, at least {} are required for coordinates",
            line.len(),
            MIN_ATOM_LINE_LEN
        );
        return Err(if at_eof {
            ParseError::truncated(fmt_name, line_num, details)
        } else {
            ParseError::malformed(fmt_name, line_num, details)
        });
    }

    // A last line without a newline that stops before the B-factor end was cut off.
    if at_eof && line.len() < B_FACTOR_END {
        return Err(ParseError::truncated(
            fmt_name,
            line_num,
            format!(
                "final atom record ends at column {}, inside the occupancy and B-factor fields",
                line.len()
            ),
        ));
    }

    let name = slice_and_trim(line, 12, 16);
    if name.is_empty() {
        return Err(ParseError::malformed(
            fmt_name,
            line_num,
            "atom name in columns 13-16 is empty",
        ));
    }
    let residue_name = slice_and_trim(line, 17, 20);
    if residue_name.is_empty() {
        return Err(ParseError::malformed(
            fmt_name,
            line_num,
            "residue name in columns 18-20 is empty",
        ));
    }

    let seq_str = slice_and_trim(line, 22, 26);
    let number = seq_str.parse::<isize>().map_err(|_| {
        ParseError::malformed(
            fmt_name,
            line_num,
            format!("invalid residue sequence number in columns 23-26 ('{}')", seq_str),
        )
    })?;

    let coord = |start: usize, end: usize, axis: &str| -> Result<f64, ParseError> {
        let value = slice_and_trim(line, start, end);
        value.parse::<f64>().map_err(|_| {
            ParseError::malformed(
                fmt_name,
                line_num,
                format!(
                    "invalid {} coordinate in columns {}-{} ('{}')",
                    axis,
                    start + 1,
                    end,
                    value
                ),
            )
        })
    };
    let position = Point3::new(coord(30, 38, "x")?, coord(38, 46, "y")?, coord(46, 54, "z")?);

    let element = match format {
        StructureFormat::Pdbqt => element_from_autodock_type(slice_and_trim(line, 77, 79)),
        _ => slice_and_trim(line, 76, 78),
    };

    let atom = Atom::new(name, element, position)
        .with_serial(slice_and_trim(line, 6, 11).parse().ok())
        .with_alt_loc(optional_char(line, 16))
        .with_occupancy(slice_and_trim(line, 54, 60).parse().ok())
        .with_b_factor(slice_and_trim(line, 60, 66).parse().ok());

    Ok(ParsedAtom {
        chain_id: slice_and_trim(line, 21, 22),
        residue_name,
        residue_key: ResidueKey::new(number, optional_char(line, 26)),
        atom,
    })
}
