use super::error::ParseError;
use super::format::StructureFormat;
use super::traits::{ParseOptions, StructureReader};
use crate::core::models::atom::Atom;
use crate::core::models::builder::{AtomRecord, StructureBuilder};
use crate::core::models::residue::ResidueKey;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::{debug, trace};

const FORMAT_NAME: &str = "mmCIF";
const ATOM_SITE_PREFIX: &str = "_atom_site.";

/// Reader for PDBx/mmCIF files.
///
/// Only the `_atom_site` category is interpreted; every other category is tokenized
/// (so syntax errors anywhere are reported) and then ignored.
pub struct MmcifFile;

impl StructureReader for MmcifFile {
    const FORMAT: StructureFormat = StructureFormat::Mmcif;

    fn read_str(text: &str, options: &ParseOptions) -> Result<Structure, ParseError> {
        let tokens = tokenize(text)?;
        AtomSiteReader::new(options).read(&tokens)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token<'a> {
    DataBlock,
    Loop,
    Tag(&'a str),
    /// A value; `None` stands for the unquoted `.` (inapplicable) and `?` (unknown).
    Value(Option<Cow<'a, str>>),
    /// `save_`, `global_` and `stop_` frames carry nothing the reader needs.
    Reserved,
}

#[derive(Debug, Clone, PartialEq)]
struct Spanned<'a> {
    token: Token<'a>,
    line: usize,
}

impl Spanned<'_> {
    fn value(&self) -> Option<&str> {
        match &self.token {
            Token::Value(Some(value)) => Some(value.as_ref()),
            _ => None,
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<Spanned<'_>>, ParseError> {
    let mut tokens = Vec::new();
    let mut lines = text.lines().enumerate();

    while let Some((idx, line)) = lines.next() {
        let line_num = idx + 1;

        if let Some(first) = line.strip_prefix(';') {
            let mut field = first.to_string();
            let mut closed = None;
            for (close_idx, next) in lines.by_ref() {
                if let Some(rest) = next.strip_prefix(';') {
                    closed = Some((close_idx + 1, rest));
                    break;
                }
                field.push('\n');
                field.push_str(next);
            }
            let Some((close_line, rest)) = closed else {
                return Err(ParseError::truncated(
                    FORMAT_NAME,
                    line_num,
                    "text field opened with ';' is never closed",
                ));
            };
            tokens.push(Spanned {
                token: Token::Value(Some(Cow::Owned(field))),
                line: line_num,
            });
            tokenize_line(rest, close_line, &mut tokens)?;
            continue;
        }

        tokenize_line(line, line_num, &mut tokens)?;
    }

    Ok(tokens)
}

fn tokenize_line<'a>(
    line: &'a str,
    line_num: usize,
    tokens: &mut Vec<Spanned<'a>>,
) -> Result<(), ParseError> {
    let bytes = line.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }
        if bytes[i] == b'#' {
            break;
        }

        if bytes[i] == b'\'' || bytes[i] == b'"' {
            let quote = bytes[i];
            // A quote only closes the value when followed by whitespace or end of line.
            let close = (i + 1..bytes.len()).find(|&j| {
                bytes[j] == quote && bytes.get(j + 1).is_none_or(|b| b.is_ascii_whitespace())
            });
            let Some(close) = close else {
                return Err(ParseError::malformed(
                    FORMAT_NAME,
                    line_num,
                    "unterminated quoted value",
                ));
            };
            tokens.push(Spanned {
                token: Token::Value(Some(Cow::Borrowed(&line[i + 1..close]))),
                line: line_num,
            });
            i = close + 1;
            continue;
        }

        let end = (i..bytes.len())
            .find(|&j| bytes[j].is_ascii_whitespace())
            .unwrap_or(bytes.len());
        let word = &line[i..end];
        tokens.push(Spanned {
            token: classify_word(word),
            line: line_num,
        });
        i = end;
    }

    Ok(())
}

fn classify_word(word: &str) -> Token<'_> {
    let lower = word.get(..7).unwrap_or(word).to_ascii_lowercase();
    if lower.starts_with("data_") {
        Token::DataBlock
    } else if word.eq_ignore_ascii_case("loop_") {
        Token::Loop
    } else if word.starts_with('_') {
        Token::Tag(word)
    } else if lower.starts_with("save_") || lower.starts_with("global_") || lower.starts_with("stop_")
    {
        Token::Reserved
    } else if word == "." || word == "?" {
        Token::Value(None)
    } else {
        Token::Value(Some(Cow::Borrowed(word)))
    }
}

/// Column positions of the `_atom_site` items the reader uses.
///
/// Pairs hold the `auth_*` item first and the `label_*` item second; the first one
/// present in a row wins.
#[derive(Debug, Default)]
struct AtomSiteColumns {
    group: Option<usize>,
    serial: Option<usize>,
    element: Option<usize>,
    atom_name: (Option<usize>, Option<usize>),
    alt_id: Option<usize>,
    residue_name: (Option<usize>, Option<usize>),
    chain_id: (Option<usize>, Option<usize>),
    seq_id: (Option<usize>, Option<usize>),
    insertion_code: Option<usize>,
    x: usize,
    y: usize,
    z: usize,
    occupancy: Option<usize>,
    b_factor: Option<usize>,
    model: Option<usize>,
}

impl AtomSiteColumns {
    fn locate(tags: &[&str], line: usize) -> Result<Self, ParseError> {
        let index: HashMap<String, usize> = tags
            .iter()
            .enumerate()
            .filter_map(|(i, tag)| {
                let lower = tag.to_ascii_lowercase();
                lower
                    .strip_prefix(ATOM_SITE_PREFIX)
                    .map(|item| (item.to_string(), i))
            })
            .collect();
        let get = |item: &str| index.get(item).copied();

        let mut missing = Vec::new();
        let mut require_pair = |auth: &str, label: &str| {
            let pair = (get(auth), get(label));
            if pair.0.is_none() && pair.1.is_none() {
                missing.push(format!("{auth}/{label}"));
            }
            pair
        };
        let atom_name = require_pair("auth_atom_id", "label_atom_id");
        let residue_name = require_pair("auth_comp_id", "label_comp_id");
        let chain_id = require_pair("auth_asym_id", "label_asym_id");
        let seq_id = require_pair("auth_seq_id", "label_seq_id");

        let mut require = |item: &str| {
            let found = get(item);
            if found.is_none() {
                missing.push(item.to_string());
            }
            found.unwrap_or_default()
        };
        let x = require("cartn_x");
        let y = require("cartn_y");
        let z = require("cartn_z");

        if !missing.is_empty() {
            return Err(ParseError::malformed(
                FORMAT_NAME,
                line,
                format!("_atom_site is missing required items: {}", missing.join(", ")),
            ));
        }

        Ok(Self {
            group: get("group_pdb"),
            serial: get("id"),
            element: get("type_symbol"),
            atom_name,
            alt_id: get("label_alt_id"),
            residue_name,
            chain_id,
            seq_id,
            insertion_code: get("pdbx_pdb_ins_code"),
            x,
            y,
            z,
            occupancy: get("occupancy"),
            b_factor: get("b_iso_or_equiv"),
            model: get("pdbx_pdb_model_num"),
        })
    }
}

fn cell<'r>(row: &[&'r Spanned<'_>], column: Option<usize>) -> Option<&'r str> {
    column.and_then(|c| row.get(c)).and_then(|s| s.value())
}

fn first_cell<'r>(row: &[&'r Spanned<'_>], pair: (Option<usize>, Option<usize>)) -> Option<&'r str> {
    cell(row, pair.0).or_else(|| cell(row, pair.1))
}

struct AtomSiteReader {
    builder: StructureBuilder,
    current_model: Option<usize>,
}

impl AtomSiteReader {
    fn new(options: &ParseOptions) -> Self {
        Self {
            builder: StructureBuilder::new(options.alt_loc_policy),
            current_model: None,
        }
    }

    fn read(mut self, tokens: &[Spanned<'_>]) -> Result<Structure, ParseError> {
        let mut single_tags: Vec<&str> = Vec::new();
        let mut single_values: Vec<&Spanned<'_>> = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let line = tokens[i].line;
            match &tokens[i].token {
                Token::Loop => {
                    i += 1;
                    let mut tags = Vec::new();
                    while let Some(Token::Tag(tag)) = tokens.get(i).map(|t| &t.token) {
                        tags.push(*tag);
                        i += 1;
                    }
                    if tags.is_empty() {
                        return Err(ParseError::malformed(
                            FORMAT_NAME,
                            line,
                            "loop_ is not followed by any tags",
                        ));
                    }

                    let start = i;
                    while matches!(tokens.get(i).map(|t| &t.token), Some(Token::Value(_))) {
                        i += 1;
                    }
                    let values = &tokens[start..i];

                    if values.len() % tags.len() != 0 {
                        let details = format!(
                            "loop with {} tags holds {} values, leaving an incomplete row",
                            tags.len(),
                            values.len()
                        );
                        return Err(if i == tokens.len() {
                            let last = values.last().map_or(line, |v| v.line);
                            ParseError::truncated(FORMAT_NAME, last, details)
                        } else {
                            ParseError::malformed(FORMAT_NAME, tokens[i].line, details)
                        });
                    }

                    if is_atom_site(tags[0]) {
                        let columns = AtomSiteColumns::locate(&tags, line)?;
                        debug!(rows = values.len() / tags.len(), "Reading _atom_site loop.");
                        for chunk in values.chunks(tags.len()) {
                            let row: Vec<&Spanned<'_>> = chunk.iter().collect();
                            self.add_row(&columns, &row)?;
                        }
                    }
                }
                Token::Tag(tag) => match tokens.get(i + 1) {
                    Some(next) if matches!(next.token, Token::Value(_)) => {
                        if is_atom_site(tag) {
                            single_tags.push(*tag);
                            single_values.push(next);
                        }
                        i += 2;
                    }
                    Some(_) => {
                        return Err(ParseError::malformed(
                            FORMAT_NAME,
                            line,
                            format!("tag {tag} has no value"),
                        ));
                    }
                    None => {
                        return Err(ParseError::truncated(
                            FORMAT_NAME,
                            line,
                            format!("input ends before the value of tag {tag}"),
                        ));
                    }
                },
                Token::Value(_) => {
                    return Err(ParseError::malformed(
                        FORMAT_NAME,
                        line,
                        "value outside of any tag or loop",
                    ));
                }
                Token::DataBlock | Token::Reserved => i += 1,
            }
        }

        if !single_tags.is_empty() {
            let line = single_values.first().map_or(1, |v| v.line);
            let columns = AtomSiteColumns::locate(&single_tags, line)?;
            self.add_row(&columns, &single_values)?;
        }

        Ok(self.builder.build().with_format(StructureFormat::Mmcif))
    }

    fn add_row(&mut self, columns: &AtomSiteColumns, row: &[&Spanned<'_>]) -> Result<(), ParseError> {
        let line = row.first().map_or(1, |v| v.line);
        let malformed = |details: String| ParseError::malformed(FORMAT_NAME, line, details);

        let model = match cell(row, columns.model) {
            Some(value) => value
                .parse::<usize>()
                .map_err(|_| malformed(format!("invalid model number '{value}'")))?,
            None => 1,
        };
        if self.current_model != Some(model) {
            self.builder.end_model().start_model(model);
            self.current_model = Some(model);
        }

        let atom_name = first_cell(row, columns.atom_name)
            .ok_or_else(|| malformed("atom site has no atom name".to_string()))?;
        let residue_name = first_cell(row, columns.residue_name)
            .ok_or_else(|| malformed("atom site has no residue name".to_string()))?;
        let chain_id = first_cell(row, columns.chain_id).unwrap_or("");
        let seq = first_cell(row, columns.seq_id)
            .ok_or_else(|| malformed("atom site has no residue sequence number".to_string()))?;
        let number = seq
            .parse::<isize>()
            .map_err(|_| malformed(format!("invalid residue sequence number '{seq}'")))?;

        let coords = [columns.x, columns.y, columns.z].map(|c| cell(row, Some(c)));
        let [Some(x), Some(y), Some(z)] = coords else {
            trace!(line, atom = atom_name, "Skipping atom site without coordinates.");
            return Ok(());
        };
        let coord = |value: &str| {
            value
                .parse::<f64>()
                .map_err(|_| malformed(format!("invalid coordinate '{value}'")))
        };
        let position = Point3::new(coord(x)?, coord(y)?, coord(z)?);

        let atom = Atom::new(atom_name, cell(row, columns.element).unwrap_or(""), position)
            .with_serial(cell(row, columns.serial).and_then(|v| v.parse().ok()))
            .with_alt_loc(cell(row, columns.alt_id).and_then(|v| v.chars().next()))
            .with_occupancy(cell(row, columns.occupancy).and_then(|v| v.parse().ok()))
            .with_b_factor(cell(row, columns.b_factor).and_then(|v| v.parse().ok()));

        let is_hetero = cell(row, columns.group).is_some_and(|g| g.eq_ignore_ascii_case("HETATM"));
        let insertion_code = cell(row, columns.insertion_code).and_then(|v| v.chars().next());

        self.builder.add_atom(AtomRecord {
            chain_id,
            residue_name,
            residue_key: ResidueKey::new(number, insertion_code),
            is_hetero,
            atom,
        });
        Ok(())
    }
}

fn is_atom_site(tag: &str) -> bool {
    tag.get(..ATOM_SITE_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(ATOM_SITE_PREFIX))
}
