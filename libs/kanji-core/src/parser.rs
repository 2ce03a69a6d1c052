//! Tab-separated kanjidic table parser.
//!
//! # Format
//! ```text
//! kanji	strokes	grade	jlpt	freq	ref_sh_kk	on'yomi	kun'yomi	meanings
//! 日	4	1	4	1	2a0.1	ニチ、ジツ	ひ、-び、-か	day, sun, Japan
//! ```
//!
//! The first line names the columns. Every schema column must be present;
//! extra columns are ignored. Integer cells may be empty.

use crate::error::{BuildError, Result, SchemaMismatch};
use crate::types::{Field, FieldKind, KanjiRecord};

/// Parse TSV content into records, in input order.
///
/// Fails on the first row that violates the schema; nothing is returned
/// for a partially valid table.
pub fn parse(content: &str) -> Result<Vec<KanjiRecord>> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.is_empty());

    let (header_row, header) = lines.next().ok_or(BuildError::EmptyInput)?;
    let columns = Columns::from_header(header.trim_start_matches('\u{feff}'), header_row)?;

    let mut records = Vec::new();
    for (row, line) in lines {
        records.push(columns.parse_row(line, row)?);
    }
    Ok(records)
}

/// Column positions of the schema fields within the header.
struct Columns {
    width: usize,
    positions: Vec<(Field, usize)>,
}

impl Columns {
    fn from_header(header: &str, row: usize) -> Result<Self> {
        let names: Vec<&str> = header.split('\t').map(str::trim).collect();

        let positions = Field::ALL
            .into_iter()
            .map(|field| {
                names
                    .iter()
                    .position(|name| *name == field.as_str())
                    .map(|pos| (field, pos))
                    .ok_or_else(|| BuildError::SchemaMismatch {
                        row,
                        mismatch: SchemaMismatch::MissingColumn {
                            column: field.as_str().to_string(),
                        },
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            width: names.len(),
            positions,
        })
    }

    fn parse_row(&self, line: &str, row: usize) -> Result<KanjiRecord> {
        let cells: Vec<&str> = line.split('\t').collect();
        if cells.len() != self.width {
            return Err(BuildError::SchemaMismatch {
                row,
                mismatch: SchemaMismatch::ColumnCount {
                    expected: self.width,
                    found: cells.len(),
                },
            });
        }

        let mut record = KanjiRecord::default();
        for &(field, pos) in &self.positions {
            let cell = cells[pos];
            match field.kind() {
                FieldKind::Text => set_text(&mut record, field, cell),
                FieldKind::Integer => {
                    let value = parse_integer(cell).ok_or_else(|| BuildError::SchemaMismatch {
                        row,
                        mismatch: SchemaMismatch::NotAnInteger {
                            column: field.as_str().to_string(),
                            value: cell.to_string(),
                        },
                    })?;
                    set_integer(&mut record, field, value);
                }
            }
        }
        Ok(record)
    }
}

/// `Some(None)` for an empty cell, `None` when the cell is not an integer.
fn parse_integer(cell: &str) -> Option<Option<i64>> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Some(None);
    }
    trimmed.parse::<i64>().ok().map(Some)
}

fn set_text(record: &mut KanjiRecord, field: Field, cell: &str) {
    let slot = match field {
        Field::Kanji => &mut record.kanji,
        Field::OnYomi => &mut record.on_yomi,
        Field::KunYomi => &mut record.kun_yomi,
        Field::Meanings => &mut record.meanings,
        _ => return,
    };
    *slot = cell.to_string();
}

fn set_integer(record: &mut KanjiRecord, field: Field, value: Option<i64>) {
    let slot = match field {
        Field::Strokes => &mut record.strokes,
        Field::Grade => &mut record.grade,
        Field::Jlpt => &mut record.jlpt,
        Field::Freq => &mut record.freq,
        Field::RefShKk => &mut record.ref_sh_kk,
        _ => return,
    };
    *slot = value;
}
