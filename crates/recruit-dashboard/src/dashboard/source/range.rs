use super::Rows;
use std::fmt;
use std::str::FromStr;

/// Sheets caps columns at `ZZZ`, so anything longer is a sheet name.
const MAX_COLUMN_LETTERS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeParseError {
    #[error("range descriptor is empty")]
    Empty,
    #[error("range '{0}' names an empty sheet")]
    EmptySheetName(String),
    #[error("range '{0}' has an invalid cell reference")]
    InvalidCell(String),
    #[error("range '{0}' ends before it starts")]
    Inverted(String),
}

/// Zero-based, inclusive cell window. Missing ends are unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBounds {
    pub first_column: usize,
    pub last_column: Option<usize>,
    pub first_row: usize,
    pub last_row: Option<usize>,
}

/// A1-notation range such as `工作表1!A1:K100`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRange {
    raw: String,
    sheet: Option<String>,
    bounds: Option<CellBounds>,
}

impl SheetRange {
    pub fn parse(raw: &str) -> Result<Self, RangeParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RangeParseError::Empty);
        }

        let (sheet, bounds) = match trimmed.rfind('!') {
            Some(pos) => {
                let sheet = unquote_sheet(&trimmed[..pos])
                    .ok_or_else(|| RangeParseError::EmptySheetName(trimmed.to_string()))?;
                let bounds = parse_bounds(&trimmed[pos + 1..])
                    .ok_or_else(|| RangeParseError::InvalidCell(trimmed.to_string()))?;
                (Some(sheet), Some(bounds))
            }
            None => match parse_bounds(trimmed) {
                Some(bounds) => (None, Some(bounds)),
                None => (unquote_sheet(trimmed), None),
            },
        };

        if let Some(bounds) = &bounds {
            let columns_inverted = bounds
                .last_column
                .is_some_and(|last| last < bounds.first_column);
            let rows_inverted = bounds.last_row.is_some_and(|last| last < bounds.first_row);
            if columns_inverted || rows_inverted {
                return Err(RangeParseError::Inverted(trimmed.to_string()));
            }
        }

        Ok(Self {
            raw: trimmed.to_string(),
            sheet,
            bounds,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn sheet(&self) -> Option<&str> {
        self.sheet.as_deref()
    }

    pub fn bounds(&self) -> Option<CellBounds> {
        self.bounds
    }

    /// Cuts a full-sheet grid down to this range and drops trailing blank
    /// cells and rows, matching what the Sheets values API returns.
    pub fn clip(&self, rows: Rows) -> Rows {
        let mut clipped: Rows = match self.bounds {
            Some(bounds) => {
                let row_count = bounds
                    .last_row
                    .map_or(usize::MAX, |last| last - bounds.first_row + 1);
                let column_count = bounds
                    .last_column
                    .map_or(usize::MAX, |last| last - bounds.first_column + 1);
                rows.into_iter()
                    .skip(bounds.first_row)
                    .take(row_count)
                    .map(|row| {
                        row.into_iter()
                            .skip(bounds.first_column)
                            .take(column_count)
                            .collect()
                    })
                    .collect()
            }
            None => rows,
        };

        for row in &mut clipped {
            while row.last().is_some_and(|cell| cell.is_empty()) {
                row.pop();
            }
        }
        while clipped.last().is_some_and(|row| row.is_empty()) {
            clipped.pop();
        }
        clipped
    }
}

impl FromStr for SheetRange {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Debug, Clone, Copy)]
struct CellRef {
    column: Option<usize>,
    row: Option<usize>,
}

fn unquote_sheet(raw: &str) -> Option<String> {
    let name = match raw
        .strip_prefix('\'')
        .and_then(|inner| inner.strip_suffix('\''))
    {
        Some(inner) => inner.replace("''", "'"),
        None => raw.to_string(),
    };
    (!name.is_empty()).then_some(name)
}

fn parse_bounds(raw: &str) -> Option<CellBounds> {
    let (start, end) = match raw.split_once(':') {
        Some((start, end)) => (parse_cell(start)?, parse_cell(end)?),
        None => {
            // A lone reference needs both parts, otherwise "Data" would read as column DATA.
            let cell = parse_cell(raw)?;
            if cell.column.is_none() || cell.row.is_none() {
                return None;
            }
            (cell, cell)
        }
    };

    Some(CellBounds {
        first_column: start.column.unwrap_or(0),
        last_column: end.column,
        first_row: start.row.unwrap_or(0),
        last_row: end.row,
    })
}

fn parse_cell(raw: &str) -> Option<CellRef> {
    let split = raw
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(raw.len());
    let (letters, digits) = raw.split_at(split);
    if (letters.is_empty() && digits.is_empty()) || letters.len() > MAX_COLUMN_LETTERS {
        return None;
    }

    let column = if letters.is_empty() {
        None
    } else {
        Some(column_index(letters)?)
    };
    let row = if digits.is_empty() {
        None
    } else {
        let number: usize = digits.parse().ok()?;
        Some(number.checked_sub(1)?)
    };

    Some(CellRef { column, row })
}

fn column_index(letters: &str) -> Option<usize> {
    letters
        .chars()
        .try_fold(0usize, |acc, letter| {
            let value = letter.to_ascii_uppercase() as usize - 'A' as usize + 1;
            acc.checked_mul(26)?.checked_add(value)
        })
        .map(|number| number - 1)
}
