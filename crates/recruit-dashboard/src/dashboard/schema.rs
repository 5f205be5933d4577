//! Column layouts of the jobs and resumes sheets.
//!
//! The sheets carry no stable keys, so fields are read by position. Each
//! layout lists, per field, the column index and the value used when that
//! column is missing or blank. Reordering the upstream sheet means editing
//! one table here.

use super::status::{JOB_OPEN, RESUME_PENDING_REVIEW};
use chrono::NaiveDate;

pub const DEFAULT_LOCATION: &str = "台北";
pub const UNTITLED_JOB: &str = "未命名職位";
pub const DEFAULT_HEADCOUNT: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellDefault {
    Blank,
    Text(&'static str),
    Count(u32),
    /// The normalization date as `YYYY-MM-DD`.
    Today,
}

impl CellDefault {
    pub fn render(self, today: NaiveDate) -> String {
        match self {
            Self::Blank => String::new(),
            Self::Text(text) => text.to_string(),
            Self::Count(count) => count.to_string(),
            Self::Today => today.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec<F> {
    pub index: usize,
    pub field: F,
    pub default: CellDefault,
}

const fn column<F>(index: usize, field: F, default: CellDefault) -> ColumnSpec<F> {
    ColumnSpec {
        index,
        field,
        default,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RowSchema<F: 'static> {
    pub id_prefix: &'static str,
    pub columns: &'static [ColumnSpec<F>],
}

impl<F: Copy + PartialEq> RowSchema<F> {
    pub fn column(&self, field: F) -> Option<&ColumnSpec<F>> {
        self.columns.iter().find(|spec| spec.field == field)
    }

    /// Trimmed cell for `field`, or `None` when missing or blank.
    pub fn cell<'r>(&self, row: &'r [String], field: F) -> Option<&'r str> {
        let spec = self.column(field)?;
        row.get(spec.index)
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
    }

    pub fn default_for(&self, field: F) -> CellDefault {
        self.column(field)
            .map_or(CellDefault::Blank, |spec| spec.default)
    }

    /// Cell text for `field` with the column default substituted.
    pub fn text(&self, row: &[String], field: F, today: NaiveDate) -> String {
        match self.cell(row, field) {
            Some(value) => value.to_string(),
            None => self.default_for(field).render(today),
        }
    }

    /// `PREFIX-NNN`, numbered by the row's position in the data block.
    pub fn record_id(&self, position: usize) -> String {
        format!("{}-{:03}", self.id_prefix, position)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobField {
    Title,
    Department,
    Headcount,
    Salary,
    Skills,
    Experience,
    Education,
    Location,
    Status,
    CreatedAt,
    UpdatedAt,
}

impl JobField {
    pub const fn all() -> [Self; 11] {
        [
            Self::Title,
            Self::Department,
            Self::Headcount,
            Self::Salary,
            Self::Skills,
            Self::Experience,
            Self::Education,
            Self::Location,
            Self::Status,
            Self::CreatedAt,
            Self::UpdatedAt,
        ]
    }
}

pub const JOB_SCHEMA: RowSchema<JobField> = RowSchema {
    id_prefix: "JOB",
    columns: &[
        column(0, JobField::Title, CellDefault::Text(UNTITLED_JOB)),
        column(1, JobField::Department, CellDefault::Blank),
        column(2, JobField::Headcount, CellDefault::Count(DEFAULT_HEADCOUNT)),
        column(3, JobField::Salary, CellDefault::Blank),
        column(4, JobField::Skills, CellDefault::Blank),
        column(5, JobField::Experience, CellDefault::Blank),
        column(6, JobField::Education, CellDefault::Blank),
        column(7, JobField::Location, CellDefault::Text(DEFAULT_LOCATION)),
        column(8, JobField::Status, CellDefault::Text(JOB_OPEN)),
        column(9, JobField::CreatedAt, CellDefault::Today),
        column(10, JobField::UpdatedAt, CellDefault::Today),
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeField {
    Name,
    Contact,
    Position,
    Skills,
    Experience,
    Education,
    ResumeLink,
    Status,
}

impl ResumeField {
    pub const fn all() -> [Self; 8] {
        [
            Self::Name,
            Self::Contact,
            Self::Position,
            Self::Skills,
            Self::Experience,
            Self::Education,
            Self::ResumeLink,
            Self::Status,
        ]
    }
}

pub const RESUME_SCHEMA: RowSchema<ResumeField> = RowSchema {
    id_prefix: "CAN",
    columns: &[
        column(0, ResumeField::Name, CellDefault::Blank),
        column(1, ResumeField::Contact, CellDefault::Blank),
        column(2, ResumeField::Position, CellDefault::Blank),
        column(3, ResumeField::Skills, CellDefault::Blank),
        column(4, ResumeField::Experience, CellDefault::Blank),
        column(5, ResumeField::Education, CellDefault::Blank),
        column(6, ResumeField::ResumeLink, CellDefault::Blank),
        column(7, ResumeField::Status, CellDefault::Text(RESUME_PENDING_REVIEW)),
    ],
};

/// Reads a headcount the way a lenient integer parse would: optional `+`,
/// leading digits, anything after ignored. Zero, negatives and garbage fall
/// back to `fallback`.
pub fn parse_headcount(cell: Option<&str>, fallback: u32) -> u32 {
    cell.map(|value| value.strip_prefix('+').unwrap_or(value))
        .map(|value| {
            value
                .chars()
                .take_while(char::is_ascii_digit)
                .collect::<String>()
        })
        .and_then(|digits| digits.parse::<u32>().ok())
        .filter(|count| *count > 0)
        .unwrap_or(fallback)
}
