use super::records::{JobRecord, ResumeRecord};
use super::schema::{
    parse_headcount, JobField, ResumeField, DEFAULT_HEADCOUNT, JOB_SCHEMA, RESUME_SCHEMA,
};
use chrono::NaiveDate;

/// Rows after the header that carry a record, paired with their 1-based
/// position in the data block. Skipped rows still use up a position.
fn data_rows(rows: &[Vec<String>]) -> impl Iterator<Item = (usize, &[String])> {
    rows.iter()
        .enumerate()
        .skip(1)
        .filter(|(_, row)| row.first().is_some_and(|cell| !cell.is_empty()))
        .map(|(position, row)| (position, row.as_slice()))
}

pub fn normalize_jobs(rows: &[Vec<String>], today: NaiveDate) -> Vec<JobRecord> {
    let schema = &JOB_SCHEMA;
    data_rows(rows)
        .map(|(position, row)| JobRecord {
            id: schema.record_id(position),
            title: schema.text(row, JobField::Title, today),
            department: schema.text(row, JobField::Department, today),
            headcount: parse_headcount(schema.cell(row, JobField::Headcount), DEFAULT_HEADCOUNT),
            salary: schema.text(row, JobField::Salary, today),
            skills: schema.text(row, JobField::Skills, today),
            experience: schema.text(row, JobField::Experience, today),
            education: schema.text(row, JobField::Education, today),
            location: schema.text(row, JobField::Location, today),
            status: schema.text(row, JobField::Status, today),
            created_at: schema.text(row, JobField::CreatedAt, today),
            updated_at: schema.text(row, JobField::UpdatedAt, today),
        })
        .collect()
}

pub fn normalize_resumes(rows: &[Vec<String>], today: NaiveDate) -> Vec<ResumeRecord> {
    let schema = &RESUME_SCHEMA;
    data_rows(rows)
        .map(|(position, row)| ResumeRecord {
            id: schema.record_id(position),
            name: schema.text(row, ResumeField::Name, today),
            contact: schema.text(row, ResumeField::Contact, today),
            position: schema.text(row, ResumeField::Position, today),
            skills: schema.text(row, ResumeField::Skills, today),
            experience: schema.text(row, ResumeField::Experience, today),
            education: schema.text(row, ResumeField::Education, today),
            resume_link: schema.text(row, ResumeField::ResumeLink, today),
            status: schema.text(row, ResumeField::Status, today),
        })
        .collect()
}
