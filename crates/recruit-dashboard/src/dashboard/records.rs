use serde::Serialize;

/// One job opening. `id` is positional and only stable within a single fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    pub title: String,
    pub department: String,
    #[serde(rename = "count")]
    pub headcount: u32,
    pub salary: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
    pub location: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// One candidate resume. `id` is positional and only stable within a single fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub id: String,
    pub name: String,
    pub contact: String,
    pub position: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
    pub resume_link: String,
    pub status: String,
}
