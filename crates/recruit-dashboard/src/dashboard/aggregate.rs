use super::records::{JobRecord, ResumeRecord};
use super::status::{is_inactive_resume, PipelineStage, JOB_OPEN};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub open_jobs: usize,
    pub total_candidates: usize,
    pub active_candidates: usize,
    /// Whole percentage in `0..=100`.
    pub placement_rate: u8,
}

/// Resume counts per stage. Statuses outside every stage are not counted, so
/// the sum can be below the candidate total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineCounts {
    pub sourcing: usize,
    pub screening: usize,
    pub submitted: usize,
    pub interview: usize,
    pub offer: usize,
    pub placed: usize,
}

impl PipelineCounts {
    pub fn get(&self, stage: PipelineStage) -> usize {
        match stage {
            PipelineStage::Sourcing => self.sourcing,
            PipelineStage::Screening => self.screening,
            PipelineStage::Submitted => self.submitted,
            PipelineStage::Interview => self.interview,
            PipelineStage::Offer => self.offer,
            PipelineStage::Placed => self.placed,
        }
    }

    fn slot_mut(&mut self, stage: PipelineStage) -> &mut usize {
        match stage {
            PipelineStage::Sourcing => &mut self.sourcing,
            PipelineStage::Screening => &mut self.screening,
            PipelineStage::Submitted => &mut self.submitted,
            PipelineStage::Interview => &mut self.interview,
            PipelineStage::Offer => &mut self.offer,
            PipelineStage::Placed => &mut self.placed,
        }
    }

    pub fn total(&self) -> usize {
        PipelineStage::ordered()
            .into_iter()
            .map(|stage| self.get(stage))
            .sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aggregates {
    pub summary: DashboardSummary,
    pub pipeline: PipelineCounts,
}

pub fn aggregate(jobs: &[JobRecord], resumes: &[ResumeRecord]) -> Aggregates {
    let mut pipeline = PipelineCounts::default();
    for resume in resumes {
        if let Some(stage) = PipelineStage::classify(&resume.status) {
            *pipeline.slot_mut(stage) += 1;
        }
    }

    let total_candidates = resumes.len();
    let summary = DashboardSummary {
        open_jobs: jobs.iter().filter(|job| job.status == JOB_OPEN).count(),
        total_candidates,
        active_candidates: resumes
            .iter()
            .filter(|resume| !is_inactive_resume(&resume.status))
            .count(),
        placement_rate: placement_rate(pipeline.placed, total_candidates),
    };

    Aggregates { summary, pipeline }
}

/// `round(100 * placed / total)` with halves rounded up; 0 without candidates.
pub fn placement_rate(placed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let placed = placed.min(total) as u64;
    let total = total as u64;
    let rate = (200 * placed + total) / (2 * total);
    u8::try_from(rate).unwrap_or(100)
}
