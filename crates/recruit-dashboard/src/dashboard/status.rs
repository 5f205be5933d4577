use serde::{Deserialize, Serialize};

/// Job status counted as an open opening.
pub const JOB_OPEN: &str = "開放中";
/// Default resume status ("pending review").
pub const RESUME_PENDING_REVIEW: &str = "待審核";
pub const RESUME_CLOSED: &str = "已關閉";
pub const RESUME_NOT_SUITABLE: &str = "不適合";

/// True when a resume status takes the candidate out of the active pool.
pub fn is_inactive_resume(status: &str) -> bool {
    status == RESUME_CLOSED || status == RESUME_NOT_SUITABLE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Sourcing,
    Screening,
    Submitted,
    Interview,
    Offer,
    Placed,
}

impl PipelineStage {
    /// Evaluation order for classification.
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Sourcing,
            Self::Screening,
            Self::Submitted,
            Self::Interview,
            Self::Offer,
            Self::Placed,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sourcing => "履歷收集",
            Self::Screening => "篩選中",
            Self::Submitted => "已推薦",
            Self::Interview => "面試中",
            Self::Offer => "Offer",
            Self::Placed => "已報到",
        }
    }

    /// Resume status labels that place a candidate in this stage.
    pub const fn statuses(self) -> &'static [&'static str] {
        match self {
            Self::Sourcing => &["待審核", "初篩中"],
            Self::Screening => &["待推薦", "待確認"],
            Self::Submitted => &["已推薦"],
            Self::Interview => &["面試中", "面試安排"],
            Self::Offer => &["Offer", "談判中"],
            Self::Placed => &["已報到", "保證期"],
        }
    }

    /// First stage whose label set contains `status` exactly.
    pub fn classify(status: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|stage| stage.statuses().iter().any(|label| *label == status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_matches_exact_labels_only() {
        assert_eq!(PipelineStage::classify("待審核"), Some(PipelineStage::Sourcing));
        assert_eq!(PipelineStage::classify("面試安排"), Some(PipelineStage::Interview));
        assert_eq!(PipelineStage::classify("保證期"), Some(PipelineStage::Placed));
        assert_eq!(PipelineStage::classify("offer"), None);
        assert_eq!(PipelineStage::classify(" 已報到"), None);
        assert_eq!(PipelineStage::classify(RESUME_CLOSED), None);
    }

    #[test]
    fn label_sets_do_not_overlap() {
        for stage in PipelineStage::ordered() {
            for status in stage.statuses() {
                assert_eq!(PipelineStage::classify(status), Some(stage));
            }
        }
    }

    #[test]
    fn inactive_statuses() {
        assert!(is_inactive_resume("已關閉"));
        assert!(is_inactive_resume("不適合"));
        assert!(!is_inactive_resume("待審核"));
        assert!(!is_inactive_resume(""));
    }
}
