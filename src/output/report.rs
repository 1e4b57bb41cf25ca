//! Report structures for a ranking run

use crate::processing::ranker::Leaderboard;
use crate::processing::scorer::ScoreBreakdown;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Leaderboard plus the context it was produced in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardReport {
    pub metadata: ReportMetadata,
    pub entries: Vec<ReportEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub job_path: String,
    pub job_title: String,
    pub embedding_model: String,
    pub ranker_version: String,
    pub candidate_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    /// 1-based position in the leaderboard
    pub rank: usize,
    pub candidate_id: String,
    pub score: f64,
    pub missing_skills: Vec<String>,
    pub breakdown: ScoreBreakdown,
    pub warnings: Vec<String>,
}

impl LeaderboardReport {
    pub fn new(leaderboard: &Leaderboard, job_path: &str, job_title: &str, embedding_model: &str) -> Self {
        let entries = leaderboard
            .ranked()
            .map(|(rank, result)| ReportEntry {
                rank,
                candidate_id: result.candidate_id.clone(),
                score: result.score,
                missing_skills: result.missing_skills.iter().cloned().collect(),
                breakdown: result.breakdown.clone(),
                warnings: result.warnings.iter().map(|w| w.to_string()).collect(),
            })
            .collect();

        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                job_path: job_path.to_string(),
                job_title: job_title.to_string(),
                embedding_model: embedding_model.to_string(),
                ranker_version: env!("CARGO_PKG_VERSION").to_string(),
                candidate_count: leaderboard.len(),
            },
            entries,
        }
    }
}
