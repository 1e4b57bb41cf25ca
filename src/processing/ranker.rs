//! Batch ranking of resumes against a single job description

use crate::config::Config;
use crate::error::{RankerError, Result};
use crate::processing::embeddings::Embedder;
use crate::processing::scorer::{PreparedJob, ScoreBreakdown, SimilarityScorer};
use crate::processing::text_processor::TextProcessor;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One candidate's raw text, as produced by the input layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeInput {
    pub id: String,
    pub text: String,
    /// Set when extraction failed; `text` is then empty
    pub extraction_error: Option<String>,
}

impl ResumeInput {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            extraction_error: None,
        }
    }

    pub fn failed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: String::new(),
            extraction_error: Some(reason.into()),
        }
    }
}

/// Non-fatal problems met while scoring a single resume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RankWarning {
    ExtractionFailed(String),
    EmptyNormalization,
    ScoringFailed(String),
}

impl fmt::Display for RankWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankWarning::ExtractionFailed(reason) => write!(f, "text extraction failed: {}", reason),
            RankWarning::EmptyNormalization => write!(f, "no usable text after normalization"),
            RankWarning::ScoringFailed(reason) => write!(f, "scoring failed: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub candidate_id: String,
    /// Final score in `[0, 100]`
    pub score: f64,
    pub missing_skills: BTreeSet<String>,
    pub breakdown: ScoreBreakdown,
    pub warnings: Vec<RankWarning>,
}

/// Results ordered by score, best first; equal scores keep input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<ScoreResult>,
}

impl Leaderboard {
    /// Sorts `results` (given in input order) into leaderboard order.
    pub fn from_results(mut results: Vec<ScoreResult>) -> Self {
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        Self { entries: results }
    }

    pub fn entries(&self) -> &[ScoreResult] {
        &self.entries
    }

    /// Entries paired with their 1-based rank
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &ScoreResult)> + '_ {
        self.entries.iter().enumerate().map(|(i, entry)| (i + 1, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct Ranker<'a> {
    processor: TextProcessor,
    scorer: SimilarityScorer<'a>,
}

impl<'a> Ranker<'a> {
    /// Ranker with the built-in allow-list and boost
    pub fn new(embedder: &'a dyn Embedder) -> Self {
        Self {
            processor: TextProcessor::new(),
            scorer: SimilarityScorer::new(embedder),
        }
    }

    pub fn from_config(embedder: &'a dyn Embedder, config: &Config) -> Self {
        Self {
            processor: TextProcessor::with_allow_list(config.normalizer.allow_list.iter().cloned()),
            scorer: SimilarityScorer::with_boost(embedder, config.scoring.title_keyword_boost),
        }
    }

    pub fn processor(&self) -> &TextProcessor {
        &self.processor
    }

    /// Normalize and embed the job description once for a run.
    pub fn prepare_job(&self, job_text: &str) -> PreparedJob {
        let normalized = self.processor.normalize(job_text);
        if normalized.is_empty() {
            warn!("Job description has no usable text after normalization");
        }
        PreparedJob::new(job_text, normalized, self.scorer.embedder())
    }

    /// Rank every resume against the job description.
    ///
    /// Fails only when no resumes are given; per-resume problems are recorded
    /// as warnings on that resume's entry.
    pub fn rank(&self, job_text: &str, resumes: &[ResumeInput]) -> Result<Leaderboard> {
        if resumes.is_empty() {
            return Err(RankerError::MissingInput("no resumes supplied".to_string()));
        }

        let job = self.prepare_job(job_text);
        info!(
            "Ranking {} resumes against '{}' with {}",
            resumes.len(),
            job.title,
            self.scorer.embedder().name()
        );

        let results = resumes.iter().map(|resume| self.score_resume(resume, &job)).collect();

        Ok(Leaderboard::from_results(results))
    }

    fn score_resume(&self, resume: &ResumeInput, job: &PreparedJob) -> ScoreResult {
        let mut warnings = Vec::new();

        if let Some(reason) = &resume.extraction_error {
            warnings.push(RankWarning::ExtractionFailed(reason.clone()));
        }

        let normalized = self.processor.normalize(&resume.text);
        if normalized.is_empty() {
            warn!("{}: no usable text after normalization", resume.id);
            warnings.push(RankWarning::EmptyNormalization);
        }

        match self.scorer.score(&normalized, job) {
            Ok((similarity, missing_skills)) => {
                debug!("{}: {:.2}", resume.id, similarity.score);
                ScoreResult {
                    candidate_id: resume.id.clone(),
                    score: similarity.score,
                    missing_skills,
                    breakdown: similarity.breakdown,
                    warnings,
                }
            }
            Err(e) => {
                warn!("{}: scoring failed: {}", resume.id, e);
                warnings.push(RankWarning::ScoringFailed(e.to_string()));
                ScoreResult {
                    candidate_id: resume.id.clone(),
                    score: 0.0,
                    missing_skills: job.vocabulary.clone(),
                    breakdown: ScoreBreakdown {
                        base_similarity: 0.0,
                        extra_weight: 0.0,
                        matched_title_keywords: Vec::new(),
                    },
                    warnings,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::embeddings::HashingEmbedder;

    fn result(id: &str, score: f64) -> ScoreResult {
        ScoreResult {
            candidate_id: id.to_string(),
            score,
            missing_skills: BTreeSet::new(),
            breakdown: ScoreBreakdown {
                base_similarity: score,
                extra_weight: 0.0,
                matched_title_keywords: Vec::new(),
            },
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_leaderboard_sort_is_stable_on_ties() {
        let leaderboard =
            Leaderboard::from_results(vec![result("A", 50.0), result("B", 80.0), result("C", 50.0)]);

        let order: Vec<&str> = leaderboard.entries().iter().map(|r| r.candidate_id.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);

        let ranks: Vec<usize> = leaderboard.ranked().map(|(rank, _)| rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_rank_without_resumes_is_missing_input() {
        let embedder = HashingEmbedder::default();
        let ranker = Ranker::new(&embedder);

        let result = ranker.rank("Data Engineer\nspark", &[]);
        assert!(matches!(result, Err(RankerError::MissingInput(_))));
    }

    #[test]
    fn test_rank_orders_by_overlap() {
        let embedder = HashingEmbedder::default();
        let ranker = Ranker::new(&embedder);
        let job = "Data Engineer\nSpark, Airflow and Kafka pipelines.";

        let resumes = vec![
            ResumeInput::new("weak.txt", "Pastry chef with a love of croissants."),
            ResumeInput::new("strong.txt", "Data engineer building Spark, Airflow and Kafka pipelines."),
        ];

        let leaderboard = ranker.rank(job, &resumes).unwrap();
        assert_eq!(leaderboard.len(), 2);
        assert_eq!(leaderboard.entries()[0].candidate_id, "strong.txt");
        assert!(leaderboard.entries()[0].score > leaderboard.entries()[1].score);
    }

    #[test]
    fn test_failed_extraction_is_kept_and_flagged() {
        let embedder = HashingEmbedder::default();
        let ranker = Ranker::new(&embedder);
        let job = "Data Engineer\nSpark and Airflow.";

        let resumes = vec![
            ResumeInput::failed("broken.pdf", "file does not exist"),
            ResumeInput::new("ok.txt", "Data engineer with Spark experience."),
        ];

        let leaderboard = ranker.rank(job, &resumes).unwrap();
        let broken = leaderboard
            .entries()
            .iter()
            .find(|r| r.candidate_id == "broken.pdf")
            .unwrap();

        assert_eq!(broken.score, 0.0);
        assert_eq!(broken.missing_skills, ranker.prepare_job(job).vocabulary);
        assert!(broken
            .warnings
            .contains(&RankWarning::ExtractionFailed("file does not exist".to_string())));
        assert!(broken.warnings.contains(&RankWarning::EmptyNormalization));
        assert_eq!(leaderboard.entries().last().unwrap().candidate_id, "broken.pdf");
    }

    #[test]
    fn test_from_config_applies_allow_list_and_boost() {
        let embedder = HashingEmbedder::default();
        let mut config = Config::default();
        config.normalizer.allow_list = vec!["will".to_string()];
        config.scoring.title_keyword_boost = 0.0;

        let ranker = Ranker::from_config(&embedder, &config);
        assert_eq!(ranker.processor().normalize("we will ship"), "will ship");

        let leaderboard = ranker
            .rank("Ship Captain\nships", &[ResumeInput::new("r", "ship captain")])
            .unwrap();
        assert_eq!(leaderboard.entries()[0].breakdown.extra_weight, 0.0);
    }
}
