//! Resume-to-job similarity scoring
//!
//! The final score is the embedding cosine similarity scaled to 0-100, plus a
//! fixed boost for every job-title keyword found in the resume vocabulary,
//! clamped to 100 and rounded to two decimals.

use crate::error::Result;
use crate::processing::embeddings::{cosine_similarity, Embedder};
use crate::processing::vocabulary::term_vocabulary;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Points added per matching title keyword
pub const DEFAULT_TITLE_KEYWORD_BOOST: f64 = 1.2;

pub const MAX_SCORE: f64 = 100.0;

/// How a final score was put together. Diagnostic only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base_similarity: f64,
    pub extra_weight: f64,
    pub matched_title_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScore {
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Job description prepared once per ranking run.
#[derive(Debug, Clone)]
pub struct PreparedJob {
    pub title: String,
    pub normalized: String,
    pub vocabulary: BTreeSet<String>,
    pub embedding: Vec<f32>,
}

impl PreparedJob {
    pub fn new(raw_text: &str, normalized: String, embedder: &dyn Embedder) -> Self {
        let embedding = embedder.embed(&normalized);
        Self {
            title: extract_job_title(raw_text),
            vocabulary: term_vocabulary(&normalized),
            normalized,
            embedding,
        }
    }
}

/// First line of the raw job description; empty when the text is blank.
pub fn extract_job_title(job_text: &str) -> String {
    if job_text.trim().is_empty() {
        return String::new();
    }
    job_text.split('\n').next().unwrap_or_default().trim().to_string()
}

pub struct SimilarityScorer<'a> {
    embedder: &'a dyn Embedder,
    title_keyword_boost: f64,
}

impl<'a> SimilarityScorer<'a> {
    pub fn new(embedder: &'a dyn Embedder) -> Self {
        Self::with_boost(embedder, DEFAULT_TITLE_KEYWORD_BOOST)
    }

    pub fn with_boost(embedder: &'a dyn Embedder, title_keyword_boost: f64) -> Self {
        Self {
            embedder,
            title_keyword_boost,
        }
    }

    pub fn embedder(&self) -> &dyn Embedder {
        self.embedder
    }

    /// Score a normalized resume against a prepared job and list the job
    /// terms the resume lacks.
    pub fn score(&self, resume_norm: &str, job: &PreparedJob) -> Result<(SimilarityScore, BTreeSet<String>)> {
        let resume_embedding = self.embedder.embed(resume_norm);
        let resume_terms = term_vocabulary(resume_norm);

        let similarity = self.weighted_similarity(&resume_embedding, &job.embedding, &resume_terms, &job.title)?;
        let missing = job.vocabulary.difference(&resume_terms).cloned().collect();

        Ok((similarity, missing))
    }

    /// Weighted similarity of two normalized texts; `job_title` is taken from
    /// the raw job description.
    pub fn compute_weighted_similarity(
        &self,
        resume_norm: &str,
        job_norm: &str,
        job_title: &str,
    ) -> Result<SimilarityScore> {
        let resume_embedding = self.embedder.embed(resume_norm);
        let job_embedding = self.embedder.embed(job_norm);
        let resume_terms = term_vocabulary(resume_norm);

        self.weighted_similarity(&resume_embedding, &job_embedding, &resume_terms, job_title)
    }

    fn weighted_similarity(
        &self,
        resume_embedding: &[f32],
        job_embedding: &[f32],
        resume_terms: &BTreeSet<String>,
        job_title: &str,
    ) -> Result<SimilarityScore> {
        let base_similarity = f64::from(cosine_similarity(resume_embedding, job_embedding)?) * 100.0;

        let title = job_title.to_lowercase();
        let matched_title_keywords: Vec<String> = title
            .split_whitespace()
            .filter(|keyword| resume_terms.contains(*keyword))
            .map(str::to_string)
            .collect();
        let extra_weight = matched_title_keywords.len() as f64 * self.title_keyword_boost;

        let final_score = round2((base_similarity + extra_weight).clamp(0.0, MAX_SCORE));

        debug!("Base similarity score: {:.2}%", base_similarity);
        debug!("Extra weight added: {:.2}", extra_weight);
        debug!("Final adjusted score: {:.2}%", final_score);

        Ok(SimilarityScore {
            score: final_score,
            breakdown: ScoreBreakdown {
                base_similarity,
                extra_weight,
                matched_title_keywords,
            },
        })
    }
}

/// Job terms absent from the resume, each vocabulary fit on its own text.
pub fn identify_missing_skills(resume_norm: &str, job_norm: &str) -> BTreeSet<String> {
    let job_terms = term_vocabulary(job_norm);
    let resume_terms = term_vocabulary(resume_norm);

    job_terms.difference(&resume_terms).cloned().collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::embeddings::HashingEmbedder;

    /// Embeds every text to the same vector, so base similarity is always 100
    struct ConstantEmbedder;

    impl Embedder for ConstantEmbedder {
        fn embed(&self, _text: &str) -> Vec<f32> {
            vec![1.0, 0.0]
        }

        fn name(&self) -> &str {
            "constant"
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    /// Embeds every text to the zero vector, so base similarity is always 0
    struct ZeroEmbedder;

    impl Embedder for ZeroEmbedder {
        fn embed(&self, _text: &str) -> Vec<f32> {
            vec![0.0; 4]
        }

        fn name(&self) -> &str {
            "zero"
        }

        fn dimension(&self) -> usize {
            4
        }
    }

    /// Term counts over a fixed word list; distinct words never share a slot
    struct WordCountEmbedder(&'static [&'static str]);

    impl Embedder for WordCountEmbedder {
        fn embed(&self, text: &str) -> Vec<f32> {
            let mut vector = vec![0.0; self.0.len()];
            for token in text.split_whitespace() {
                if let Some(slot) = self.0.iter().position(|word| *word == token) {
                    vector[slot] += 1.0;
                }
            }
            vector
        }

        fn name(&self) -> &str {
            "word-count"
        }

        fn dimension(&self) -> usize {
            self.0.len()
        }
    }

    #[test]
    fn test_extract_job_title() {
        assert_eq!(extract_job_title("Data Engineer\nBuild pipelines"), "Data Engineer");
        assert_eq!(extract_job_title("Single line title"), "Single line title");
        assert_eq!(extract_job_title("   "), "");
        assert_eq!(extract_job_title(""), "");
    }

    #[test]
    fn test_identical_text_scores_near_100() {
        let embedder = HashingEmbedder::default();
        let scorer = SimilarityScorer::new(&embedder);
        let text = "python tensorflow machine learning engineer";

        let result = scorer.compute_weighted_similarity(text, text, "").unwrap();
        assert!(result.breakdown.base_similarity > 99.99);
        assert_eq!(result.breakdown.extra_weight, 0.0);
        assert_eq!(result.score, 100.0);
    }

    #[test]
    fn test_boost_counts_title_keywords_in_resume_vocabulary() {
        let scorer = SimilarityScorer::new(&ZeroEmbedder);

        let result = scorer
            .compute_weighted_similarity("machine learning python", "anything", "Machine Learning Engineer")
            .unwrap();

        assert_eq!(result.breakdown.base_similarity, 0.0);
        assert_eq!(result.breakdown.matched_title_keywords, vec!["machine", "learning"]);
        assert!((result.breakdown.extra_weight - 2.4).abs() < 1e-9);
        assert_eq!(result.score, 2.4);
    }

    #[test]
    fn test_configured_boost_is_applied() {
        let scorer = SimilarityScorer::with_boost(&ZeroEmbedder, 5.0);
        let result = scorer
            .compute_weighted_similarity("rust developer", "", "Rust Developer")
            .unwrap();
        assert_eq!(result.score, 10.0);
    }

    #[test]
    fn test_score_is_clamped_to_100() {
        let scorer = SimilarityScorer::new(&ConstantEmbedder);
        let result = scorer
            .compute_weighted_similarity("senior rust engineer", "senior rust engineer", "Senior Rust Engineer")
            .unwrap();

        assert_eq!(result.breakdown.base_similarity, 100.0);
        assert!((result.breakdown.extra_weight - 3.6).abs() < 1e-9);
        assert_eq!(result.score, 100.0);
    }

    #[test]
    fn test_score_is_bounded_for_assorted_inputs() {
        let embedder = HashingEmbedder::new(16);
        let scorer = SimilarityScorer::new(&embedder);
        let texts = ["", "python", "data data data", "rust go python java scala kotlin", "ai ml nlp"];

        for resume in texts {
            for job in texts {
                let result = scorer.compute_weighted_similarity(resume, job, job).unwrap();
                assert!((0.0..=100.0).contains(&result.score), "{} vs {}", resume, job);
            }
        }
    }

    #[test]
    fn test_empty_inputs_do_not_fail() {
        let embedder = HashingEmbedder::default();
        let scorer = SimilarityScorer::new(&embedder);

        let result = scorer.compute_weighted_similarity("", "", "").unwrap();
        assert_eq!(result.score, 0.0);
        assert!(identify_missing_skills("", "").is_empty());
    }

    #[test]
    fn test_score_is_rounded_to_two_decimals() {
        let embedder = HashingEmbedder::default();
        let scorer = SimilarityScorer::new(&embedder);
        let result = scorer
            .compute_weighted_similarity("python sql spark", "python spark airflow kafka", "")
            .unwrap();

        assert_eq!(result.score, (result.score * 100.0).round() / 100.0);
    }

    #[test]
    fn test_identify_missing_skills_is_set_difference() {
        let missing = identify_missing_skills("python sql", "python spark sql airflow");
        let expected: BTreeSet<String> = ["airflow", "spark"].iter().map(|s| s.to_string()).collect();
        assert_eq!(missing, expected);
    }

    #[test]
    fn test_missing_skills_for_empty_resume_is_full_job_vocabulary() {
        let job = "python spark airflow";
        assert_eq!(identify_missing_skills("", job), term_vocabulary(job));
    }

    #[test]
    fn test_score_against_prepared_job() {
        let embedder = HashingEmbedder::default();
        let scorer = SimilarityScorer::new(&embedder);
        let job = PreparedJob::new("Data Engineer\nspark", "data engineer spark".to_string(), &embedder);

        let (similarity, missing) = scorer.score("data spark python", &job).unwrap();

        assert_eq!(job.title, "Data Engineer");
        assert_eq!(similarity.breakdown.matched_title_keywords, vec!["data"]);
        assert_eq!(missing, identify_missing_skills("data spark python", "data engineer spark"));
        assert!(missing.is_subset(&job.vocabulary));
    }

    #[test]
    fn test_more_overlap_never_lowers_score() {
        let embedder = WordCountEmbedder(&["data", "engineer", "python", "spark", "airflow", "kafka", "sql"]);
        let scorer = SimilarityScorer::new(&embedder);
        let raw_job = "Data Engineer\npython spark airflow kafka sql";
        let job = PreparedJob::new(raw_job, "data engineer python spark airflow kafka sql".to_string(), &embedder);

        let resumes = [
            "data engineer",
            "data engineer python",
            "data engineer python spark",
            "data engineer python spark airflow",
            "data engineer python spark airflow kafka",
            "data engineer python spark airflow kafka sql",
        ];

        let mut previous = 0.0;
        for resume in resumes {
            let (similarity, _) = scorer.score(resume, &job).unwrap();
            assert_eq!(similarity.breakdown.matched_title_keywords, vec!["data", "engineer"]);
            assert!(
                similarity.score >= previous,
                "'{}' scored {} after {}",
                resume,
                similarity.score,
                previous
            );
            previous = similarity.score;
        }
        assert_eq!(previous, 100.0);
    }
}
