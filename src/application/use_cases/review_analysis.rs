// ============================================================
// REVIEW ANALYSIS USE CASE
// ============================================================
// Orchestrate decoding, parsing, grouping, and labeling for one upload
// at a time, and hold the latest successful result

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use super::heuristic_labeler::HeuristicLabeler;
use super::product_grouper::group_by_product;
use crate::domain::error::{AppError, Result};
use crate::domain::review::{AnalysisConfig, Notification, ProductRecord};
use crate::infrastructure::csv::ReviewCsvParser;
use crate::infrastructure::random::{RandomSource, ThreadRandom};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingState {
    Idle,
    Processing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStatus {
    pub state: ProcessingState,
    pub has_results: bool,
    pub product_count: usize,
}

/// Result of one successful upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub analysis_id: String,
    pub file_name: String,
    pub notification: Notification,
    pub products: Vec<ProductRecord>,
    pub row_count: usize,
    pub analyzed_at: DateTime<Utc>,
    pub processing_time_ms: u64,
}

#[derive(Default)]
struct SessionState {
    processing: bool,
    latest: Option<Arc<AnalysisOutcome>>,
}

/// Resets the processing flag on every exit path
struct ProcessingGuard<'a> {
    state: &'a Mutex<SessionState>,
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        lock_state(self.state).processing = false;
    }
}

fn lock_state(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Review analysis orchestrator. At most one analysis runs at a time.
pub struct ReviewAnalysisUseCase {
    config: AnalysisConfig,
    parser: ReviewCsvParser,
    labeler: HeuristicLabeler,
    state: Mutex<SessionState>,
}

impl ReviewAnalysisUseCase {
    pub fn new(config: AnalysisConfig, random: Arc<dyn RandomSource>) -> Self {
        Self {
            config,
            parser: ReviewCsvParser::new(),
            labeler: HeuristicLabeler::new(random),
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Orchestrator with the unseeded thread-local random source
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self::new(config, Arc::new(ThreadRandom))
    }

    /// Analyze a review file on disk
    pub async fn analyze_file(&self, path: &Path) -> Result<AnalysisOutcome> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.check_file_type(&file_name)?;
        let _guard = self.begin()?;

        let result = self.read_and_run(path, &file_name).await;
        self.finish(result)
    }

    /// Analyze uploaded bytes received under `file_name`
    pub async fn analyze_upload(&self, file_name: &str, bytes: &[u8]) -> Result<AnalysisOutcome> {
        self.check_file_type(file_name)?;
        let _guard = self.begin()?;

        let result = self.run_pipeline(file_name, bytes).await;
        self.finish(result)
    }

    pub fn status(&self) -> AnalysisStatus {
        let state = lock_state(&self.state);
        AnalysisStatus {
            state: if state.processing {
                ProcessingState::Processing
            } else {
                ProcessingState::Idle
            },
            has_results: state.latest.is_some(),
            product_count: state
                .latest
                .as_ref()
                .map(|outcome| outcome.products.len())
                .unwrap_or(0),
        }
    }

    pub fn latest(&self) -> Option<Arc<AnalysisOutcome>> {
        lock_state(&self.state).latest.clone()
    }

    /// Products of the latest successful analysis, empty when there is none
    pub fn latest_products(&self) -> Vec<ProductRecord> {
        self.latest()
            .map(|outcome| outcome.products.clone())
            .unwrap_or_default()
    }

    fn check_file_type(&self, file_name: &str) -> Result<()> {
        if self.config.accepts_file(file_name) {
            Ok(())
        } else {
            tracing::warn!(file = %file_name, "Rejected upload with unsupported file type");
            Err(AppError::InvalidFileType(file_name.to_string()))
        }
    }

    /// Enter the processing state, or fail if another analysis holds it
    fn begin(&self) -> Result<ProcessingGuard<'_>> {
        let mut state = lock_state(&self.state);
        if state.processing {
            return Err(AppError::AnalysisInProgress);
        }
        state.processing = true;
        Ok(ProcessingGuard { state: &self.state })
    }

    fn finish(&self, result: Result<AnalysisOutcome>) -> Result<AnalysisOutcome> {
        match &result {
            Ok(outcome) => {
                lock_state(&self.state).latest = Some(Arc::new(outcome.clone()));
            }
            Err(err) => {
                tracing::warn!(error = %err, "Review analysis failed");
            }
        }
        result
    }

    async fn read_and_run(&self, path: &Path, file_name: &str) -> Result<AnalysisOutcome> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        self.run_pipeline(file_name, &bytes).await
    }

    async fn run_pipeline(&self, file_name: &str, bytes: &[u8]) -> Result<AnalysisOutcome> {
        let analysis_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!("analysis", id = %analysis_id, file = %file_name);

        self.pipeline(analysis_id, file_name, bytes)
            .instrument(span)
            .await
    }

    /// decode -> split -> group -> delay -> label
    async fn pipeline(
        &self,
        analysis_id: String,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<AnalysisOutcome> {
        let start = Instant::now();

        let parsed = self.parser.parse_bytes(bytes)?;
        let row_count = parsed.rows.len();
        let groups = group_by_product(parsed.rows);

        if self.config.simulated_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.simulated_delay_ms)).await;
        }

        let products = self.labeler.label_all(&groups);
        tracing::info!(
            products = products.len(),
            rows = row_count,
            "Review analysis complete"
        );

        Ok(AnalysisOutcome {
            notification: Notification::analysis_complete(products.len()),
            analysis_id,
            file_name: file_name.to_string(),
            products,
            row_count,
            analyzed_at: Utc::now(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

impl Default for ReviewAnalysisUseCase {
    fn default() -> Self {
        Self::with_config(AnalysisConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::review::Sentiment;
    use crate::infrastructure::random::SeededRandom;
    use std::collections::HashSet;
    use std::io::Write;

    const REVIEWS_CSV: &str = "\
product_id,product_title,review_text,rating,sentiment
P1,Pixel Phone,\"Great camera, solid battery\",5,positive
P2,Linen Shirt,Soft fabric,4,
P1,Pixel Phone 8 Pro,Screen is dim,2,positive

P3,,Does the job,3,negative
P2,Linen Shirt,Runs small,1,
";

    fn use_case() -> ReviewAnalysisUseCase {
        ReviewAnalysisUseCase::new(AnalysisConfig::instant(), Arc::new(SeededRandom::new(11)))
    }

    #[tokio::test]
    async fn test_analyze_upload_groups_products() {
        let use_case = use_case();
        let outcome = use_case
            .analyze_upload("reviews.csv", REVIEWS_CSV.as_bytes())
            .await
            .unwrap();

        assert_eq!(outcome.row_count, 5);
        assert_eq!(outcome.products.len(), 3);
        assert_eq!(
            outcome.products.iter().map(|p| p.review_count).sum::<usize>(),
            5
        );

        let names: Vec<&str> = outcome
            .products
            .iter()
            .map(|p| p.product_name.as_str())
            .collect();
        assert_eq!(names, vec!["Pixel Phone", "Linen Shirt", "P3"]);

        let phone = &outcome.products[0];
        assert_eq!(phone.category, "Electronics - Smartphone");
        assert_eq!(phone.summary.overall_sentiment, Sentiment::Positive);

        let shirt = &outcome.products[1];
        assert_eq!(shirt.category, "Clothing");
        assert_eq!(shirt.summary.overall_sentiment, Sentiment::Neutral);

        assert_eq!(
            outcome.notification.message,
            "Successfully analyzed 3 products from your CSV file."
        );
    }

    #[tokio::test]
    async fn test_record_count_matches_distinct_keys() {
        let use_case = use_case();
        let mut content = String::from("product_id,review_text\n");
        for i in 0..40 {
            content.push_str(&format!("SKU-{},review {}\n", i % 7, i));
        }

        let outcome = use_case
            .analyze_upload("bulk.CSV", content.as_bytes())
            .await
            .unwrap();

        let keys: HashSet<String> = (0..40).map(|i| format!("SKU-{}", i % 7)).collect();
        assert_eq!(outcome.products.len(), keys.len());
        assert_eq!(
            outcome.products.iter().map(|p| p.review_count).sum::<usize>(),
            40
        );
    }

    #[tokio::test]
    async fn test_invalid_file_type_never_enters_processing() {
        let use_case = use_case();
        let err = use_case
            .analyze_upload("reviews.txt", REVIEWS_CSV.as_bytes())
            .await
            .unwrap_err();

        assert_eq!(err, AppError::InvalidFileType("reviews.txt".to_string()));
        assert_eq!(use_case.status().state, ProcessingState::Idle);
        assert!(!use_case.status().has_results);
    }

    #[tokio::test]
    async fn test_failure_returns_to_idle_and_keeps_previous_results() {
        let use_case = use_case();
        use_case
            .analyze_upload("good.csv", REVIEWS_CSV.as_bytes())
            .await
            .unwrap();

        let err = use_case
            .analyze_upload("bad.csv", b"product_id,rating\nP1,5\n")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MissingRequiredColumn(_)));

        let status = use_case.status();
        assert_eq!(status.state, ProcessingState::Idle);
        assert!(status.has_results);
        assert_eq!(status.product_count, 3);
        assert_eq!(use_case.latest().unwrap().file_name, "good.csv");
    }

    #[tokio::test]
    async fn test_header_only_upload_fails() {
        let use_case = use_case();
        let err = use_case
            .analyze_upload("empty.csv", b"product_id,review_text\n")
            .await
            .unwrap_err();

        assert_eq!(err, AppError::EmptyOrHeaderOnlyFile);
        assert!(use_case.latest_products().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_submission_rejected_while_processing() {
        let use_case = Arc::new(ReviewAnalysisUseCase::new(
            AnalysisConfig {
                simulated_delay_ms: 1_000,
                ..AnalysisConfig::default()
            },
            Arc::new(SeededRandom::new(3)),
        ));

        let first = {
            let use_case = use_case.clone();
            tokio::spawn(async move {
                use_case
                    .analyze_upload("first.csv", REVIEWS_CSV.as_bytes())
                    .await
            })
        };

        // Let the first analysis reach its delay
        tokio::task::yield_now().await;
        assert_eq!(use_case.status().state, ProcessingState::Processing);

        let err = use_case
            .analyze_upload("second.csv", REVIEWS_CSV.as_bytes())
            .await
            .unwrap_err();
        assert_eq!(err, AppError::AnalysisInProgress);

        let outcome = first.await.unwrap().unwrap();
        assert_eq!(outcome.file_name, "first.csv");
        assert_eq!(use_case.status().state, ProcessingState::Idle);
    }

    #[tokio::test]
    async fn test_analyze_file_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(REVIEWS_CSV.as_bytes()).unwrap();

        let use_case = use_case();
        let outcome = use_case.analyze_file(file.path()).await.unwrap();
        assert_eq!(outcome.products.len(), 3);
        assert_eq!(use_case.latest_products(), outcome.products);
    }

    #[tokio::test]
    async fn test_analyze_missing_file_is_io_error() {
        let use_case = use_case();
        let err = use_case
            .analyze_file(Path::new("/no/such/dir/reviews.csv"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::IoError(_)));
        assert_eq!(use_case.status().state, ProcessingState::Idle);
    }
}
