pub mod use_cases;

pub use use_cases::heuristic_labeler::HeuristicLabeler;
pub use use_cases::result_export::ResultExporter;
pub use use_cases::review_analysis::{
    AnalysisOutcome, AnalysisStatus, ProcessingState, ReviewAnalysisUseCase,
};
