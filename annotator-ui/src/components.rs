pub mod actions;
pub mod claims;
pub mod name;
pub mod page;
pub mod styles;
pub mod summary;

pub use actions::{
    use_tracked_action, AddInputForm, AddLegacyForm, ConflictAnalysis, TrackedAction, TrackedButton,
};
pub use claims::ClaimEditList;
pub use name::DocumentName;
pub use page::AnnotatorApp;
pub use summary::{EditableSummary, SummarySlot};
