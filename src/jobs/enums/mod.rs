pub mod cloth_type;
pub mod submission_result;
