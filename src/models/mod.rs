pub mod pending;
pub mod rename_job;
pub mod rename_result;
