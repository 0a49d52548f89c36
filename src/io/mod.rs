//! CSV time-series import and trajectory export.

pub mod export;
pub mod import;
