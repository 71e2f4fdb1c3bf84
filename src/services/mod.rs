pub mod backup;

pub use backup::{apply_bundle, export_bundle, ExportBundle, ImportOutcome};
