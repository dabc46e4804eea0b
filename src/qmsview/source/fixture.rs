use super::{validate_records, RecordSource};
use crate::error::Result;
use crate::model::Record;

const FIXTURE_JSON: &str = include_str!("fixture.json");

/// Built-in sample tasks and document revisions.
///
/// Used when no data file is configured, so every view has something to show.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSource;

impl RecordSource for FixtureSource {
    fn load_records(&self) -> Result<Vec<Record>> {
        let records: Vec<Record> = serde_json::from_str(FIXTURE_JSON)?;
        validate_records(&records)?;
        Ok(records)
    }

    fn describe(&self) -> String {
        "built-in sample data".to_string()
    }
}
