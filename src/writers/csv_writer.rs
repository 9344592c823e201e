use crate::error::Result;
use crate::models::StationGroup;
use std::io::Write;
use std::path::Path;

/// Exports station groups as CSV, one row per map marker
#[derive(Debug, Default)]
pub struct GroupCsvWriter;

impl GroupCsvWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_groups_to<W: Write>(&self, groups: &[StationGroup], writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for group in groups {
            csv_writer.serialize(group)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn write_groups(&self, groups: &[StationGroup], path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = std::fs::File::create(path)?;
        self.write_groups_to(groups, file)
    }
}
