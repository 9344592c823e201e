use crate::error::Result;
use crate::models::MapView;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serializes the map payload for a renderer
pub struct JsonWriter {
    pretty: bool,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn write_view_to<W: Write>(&self, view: &MapView, mut writer: W) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, view)?;
        } else {
            serde_json::to_writer(&mut writer, view)?;
        }
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_view(&self, view: &MapView, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        self.write_view_to(view, BufWriter::new(file))
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}
