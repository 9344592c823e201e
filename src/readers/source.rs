use crate::error::{LocatorError, Result};
use encoding_rs::{EUC_KR, UTF_8};
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};
use ureq::{Agent, AgentBuilder};

/// Something that can hand back the raw bytes of a CSV partition
pub trait CsvSource {
    fn fetch(&self, location: &str) -> Result<Vec<u8>>;
}

/// Fetches partitions over HTTP(S)
pub struct HttpSource {
    agent: Agent,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Self {
        let agent = AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("ev-station-locator/", env!("CARGO_PKG_VERSION")))
            .build();
        Self { agent }
    }
}

impl CsvSource for HttpSource {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        debug!("GET {}", location);
        let response = self
            .agent
            .get(location)
            .call()
            .map_err(|e| LocatorError::Fetch {
                url: location.to_string(),
                message: e.to_string(),
            })?;

        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| LocatorError::Fetch {
                url: location.to_string(),
                message: e.to_string(),
            })?;

        debug!("Fetched {} bytes from {}", bytes.len(), location);
        Ok(bytes)
    }
}

/// Reads partitions from the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSource;

impl CsvSource for FileSource {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        let path = location.strip_prefix("file://").unwrap_or(location);
        Ok(std::fs::read(Path::new(path))?)
    }
}

/// Dispatches on the location: http(s) URLs go over the network, anything else is a file
pub struct AutoSource {
    http: HttpSource,
    file: FileSource,
}

impl AutoSource {
    pub fn new(timeout: Duration) -> Self {
        Self {
            http: HttpSource::new(timeout),
            file: FileSource,
        }
    }
}

impl CsvSource for AutoSource {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        if is_remote(location) {
            self.http.fetch(location)
        } else {
            self.file.fetch(location)
        }
    }
}

impl<S: CsvSource + ?Sized> CsvSource for &S {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        (**self).fetch(location)
    }
}

pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Decode partition bytes as UTF-8 (BOM stripped), falling back to EUC-KR only
/// when the bytes are clean EUC-KR; otherwise keep the lossy UTF-8 text
pub fn decode_csv_bytes(location: &str, bytes: &[u8]) -> String {
    let (utf8_text, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return utf8_text.into_owned();
    }

    let (euc_kr_text, _, euc_kr_errors) = EUC_KR.decode(bytes);
    if !euc_kr_errors {
        warn!("Partition {} is not valid UTF-8, decoded as EUC-KR", location);
        return euc_kr_text.into_owned();
    }

    warn!(
        "Partition {} has invalid bytes in both UTF-8 and EUC-KR, replacing them",
        location
    );
    utf8_text.into_owned()
}
