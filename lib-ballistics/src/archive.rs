use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const FORMAT: &str = "ballistics-trajectory";




// ============================================================================
#[derive(Serialize, Deserialize)]
struct Payload {
    format: String,
    datasets: BTreeMap<String, Vec<f64>>,
}




// ============================================================================
/// A file holding named sequences of floats. Values are stored in binary
/// form, so they read back bit for bit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Archive {
    path: PathBuf,
}

impl Archive {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Archive { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn write(&self, datasets: BTreeMap<String, Vec<f64>>) -> Result<()> {
        let payload = Payload { format: FORMAT.to_string(), datasets };
        std::fs::write(&self.path, bincode::serialize(&payload)?)?;
        Ok(())
    }

    /// Read all datasets back. A missing file is not an error: it yields
    /// `None` so that callers can fall back to solving.
    pub fn read(&self) -> Result<Option<BTreeMap<String, Vec<f64>>>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("no archive at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let payload: Payload = bincode::deserialize(&bytes).map_err(|e| self.bad(e.to_string()))?;

        if payload.format != FORMAT {
            return Err(self.bad(format!("unexpected format '{}'", payload.format)));
        }
        Ok(Some(payload.datasets))
    }

    fn bad(&self, why: String) -> Error {
        Error::BadArchive { path: self.path.clone(), why }
    }
}
