//! Data sources, where daily products are fetched from.
use crate::error::Error;

use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

#[cfg(feature = "log")]
use log::debug;

/// [DataSource] resolves a logical file name (the key) to
/// its readable (decompressed) content.
pub trait DataSource {
    /// Fetches content described by `key`.
    /// Returns [Error::NoData] when this source has nothing for `key`.
    fn fetch(&self, key: &str) -> Result<String, Error>;
}

/// [LocalDirectory] serves files that were stored in a local directory,
/// either as is or gzip compressed (`.gz` extension).
#[derive(Debug, Clone, PartialEq)]
pub struct LocalDirectory {
    path: PathBuf,
}

impl LocalDirectory {
    /// Builds a new [LocalDirectory] [DataSource].
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the root directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_plain(path: &Path) -> Result<String, Error> {
        let mut content = String::new();
        let mut reader = BufReader::new(File::open(path)?);
        reader.read_to_string(&mut content)?;
        Ok(content)
    }

    #[cfg(feature = "flate2")]
    fn read_gzip(path: &Path) -> Result<String, Error> {
        let mut content = String::new();
        let mut reader = BufReader::new(GzDecoder::new(File::open(path)?));
        reader.read_to_string(&mut content)?;
        Ok(content)
    }
}

impl DataSource for LocalDirectory {
    fn fetch(&self, key: &str) -> Result<String, Error> {
        let plain_key = key.strip_suffix(".gz").unwrap_or(key);

        let plain = self.path.join(plain_key);
        if plain.is_file() {
            #[cfg(feature = "log")]
            debug!("reading {}", plain.display());

            return Self::read_plain(&plain);
        }

        #[cfg(feature = "flate2")]
        {
            let compressed = self.path.join(format!("{}.gz", plain_key));
            if compressed.is_file() {
                #[cfg(feature = "log")]
                debug!("decompressing {}", compressed.display());

                return Self::read_gzip(&compressed);
            }
        }

        Err(Error::NoData(key.to_string()))
    }
}
