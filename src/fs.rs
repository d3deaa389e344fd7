//! Loading and saving data files.

use std::{fs, path::Path};

use log::debug;
use num_traits::Float;

use crate::{PointStore, Result};

/// Reads a data file into a new store.
///
/// An unreadable file is reported as [`DatasetError::Io`](crate::DatasetError::Io);
/// no store is built in that case, so an existing one is never disturbed.
///
/// # Arguments
///
/// * `path` - The data file
///
/// # Returns
///
/// * `Result<PointStore<T>>` - The loaded, unmodified store
pub fn load_file<T, P>(path: P) -> Result<PointStore<T>>
where
    T: Float + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let store = PointStore::from_text(&text)?;
    debug!("loaded {} points from {}", store.len(), path.display());
    Ok(store)
}

impl<T> PointStore<T>
where
    T: Float + Default,
{
    /// Replaces the content with the points of a data file; see [`load_file`].
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self> {
        *self = load_file(path)?;
        Ok(self)
    }

    /// Writes the store to a data file and marks it persisted.
    ///
    /// # Arguments
    ///
    /// * `path` - The data file, created or truncated
    ///
    /// # Returns
    ///
    /// * `Result<&mut Self>` - The store, or [`DatasetError::Io`](crate::DatasetError::Io)
    pub fn save_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self> {
        let path = path.as_ref();
        fs::write(path, self.to_text())?;
        debug!("saved {} points to {}", self.len(), path.display());
        Ok(self.mark_persisted())
    }
}

#[cfg(test)]
mod tests {
    use super::load_file;
    use crate::{DatasetError, PointStore};
    use std::{env, fs, process};

    #[test]
    fn test_save_then_load() {
        let path = env::temp_dir().join(std::format!("regres-save-{}.dat", process::id()));

        let mut store = PointStore::new();
        store.append(1.0, 2.0, 0.5).unwrap().append(3.0, 4.0, 0.0).unwrap();
        assert!(store.is_modified());

        store.save_file(&path).unwrap();
        assert!(!store.is_modified());

        let loaded: PointStore<f64> = load_file(&path).unwrap();
        assert_eq!(loaded.as_slice(), store.as_slice());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_leaves_store_untouched() {
        let path = env::temp_dir().join(std::format!("regres-missing-{}.dat", process::id()));

        let mut store = PointStore::new();
        store.append(1.0, 1.0, 0.0).unwrap();

        let err = store.load_file(&path).unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
        assert_eq!(store.len(), 1);
        assert!(store.is_modified());
    }
}
