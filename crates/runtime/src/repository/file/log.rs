//! Append-only log file repository.
//!
//! `FileRepository<T>` stores any serializable type in an append-only log.
//! The battle event log is `FileRepository<BattleEvent>`.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::events::BattleEvent;
use crate::repository::{EventSink, RepositoryError, Result};

/// Size of the little-endian `u32` length prefix in front of every entry.
const LENGTH_PREFIX: u64 = 4;

/// Binary log of battle events.
pub type FileEventLog = FileRepository<BattleEvent>;

/// Generic file-based repository for append-only logs.
///
/// Stores items of type `T` in a file using the format:
/// ```text
/// [u32 length][bincode serialized T]
/// [u32 length][bincode serialized T]
/// ...
/// ```
pub struct FileRepository<T> {
    /// Filename without the directory
    name: String,
    path: PathBuf,
    writer: BufWriter<File>,
    /// Byte offset of the next write
    current_offset: u64,
    _phantom: PhantomData<T>,
}

impl<T> FileRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a new log file.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::LogAlreadyExists`] if the file is already
    /// there, so a finished battle log is never overwritten.
    pub fn create(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let filename = filename.as_ref();

        std::fs::create_dir_all(base_dir)?;

        let path = base_dir.join(filename);
        if path.exists() {
            return Err(RepositoryError::LogAlreadyExists(
                path.display().to_string(),
            ));
        }

        let file = OpenOptions::new().create_new(true).write(true).open(&path)?;

        tracing::debug!("Created event log: {}", path.display());

        Ok(Self {
            name: filename.to_string(),
            path,
            writer: BufWriter::new(file),
            current_offset: 0,
            _phantom: PhantomData,
        })
    }

    /// Open an existing log for appending.
    pub fn open(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let filename = filename.as_ref();
        let path = base_dir.as_ref().join(filename);

        let file = OpenOptions::new().append(true).open(&path)?;
        Self::from_file(filename, path, file)
    }

    /// Open a log for appending, creating the directory and file if needed.
    pub fn open_or_create(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        std::fs::create_dir_all(base_dir)?;

        let filename = filename.as_ref();
        let path = base_dir.join(filename);

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Self::from_file(filename, path, file)
    }

    fn from_file(filename: &str, path: PathBuf, file: File) -> Result<Self> {
        let current_offset = file.metadata()?.len();

        tracing::debug!(
            "Opened event log: {} at offset {}",
            path.display(),
            current_offset
        );

        Ok(Self {
            name: filename.to_string(),
            path,
            writer: BufWriter::new(file),
            current_offset,
            _phantom: PhantomData,
        })
    }

    /// Append an item to the log.
    ///
    /// Returns the byte offset where the item was written.
    pub fn append(&mut self, item: &T) -> Result<u64> {
        let offset = self.current_offset;

        let bytes =
            bincode::serialize(item).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        let len = u32::try_from(bytes.len())
            .map_err(|_| RepositoryError::Serialization("entry exceeds 4 GiB".to_string()))?;

        self.writer.write_all(&len.to_le_bytes())?;
        self.writer.write_all(&bytes)?;

        self.current_offset += LENGTH_PREFIX + bytes.len() as u64;

        Ok(offset)
    }

    /// Read an item at a specific byte offset.
    ///
    /// Returns `None` past the end of the file, otherwise the item and the
    /// offset of the entry after it. Unflushed appends are not visible.
    pub fn read_at_offset(&self, byte_offset: u64) -> Result<Option<(T, u64)>> {
        // Separate handle, the writer keeps its position
        let file = File::open(&self.path)?;
        let file_size = file.metadata()?.len();

        if byte_offset >= file_size {
            return Ok(None);
        }

        let mut reader = BufReader::new(file);
        reader.seek(SeekFrom::Start(byte_offset))?;

        let remaining = file_size - byte_offset;
        if remaining < LENGTH_PREFIX {
            return Err(RepositoryError::PartialWrite {
                offset: byte_offset,
                expected: LENGTH_PREFIX as usize,
                actual: remaining as usize,
            });
        }

        let mut len_bytes = [0u8; 4];
        reader.read_exact(&mut len_bytes)?;
        let len = u32::from_le_bytes(len_bytes) as usize;

        let available = (remaining - LENGTH_PREFIX) as usize;
        if available < len {
            return Err(RepositoryError::PartialWrite {
                offset: byte_offset,
                expected: len,
                actual: available,
            });
        }

        let mut data = vec![0u8; len];
        reader.read_exact(&mut data)?;

        let item = bincode::deserialize(&data)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        Ok(Some((item, byte_offset + LENGTH_PREFIX + len as u64)))
    }

    /// Read every flushed entry from the start of the log.
    pub fn read_all(&self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut offset = 0;
        while let Some((item, next)) = self.read_at_offset(offset)? {
            items.push(item);
            offset = next;
        }
        Ok(items)
    }

    /// Flush buffered writes to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Current size of the log in bytes, buffered writes included.
    pub fn size(&self) -> u64 {
        self.current_offset
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> Drop for FileRepository<T> {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!("Failed to flush event log '{}' on drop: {}", self.name, e);
        }
    }
}

impl EventSink for FileRepository<BattleEvent> {
    fn emit(&mut self, event: &BattleEvent) -> Result<()> {
        self.append(event).map(|_| ())
    }

    fn flush(&mut self) -> Result<()> {
        FileRepository::flush(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestItem {
        id: u64,
        name: String,
    }

    fn item(id: u64, name: &str) -> TestItem {
        TestItem {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_read_at_offset() {
        let temp_dir = TempDir::new().unwrap();
        let mut repo = FileRepository::<TestItem>::create(temp_dir.path(), "test.log").unwrap();

        let offset1 = repo.append(&item(1, "first")).unwrap();
        let offset2 = repo.append(&item(2, "second")).unwrap();
        repo.flush().unwrap();
        assert_eq!(offset1, 0);

        let (read1, next1) = repo.read_at_offset(offset1).unwrap().unwrap();
        let (read2, next2) = repo.read_at_offset(offset2).unwrap().unwrap();

        assert_eq!(read1, item(1, "first"));
        assert_eq!(read2, item(2, "second"));
        assert_eq!(next1, offset2);
        assert_eq!(next2, repo.size());
        assert!(repo.read_at_offset(999_999).unwrap().is_none());
    }

    #[test]
    fn test_create_refuses_existing_log() {
        let temp_dir = TempDir::new().unwrap();
        FileRepository::<TestItem>::create(temp_dir.path(), "test.log").unwrap();
        let err = FileRepository::<TestItem>::create(temp_dir.path(), "test.log");
        assert!(matches!(err, Err(RepositoryError::LogAlreadyExists(_))));
    }

    #[test]
    fn test_open_appends_after_existing_entries() {
        let temp_dir = TempDir::new().unwrap();
        {
            let mut repo =
                FileRepository::<TestItem>::create(temp_dir.path(), "test.log").unwrap();
            repo.append(&item(1, "first")).unwrap();
        }

        let mut repo = FileRepository::<TestItem>::open(temp_dir.path(), "test.log").unwrap();
        let offset = repo.append(&item(2, "second")).unwrap();
        repo.flush().unwrap();

        assert!(offset > 0);
        assert_eq!(
            repo.read_all().unwrap(),
            vec![item(1, "first"), item(2, "second")]
        );
    }

    #[test]
    fn test_truncated_entry_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = {
            let mut repo =
                FileRepository::<TestItem>::create(temp_dir.path(), "test.log").unwrap();
            repo.append(&item(1, "first")).unwrap();
            repo.flush().unwrap();
            repo.path().to_path_buf()
        };

        let full = std::fs::metadata(&path).unwrap().len();
        let file = OpenOptions::new().write(true).open(&path).unwrap();
        file.set_len(full - 2).unwrap();

        let repo = FileRepository::<TestItem>::open_or_create(temp_dir.path(), "test.log").unwrap();
        assert!(matches!(
            repo.read_at_offset(0),
            Err(RepositoryError::PartialWrite { offset: 0, .. })
        ));
    }
}
