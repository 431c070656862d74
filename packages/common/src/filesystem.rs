use crate::location::Location;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// A writable destination whose contents only become visible on `commit`.
///
/// Dropping a sink without committing discards everything written to it.
pub trait TextSink: Write {
    fn commit(self: Box<Self>) -> io::Result<()>;
}

/// Storage abstraction for reading and writing model documents
pub trait IoProvider {
    /// Open a location for reading
    fn open_for_read(&self, location: &Location) -> io::Result<Box<dyn Read + '_>>;

    /// Open a location for writing
    fn open_for_write(&self, location: &Location) -> io::Result<Box<dyn TextSink + '_>>;

    /// Read a location to the end as UTF-8 text
    fn read_to_string(&self, location: &Location) -> io::Result<String> {
        let mut reader = self.open_for_read(location)?;
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(text)
    }
}

/// Real file system implementation
pub struct LocalFileSystem;

impl IoProvider for LocalFileSystem {
    fn open_for_read(&self, location: &Location) -> io::Result<Box<dyn Read + '_>> {
        let file = File::open(location.path())?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn open_for_write(&self, location: &Location) -> io::Result<Box<dyn TextSink + '_>> {
        Ok(Box::new(AtomicFileSink::create(location.path())?))
    }
}

/// Writes to a sibling temp file and renames it over the target on commit
pub struct AtomicFileSink {
    target: PathBuf,
    temp: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl AtomicFileSink {
    pub fn create(target: &Path) -> io::Result<Self> {
        let file_name = target
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "location has no file name"))?;

        let mut temp_name = std::ffi::OsString::from(".");
        temp_name.push(file_name);
        temp_name.push(".tmp");
        let temp = target.with_file_name(temp_name);

        let file = File::create(&temp)?;
        debug!(temp = %temp.display(), "Opened temp file for atomic write");

        Ok(Self {
            target: target.to_path_buf(),
            temp,
            writer: Some(BufWriter::new(file)),
        })
    }

    fn writer(&mut self) -> io::Result<&mut BufWriter<File>> {
        self.writer
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "sink already committed"))
    }
}

impl Write for AtomicFileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer()?.flush()
    }
}

impl TextSink for AtomicFileSink {
    fn commit(mut self: Box<Self>) -> io::Result<()> {
        if let Some(writer) = self.writer.take() {
            let file = writer.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
        }
        if let Err(e) = fs::rename(&self.temp, &self.target) {
            let _ = fs::remove_file(&self.temp);
            return Err(e);
        }
        debug!(target = %self.target.display(), "Committed atomic write");
        Ok(())
    }
}

impl Drop for AtomicFileSink {
    fn drop(&mut self) {
        // Uncommitted: the writer is still present and the target is untouched
        if self.writer.take().is_some() {
            if let Err(e) = fs::remove_file(&self.temp) {
                warn!(temp = %self.temp.display(), error = %e, "Failed to remove temp file");
            }
        }
    }
}

/// In-memory storage for testing
#[derive(Default)]
pub struct MemoryFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
    read_only: bool,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that refuses every write
    pub fn read_only() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            read_only: true,
        }
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.lock().insert(path.into(), contents.into());
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        self.lock().get(path).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, String>> {
        // A poisoned map is still a valid map
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl IoProvider for MemoryFileSystem {
    fn open_for_read(&self, location: &Location) -> io::Result<Box<dyn Read + '_>> {
        match self.lock().get(location.path()) {
            Some(contents) => Ok(Box::new(Cursor::new(contents.clone().into_bytes()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", location),
            )),
        }
    }

    fn open_for_write(&self, location: &Location) -> io::Result<Box<dyn TextSink + '_>> {
        if self.read_only {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("read-only storage: {}", location),
            ));
        }
        Ok(Box::new(MemorySink {
            fs: self,
            path: location.path().to_path_buf(),
            buffer: Vec::new(),
        }))
    }
}

struct MemorySink<'a> {
    fs: &'a MemoryFileSystem,
    path: PathBuf,
    buffer: Vec<u8>,
}

impl Write for MemorySink<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl TextSink for MemorySink<'_> {
    fn commit(self: Box<Self>) -> io::Result<()> {
        let text = String::from_utf8(self.buffer)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.fs.lock().insert(self.path, text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let fs = MemoryFileSystem::new();
        let location = Location::new("/models/fire.nlogo");

        let mut sink = fs.open_for_write(&location).unwrap();
        sink.write_all(b"to go end\n").unwrap();
        sink.commit().unwrap();

        assert_eq!(fs.read_to_string(&location).unwrap(), "to go end\n");
    }

    #[test]
    fn test_memory_uncommitted_write_is_discarded() {
        let fs = MemoryFileSystem::new();
        let location = Location::new("/models/fire.nlogo");

        {
            let mut sink = fs.open_for_write(&location).unwrap();
            sink.write_all(b"partial").unwrap();
        }

        assert!(fs.contents(location.path()).is_none());
    }

    #[test]
    fn test_memory_missing_file() {
        let fs = MemoryFileSystem::new();
        let err = fs
            .read_to_string(&Location::new("/missing.nlogo"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_read_only_refuses_writes() {
        let fs = MemoryFileSystem::read_only();
        let err = fs
            .open_for_write(&Location::new("/models/fire.nlogo"))
            .err()
            .unwrap();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_atomic_sink_commits() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("fire.nlogo");
        let location = Location::new(&target);

        let mut sink = LocalFileSystem.open_for_write(&location).unwrap();
        sink.write_all(b"globals [ heat ]\n").unwrap();
        assert!(!target.exists());
        sink.commit().unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "globals [ heat ]\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_atomic_sink_drop_keeps_original() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("fire.nlogo");
        fs::write(&target, "original").unwrap();
        let location = Location::new(&target);

        {
            let mut sink = LocalFileSystem.open_for_write(&location).unwrap();
            sink.write_all(b"half-written").unwrap();
        }

        assert_eq!(fs::read_to_string(&target).unwrap(), "original");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
