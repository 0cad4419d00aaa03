//! Streams inputs through a single reusable hash context

use crate::progress::FileProgress;
use anyhow::{Context, Result};
use log::debug;
use rhash_core::{AlgorithmSet, Digest, HashContext, HasherOptions, PrintFlags};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Where input bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// `-` selects standard input
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == "-" {
            Input::Stdin
        } else {
            Input::File(arg.to_path_buf())
        }
    }

    /// Name used in `dn=` of magnet links
    ///
    /// Names that are not valid UTF-8 are rejected rather than replaced, so a
    /// link never names a different file.
    pub fn file_name(&self) -> Result<Option<&str>> {
        let Input::File(path) = self else {
            return Ok(None);
        };
        path.file_name()
            .map(|name| {
                name.to_str().ok_or_else(|| {
                    anyhow::anyhow!("File name of {} is not valid UTF-8", path.display())
                })
            })
            .transpose()
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Stdin => f.write_str("-"),
            Input::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Digests of one input
#[derive(Debug, Clone)]
pub struct HashedInput {
    pub input: Input,
    pub size: u64,
    pub digests: Vec<Digest>,
}

pub struct FileHasher {
    context: HashContext,
    chunk_size: usize,
    progress_enabled: bool,
}

impl FileHasher {
    pub fn new(
        algorithms: AlgorithmSet,
        options: HasherOptions,
        chunk_size: usize,
        progress_enabled: bool,
    ) -> Result<Self> {
        let context = HashContext::with_options(algorithms, options)
            .context("Failed to create hash context")?;
        Ok(Self {
            context,
            chunk_size,
            progress_enabled,
        })
    }

    /// Hash one input, leaving the context finalized until the next call
    pub fn hash(&mut self, input: &Input) -> Result<HashedInput> {
        self.context.reset();
        debug!("Hashing {input}");

        let size = match input {
            Input::Stdin => {
                let stdin = io::stdin();
                let progress = FileProgress::hidden();
                self.consume(stdin.lock(), &progress)?
            }
            Input::File(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open {}", path.display()))?;
                let total = file.metadata().ok().map(|metadata| metadata.len());
                let progress = FileProgress::new(
                    &input.to_string(),
                    total,
                    self.chunk_size,
                    self.progress_enabled,
                );
                let size = self
                    .consume(file, &progress)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                progress.finish();
                size
            }
        };

        let digests = self.context.finalize().to_vec();
        debug!("Hashed {size} bytes from {input}");
        Ok(HashedInput {
            input: input.clone(),
            size,
            digests,
        })
    }

    /// Magnet link for the most recently hashed input
    pub fn magnet(&self, input: &Input, flags: PrintFlags) -> Result<String> {
        let name = input.file_name()?;
        self.context
            .print_magnet(name, AlgorithmSet::EMPTY, flags)
            .context("Failed to build magnet link")
    }

    fn consume<R: Read>(&mut self, mut reader: R, progress: &FileProgress) -> Result<u64> {
        let mut buffer = vec![0u8; self.chunk_size];
        loop {
            let read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(read) => read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            self.context.update(&buffer[..read])?;
            progress.advance(read as u64);
        }
        Ok(self.context.message_length())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhash_core::HashAlgorithm;
    use std::fs;
    use tempfile::TempDir;

    fn hasher(algorithms: AlgorithmSet) -> FileHasher {
        FileHasher::new(algorithms, HasherOptions::default(), 1024, false).unwrap()
    }

    #[test]
    fn test_input_from_arg() {
        assert_eq!(Input::from_arg(Path::new("-")), Input::Stdin);
        assert_eq!(
            Input::from_arg(Path::new("a.txt")),
            Input::File(PathBuf::from("a.txt"))
        );
        assert_eq!(Input::Stdin.file_name().unwrap(), None);
        assert_eq!(
            Input::File(PathBuf::from("dir/b c.iso")).file_name().unwrap(),
            Some("b c.iso")
        );
    }

    #[test]
    fn test_hash_file_across_chunks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.bin");
        let data: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
        fs::write(&path, &data).unwrap();

        let mut hasher = hasher(HashAlgorithm::MD5 | HashAlgorithm::SHA1);
        let result = hasher.hash(&Input::File(path)).unwrap();

        assert_eq!(result.size, 5000);
        let expected = rhash_core::msg(HashAlgorithm::SHA1, &data, 0, data.len()).unwrap();
        assert_eq!(result.digests[1], expected);
    }

    #[test]
    fn test_context_is_reset_between_files() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        fs::write(&first, b"hello").unwrap();
        fs::write(&second, b"abc").unwrap();

        let mut hasher = hasher(HashAlgorithm::MD5.into());
        hasher.hash(&Input::File(first)).unwrap();
        let result = hasher.hash(&Input::File(second)).unwrap();

        assert_eq!(result.size, 3);
        assert_eq!(
            result.digests[0].to_text(PrintFlags::DEFAULT),
            "900150983cd24fb0d6963f7d28e17f72"
        );
    }

    #[test]
    fn test_magnet_uses_file_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a b.txt");
        fs::write(&path, b"abc").unwrap();

        let mut hasher = hasher(HashAlgorithm::MD5.into());
        let input = Input::File(path);
        hasher.hash(&input).unwrap();
        let magnet = hasher.magnet(&input, PrintFlags::FILESIZE).unwrap();

        assert_eq!(
            magnet,
            "magnet:?xl=3&dn=a%20b.txt&xt=urn:md5:900150983cd24fb0d6963f7d28e17f72"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_file_name_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let input = Input::File(PathBuf::from(OsStr::from_bytes(b"dir/caf\xe9.bin")));
        let err = input.file_name().unwrap_err();
        assert!(err.to_string().contains("not valid UTF-8"));

        let mut hasher = hasher(HashAlgorithm::MD5.into());
        hasher.context.update(b"abc").unwrap();
        hasher.context.finalize();
        assert!(hasher.magnet(&input, PrintFlags::FILESIZE).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut hasher = hasher(HashAlgorithm::CRC32.into());
        let err = hasher
            .hash(&Input::File(PathBuf::from("/nonexistent/rhash/input")))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
    }
}
