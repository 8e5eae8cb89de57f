//! Test utilities for the backend crate.
//!
//! Compiled only with the `test-support` feature, which the crate's own
//! dev-dependency enables for integration tests.

pub mod users_file {
    //! Temporary users document for file-backed tests.
    //!
    //! File access goes through `cap_std::fs::Dir`, as in the store adapter.

    use std::io;
    use std::path::{Path, PathBuf};

    use cap_std::{ambient_authority, fs::Dir};
    use tempfile::TempDir;

    use crate::domain::ports::UserStoreError;
    use crate::outbound::JsonFileUserStore;

    const FILE_NAME: &str = "users.json";

    /// A users document inside its own temporary directory.
    ///
    /// The directory is removed when the value is dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backend::test_support::users_file::UsersFile;
    ///
    /// let file = UsersFile::with_contents("[]")?;
    /// assert_eq!(file.read()?, "[]");
    /// # Ok::<(), std::io::Error>(())
    /// ```
    #[derive(Debug)]
    pub struct UsersFile {
        dir: TempDir,
        path: PathBuf,
    }

    impl UsersFile {
        /// A document that does not exist yet.
        pub fn missing() -> io::Result<Self> {
            let dir = tempfile::tempdir()?;
            let path = dir.path().join(FILE_NAME);
            Ok(Self { dir, path })
        }

        /// A document holding `contents`.
        pub fn with_contents(contents: &str) -> io::Result<Self> {
            let file = Self::missing()?;
            file.write(contents)?;
            Ok(file)
        }

        /// Location of the document.
        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }

        /// Current contents of the document.
        pub fn read(&self) -> io::Result<String> {
            self.directory()?.read_to_string(FILE_NAME)
        }

        /// Replace the contents of the document.
        pub fn write(&self, contents: &str) -> io::Result<()> {
            self.directory()?.write(FILE_NAME, contents)
        }

        /// Put a directory where the document should be so writes fail.
        pub fn block_writes(&self) -> io::Result<()> {
            let directory = self.directory()?;
            match directory.remove_file(FILE_NAME) {
                Ok(()) => {}
                Err(error) if error.kind() == io::ErrorKind::NotFound => {}
                Err(error) => return Err(error),
            }
            directory.create_dir(FILE_NAME)
        }

        /// A store adapter reading and writing this document.
        pub fn store(&self) -> Result<JsonFileUserStore, UserStoreError> {
            JsonFileUserStore::new(&self.path)
        }

        fn directory(&self) -> io::Result<Dir> {
            Dir::open_ambient_dir(self.dir.path(), ambient_authority())
        }
    }
}
