//! JSON document adapter for the user store.
//!
//! The whole collection lives in one UTF-8 file holding a top-level JSON
//! array, pretty-printed with two-space indentation. File access goes
//! through a `cap_std` directory handle opened on the file's parent, and runs
//! on Tokio's blocking pool.
//!
//! Entries are decoded one at a time. An entry that is not a user record is
//! skipped with a warning and marks the load degraded, so the records around
//! it stay readable and the document is never rewritten without it.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tracing::{debug, warn};

use crate::domain::UserRecord;
use crate::domain::ports::{LoadedUsers, UserStore, UserStoreError};

/// Decode a stored document into records.
///
/// Fails only when the document is not a JSON array. Entries that do not
/// match the record shape are skipped and yield a degraded result.
pub fn decode_users(document: &str) -> Result<LoadedUsers, serde_json::Error> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(document)?;
    let mut users = Vec::with_capacity(entries.len());
    let mut skipped = 0_usize;
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<UserRecord>(entry) {
            Ok(user) => users.push(user),
            Err(error) => {
                warn!(index, %error, "skipping stored entry that is not a user record");
                skipped += 1;
            }
        }
    }
    Ok(if skipped == 0 {
        LoadedUsers::from_users(users)
    } else {
        LoadedUsers::partial(users)
    })
}

/// Encode records in the stored document format.
pub fn encode_users(users: &[UserRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(users)
}

/// [`UserStore`] backed by a single JSON file.
///
/// # Examples
/// ```
/// use backend::outbound::JsonFileUserStore;
///
/// let store = JsonFileUserStore::new("data/users.json").expect("valid path");
/// assert!(store.path().ends_with("users.json"));
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileUserStore {
    directory: PathBuf,
    file_name: PathBuf,
}

impl JsonFileUserStore {
    /// Point the store at `path`.
    ///
    /// The file need not exist yet; its parent directory is created on the
    /// first successful save.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, UserStoreError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .ok_or_else(|| UserStoreError::InvalidPath {
                path: path.display().to_string(),
            })?;
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Self {
            directory,
            file_name: PathBuf::from(file_name),
        })
    }

    /// Full path of the backing file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    fn read_document(&self) -> io::Result<String> {
        let directory = Dir::open_ambient_dir(&self.directory, ambient_authority())?;
        directory.read_to_string(&self.file_name)
    }

    fn write_document(&self, document: &str) -> io::Result<()> {
        Dir::create_ambient_dir_all(&self.directory, ambient_authority())?;
        let directory = Dir::open_ambient_dir(&self.directory, ambient_authority())?;
        directory.write(&self.file_name, document)
    }
}

#[async_trait]
impl UserStore for JsonFileUserStore {
    async fn load(&self) -> LoadedUsers {
        let store = self.clone();
        let read = tokio::task::spawn_blocking(move || store.read_document()).await;
        let path = self.path();
        match read {
            Ok(Ok(document)) => match decode_users(&document) {
                Ok(loaded) => {
                    debug!(
                        path = %path.display(),
                        count = loaded.users().len(),
                        degraded = loaded.is_degraded(),
                        "loaded users"
                    );
                    loaded
                }
                Err(error) => {
                    warn!(path = %path.display(), %error, "user file is not a JSON array");
                    LoadedUsers::degraded()
                }
            },
            Ok(Err(error)) if error.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "user file does not exist yet");
                LoadedUsers::default()
            }
            Ok(Err(error)) => {
                warn!(path = %path.display(), %error, "failed to read user file");
                LoadedUsers::degraded()
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "user file read task failed");
                LoadedUsers::degraded()
            }
        }
    }

    async fn save(&self, users: &[UserRecord]) -> Result<(), UserStoreError> {
        let document = encode_users(users).map_err(|error| UserStoreError::Serialize {
            message: error.to_string(),
        })?;
        let store = self.clone();
        let path = self.path().display().to_string();
        tokio::task::spawn_blocking(move || store.write_document(&document))
            .await
            .map_err(|error| UserStoreError::write(path.clone(), error))?
            .map_err(|error| UserStoreError::write(path.clone(), error))?;
        debug!(path = %path, count = users.len(), "saved users");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    const SINGLE_USER_DOCUMENT: &str = r#"[
  {
    "id": 1,
    "firstName": "A",
    "lastName": "B",
    "username": "ab",
    "email": "ab@x.com"
  }
]"#;

    #[fixture]
    fn temp_dir() -> TempDir {
        tempfile::tempdir().expect("temp dir")
    }

    fn open(dir: &TempDir) -> Dir {
        Dir::open_ambient_dir(dir.path(), ambient_authority()).expect("open temp dir")
    }

    fn store_in(dir: &TempDir) -> JsonFileUserStore {
        JsonFileUserStore::new(dir.path().join("users.json")).expect("store path")
    }

    #[rstest]
    #[case("users.json", ".")]
    #[case("data/users.json", "data")]
    fn new_splits_directory_and_file(#[case] path: &str, #[case] directory: &str) {
        let store = JsonFileUserStore::new(path).expect("valid path");
        assert_eq!(store.path(), Path::new(directory).join("users.json"));
    }

    #[rstest]
    fn new_rejects_paths_without_file_name() {
        let err = JsonFileUserStore::new("data/..").expect_err("no file name");
        assert!(matches!(err, UserStoreError::InvalidPath { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn load_reads_records_in_order(temp_dir: TempDir) {
        open(&temp_dir)
            .write(
                "users.json",
                r#"[{"id":2,"username":"cd","email":"c@d.com"},{"id":1,"username":"ab","email":"ab@x.com"}]"#,
            )
            .expect("seed file");

        let loaded = store_in(&temp_dir).load().await;
        assert!(!loaded.is_degraded());
        let usernames: Vec<_> = loaded.users().iter().map(UserRecord::username).collect();
        assert_eq!(usernames, vec!["cd", "ab"]);
    }

    #[rstest]
    #[tokio::test]
    async fn load_of_missing_file_is_empty_and_writable(temp_dir: TempDir) {
        let loaded = store_in(&temp_dir).load().await;
        assert!(!loaded.is_degraded());
        assert!(loaded.users().is_empty());
    }

    #[rstest]
    #[case::not_json("not json")]
    #[case::empty("")]
    #[case::object(r#"{"id":1}"#)]
    #[case::missing_email(r#"[{"id":1,"username":"ab"}]"#)]
    #[tokio::test]
    async fn load_degrades_on_invalid_document(temp_dir: TempDir, #[case] document: &str) {
        open(&temp_dir).write("users.json", document).expect("seed file");
        let loaded = store_in(&temp_dir).load().await;
        assert!(loaded.is_degraded());
        assert!(loaded.users().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn load_degrades_when_path_is_a_directory(temp_dir: TempDir) {
        open(&temp_dir).create_dir("users.json").expect("blocking dir");
        assert!(store_in(&temp_dir).load().await.is_degraded());
    }

    #[rstest]
    #[tokio::test]
    async fn load_keeps_records_around_a_malformed_entry(temp_dir: TempDir) {
        open(&temp_dir)
            .write(
                "users.json",
                r#"[{"id":1,"username":"ab","email":"ab@x.com"},{"id":"two","username":"cd","email":"c@d.com"},{"id":3,"username":"ef","email":"e@f.com"}]"#,
            )
            .expect("seed file");

        let loaded = store_in(&temp_dir).load().await;
        assert!(loaded.is_degraded());
        let usernames: Vec<_> = loaded.users().iter().map(UserRecord::username).collect();
        assert_eq!(usernames, vec!["ab", "ef"]);
    }

    #[rstest]
    #[tokio::test]
    async fn load_accepts_records_without_id(temp_dir: TempDir) {
        open(&temp_dir)
            .write(
                "users.json",
                r#"[{"id":1,"username":"ab","email":"ab@x.com"},{"username":"old","email":"o@x.com"}]"#,
            )
            .expect("seed file");

        let loaded = store_in(&temp_dir).load().await;
        assert!(!loaded.is_degraded());
        assert_eq!(loaded.users().len(), 2);
        assert!(loaded.users().iter().any(|user| user.id().is_none()));
    }

    #[rstest]
    #[tokio::test]
    async fn load_of_empty_array_is_not_degraded(temp_dir: TempDir) {
        open(&temp_dir).write("users.json", "[]").expect("seed file");
        let loaded = store_in(&temp_dir).load().await;
        assert!(!loaded.is_degraded());
        assert!(loaded.users().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn save_writes_two_space_pretty_json(temp_dir: TempDir) {
        let store = store_in(&temp_dir);
        store
            .save(&[UserRecord::new(1, "ab", "ab@x.com").with_names("A", "B")])
            .await
            .expect("save");

        let written = open(&temp_dir)
            .read_to_string("users.json")
            .expect("read back");
        assert_eq!(written, SINGLE_USER_DOCUMENT);
    }

    #[rstest]
    #[tokio::test]
    async fn save_of_load_is_idempotent(temp_dir: TempDir) {
        let dir = open(&temp_dir);
        dir.write("users.json", SINGLE_USER_DOCUMENT)
            .expect("seed file");
        let store = store_in(&temp_dir);

        let loaded = store.load().await;
        store.save(loaded.users()).await.expect("save");

        let written = dir.read_to_string("users.json").expect("read back");
        assert_eq!(written, SINGLE_USER_DOCUMENT);
        assert_eq!(store.load().await, loaded);
    }

    #[rstest]
    #[tokio::test]
    async fn save_creates_missing_parent_directory(temp_dir: TempDir) {
        let path = temp_dir.path().join("nested").join("users.json");
        let store = JsonFileUserStore::new(&path).expect("store path");

        store
            .save(&[UserRecord::new(1, "ab", "ab@x.com")])
            .await
            .expect("save");
        assert!(open(&temp_dir).exists("nested/users.json"));
    }

    #[rstest]
    #[tokio::test]
    async fn save_reports_write_failure(temp_dir: TempDir) {
        // A directory occupying the file name makes the write fail.
        open(&temp_dir)
            .create_dir("users.json")
            .expect("blocking dir");
        let store = store_in(&temp_dir);

        let err = store
            .save(&[UserRecord::new(1, "ab", "ab@x.com")])
            .await
            .expect_err("write should fail");
        assert!(matches!(err, UserStoreError::Write { .. }));
    }

    #[rstest]
    fn encode_of_empty_collection_is_empty_array() {
        assert_eq!(encode_users(&[]).expect("encode"), "[]");
    }
}
