#![allow(dead_code)]

use std::collections::HashSet;
use std::fs;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::{Path, PathBuf};

use content_ops::{EntryDescriptor, StaticIdentities};
use tempfile::TempDir;

pub const OWNER: &str = "appuser";

/// Fixture tree:
///
/// ```text
/// root
///  |- dir_a            (700, empty)
///  |- dir_b            (755)
///  |   |- file_b       ("Original text.")
///  |- .dir_hidden      (700)
///  |   |- file_c       (600, empty)
///  |- dir_private      (000)
///  |- file_a           (640, empty)
///  |- .file_hidden     (600, "Hello World!")
/// ```
pub struct Tree {
    root: TempDir,
}

impl Tree {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp root");
        let base = root.path();

        make_dir(&base.join("dir_a"), 0o700);
        make_dir(&base.join("dir_b"), 0o755);
        make_file(&base.join("dir_b/file_b"), "Original text.", 0o644);
        make_dir(&base.join(".dir_hidden"), 0o700);
        make_file(&base.join(".dir_hidden/file_c"), "", 0o600);
        make_dir(&base.join("dir_private"), 0o000);
        make_file(&base.join("file_a"), "", 0o640);
        make_file(&base.join(".file_hidden"), "Hello World!", 0o600);

        Self { root }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn identities(&self) -> StaticIdentities {
        let uid = fs::metadata(self.root()).expect("stat root").uid();
        StaticIdentities::new().with_user(uid, OWNER)
    }
}

impl Drop for Tree {
    fn drop(&mut self) {
        // TempDir 无法清理不可读的目录。
        let _ = fs::set_permissions(
            self.root.path().join("dir_private"),
            fs::Permissions::from_mode(0o700),
        );
    }
}

pub fn make_dir(path: &Path, mode: u32) {
    fs::create_dir(path).expect("create fixture dir");
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).expect("chmod fixture dir");
}

pub fn make_file(path: &Path, content: &str, mode: u32) {
    fs::write(path, content).expect("write fixture file");
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).expect("chmod fixture file");
}

pub fn entry(name: &str, size: u64, permissions: &str) -> EntryDescriptor {
    EntryDescriptor {
        name: name.to_string(),
        size,
        owner: OWNER.to_string(),
        permissions: permissions.to_string(),
    }
}

pub fn as_set(entries: Vec<EntryDescriptor>) -> HashSet<EntryDescriptor> {
    entries.into_iter().collect()
}

pub fn names(dir: &Path) -> HashSet<String> {
    fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| {
            entry
                .expect("dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

pub fn running_as_root() -> bool {
    // SAFETY: geteuid has no preconditions.
    unsafe { libc::geteuid() == 0 }
}
