//! 文件与目录创建。

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::path::{parent_of, resolve_parent};
use crate::types::{CreateRequest, OperationResult};

/// 在 `path` 处创建目录或文件。
///
/// `path` 已存在（包括符号链接）或缺少 `make_dir` 时不做任何修改。
/// 父目录不存在属于错误。写入初始内容失败时会删除新建的文件。
pub fn create(path: &Path, request: &CreateRequest) -> Result<OperationResult> {
    if fs::symlink_metadata(path).is_ok() {
        debug!(path = %path.display(), "create target already exists");
        return Ok(OperationResult::unchanged(resolve_parent(path)));
    }

    let Some(make_dir) = request.make_dir else {
        debug!(path = %path.display(), "create request has no make_dir flag");
        return Ok(OperationResult::unchanged(path));
    };

    if make_dir {
        fs::create_dir(path)?;
        info!(path = %path.display(), "created directory");
        return Ok(OperationResult::applied(path));
    }

    let text = request.text.as_deref().unwrap_or_default();
    create_file(path, text.as_bytes(), |file, bytes| file.write_all(bytes))?;
    info!(path = %path.display(), bytes = text.len(), "created file");

    Ok(OperationResult::applied(parent_of(path)))
}

/// 以 create-new 方式新建文件并交给 `write` 写入；写入失败时删除该文件。
pub(crate) fn create_file<W>(path: &Path, bytes: &[u8], write: W) -> io::Result<()>
where
    W: FnOnce(&mut fs::File, &[u8]) -> io::Result<()>,
{
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    if let Err(err) = write(&mut file, bytes) {
        drop(file);
        if let Err(cleanup) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %cleanup, "failed to remove partially written file");
        }
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::create_file;

    #[test]
    fn failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("broken.txt");

        let err = create_file(&path, b"payload", |_, _| Err(io::Error::other("disk full")))
            .expect_err("write should fail");

        assert_eq!(err.to_string(), "disk full");
        assert!(!path.exists());
    }

    #[test]
    fn successful_write_keeps_content() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("ok.txt");

        create_file(&path, b"payload", |file, bytes| {
            io::Write::write_all(file, bytes)
        })
        .expect("write should succeed");

        assert_eq!(std::fs::read(&path).expect("read file"), b"payload");
    }
}
