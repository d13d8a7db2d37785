//! 目录列表。

use std::fs;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::Path;

use tracing::info;

use crate::error::{ContentError, Result};
use crate::identity::IdentityResolver;
use crate::types::EntryDescriptor;

/// 列表中目录名的后缀标记。
pub const DIR_MARKER: char = '/';

/// 列出 `dir` 的直接子项，包含隐藏项。
///
/// 属主和权限取自子项自身（不跟随符号链接）；指向目录的符号链接按目录列出。
/// 顺序由文件系统决定。任一子项出错（包括属主无法解析）都会使整个调用失败。
pub fn list(dir: &Path, identities: &dyn IdentityResolver) -> Result<Vec<EntryDescriptor>> {
    info!(path = %dir.display(), "listing directory");

    let entries = fs::read_dir(dir).map_err(|err| ContentError::from_io(dir, err))?;

    let mut descriptors = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| ContentError::from_io(dir, err))?;
        // Unix 上 DirEntry::metadata 不跟随符号链接。
        let metadata = entry.metadata()?;
        let is_dir = if metadata.file_type().is_symlink() {
            // 悬空链接按普通文件处理。
            fs::metadata(entry.path()).is_ok_and(|target| target.is_dir())
        } else {
            metadata.is_dir()
        };

        let mut name = entry.file_name().to_string_lossy().into_owned();
        let size = if is_dir {
            name.push(DIR_MARKER);
            0
        } else {
            metadata.len()
        };

        descriptors.push(EntryDescriptor {
            name,
            size,
            owner: identities.user_name(metadata.uid())?,
            permissions: permission_string(metadata.permissions().mode()),
        });
    }

    Ok(descriptors)
}

/// 把 `mode` 的低 9 位格式化为三位八进制（补零），丢弃 setuid/setgid/sticky 位。
pub fn permission_string(mode: u32) -> String {
    format!("{:03o}", mode & 0o777)
}

#[cfg(test)]
mod tests {
    use super::permission_string;

    #[test]
    fn permission_string_formats() {
        assert_eq!(permission_string(0o100640), "640");
        assert_eq!(permission_string(0o040755), "755");
        assert_eq!(permission_string(0o040000), "000");
        assert_eq!(permission_string(0o7), "007");
    }

    #[test]
    fn special_bits_are_truncated() {
        assert_eq!(permission_string(0o104755), "755");
        assert_eq!(permission_string(0o041777), "777");
    }
}
