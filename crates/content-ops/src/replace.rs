//! 内容替换：用根目录下另一个路径的内容覆盖目标。

use std::fs::{self, File, OpenOptions};
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::Result;
use crate::path::{parent_of, resolve_parent};
use crate::types::{OperationResult, ReplaceRequest};

/// 用请求中源路径的内容替换 `dst`。
///
/// 目录整体替换为源目录树的递归拷贝；文件只覆盖字节，保留自身的属主和权限。
/// 类型不一致、路径不存在、源与目标为同一对象或互相嵌套时不做任何修改。
///
/// 目录分支先删除 `dst` 再拷贝，并非原子操作：拷贝中途出错会留下不完整的目录树。
pub fn replace(dst: &Path, request: &ReplaceRequest, root_dir: &Path) -> Result<OperationResult> {
    if !dst.exists() {
        debug!(path = %dst.display(), "replace target does not exist");
        return Ok(OperationResult::unchanged(dst));
    }

    let Some(src) = request.resolve(root_dir) else {
        debug!(path = %dst.display(), "replace request has no src_path");
        return Ok(OperationResult::unchanged(resolve_parent(dst)));
    };

    if !src.exists() || same_entry(&src, dst)? {
        debug!(path = %dst.display(), src = %src.display(), "replace source missing or identical");
        return Ok(OperationResult::unchanged(resolve_parent(dst)));
    }

    match (dst.is_dir(), src.is_dir()) {
        (true, true) => {
            if nested(&src, dst)? {
                debug!(path = %dst.display(), src = %src.display(), "replace source and target are nested");
                return Ok(OperationResult::unchanged(dst));
            }
            fs::remove_dir_all(dst)?;
            copy_tree(&src, dst)?;
            info!(path = %dst.display(), src = %src.display(), "replaced directory");
            Ok(OperationResult::applied(dst))
        }
        (false, false) => {
            overwrite_contents(&src, dst)?;
            info!(path = %dst.display(), src = %src.display(), "replaced file contents");
            Ok(OperationResult::applied(parent_of(dst)))
        }
        _ => {
            debug!(path = %dst.display(), src = %src.display(), "replace between a file and a directory");
            Ok(OperationResult::unchanged(resolve_parent(dst)))
        }
    }
}

/// 两个路径（跟随符号链接后）是否指向同一个 inode，覆盖 `..`、符号链接和硬链接等别名。
fn same_entry(a: &Path, b: &Path) -> io::Result<bool> {
    let (a, b) = (fs::metadata(a)?, fs::metadata(b)?);
    Ok(a.dev() == b.dev() && a.ino() == b.ino())
}

/// 规范化后任一目录是否位于另一目录之内。
fn nested(a: &Path, b: &Path) -> io::Result<bool> {
    let (a, b) = (fs::canonicalize(a)?, fs::canonicalize(b)?);
    Ok(a.starts_with(&b) || b.starts_with(&a))
}

/// 原地把 `src` 的字节写入 `dst`，`dst` 保留自身的 inode、属主和权限。
fn overwrite_contents(src: &Path, dst: &Path) -> io::Result<u64> {
    let mut reader = File::open(src)?;
    let mut writer = OpenOptions::new().write(true).truncate(true).open(dst)?;
    io::copy(&mut reader, &mut writer)
}

/// 在 `dst`（必须尚不存在）处重建以 `src` 为根的目录树。
/// `src` 内的符号链接会被跟随，拷贝其目标内容。
fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    let mut dirs = Vec::new();

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src).map_err(io::Error::other)?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir(&target)?;
            dirs.push((target, entry.metadata()?.permissions()));
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }

    // 由深到浅设置权限，只读目录在其子项写完后再封口。
    for (dir, permissions) in dirs.into_iter().rev() {
        fs::set_permissions(dir, permissions)?;
    }

    Ok(())
}
