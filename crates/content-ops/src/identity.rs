//! 属主用户名解析。

use std::collections::HashMap;
use std::ffi::CStr;
use std::io;

use crate::error::{ContentError, Result};

/// 把数字用户 ID 映射为用户名。
pub trait IdentityResolver: Send + Sync {
    fn user_name(&self, uid: u32) -> Result<String>;
}

/// 通过系统用户数据库解析用户名。
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemIdentities;

const INITIAL_BUFFER: usize = 1024;
const MAX_BUFFER: usize = 1 << 20;

impl IdentityResolver for SystemIdentities {
    fn user_name(&self, uid: u32) -> Result<String> {
        // SAFETY: sysconf has no preconditions.
        let suggested = unsafe { libc::sysconf(libc::_SC_GETPW_R_SIZE_MAX) };
        let mut buf_len = usize::try_from(suggested)
            .ok()
            .filter(|len| *len > 0)
            .unwrap_or(INITIAL_BUFFER);

        loop {
            let mut buf: Vec<libc::c_char> = vec![0; buf_len];
            // SAFETY: passwd is plain old data; getpwuid_r fills it in.
            let mut passwd: libc::passwd = unsafe { std::mem::zeroed() };
            let mut found: *mut libc::passwd = std::ptr::null_mut();

            // SAFETY: every pointer refers to a live local and buf.len() is the
            // true capacity of buf.
            let rc = unsafe {
                libc::getpwuid_r(
                    libc::uid_t::from(uid),
                    &mut passwd,
                    buf.as_mut_ptr(),
                    buf.len(),
                    &mut found,
                )
            };

            if rc == libc::ERANGE && buf_len < MAX_BUFFER {
                buf_len *= 2;
                continue;
            }
            if rc != 0 {
                return Err(ContentError::Io(io::Error::from_raw_os_error(rc)));
            }
            if found.is_null() || passwd.pw_name.is_null() {
                return Err(ContentError::OwnerLookup { uid });
            }

            // SAFETY: on success pw_name points at a NUL-terminated string
            // inside buf, which is still alive here.
            let name = unsafe { CStr::from_ptr(passwd.pw_name) };
            return Ok(name.to_string_lossy().into_owned());
        }
    }
}

/// 固定的 uid 到用户名映射表。
#[derive(Debug, Clone, Default)]
pub struct StaticIdentities {
    users: HashMap<u32, String>,
}

impl StaticIdentities {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_user(mut self, uid: u32, name: impl Into<String>) -> Self {
        self.users.insert(uid, name.into());
        self
    }
}

impl FromIterator<(u32, String)> for StaticIdentities {
    fn from_iter<T: IntoIterator<Item = (u32, String)>>(iter: T) -> Self {
        Self {
            users: iter.into_iter().collect(),
        }
    }
}

impl IdentityResolver for StaticIdentities {
    fn user_name(&self, uid: u32) -> Result<String> {
        self.users
            .get(&uid)
            .cloned()
            .ok_or(ContentError::OwnerLookup { uid })
    }
}

#[cfg(test)]
mod tests {
    use super::{IdentityResolver, StaticIdentities, SystemIdentities};
    use crate::ContentError;

    #[test]
    fn system_resolves_root() {
        let name = SystemIdentities.user_name(0).expect("uid 0 should resolve");

        assert_eq!(name, "root");
    }

    #[test]
    fn static_table_lookup() {
        let identities = StaticIdentities::new().with_user(1000, "appuser");

        assert_eq!(identities.user_name(1000).expect("known uid"), "appuser");
        assert!(matches!(
            identities.user_name(1001),
            Err(ContentError::OwnerLookup { uid: 1001 })
        ));
    }
}
