//! 目录树浏览与编辑的 HTTP 服务。

pub mod api;
pub mod config;
