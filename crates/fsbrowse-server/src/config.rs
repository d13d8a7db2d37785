use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use serde::Deserialize;
type Result<T> = anyhow::Result<T>;

/// 服务器命令行参数。
#[derive(Debug, Parser)]
#[command(name = "fsbrowse-server", about = "Browse, create, modify and delete files over HTTP")]
pub struct Cli {
    /// Root directory to browse.
    #[arg(long)]
    pub root_dir: Option<PathBuf>,

    /// Address to listen on.
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Optional TOML config file; command line values take precedence.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// TOML 配置文件内容，所有字段均可省略。
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub root_dir: Option<PathBuf>,
    pub bind: Option<SocketAddr>,
}

impl ConfigFile {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to deserialize server config")
    }
}

/// 合并后的最终配置，启动后只读。
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub root_dir: PathBuf,
    pub bind: SocketAddr,
}

impl ServerConfig {
    /// 合并可选的配置文件与命令行参数，命令行优先。
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => ConfigFile::from_file(path)?,
            None => ConfigFile::default(),
        };

        let Some(root_dir) = cli.root_dir.clone().or(file.root_dir) else {
            bail!("root_dir must be given with --root-dir or in the config file");
        };

        Ok(Self {
            root_dir,
            bind: cli.bind.or(file.bind).unwrap_or_else(default_bind),
        })
    }

    /// 检查根目录存在且为目录。
    pub fn validate(&self) -> Result<()> {
        let metadata = std::fs::metadata(&self.root_dir)
            .with_context(|| format!("root_dir is not accessible: {}", self.root_dir.display()))?;
        if !metadata.is_dir() {
            bail!("root_dir is not a directory: {}", self.root_dir.display());
        }
        Ok(())
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}
