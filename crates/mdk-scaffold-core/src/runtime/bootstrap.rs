//! Optional external tool bootstrap for non-Windows hosts
//!
//! Downloads the tool's source archive, builds it with `dotnet`, and copies
//! the configured artifacts into the workspace. Skipped entirely when every
//! artifact is already in place.

use crate::config::BootstrapConfig;
use crate::error::{FsOp, Result, ScaffoldError};
use colored::Colorize;
use std::io::{Cursor, Read};
use std::path::{Component, Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;
use url::Url;
use zip::ZipArchive;

/// Timeout for the whole build (10 minutes)
const BUILD_TIMEOUT: Duration = Duration::from_secs(600);

/// Cache directory for the extracted source and build output
pub const CACHE_DIR: &str = ".mdk-bootstrap";

const USER_AGENT: &str = concat!("mdk-scaffold/", env!("CARGO_PKG_VERSION"));

/// What a bootstrap run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    AlreadyInstalled,
    Installed(Vec<PathBuf>),
}

/// Fetches, builds and relocates the external build tool
pub struct Bootstrap {
    config: BootstrapConfig,
    root: PathBuf,
    client: reqwest::Client,
}

impl Bootstrap {
    pub fn new(config: BootstrapConfig, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(CACHE_DIR)
    }

    pub fn destination(&self) -> PathBuf {
        self.root.join(&self.config.destination)
    }

    /// Whether every configured artifact already exists in the destination
    pub fn is_installed(&self) -> bool {
        let dest = self.destination();
        !self.config.artifacts.is_empty()
            && self.config.artifacts.iter().all(|a| dest.join(a).is_file())
    }

    /// The build command line, as shown to the user
    pub fn build_command(&self, source_root: &Path, out_dir: &Path) -> Vec<String> {
        vec![
            "dotnet".to_string(),
            "build".to_string(),
            source_root
                .join(&self.config.project)
                .to_string_lossy()
                .into_owned(),
            "-c".to_string(),
            "Release".to_string(),
            "-o".to_string(),
            out_dir.to_string_lossy().into_owned(),
        ]
    }

    /// Run all steps unless the tool is already installed
    pub async fn run(&self) -> Result<BootstrapOutcome> {
        if self.is_installed() {
            tracing::info!(dest = %self.destination().display(), "bootstrap already installed");
            return Ok(BootstrapOutcome::AlreadyInstalled);
        }

        let archive = self.fetch_source().await?;
        let source_root = extract_archive(&archive, &self.cache_dir().join("src"))?;
        let out_dir = self.cache_dir().join("out");
        self.build(&source_root, &out_dir).await?;
        let placed = relocate(&out_dir, &self.destination(), &self.config.artifacts)?;

        Ok(BootstrapOutcome::Installed(placed))
    }

    async fn fetch_source(&self) -> Result<Vec<u8>> {
        let url = Url::parse(&self.config.source_url).map_err(|e| {
            ScaffoldError::Config(format!(
                "Invalid bootstrap source URL '{}': {}",
                self.config.source_url, e
            ))
        })?;

        tracing::info!(url = %url, "fetching bootstrap source");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ScaffoldError::Fetch(format!("Failed to fetch {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(ScaffoldError::Fetch(format!(
                "Failed to fetch {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ScaffoldError::Fetch(format!("Failed to read {}: {}", url, e)))?;
        Ok(bytes.to_vec())
    }

    /// Run the build, streaming its output
    async fn build(&self, source_root: &Path, out_dir: &Path) -> Result<()> {
        let argv = self.build_command(source_root, out_dir);
        let display = argv.join(" ");
        println!();
        println!("{} {}", "Running:".dimmed(), display.yellow());
        println!();

        let spawn_err = |source: std::io::Error| ScaffoldError::ExternalToolSpawn {
            command: display.clone(),
            source,
        };

        let mut child = TokioCommand::new(&argv[0])
            .args(&argv[1..])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(&spawn_err)?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| spawn_err(std::io::Error::other("stdout not captured")))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| spawn_err(std::io::Error::other("stderr not captured")))?;

        let output_task = stream_output(BufReader::new(stdout), BufReader::new(stderr));

        if timeout(BUILD_TIMEOUT, output_task).await.is_err() {
            let _ = child.kill().await;
            return Err(ScaffoldError::ExternalTool {
                command: display,
                code: -1,
            });
        }

        let status = match timeout(Duration::from_secs(30), child.wait()).await {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => return Err(spawn_err(e)),
            Err(_) => {
                let _ = child.kill().await;
                return Err(ScaffoldError::ExternalTool {
                    command: display,
                    code: -1,
                });
            }
        };

        println!();
        if status.success() {
            Ok(())
        } else {
            Err(ScaffoldError::ExternalTool {
                command: display,
                code: status.code().unwrap_or(-1),
            })
        }
    }
}

/// Echo a child's stdout and stderr until both streams reach EOF
///
/// Returns how many lines each stream produced.
async fn stream_output<O, E>(stdout: O, stderr: E) -> (usize, usize)
where
    O: AsyncBufRead + Unpin,
    E: AsyncBufRead + Unpin,
{
    let mut stdout_reader = stdout.lines();
    let mut stderr_reader = stderr.lines();
    let mut stdout_open = true;
    let mut stderr_open = true;
    let (mut out_lines, mut err_lines) = (0, 0);

    while stdout_open || stderr_open {
        tokio::select! {
            line = stdout_reader.next_line(), if stdout_open => {
                match line {
                    Ok(Some(line)) => {
                        out_lines += 1;
                        println!("  {}", line);
                    }
                    Ok(None) => stdout_open = false,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stdout:".red(), e);
                        stdout_open = false;
                    }
                }
            }
            line = stderr_reader.next_line(), if stderr_open => {
                match line {
                    Ok(Some(line)) => {
                        err_lines += 1;
                        eprintln!("  {}", line.yellow());
                    }
                    Ok(None) => stderr_open = false,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stderr:".red(), e);
                        stderr_open = false;
                    }
                }
            }
        }
    }

    (out_lines, err_lines)
}

/// Extract a zip archive into `dest`, returning the source root
///
/// GitHub archives wrap everything in one `<repo>-<ref>/` folder; when all
/// entries share a single top-level folder that folder is the root.
pub fn extract_archive(zip_bytes: &[u8], dest: &Path) -> Result<PathBuf> {
    let mut archive = ZipArchive::new(Cursor::new(zip_bytes))
        .map_err(|e| ScaffoldError::Fetch(format!("Failed to read source archive: {}", e)))?;

    std::fs::create_dir_all(dest).map_err(|e| ScaffoldError::fs(FsOp::CreateDir, dest, e))?;

    let mut top_level: Option<Option<PathBuf>> = None;
    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| ScaffoldError::Fetch(format!("Corrupt source archive: {}", e)))?;

        // Entries escaping the destination are skipped
        let Some(relative) = file.enclosed_name() else {
            tracing::warn!(entry = %file.name(), "skipping unsafe archive entry");
            continue;
        };

        let first = match relative.components().next() {
            Some(Component::Normal(c)) => Some(PathBuf::from(c)),
            _ => None,
        };
        top_level = match top_level {
            None => Some(first),
            Some(prev) if prev == first => Some(prev),
            Some(_) => Some(None),
        };

        let target = dest.join(&relative);
        if file.is_dir() {
            std::fs::create_dir_all(&target)
                .map_err(|e| ScaffoldError::fs(FsOp::CreateDir, &target, e))?;
            continue;
        }
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ScaffoldError::fs(FsOp::CreateDir, parent, e))?;
        }

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| ScaffoldError::fs(FsOp::Read, &target, e))?;
        std::fs::write(&target, &contents).map_err(|e| ScaffoldError::fs(FsOp::Write, &target, e))?;
    }

    Ok(match top_level.flatten() {
        Some(folder) if dest.join(&folder).is_dir() => dest.join(folder),
        _ => dest.to_path_buf(),
    })
}

/// Copy named artifacts from `out_dir` into `dest`
pub fn relocate(out_dir: &Path, dest: &Path, artifacts: &[String]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dest).map_err(|e| ScaffoldError::fs(FsOp::CreateDir, dest, e))?;

    let mut placed = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let from = out_dir.join(artifact);
        let to = dest.join(artifact);
        std::fs::copy(&from, &to).map_err(|e| ScaffoldError::fs(FsOp::Copy, &from, e))?;
        tracing::debug!(from = %from.display(), to = %to.display(), "relocated artifact");
        placed.push(to);
    }
    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn archive(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options = SimpleFileOptions::default();
            for (name, contents) in entries {
                zip.start_file(*name, options).unwrap();
                zip.write_all(contents.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
        }
        buffer
    }

    #[test]
    fn test_extract_archive_finds_single_top_level_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let bytes = archive(&[
            ("mdk2-main/Source/Tool.csproj", "<Project />"),
            ("mdk2-main/README.md", "readme"),
        ]);

        let root = extract_archive(&bytes, tmp.path()).unwrap();

        assert_eq!(root, tmp.path().join("mdk2-main"));
        assert!(root.join("Source/Tool.csproj").is_file());
    }

    #[test]
    fn test_extract_archive_without_common_folder_uses_dest() {
        let tmp = tempfile::tempdir().unwrap();
        let bytes = archive(&[("a/x.txt", "x"), ("b/y.txt", "y")]);

        let root = extract_archive(&bytes, tmp.path()).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn test_extract_rejects_garbage() {
        let tmp = tempfile::tempdir().unwrap();
        let err = extract_archive(b"not a zip", tmp.path()).unwrap_err();
        assert_eq!(err.code(), "EXTERNAL_TOOL_ERROR");
    }

    #[test]
    fn test_relocate_copies_artifacts() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(out.join("mdk.dll"), "bin").unwrap();

        let placed = relocate(&out, &tmp.path().join("bin"), &["mdk.dll".to_string()]).unwrap();

        assert_eq!(placed, vec![tmp.path().join("bin/mdk.dll")]);
        assert_eq!(std::fs::read_to_string(&placed[0]).unwrap(), "bin");
    }

    #[test]
    fn test_relocate_missing_artifact_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let err = relocate(tmp.path(), &tmp.path().join("bin"), &["nope.dll".to_string()])
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Filesystem { op: FsOp::Copy, .. }));
    }

    #[test]
    fn test_is_installed_requires_every_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        let config = BootstrapConfig {
            artifacts: vec!["a.dll".to_string(), "b.dll".to_string()],
            destination: "tools".to_string(),
            ..BootstrapConfig::default()
        };
        let bootstrap = Bootstrap::new(config, tmp.path());
        std::fs::create_dir_all(bootstrap.destination()).unwrap();
        std::fs::write(bootstrap.destination().join("a.dll"), "").unwrap();
        assert!(!bootstrap.is_installed());

        std::fs::write(bootstrap.destination().join("b.dll"), "").unwrap();
        assert!(bootstrap.is_installed());
    }

    #[tokio::test]
    async fn test_run_skips_when_installed() {
        let tmp = tempfile::tempdir().unwrap();
        let config = BootstrapConfig {
            source_url: "not a url".to_string(),
            artifacts: vec!["mdk.dll".to_string()],
            destination: "tools".to_string(),
            ..BootstrapConfig::default()
        };
        let bootstrap = Bootstrap::new(config, tmp.path());
        std::fs::create_dir_all(bootstrap.destination()).unwrap();
        std::fs::write(bootstrap.destination().join("mdk.dll"), "").unwrap();

        assert_eq!(bootstrap.run().await.unwrap(), BootstrapOutcome::AlreadyInstalled);
    }

    #[tokio::test]
    async fn test_invalid_source_url_is_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        let config = BootstrapConfig {
            source_url: "not a url".to_string(),
            ..BootstrapConfig::default()
        };
        let err = Bootstrap::new(config, tmp.path()).run().await.unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_build_command_targets_release_output() {
        let bootstrap = Bootstrap::new(BootstrapConfig::default(), "/ws");
        let argv = bootstrap.build_command(Path::new("/src"), Path::new("/out"));
        assert_eq!(argv[0], "dotnet");
        assert!(argv[2].ends_with("Mdk.CommandLine.csproj"));
        assert_eq!(&argv[3..], &["-c", "Release", "-o", "/out"]);
    }

    #[tokio::test]
    async fn test_stream_output_drains_stderr_after_stdout_closes() {
        let stdout: &[u8] = b"";
        let stderr: &[u8] = b"warning one\nwarning two\nerror three\n";

        let (out_lines, err_lines) = stream_output(stdout, stderr).await;

        assert_eq!(out_lines, 0);
        assert_eq!(err_lines, 3);
    }
}
