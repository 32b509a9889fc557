mod explain;
mod export;
mod fetch;
mod hierarchy;
mod init;
mod mermaid;
mod serve;
mod tree;

pub use explain::cmd_explain;
pub use export::cmd_export;
pub use fetch::cmd_fetch;
pub use hierarchy::cmd_hierarchy;
pub use init::cmd_init;
pub use mermaid::cmd_mermaid;
pub use serve::cmd_serve;
pub use tree::cmd_tree;

use crate::config::Config;
use crate::fs::FileSystem;
use crate::style;
use std::future::Future;
use std::path::Path;

/// Shared setup for commands: configuration from the working directory with
/// any `--backend` override applied.
pub struct CommandContext {
    pub config: Config,
}

impl CommandContext {
    pub fn new(backend: Option<&str>) -> Self {
        Self::load(Path::new("."), backend, crate::fs::default_fs())
    }

    /// A broken config file is reported and replaced by defaults.
    pub fn load(dir: &Path, backend: Option<&str>, fs: &dyn FileSystem) -> Self {
        let config = Config::load_with_fs(dir, fs).unwrap_or_else(|e| {
            style::warning(&format!("Failed to load config: {}. Using defaults.", e));
            Config::default()
        });

        Self {
            config: config.with_backend_url(backend),
        }
    }
}

/// Run a future to completion on a fresh multi-threaded runtime.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, i32> {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => Ok(rt.block_on(future)),
        Err(e) => {
            style::error(&format!("Failed to start async runtime: {}", e));
            Err(1)
        }
    }
}

/// Write `content` to `output`, or to stdout when no file was given.
pub(crate) fn write_output(output: Option<&Path>, content: &str, fs: &dyn FileSystem) -> i32 {
    match output {
        Some(path) => {
            if let Err(e) = fs.write(path, content) {
                style::error(&format!("Failed to write {}: {}", style::path(path), e));
                return 1;
            }
            style::success(&format!("Wrote {}", style::path(path)));
        }
        None => println!("{}", content.trim_end()),
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFs;

    #[test]
    fn test_context_applies_backend_override() {
        let fs = MockFs::with_files([(
            "/work/.repoviz.toml",
            "[backend]\nurl = \"http://file:1\"\ntimeout_secs = 5\n",
        )]);
        let ctx = CommandContext::load(Path::new("/work"), Some("http://flag:2"), &fs);
        assert_eq!(ctx.config.backend.url, "http://flag:2");
        assert_eq!(ctx.config.backend.timeout_secs, 5);
    }

    #[test]
    fn test_context_falls_back_on_broken_config() {
        let fs = MockFs::with_files([("/work/.repoviz.toml", "not = [valid")]);
        let ctx = CommandContext::load(Path::new("/work"), None, &fs);
        assert_eq!(ctx.config, Config::default());
    }

    #[test]
    fn test_write_output_to_file() {
        let fs = MockFs::new();
        assert_eq!(write_output(Some(Path::new("/out.txt")), "hello", &fs), 0);
        assert_eq!(fs.get("/out.txt").as_deref(), Some("hello"));
    }
}
