use crate::config::parse_config;
use crate::shared::SharedRegistry;
use crate::{Error, Result};
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::sync::Arc;

/// Keeps a [`SharedRegistry`] in sync with its config file.
pub struct ConfigWatcher {
    path: PathBuf,
    registry: Arc<SharedRegistry>,
}

impl ConfigWatcher {
    pub fn new(path: PathBuf, registry: Arc<SharedRegistry>) -> Self {
        Self { path, registry }
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(tx, Config::default())?;

        // Editors often replace the file instead of writing in place, so watch the directory.
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        crate::ui::info("Watching", &self.path.display().to_string());

        for res in rx {
            match res {
                Ok(event) => self.handle_event(event),
                Err(e) => tracing::warn!("watch error: {:?}", e),
            }
        }

        Ok(())
    }

    fn handle_event(&self, event: notify::Event) {
        use notify::EventKind;
        match event.kind {
            EventKind::Create(_) | EventKind::Modify(_) => {
                if event.paths.iter().any(|p| self.is_config(p)) {
                    self.reload_and_report();
                }
            }
            EventKind::Remove(_) => {
                if event.paths.iter().any(|p| self.is_config(p)) {
                    crate::ui::warn("Config file removed; keeping the last loaded registry");
                }
            }
            _ => {}
        }
    }

    fn is_config(&self, path: &Path) -> bool {
        path.file_name() == self.path.file_name()
    }

    fn reload_and_report(&self) {
        match self.reload() {
            Ok(()) => crate::ui::success(&format!("Reloaded: {} adapters", self.registry.snapshot().len())),
            Err(Error::BatchPartialFailure { count }) => crate::ui::warn(&format!(
                "Reloaded with {} rejected entries: {} adapters",
                count,
                self.registry.snapshot().len()
            )),
            Err(e) => {
                tracing::error!(path = %self.path.display(), "Failed to reload config: {}", e);
                crate::ui::error("Reload failed; keeping the last loaded registry");
            }
        }
    }

    /// Read the config file and publish it.
    ///
    /// An unreadable or unparsable file leaves the current snapshot untouched.
    pub fn reload(&self) -> Result<()> {
        let contents = std::fs::read_to_string(&self.path)?;
        let config = parse_config(&self.path, &contents)?;
        self.registry.load(config.external_frameworks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gvk::GroupVersionKind;
    use tempfile::TempDir;

    fn setup(contents: &str) -> (TempDir, ConfigWatcher, Arc<SharedRegistry>) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gvkreg.toml");
        std::fs::write(&path, contents).unwrap();
        let registry = Arc::new(SharedRegistry::new());
        let watcher = ConfigWatcher::new(path, Arc::clone(&registry));
        (dir, watcher, registry)
    }

    #[test]
    fn test_reload_publishes_config() {
        let (_dir, watcher, registry) = setup("[[external_frameworks]]\nname = \"Job.v1.batch\"\n");
        watcher.reload().unwrap();
        assert!(registry.lookup(&GroupVersionKind::new("batch", "v1", "Job")).is_some());
    }

    #[test]
    fn test_reload_keeps_snapshot_on_parse_error() {
        let (_dir, watcher, registry) = setup("[[external_frameworks]]\nname = \"Job.v1.batch\"\n");
        watcher.reload().unwrap();

        std::fs::write(&watcher.path, "[[external_frameworks]\n").unwrap();
        assert!(matches!(watcher.reload(), Err(Error::ConfigParse(_))));
        assert_eq!(registry.snapshot().len(), 1);
    }

    #[test]
    fn test_reload_partial_failure() {
        let (_dir, watcher, registry) =
            setup("[[external_frameworks]]\nname = \"Pod.v1.\"\n\n[[external_frameworks]]\nname = \"Pod\"\n");
        assert!(matches!(watcher.reload(), Err(Error::BatchPartialFailure { count: 1 })));
        assert_eq!(registry.list_all().len(), 1);
    }
}
