//! Source file discovery

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::config::Config;

/// Collect the files to scan under `root`, sorted by path
///
/// A file given directly is returned as is, whatever its extension.
pub fn collect_source_files(root: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    if !root.is_dir() {
        anyhow::bail!("Path '{}' does not exist", root.display());
    }

    let mut files = Vec::new();
    walk(root, config, &mut files)
        .with_context(|| format!("Failed to scan '{}'", root.display()))?;
    files.sort();
    Ok(files)
}

fn walk(dir: &Path, config: &Config, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();

        // Skip hidden files and directories
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        if path.is_dir() {
            if config.excludes(name) {
                debug!(dir = %path.display(), "excluded");
                continue;
            }
            if let Err(err) = walk(&path, config, files) {
                warn!(dir = %path.display(), error = %err, "skipping unreadable directory");
            }
        } else if path.is_file() && config.accepts(&path) {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "//* @Node x\n").unwrap();
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn collects_sorted_matching_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "lib/zeta.dart");
        touch(dir.path(), "lib/alpha.dart");
        touch(dir.path(), "main.go");
        touch(dir.path(), "README.md");

        let files = collect_source_files(dir.path(), &Config::default()).unwrap();
        assert_eq!(
            relative(dir.path(), &files),
            ["lib/alpha.dart", "lib/zeta.dart", "main.go"]
        );
    }

    #[test]
    fn skips_hidden_and_excluded() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), ".git/hook.js");
        touch(dir.path(), ".hidden.dart");
        touch(dir.path(), "node_modules/dep/index.js");
        touch(dir.path(), "target/gen.c");
        touch(dir.path(), "src/app.ts");

        let files = collect_source_files(dir.path(), &Config::default()).unwrap();
        assert_eq!(relative(dir.path(), &files), ["src/app.ts"]);
    }

    #[test]
    fn custom_extensions_and_excludes() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "build/out.py");
        touch(dir.path(), "pkg/mod.py");
        touch(dir.path(), "pkg/mod.dart");

        let config = Config {
            extensions: vec!["py".into()],
            exclude: vec!["build".into()],
            ..Config::default()
        };
        let files = collect_source_files(dir.path(), &config).unwrap();
        assert_eq!(relative(dir.path(), &files), ["pkg/mod.py"]);
    }

    #[test]
    fn single_file_is_returned_as_is() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "notes.txt");
        let path = dir.path().join("notes.txt");

        let files = collect_source_files(&path, &Config::default()).unwrap();
        assert_eq!(files, [path]);
    }

    #[test]
    fn missing_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = collect_source_files(&dir.path().join("nope"), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
