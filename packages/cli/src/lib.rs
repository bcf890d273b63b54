//! Command implementations behind the `embedfs` binary.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use embedfs_compiler::{compile, CompileError, GlobExcludes};
use embedfs_core::{VfsConfig, VfsError};

/// Errors surfaced by the CLI.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Config(#[from] VfsError),

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Compile one directory and write the source to `output`, or stdout.
pub fn compile_to(
    mount: &str,
    physical: &Path,
    exclude: Vec<String>,
    output: Option<&Path>,
) -> Result<(), Error> {
    let source = compile(mount, physical, &GlobExcludes::new(exclude))?;
    match output {
        Some(path) => write_file(path, &source),
        None => io::stdout()
            .write_all(&source)
            .map_err(|source| Error::Write {
                path: PathBuf::from("<stdout>"),
                source,
            }),
    }
}

/// Compile every mount of a config file into `<out_dir>/<name>.rs`.
///
/// Returns the written paths in config order.
pub fn build(config: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let config = VfsConfig::load(config)?;
    fs::create_dir_all(out_dir).map_err(|source| Error::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(config.mounts.len());
    for mount in &config.mounts {
        let source = compile(
            &mount.path,
            &mount.physical,
            &GlobExcludes::new(mount.exclude.clone()),
        )?;
        let target = out_dir.join(format!("{}.rs", mount.output_name()));
        write_file(&target, &source)?;
        log::info!("{} -> {}", mount.path, target.display());
        written.push(target);
    }
    Ok(written)
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), Error> {
    fs::write(path, contents).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let assets = dir.path().join("assets");
        fs::create_dir(&assets).unwrap();
        fs::write(assets.join("a.txt"), b"a").unwrap();
        fs::write(assets.join("b.tmp"), b"b").unwrap();

        let out = dir.path().join("assets.rs");
        compile_to("/app", &assets, vec!["*.tmp".to_string()], Some(&out)).unwrap();
        let text = fs::read_to_string(&out).unwrap();
        assert!(text.contains("\"/app/a.txt\""));
        assert!(!text.contains("b.tmp"));
    }

    #[test]
    fn build_from_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("site")).unwrap();
        fs::write(dir.path().join("site/index.html"), b"<p>").unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/readme.md"), b"#").unwrap();
        let config = dir.path().join("embedfs.json");
        fs::write(
            &config,
            r#"{"mounts": [
                {"path": "/app", "physical": "site"},
                {"path": "/static/docs", "physical": "docs", "exclude": ["*.bak"]}
            ]}"#,
        )
        .unwrap();

        let out_dir = dir.path().join("gen");
        let written = build(&config, &out_dir).unwrap();
        assert_eq!(
            written,
            vec![out_dir.join("app.rs"), out_dir.join("static_docs.rs")]
        );
        let docs = fs::read_to_string(out_dir.join("static_docs.rs")).unwrap();
        assert!(docs.contains("\"/static/docs/readme.md\""));
    }

    #[test]
    fn bad_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("embedfs.json");
        fs::write(&config, "not json").unwrap();
        let err = build(&config, dir.path()).unwrap_err();
        assert!(matches!(err, Error::Config(VfsError::Config { .. })));
    }
}
