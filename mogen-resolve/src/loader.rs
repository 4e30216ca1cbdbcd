//! Resolving CLI patterns to the parsed files of one Go package.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use miette::NamedSource;

use crate::error::{ResolveError, Result};

/// One parsed source file, keeping the raw text for diagnostics.
#[derive(Debug)]
pub struct SourceFile {
    pub name: String,
    pub src: String,
    pub ast: mogen_syntax::File,
}

impl SourceFile {
    pub(crate) fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.src.clone())
    }
}

/// All files of the single loaded package.
#[derive(Debug)]
pub struct Package {
    pub name: String,
    pub files: Vec<SourceFile>,
}

impl Package {
    /// Builds a package from in-memory sources. Fails with
    /// `MultiplePackages` when the package clauses disagree, `NotFound` when
    /// there is nothing to parse.
    pub fn from_sources<I, N, S>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<String>,
    {
        let mut files = Vec::new();
        for (name, src) in sources {
            let name = name.into();
            let src = src.into();
            let ast = mogen_syntax::parse_file(&src).map_err(|err| {
                Box::new(ResolveError::Parse {
                    src: NamedSource::new(&name, src.clone()),
                    filename: name.clone(),
                    span: err.span,
                    message: err.message,
                })
            })?;
            files.push(SourceFile { name, src, ast });
        }
        if files.is_empty() {
            return Err(Box::new(ResolveError::NotFound));
        }

        let mut names: IndexSet<String> = IndexSet::new();
        for file in &files {
            names.insert(file.ast.package.name.clone());
        }
        if names.len() > 1 {
            let names = names.into_iter().collect::<Vec<_>>().join(", ");
            return Err(Box::new(ResolveError::MultiplePackages { names }));
        }
        let name = names.into_iter().next().unwrap_or_default();
        Ok(Package { name, files })
    }
}

/// Loads the package named by `patterns`: paths of `.go` files, or
/// directories whose non-test `.go` files are taken in sorted order.
pub fn load(patterns: &[PathBuf]) -> Result<Package> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for pattern in patterns {
        let meta = fs::metadata(pattern).map_err(|source| {
            Box::new(ResolveError::Io { path: pattern.clone(), source })
        })?;
        if meta.is_dir() {
            let mut entries: Vec<PathBuf> = Vec::new();
            let dir = fs::read_dir(pattern).map_err(|source| {
                Box::new(ResolveError::Io { path: pattern.clone(), source })
            })?;
            for entry in dir {
                let entry = entry.map_err(|source| {
                    Box::new(ResolveError::Io { path: pattern.clone(), source })
                })?;
                let path = entry.path();
                if is_go_source(&path) {
                    entries.push(path);
                }
            }
            entries.sort();
            paths.extend(entries);
        } else if is_go_source(pattern) {
            paths.push(pattern.clone());
        }
    }
    if paths.is_empty() {
        return Err(Box::new(ResolveError::NotFound));
    }

    let mut sources = Vec::new();
    for path in paths {
        let src = fs::read_to_string(&path)
            .map_err(|source| Box::new(ResolveError::Io { path: path.clone(), source }))?;
        sources.push((path.display().to_string(), src));
    }
    Package::from_sources(sources)
}

/// Non-test Go source files only; editor droppings starting with `.` or `_`
/// are skipped the way the Go toolchain skips them.
fn is_go_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".go")
        && !name.ends_with("_test.go")
        && !name.starts_with('.')
        && !name.starts_with('_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let mut f = fs::File::create(dir.join(name)).expect("create");
        f.write_all(contents.as_bytes()).expect("write");
    }

    #[test]
    fn loads_directory_in_sorted_order_without_tests() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "b.go", "package util\ntype B int\n");
        write_file(dir.path(), "a.go", "package util\ntype A int\n");
        write_file(dir.path(), "a_test.go", "package util\ntype T int\n");
        write_file(dir.path(), "notes.txt", "not go");

        let pkg = load(&[dir.path().to_path_buf()]).expect("load");
        assert_eq!(pkg.name, "util");
        assert_eq!(pkg.files.len(), 2);
        assert!(pkg.files[0].name.ends_with("a.go"));
        assert!(pkg.files[1].name.ends_with("b.go"));
    }

    #[test]
    fn empty_directory_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load(&[dir.path().to_path_buf()]).unwrap_err();
        assert!(matches!(*err, ResolveError::NotFound));
    }

    #[test]
    fn mixed_packages_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "a.go", "package util\n");
        write_file(dir.path(), "b.go", "package other\n");
        let err = load(&[dir.path().to_path_buf()]).unwrap_err();
        match *err {
            ResolveError::MultiplePackages { names } => {
                assert_eq!(names, "util, other");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_failures_carry_the_filename() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "bad.go", "package util\ntype interface\n");
        let err = load(&[dir.path().to_path_buf()]).unwrap_err();
        assert!(matches!(*err, ResolveError::Parse { .. }));
    }

    #[test]
    fn missing_pattern_is_an_io_error() {
        let err = load(&[PathBuf::from("/nonexistent/xyz.go")]).unwrap_err();
        assert!(matches!(*err, ResolveError::Io { .. }));
    }
}
