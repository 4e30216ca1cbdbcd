//! Command-line surface and pipeline wiring.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use eyre::WrapErr;
use mogen_codegen::{GoFile, MockGen};
use mogen_resolve::Resolver;

pub const STATUS_OK: i32 = 0;
pub const STATUS_ERR: i32 = -1;

/// Generate mock implementations for the exported interfaces of one Go
/// package.
#[derive(Debug, Parser)]
#[command(name = "mogen", version)]
pub struct Cli {
    /// Write the generated file here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Package name for the generated file (defaults to the source package's)
    #[arg(long, value_name = "NAME")]
    pkgname: Option<String>,

    /// Go files or directories making up a single package
    #[arg(required = true, value_name = "PATTERN")]
    patterns: Vec<PathBuf>,
}

impl Cli {
    pub fn run(&self) -> i32 {
        let mut file = match self.build_file() {
            Ok(file) => file,
            Err(report) => {
                eprintln!("{report:?}");
                return STATUS_ERR;
            }
        };

        file.generate();
        let mut failed = false;
        if let Err(err) = file.format() {
            eprintln!("mogen: {err}");
            failed = true;
        }
        if let Err(err) = file.check() {
            eprintln!("mogen: {err}");
            failed = true;
        }
        // The buffer is flushed even when a pass failed, so what exists is
        // inspectable.
        if let Err(err) = self.write_output(file.contents()) {
            eprintln!("mogen: {err:#}");
            return STATUS_ERR;
        }
        if failed { STATUS_ERR } else { STATUS_OK }
    }

    /// Load, resolve, and assemble the raw (unformatted) file.
    fn build_file(&self) -> Result<GoFile, miette::Report> {
        let pkg = mogen_resolve::load(&self.patterns).map_err(|err| miette::Report::new(*err))?;
        let resolver = Resolver::new(pkg).map_err(|err| miette::Report::new(*err))?;
        let interfaces = resolver.discover().map_err(|err| miette::Report::new(*err))?;

        let package = self
            .pkgname
            .clone()
            .unwrap_or_else(|| resolver.package_name().to_owned());
        let mut file = GoFile::new(package);
        for path in resolver.import_paths() {
            file.add_import(path);
        }
        for (i, (name, iface)) in interfaces.iter().enumerate() {
            if i > 0 {
                file.body_mut().push_blank();
            }
            let mock = MockGen::new(format!("{name}Mock"), iface).map_err(miette::Report::new)?;
            mock.write_to(file.body_mut()).map_err(miette::Report::new)?;
        }
        Ok(file)
    }

    fn write_output(&self, contents: &str) -> eyre::Result<()> {
        match &self.out {
            Some(path) => std::fs::write(path, contents)
                .wrap_err_with(|| format!("failed to write {}", path.display())),
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(contents.as_bytes())
                    .wrap_err("failed to write to stdout")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn patterns_are_required() {
        assert!(Cli::try_parse_from(["mogen"]).is_err());
        let cli = Cli::try_parse_from(["mogen", "--pkgname", "other", "pkg/"]).unwrap();
        assert_eq!(cli.pkgname.as_deref(), Some("other"));
        assert_eq!(cli.patterns, [PathBuf::from("pkg/")]);
        assert!(cli.out.is_none());
    }
}
