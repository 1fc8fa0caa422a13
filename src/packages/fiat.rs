//! FIAT, the finite element automatic tabulator.
//!
//! Installed from its source archive into the interpreter-specific
//! `site-packages` layout, and verified by importing the `FIAT` module with
//! its simplex, Lagrange and quadrature submodules.

use super::locate::Verification;
use super::{LocatePackage, PackageDescriptor};

/// Source archive for FIAT 0.9.9.
pub const FIAT_DOWNLOAD: &str = "http://launchpad.net/fiat/0.x/0.9.9/+download/fiat-0.9.9.tar.gz";

/// Submodules a working FIAT exposes.
pub const FIAT_SYMBOLS: [&str; 3] = ["ufc_simplex", "lagrange", "quadrature"];

/// The FIAT plugin for interpreter `python_version`.
pub fn fiat(python_version: &str) -> LocatePackage {
    let descriptor = PackageDescriptor::new("FIAT")
        .with_download(&[FIAT_DOWNLOAD])
        .with_download_on_windows(true)
        .with_liblist(vec![vec!["Lagrange.py".to_string()]])
        .with_python_layout(python_version);

    LocatePackage::new(descriptor, Verification::new("FIAT", &FIAT_SYMBOLS))
        .requires("scientificpython")
        .installs("FIAT")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ProbeConfig, ProbeOptions};
    use crate::context::ConfigureContext;
    use crate::error::{ProbeError, Result};
    use crate::packages::{Package, Requirer};
    use crate::probe::Guess;
    use crate::ui::MockUI;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_fiat(dir: &Path, symbols: &[&str]) {
        let fiat = dir.join("FIAT");
        fs::create_dir_all(&fiat).unwrap();
        for symbol in symbols {
            fs::write(fiat.join(format!("{}.py", symbol)), symbol).unwrap();
        }
    }

    fn context(install_dir: &Path) -> ConfigureContext {
        let config = ProbeConfig {
            install_dir: Some(install_dir.to_path_buf()),
            ..Default::default()
        };
        ConfigureContext::new(ProbeOptions::resolve_with_python(
            &config,
            Path::new("/proj"),
            "3.11",
        ))
    }

    fn guess(location: &str, lib_dir: &Path) -> Guess {
        Guess {
            location: location.to_string(),
            root: lib_dir.to_path_buf(),
            libraries: vec![lib_dir.join("Lagrange.py")],
            include_dir: lib_dir.join("include"),
        }
    }

    struct Recorder(Vec<(String, String)>);

    impl Requirer for Recorder {
        fn require(&mut self, name: &str, requester: &str) -> Result<String> {
            self.0.push((name.to_string(), requester.to_string()));
            Ok(name.to_lowercase())
        }
    }

    #[test]
    fn descriptor_layout() {
        let package = fiat("3.11");
        let d = package.descriptor();
        assert_eq!(d.name, "FIAT");
        assert_eq!(d.download, vec![FIAT_DOWNLOAD.to_string()]);
        assert!(d.download_on_windows);
        assert_eq!(d.liblist, vec![vec!["Lagrange.py".to_string()]]);
        assert_eq!(d.libdir, PathBuf::from("lib/python/site-packages"));
        assert_eq!(d.altlibdir, PathBuf::from("lib/python3.11/site-packages"));
    }

    #[test]
    fn requires_scientific_python() {
        let mut package = fiat("3.11");
        let mut recorder = Recorder(Vec::new());

        package.setup_dependencies(&mut recorder).unwrap();

        assert_eq!(
            recorder.0,
            vec![("scientificpython".to_string(), "FIAT".to_string())]
        );
        assert_eq!(package.descriptor().deps, vec!["scientificpython".to_string()]);
    }

    #[test]
    fn unresolved_requirement_propagates() {
        struct Refuse;
        impl Requirer for Refuse {
            fn require(&mut self, name: &str, requester: &str) -> Result<String> {
                Err(ProbeError::DependencyUnresolved {
                    package: requester.to_string(),
                    dependency: name.to_string(),
                    message: "unknown package".to_string(),
                })
            }
        }

        let err = fiat("3.11").setup_dependencies(&mut Refuse).unwrap_err();
        assert!(matches!(err, ProbeError::DependencyUnresolved { .. }));
    }

    #[test]
    fn unprivileged_install_into_empty_root() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("fiat-0.9.9");
        write_fiat(&source, &FIAT_SYMBOLS);
        let install_dir = temp.path().join("install");
        let mut ctx = context(&install_dir);
        let mut ui = MockUI::new();

        let root = fiat("3.11").install(&mut ctx, &mut ui, &source).unwrap();

        assert_eq!(root, install_dir);
        let installed = install_dir.join("lib/python3.11/site-packages/FIAT");
        for symbol in FIAT_SYMBOLS {
            let name = format!("{}.py", symbol);
            assert_eq!(
                fs::read_to_string(installed.join(&name)).unwrap(),
                fs::read_to_string(source.join("FIAT").join(&name)).unwrap()
            );
        }
        assert_eq!(fs::read_dir(&installed).unwrap().count(), 3);
        assert_eq!(ctx.actions.len(), 1);
        assert!(ctx.actions.entries()[0].message.contains("Installed FIAT"));
        assert!(ctx.log.contains("Installing FIAT"));
        assert!(ui.warnings().is_empty());
    }

    #[test]
    fn install_failure_records_no_action() {
        let temp = TempDir::new().unwrap();
        let mut ctx = context(&temp.path().join("install"));

        let result = fiat("3.11").install(&mut ctx, &mut MockUI::new(), &temp.path().join("missing"));

        assert!(result.is_err());
        assert!(ctx.actions.is_empty());
    }

    #[test]
    fn first_functional_guess_wins() {
        let temp = TempDir::new().unwrap();
        let g1 = temp.path().join("g1");
        let g2 = temp.path().join("g2");
        write_fiat(&g1, &["ufc_simplex", "quadrature"]);
        write_fiat(&g2, &FIAT_SYMBOLS);
        let mut ctx = context(&temp.path().join("install"));
        let mut package = fiat("3.11");

        package
            .configure_library(&mut ctx, &[guess("G1", &g1), guess("G2", &g2)])
            .unwrap();

        assert!(package.found());
        assert_eq!(ctx.packages().len(), 1);
        assert_eq!(ctx.packages()[0].location, "G2");
        assert_eq!(ctx.packages()[0].lib_dir, g2);
        assert!(ctx.log.contains("Checking for a functional FIAT"));
        assert!(ctx
            .log
            .contains("ERROR: Could not import FIAT: cannot import name lagrange from FIAT"));
        assert!(ctx.log.contains(&format!(
            "Added directory {} to module search path",
            g2.display()
        )));
    }

    #[test]
    fn no_functional_guess() {
        let temp = TempDir::new().unwrap();
        let empty = temp.path().join("empty");
        fs::create_dir_all(&empty).unwrap();
        let mut ctx = context(&temp.path().join("install"));
        let mut package = fiat("3.11");

        let err = package
            .configure(
                &mut ctx,
                &[guess("nothing here", &empty), guess("missing", &temp.path().join("nope"))],
            )
            .unwrap_err();

        assert_eq!(err.to_string(), "Could not find a functional FIAT");
        assert!(!package.found());
        assert!(ctx.packages().is_empty());
        assert!(ctx.substitutions().is_empty());
    }

    #[test]
    fn outputs_point_at_lib_dir() {
        let temp = TempDir::new().unwrap();
        let lib = temp.path().join("site-packages");
        write_fiat(&lib, &FIAT_SYMBOLS);
        let mut ctx = context(&temp.path().join("install"));

        let mut package = fiat("3.11");
        package.configure(&mut ctx, &[guess("here", &lib)]).unwrap();

        assert_eq!(ctx.defines()["HAVE_FIAT"], "1");
        assert_eq!(ctx.substitutions()["FIAT_DIR"], lib.display().to_string());
    }
}
