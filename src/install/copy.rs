//! Recursive directory copy.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Recursively copy `src` to `dest`, creating `dest` and any parents.
///
/// Symlinks are recreated rather than followed, the way `cp -r` copies
/// them. Filesystem errors propagate unchanged.
pub fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<()> {
    if !src.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("source directory {} does not exist", src.display()),
        )
        .into());
    }

    fs::create_dir_all(dest)?;

    for entry in walkdir::WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(anyhow::Error::from)?;
        let target = dest.join(relative);

        if entry.path_is_symlink() {
            copy_link(entry.path(), &target)?;
        } else if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn copy_link(src: &Path, target: &Path) -> Result<()> {
    let link = fs::read_link(src)?;
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    std::os::unix::fs::symlink(link, target)?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_link(src: &Path, target: &Path) -> Result<()> {
    if src.is_dir() {
        copy_dir_recursive(src, target)
    } else {
        fs::copy(src, target)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copies_nested_tree() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::write(src.join("a.py"), "a").unwrap();
        fs::write(src.join("sub").join("b.py"), "b").unwrap();

        let dest = temp.path().join("out").join("copy");
        copy_dir_recursive(&src, &dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("a.py")).unwrap(), "a");
        assert_eq!(
            fs::read_to_string(dest.join("sub").join("b.py")).unwrap(),
            "b"
        );
    }

    #[cfg(unix)]
    #[test]
    fn directory_symlink_is_recreated() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("real")).unwrap();
        fs::write(src.join("real").join("lagrange.py"), "l").unwrap();
        std::os::unix::fs::symlink("real", src.join("alias")).unwrap();

        let dest = temp.path().join("out");
        copy_dir_recursive(&src, &dest).unwrap();

        let alias = dest.join("alias");
        assert!(fs::symlink_metadata(&alias).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&alias).unwrap(), Path::new("real"));
        assert_eq!(fs::read_to_string(alias.join("lagrange.py")).unwrap(), "l");
    }

    #[test]
    fn missing_source_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = copy_dir_recursive(&temp.path().join("nope"), &temp.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, crate::error::ProbeError::Io(_)));
    }
}
