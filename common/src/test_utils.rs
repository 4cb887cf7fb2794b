use std::path::{Path, PathBuf};

/// Workspace root, one level above this crate's manifest.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// Returns `<workspace>/test_output/<name>`, creating `test_output` (and any
/// parent directories in `name`) on the way.
///
/// Intended for tests that write images for manual inspection.
pub fn test_output_path(name: &str) -> PathBuf {
    let path = workspace_root().join("test_output").join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create test_output directory");
    }
    path
}
