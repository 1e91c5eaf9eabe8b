use std::env;
use std::fs;
use std::path::Path;

/// Place config.toml and the report dataset next to the built binary so
/// relative paths in the config resolve the same way in dev and release.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");
    println!("cargo:rerun-if-changed=data/report.toml");

    let out_dir = env::var("OUT_DIR").unwrap();
    let profile = env::var("PROFILE").unwrap(); // "debug" or "release"

    // OUT_DIR is typically: target/debug/build/backend-xxx/out
    let target_dir = Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .expect("Could not find target profile directory");

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("Could not find workspace root");

    copy_if_exists(&workspace_root.join("config.toml"), &target_dir.join("config.toml"));
    copy_if_exists(
        &manifest_dir.join("data").join("report.toml"),
        &target_dir.join("data").join("report.toml"),
    );
}

fn copy_if_exists(source: &Path, dest: &Path) {
    if !source.exists() {
        println!("cargo:warning={:?} not found, the embedded default is used", source);
        return;
    }
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create {:?}: {}", parent, e));
    }
    fs::copy(source, dest).unwrap_or_else(|e| panic!("Failed to copy {:?}: {}", source, e));
}
