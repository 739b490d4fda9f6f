use std::env;
use std::fs;
use std::path::Path;

// Кладёт config.toml из корня workspace рядом с бинарником backend,
// где его ищет `load_config`.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let profile = env::var("PROFILE").expect("PROFILE is set by cargo");

    // OUT_DIR = target/<profile>/build/backend-<hash>/out
    let Some(target_dir) = Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
    else {
        println!("cargo:warning=Target profile directory not found, config.toml not copied");
        return;
    };

    let Some(workspace_root) = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
    else {
        return;
    };

    let source_config = workspace_root.join("config.toml");
    if !source_config.exists() {
        println!("cargo:warning=No config.toml at {:?}, the embedded default will be used", source_config);
        return;
    }

    let dest_config = target_dir.join("config.toml");
    if let Err(e) = fs::copy(&source_config, &dest_config) {
        println!("cargo:warning=Failed to copy config.toml to {:?}: {}", dest_config, e);
    }
}
