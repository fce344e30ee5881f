use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct DefaultSize {
    width: i32,
    height: i32,
}

#[derive(Debug, Deserialize)]
struct AppEntry {
    id: String,
    name: String,
    icon: String,
    component: String,
    default_size: DefaultSize,
}

#[derive(Debug, Deserialize)]
struct RegistryManifest {
    schema_version: u32,
    apps: Vec<AppEntry>,
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("app_registry.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let manifest: RegistryManifest = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if manifest.schema_version != 1 {
        panic!(
            "registry schema mismatch in {}: expected 1 found {}",
            path.display(),
            manifest.schema_version
        );
    }

    let mut seen = HashSet::new();
    let mut entries = String::new();
    for app in &manifest.apps {
        if !seen.insert(app.id.as_str()) {
            panic!("duplicate app id `{}` in {}", app.id, path.display());
        }
        if app.default_size.width <= 0 || app.default_size.height <= 0 {
            panic!(
                "app `{}` in {} has a non-positive default size",
                app.id,
                path.display()
            );
        }
        entries.push_str(&format!(
            "    BuiltinApp {{ id: {:?}, name: {:?}, icon: {:?}, component: {:?}, width: {}, height: {} }},\n",
            app.id,
            app.name,
            app.icon,
            app.component,
            app.default_size.width,
            app.default_size.height
        ));
    }

    let generated = format!(
        "/// Build-time generated built-in app table.\n\
pub(crate) const BUILTIN_APPS: &[BuiltinApp] = &[\n{entries}];\n"
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("app_registry_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
