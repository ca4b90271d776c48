fn main() {
    let crate_dir = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is not set");

    let result = cbindgen::Builder::new()
        .with_crate(crate_dir)
        .with_config(cbindgen::Config {
            language: cbindgen::Language::C,
            cpp_compat: true,
            include_guard: Some("CUH2_H".into()),
            include_version: false,
            documentation: true,
            documentation_style: cbindgen::DocumentationStyle::Doxy,
            ..Default::default()
        })
        .generate()
        .map(|data| {
            std::fs::create_dir_all("include").expect("failed to create include directory");
            data.write_to_file("include/cuh2.h");
        });

    // if not ok, rerun the build script unconditionally
    if result.is_ok() {
        for entry in glob::glob("src/**/*.rs").expect("invalid glob pattern") {
            if let Ok(path) = entry {
                println!("cargo:rerun-if-changed={}", path.display());
            }
        }
    }
}
