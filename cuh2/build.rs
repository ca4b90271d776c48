fn main() {
    println!("cargo:rerun-if-env-changed=CUH2_EAM_LIB_DIR");
    println!("cargo:rerun-if-env-changed=CUH2_EAM_LIB");

    if std::env::var_os("CARGO_FEATURE_NATIVE").is_none() {
        return;
    }

    // the Fortran code providing `c_force_eam` is built separately, we only
    // need to know where to find it
    if let Ok(directory) = std::env::var("CUH2_EAM_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", directory);
    }

    let library = std::env::var("CUH2_EAM_LIB").unwrap_or_else(|_| "eam".into());
    println!("cargo:rustc-link-lib={}", library);
    println!("cargo:rustc-link-lib=gfortran");
}
