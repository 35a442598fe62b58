fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
    println!("cargo:rerun-if-env-changed=CREDIFLOW_API_BASE_URL");
    println!("cargo:rerun-if-env-changed=CREDIFLOW_IDENTITY_URL");
    println!("cargo:rerun-if-env-changed=CREDIFLOW_IDENTITY_REALM");
    println!("cargo:rerun-if-env-changed=CREDIFLOW_IDENTITY_CLIENT_ID");
    println!("cargo:rerun-if-env-changed=CREDIFLOW_LOG_LEVEL");

    built::write_built_file().expect("Failed to acquire build-time information");
}
