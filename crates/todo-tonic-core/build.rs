/// Builds the gRPC client and server code for `proto/todo.proto` using
/// `tonic-prost-build`.
///
/// Besides the service traits and message types, this emits an encoded file
/// descriptor set (`todo_descriptor.bin`) into `OUT_DIR` so the server can
/// expose gRPC reflection.
///
/// # Serde
///
/// prost names the generated file after the snake-cased package, so
/// `todoPackage` lands in `todo_package.rs`.
///
/// Every message in `todoPackage` derives `serde::Serialize` and
/// `serde::Deserialize`, which lets the client print responses as JSON without
/// a parallel set of hand-written types.
///
/// # Panics
///
/// Panics if `OUT_DIR` is unset or code generation fails.
///
/// # Output
///
/// ```rust,ignore
/// pub mod proto {
///     tonic::include_proto!("todo_package");
/// }
/// ```
use std::env;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let descriptor_path = out_dir.join("todo_descriptor.bin");

    let mut config = tonic_prost_build::Config::new();
    config
        .type_attribute(
            ".todoPackage",
            "#[derive(serde::Serialize, serde::Deserialize)]",
        )
        .file_descriptor_set_path(&descriptor_path);

    tonic_prost_build::configure()
        .compile_with_config(config, &["proto/todo.proto"], &["proto"])
        .unwrap();
}
