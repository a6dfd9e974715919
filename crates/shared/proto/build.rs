fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Compile repo service proto
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/repo.proto"], &["proto/"])?;

    Ok(())
}
