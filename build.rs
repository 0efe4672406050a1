use shadow_rs::ShadowBuilder;

fn main() {
    // Build metadata consumed by pkg_version() and the CLI --version string
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
