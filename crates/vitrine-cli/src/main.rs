//! Binary entrypoint for the `vitrine` administrative CLI.

#[tokio::main]
async fn main() {
    std::process::exit(vitrine_cli::run().await);
}
