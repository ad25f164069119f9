use anyhow::Result;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    browser_ctl::cli::run().await
}
