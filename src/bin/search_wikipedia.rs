use anyhow::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    browser_ctl::cli::run_cascade().await
}
