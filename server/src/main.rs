#[tokio::main]
async fn main() {
    if let Err(e) = storyvoice::run().await {
        log::error!("server stopped: {e}");
        std::process::exit(1);
    }
}
