#[tokio::main]
async fn main() {
    if let Err(err) = tn_api::run().await {
        tracing::error!(error = %err, "tn-api failed");
        std::process::exit(1);
    }
}
