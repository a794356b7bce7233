#[tokio::main]
async fn main() {
    if let Err(e) = chase_arena::run_with_config().await {
        tracing::error!(error = %e, "chase_arena exited with error");
        std::process::exit(1);
    }
}
