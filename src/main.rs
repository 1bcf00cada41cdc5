use alb_log_forwarder::app;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    app::main().await
}
