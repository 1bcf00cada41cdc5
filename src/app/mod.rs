pub mod config;
pub mod handler;

pub use config::{Config, ConfigError, LogLevel};
pub use handler::{HandlerError, InvocationSummary, handle_event};

use crate::sender::{BatchDispatcher, FirehoseSink};
use crate::source::S3ObjectSource;
use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use tracing::info;

fn setup_logging(level: LogLevel) {
    tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::from(level))
        .with_current_span(false)
        .without_time() // the Lambda log collector stamps every line
        .init();
}

/// Process entry point: wire the real S3 source and Firehose sink into the
/// handler and hand control to the Lambda runtime.
pub async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;
    setup_logging(config.log_level);

    info!(
        stream = %config.delivery_stream_name,
        batch_size = config.batch_size,
        "starting alb-log-forwarder v{}",
        env!("CARGO_PKG_VERSION")
    );

    let aws_config = aws_config::load_from_env().await;
    let source = S3ObjectSource::new(aws_sdk_s3::Client::new(&aws_config));
    let sink = FirehoseSink::new(
        aws_sdk_firehose::Client::new(&aws_config),
        config.delivery_stream_name.clone(),
    );
    let dispatcher = BatchDispatcher::with_batch_size(sink, config.batch_size);

    run(service_fn(|event: LambdaEvent<S3Event>| {
        let source = &source;
        let dispatcher = &dispatcher;
        async move {
            let summary = handle_event(event.payload, source, dispatcher).await?;
            info!(?summary, "invocation complete");
            Ok::<InvocationSummary, Error>(summary)
        }
    }))
    .await
}
