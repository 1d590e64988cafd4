use clap::Parser;

#[tokio::main]
async fn main() {
    let args = greeter::arguments::Arguments::parse();
    let mut log_config = observe::Config::new(&args.log_filter, args.log_stderr_threshold);
    if args.use_json_logs {
        log_config = log_config.with_json_format();
    }
    observe::tracing::initialize(&log_config);
    tracing::info!("running greeter with validated arguments:\n{}", args);

    match greeter::start(args).await {
        Ok(outcome) => tracing::info!(
            address = %outcome.address,
            initial = %outcome.initial_greeting,
            updated = %outcome.updated_greeting,
            "greeter workflow finished"
        ),
        Err(err) => {
            tracing::error!("greeter workflow failed: {err:?}");
            std::process::exit(1);
        }
    }
}
