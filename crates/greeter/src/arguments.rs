use {
    std::{path::PathBuf, time::Duration},
    tracing::Level,
    url::Url,
};

#[derive(clap::Parser, Debug)]
#[command(about = "Deploys a Greeter contract and updates its greeting")]
pub struct Arguments {
    /// The development node to connect to (Hardhat network or anvil).
    #[clap(long, env, default_value = "http://127.0.0.1:8545")]
    pub node_url: Url,

    /// Directory containing the Hardhat build artifacts.
    #[clap(long, env, default_value = "artifacts")]
    pub artifacts: PathBuf,

    /// Greeting passed to the constructor.
    #[clap(long, env, default_value = "Hello, Hardhat!")]
    pub initial_greeting: String,

    /// Greeting set after the deployment.
    #[clap(long, env, default_value = "Hola, mundo!")]
    pub new_greeting: String,

    /// Give up waiting for a transaction to be mined after this long. Waits
    /// indefinitely if unset.
    #[clap(long, env, value_parser = humantime::parse_duration)]
    pub confirmation_timeout: Option<Duration>,

    #[clap(long, env, default_value = "warn,greeter=debug,chain=debug")]
    pub log_filter: String,

    #[clap(long, env, default_value = "error")]
    pub log_stderr_threshold: Level,

    /// Output logs as JSON.
    #[clap(long, env)]
    pub use_json_logs: bool,
}

impl std::fmt::Display for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            node_url,
            artifacts,
            initial_greeting,
            new_greeting,
            confirmation_timeout,
            log_filter,
            log_stderr_threshold,
            use_json_logs,
        } = self;

        writeln!(f, "node_url: {node_url}")?;
        writeln!(f, "artifacts: {}", artifacts.display())?;
        writeln!(f, "initial_greeting: {initial_greeting:?}")?;
        writeln!(f, "new_greeting: {new_greeting:?}")?;
        writeln!(f, "confirmation_timeout: {confirmation_timeout:?}")?;
        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, clap::Parser};

    #[test]
    fn defaults() {
        let args = Arguments::try_parse_from(["greeter"]).unwrap();

        assert_eq!(args.node_url.as_str(), "http://127.0.0.1:8545/");
        assert_eq!(args.initial_greeting, "Hello, Hardhat!");
        assert_eq!(args.new_greeting, "Hola, mundo!");
        assert_eq!(args.confirmation_timeout, None);
        assert!(!args.use_json_logs);
    }

    #[test]
    fn json_logs_flag() {
        let args = Arguments::try_parse_from(["greeter", "--use-json-logs"]).unwrap();

        assert!(args.use_json_logs);
        assert!(args.to_string().contains("use_json_logs: true"));
    }

    #[test]
    fn human_readable_timeout() {
        let args =
            Arguments::try_parse_from(["greeter", "--confirmation-timeout", "1m 30s"]).unwrap();
        assert_eq!(args.confirmation_timeout, Some(Duration::from_secs(90)));
    }
}
