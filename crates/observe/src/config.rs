use tracing::Level;

#[derive(Debug, Clone)]
pub struct Config {
    /// Filters spans and events based on a set of filter directives
    /// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
    pub(crate) env_filter: String,
    /// Events at this level or more severe go to stderr, everything else to
    /// stdout.
    pub(crate) stderr_threshold: Level,
    /// Output log events as JSON
    pub(crate) use_json_format: bool,
}

impl Config {
    pub fn new(env_filter: &str, stderr_threshold: Level) -> Self {
        Self {
            env_filter: env_filter.into(),
            stderr_threshold,
            use_json_format: false,
        }
    }

    pub fn with_json_format(mut self) -> Self {
        self.use_json_format = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use {super::*, tracing::Level};

    #[test]
    fn json_format_is_opt_in() {
        let config = Config::new("warn,greeter=debug", Level::WARN);
        assert!(!config.use_json_format);

        let config = config.with_json_format();

        assert_eq!(config.env_filter, "warn,greeter=debug");
        assert_eq!(config.stderr_threshold, Level::WARN);
        assert!(config.use_json_format);
    }
}
