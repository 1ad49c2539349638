#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable sector report
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}
