use std::path::PathBuf;

use clap::Parser;

use pdfdrop::app::App;
use pdfdrop::config::Config;
use pdfdrop::error::AppResult;
use pdfdrop::logging::{default_log_path, init_logging};

/// Upload a PDF and page through the latest one in the terminal.
#[derive(Parser, Debug)]
#[command(name = "pdfdrop", version)]
struct Cli {
    /// Config file; defaults to PDFDROP_CONFIG_PATH or the user config dir.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Upload endpoint, also the base for relative document addresses.
    #[arg(long)]
    files_uri: Option<String>,
    #[arg(long)]
    graphql_uri: Option<String>,
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let log_path = cli.log_file.unwrap_or_else(default_log_path);
    init_logging(&log_path)?;

    let config = match cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    }
    .with_overrides(cli.files_uri, cli.graphql_uri);

    let mut app = App::new(config)?;
    app.run().await
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Cli;

    #[test]
    fn cli_accepts_endpoint_overrides() {
        let cli = Cli::try_parse_from([
            "pdfdrop",
            "--files-uri",
            "http://example.test/files",
            "--graphql-uri",
            "http://example.test/graphql",
        ])
        .expect("flags should parse");
        assert_eq!(cli.files_uri.as_deref(), Some("http://example.test/files"));
        assert_eq!(cli.graphql_uri.as_deref(), Some("http://example.test/graphql"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn cli_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["pdfdrop", "extra.pdf"]).is_err());
    }
}
