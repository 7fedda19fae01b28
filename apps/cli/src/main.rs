use anyhow::Context;
use clap::Parser;
use rebreak::domain::config::RebreakConfig;
use rebreak::kernel::config::load_config;
use rebreak_cli::Cli;
use rebreak_logger::{LevelFilter, Logger};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg: RebreakConfig = load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;

    let level = if cli.verbose { LevelFilter::DEBUG } else { Logger::parse_level(&cfg.logging.level)? };
    let mut builder = Logger::builder().name(env!("CARGO_BIN_NAME")).level(level);
    if let Some(filter) = &cfg.logging.filter {
        builder = builder.env_filter(filter.as_str());
    }
    let _log = match &cfg.logging.dir {
        Some(dir) => {
            let files = builder
                .path(dir)
                .rotation(Logger::parse_rotation(&cfg.logging.rotation)?)
                .max_files(cfg.logging.max_files);
            if cfg.logging.json { files.json().init()? } else { files.init()? }
        },
        None => builder.init()?,
    };

    rebreak_cli::run(&cli.command, &cfg, &mut std::io::stdout().lock())
}
