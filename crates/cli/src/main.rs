#![deny(warnings)]

use anyhow::Context;
use clap::Parser;
use ring_queue_core::config::{
    resolve_demo_config, DemoConfig, Env, OutputFormat, StdEnv, ENV_FILL, ENV_FORMAT,
    ENV_OVERFLOW,
};
use ring_queue_core::demo::{run_demo, DEMO_CAPACITY};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ring-queue")]
#[command(about = "Walk through a fixed-capacity ring buffer: fill, overflow, front, pop")]
struct Args {
    /// Comma separated values pushed first [default: 1,2,3,4,5]
    #[arg(long, env = ENV_FILL)]
    fill: Option<String>,

    /// Comma separated values pushed after the fill, evicting the oldest [default: 6,7]
    #[arg(long, env = ENV_OVERFLOW)]
    overflow: Option<String>,

    /// Output format: text or json [default: text]
    #[arg(long, env = ENV_FORMAT)]
    format: Option<String>,

    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let env = StdEnv;
    let cfg = build_config(args, &env)?;

    tracing::info!(
        capacity = DEMO_CAPACITY,
        fill = cfg.fill.values().len(),
        overflow = cfg.overflow.values().len(),
        format = %cfg.format,
        "config loaded"
    );

    let report = run_demo(&cfg).context("demo scenario failed")?;

    match cfg.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to encode report")?
        ),
    }

    Ok(())
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn build_config(args: Args, env: &impl Env) -> anyhow::Result<DemoConfig> {
    resolve_demo_config(args.fill, args.overflow, args.format, env)
        .context("invalid demo configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ring_queue_core::config::MapEnv;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["ring-queue"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).expect("valid args")
    }

    #[test]
    fn cli_values_build_config() {
        let cfg = build_config(
            args(&["--fill", "1,2", "--overflow", "3", "--format", "json"]),
            &MapEnv::default(),
        )
        .expect("valid config");
        assert_eq!(cfg.fill.values(), &[1, 2]);
        assert_eq!(cfg.overflow.values(), &[3]);
        assert_eq!(cfg.format, OutputFormat::Json);
    }

    #[test]
    fn bad_fill_is_reported() {
        let err = build_config(args(&["--fill", "1,two"]), &MapEnv::default())
            .expect_err("invalid");
        assert!(format!("{err:#}").contains("invalid integer value"));
    }
}
