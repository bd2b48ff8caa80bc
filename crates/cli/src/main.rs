use clap::Parser;
use hexsieve_cli::{Args, run};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hexsieve=info,hexsieve_cli=info,info".into()),
        )
        .init();

    let args = Args::parse();
    run(&args)?;

    Ok(())
}
