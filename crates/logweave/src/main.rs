use clap::Parser;
use logweave::runtime::{boot, execute, Cli};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    boot::init_logging(cli.log_json);

    let config = boot::boot(cli.output).map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    let out = execute(cli.command, &config).await.map_err(|e| {
        tracing::error!("{}", e);
        e
    })?;
    print!("{}", out);
    Ok(())
}
