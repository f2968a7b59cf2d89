mod cli;

use clap::Parser;
use color_eyre::eyre::Result;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

use cli::{CheckArgs, Cli, Command, ModuleArgs};
use tfprobe::{TaskApiClient, Terraform};

#[derive(Tabled)]
struct OutputRow {
    name: String,
    #[tabled(rename = "type")]
    value_type: String,
    value: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tfprobe=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => check(args).await?,
        Command::Outputs(args) => outputs(args).await?,
        Command::Destroy(args) => {
            let terraform = Terraform::new(args.to_options()?)?;
            tokio::task::spawn_blocking(move || terraform.destroy()).await??;
            tracing::info!("destroy complete");
        }
        Command::Smoke(args) => {
            let client = TaskApiClient::new(args.endpoint)?;
            let task_id = client.smoke_test().await?;
            println!("smoke test passed (task {task_id})");
        }
    }

    Ok(())
}

async fn check(args: CheckArgs) -> tfprobe::Result<()> {
    let output_name = args.output_name()?.to_string();
    let terraform = Terraform::new(args.module.to_options()?)?;
    let smoke = args.smoke;
    let handle = tokio::runtime::Handle::current();

    let report = tokio::task::spawn_blocking(move || {
        tfprobe::run_check_with(&terraform, &output_name, |endpoint| {
            if smoke {
                tfprobe::smoke_test_blocking(&handle, endpoint).map(drop)
            } else {
                Ok(())
            }
        })
    })
    .await
    .map_err(|e| tfprobe::Error::Io(std::io::Error::other(e)))??;

    println!("{} = {}", report.output_name, report.value);
    Ok(())
}

async fn outputs(args: ModuleArgs) -> tfprobe::Result<()> {
    let terraform = Terraform::new(args.to_options()?)?;
    let outputs = tokio::task::spawn_blocking(move || terraform.output_all())
        .await
        .map_err(|e| tfprobe::Error::Io(std::io::Error::other(e)))??;

    let rows: Vec<OutputRow> = outputs
        .into_iter()
        .map(|(name, output)| OutputRow {
            name,
            value_type: tfprobe::terraform::render_value(&output.value_type),
            value: if output.sensitive {
                "(sensitive)".to_string()
            } else {
                output.render()
            },
        })
        .collect();

    if rows.is_empty() {
        tracing::info!("no outputs in state");
        return Ok(());
    }

    println!("{}", Table::new(rows));
    Ok(())
}
