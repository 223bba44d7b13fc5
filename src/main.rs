//! ec2-elb
//!
//! Registers an EC2 instance with classic Elastic Load Balancers
//! (`state=present`) or deregisters it (`state=absent`), waiting until each
//! load balancer reports the expected health state.
//!
//! # Architecture Overview
//!
//! ```text
//!  args file / flags ──▶ config ──▶ cloud::credentials ──▶ cloud::client (session)
//!                                                               │
//!                           ┌───────────────────────────────────┘
//!                           ▼
//!                 membership::resolver ──▶ membership::driver ──▶ plugin::output ──▶ stdout
//!                   (which ELBs?)           (call + poll, one        (JSON result)
//!                                            ELB at a time)
//! ```
//!
//! Logs go to stderr; stdout carries exactly one JSON document.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use ec2_elb::config::{self, clean_names, DesiredState, ModuleParams};
use ec2_elb::observability::{init_logging, LogFormat};
use ec2_elb::plugin::{self, ModuleFailure, PluginError};

#[derive(Parser)]
#[command(name = "ec2-elb")]
#[command(about = "Register or deregister an EC2 instance with Elastic Load Balancers", long_about = None)]
struct Cli {
    /// JSON (or .toml) file holding the invocation parameters.
    args_file: Option<PathBuf>,

    /// present (register) or absent (deregister).
    #[arg(long, value_enum)]
    state: Option<DesiredState>,

    /// Instance to (de)register.
    #[arg(long)]
    instance_id: Option<String>,

    /// Provider region [default: us-east-1].
    #[arg(long)]
    region: Option<String>,

    /// Comma-separated load balancer names.
    #[arg(long, value_delimiter = ',')]
    ec2_elbs: Option<Vec<String>>,

    #[arg(long)]
    ec2_access_key: Option<String>,

    #[arg(long)]
    ec2_secret_key: Option<String>,

    /// Endpoint override for the load balancing API.
    #[arg(long)]
    ec2_url: Option<String>,

    /// Wait for each load balancer to converge [default: true].
    #[arg(long)]
    wait: Option<bool>,

    /// Seconds to wait per load balancer; 0 waits forever [default: 0].
    #[arg(long)]
    wait_timeout: Option<u64>,

    #[arg(long, default_value = "info")]
    log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

impl Cli {
    fn overrides(&self) -> ModuleParams {
        ModuleParams {
            state: self.state,
            instance_id: self.instance_id.clone(),
            region: self.region.clone(),
            // An all-blank flag must not mask a list from the args file.
            ec2_elbs: self
                .ec2_elbs
                .as_ref()
                .map(clean_names)
                .filter(|names| !names.is_empty()),
            ec2_access_key: self.ec2_access_key.clone(),
            ec2_secret_key: self.ec2_secret_key.clone(),
            ec2_url: self.ec2_url.clone(),
            wait: self.wait,
            wait_timeout: self.wait_timeout,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format);

    let span = tracing::info_span!("ec2_elb", invocation_id = %Uuid::new_v4());

    match execute(&cli).instrument(span).await {
        Ok(outcome) => {
            print_document(&outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Invocation failed");
            print_document(&ModuleFailure::from(&e));
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: &Cli) -> Result<plugin::ModuleOutcome, PluginError> {
    let args = config::loader::load_args(cli.args_file.as_deref(), cli.overrides())?;

    tracing::info!(
        state = ?args.state,
        instance_id = %args.instance_id,
        region = %args.region,
        ec2_elbs = ?args.ec2_elbs,
        wait = args.wait,
        wait_timeout_secs = args.wait_timeout.map(|d| d.as_secs()).unwrap_or(0),
        "Parameters loaded"
    );

    plugin::invoke(&args).await
}

fn print_document<T: Serialize>(document: &T) {
    println!("{}", render_document(document));
}

fn render_document<T: Serialize>(document: &T) -> String {
    serde_json::to_string(document).unwrap_or_else(|e| {
        serde_json::json!({
            "failed": true,
            "msg": format!("failed to serialize result: {}", e),
        })
        .to_string()
    })
}
