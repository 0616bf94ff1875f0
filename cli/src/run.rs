//! The `fetch` subcommand.
//!
//! Output contract: the payload (or the `--json` outcome) goes to `out`;
//! failure text and the `--print-curl` command go to `err`. The returned
//! status maps to the process exit code.

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use fetch_core::{to_curl, CredentialPolicy, FetchClient, FormState, ProxyRewrite};

use crate::{render, Config, Executor};

#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// Endpoint URL
    #[arg(long)]
    pub url: String,

    /// Service-account name
    #[arg(long, env = "SCHEMA_FETCH_NAME", default_value = "")]
    pub name: String,

    /// Service-account secret
    #[arg(long, env = "SCHEMA_FETCH_SECRET", default_value = "", hide_env_values = true)]
    pub secret: String,

    /// Route matching URLs through a proxy; repeatable, first match wins
    #[arg(long = "rewrite", value_name = "PREFIX=REPLACEMENT")]
    pub rewrites: Vec<String>,

    /// Reject a name without a secret (or the reverse) instead of ignoring both
    #[arg(long)]
    pub strict_credentials: bool,

    /// Print the equivalent curl command to stderr
    #[arg(long)]
    pub print_curl: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// The endpoint answered with a JSON payload.
    Success,
    /// A request was made and classified as a failure.
    Failed,
    /// Nothing was sent: bad URL, partial credentials or a bad rewrite rule.
    InvalidInput,
}

impl FetchStatus {
    pub fn code(self) -> u8 {
        match self {
            FetchStatus::Success => 0,
            FetchStatus::Failed => 1,
            FetchStatus::InvalidInput => 2,
        }
    }
}

pub async fn run_fetch(
    args: FetchArgs,
    config: &Config,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<FetchStatus> {
    let policy = if args.strict_credentials {
        CredentialPolicy::Strict
    } else {
        CredentialPolicy::Lenient
    };
    let mut client = FetchClient::new().with_credential_policy(policy);
    for rule in &args.rewrites {
        match ProxyRewrite::parse(rule) {
            Ok(rewrite) => client = client.with_rewrite(rewrite),
            Err(e) => {
                writeln!(err, "error: {e}")?;
                return Ok(FetchStatus::InvalidInput);
            }
        }
    }

    let timeout = Duration::from_millis(args.timeout_ms.unwrap_or(config.timeout_ms));
    let executor = Executor::new(client, timeout)?;

    let state = FormState::new(&args.url, &args.name, &args.secret);
    let state = match executor.fetch_once(state).await {
        Ok(state) => state,
        Err(e) => {
            writeln!(err, "error: {e}")?;
            return Ok(FetchStatus::InvalidInput);
        }
    };

    if args.print_curl {
        if let Some(request) = state.request() {
            writeln!(err, "{}", to_curl(request))?;
        }
    }

    let Some(outcome) = state.outcome() else {
        anyhow::bail!("fetch finished without an outcome");
    };
    if args.json {
        writeln!(out, "{}", render::render_json(outcome)?)?;
    } else if outcome.is_success() {
        writeln!(out, "{}", render::render_outcome(outcome)?)?;
    } else {
        writeln!(err, "{}", render::render_outcome(outcome)?)?;
    }

    Ok(if outcome.is_success() {
        FetchStatus::Success
    } else {
        FetchStatus::Failed
    })
}
