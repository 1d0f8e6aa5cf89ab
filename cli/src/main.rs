mod prompt;

use std::io::{self, Write};
use std::process;

use anyhow::Context;
use clap::Parser;
use colored::*;
use log::debug;

use bountysubmit_core::config;
use bountysubmit_core::{Credential, SubmitConfig, Submitter, DEFAULT_ENDPOINT};

use crate::prompt::Prefilled;

#[derive(Parser, Debug)]
#[command(
    name = "bountysubmit",
    version,
    about = "Submit a vulnerability report to the bug bounty platform",
    after_help = "\x1b[1;36mENVIRONMENT:\x1b[0m
  BUGCROWD_USERNAME   Researcher account identifier (required)
  BUGCROWD_API_KEY    API key sent as a bearer token (required)

\x1b[1;36mEXAMPLES:\x1b[0m
  Interactive:                    bountysubmit
  Preview the payload:            bountysubmit --dry-run
  Through Burp:                   bountysubmit --proxy http://127.0.0.1:8080
  Scripted:                       bountysubmit --title \"IDOR on /api/users\" --description \"...\" --severity P2"
)]
pub struct Args {
    #[arg(long, default_value = DEFAULT_ENDPOINT, help = "Submission endpoint")]
    pub endpoint: String,

    #[arg(long, help = "Request timeout in seconds (default: none)")]
    pub timeout: Option<u64>,

    #[arg(long, help = "Proxy URL (e.g. http://127.0.0.1:8080)")]
    pub proxy: Option<String>,

    #[arg(short = 'v', long, default_value_t = false, help = "Debug logging")]
    pub verbose: bool,

    #[arg(long, help = "Validate and print the payload without sending it")]
    pub dry_run: bool,

    #[arg(long, help = "Vulnerability title (skips the prompt)")]
    pub title: Option<String>,

    #[arg(long, help = "Vulnerability description (skips the prompt)")]
    pub description: Option<String>,

    #[arg(long, help = "Severity P1-P5 (skips the prompt)")]
    pub severity: Option<String>,

    #[arg(long = "poc-url", help = "Proof-of-concept URL (skips the prompt)")]
    pub poc_url: Option<String>,
}

impl Args {
    fn prefilled(&self) -> Prefilled {
        Prefilled {
            title: self.title.clone(),
            description: self.description.clone(),
            severity: self.severity.clone(),
            poc_url: self.poc_url.clone(),
        }
    }
}

#[tokio::main]
async fn main() {
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let args = Args::parse();
    init_logging(args.verbose);
    config::load_dotenv();

    let credential = match Credential::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprint!("{}\r\n", format!("Error: {}", e).red());
            process::exit(1);
        }
    };

    if let Err(e) = run(&args, credential).await {
        eprint!("{}\r\n", format!("Fatal error: {:#}", e).red());
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,bountysubmit=debug,bountysubmit_core=debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Prompt, validate, submit. Validation failures and submission outcomes are
/// reported here and are not errors.
async fn run(args: &Args, credential: Credential) -> anyhow::Result<()> {
    let submit_config = SubmitConfig::new(&args.endpoint)?
        .with_timeout(args.timeout)
        .with_proxy(args.proxy.clone());
    debug!("Submitting with {:?}", submit_config);
    let submitter = Submitter::new(submit_config, credential)?;

    let draft = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        prompt::collect_report(&mut input, &mut output, &args.prefilled())
            .context("failed to read report details")?
    };

    let report = match draft.into_validated() {
        Ok(r) => r,
        Err(e) => {
            eprint!("{}\r\n", e.to_string().red());
            return Ok(());
        }
    };

    if args.dry_run {
        let payload = submitter.payload(&report);
        print!("[DRY RUN] Would submit to {}\r\n", submitter.config().endpoint);
        print!("{}\r\n", serde_json::to_string_pretty(&payload)?);
        io::stdout().flush().ok();
        return Ok(());
    }

    let outcome = submitter.submit(&report).await;
    if outcome.is_success() {
        print!("{}\r\n", outcome.to_string().green().bold());
    } else {
        print!("{}\r\n", outcome.to_string().red());
    }
    io::stdout().flush().ok();
    Ok(())
}
