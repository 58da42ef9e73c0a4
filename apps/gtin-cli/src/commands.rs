//! # Commands
//!
//! Argument definitions and handlers for each `gtin` subcommand.
//!
//! Handlers write to any `io::Write` so tests can capture the output.

use std::io::Write;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use gtin_core::{
    compute_check_digit, inspect_code, validate_code, CodeGenerator, OverflowPolicy,
};
use rand::Rng;
use tracing::{debug, info};

use crate::config::CliConfig;

#[derive(Debug, Parser)]
#[command(name = "gtin")]
#[command(about = "Compute, validate and generate EAN-13 product codes.")]
pub struct CommandLine {
    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the check digit of a 12-digit payload
    #[command(alias = "c")]
    CheckDigit { payload: String },
    /// Check one or more codes
    #[command(alias = "v")]
    Validate {
        #[arg(required = true)]
        codes: Vec<String>,
    },
    /// Describe a code: prefix range, expected and found check digits
    #[command(alias = "i")]
    Inspect {
        code: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate codes from a prefix and an optional product id
    #[command(alias = "g")]
    Generate {
        /// Prefix (padded or truncated to 3 digits)
        #[arg(short, long)]
        prefix: Option<String>,
        /// First product id; consecutive codes use consecutive ids
        #[arg(long, allow_negative_numbers = true)]
        product_id: Option<i64>,
        /// Number of codes to print
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// Seed for reproducible random digits
        #[arg(long)]
        seed: Option<u64>,
        /// Truncate product ids of ten or more digits instead of failing
        #[arg(long)]
        truncate: bool,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Whether every code a command looked at was valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Invalid,
}

pub fn run(command: Commands, config: &CliConfig, out: &mut impl Write) -> anyhow::Result<Outcome> {
    match command {
        Commands::CheckDigit { payload } => check_digit(&payload, out),
        Commands::Validate { codes } => validate(&codes, out),
        Commands::Inspect { code, json } => inspect(&code, json, out),
        Commands::Generate {
            prefix,
            product_id,
            count,
            seed,
            truncate,
        } => {
            if count == 0 || count > config.max_count {
                bail!("--count must be between 1 and {}", config.max_count);
            }
            let request = GenerateRequest {
                prefix: prefix.unwrap_or_else(|| config.default_prefix.clone()),
                product_id,
                count,
                overflow: if truncate {
                    OverflowPolicy::Truncate
                } else {
                    config.overflow_policy
                },
            };
            match seed {
                Some(seed) => generate(CodeGenerator::seeded(seed), &request, out),
                None => generate(CodeGenerator::new(), &request, out),
            }
        }
    }
}

fn check_digit(payload: &str, out: &mut impl Write) -> anyhow::Result<Outcome> {
    let digit = compute_check_digit(payload)?;
    writeln!(out, "{digit}")?;
    Ok(Outcome::Success)
}

fn validate(codes: &[String], out: &mut impl Write) -> anyhow::Result<Outcome> {
    let mut outcome = Outcome::Success;
    for code in codes {
        match validate_code(code) {
            Ok(_) => writeln!(out, "{code}\tvalid")?,
            Err(reason) => {
                debug!(%code, %reason, "Invalid code");
                writeln!(out, "{code}\tinvalid\t{reason}")?;
                outcome = Outcome::Invalid;
            }
        }
    }
    Ok(outcome)
}

fn inspect(code: &str, json: bool, out: &mut impl Write) -> anyhow::Result<Outcome> {
    let report = inspect_code(code);

    if json {
        let rendered = serde_json::to_string_pretty(&report).context("serializing report")?;
        writeln!(out, "{rendered}")?;
    } else {
        writeln!(out, "code:        {}", report.trimmed)?;
        writeln!(out, "valid:       {}", if report.valid { "yes" } else { "no" })?;
        if let (Some(prefix), Some(range)) = (&report.prefix, report.prefix_range) {
            writeln!(out, "prefix:      {prefix} ({range:?})")?;
        }
        if let (Some(expected), Some(found)) =
            (report.expected_check_digit, report.found_check_digit)
        {
            writeln!(out, "check digit: expected {expected}, found {found}")?;
        }
        if let Some(reason) = &report.reason {
            writeln!(out, "reason:      {reason}")?;
        }
    }

    Ok(if report.valid {
        Outcome::Success
    } else {
        Outcome::Invalid
    })
}

struct GenerateRequest {
    prefix: String,
    product_id: Option<i64>,
    count: usize,
    overflow: OverflowPolicy,
}

fn generate<R: Rng>(
    generator: CodeGenerator<R>,
    request: &GenerateRequest,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    let mut generator = generator.overflow_policy(request.overflow);

    for offset in 0..request.count {
        let product_id = match request.product_id {
            Some(first) => Some(
                i64::try_from(offset)
                    .ok()
                    .and_then(|offset| first.checked_add(offset))
                    .context("product id overflowed")?,
            ),
            None => None,
        };
        let code = generator.generate(&request.prefix, product_id)?;
        writeln!(out, "{code}")?;
    }

    info!(
        count = request.count,
        prefix = %request.prefix,
        "Generated codes"
    );
    Ok(Outcome::Success)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> (anyhow::Result<Outcome>, String) {
        let cli = CommandLine::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        let result = run(cli.command, &CliConfig::default(), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_check_digit() {
        let (result, out) = run_args(&["gtin", "check-digit", "400638133393"]);
        assert_eq!(result.unwrap(), Outcome::Success);
        assert_eq!(out, "1\n");
    }

    #[test]
    fn test_check_digit_malformed() {
        let (result, out) = run_args(&["gtin", "check-digit", "12345"]);
        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_validate_mixed() {
        let (result, out) = run_args(&["gtin", "validate", "4006381333931", "4006381333932"]);
        assert_eq!(result.unwrap(), Outcome::Invalid);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "4006381333931\tvalid");
        assert!(lines[1].starts_with("4006381333932\tinvalid"));
    }

    #[test]
    fn test_validate_requires_codes() {
        assert!(CommandLine::try_parse_from(["gtin", "validate"]).is_err());
    }

    #[test]
    fn test_inspect_json() {
        let (result, out) = run_args(&["gtin", "inspect", "--json", "2000000000428"]);
        assert_eq!(result.unwrap(), Outcome::Success);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["prefix_range"], "restricted_circulation");
        assert_eq!(json["expected_check_digit"], 8);
    }

    #[test]
    fn test_inspect_human() {
        let (result, out) = run_args(&["gtin", "i", "4006381333932"]);
        assert_eq!(result.unwrap(), Outcome::Invalid);
        assert!(out.contains("valid:       no"));
        assert!(out.contains("check digit: expected 1, found 2"));
    }

    #[test]
    fn test_generate_sequential_ids() {
        let (result, out) = run_args(&["gtin", "generate", "--product-id", "42", "-n", "3"]);
        assert_eq!(result.unwrap(), Outcome::Success);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "2000000000428");
        assert!(lines[1].starts_with("200000000043"));
        assert!(lines[2].starts_with("200000000044"));
    }

    #[test]
    fn test_generate_seeded_is_reproducible() {
        let args = ["gtin", "g", "--prefix", "299", "--seed", "5", "-n", "4"];
        let (_, first) = run_args(&args);
        let (_, second) = run_args(&args);
        assert_eq!(first, second);
        assert!(first.lines().all(|line| line.starts_with("299")));
    }

    #[test]
    fn test_generate_negative_id_fails() {
        let (result, _) = run_args(&["gtin", "generate", "--product-id", "-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_generate_truncate_flag() {
        let (result, _) = run_args(&["gtin", "generate", "--product-id", "1234567890"]);
        assert!(result.is_err());

        let (result, out) =
            run_args(&["gtin", "generate", "--product-id", "1234567890", "--truncate"]);
        assert_eq!(result.unwrap(), Outcome::Success);
        assert!(out.starts_with("200123456789"));
    }

    #[test]
    fn test_generate_count_bounds() {
        let (result, _) = run_args(&["gtin", "generate", "-n", "0"]);
        assert!(result.is_err());
        let (result, _) = run_args(&["gtin", "generate", "-n", "10001"]);
        assert!(result.is_err());
    }
}
