//! Lifecycle CLI for the route registry: draft, validate, publish.
//!
//! `draft` reserves a version slot under `registry/next/` and seeds it with
//! the canonical schema plus a starter data file; `validate` checks every
//! draft against its bundled schema; `publish` promotes a draft into the
//! immutable published store. Summaries go to stdout, diagnostics to stderr.

use anyhow::{Context, Result, anyhow, bail};
use opr_registry::lifecycle::{DraftRequest, create_draft, publish_draft, validate_drafts};
use opr_registry::{IslandGroup, Version, find_repo_root, logging};
use std::env;
use std::ffi::OsString;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    logging::init();
    let mut args = env::args_os();
    let _program = args.next();

    let Some(command_os) = args.next() else {
        usage(1);
    };
    let command = command_os
        .to_str()
        .with_context(|| "Invalid UTF-8 in command")?;

    match command {
        "draft" | "d" => run_draft(args),
        "validate" | "v" => run_validate(args),
        "publish" | "pub" | "p" => run_publish(args),
        "--help" | "-h" | "help" => usage(0),
        other => {
            eprintln!("unknown command: {other}\n");
            usage(1);
        }
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: opr <command> [args]\n\nCommands:\n  draft, d     Create a draft version: --version N --island-group NAME --region-code NN\n               --province NAME --city NAME [--overwrite]\n  validate, v  Validate every draft version against its bundled schema.\n  publish, p   Publish a draft version: publish <N>. Published versions are immutable.\n\nExamples:\n  opr draft --version 1 --island-group Visayas --region-code 06 --province Iloilo --city \"Iloilo City\"\n  opr validate\n  opr publish 1"
    );
    std::process::exit(code);
}

fn run_draft(mut args: env::ArgsOs) -> Result<()> {
    let mut version = None;
    let mut island_group = None;
    let mut region_code = None;
    let mut province = None;
    let mut city = None;
    let mut overwrite = false;

    while let Some(arg_os) = args.next() {
        let arg = arg_os
            .to_str()
            .with_context(|| "Invalid UTF-8 in argument")?;
        match arg {
            "--version" => {
                let value = next_value(&mut args, "--version")?;
                version = Some(Version::from_digits(&value).ok_or_else(|| {
                    anyhow!("--version must be a non-negative integer, e.g. 0, 1, 42")
                })?);
            }
            "--island-group" => {
                let value = next_value(&mut args, "--island-group")?;
                island_group = Some(IslandGroup::from_arg(&value).ok_or_else(|| {
                    anyhow!("--island-group must be Luzon, Visayas, or Mindanao")
                })?);
            }
            "--region-code" => region_code = Some(next_value(&mut args, "--region-code")?),
            "--province" => province = Some(next_value(&mut args, "--province")?),
            "--city" => city = Some(next_value(&mut args, "--city")?),
            "--overwrite" => overwrite = true,
            "--help" | "-h" => usage(0),
            other => bail!("unknown draft argument: {other}"),
        }
    }

    let request = DraftRequest {
        version: version.ok_or_else(|| anyhow!("--version is required"))?,
        island_group: island_group.ok_or_else(|| anyhow!("--island-group is required"))?,
        region_code: region_code.ok_or_else(|| anyhow!("--region-code is required"))?,
        province: province.ok_or_else(|| anyhow!("--province is required"))?,
        city: city.ok_or_else(|| anyhow!("--city is required"))?,
        overwrite,
    };

    let repo_root = find_repo_root()?;
    let outcome = create_draft(&repo_root, &request)?;

    if outcome.fell_back {
        println!(
            "version {} is already published; using free slot {}",
            request.version.dir_name(),
            outcome.version.dir_name()
        );
    }
    println!(
        "created draft {} at {}",
        outcome.version.dir_name(),
        outcome.dir.display()
    );
    println!("  schema: {}", outcome.schema_file);
    println!("  data:   {}", outcome.data_file);
    println!(
        "edit the data file, run `opr validate`, then `opr publish {}`",
        outcome.version
    );
    Ok(())
}

fn run_validate(mut args: env::ArgsOs) -> Result<()> {
    if let Some(arg) = args.next() {
        if matches!(arg.to_str(), Some("--help") | Some("-h")) {
            usage(0);
        }
        bail!("validate takes no arguments");
    }

    let repo_root = find_repo_root()?;
    let report = validate_drafts(&repo_root)?;

    if report.versions.is_empty() {
        println!("no drafts to validate");
        return Ok(());
    }

    for version in &report.versions {
        if version.is_clean() {
            println!(
                "{}: {} file(s) valid",
                version.version.dir_name(),
                version.data_files
            );
        } else {
            println!("{}: INVALID", version.version.dir_name());
            for problem in &version.problems {
                println!("  {problem}");
            }
        }
    }

    if report.is_clean() {
        println!("all drafts valid");
        Ok(())
    } else {
        bail!(
            "validation failed: {} problem(s) across {} draft version(s)",
            report.problem_count(),
            report.versions.len()
        )
    }
}

fn run_publish(mut args: env::ArgsOs) -> Result<()> {
    let Some(version_os) = args.next() else {
        bail!("publish requires a version number, e.g. `opr publish 1`");
    };
    let version_arg = version_os
        .to_str()
        .with_context(|| "Invalid UTF-8 in version argument")?;
    if matches!(version_arg, "--help" | "-h") {
        usage(0);
    }
    let version = Version::from_digits(version_arg)
        .ok_or_else(|| anyhow!("version must be a non-negative integer, e.g. 0, 1, 42"))?;
    if let Some(extra) = args.next() {
        bail!("unexpected argument: {}", extra.to_string_lossy());
    }

    let repo_root = find_repo_root()?;
    let outcome = publish_draft(&repo_root, version)?;

    println!(
        "published {} ({} file(s))",
        outcome.version.dir_name(),
        outcome.files_copied
    );
    println!("  source: {}", outcome.source.display());
    println!("  target: {}", outcome.target.display());
    Ok(())
}

fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String> {
    let value = args
        .next()
        .ok_or_else(|| anyhow!("{flag} requires a value"))?;
    let value = value
        .into_string()
        .map_err(|_| anyhow!("{flag} must be valid UTF-8"))?;
    if value.is_empty() {
        bail!("{flag} must not be empty");
    }
    Ok(value)
}
