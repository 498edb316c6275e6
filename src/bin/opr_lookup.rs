//! Point lookup over the loaded registry: `opr-lookup <vN> <city>`.
//!
//! Loads the version store once, resolves the version+city query, and prints
//! the full City record as JSON on stdout. Exit codes mirror the query
//! taxonomy: 2 for a malformed version token (bad request), 1 for a miss or
//! any other failure. The store root defaults to the environment-selected
//! tree (`OPR_ENV=production` serves published data, anything else serves
//! drafts) and can be overridden with `--data-root`.

use anyhow::{Context, Result, anyhow, bail};
use opr_registry::{DataEnv, RouteRegistry, find_city_routes, find_repo_root, logging};
use std::env;
use std::path::PathBuf;
use tracing::info;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    logging::init();
    let cli = Cli::parse()?;

    let data_root = match cli.data_root {
        Some(root) => root,
        None => {
            let repo_root = find_repo_root()?;
            let data_env = DataEnv::from_env();
            let root = data_env.data_root(&repo_root);
            info!(root = %root.display(), env = data_env.label(), "selected version store");
            root
        }
    };

    let registry = RouteRegistry::open(data_root);
    let snapshot = registry.snapshot();

    match find_city_routes(&snapshot, &cli.version, &cli.city) {
        Ok(record) => {
            println!("{}", serde_json::to_string_pretty(record)?);
            Ok(())
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(if err.is_bad_request() { 2 } else { 1 });
        }
    }
}

struct Cli {
    data_root: Option<PathBuf>,
    version: String,
    city: String,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os();
        let _program = args.next();
        let mut data_root = None;
        let mut positional = Vec::new();

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .to_str()
                .ok_or_else(|| anyhow!("invalid UTF-8 in argument"))?;
            match arg {
                "--data-root" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--data-root requires a value"))?;
                    let path = PathBuf::from(
                        value
                            .into_string()
                            .map_err(|_| anyhow!("--data-root must be valid UTF-8"))?,
                    );
                    if path.as_os_str().is_empty() {
                        bail!("--data-root must not be empty");
                    }
                    data_root = Some(path);
                }
                "--help" | "-h" => usage(0),
                other if other.starts_with("--") => bail!("unknown argument: {other}"),
                other => positional.push(other.to_string()),
            }
        }

        if positional.len() != 2 {
            usage(1);
        }
        let city = positional.pop().with_context(|| "missing city argument")?;
        let version = positional
            .pop()
            .with_context(|| "missing version argument")?;
        Ok(Self {
            data_root,
            version,
            city,
        })
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: opr-lookup [--data-root PATH] <version> <city>\n\nArguments:\n  version    Published version token, e.g. v1.\n  city       City or municipality name; case, spacing, and punctuation are ignored.\n\nOptions:\n  --data-root PATH   Read this version store instead of the environment-selected one.\n  --help             Show this help text.\n\nExit codes: 0 match printed, 1 not found, 2 malformed version token."
    );
    std::process::exit(code);
}
