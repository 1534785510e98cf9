mod config;

use config::SemverConfig;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use composer_semver::{Comparator, Semver, VersionParser};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "semver")]
#[command(about = "Normalize, compare and match Composer versions")]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file, or directory to search for semver.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Fail on versions that cannot be normalized instead of skipping them
    #[arg(long, global = true)]
    strict: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the normalized form of each version
    Normalize {
        #[arg(required = true)]
        versions: Vec<String>,
    },

    /// Print the stability of each version
    Stability {
        #[arg(required = true)]
        versions: Vec<String>,
    },

    /// Parse a constraint and print its label and parsed form
    Parse { constraint: String },

    /// Check whether a version satisfies a constraint (exit code 1 if not)
    Satisfies { version: String, constraint: String },

    /// Print the versions that satisfy a constraint
    Filter {
        constraint: String,
        versions: Vec<String>,
    },

    /// Sort versions, oldest first
    Sort {
        /// Reverse the configured sort direction
        #[arg(short, long)]
        reverse: bool,

        versions: Vec<String>,
    },

    /// Compare two versions with an operator (exit code 1 if false)
    Compare {
        version1: String,
        operator: String,
        version2: String,
    },
}

/// Effective settings after merging semver.toml with command line flags
#[derive(Debug, Default, Clone, Copy)]
struct Options {
    strict: bool,
    descending: bool,
}

impl Options {
    fn new(args: &Args, config: &SemverConfig) -> Self {
        Options {
            strict: args.strict || config.strict,
            descending: config.sort.descending,
        }
    }
}

fn execute(command: Commands, options: Options, out: &mut impl Write) -> Result<i32> {
    let parser = VersionParser::new();

    match command {
        Commands::Normalize { versions } => {
            for version in &versions {
                let normalized = parser
                    .normalize(version)
                    .with_context(|| format!("failed to normalize \"{}\"", version))?;
                writeln!(out, "{}", normalized)?;
            }
            Ok(0)
        }

        Commands::Stability { versions } => {
            for version in &versions {
                writeln!(out, "{}", VersionParser::parse_stability(version))?;
            }
            Ok(0)
        }

        Commands::Parse { constraint } => {
            let parsed = parser
                .parse_constraints(&constraint)
                .with_context(|| format!("failed to parse constraint \"{}\"", constraint))?;
            writeln!(out, "{}", parsed.pretty_string())?;
            writeln!(out, "{}", parsed)?;
            Ok(0)
        }

        Commands::Satisfies { version, constraint } => {
            let satisfied = if options.strict {
                Semver::try_satisfies(&version, &constraint)
                    .with_context(|| format!("cannot check \"{}\" against \"{}\"", version, constraint))?
            } else {
                Semver::satisfies(&version, &constraint)
            };
            writeln!(out, "{}", satisfied)?;
            Ok(if satisfied { 0 } else { 1 })
        }

        Commands::Filter { constraint, versions } => {
            parser
                .parse_constraints(&constraint)
                .with_context(|| format!("failed to parse constraint \"{}\"", constraint))?;
            if options.strict {
                check_versions(&parser, &versions)?;
            }

            for version in Semver::satisfied_by(&versions, &constraint) {
                writeln!(out, "{}", version)?;
            }
            Ok(0)
        }

        Commands::Sort { reverse, versions } => {
            if options.strict {
                check_versions(&parser, &versions)?;
            }

            let sorted = if options.descending != reverse {
                Semver::rsort(&versions)
            } else {
                Semver::sort(&versions)
            };
            for version in sorted {
                writeln!(out, "{}", version)?;
            }
            Ok(0)
        }

        Commands::Compare {
            version1,
            operator,
            version2,
        } => {
            let result = Comparator::compare(&version1, &operator, &version2)
                .with_context(|| format!("cannot compare \"{}\" {} \"{}\"", version1, operator, version2))?;
            writeln!(out, "{}", result)?;
            Ok(if result { 0 } else { 1 })
        }
    }
}

/// Fail on the first version that does not normalize
fn check_versions(parser: &VersionParser, versions: &[String]) -> Result<()> {
    for version in versions {
        parser
            .normalize(version)
            .with_context(|| format!("failed to normalize \"{}\"", version))?;
    }
    Ok(())
}

fn run() -> Result<i32> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SemverConfig::load_path(path)?,
        None => SemverConfig::load_from_cwd()?,
    }
    .unwrap_or_default();

    let default_filter = config.log_level.clone().unwrap_or_else(|| "warn".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let options = Options::new(&args, &config);
    log::debug!("running {:?} with {:?}", args.command, options);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(args.command, options, &mut out)
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(argv: &[&str], options: Options) -> (Result<i32>, String) {
        let args = Args::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        let result = execute(args.command, options, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    fn run_ok(argv: &[&str]) -> (i32, String) {
        let (result, output) = run_args(argv, Options::default());
        (result.unwrap(), output)
    }

    #[test]
    fn test_normalize_command() {
        let (code, output) = run_ok(&["semver", "normalize", "1.0", "v2.1.0-beta.2", "dev-master"]);
        assert_eq!(code, 0);
        assert_eq!(output, "1.0.0.0\n2.1.0.0-beta2\n9999999-dev\n");
    }

    #[test]
    fn test_normalize_command_fails_on_invalid_version() {
        let (result, _) = run_args(&["semver", "normalize", "1.0.0-meh"], Options::default());
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "failed to normalize \"1.0.0-meh\"");
        assert_eq!(err.root_cause().to_string(), "Invalid version string \"1.0.0-meh\"");
    }

    #[test]
    fn test_stability_command() {
        let (_, output) = run_ok(&["semver", "stability", "1.0", "2.0-RC1", "dev-foo"]);
        assert_eq!(output, "stable\nRC\ndev\n");
    }

    #[test]
    fn test_parse_command() {
        let (_, output) = run_ok(&["semver", "parse", "^1.2 || 3.*"]);
        assert_eq!(output, "^1.2 || 3.*\n[[>= 1.2.0.0-dev < 2.0.0.0-dev] || [>= 3.0.0.0-dev < 4.0.0.0-dev]]\n");
    }

    #[test]
    fn test_satisfies_command_exit_codes() {
        assert_eq!(run_ok(&["semver", "satisfies", "1.2.3", "^1.2"]), (0, "true\n".to_string()));
        assert_eq!(run_ok(&["semver", "satisfies", "2.0.0", "^1.2"]), (1, "false\n".to_string()));
        assert_eq!(run_ok(&["semver", "satisfies", "garbage", "*"]), (1, "false\n".to_string()));
    }

    #[test]
    fn test_satisfies_command_strict() {
        let strict = Options {
            strict: true,
            ..Options::default()
        };
        let (result, _) = run_args(&["semver", "satisfies", "garbage", "*"], strict);
        assert!(result.is_err());
    }

    #[test]
    fn test_filter_command() {
        let (_, output) = run_ok(&["semver", "filter", "^0.2.0", "0.1.1", "0.2.0", "0.2.1", "0.3.0"]);
        assert_eq!(output, "0.2.0\n0.2.1\n");

        let (result, _) = run_args(&["semver", "filter", "~>1.0", "1.0"], Options::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_sort_command() {
        let (_, output) = run_ok(&["semver", "sort", "1.0", "0.1", "2.4.0-alpha", "2.4.0"]);
        assert_eq!(output, "0.1\n1.0\n2.4.0-alpha\n2.4.0\n");

        let (_, output) = run_ok(&["semver", "sort", "--reverse", "1.0", "0.1", "2.4.0"]);
        assert_eq!(output, "2.4.0\n1.0\n0.1\n");
    }

    #[test]
    fn test_sort_command_uses_configured_direction() {
        let descending = Options {
            descending: true,
            ..Options::default()
        };
        let (_, output) = run_args(&["semver", "sort", "1.0", "2.0"], descending);
        assert_eq!(output, "2.0\n1.0\n");

        let (_, output) = run_args(&["semver", "sort", "-r", "1.0", "2.0"], descending);
        assert_eq!(output, "1.0\n2.0\n");
    }

    #[test]
    fn test_sort_command_strict_rejects_invalid_versions() {
        let (_, output) = run_ok(&["semver", "sort", "2.0", "nope", "1.0"]);
        assert_eq!(output, "1.0\n2.0\n");

        let strict = Options {
            strict: true,
            ..Options::default()
        };
        let (result, output) = run_args(&["semver", "sort", "2.0", "nope", "1.0"], strict);
        assert!(result.is_err());
        assert!(output.is_empty());
    }

    #[test]
    fn test_compare_command() {
        assert_eq!(run_ok(&["semver", "compare", "1.25.0", ">", "1.24.0"]), (0, "true\n".to_string()));
        assert_eq!(run_ok(&["semver", "compare", "1.0.0", "<>", "1.0.0"]), (1, "false\n".to_string()));

        let (result, _) = run_args(&["semver", "compare", "1.0", "~", "1.0"], Options::default());
        let err = result.unwrap_err();
        assert!(err.root_cause().to_string().starts_with("Invalid operator \"~\""));
    }

    #[test]
    fn test_options_merge_flags_over_config() {
        let config: SemverConfig = toml::from_str("[sort]\ndescending = true\n").unwrap();
        let args = Args::try_parse_from(["semver", "--strict", "sort", "1.0"]).unwrap();
        let options = Options::new(&args, &config);
        assert!(options.strict);
        assert!(options.descending);
    }
}
