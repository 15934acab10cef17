//! Argument rewriting and process launch for wrapped tools.

use crate::error::ApiError;
use crate::resolver::Resolver;
use crate::tooling::registry::{Injection, ToolSpec};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Config file assumed when the caller names none
pub const DEFAULT_CONFIG: &str = "pyproject.toml";

/// Tool arguments split around the config option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigArgs {
    pub pre: Vec<String>,
    pub flag: String,
    pub config: PathBuf,
    pub post: Vec<String>,
}

impl ConfigArgs {
    /// Arguments with the config option pointing at `path`
    pub fn rewritten(&self, path: &Path) -> Vec<String> {
        let mut args = self.pre.clone();
        args.push(self.flag.clone());
        args.push(path.to_string_lossy().into_owned());
        args.extend(self.post.iter().cloned());
        args
    }
}

/// Locate the config option in `args`.
///
/// `flags` are tried in order; both `--flag value` and `--flag=value` are
/// recognized. Without any of them the default config file is assumed and
/// the first flag is appended.
pub fn split_config_arg(args: &[String], flags: &[String]) -> Result<ConfigArgs, ApiError> {
    let Some(default_flag) = flags.first() else {
        return Err(ApiError::ConfigError("Tool defines no config flags".to_string()));
    };

    for flag in flags {
        let inline = format!("{}=", flag);
        for (index, arg) in args.iter().enumerate() {
            if arg == flag {
                let config = args.get(index + 1).ok_or_else(|| {
                    ApiError::ConfigError(format!("Missing value for {}", flag))
                })?;
                return Ok(ConfigArgs {
                    pre: args[..index].to_vec(),
                    flag: flag.clone(),
                    config: PathBuf::from(config),
                    post: args[index + 2..].to_vec(),
                });
            }
            if let Some(config) = arg.strip_prefix(&inline) {
                return Ok(ConfigArgs {
                    pre: args[..index].to_vec(),
                    flag: flag.clone(),
                    config: PathBuf::from(config),
                    post: args[index + 1..].to_vec(),
                });
            }
        }
    }

    Ok(ConfigArgs {
        pre: args.to_vec(),
        flag: default_flag.clone(),
        config: PathBuf::from(DEFAULT_CONFIG),
        post: Vec::new(),
    })
}

/// Resolve `config_path` and write the result next to it as `drytoml.*.toml`.
///
/// The file lives in the config's own directory so the tool's relative
/// lookups keep working; it is removed when the returned handle drops.
pub fn materialize(
    config_path: &Path,
    resolver: &mut Resolver<'_>,
) -> Result<NamedTempFile, ApiError> {
    let absolute = if config_path.is_absolute() {
        config_path.to_path_buf()
    } else {
        std::env::current_dir()?.join(config_path)
    };
    let document = resolver.resolve_file(&absolute)?;
    let text = toml::to_string(&document)?;

    let dir = absolute.parent().unwrap_or_else(|| Path::new("."));
    let mut file = tempfile::Builder::new()
        .prefix("drytoml.")
        .suffix(".toml")
        .tempfile_in(dir)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;

    debug!(config = %absolute.display(), resolved = %file.path().display(), "Materialized config");
    Ok(file)
}

/// Run `spec` with `args`, pointing it at a resolved copy of its config.
pub fn run(
    spec: &ToolSpec,
    args: &[String],
    resolver: &mut Resolver<'_>,
) -> Result<ExitStatus, ApiError> {
    let mut command = Command::new(&spec.program);

    let resolved = match &spec.injection {
        Injection::Flag(flags) => {
            let split = split_config_arg(args, flags)?;
            let resolved = materialize(&split.config, resolver)?;
            command.args(split.rewritten(resolved.path()));
            resolved
        }
        Injection::Env(vars) => {
            let config = vars
                .first()
                .and_then(std::env::var_os)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
            let resolved = materialize(&config, resolver)?;
            command.args(args);
            for var in vars {
                command.env(var, resolved.path());
            }
            resolved
        }
    };

    info!(tool = %spec.name, program = %spec.program, "Running wrapped tool");
    let status = command
        .status()
        .map_err(|e| ApiError::ToolFailed(format!("{}: {}", spec.program, e)))?;
    drop(resolved);
    Ok(status)
}
