//! Run configuration: built-in defaults, optional config file, CLI flags.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use reviewers_core::sheet::{DEFAULT_SHEET_URL, DEFAULT_SKIP_ROWS};
use url::Url;

use crate::cli::Args;

const APP_DIR: &str = "reviewers";
const DEFAULT_RULES_DIR: &str = "rules";
const DEFAULT_OUTPUT_DIR: &str = "output";
const MAX_SKIP_ROWS: usize = 100;

/// `key = value` file configuration for run defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FileConfig {
    /// Export URL of the reviewer sheet.
    pub sheet_url: Option<String>,
    /// Directory the downloaded sheet is cached in.
    pub cache_dir: Option<PathBuf>,
    /// Directory holding the JSON rule tables.
    pub rules_dir: Option<PathBuf>,
    /// Directory the exports are written to.
    pub output_dir: Option<PathBuf>,
    /// Header rows above the data.
    pub skip_rows: Option<usize>,
}

impl FileConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(url) = &self.sheet_url
            && !Url::parse(url).is_ok_and(|parsed| matches!(parsed.scheme(), "http" | "https"))
        {
            bail!("Invalid config value for `sheet_url`: {url}. Expected an http(s) URL");
        }
        if let Some(skip_rows) = self.skip_rows
            && skip_rows > MAX_SKIP_ROWS
        {
            bail!(
                "Invalid config value for `skip_rows`: {skip_rows}. Expected range: 0..={MAX_SKIP_ROWS}"
            );
        }
        Ok(())
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PipelineConfig {
    pub sheet_url: String,
    pub cache_dir: PathBuf,
    pub rules_dir: PathBuf,
    pub output_dir: PathBuf,
    pub skip_rows: usize,
    pub force: bool,
    /// Local workbook that replaces the fetch entirely.
    pub input: Option<PathBuf>,
}

impl PipelineConfig {
    /// Layers CLI flags over the file config over built-in defaults.
    pub(crate) fn resolve(args: &Args, file: Option<&FileConfig>) -> Self {
        let file = file.cloned().unwrap_or_default();
        Self {
            sheet_url: args
                .sheet_url
                .clone()
                .or(file.sheet_url)
                .unwrap_or_else(|| DEFAULT_SHEET_URL.to_string()),
            cache_dir: args
                .cache_dir
                .clone()
                .or(file.cache_dir)
                .unwrap_or_else(default_cache_dir),
            rules_dir: args
                .rules_dir
                .clone()
                .or(file.rules_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RULES_DIR)),
            output_dir: args
                .output_dir
                .clone()
                .or(file.output_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            skip_rows: file.skip_rows.unwrap_or(DEFAULT_SKIP_ROWS),
            force: args.force,
            input: args.input.clone(),
        }
    }
}

/// Resolves the default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/reviewers/config.toml`
/// 2. `$HOME/.config/reviewers/config.toml`
pub(crate) fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config_home).join(APP_DIR).join("config.toml"));
    }
    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join("config.toml"),
    )
}

/// `$XDG_CACHE_HOME/reviewers`, else `$HOME/.cache/reviewers`, else
/// `.cache/reviewers` under the working directory.
pub(crate) fn default_cache_dir() -> PathBuf {
    if let Some(xdg_cache_home) = env_var_non_empty_os("XDG_CACHE_HOME") {
        return PathBuf::from(xdg_cache_home).join(APP_DIR);
    }
    match env_var_non_empty_os("HOME") {
        Some(home) => PathBuf::from(home).join(".cache").join(APP_DIR),
        None => PathBuf::from(".cache").join(APP_DIR),
    }
}

fn env_var_non_empty_os(name: &str) -> Option<OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads the config file from the default path when it exists.
pub(crate) fn load_default_file_config() -> Result<Option<FileConfig>> {
    let Some(path) = resolve_default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    load_file_config(&path).map(Some)
}

pub(crate) fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!(
                "Invalid config syntax on line {}: expected key = value",
                line_index + 1
            );
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let line_no = line_index + 1;

        match key {
            "sheet_url" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `sheet_url` value on line {line_no}"))?;
                cfg.sheet_url = Some(parsed);
            }
            "cache_dir" | "rules_dir" | "output_dir" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `{key}` value on line {line_no}"))?;
                let path = Some(PathBuf::from(parsed));
                match key {
                    "cache_dir" => cfg.cache_dir = path,
                    "rules_dir" => cfg.rules_dir = path,
                    _ => cfg.output_dir = path,
                }
            }
            "skip_rows" => {
                let parsed = parse_count(value)
                    .with_context(|| format!("Invalid `skip_rows` value on line {line_no}"))?;
                cfg.skip_rows = Some(parsed);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_count(raw_value: &str) -> Result<usize> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i64>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    usize::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range"))
}
