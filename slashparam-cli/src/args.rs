//! Command line options for the slashparam driver.
//!
//! The driver's own flags use the usual `--flag` syntax; everything after
//! them is treated as `/label:value` tokens for the declared parameters.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context};
use clap::Parser;

/// Command line arguments for the slashparam CLI
#[derive(Parser, Debug)]
#[command(author, version, about = "Parse /label:value parameters against declared types")]
pub struct CliOptions {
    /// Program name shown in the usage message
    #[arg(long, default_value = "slashparam")]
    pub program: String,

    /// Declare a parameter as LABEL:TYPE[:DEFAULT]
    /// (TYPE is Int32, Int64, UInt32, Double, Boolean or String)
    #[arg(long = "declare", value_name = "LABEL:TYPE[:DEFAULT]")]
    pub declarations: Vec<String>,

    /// Mark a declared parameter as required
    #[arg(long = "require", value_name = "LABEL")]
    pub required: Vec<String>,

    /// Describe a declared parameter as LABEL=TEXT
    #[arg(long = "describe", value_name = "LABEL=TEXT")]
    pub descriptions: Vec<String>,

    /// Give a declared parameter a friendly name as LABEL=TEXT
    #[arg(long = "name", value_name = "LABEL=TEXT")]
    pub friendly_names: Vec<String>,

    /// Fail on tokens whose label was never declared
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Print the usage message instead of parsing tokens
    #[arg(long, default_value_t = false)]
    pub usage: bool,

    /// Output the parameter status as raw JSON
    #[arg(long, default_value_t = false)]
    pub raw: bool,

    /// Enable verbose debug output
    #[arg(long, default_value_t = false, conflicts_with = "quiet")]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Tokens to parse, each in /label:value form
    #[arg(trailing_var_arg = true, value_name = "TOKENS")]
    pub tokens: Vec<String>,
}

/// Value types a parameter can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int32,
    Int64,
    UInt32,
    Double,
    Boolean,
    String,
}

impl ValueKind {
    /// Name shown in the usage synopsis.
    pub fn type_name(self) -> &'static str {
        match self {
            ValueKind::Int32 => "Int32",
            ValueKind::Int64 => "Int64",
            ValueKind::UInt32 => "UInt32",
            ValueKind::Double => "Double",
            ValueKind::Boolean => "Boolean",
            ValueKind::String => "String",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl FromStr for ValueKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "int32" | "int" | "i32" => Ok(ValueKind::Int32),
            "int64" | "long" | "i64" => Ok(ValueKind::Int64),
            "uint32" | "uint" | "u32" => Ok(ValueKind::UInt32),
            "double" | "float" | "f64" => Ok(ValueKind::Double),
            "boolean" | "bool" => Ok(ValueKind::Boolean),
            "string" | "str" => Ok(ValueKind::String),
            _ => Err(anyhow!(
                "Unknown value type: '{}'. Valid types: Int32, Int64, UInt32, Double, Boolean, String",
                s
            )),
        }
    }
}

/// A parameter declared on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub label: String,
    pub kind: ValueKind,
    pub default: Option<String>,
    pub required: bool,
    pub description: Option<String>,
    pub friendly_name: Option<String>,
}

impl FromStr for Declaration {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let label = parts.next().unwrap_or_default();
        let kind = parts
            .next()
            .ok_or_else(|| anyhow!("Declaration '{}' is missing a type, expected LABEL:TYPE[:DEFAULT]", s))?
            .parse()?;

        Ok(Declaration {
            label: label.to_string(),
            kind,
            default: parts.next().map(str::to_string),
            required: false,
            description: None,
            friendly_name: None,
        })
    }
}

/// Selects what the driver prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Status,
    Usage,
    Json,
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Quiet,
    Normal,
    Debug,
}

/// Validated options the driver runs with.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub program: String,
    pub declarations: Vec<Declaration>,
    pub strict: bool,
    pub output: OutputMode,
    pub log_level: LogLevel,
    pub tokens: Vec<String>,
}

impl CliOptions {
    /// Convert CLI options to RunOptions
    pub fn into_run_options(self) -> anyhow::Result<RunOptions> {
        let mut declarations = self
            .declarations
            .iter()
            .map(|d| d.parse::<Declaration>())
            .collect::<anyhow::Result<Vec<_>>>()?;

        for label in &self.required {
            find_declaration(&mut declarations, label)?.required = true;
        }
        for entry in &self.descriptions {
            let (label, text) = split_assignment(entry, "--describe")?;
            find_declaration(&mut declarations, label)?.description = Some(text.to_string());
        }
        for entry in &self.friendly_names {
            let (label, text) = split_assignment(entry, "--name")?;
            find_declaration(&mut declarations, label)?.friendly_name = Some(text.to_string());
        }

        let output = if self.usage {
            OutputMode::Usage
        } else if self.raw {
            OutputMode::Json
        } else {
            OutputMode::Status
        };

        let log_level = if self.debug {
            LogLevel::Debug
        } else if self.quiet {
            LogLevel::Quiet
        } else {
            LogLevel::Normal
        };

        Ok(RunOptions {
            program: self.program,
            declarations,
            strict: self.strict,
            output,
            log_level,
            tokens: self.tokens,
        })
    }
}

fn find_declaration<'a>(
    declarations: &'a mut [Declaration],
    label: &str,
) -> anyhow::Result<&'a mut Declaration> {
    declarations
        .iter_mut()
        .find(|d| d.label == label)
        .with_context(|| format!("Parameter '{}' has not been declared", label))
}

fn split_assignment<'a>(entry: &'a str, flag: &str) -> anyhow::Result<(&'a str, &'a str)> {
    match entry.split_once('=') {
        Some((label, text)) => Ok((label, text)),
        None => bail!("{} expects LABEL=TEXT, got '{}'", flag, entry),
    }
}
