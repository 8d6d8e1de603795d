//! Builds a registry from declarations and renders the requested output.

use std::fmt;
use std::str::FromStr;

use anyhow::Context;
use slashparam_core::{ParameterRegistry, TypedParameter};
use tracing::debug;

use crate::args::{Declaration, OutputMode, RunOptions, ValueKind};

/// Register every declared parameter, in declaration order.
pub fn build_registry(options: &RunOptions) -> anyhow::Result<ParameterRegistry> {
    let mut registry = ParameterRegistry::new();
    registry.set_throw_on_unregistered_parameter(options.strict);

    for declaration in &options.declarations {
        match declaration.kind {
            ValueKind::Int32 => register::<i32>(&mut registry, declaration)?,
            ValueKind::Int64 => register::<i64>(&mut registry, declaration)?,
            ValueKind::UInt32 => register::<u32>(&mut registry, declaration)?,
            ValueKind::Double => register::<f64>(&mut registry, declaration)?,
            ValueKind::Boolean => register::<bool>(&mut registry, declaration)?,
            ValueKind::String => register::<String>(&mut registry, declaration)?,
        }
    }

    debug!(count = registry.len(), "Declared parameters registered");
    Ok(registry)
}

fn register<T>(registry: &mut ParameterRegistry, declaration: &Declaration) -> anyhow::Result<()>
where
    T: FromStr + Default + Clone + fmt::Display + Send + 'static,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let default = match &declaration.default {
        Some(raw) => raw.parse::<T>().with_context(|| {
            format!(
                "Invalid default '{}' for parameter '{}' of type {}",
                raw, declaration.label, declaration.kind
            )
        })?,
        None => T::default(),
    };

    let mut builder = TypedParameter::builder(declaration.label.clone(), default)
        .parser(|raw: &str| raw.parse::<T>())
        .value_type_name(declaration.kind.type_name())
        .required(declaration.required);
    if let Some(description) = &declaration.description {
        builder = builder.description(description.clone());
    }
    if let Some(name) = &declaration.friendly_name {
        builder = builder.friendly_name(name.clone());
    }

    registry.register_parameter(builder.build()?)?;
    Ok(())
}

/// Apply the tokens and render the selected output.
///
/// Token errors keep their [`slashparam_core::ParameterError`] type so the caller can show the
/// usage message alongside them.
pub fn render(registry: &mut ParameterRegistry, options: &RunOptions) -> anyhow::Result<String> {
    if options.output == OutputMode::Usage {
        return Ok(registry.generate_usage_message(&options.program)?);
    }

    registry.process_parameters(&options.tokens)?;

    let output = match options.output {
        OutputMode::Json => serde_json::to_string_pretty(&registry.status_report())? + "\n",
        _ => registry.generate_status_message()?,
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::LogLevel;
    use slashparam_core::ParameterError;

    fn declaration(spec: &str) -> Declaration {
        spec.parse().unwrap()
    }

    fn options(declarations: Vec<Declaration>, tokens: &[&str], output: OutputMode) -> RunOptions {
        RunOptions {
            program: "demo".to_string(),
            declarations,
            strict: false,
            output,
            log_level: LogLevel::Normal,
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn declarations_become_typed_parameters() {
        let opts = options(
            vec![declaration("n:Int32:4"), declaration("ratio:Double"), declaration("on:Boolean")],
            &[],
            OutputMode::Status,
        );
        let registry = build_registry(&opts).unwrap();

        assert_eq!(registry.value::<i32>("n"), Some(&4));
        assert_eq!(registry.value::<f64>("ratio"), Some(&0.0));
        assert_eq!(registry.value::<bool>("on"), Some(&false));
        assert_eq!(registry.find("n").unwrap().value_type_name(), "Int32");
    }

    #[test]
    fn invalid_default_is_reported() {
        let opts = options(vec![declaration("n:UInt32:-1")], &[], OutputMode::Status);
        let err = build_registry(&opts).unwrap_err();
        assert!(err.to_string().contains("Invalid default '-1' for parameter 'n'"));
    }

    #[test]
    fn duplicate_declarations_fail() {
        let opts = options(
            vec![declaration("n:Int32"), declaration("n:String")],
            &[],
            OutputMode::Status,
        );
        let err = build_registry(&opts).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ParameterError>(),
            Some(ParameterError::DuplicateLabel(_))
        ));
    }

    #[test]
    fn status_output_reflects_tokens() {
        let opts = options(
            vec![declaration("name:String:anon"), declaration("n:Int64:1")],
            &["/n:42"],
            OutputMode::Status,
        );
        let mut registry = build_registry(&opts).unwrap();

        let output = render(&mut registry, &opts).unwrap();
        assert_eq!(output, "name : anon\nn    : 42\n\n");
    }

    #[test]
    fn json_output_lists_every_parameter() {
        let opts = options(vec![declaration("n:Int32:1")], &["/n:2"], OutputMode::Json);
        let mut registry = build_registry(&opts).unwrap();

        let output = render(&mut registry, &opts).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json[0]["label"], "n");
        assert_eq!(json[0]["value"], "2");
        assert_eq!(json[0]["value_type"], "Int32");
    }

    #[test]
    fn usage_mode_ignores_tokens() {
        let opts = options(vec![declaration("n:Int32:1")], &["not-a-token"], OutputMode::Usage);
        let mut registry = build_registry(&opts).unwrap();

        let output = render(&mut registry, &opts).unwrap();
        assert!(output.starts_with("Command Line Usage : \ndemo [/n:Int32]\n"));
    }

    #[test]
    fn token_errors_surface_as_parameter_errors() {
        let opts = options(vec![declaration("n:Int32")], &["/n:x"], OutputMode::Status);
        let mut registry = build_registry(&opts).unwrap();

        let err = render(&mut registry, &opts).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ParameterError>(),
            Some(ParameterError::ParameterParse { .. })
        ));
    }
}
