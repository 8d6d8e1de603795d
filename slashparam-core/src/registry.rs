//! Registry of declared parameters.
//!
//! The registry owns every parameter in registration order, applies raw
//! `/label:value` tokens to them and renders the status and usage messages
//! shown to the user.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use tracing::debug;

use crate::error::{ParameterError, Result};
use crate::parameter::{validate_label, Parameter, TypedParameter};
use crate::token::parse_token;
use crate::wrap::wrap;

/// Width that usage messages are wrapped to.
pub const USAGE_WIDTH: usize = 80;

/// Typed reference to a parameter owned by a [`ParameterRegistry`].
pub struct ParameterHandle<P> {
    index: usize,
    _marker: PhantomData<fn() -> P>,
}

impl<P> Clone for ParameterHandle<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for ParameterHandle<P> {}

impl<P> fmt::Debug for ParameterHandle<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterHandle")
            .field("index", &self.index)
            .finish()
    }
}

/// Snapshot of a single parameter, for machine-readable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterStatus {
    pub label: String,
    pub friendly_name: String,
    pub value_type: String,
    pub value: String,
    pub default_value: String,
    pub is_default: bool,
    pub required: bool,
}

/// Manages the parameters used by a program.
#[derive(Default)]
pub struct ParameterRegistry {
    parameters: Vec<Box<dyn Parameter>>,
    throw_on_unregistered_parameter: bool,
}

impl ParameterRegistry {
    /// Create an empty registry that skips unregistered tokens.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn throw_on_unregistered_parameter(&self) -> bool {
        self.throw_on_unregistered_parameter
    }

    /// When set, tokens naming an unknown label fail with
    /// [`ParameterError::UnregisteredParameter`] instead of being skipped.
    pub fn set_throw_on_unregistered_parameter(&mut self, throw: bool) {
        self.throw_on_unregistered_parameter = throw;
    }

    /// Register a parameter and get back a handle to read it later.
    pub fn register_parameter<P: Parameter>(&mut self, parameter: P) -> Result<ParameterHandle<P>> {
        let index = self.parameters.len();
        self.register_boxed(Box::new(parameter))?;

        Ok(ParameterHandle {
            index,
            _marker: PhantomData,
        })
    }

    /// Register a parameter whose concrete type is not known statically.
    pub fn register_boxed(&mut self, parameter: Box<dyn Parameter>) -> Result<()> {
        validate_label(parameter.label())?;
        if self.find(parameter.label()).is_some() {
            return Err(ParameterError::DuplicateLabel(parameter.label().to_string()));
        }

        debug!(
            label = parameter.label(),
            value_type = parameter.value_type_name(),
            "Registered parameter"
        );
        self.parameters.push(parameter);
        Ok(())
    }

    pub fn get<P: Parameter>(&self, handle: &ParameterHandle<P>) -> Option<&P> {
        let parameter: &dyn Any = self.parameters.get(handle.index)?.as_any();
        parameter.downcast_ref::<P>()
    }

    pub fn get_mut<P: Parameter>(&mut self, handle: &ParameterHandle<P>) -> Option<&mut P> {
        let parameter: &mut dyn Any = self.parameters.get_mut(handle.index)?.as_any_mut();
        parameter.downcast_mut::<P>()
    }

    /// Look up a parameter by its exact label.
    pub fn find(&self, label: &str) -> Option<&dyn Parameter> {
        self.parameters
            .iter()
            .find(|p| p.label() == label)
            .map(|p| &**p)
    }

    /// Current value of the [`TypedParameter<T>`] registered under `label`.
    pub fn value<T>(&self, label: &str) -> Option<&T>
    where
        T: Clone + fmt::Display + Send + 'static,
    {
        self.find(label)?
            .as_any()
            .downcast_ref::<TypedParameter<T>>()
            .map(TypedParameter::value)
    }

    /// Parameters in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Parameter> {
        self.parameters.iter().map(|p| &**p)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Apply raw `/label:value` tokens, left to right.
    ///
    /// Stops at the first bad token. Parameters set by earlier tokens keep
    /// their new values.
    pub fn process_parameters<I, S>(&mut self, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for raw in tokens {
            let raw = raw.as_ref();
            let token = parse_token(raw)?;

            let Some(parameter) = self
                .parameters
                .iter_mut()
                .find(|p| p.label() == token.label)
            else {
                if self.throw_on_unregistered_parameter {
                    return Err(ParameterError::UnregisteredParameter(token.label.to_string()));
                }
                debug!(token = raw, "Skipping unregistered parameter");
                continue;
            };

            parameter
                .parse_value(token.value)
                .map_err(|source| ParameterError::ParameterParse {
                    label: token.label.to_string(),
                    token: raw.to_string(),
                    source,
                })?;
            debug!(label = token.label, value = token.value, "Parameter value set");
        }

        Ok(())
    }

    /// One `name : value` line per parameter, names padded to a common width.
    pub fn generate_status_message(&self) -> Result<String> {
        let name_width = self
            .parameters
            .iter()
            .map(|p| p.friendly_name().chars().count())
            .max()
            .ok_or(ParameterError::EmptyRegistry)?;

        let mut message = String::new();
        for p in &self.parameters {
            message.push_str(&format!(
                "{:<name_width$} : {}\n",
                p.friendly_name(),
                p.current_value_text()
            ));
        }
        message.push('\n');

        Ok(message)
    }

    /// Usage synopsis followed by one described entry per parameter.
    pub fn generate_usage_message(&self, program_name: &str) -> Result<String> {
        let label_width = self
            .parameters
            .iter()
            .map(|p| p.label().chars().count())
            .max()
            .ok_or(ParameterError::EmptyRegistry)?;

        let mut message = String::from("Command Line Usage : \n");

        let required = self
            .parameters
            .iter()
            .filter(|p| p.is_required())
            .map(|p| format!("/{}:{}", p.label(), p.value_type_name()))
            .collect::<Vec<_>>()
            .join(" ");
        let optional = self
            .parameters
            .iter()
            .filter(|p| !p.is_required())
            .map(|p| format!("[/{}:{}]", p.label(), p.value_type_name()))
            .collect::<Vec<_>>()
            .join(" ");
        let synopsis = [program_name, required.as_str(), optional.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let name_len = program_name.chars().count();
        let synopsis_width = USAGE_WIDTH.saturating_sub(name_len + 2);
        for (i, line) in wrap(&synopsis, synopsis_width).enumerate() {
            let indent = if i == 0 { 0 } else { name_len + 1 };
            message.push_str(&format!("{:indent$}{}\n", "", line));
        }

        let indent = 5 + label_width + 3;
        let detail_width = USAGE_WIDTH.saturating_sub(indent + 1);
        for p in &self.parameters {
            let mut text = p.description().to_string();
            if !p.is_required() {
                text.push_str(" Default : ");
                text.push_str(&p.default_value_text());
            }

            for (i, line) in wrap(&text, detail_width).enumerate() {
                if i == 0 {
                    message.push_str(&format!("    /{:<label_width$} : {}\n", p.label(), line));
                } else {
                    message.push_str(&format!("{:indent$}{}\n", "", line));
                }
            }
        }
        message.push('\n');

        Ok(message)
    }

    /// Serializable snapshot of every parameter, in registration order.
    pub fn status_report(&self) -> Vec<ParameterStatus> {
        self.parameters
            .iter()
            .map(|p| ParameterStatus {
                label: p.label().to_string(),
                friendly_name: p.friendly_name().to_string(),
                value_type: p.value_type_name().to_string(),
                value: p.current_value_text(),
                default_value: p.default_value_text(),
                is_default: p.is_default_value(),
                required: p.is_required(),
            })
            .collect()
    }
}

impl fmt::Debug for ParameterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterRegistry")
            .field("labels", &self.iter().map(|p| p.label()).collect::<Vec<_>>())
            .field(
                "throw_on_unregistered_parameter",
                &self.throw_on_unregistered_parameter,
            )
            .finish()
    }
}
