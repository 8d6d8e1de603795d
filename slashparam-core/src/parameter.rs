//! Typed parameters with deferred parsing.
//!
//! A [`TypedParameter`] holds a default value and a conversion function. The
//! value only changes when [`Parameter::parse_value`] is handed the raw text
//! from the command line. The object-safe [`Parameter`] trait lets a
//! registry keep parameters of different value types in one ordered list.

use std::any::Any;
use std::fmt;
use std::str::FromStr;

use crate::error::{ConversionError, ParameterError, Result};

type ParseFn<T> = Box<dyn Fn(&str) -> std::result::Result<T, ConversionError> + Send + Sync>;

/// Behaviour shared by every registered parameter, whatever its value type.
pub trait Parameter: Any + Send {
    /// Key used on the command line, the text between `/` and `:`.
    fn label(&self) -> &str;

    /// Display name used in status messages.
    fn friendly_name(&self) -> &str;

    /// Text shown next to the label in usage messages.
    fn description(&self) -> &str;

    fn is_required(&self) -> bool;

    /// Name of the value type shown in the usage synopsis.
    fn value_type_name(&self) -> &str;

    /// True until a parse has overwritten the default.
    fn is_default_value(&self) -> bool;

    /// Convert `raw` and store it as the current value.
    fn parse_value(&mut self, raw: &str) -> std::result::Result<(), ConversionError>;

    fn current_value_text(&self) -> String;

    fn default_value_text(&self) -> String;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A parameter holding a value of type `T`.
pub struct TypedParameter<T> {
    label: String,
    friendly_name: String,
    description: String,
    required: bool,
    value_type_name: String,
    default_value: T,
    current_value: T,
    is_default_value: bool,
    parse_fn: ParseFn<T>,
}

impl<T> TypedParameter<T>
where
    T: Clone + fmt::Display + Send + 'static,
{
    /// Create a parameter that converts raw text with `parse_fn`.
    ///
    /// Fails with [`ParameterError::InvalidLabel`] when `label` is empty or
    /// only whitespace.
    pub fn new<F, E>(label: impl Into<String>, default_value: T, parse_fn: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<T, E> + Send + Sync + 'static,
        E: Into<ConversionError>,
    {
        let label = label.into();
        validate_label(&label)?;

        Ok(Self {
            friendly_name: label.clone(),
            label,
            description: String::new(),
            required: false,
            value_type_name: short_type_name::<T>(),
            current_value: default_value.clone(),
            default_value,
            is_default_value: true,
            parse_fn: Box::new(move |raw: &str| -> std::result::Result<T, ConversionError> {
                parse_fn(raw).map_err(Into::into)
            }),
        })
    }

    /// Start building a parameter whose conversion function is supplied later.
    pub fn builder(label: impl Into<String>, default_value: T) -> ParameterBuilder<T> {
        ParameterBuilder {
            label: label.into(),
            default_value,
            parse_fn: None,
            friendly_name: None,
            description: String::new(),
            required: false,
            value_type_name: None,
        }
    }

    pub fn value(&self) -> &T {
        &self.current_value
    }

    pub fn default_value(&self) -> &T {
        &self.default_value
    }

    pub fn set_friendly_name(&mut self, name: impl Into<String>) {
        self.friendly_name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// Override the type name derived from `T`, e.g. to show `Int32` instead of `i32`.
    pub fn set_value_type_name(&mut self, name: impl Into<String>) {
        self.value_type_name = name.into();
    }
}

impl<T> TypedParameter<T>
where
    T: FromStr + Clone + fmt::Display + Send + 'static,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    /// Create a parameter that converts raw text with `T::from_str`.
    pub fn from_str_parser(label: impl Into<String>, default_value: T) -> Result<Self> {
        Self::new(label, default_value, |raw: &str| raw.parse::<T>())
    }
}

impl<T> Parameter for TypedParameter<T>
where
    T: Clone + fmt::Display + Send + 'static,
{
    fn label(&self) -> &str {
        &self.label
    }

    fn friendly_name(&self) -> &str {
        &self.friendly_name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn is_required(&self) -> bool {
        self.required
    }

    fn value_type_name(&self) -> &str {
        &self.value_type_name
    }

    fn is_default_value(&self) -> bool {
        self.is_default_value
    }

    fn parse_value(&mut self, raw: &str) -> std::result::Result<(), ConversionError> {
        self.current_value = (self.parse_fn)(raw)?;
        self.is_default_value = false;
        Ok(())
    }

    fn current_value_text(&self) -> String {
        self.current_value.to_string()
    }

    fn default_value_text(&self) -> String {
        self.default_value.to_string()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<T: fmt::Debug> fmt::Debug for TypedParameter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedParameter")
            .field("label", &self.label)
            .field("friendly_name", &self.friendly_name)
            .field("required", &self.required)
            .field("value_type_name", &self.value_type_name)
            .field("default_value", &self.default_value)
            .field("current_value", &self.current_value)
            .field("is_default_value", &self.is_default_value)
            .finish_non_exhaustive()
    }
}

/// Builder for [`TypedParameter`], created by [`TypedParameter::builder`].
pub struct ParameterBuilder<T> {
    label: String,
    default_value: T,
    parse_fn: Option<ParseFn<T>>,
    friendly_name: Option<String>,
    description: String,
    required: bool,
    value_type_name: Option<String>,
}

impl<T> ParameterBuilder<T>
where
    T: Clone + fmt::Display + Send + 'static,
{
    pub fn parser<F, E>(mut self, parse_fn: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<T, E> + Send + Sync + 'static,
        E: Into<ConversionError>,
    {
        self.parse_fn = Some(Box::new(
            move |raw: &str| -> std::result::Result<T, ConversionError> {
                parse_fn(raw).map_err(Into::into)
            },
        ));
        self
    }

    pub fn friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn value_type_name(mut self, name: impl Into<String>) -> Self {
        self.value_type_name = Some(name.into());
        self
    }

    /// Finish the parameter.
    ///
    /// Fails with [`ParameterError::InvalidLabel`] for a blank label and with
    /// [`ParameterError::InvalidArgument`] when no parser was given.
    pub fn build(self) -> Result<TypedParameter<T>> {
        validate_label(&self.label)?;
        let parse_fn = self
            .parse_fn
            .ok_or(ParameterError::InvalidArgument("parse function"))?;

        Ok(TypedParameter {
            friendly_name: self.friendly_name.unwrap_or_else(|| self.label.clone()),
            label: self.label,
            description: self.description,
            required: self.required,
            value_type_name: self.value_type_name.unwrap_or_else(short_type_name::<T>),
            current_value: self.default_value.clone(),
            default_value: self.default_value,
            is_default_value: true,
            parse_fn,
        })
    }
}

pub(crate) fn validate_label(label: &str) -> Result<()> {
    if label.trim().is_empty() {
        return Err(ParameterError::InvalidLabel(
            "Label must not be empty or whitespace".to_string(),
        ));
    }
    Ok(())
}

/// Last path segment of the type name, without generic arguments.
fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}
