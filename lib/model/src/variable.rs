use std::fmt::{Display, Formatter};
use thiserror::Error;

/// A query variable.
///
/// *Distinguished* variables are user-visible and may appear in the results of a query.
/// Non-distinguished variables are synthesized by the algebra (e.g., for anonymous nodes in a
/// pattern or the inner joins of a property path) and are never part of an output binding.
///
/// Non-distinguished variables are rendered with a doubled question mark (`??name`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable {
    name: String,
    distinguished: bool,
}

impl Variable {
    /// Creates a new distinguished variable, validating the name.
    pub fn new(name: impl Into<String>) -> Result<Self, VariableNameParseError> {
        let name = name.into();
        validate_variable_name(&name)?;
        Ok(Self {
            name,
            distinguished: true,
        })
    }

    /// Creates a new distinguished variable without validating the name.
    pub fn new_unchecked(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            distinguished: true,
        }
    }

    /// Creates a new non-distinguished variable without validating the name.
    pub fn non_distinguished(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            distinguished: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_distinguished(&self) -> bool {
        self.distinguished
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.distinguished {
            write!(f, "?{}", self.name)
        } else {
            write!(f, "??{}", self.name)
        }
    }
}

/// An error raised for an invalid variable name.
#[derive(Debug, Error)]
#[error("The variable name '{0}' is invalid.")]
pub struct VariableNameParseError(String);

fn validate_variable_name(name: &str) -> Result<(), VariableNameParseError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_');
    if valid_start && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
        Ok(())
    } else {
        Err(VariableNameParseError(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_marks_non_distinguished_variables() {
        assert_eq!(Variable::new_unchecked("s").to_string(), "?s");
        assert_eq!(Variable::non_distinguished("b0").to_string(), "??b0");
    }

    #[test]
    fn flag_is_part_of_identity() {
        assert_ne!(
            Variable::new_unchecked("x"),
            Variable::non_distinguished("x")
        );
    }

    #[test]
    fn rejects_invalid_names() {
        assert!(Variable::new("").is_err());
        assert!(Variable::new("a b").is_err());
        assert!(Variable::new("count_1").is_ok());
    }
}
