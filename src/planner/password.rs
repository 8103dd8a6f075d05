//! Password action planning.

use crate::model::{PasswordOptions, PasswordSource, SecretString};
use crate::password::{self, PolicyError};

/// What happens to the stored password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordAction {
    /// A new value is generated from the desired options.
    Generate,
    /// The value already in the store is kept.
    Reuse,
    /// The caller's literal `PasswordInput` is written.
    AcceptInput,
}

impl PasswordAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PasswordAction::Generate => "generate",
            PasswordAction::Reuse => "reuse",
            PasswordAction::AcceptInput => "accept-input",
        }
    }
}

/// The chosen action together with the resolved value.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordPlan {
    pub action: PasswordAction,
    pub value: SecretString,
}

/// Decides how the password of a resource is resolved.
///
/// `previous_options` is the options of the previous state, `None` on
/// Create or when the previous state used `PasswordInput`. `existing_value` is
/// the value currently in the store.
///
/// | desired | previous options | same inputs | action |
/// |---|---|---|---|
/// | input | any | - | accept input |
/// | options | none | - | generate |
/// | options | some | yes | reuse |
/// | options | some | no | generate |
///
/// Reuse needs an existing value; without one the planner generates.
pub fn plan_password(
    desired: &PasswordSource,
    previous_options: Option<&PasswordOptions>,
    existing_value: Option<&SecretString>,
) -> Result<PasswordPlan, PolicyError> {
    match desired {
        PasswordSource::Input(input) => {
            Ok(PasswordPlan { action: PasswordAction::AcceptInput, value: input.clone() })
        }
        PasswordSource::Options(options) => {
            password::validate(options)?;

            let unchanged =
                previous_options.is_some_and(|previous| options.same_generation_inputs(previous));
            match (unchanged, existing_value) {
                (true, Some(existing)) => {
                    Ok(PasswordPlan { action: PasswordAction::Reuse, value: existing.clone() })
                }
                _ => Ok(PasswordPlan {
                    action: PasswordAction::Generate,
                    value: password::generate(options)?,
                }),
            }
        }
    }
}
