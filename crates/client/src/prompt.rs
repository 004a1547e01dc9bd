//! Interactive prompts.
//!
//! Handlers talk to the operator through the [`Prompter`] trait so the
//! flows can run against scripted answers in tests.

use dialoguer::{theme::ColorfulTheme, Input, Password, Select};
use nvl_core::prompt::{FieldDescriptor, FieldFormat};
use nvl_core::UserDraft;

use crate::error::Result;

/// One entry of a selection menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub value: String,
}

/// Source of operator answers.
pub trait Prompter: Send + Sync {
    /// Ask for a single value. Implementations honor `masked`, `default`
    /// and `format` on the descriptor.
    fn input(&self, field: &FieldDescriptor) -> Result<String>;

    /// Ask the operator to pick one entry; returns the chosen `value`.
    fn select(&self, message: &str, choices: &[Choice]) -> Result<String>;
}

/// Prompter backed by the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&self, field: &FieldDescriptor) -> Result<String> {
        let theme = ColorfulTheme::default();

        if field.masked {
            let password = Password::with_theme(&theme)
                .with_prompt(field.message)
                .allow_empty_password(true)
                .interact()?;
            return Ok(password);
        }

        let mut input = Input::<String>::with_theme(&theme)
            .with_prompt(field.message)
            .allow_empty(true);
        if let Some(default) = &field.default {
            input = input.default(default.clone());
        }
        if field.format == Some(FieldFormat::Url) {
            input = input.validate_with(|value: &String| validate_url(value));
        }

        Ok(input.interact_text()?)
    }

    fn select(&self, message: &str, choices: &[Choice]) -> Result<String> {
        let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .items(&labels)
            .default(0)
            .interact()?;

        Ok(choices[index].value.clone())
    }
}

/// Blank answers pass; anything else must parse as an absolute URL.
pub fn validate_url(value: &str) -> std::result::Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|e| format!("Invalid URL: {e}"))
}

/// Collects answers for every descriptor.
///
/// A descriptor with a supplied value is answered without prompting. Blank
/// answers fall back to the default; fields left blank with no default are
/// omitted from the result.
pub fn collect_answers(prompter: &dyn Prompter, fields: &[FieldDescriptor]) -> Result<UserDraft> {
    let mut answers = UserDraft::default();

    for field in fields {
        let raw = match &field.value {
            Some(value) => value.clone(),
            None => prompter.input(field)?,
        };
        let answer = if field.trim {
            raw.trim().to_string()
        } else {
            raw
        };
        let answer = match (answer.is_empty(), &field.default) {
            (true, Some(default)) => default.clone(),
            _ => answer,
        };

        tracing::debug!(
            field = field.name(),
            supplied = field.value.is_some(),
            "collected answer"
        );

        if !answer.is_empty() {
            answers.set(field.field, answer);
        }
    }

    Ok(answers)
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedPrompter;
    use super::*;
    use nvl_core::prompt::{register_fields, update_fields};
    use nvl_core::{User, UserField};

    #[test]
    fn test_supplied_values_skip_prompting() {
        let mut supplied = UserDraft::default();
        supplied.set(UserField::Name, "Ada");
        supplied.set(UserField::Email, "a@x.com");
        let prompter = ScriptedPrompter::new();

        let answers = collect_answers(&prompter, &register_fields(&supplied)).unwrap();

        let asked = prompter.asked_fields();
        assert!(!asked.contains(&UserField::Name));
        assert!(!asked.contains(&UserField::Email));
        assert!(asked.contains(&UserField::Password));
        assert_eq!(answers.get(UserField::Name), Some("Ada"));
        assert_eq!(answers.get(UserField::Email), Some("a@x.com"));
    }

    #[test]
    fn test_answers_are_trimmed() {
        let prompter = ScriptedPrompter::new().answer(UserField::Nickname, "  countess  ");

        let answers = collect_answers(&prompter, &register_fields(&UserDraft::default())).unwrap();

        assert_eq!(answers.get(UserField::Nickname), Some("countess"));
    }

    #[test]
    fn test_password_is_not_trimmed() {
        let prompter = ScriptedPrompter::new().answer(UserField::Password, " pass phrase ");

        let answers = collect_answers(&prompter, &register_fields(&UserDraft::default())).unwrap();

        assert_eq!(answers.get(UserField::Password), Some(" pass phrase "));
    }

    #[test]
    fn test_blank_answers_are_omitted() {
        let prompter = ScriptedPrompter::new();

        let answers = collect_answers(&prompter, &register_fields(&UserDraft::default())).unwrap();

        assert!(answers.is_empty());
    }

    #[test]
    fn test_blank_answer_keeps_default() {
        let current = User::new("u1").with_name("Ada");
        let prompter = ScriptedPrompter::new().answer(UserField::Name, "   ");

        let answers = collect_answers(&prompter, &update_fields(&UserDraft::default(), &current))
            .unwrap();

        assert_eq!(answers.get(UserField::Name), Some("Ada"));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("").is_ok());
        assert!(validate_url("https://example.com/me").is_ok());
        assert!(validate_url(" https://example.com ").is_ok());
        assert!(validate_url("example.com").is_err());
    }
}
