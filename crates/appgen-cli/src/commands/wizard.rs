//! Interactive model wizard.
//!
//! Asks the questions, feeds every answer into the core
//! [`PropertyWizard`] and re-asks whenever an answer is rejected with a
//! recoverable error. Nothing here validates on its own; the core decides.

use appgen_core::{
    application::{ModelDraft, ModelService},
    domain::SpecificationRecord,
};

use crate::{
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Run the wizard and return a validated record.
#[cfg(feature = "interactive")]
pub fn run(
    service: &ModelService,
    default_namespace: &str,
    output: &OutputManager,
) -> CliResult<SpecificationRecord> {
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() {
        return Err(CliError::invalid_input(
            "the model wizard needs an interactive terminal; pass --spec <FILE> instead",
        ));
    }
    prompts::Session::new(service, output).run(default_namespace)
}

#[cfg(not(feature = "interactive"))]
pub fn run(
    _service: &ModelService,
    _default_namespace: &str,
    _output: &OutputManager,
) -> CliResult<SpecificationRecord> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

/// What "define another property?" meant.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Continue {
    Yes,
    No,
    /// Neither yes nor no: the answer is the next property name.
    Named(String),
}

fn parse_continue(answer: &str) -> Continue {
    let trimmed = answer.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" | "y" | "yes" => Continue::Yes,
        "n" | "no" => Continue::No,
        _ => Continue::Named(trimmed.to_string()),
    }
}

/// Split a comma list, dropping blanks.
fn split_list(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Names in `requested` that are not declared properties.
fn unknown_fields<'a>(requested: &'a [String], declared: &[&str]) -> Vec<&'a str> {
    requested
        .iter()
        .map(String::as_str)
        .filter(|name| !declared.contains(name))
        .collect()
}

/// Confirm prompt for one configured trait. Traits are opt-out.
fn trait_question(identifier: &str) -> (String, bool) {
    (format!("Use trait {identifier}?"), true)
}

fn finish(service: &ModelService, draft: ModelDraft) -> CliResult<SpecificationRecord> {
    Ok(service.finish(draft)?)
}

#[cfg(feature = "interactive")]
mod prompts {
    use dialoguer::{Confirm, Input, theme::ColorfulTheme};

    use appgen_core::{
        application::{ModelDraft, ModelService, PropertyWizard, WizardInput, WizardState},
        domain::{Cascade, SpecificationRecord},
        error::AppGenError,
    };

    use super::{Continue, finish, parse_continue, split_list, trait_question, unknown_fields};
    use crate::{error::CliResult, output::OutputManager};

    pub(super) struct Session<'a> {
        service: &'a ModelService,
        output: &'a OutputManager,
        theme: ColorfulTheme,
    }

    impl<'a> Session<'a> {
        pub(super) fn new(service: &'a ModelService, output: &'a OutputManager) -> Self {
            Self {
                service,
                output,
                theme: ColorfulTheme::default(),
            }
        }

        pub(super) fn run(&self, default_namespace: &str) -> CliResult<SpecificationRecord> {
            let entity = self.text("Entity name", None)?;
            let namespace = self.text(
                "Namespace",
                Some(format!("{}\\{}", default_namespace.trim_end_matches('\\'), entity)),
            )?;

            let mut draft = ModelDraft::new(namespace, entity);
            if self.confirm("Define entity properties?", true)? {
                draft.properties = self.properties(&draft.namespace, &draft.entity)?;
            }

            draft.features.data_factory = self.confirm("Generate a data factory?", true)?;
            draft.features.edit = self.confirm("Generate edit and getData?", true)?;
            draft.features.get_all = self.confirm("Generate getAll?", true)?;
            draft.features.delete = self.confirm("Generate delete?", true)?;

            let declared: Vec<&str> = draft.properties.iter().map(|p| p.name()).collect();
            draft.get_by = self.lookups("getBy fields (comma separated)", &declared)?;
            draft.get_all_by = self.lookups("getAllBy fields (comma separated)", &declared)?;
            draft.events = split_list(&self.optional_text(
                "Events (created, updated, deleted or all; comma separated)",
            )?);

            for identifier in self.service.settings().default_traits.keys() {
                let (prompt, default) = trait_question(identifier);
                if self.confirm(&prompt, default)? {
                    draft.traits.push(identifier.clone());
                }
            }

            finish(self.service, draft)
        }

        fn properties(
            &self,
            namespace: &str,
            entity: &str,
        ) -> CliResult<Vec<appgen_core::domain::PropertyDescriptor>> {
            let mut wizard = PropertyWizard::new(self.service, namespace, entity);
            let mut next_name: Option<String> = None;

            while !wizard.is_done() {
                let input = match wizard.state() {
                    WizardState::AwaitingName => match next_name.take() {
                        Some(name) => WizardInput::Name(name),
                        None => WizardInput::Name(self.text("Property name", None)?),
                    },
                    WizardState::AwaitingType { name } => WizardInput::Type(
                        self.text(&format!("Type of '{name}'"), Some("string".into()))?,
                    ),
                    WizardState::AwaitingDefault { name, .. } => WizardInput::Default(
                        self.optional_text(&format!("Default value of '{name}'"))?,
                    ),
                    WizardState::AwaitingRelationKind { target, .. } => WizardInput::RelationKind(
                        self.text(
                            &format!("Relation to {target} (1:1, M:1, 1:M, N:M)"),
                            Some("M:1".into()),
                        )?,
                    ),
                    WizardState::AwaitingRelationOptions { .. } => {
                        let bidirectional = self.confirm("Bidirectional?", false)?;
                        let cascade = Cascade::from_answer(&self.text(
                            "Cascade (persist, remove, all or no)",
                            Some("no".into()),
                        )?);
                        let on_delete_cascade = wizard.accepts_on_delete()
                            && self.confirm("Cascade deletes in the database?", false)?;
                        WizardInput::RelationOptions {
                            bidirectional,
                            cascade,
                            on_delete_cascade,
                        }
                    }
                    WizardState::Done => break,
                };

                match wizard.advance(input) {
                    Ok(Some(property)) => {
                        self.output.success(&format!(
                            "Added {} {}",
                            property.name(),
                            property.raw_expression()
                        ))?;
                        match parse_continue(&self.optional_text_default(
                            "Define another property? (yes, no or a property name)",
                            "yes",
                        )?) {
                            Continue::Yes => {}
                            Continue::Named(name) => next_name = Some(name),
                            Continue::No => {
                                wizard.advance(WizardInput::Finish)?;
                            }
                        }
                    }
                    Ok(None) => {}
                    Err(err) => self.recover(err)?,
                }
            }

            Ok(wizard.into_properties())
        }

        fn lookups(&self, prompt: &str, declared: &[&str]) -> CliResult<Vec<String>> {
            loop {
                let fields = split_list(&self.optional_text(prompt)?);
                let unknown = unknown_fields(&fields, declared);
                if unknown.is_empty() {
                    return Ok(fields);
                }
                self.output
                    .warning(&format!("Unknown property: {}", unknown.join(", ")))?;
            }
        }

        /// Show a rejected answer and keep asking, or give up on fatal errors.
        fn recover(&self, err: AppGenError) -> CliResult<()> {
            if !err.is_recoverable() {
                return Err(err.into());
            }
            self.output.warning(&err.to_string())?;
            for suggestion in err.suggestions() {
                self.output.info(&suggestion)?;
            }
            Ok(())
        }

        fn text(&self, prompt: &str, default: Option<String>) -> CliResult<String> {
            let mut input = Input::<String>::with_theme(&self.theme).with_prompt(prompt);
            if let Some(default) = default {
                input = input.default(default);
            }
            Ok(input.interact_text()?.trim().to_string())
        }

        fn optional_text(&self, prompt: &str) -> CliResult<String> {
            Ok(Input::<String>::with_theme(&self.theme)
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()?)
        }

        fn optional_text_default(&self, prompt: &str, default: &str) -> CliResult<String> {
            Ok(Input::<String>::with_theme(&self.theme)
                .with_prompt(prompt)
                .default(default.to_string())
                .allow_empty(true)
                .interact_text()?)
        }

        fn confirm(&self, prompt: &str, default: bool) -> CliResult<bool> {
            Ok(Confirm::with_theme(&self.theme)
                .with_prompt(prompt)
                .default(default)
                .interact()?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continue_answers() {
        assert_eq!(parse_continue(""), Continue::Yes);
        assert_eq!(parse_continue(" Y "), Continue::Yes);
        assert_eq!(parse_continue("No"), Continue::No);
        assert_eq!(parse_continue("email"), Continue::Named("email".into()));
    }

    #[test]
    fn lists_drop_blanks() {
        assert_eq!(split_list(" email, ,name ,"), ["email", "name"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn unknown_fields_are_reported() {
        let requested = vec!["email".to_string(), "phone".to_string()];
        assert_eq!(unknown_fields(&requested, &["email", "name"]), ["phone"]);
        assert!(unknown_fields(&[], &["email"]).is_empty());
    }

    #[test]
    fn configured_traits_default_to_yes() {
        let (prompt, default) = trait_question("timestampable");
        assert_eq!(prompt, "Use trait timestampable?");
        assert!(default);
    }
}
