use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use super::command::COMMANDS;

/// Commands whose argument is a document name.
const NAME_COMMANDS: &[&str] = &["/delete", "/scope", "/pick 1", "/pick 2"];

/// Completes commands and, after the commands that take one, document names
/// of the current view.
#[derive(Clone, Default)]
pub struct CommandHelper {
    documents: Vec<String>,
}

impl CommandHelper {
    pub fn set_documents(&mut self, documents: Vec<String>) {
        self.documents = documents;
    }

    fn name_candidates(&self, line: &str) -> Option<(usize, Vec<Pair>)> {
        NAME_COMMANDS.iter().find_map(|cmd| {
            let partial = line.strip_prefix(cmd)?.strip_prefix(' ')?;
            let start = line.len() - partial.len();
            let pairs = self
                .documents
                .iter()
                .filter(|doc| doc.starts_with(partial))
                .map(|doc| Pair {
                    display: doc.clone(),
                    replacement: doc.clone(),
                })
                .collect();
            Some((start, pairs))
        })
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if let Some(found) = self.name_candidates(line) {
            return Ok(found);
        }

        if line.starts_with('/') && !line.contains(' ') {
            let candidates = COMMANDS
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.to_string(),
                    replacement: cmd.to_string(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let word = line.split_whitespace().next().unwrap_or("");
        if COMMANDS.contains(&word) {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            COMMANDS
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CommandHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_names_after_delete() {
        let mut helper = CommandHelper::default();
        helper.set_documents(vec!["alpha.pdf".into(), "beta.pdf".into(), "alto.pdf".into()]);

        let (start, pairs) = helper.name_candidates("/delete al").unwrap();
        assert_eq!(start, 8);
        let names: Vec<_> = pairs.into_iter().map(|p| p.replacement).collect();
        assert_eq!(names, vec!["alpha.pdf", "alto.pdf"]);
    }

    #[test]
    fn test_pick_slot_names() {
        let mut helper = CommandHelper::default();
        helper.set_documents(vec!["b.pdf".into()]);

        let (start, pairs) = helper.name_candidates("/pick 2 ").unwrap();
        assert_eq!(start, 8);
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn test_no_names_for_other_commands() {
        let helper = CommandHelper::default();
        assert!(helper.name_candidates("/go /sum").is_none());
    }
}
