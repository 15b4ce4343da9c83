use crate::views::comparison::Slot;

/// Words the shell treats as commands. Anything else is plain text.
pub const COMMANDS: &[&str] = &[
    "/go", "/back", "/refresh", "/file", "/upload", "/delete", "/scope", "/pick", "/compare",
    "/regen", "/clear", "/help", "/quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(String),
    Back,
    Refresh,
    File(String),
    Upload(Option<String>),
    Delete(String),
    /// `None` = all documents.
    Scope(Option<String>),
    Pick(Slot, Option<String>),
    Compare,
    Regen,
    Clear,
    Help,
    Quit,
    /// A chat message, or a path dropped onto the terminal.
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Uso: {0}")]
    Usage(&'static str),
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        let command = match word {
            "/go" => Command::Go(arg.ok_or(CommandError::Usage("/go <ruta>"))?),
            "/back" => Command::Back,
            "/refresh" => Command::Refresh,
            "/file" => Command::File(arg.ok_or(CommandError::Usage("/file <ruta del PDF>"))?),
            "/upload" => Command::Upload(arg),
            "/delete" => Command::Delete(arg.ok_or(CommandError::Usage("/delete <nombre>"))?),
            "/scope" => Command::Scope(arg.filter(|a| a != "all" && a != "-")),
            "/pick" => parse_pick(rest)?,
            "/compare" => Command::Compare,
            "/regen" => Command::Regen,
            "/clear" => Command::Clear,
            "/help" | "/?" => Command::Help,
            "/quit" | "/exit" => Command::Quit,
            _ => Command::Text(line.to_string()),
        };
        Ok(command)
    }
}

fn parse_pick(rest: &str) -> Result<Command, CommandError> {
    const USAGE: &str = "/pick 1|2 <nombre> (o - para vaciar)";
    let (slot, name) = match rest.split_once(char::is_whitespace) {
        Some((slot, name)) => (slot, name.trim()),
        None => (rest, ""),
    };
    let slot = match slot {
        "1" => Slot::First,
        "2" => Slot::Second,
        _ => return Err(CommandError::Usage(USAGE)),
    };
    let name = match name {
        "" => return Err(CommandError::Usage(USAGE)),
        "-" => None,
        name => Some(name.to_string()),
    };
    Ok(Command::Pick(slot, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_with_arguments() {
        assert_eq!(
            Command::parse("/go /summary/a.pdf").unwrap(),
            Command::Go("/summary/a.pdf".into())
        );
        assert_eq!(
            Command::parse("/delete  informe final.pdf ").unwrap(),
            Command::Delete("informe final.pdf".into())
        );
        assert_eq!(Command::parse("/upload").unwrap(), Command::Upload(None));
        assert_eq!(
            Command::parse("/upload a.pdf").unwrap(),
            Command::Upload(Some("a.pdf".into()))
        );
    }

    #[test]
    fn test_scope_all() {
        assert_eq!(Command::parse("/scope all").unwrap(), Command::Scope(None));
        assert_eq!(Command::parse("/scope").unwrap(), Command::Scope(None));
        assert_eq!(
            Command::parse("/scope a.pdf").unwrap(),
            Command::Scope(Some("a.pdf".into()))
        );
    }

    #[test]
    fn test_pick() {
        assert_eq!(
            Command::parse("/pick 2 b c.pdf").unwrap(),
            Command::Pick(Slot::Second, Some("b c.pdf".into()))
        );
        assert_eq!(
            Command::parse("/pick 1 -").unwrap(),
            Command::Pick(Slot::First, None)
        );
        assert!(Command::parse("/pick 3 a.pdf").is_err());
        assert!(Command::parse("/pick 1").is_err());
    }

    #[test]
    fn test_missing_arguments() {
        assert_eq!(
            Command::parse("/go"),
            Err(CommandError::Usage("/go <ruta>"))
        );
        assert!(Command::parse("/delete").is_err());
        assert!(Command::parse("/file").is_err());
    }

    #[test]
    fn test_everything_else_is_text() {
        assert_eq!(
            Command::parse("¿De qué trata el informe?").unwrap(),
            Command::Text("¿De qué trata el informe?".into())
        );
        // dropped absolute paths are not commands
        assert_eq!(
            Command::parse("/home/ana/Descargas/tesis.pdf").unwrap(),
            Command::Text("/home/ana/Descargas/tesis.pdf".into())
        );
    }
}
