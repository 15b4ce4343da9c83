//! Line-oriented front-end: one mounted view per route, re-rendered after
//! every command.

pub mod command;
pub mod helper;
pub mod render;

use std::sync::Arc;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use crate::api::DocumentApi;
use crate::model::DocumentRef;
use crate::router::Route;
use crate::upload::dropped_path;
use crate::views::ActiveView;
use command::Command;
use helper::CommandHelper;

const PROMPT: &str = "› ";
const UNAVAILABLE: &str = "Ese comando no está disponible en esta vista (/help)";

struct Page {
    route: Route,
    view: ActiveView,
}

enum Flow {
    Stay,
    Navigate(Route),
    Back,
    Quit,
}

pub struct Shell {
    api: Arc<dyn DocumentApi>,
    editor: Editor<CommandHelper, DefaultHistory>,
}

impl Shell {
    pub fn new(api: Arc<dyn DocumentApi>) -> anyhow::Result<Self> {
        let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(CommandHelper::default()));
        Ok(Self { api, editor })
    }

    async fn open(&self, route: Route) -> Page {
        let mut view = ActiveView::for_route(&route, Arc::clone(&self.api));
        println!("{}", "Cargando...".dimmed());
        view.mount().await;
        Page { route, view }
    }

    pub async fn run(&mut self, start: Route) -> anyhow::Result<()> {
        let mut page = self.open(start).await;
        let mut visited: Vec<Route> = Vec::new();

        loop {
            self.show(&mut page);

            let line = match self.editor.readline(PROMPT) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => {
                    page.view.teardown();
                    return Err(e.into());
                }
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let _ = self.editor.add_history_entry(line);

            let command = match Command::parse(line) {
                Ok(command) => command,
                Err(e) => {
                    notice(&e.to_string());
                    continue;
                }
            };

            match self.execute(command, &mut page).await? {
                Flow::Stay => {}
                Flow::Navigate(route) => {
                    page.view.teardown();
                    visited.push(page.route.clone());
                    page = self.open(route).await;
                }
                Flow::Back => match visited.pop() {
                    Some(previous) => {
                        page.view.teardown();
                        page = self.open(previous).await;
                    }
                    None => notice("No hay vista anterior"),
                },
                Flow::Quit => break,
            }
        }

        page.view.teardown();
        Ok(())
    }

    fn show(&mut self, page: &mut Page) {
        let show_transcript = match &mut page.view {
            ActiveView::Chat(chat) => chat.take_scroll_request(),
            _ => false,
        };
        println!();
        print!("{}", render::screen(&page.route, &page.view, show_transcript));

        if let Some(helper) = self.editor.helper_mut() {
            helper.set_documents(document_names(&page.view));
        }
    }

    fn confirm(&mut self, question: &str) -> anyhow::Result<bool> {
        match self.editor.readline(&format!("{question} [s/N] ")) {
            Ok(answer) => Ok(matches!(answer.trim(), "s" | "S" | "si" | "sí" | "y")),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn execute(&mut self, command: Command, page: &mut Page) -> anyhow::Result<Flow> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Back => return Ok(Flow::Back),
            Command::Help => println!("{}", render::help()),
            Command::Go(target) => match Route::parse(&target) {
                Ok(route) => return Ok(Flow::Navigate(route)),
                Err(e) => notice(&e.to_string()),
            },
            Command::Refresh => page.view.mount().await,
            other => self.dispatch(other, &mut page.view).await?,
        }
        Ok(Flow::Stay)
    }

    /// Commands that only make sense inside a particular view.
    async fn dispatch(&mut self, command: Command, view: &mut ActiveView) -> anyhow::Result<()> {
        match (view, command) {
            (ActiveView::Registry(home), Command::File(raw) | Command::Text(raw)) => {
                home.select_file(&dropped_path(&raw));
            }
            (ActiveView::Registry(home), Command::Upload(raw)) => {
                if let Some(raw) = raw {
                    if !home.select_file(&dropped_path(&raw)) {
                        return Ok(());
                    }
                }
                progress("Subiendo...");
                home.upload().await;
            }
            (ActiveView::Registry(home), Command::Delete(name)) => {
                let question = format!("¿Estás seguro de que quieres eliminar \"{name}\"?");
                if self.confirm(&question)? {
                    home.delete(&DocumentRef::from(name)).await;
                }
            }
            (ActiveView::Chat(chat), Command::Text(text)) => {
                progress("Enviando...");
                chat.send(&text).await;
            }
            (ActiveView::Chat(chat), Command::Scope(scope)) => {
                chat.set_scope(scope.map(DocumentRef::from));
            }
            (ActiveView::Chat(chat), Command::Clear) => {
                if !chat.transcript().is_empty()
                    && self.confirm("¿Estás seguro de que quieres limpiar el historial del chat?")?
                {
                    chat.clear();
                }
            }
            (ActiveView::Summary(summary), Command::Regen) => {
                progress("Generando resumen...");
                summary.regenerate().await;
            }
            (ActiveView::Classification(classification), Command::Regen) => {
                progress("Clasificando...");
                classification.regenerate().await;
            }
            (ActiveView::Comparison(compare), Command::Pick(slot, name)) => {
                compare.pick(slot, name.map(DocumentRef::from));
            }
            (ActiveView::Comparison(compare), Command::Compare) => {
                progress("Comparando...");
                compare.submit().await;
            }
            (_, Command::Text(_)) => notice("Escribe /help para ver los comandos"),
            _ => notice(UNAVAILABLE),
        }
        Ok(())
    }
}

fn document_names(view: &ActiveView) -> Vec<String> {
    let docs = match view {
        ActiveView::Registry(v) => v.documents(),
        ActiveView::Comparison(v) => v.documents(),
        ActiveView::Chat(v) => v.documents(),
        ActiveView::Catalog(v) => v.entries().into_iter().map(|e| e.document).collect(),
        ActiveView::Summary(_) | ActiveView::Classification(_) => Vec::new(),
    };
    docs.into_iter().map(|d| d.to_string()).collect()
}

fn progress(message: &str) {
    println!("{}", message.dimmed());
}

fn notice(message: &str) {
    println!("{}", message.yellow());
}
