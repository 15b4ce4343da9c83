//! Plain-text rendering of the mounted view.

use std::fmt::Write;

use colored::Colorize;

use crate::header::{nav_state, BRAND};
use crate::model::Role;
use crate::resource::Phase;
use crate::router::Route;
use crate::views::chat::ChatView;
use crate::views::classification::NO_TOPICS;
use crate::views::registry::MAX_DOCUMENTS;
use crate::views::{
    ActiveView, CatalogView, ClassificationView, ComparisonView, RegistryView, SummaryView,
};

pub fn header(route: &Route) -> String {
    let nav: Vec<String> = nav_state(route)
        .into_iter()
        .map(|(item, active)| {
            if active {
                format!("[{}]", item.label).bold().to_string()
            } else {
                item.label.dimmed().to_string()
            }
        })
        .collect();
    format!("{}  {}\n", BRAND.bold().blue(), nav.join("  "))
}

/// Whole screen for the current page. `show_transcript` tells the chat view
/// whether its turns changed since the last screen.
pub fn screen(route: &Route, view: &ActiveView, show_transcript: bool) -> String {
    let mut out = header(route);
    let _ = writeln!(out, "{}  {}", route.title().bold(), route.to_string().dimmed());
    out.push('\n');

    let body = match view {
        ActiveView::Registry(v) => registry(v),
        ActiveView::Catalog(v) => catalog(v),
        ActiveView::Summary(v) => summary(v),
        ActiveView::Classification(v) => classification(v),
        ActiveView::Comparison(v) => comparison(v),
        ActiveView::Chat(v) => chat(v, show_transcript),
    };
    out.push_str(&body);
    out
}

fn banner(out: &mut String, message: Option<String>) {
    if let Some(message) = message {
        let _ = writeln!(out, "{} {}", "✗".red().bold(), message.red());
    }
}

pub fn registry(view: &RegistryView) -> String {
    let mut out = String::new();
    banner(&mut out, view.banner());

    let _ = writeln!(out, "{}", "Subir Nuevo PDF".bold());
    match view.selected_file() {
        Some(file) => {
            let _ = writeln!(
                out,
                "  {} {} ({} bytes), /upload para subirlo",
                "✓".green(),
                file.file_name,
                file.size()
            );
        }
        None => {
            let _ = writeln!(
                out,
                "  Arrastra un archivo PDF a la terminal o usa /file <ruta>"
            );
        }
    }
    let _ = writeln!(
        out,
        "  {}",
        format!("Máximo {MAX_DOCUMENTS} PDFs simultáneos • Solo archivos PDF").dimmed()
    );
    out.push('\n');

    let docs = view.documents();
    let _ = writeln!(out, "{}  {}", "Documentos PDF".bold(), view.count_label().dimmed());
    if view.list_state().is_loading {
        let _ = writeln!(out, "  Cargando...");
    } else if docs.is_empty() {
        let _ = writeln!(out, "  Sube tu primer PDF para comenzar a analizarlo con IA");
    } else {
        for (i, doc) in docs.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {:>2}. {}  {}",
                i + 1,
                doc,
                Route::Summary(doc.clone()).to_string().dimmed()
            );
        }
        let _ = writeln!(out, "  {}", "Ir al chat: /go /chat".dimmed());
    }
    out
}

pub fn catalog(view: &CatalogView) -> String {
    let mut out = String::new();
    let state = view.state();
    banner(&mut out, state.error.clone());

    match state.phase() {
        Phase::Loading => {
            let _ = writeln!(out, "Obteniendo la lista de PDFs disponibles...");
        }
        _ => {
            let entries = view.entries();
            if entries.is_empty() {
                let _ = writeln!(out, "Sube algunos PDFs para poder generar resúmenes (/go /)");
            }
            for entry in entries {
                let _ = writeln!(out, "  {}", entry.document.to_string().bold());
                let _ = writeln!(
                    out,
                    "     Ver Resumen {}  Clasificar {}  Chat {}",
                    entry.summary.to_string().dimmed(),
                    entry.classify.to_string().dimmed(),
                    entry.chat.to_string().dimmed()
                );
            }
        }
    }
    out
}

pub fn summary(view: &SummaryView) -> String {
    let mut out = String::new();
    let state = view.state();
    let _ = writeln!(out, "Documento: {}", view.document().to_string().bold());
    out.push('\n');

    match state.phase() {
        Phase::Loading => {
            let _ = writeln!(out, "Generando resumen...");
        }
        Phase::Error => banner(&mut out, state.error),
        Phase::Success | Phase::Idle => {
            if let Some(text) = state.data {
                let _ = writeln!(out, "{text}");
            }
        }
    }
    out.push('\n');
    let _ = writeln!(
        out,
        "{}",
        format!(
            "/regen para regenerar • Chatear sobre este documento: /go {} • Comparar: /go {}",
            view.chat_route(),
            view.compare_route()
        )
        .dimmed()
    );
    out
}

pub fn classification(view: &ClassificationView) -> String {
    let mut out = String::new();
    let state = view.state();
    let _ = writeln!(out, "Documento: {}", view.document().to_string().bold());
    out.push('\n');

    match state.phase() {
        Phase::Loading => {
            let _ = writeln!(out, "La IA está clasificando los temas del documento...");
        }
        Phase::Error => banner(&mut out, state.error),
        Phase::Success | Phase::Idle => {
            let topics = view.numbered_topics();
            if topics.is_empty() {
                let _ = writeln!(out, "{NO_TOPICS}");
            }
            for (label, topic) in topics {
                let _ = writeln!(out, "  {}  {}", label.cyan(), topic);
            }
        }
    }
    out.push('\n');
    let _ = writeln!(
        out,
        "{}",
        format!(
            "Ir al chat: /go {} • Comparar con otro: /go {} • /regen",
            view.chat_route(),
            view.compare_route()
        )
        .dimmed()
    );
    out
}

pub fn comparison(view: &ComparisonView) -> String {
    let mut out = String::new();
    banner(&mut out, view.banner());

    let selection = view.selection();
    let slot = |d: &Option<crate::model::DocumentRef>| {
        d.as_ref()
            .map_or_else(|| "Seleccionar documento".dimmed().to_string(), |d| d.to_string())
    };
    let _ = writeln!(out, "  Documento 1: {}", slot(&selection.first));
    let _ = writeln!(out, "  Documento 2: {}", slot(&selection.second));

    let docs = view.documents();
    if !docs.is_empty() {
        let names: Vec<String> = docs.iter().map(|d| d.to_string()).collect();
        let _ = writeln!(out, "  {}", format!("Disponibles: {}", names.join(", ")).dimmed());
    }

    let hint = if view.can_submit() {
        "/compare para comparar"
    } else {
        "/pick 1|2 <nombre> para elegir"
    };
    let _ = writeln!(out, "  {}", hint.dimmed());

    let state = view.state();
    if let (false, Some(text)) = (state.is_loading, state.data) {
        out.push('\n');
        let _ = writeln!(out, "{}", "Resultado de la comparación".bold());
        let _ = writeln!(out, "{text}");
    }
    out
}

pub fn chat(view: &ChatView, show_transcript: bool) -> String {
    let mut out = String::new();
    banner(&mut out, view.banner());
    let _ = writeln!(out, "Documento: {}", view.scope_label().bold());

    if view.transcript().is_empty() {
        let _ = writeln!(out, "Haz una pregunta sobre tus documentos PDF para comenzar");
    } else if show_transcript {
        out.push('\n');
        for turn in view.transcript() {
            let who = match turn.role {
                Role::User => "Tú".green().bold(),
                Role::Assistant => "Copiloto".blue().bold(),
            };
            let _ = writeln!(out, "{} {} {}", turn.time_label().dimmed(), who, turn.text);
        }
    }
    out.push('\n');
    let _ = writeln!(
        out,
        "{}",
        "Escribe tu pregunta y pulsa Enter • /scope <nombre|all> • /clear".dimmed()
    );
    out
}

pub fn help() -> String {
    [
        "/go <ruta>            abrir /, /chat, /summaries, /summary/<pdf>, /classify/<pdf>, /compare[/<pdf>]",
        "/back                 volver a la vista anterior",
        "/refresh              recargar la vista actual",
        "/file <ruta>          elegir un PDF (o arrástralo a la terminal)",
        "/upload [ruta]        subir el PDF elegido",
        "/delete <nombre>      eliminar un documento",
        "/scope <nombre|all>   documento del chat",
        "/pick 1|2 <nombre>    documentos a comparar",
        "/compare              comparar",
        "/regen                regenerar resumen o clasificación",
        "/clear                limpiar el historial del chat",
        "/quit                 salir",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use std::sync::Arc;

    fn plain() {
        colored::control::set_override(false);
    }

    #[tokio::test]
    async fn test_registry_lists_documents() {
        plain();
        let api = Arc::new(FakeApi::with_documents(&["a.pdf", "b.pdf"]));
        let mut view = ActiveView::for_route(&Route::Home, api);
        view.mount().await;

        let text = screen(&Route::Home, &view, false);
        assert!(text.contains("[Inicio]"));
        assert!(text.contains("2 documentos cargados"));
        assert!(text.contains(" 1. a.pdf  /summary/a.pdf"));
    }

    #[tokio::test]
    async fn test_classification_without_topics() {
        plain();
        let api = Arc::new(FakeApi::with_documents(&["a.pdf"]));
        let route = Route::Classify("a.pdf".into());
        let mut view = ActiveView::for_route(&route, api);
        view.mount().await;

        assert!(screen(&route, &view, false).contains(NO_TOPICS));
    }

    #[tokio::test]
    async fn test_chat_transcript_only_when_requested() {
        plain();
        let api = Arc::new(FakeApi::default());
        let mut chat = ChatView::new(api, None);
        chat.send("hola").await;

        let full = super::chat(&chat, true);
        assert!(full.contains("Tú hola"));
        assert!(full.contains("Copiloto echo: hola"));
        assert!(!super::chat(&chat, false).contains("echo: hola"));
    }

    #[tokio::test]
    async fn test_summary_links_to_chat() {
        plain();
        let api = Arc::new(FakeApi::with_documents(&["a.pdf"]));
        let route = Route::Summary("a.pdf".into());
        let mut view = ActiveView::for_route(&route, api);
        view.mount().await;

        let text = screen(&route, &view, false);
        assert!(text.contains("summary #1 of a.pdf"));
        assert!(text.contains("/go /chat?pdf=a.pdf"));
        assert!(text.contains("/go /compare/a.pdf"));
    }

    #[test]
    fn test_help_mentions_every_command() {
        let text = help();
        for cmd in crate::shell::command::COMMANDS {
            if *cmd != "/help" {
                assert!(text.contains(cmd), "missing {cmd}");
            }
        }
    }
}
