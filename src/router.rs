use std::fmt;
use std::str::FromStr;

use crate::model::DocumentRef;

/// Client-side routes. Each one mounts exactly one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` — document registry: upload, list, delete.
    Home,
    /// `/chat`, optionally scoped with `?pdf=name`.
    Chat { pdf: Option<DocumentRef> },
    /// `/summary/:pdfName`
    Summary(DocumentRef),
    /// `/summaries`
    Summaries,
    /// `/compare` or `/compare/:pdfName`
    Compare(Option<DocumentRef>),
    /// `/classify/:pdfName`
    Classify(DocumentRef),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("No route matches '{0}'")]
    NotFound(String),
    #[error("Malformed encoding in '{0}'")]
    Encoding(String),
}

impl Route {
    /// Match a location such as `/summary/informe%20final.pdf` or
    /// `/chat?pdf=a.pdf`. Dynamic parts are percent-decoded.
    pub fn parse(target: &str) -> Result<Route, RouteError> {
        let target = target.trim();
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target, None),
        };
        let not_found = || RouteError::NotFound(target.to_string());

        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();
        if !path.starts_with('/') {
            return Err(not_found());
        }

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["chat"] => Route::Chat {
                pdf: query_param(query, "pdf", target)?
                    .filter(|name| !name.is_empty())
                    .map(DocumentRef::from),
            },
            ["summaries"] => Route::Summaries,
            ["compare"] => Route::Compare(None),
            ["summary", name] => Route::Summary(segment(name, target)?),
            ["compare", name] => Route::Compare(Some(segment(name, target)?)),
            ["classify", name] => Route::Classify(segment(name, target)?),
            _ => return Err(not_found()),
        };
        Ok(route)
    }

    /// Path without query string; what the header compares against.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".into(),
            Route::Chat { .. } => "/chat".into(),
            Route::Summary(name) => format!("/summary/{}", urlencoding::encode(name.as_str())),
            Route::Summaries => "/summaries".into(),
            Route::Compare(None) => "/compare".into(),
            Route::Compare(Some(name)) => {
                format!("/compare/{}", urlencoding::encode(name.as_str()))
            }
            Route::Classify(name) => format!("/classify/{}", urlencoding::encode(name.as_str())),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Documentos PDF",
            Route::Chat { .. } => "Chat con PDFs",
            Route::Summary(_) => "Resumen del documento",
            Route::Summaries => "Resúmenes",
            Route::Compare(_) => "Comparar documentos",
            Route::Classify(_) => "Clasificación de temas",
        }
    }
}

fn segment(raw: &str, target: &str) -> Result<DocumentRef, RouteError> {
    let decoded = urlencoding::decode(raw).map_err(|_| RouteError::Encoding(target.to_string()))?;
    if decoded.trim().is_empty() {
        return Err(RouteError::NotFound(target.to_string()));
    }
    Ok(DocumentRef::from(decoded.into_owned()))
}

fn query_param(
    query: Option<&str>,
    key: &str,
    target: &str,
) -> Result<Option<String>, RouteError> {
    let Some(query) = query else {
        return Ok(None);
    };
    for pair in query.split('&') {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        if k == key {
            let value = urlencoding::decode(&v.replace('+', " "))
                .map_err(|_| RouteError::Encoding(target.to_string()))?
                .into_owned();
            return Ok(Some(value));
        }
    }
    Ok(None)
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Chat { pdf: Some(name) } => {
                write!(f, "/chat?pdf={}", urlencoding::encode(name.as_str()))
            }
            other => f.write_str(&other.path()),
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_routes() {
        assert_eq!(Route::parse("/").unwrap(), Route::Home);
        assert_eq!(Route::parse("/summaries").unwrap(), Route::Summaries);
        assert_eq!(Route::parse("/compare").unwrap(), Route::Compare(None));
        assert_eq!(Route::parse("/chat").unwrap(), Route::Chat { pdf: None });
        assert_eq!(Route::parse("/summaries/").unwrap(), Route::Summaries);
    }

    #[test]
    fn test_dynamic_segments_are_decoded() {
        assert_eq!(
            Route::parse("/summary/informe%20final.pdf").unwrap(),
            Route::Summary("informe final.pdf".into())
        );
        assert_eq!(
            Route::parse("/compare/a.pdf").unwrap(),
            Route::Compare(Some("a.pdf".into()))
        );
        assert_eq!(
            Route::parse("/classify/b%2Fc.pdf").unwrap(),
            Route::Classify("b/c.pdf".into())
        );
    }

    #[test]
    fn test_chat_query_parameter() {
        assert_eq!(
            Route::parse("/chat?pdf=tesis%20v2.pdf").unwrap(),
            Route::Chat {
                pdf: Some("tesis v2.pdf".into())
            }
        );
        assert_eq!(Route::parse("/chat?pdf=").unwrap(), Route::Chat { pdf: None });
        assert_eq!(
            Route::parse("/chat?x=1").unwrap(),
            Route::Chat { pdf: None }
        );
    }

    #[test]
    fn test_unknown_paths() {
        assert!(matches!(Route::parse("/nope"), Err(RouteError::NotFound(_))));
        assert!(matches!(Route::parse("/summary"), Err(RouteError::NotFound(_))));
        assert!(matches!(Route::parse("/summary/"), Err(RouteError::NotFound(_))));
        assert!(matches!(Route::parse("summaries"), Err(RouteError::NotFound(_))));
        assert!(matches!(
            Route::parse("/summary/a/b"),
            Err(RouteError::NotFound(_))
        ));
    }

    #[test]
    fn test_display_encodes_and_parses_back() {
        let route = Route::Chat {
            pdf: Some("año 2024.pdf".into()),
        };
        let href = route.to_string();
        assert_eq!(href, "/chat?pdf=a%C3%B1o%202024.pdf");
        assert_eq!(href.parse::<Route>().unwrap(), route);
        assert_eq!(route.path(), "/chat");
    }
}
