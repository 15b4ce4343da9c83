pub mod catalog;
pub mod chat;
pub mod classification;
pub mod comparison;
pub mod registry;
pub mod summary;

pub use catalog::CatalogView;
pub use chat::ChatView;
pub use classification::ClassificationView;
pub use comparison::ComparisonView;
pub use registry::RegistryView;
pub use summary::SummaryView;

use std::sync::Arc;

use crate::api::DocumentApi;
use crate::router::Route;

/// The one view mounted for the current route. Views share nothing; each
/// gets the adapter and fetches from scratch.
pub enum ActiveView {
    Registry(RegistryView),
    Catalog(CatalogView),
    Summary(SummaryView),
    Classification(ClassificationView),
    Comparison(ComparisonView),
    Chat(ChatView),
}

impl ActiveView {
    pub fn for_route(route: &Route, api: Arc<dyn DocumentApi>) -> Self {
        match route {
            Route::Home => ActiveView::Registry(RegistryView::new(api)),
            Route::Summaries => ActiveView::Catalog(CatalogView::new(api)),
            Route::Summary(name) => ActiveView::Summary(SummaryView::new(api, name.clone())),
            Route::Classify(name) => {
                ActiveView::Classification(ClassificationView::new(api, name.clone()))
            }
            Route::Compare(preset) => {
                ActiveView::Comparison(ComparisonView::new(api, preset.clone()))
            }
            Route::Chat { pdf } => ActiveView::Chat(ChatView::new(api, pdf.clone())),
        }
    }

    pub async fn mount(&mut self) {
        match self {
            ActiveView::Registry(view) => view.mount().await,
            ActiveView::Catalog(view) => view.mount().await,
            ActiveView::Summary(view) => view.mount().await,
            ActiveView::Classification(view) => view.mount().await,
            ActiveView::Comparison(view) => view.mount().await,
            ActiveView::Chat(view) => view.mount().await,
        }
    }

    /// Cancel whatever is still in flight; late responses are dropped.
    pub fn teardown(&self) {
        match self {
            ActiveView::Registry(view) => view.teardown(),
            ActiveView::Catalog(view) => view.teardown(),
            ActiveView::Summary(view) => view.teardown(),
            ActiveView::Classification(view) => view.teardown(),
            ActiveView::Comparison(view) => view.teardown(),
            ActiveView::Chat(view) => view.teardown(),
        }
    }
}
