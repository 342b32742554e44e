//! Catalog view: owns the session's catalog state, loads it once, and re-renders on every query change.

use crate::catalog::Catalog;
use crate::product;
use crate::render::{self, Surface};
use crate::source::{FeedSource, LoadError};
use std::io;

/// Lifecycle of the view. `Loading` only exists while `load` runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Empty,
    Loading,
    Loaded(Catalog),
    Errored(String),
}

/// Explicit replacement for a process-wide catalog: holds the state plus the current query.
#[derive(Debug, Default)]
pub struct CatalogView {
    state: ViewState,
    query: String,
}

impl CatalogView {
    pub fn new() -> Self {
        Self::default()
    }

    /// View whose first render after `load` is already filtered by `query`.
    pub fn with_query(query: &str) -> Self {
        Self {
            query: query.to_lowercase(),
            ..Self::default()
        }
    }

    /// Loaded catalog, or `None` before a successful load.
    pub fn catalog(&self) -> Option<&Catalog> {
        match &self.state {
            ViewState::Loaded(c) => Some(c),
            _ => None,
        }
    }

    /// Fetch and decode `resource`, then render it under the current query. Succeeds or fails as a whole: no partial catalog.
    ///
    /// The returned error is already displayed on `surface`; the `io::Error` layer is only for the surface itself.
    pub fn load(
        &mut self,
        source: &dyn FeedSource,
        resource: &str,
        surface: &mut dyn Surface,
    ) -> io::Result<Result<(), LoadError>> {
        self.state = ViewState::Loading;
        tracing::info!(resource, "loading feed");
        let outcome = source.fetch(resource).and_then(|body| {
            product::parse_feed(&body).map_err(|e| LoadError::Parse(e.to_string()))
        });
        match outcome {
            Ok(products) => {
                let catalog = Catalog::new(products);
                tracing::info!(resource, count = catalog.len(), "feed loaded");
                if catalog.is_empty() {
                    tracing::warn!(resource, "feed contains no products");
                }
                self.state = ViewState::Loaded(catalog);
                self.refresh(surface)?;
                Ok(Ok(()))
            }
            Err(err) => {
                let message = render::render_error(&err.to_string());
                tracing::warn!(resource, error = %err, "feed load failed");
                self.state = ViewState::Errored(message.clone());
                surface.replace(&message)?;
                Ok(Err(err))
            }
        }
    }

    /// Record the new query and re-render the filtered catalog. Outside `Loaded` the display is left as is.
    pub fn on_query_changed(&mut self, query: &str, surface: &mut dyn Surface) -> io::Result<()> {
        self.query = query.to_lowercase();
        self.refresh(surface)
    }

    fn refresh(&self, surface: &mut dyn Surface) -> io::Result<()> {
        let Some(catalog) = self.catalog() else {
            return Ok(());
        };
        let hits = catalog.filter(&self.query);
        tracing::debug!(query = %self.query, hits = hits.len(), total = catalog.len(), "render");
        surface.replace(&render::render(&hits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{MemorySurface, NO_RESULTS};

    /// In-memory source keyed by resource id.
    struct StubSource(Vec<(&'static str, &'static str)>);

    impl FeedSource for StubSource {
        fn fetch(&self, resource: &str) -> Result<String, LoadError> {
            self.0
                .iter()
                .find(|(k, _)| *k == resource)
                .map(|(_, v)| v.to_string())
                .ok_or_else(|| LoadError::NotFound(format!("{} (HTTP 404 Not Found)", resource)))
        }
    }

    const ONE_IPHONE: &str = r#"[{"title":"iPhone 12","brand":"Apple","price":299,"currency_iso":"EUR","refurbished":true,"url":"u","source":"s"}]"#;

    const THREE: &str = r#"[
{"title":"iPhone 12","brand":"Apple","price":299,"currency_iso":"EUR","refurbished":true,"url":"u1","source":"refurbed"},
{"title":"Pixel 7","model":"GVU6C","grade":"A","price":249,"currency_iso":"EUR","refurbished":true,"url":"u2","source":"refurbed"},
{"title":"Galaxy S21","brand":"Samsung","price":199.99,"currency_iso":"EUR","refurbished":false,"url":"u3","source":"backmarket"}
]"#;

    #[test]
    fn starts_empty() {
        let view = CatalogView::new();
        assert_eq!(&view.state, &ViewState::Empty);
        assert!(view.catalog().is_none());
    }

    #[test]
    fn load_success_renders_everything() {
        let src = StubSource(vec![("Refurbed_250402.json", THREE)]);
        let mut view = CatalogView::new();
        let mut surface = MemorySurface::default();
        view.load(&src, "Refurbed_250402.json", &mut surface)
            .unwrap()
            .unwrap();
        assert_eq!(view.catalog().unwrap().len(), 3);
        assert_eq!(surface.frames.len(), 1);
        let shown = surface.current().unwrap();
        assert_eq!(shown.matches("  Brand: ").count(), 3);
        assert!(shown.contains("  Brand: - | Model: GVU6C"));
    }

    #[test]
    fn preset_query_filters_the_only_frame() {
        let src = StubSource(vec![("feed", THREE)]);
        let mut view = CatalogView::with_query("Apple");
        let mut surface = MemorySurface::default();
        view.load(&src, "feed", &mut surface).unwrap().unwrap();
        assert_eq!(surface.frames.len(), 1);
        let shown = surface.current().unwrap();
        assert_eq!(shown.matches("  Brand: ").count(), 1);
        assert!(shown.starts_with("iPhone 12\n"));
        assert!(!shown.contains("Pixel 7"));
        assert_eq!(view.catalog().unwrap().len(), 3);
    }

    #[test]
    fn http_timeout_ends_errored() {
        use crate::source::HttpSource;
        use std::net::TcpListener;
        use std::time::Duration;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/Refurbed_250402.json", listener.local_addr().unwrap());
        // Accept and hold the connection without ever answering.
        std::thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                std::thread::sleep(Duration::from_secs(3));
                drop(stream);
            }
        });

        let mut view = CatalogView::new();
        let mut surface = MemorySurface::default();
        let src = HttpSource::new(Duration::from_millis(200));
        let err = view.load(&src, &url, &mut surface).unwrap().unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)), "{:?}", err);
        assert!(matches!(view.state, ViewState::Errored(_)));
        assert!(view.catalog().is_none());
        assert!(surface
            .current()
            .unwrap()
            .starts_with("Error loading data: data not found"));
    }

    #[test]
    fn query_changes_rerender_filtered_subset() {
        let src = StubSource(vec![("feed", THREE)]);
        let mut view = CatalogView::new();
        let mut surface = MemorySurface::default();
        view.load(&src, "feed", &mut surface).unwrap().unwrap();

        view.on_query_changed("SAMSUNG", &mut surface).unwrap();
        assert_eq!(view.query, "samsung");
        let shown = surface.current().unwrap();
        assert!(shown.contains("Galaxy S21"));
        assert!(!shown.contains("iPhone 12"));

        view.on_query_changed("gvu", &mut surface).unwrap();
        assert!(surface.current().unwrap().starts_with("Pixel 7\n"));

        view.on_query_changed("", &mut surface).unwrap();
        assert_eq!(surface.current().unwrap().matches("  Brand: ").count(), 3);
        assert_eq!(surface.frames.len(), 4);
        assert_eq!(view.catalog().unwrap().len(), 3);
    }

    #[test]
    fn apple_then_pixel_scenario() {
        let src = StubSource(vec![("feed", ONE_IPHONE)]);
        let mut view = CatalogView::new();
        let mut surface = MemorySurface::default();
        view.load(&src, "feed", &mut surface).unwrap().unwrap();

        view.on_query_changed("apple", &mut surface).unwrap();
        assert!(surface.current().unwrap().starts_with("iPhone 12\n"));

        view.on_query_changed("pixel", &mut surface).unwrap();
        assert_eq!(surface.current().unwrap(), format!("{}\n", NO_RESULTS));
    }

    #[test]
    fn not_found_leaves_catalog_empty_and_shows_reason() {
        let src = StubSource(vec![]);
        let mut view = CatalogView::new();
        let mut surface = MemorySurface::default();
        let err = view
            .load(&src, "Refurbed_250402.json", &mut surface)
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
        assert!(view.catalog().is_none());
        assert!(matches!(view.state, ViewState::Errored(_)));
        let shown = surface.current().unwrap();
        assert!(shown.starts_with("Error loading data: "));
        assert!(shown.contains("HTTP 404 Not Found"));
        assert!(!shown.contains(NO_RESULTS));
    }

    #[test]
    fn parse_error_is_reported_and_nothing_listed() {
        let src = StubSource(vec![("feed", "{\"title\": oops")]);
        let mut view = CatalogView::new();
        let mut surface = MemorySurface::default();
        let err = view.load(&src, "feed", &mut surface).unwrap().unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
        assert!(view.catalog().is_none());
        assert!(surface
            .current()
            .unwrap()
            .starts_with("Error loading data: invalid feed data"));
    }

    #[test]
    fn queries_after_error_keep_error_displayed() {
        let src = StubSource(vec![]);
        let mut view = CatalogView::new();
        let mut surface = MemorySurface::default();
        let _ = view.load(&src, "feed", &mut surface).unwrap();
        view.on_query_changed("apple", &mut surface).unwrap();
        assert_eq!(surface.frames.len(), 1);
        assert!(surface.current().unwrap().starts_with("Error loading data"));
    }
}
