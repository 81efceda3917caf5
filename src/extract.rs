//! PDF extraction seam.
//!
//! Turning a PDF into HTML is delegated to an external engine. The engine is
//! expensive to create, so it is held by an [`ExtractorHandle`] that creates it
//! on first use and can be closed explicitly. Each page's HTML is followed by
//! a sentinel element; the converter classifies it as `skip`, so page
//! boundaries vanish from the editor tree.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Error, Result};

/// Value of the `block_type` attribute on page-break sentinels.
pub const PAGE_BREAK_SENTINEL: &str = "$$PAGEBREAK$$";

/// An engine that renders PDF pages as HTML.
pub trait Extractor: Send + Sync {
    /// HTML for each page, in page order.
    fn extract_pages(&self, pdf: &[u8]) -> Result<Vec<String>>;
}

impl<F> Extractor for F
where
    F: Fn(&[u8]) -> Result<Vec<String>> + Send + Sync,
{
    fn extract_pages(&self, pdf: &[u8]) -> Result<Vec<String>> {
        self(pdf)
    }
}

type Init<E> = Box<dyn Fn() -> Result<E> + Send + Sync>;

/// Lazily created, shareable extraction engine.
///
/// [`acquire`](Self::acquire) creates the engine on first use; concurrent
/// first calls create it exactly once. [`close`](Self::close) releases it and
/// the next `acquire` creates a new one. Engines already handed out stay
/// alive until their last `Arc` is dropped.
pub struct ExtractorHandle<E> {
    init: Init<E>,
    engine: Mutex<Option<Arc<E>>>,
}

impl<E: Extractor> ExtractorHandle<E> {
    pub fn new(init: impl Fn() -> Result<E> + Send + Sync + 'static) -> Self {
        Self {
            init: Box::new(init),
            engine: Mutex::new(None),
        }
    }

    /// The engine, creating it if needed.
    pub fn acquire(&self) -> Result<Arc<E>> {
        let mut slot = self.lock()?;
        if let Some(engine) = slot.as_ref() {
            return Ok(Arc::clone(engine));
        }

        log::debug!("creating extraction engine");
        let engine = Arc::new((self.init)()?);
        *slot = Some(Arc::clone(&engine));
        Ok(engine)
    }

    /// Release the engine. Closing a closed handle is a no-op.
    pub fn close(&self) -> Result<()> {
        if self.lock()?.take().is_some() {
            log::debug!("closed extraction engine");
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.engine.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<Arc<E>>>> {
        self.engine
            .lock()
            .map_err(|_| Error::Extraction("extraction engine lock poisoned".to_string()))
    }
}

/// Concatenate page HTML, following each page with a sentinel element.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let sentinel = format!(r#"<div block_type="{PAGE_BREAK_SENTINEL}"></div>"#);
    let mut html = String::with_capacity(
        pages.iter().map(|p| p.as_ref().len() + sentinel.len()).sum(),
    );
    for page in pages {
        html.push_str(page.as_ref());
        html.push_str(&sentinel);
    }
    html
}
