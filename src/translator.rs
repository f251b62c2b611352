//! Catalog-backed translation of files, one output per locale
//!
//! # Example
//!
//! ```no_run
//! use futures::{StreamExt, stream};
//! use static_i18n::{Options, SourceFile, Translator};
//!
//! # async fn run() -> static_i18n::Result<()> {
//! let translator = Translator::new(&Options::new("locale").with_default_locale("en"))?;
//! println!("{}", translator.lang_gettext("fr", "Hello World"));
//!
//! let files = vec![Ok(SourceFile::new("index.html", r#"<h1>{{ _("Hello World") }}</h1>"#))];
//! let mut outputs = translator.stream_translator(stream::iter(files));
//! while let Some(output) = outputs.next().await {
//!     let output = output?;
//!     println!("{}", output.path());
//! }
//! # Ok(())
//! # }
//! ```

use crate::catalog::LocaleCatalogStore;
use crate::config::Options;
use crate::error::Result;
use crate::extract::{self, MessageExtractor, PatternExtractor};
use crate::file::SourceFile;
use crate::translated_file;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tracing::debug;

/// Translation services keyed by locale
///
/// Cloning is cheap: clones and every stream they create share the same
/// read-only catalogs.
#[derive(Clone)]
pub struct Translator {
    catalogs: Arc<LocaleCatalogStore>,
    extractor: Arc<dyn MessageExtractor>,
    default_locale: Option<String>,
}

impl Translator {
    /// Build a translator from options, loading every catalog up front
    ///
    /// Catalog files are read with blocking `std::fs` calls.
    ///
    /// # Errors
    /// - `localeDir` not configured, missing, or not a directory
    /// - Invalid custom `pattern`
    pub fn new(options: &Options) -> Result<Self> {
        let locale_dir = options.locale_dir()?;
        let extractor = match &options.pattern {
            Some(pattern) => PatternExtractor::new(pattern)?,
            None => PatternExtractor::default(),
        };
        let catalogs = LocaleCatalogStore::load(locale_dir, options.domain())?;

        Ok(Translator::from_store(catalogs, options.default_locale.clone())
            .with_extractor(extractor))
    }

    pub fn from_store(catalogs: LocaleCatalogStore, default_locale: Option<String>) -> Self {
        Translator {
            catalogs: Arc::new(catalogs),
            extractor: Arc::new(PatternExtractor::default()),
            default_locale,
        }
    }

    pub fn with_extractor(mut self, extractor: impl MessageExtractor + 'static) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    /// Discovered locales, in directory enumeration order
    pub fn locales(&self) -> &[String] {
        self.catalogs.locales()
    }

    pub fn default_locale(&self) -> Option<&str> {
        self.default_locale.as_deref()
    }

    /// Translation of `key` for `locale`
    ///
    /// Returns `key` unchanged when the locale is unknown or its catalog has
    /// no entry for the key.
    pub fn lang_gettext<'a>(&'a self, locale: &str, key: &'a str) -> &'a str {
        self.catalogs.gettext(locale, key)
    }

    /// Replace every message marker in `text` with its translation
    pub fn translate_text(&self, locale: &str, text: &str) -> String {
        extract::substitute(text, self.extractor.as_ref(), |key| {
            self.lang_gettext(locale, key)
        })
    }

    /// The output file for one locale
    pub fn translate_file(&self, file: &SourceFile, locale: &str) -> SourceFile {
        let derived = translated_file::derive(file, locale, self.default_locale(), |text| {
            self.translate_text(locale, text)
        });
        debug!(locale = %locale, source = %file.path(), output = %derived.path(), "Translated file");
        derived
    }

    /// One output file per locale
    pub fn translate_for_all_locales(&self, file: &SourceFile) -> Vec<SourceFile> {
        self.locales()
            .iter()
            .map(|locale| self.translate_file(file, locale))
            .collect()
    }

    /// Wrap `input` in a stage yielding every locale's output for each file
    pub fn stream_translator<S>(&self, input: S) -> TranslateStream<S>
    where
        S: Stream<Item = Result<SourceFile>> + Unpin,
    {
        TranslateStream {
            translator: self.clone(),
            input,
            current: None,
            next_locale: 0,
            files_seen: 0,
            done: false,
        }
    }
}

/// Stream stage fanning each input file out to all locales
///
/// Derived files are produced on demand. The next input is only pulled once
/// every locale of the current one has been yielded, so at most one input
/// file is held at a time. An input error is yielded once and ends the stream.
pub struct TranslateStream<S> {
    translator: Translator,
    input: S,
    current: Option<SourceFile>,
    next_locale: usize,
    files_seen: usize,
    done: bool,
}

impl<S> TranslateStream<S> {
    /// Number of input files pulled so far
    pub fn files_seen(&self) -> usize {
        self.files_seen
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }
}

impl<S> Stream for TranslateStream<S>
where
    S: Stream<Item = Result<SourceFile>> + Unpin,
{
    type Item = Result<SourceFile>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if this.done {
                return Poll::Ready(None);
            }

            if let Some(file) = &this.current {
                if let Some(locale) = this.translator.locales().get(this.next_locale) {
                    this.next_locale += 1;
                    let derived = this.translator.translate_file(file, locale);
                    return Poll::Ready(Some(Ok(derived)));
                }
                this.current = None;
            }

            match this.input.poll_next_unpin(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(file))) => {
                    this.files_seen += 1;
                    this.current = Some(file);
                    this.next_locale = 0;
                }
                Poll::Ready(Some(Err(e))) => {
                    this.done = true;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(None) => {
                    this.done = true;
                    return Poll::Ready(None);
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let locales = self.translator.locales().len();
        let pending = match self.current {
            Some(_) => locales - self.next_locale,
            None => 0,
        };
        let (lower, upper) = self.input.size_hint();
        (
            lower.saturating_mul(locales).saturating_add(pending),
            upper.and_then(|upper| upper.checked_mul(locales)?.checked_add(pending)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use futures::stream;
    use std::path::Path;

    fn fixture_translator() -> Translator {
        let locale_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/app/locale");
        Translator::new(&Options::new(locale_dir)).unwrap()
    }

    #[test]
    fn test_consumes_catalogs() {
        let translator = fixture_translator();
        assert_eq!(translator.locales().len(), 3);
    }

    #[test]
    fn test_translates_hello_world() {
        let translator = fixture_translator();
        assert_eq!(
            translator.lang_gettext("fr", "Hello World"),
            "Bonjour tout le monde"
        );
        assert_eq!(translator.lang_gettext("fr", "Unknown Key"), "Unknown Key");
        assert_eq!(translator.lang_gettext("xx", "Hello World"), "Hello World");
    }

    #[test]
    fn test_requires_locale_dir() {
        assert!(matches!(
            Translator::new(&Options::default()),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_translate_text() {
        let translator = fixture_translator();
        let text = r#"<h1>{{ _("Hello World") }}</h1> <p>{{ _("Nope") }}</p>"#;
        assert_eq!(
            translator.translate_text("pt_BR", text),
            "<h1>Olá Mundo</h1> <p>Nope</p>"
        );
    }

    #[test]
    fn test_translate_for_all_locales() {
        let translator = fixture_translator();
        let file = SourceFile::new("index.html", r#"{{ _("Hello World") }}"#);
        let outputs = translator.translate_for_all_locales(&file);
        assert_eq!(outputs.len(), 3);

        let mut pairs: Vec<(&str, &str)> = outputs
            .iter()
            .map(|f| (f.path(), f.text().unwrap()))
            .collect();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("de-latn-de-1996/index.html", "Hallo Welt"),
                ("fr/index.html", "Bonjour tout le monde"),
                ("pt-br/index.html", "Olá Mundo"),
            ]
        );
    }

    #[test]
    fn test_translation_is_repeatable() {
        let translator = fixture_translator();
        let file = SourceFile::new("a.html", r#"{{ _("Welcome to our site") }}"#);
        assert_eq!(
            translator.translate_file(&file, "fr"),
            translator.translate_file(&file, "fr")
        );
    }

    #[test]
    fn test_default_locale_keeps_path() {
        let locale_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/app/locale");
        let translator =
            Translator::new(&Options::new(locale_dir).with_default_locale("fr")).unwrap();
        let file = SourceFile::new("index.html", r#"{{ _("Hello World") }}"#);
        let derived = translator.translate_file(&file, "fr");
        assert_eq!(derived.path(), "index.html");
        assert_eq!(derived.text(), Some("Bonjour tout le monde"));
    }

    #[tokio::test]
    async fn test_stream_fans_out_in_input_order() {
        let translator = fixture_translator();
        let files = vec![
            Ok(SourceFile::new("one.html", "1")),
            Ok(SourceFile::new("two.html", "2")),
        ];
        let mut outputs = translator.stream_translator(stream::iter(files));
        assert_eq!(outputs.size_hint(), (6, Some(6)));

        let mut paths = Vec::new();
        while let Some(output) = outputs.next().await {
            paths.push(output.unwrap().path().to_string());
        }
        assert_eq!(paths.len(), 6);
        assert!(paths[..3].iter().all(|p| p.ends_with("one.html")));
        assert!(paths[3..].iter().all(|p| p.ends_with("two.html")));
        assert_eq!(outputs.files_seen(), 2);
    }

    #[test]
    fn test_size_hint_of_endless_input() {
        let translator = fixture_translator();
        let endless = stream::iter(0usize..)
            .map(|i| Ok(SourceFile::new(format!("page-{}.html", i), "text")));
        let outputs = translator.stream_translator(endless);
        assert_eq!(outputs.size_hint(), (usize::MAX, None));
    }

    #[tokio::test]
    async fn test_stream_stops_after_input_error() {
        let translator = fixture_translator();
        let files = vec![
            Ok(SourceFile::new("one.html", "1")),
            Err(Error::configuration("boom")),
            Ok(SourceFile::new("never.html", "never")),
        ];
        let items: Vec<_> = translator
            .stream_translator(stream::iter(files))
            .collect()
            .await;

        assert_eq!(items.len(), 4);
        assert!(items[..3].iter().all(|item| item.is_ok()));
        assert!(matches!(items[3], Err(Error::Configuration(_))));
    }

    #[tokio::test]
    async fn test_stream_without_locales_yields_nothing() {
        let translator = Translator::from_store(LocaleCatalogStore::empty(), None);
        let files = vec![Ok(SourceFile::new("one.html", "1"))];
        let mut outputs = translator.stream_translator(stream::iter(files));
        assert!(outputs.next().await.is_none());
        assert_eq!(outputs.files_seen(), 1);
    }
}
