//! Build-time localization for static sites
//!
//! Every source file is translated into every locale found under a gettext
//! locale directory:
//!
//! ```text
//! locale/
//!   fr/LC_MESSAGES/messages.mo
//!   pt_BR/LC_MESSAGES/messages.mo
//! src/
//!   index.html        ->  fr/index.html, pt-br/index.html
//! ```
//!
//! Message markers such as `{{ _("Hello World") }}` are replaced by the
//! catalog entry for each locale, and each output path gets a lowercased
//! locale prefix. The default locale, when configured, keeps the original
//! path.

pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod file;
pub mod pipeline;
pub mod source;
pub mod target;
pub mod translated_file;
pub mod translator;

// Re-export main types for convenient access
pub use catalog::LocaleCatalogStore;
pub use config::Options;
pub use error::{Error, Result};
pub use extract::{MessageExtractor, PatternExtractor};
pub use file::{Encoding, SourceFile};
pub use pipeline::{RunSummary, StaticI18n, StaticI18nStream, check_target, static_i18n};
pub use target::{DirectoryTarget, Target};
pub use translated_file::lang_prefix;
pub use translator::{TranslateStream, Translator};
