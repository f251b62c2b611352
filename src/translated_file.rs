//! Output derivation for one (file, locale) pair
//!
//! Nothing here touches the filesystem or the catalogs: the caller supplies
//! the translation function, which keeps the path rules testable on their own.

use crate::file::SourceFile;

/// Directory prefix for a locale's outputs
///
/// The default locale gets no prefix. Any other tag is lowercased, `_` and
/// `-` are both treated as separators and joined with `-`, and a trailing
/// `/` is appended.
///
/// # Example
///
/// ```
/// use static_i18n::translated_file::lang_prefix;
///
/// assert_eq!(lang_prefix("pt_BR", None), "pt-br/");
/// assert_eq!(lang_prefix("de-Latn_DE-1996", Some("en")), "de-latn-de-1996/");
/// assert_eq!(lang_prefix("en", Some("en")), "");
/// ```
pub fn lang_prefix(locale: &str, default_locale: Option<&str>) -> String {
    if default_locale == Some(locale) {
        return String::new();
    }

    let mut prefix = locale
        .split(['_', '-'])
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    prefix.push('/');
    prefix
}

/// Build the output file for `locale`
///
/// Text contents go through `translate`; binary contents are copied as-is.
pub fn derive<F>(
    file: &SourceFile,
    locale: &str,
    default_locale: Option<&str>,
    translate: F,
) -> SourceFile
where
    F: FnOnce(&str) -> String,
{
    let path = format!("{}{}", lang_prefix(locale, default_locale), file.path());
    match file.text() {
        Some(text) => SourceFile::new(path, translate(text)),
        None => SourceFile::new(path, file.contents().to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::Encoding;

    #[test]
    fn test_default_locale_has_no_prefix() {
        assert_eq!(lang_prefix("same", Some("same")), "");
        assert_eq!(lang_prefix("pt_BR", Some("pt_BR")), "");
    }

    #[test]
    fn test_default_match_is_exact() {
        assert_eq!(lang_prefix("pt_BR", Some("pt-br")), "pt-br/");
        assert_eq!(lang_prefix("fr", Some("en")), "fr/");
    }

    #[test]
    fn test_prefixes_from_catalog_names() {
        assert_eq!(lang_prefix("pt_BR", None), "pt-br/");
        assert_eq!(lang_prefix("de-Latn_DE-1996", None), "de-latn-de-1996/");
        assert_eq!(lang_prefix("fr", None), "fr/");
    }

    #[test]
    fn test_prefix_is_idempotent() {
        for tag in ["pt_BR", "de-Latn_DE-1996", "ZH_hant", "fr"] {
            let prefix = lang_prefix(tag, None);
            let again = lang_prefix(prefix.trim_end_matches('/'), None);
            assert_eq!(prefix, again);
        }
    }

    #[test]
    fn test_derive_prefixes_and_translates() {
        let file = SourceFile::new("blog/index.html", "<h1>Hello</h1>");
        let derived = derive(&file, "pt_BR", None, |text| text.replace("Hello", "Olá"));
        assert_eq!(derived.path(), "pt-br/blog/index.html");
        assert_eq!(derived.text(), Some("<h1>Olá</h1>"));
        // source is untouched
        assert_eq!(file.text(), Some("<h1>Hello</h1>"));
    }

    #[test]
    fn test_derive_default_locale_keeps_path() {
        let file = SourceFile::new("index.html", "Hello");
        let derived = derive(&file, "en", Some("en"), |text| text.to_string());
        assert_eq!(derived.path(), "index.html");
    }

    #[test]
    fn test_derive_copies_binary() {
        let bytes = vec![0xff, 0xfe, 0x00, 0x01];
        let file = SourceFile::new("img/logo.png", bytes.clone());
        let derived = derive(&file, "fr", None, |_| panic!("binary files are not translated"));
        assert_eq!(derived.path(), "fr/img/logo.png");
        assert_eq!(derived.encoding(), Encoding::Binary);
        assert_eq!(derived.contents(), bytes.as_slice());
    }
}
