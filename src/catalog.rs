use crate::error::{Error, Result};
use gettext::Catalog;
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Compiled gettext catalogs, one per locale directory
///
/// Populated once by [`LocaleCatalogStore::load`] and read-only afterwards.
pub struct LocaleCatalogStore {
    // Directory enumeration order
    locales: Vec<String>,
    // Locales without a usable catalog have no entry
    catalogs: HashMap<String, Catalog>,
}

impl LocaleCatalogStore {
    pub fn empty() -> Self {
        LocaleCatalogStore {
            locales: Vec::new(),
            catalogs: HashMap::new(),
        }
    }

    /// Load all catalogs below a locale root
    ///
    /// Every subdirectory of `root` is a locale, named after the directory
    /// (e.g. `root/pt_BR` -> locale `"pt_BR"`). The catalog for a locale is
    /// read from `<locale>/LC_MESSAGES/<domain>.mo`, or `<locale>/<domain>.mo`
    /// when the former does not exist.
    ///
    /// A locale whose catalog is missing or cannot be parsed is still listed;
    /// it just has no translations.
    ///
    /// # Errors
    /// - `root` not found
    /// - `root` is not a directory, or cannot be listed
    pub fn load(root: &Path, domain: &str) -> Result<Self> {
        if !root.exists() {
            return Err(Error::configuration(format!(
                "Locale directory not found: {}",
                root.display()
            )));
        }

        if !root.is_dir() {
            return Err(Error::configuration(format!(
                "Locale path is not a directory: {}",
                root.display()
            )));
        }

        let entries = fs::read_dir(root).map_err(|e| {
            Error::configuration(format!(
                "Failed to read locale directory '{}': {}",
                root.display(),
                e
            ))
        })?;

        let mut store = LocaleCatalogStore::empty();
        for entry in entries {
            let entry = entry.map_err(|e| {
                Error::configuration(format!("Error reading directory entry: {}", e))
            })?;

            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let Some(locale) = path.file_name().and_then(|name| name.to_str()) else {
                warn!("Skipping locale directory with non UTF-8 name: {}", path.display());
                continue;
            };
            if locale.starts_with('.') {
                continue;
            }

            let locale = locale.to_string();
            match load_catalog(&path, domain) {
                Some(catalog) => {
                    debug!(locale = %locale, "Loaded catalog");
                    store.catalogs.insert(locale.clone(), catalog);
                }
                None => {
                    warn!(locale = %locale, "No usable catalog, outputs keep source text");
                }
            }
            store.locales.push(locale);
        }

        if store.locales.is_empty() {
            warn!("No locale directories found in {}", root.display());
        }
        info!(
            "Loaded {} catalogs for {} locales from {}",
            store.catalogs.len(),
            store.locales.len(),
            root.display()
        );

        Ok(store)
    }

    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    pub fn catalog(&self, locale: &str) -> Option<&Catalog> {
        self.catalogs.get(locale)
    }

    /// Look up `key` for `locale`, falling back to the key itself
    pub fn gettext<'a>(&'a self, locale: &str, key: &'a str) -> &'a str {
        match self.catalogs.get(locale) {
            Some(catalog) => catalog.gettext(key),
            None => key,
        }
    }
}

fn catalog_candidates(locale_path: &Path, domain: &str) -> [PathBuf; 2] {
    let file_name = format!("{}.mo", domain);
    [
        locale_path.join("LC_MESSAGES").join(&file_name),
        locale_path.join(&file_name),
    ]
}

fn load_catalog(locale_path: &Path, domain: &str) -> Option<Catalog> {
    let path = catalog_candidates(locale_path, domain)
        .into_iter()
        .find(|candidate| candidate.is_file())?;

    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) => {
            warn!("Failed to open catalog '{}': {}", path.display(), e);
            return None;
        }
    };

    match Catalog::parse(file) {
        Ok(catalog) => Some(catalog),
        Err(e) => {
            warn!("Failed to parse catalog '{}': {}", path.display(), e);
            None
        }
    }
}
