/// How a file's contents can be treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Valid UTF-8, eligible for message substitution
    Utf8,
    /// Anything else; copied through untouched
    Binary,
}

/// A file travelling through the pipeline
///
/// `path` is relative to the source root and always `/`-separated, so a
/// locale prefix can be prepended without touching the rest of the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: String,
    contents: Vec<u8>,
    encoding: Encoding,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        let contents = contents.into();
        let encoding = match std::str::from_utf8(&contents) {
            Ok(_) => Encoding::Utf8,
            Err(_) => Encoding::Binary,
        };
        SourceFile {
            path: path.into(),
            contents,
            encoding,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// The contents as text, `None` for binary files
    pub fn text(&self) -> Option<&str> {
        match self.encoding {
            Encoding::Utf8 => std::str::from_utf8(&self.contents).ok(),
            Encoding::Binary => None,
        }
    }

    pub fn into_contents(self) -> Vec<u8> {
        self.contents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_text() {
        let file = SourceFile::new("index.html", "<h1>Hi</h1>");
        assert_eq!(file.encoding(), Encoding::Utf8);
        assert_eq!(file.text(), Some("<h1>Hi</h1>"));
        assert_eq!(file.path(), "index.html");
    }

    #[test]
    fn test_detects_binary() {
        let file = SourceFile::new("logo.png", vec![0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe]);
        assert_eq!(file.encoding(), Encoding::Binary);
        assert_eq!(file.text(), None);
        assert_eq!(file.contents().len(), 6);
    }
}
