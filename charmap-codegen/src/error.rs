use std::path::Path;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceOffset};
use read_charmaps::ParseError;

#[derive(Debug)]
pub struct ErrorReport {
    src: Option<NamedSource>,
    message: String,
    location: Option<LabeledSpan>,
}

impl Diagnostic for ErrorReport {
    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.src.as_ref().map(|x| x as _)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.location
            .as_ref()
            .map(|loc| Box::new(std::iter::once(loc.clone())) as _)
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ErrorReport {}

impl ErrorReport {
    pub fn message(message: impl Into<String>) -> Self {
        ErrorReport {
            src: None,
            message: message.into(),
            location: None,
        }
    }

    /// Label the line of `text` that a parse error points at.
    pub fn from_parse_error(error: &ParseError, path: &Path, text: String) -> Self {
        let Some(line_text) = error.line.checked_sub(1).and_then(|i| text.lines().nth(i)) else {
            return ErrorReport::message(error.to_string());
        };
        let len = line_text.len();
        let start = SourceOffset::from_location(&text, error.line, 1).offset();
        let location = LabeledSpan::new(Some(error.kind.to_string()), start, len);
        let src = NamedSource::new(path.to_string_lossy(), text);
        ErrorReport {
            message: format!("parsing {} failed", path.display()),
            src: Some(src),
            location: Some(location),
        }
    }
}
