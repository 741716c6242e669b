//! Error types and reporting

use crate::ast::Span;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, CompileError>;

/// Compile error
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Lexer error at {span:?}: {message}")]
    Lexer { message: String, span: Span },

    #[error("Parser error at {span:?}: {message}")]
    Parser { message: String, span: Span },
}

impl CompileError {
    pub fn lexer(message: impl Into<String>, span: Span) -> Self {
        Self::Lexer {
            message: message.into(),
            span,
        }
    }

    pub fn parser(message: impl Into<String>, span: Span) -> Self {
        Self::Parser {
            message: message.into(),
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::Lexer { span, .. } => *span,
            Self::Parser { span, .. } => *span,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Lexer { message, .. } => message,
            Self::Parser { message, .. } => message,
        }
    }
}

/// Report error with ariadne
pub fn report_error(filename: &str, source: &str, error: &CompileError) {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let kind = match error {
        CompileError::Lexer { .. } => "Lexer",
        CompileError::Parser { .. } => "Parser",
    };

    let span = error.span();
    Report::build(ReportKind::Error, (filename, span.start..span.end))
        .with_message(format!("{kind} error"))
        .with_label(
            Label::new((filename, span.start..span.end))
                .with_message(error.message())
                .with_color(Color::Red),
        )
        .finish()
        .print((filename, Source::from(source)))
        .unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_error() {
        let err = CompileError::lexer("unexpected character", Span::new(3, 4));
        assert_eq!(err.span(), Span::new(3, 4));
        assert_eq!(err.message(), "unexpected character");
        assert!(format!("{err}").contains("Lexer error"));
    }

    #[test]
    fn test_parser_error() {
        let err = CompileError::parser("unexpected token", Span::new(0, 2));
        assert_eq!(err.span(), Span::new(0, 2));
        assert_eq!(err.message(), "unexpected token");
        assert!(format!("{err}").contains("Parser error"));
    }
}
