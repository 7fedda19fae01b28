use rebreak_derive::rebreak_error;
use std::borrow::Cow;

#[rebreak_error]
pub enum StylesheetError {
    #[error("Stylesheet I/O failure{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal stylesheet error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_stylesheet() -> Result<String, StylesheetError> {
    std::fs::read_to_string("/nonexistent/responsive.css").context("Reading responsive stylesheet")
}

fn main() {
    let err = read_stylesheet().unwrap_err();
    assert!(err.to_string().contains("(Reading responsive stylesheet)"));

    let internal: StylesheetError = "no media clause".into();
    assert!(matches!(internal, StylesheetError::Internal { .. }));

    let with_context: Result<(), StylesheetError> =
        Err(StylesheetError::from("boom")).context("while adjusting");
    assert!(with_context.unwrap_err().to_string().ends_with("(while adjusting): boom"));
}
