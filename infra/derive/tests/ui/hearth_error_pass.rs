use hearth_derive::hearth_error;
use std::borrow::Cow;

#[hearth_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<String, DemoError> {
    std::fs::read_to_string("/definitely/missing").context("reading demo file")
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.kind(), "Io");
    assert!(err.to_string().contains("(reading demo file)"));

    let internal: DemoError = "boom".into();
    assert_eq!(internal.kind(), "Internal");
}
