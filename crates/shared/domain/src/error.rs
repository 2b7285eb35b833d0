use std::borrow::Cow;

#[hearth_derive::hearth_error]
pub enum DomainError {
    /// Journal intensity outside `1..=5`.
    #[error("Invalid intensity{}: {message}", format_context(.context))]
    InvalidIntensity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal domain error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
