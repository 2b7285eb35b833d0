use std::borrow::Cow;

#[hearth_derive::hearth_error]
pub enum ConsentError {
    /// The consent flag could not be written in any form.
    #[error("Consent not persisted{}: {message}", format_context(.context))]
    NotPersisted { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The gate is still locked.
    #[error("Consent required{}: {message}", format_context(.context))]
    Locked { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The stored flag could not be read; the gate state is unknown.
    #[error("Consent unreadable{}: {source}", format_context(.context))]
    Unreadable { source: hearth_vault::VaultError, context: Option<Cow<'static, str>> },

    #[error("Internal consent error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
