use std::borrow::Cow;

#[hearth_derive::hearth_error]
pub enum ModuleError {
    /// An access token issued for a different module.
    #[error("Wrong module{}: {message}", format_context(.context))]
    WrongModule { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The host store refused to delete module data.
    #[error("Removal failed{}: {message}", format_context(.context))]
    RemovalFailed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Stored module data could not be read; saving stays disabled until a load succeeds.
    #[error("Load failed{}: {source}", format_context(.context))]
    LoadFailed { source: hearth_vault::VaultError, context: Option<Cow<'static, str>> },

    /// The consent flag could not be read during load.
    #[error("Consent unreadable{}: {source}", format_context(.context))]
    Consent { source: hearth_consent::ConsentError, context: Option<Cow<'static, str>> },

    #[error("Internal module error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
