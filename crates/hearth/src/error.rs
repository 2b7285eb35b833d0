use std::borrow::Cow;

#[hearth_derive::hearth_error]
pub enum HearthError {
    #[error("Storage error{}: {source}", format_context(.context))]
    Storage { source: hearth_storage::StorageError, context: Option<Cow<'static, str>> },

    #[error("Vault error{}: {source}", format_context(.context))]
    Vault { source: hearth_vault::VaultError, context: Option<Cow<'static, str>> },

    #[error("Module error{}: {source}", format_context(.context))]
    Module { source: hearth_module::ModuleError, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
