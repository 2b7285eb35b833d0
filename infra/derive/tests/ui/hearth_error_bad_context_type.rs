use hearth_derive::hearth_error;

#[hearth_error]
pub enum DemoError {
    #[error("Internal error: {message}")]
    Internal { message: String, context: String },
}

fn main() {}
