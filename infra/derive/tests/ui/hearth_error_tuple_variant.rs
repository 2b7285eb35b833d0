use hearth_derive::hearth_error;

#[hearth_error]
pub enum DemoError {
    Io(std::io::Error),
}

fn main() {}
