mod context;
mod flags;
mod prompts;
mod quiet;

pub use context::Context;
pub use flags::CliFlags;
pub use prompts::error;

use crate::error::Result;

pub fn run(flags: CliFlags) -> Result<()> {
    Context::new(flags).run()
}
