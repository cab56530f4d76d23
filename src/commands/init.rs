//! Init command - print the shell integration function

use crate::TwdError;
use crate::shell::{self, Shell};
use std::path::Path;

type Result<T> = std::result::Result<T, TwdError>;

/// Execute the init command
///
/// Meant to be evaluated by the shell, e.g. `eval "$(twd init bash)"`.
///
/// # Errors
///
/// Returns an I/O error if stdout cannot be written.
pub fn execute(shell: Shell, signal_file: &Path) -> Result<()> {
    use std::io::Write;

    let script = shell::init_script(shell, signal_file);
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(script.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
