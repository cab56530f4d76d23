//! Shell integration
//!
//! A child process cannot change its parent's working directory, so the
//! binary hands the target to a small shell function installed with
//! `twd init <shell>`. The function runs the binary, then reads the signal
//! file it left behind and `cd`s there.

use clap::ValueEnum;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Environment variable overriding the signal file location
pub const SIGNAL_FILE_ENV: &str = "TWD_SIGNAL_FILE";

/// Tells the calling shell which directory to change to
pub trait Navigator {
    /// Emit `path` as the navigation target
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the target cannot be written.
    fn emit(&self, path: &Path) -> io::Result<()>;
}

/// Writes the target to a file read by the shell wrapper
#[derive(Debug, Clone)]
pub struct SignalFile {
    path: PathBuf,
}

impl SignalFile {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `TWD_SIGNAL_FILE`, or `cd_target` next to the bookmark data
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(SIGNAL_FILE_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::data_local_dir().map(|dir| dir.join("twd").join("cd_target"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Navigator for SignalFile {
    fn emit(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, path.as_os_str().as_encoded_bytes())?;
        tracing::debug!(target_dir = %path.display(), signal = %self.path.display(), "navigation target written");
        Ok(())
    }
}

/// Prints the target on stdout, for `cd "$(twd --print go proj)"`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn emit(&self, path: &Path) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", path.display())?;
        stdout.flush()
    }
}

/// Supported shells for `twd init`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bash => "bash",
            Self::Zsh => "zsh",
            Self::Fish => "fish",
        };
        f.write_str(name)
    }
}

/// Quote for POSIX and fish single-quoted strings
fn shell_quote(value: &str, shell: Shell) -> String {
    let escaped = match shell {
        Shell::Bash | Shell::Zsh => value.replace('\'', r"'\''"),
        Shell::Fish => value.replace('\\', r"\\").replace('\'', r"\'"),
    };
    format!("'{escaped}'")
}

/// Wrapper function for `shell` that consumes `signal_file`
#[must_use]
pub fn init_script(shell: Shell, signal_file: &Path) -> String {
    let signal = shell_quote(&signal_file.display().to_string(), shell);

    match shell {
        Shell::Bash | Shell::Zsh => format!(
            r#"# twd {shell} integration
twd() {{
    local __twd_signal={signal}
    rm -f -- "$__twd_signal"
    TWD_SIGNAL_FILE="$__twd_signal" command twd "$@"
    local __twd_status=$?
    if [ -f "$__twd_signal" ]; then
        local __twd_target
        __twd_target="$(cat -- "$__twd_signal")"
        rm -f -- "$__twd_signal"
        [ -n "$__twd_target" ] && cd -- "$__twd_target"
    fi
    return $__twd_status
}}
"#
        ),
        Shell::Fish => format!(
            r#"# twd fish integration
function twd
    set -l __twd_signal {signal}
    rm -f -- $__twd_signal
    env TWD_SIGNAL_FILE=$__twd_signal command twd $argv
    set -l __twd_status $status
    if test -f $__twd_signal
        set -l __twd_target (cat -- $__twd_signal)
        rm -f -- $__twd_signal
        test -n "$__twd_target"; and cd -- $__twd_target
    end
    return $__twd_status
end
"#
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_signal_file_emit() {
        let temp_dir = TempDir::new().unwrap();
        let signal = SignalFile::new(temp_dir.path().join("state").join("cd_target"));

        signal.emit(Path::new("/home/u/proj")).unwrap();

        assert_eq!(fs::read_to_string(signal.path()).unwrap(), "/home/u/proj");
    }

    #[test]
    fn test_signal_file_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let signal = SignalFile::new(temp_dir.path().join("cd_target"));

        signal.emit(Path::new("/first")).unwrap();
        signal.emit(Path::new("/second")).unwrap();

        assert_eq!(fs::read_to_string(signal.path()).unwrap(), "/second");
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("/tmp/a b", Shell::Bash), "'/tmp/a b'");
        assert_eq!(shell_quote("it's", Shell::Zsh), r"'it'\''s'");
        assert_eq!(shell_quote("it's", Shell::Fish), r"'it\'s'");
    }

    #[test]
    fn test_init_script_posix() {
        let script = init_script(Shell::Bash, Path::new("/run/twd/cd_target"));
        assert!(script.starts_with("# twd bash integration"));
        assert!(script.contains("twd() {"));
        assert!(script.contains("local __twd_signal='/run/twd/cd_target'"));
        assert!(script.contains("command twd \"$@\""));
        assert!(script.contains("cd -- \"$__twd_target\""));
    }

    #[test]
    fn test_init_script_fish() {
        let script = init_script(Shell::Fish, Path::new("/run/twd/cd_target"));
        assert!(script.contains("function twd"));
        assert!(script.contains("command twd $argv"));
        assert!(script.trim_end().ends_with("end"));
    }
}
