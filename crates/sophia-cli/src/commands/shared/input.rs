use std::io::{BufRead, IsTerminal, Read, Write};
use std::path::Path;

use anyhow::{Context, bail};

/// Code from `--code`, or from `--code-file` (`-` reads stdin).
pub fn read_code(code: Option<&str>, file: Option<&Path>) -> anyhow::Result<String> {
    match (code, file) {
        (Some(code), _) => Ok(code.to_string()),
        (None, Some(path)) if path == Path::new("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read code from stdin")?;
            Ok(buf)
        }
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read code file {}", path.display())),
        (None, None) => bail!("provide --code or --code-file"),
    }
}

/// The password flag if given, otherwise one line from stdin.
///
/// The prompt goes to stderr and only when stdin is a terminal.
pub fn read_password(provided: Option<&str>, prompt: &str) -> anyhow::Result<String> {
    if let Some(password) = provided {
        return Ok(password.to_string());
    }
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprint!("{prompt}: ");
        std::io::stderr().flush().ok();
    }
    read_line(stdin.lock()).with_context(|| format!("failed to read {prompt} from stdin"))
}

fn read_line(mut reader: impl BufRead) -> anyhow::Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        bail!("unexpected end of input");
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{read_code, read_line};

    #[test]
    fn inline_code_wins() {
        let code = read_code(Some("print(1)"), None).expect("inline code");
        assert_eq!(code, "print(1)");
    }

    #[test]
    fn reads_code_file() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("two_sum.py");
        std::fs::write(&path, "def two_sum(nums, target):\n    pass\n").expect("write");

        let code = read_code(None, Some(&path)).expect("file code");
        assert!(code.starts_with("def two_sum"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_code(None, Some(std::path::Path::new("/nonexistent/x.rs")))
            .expect_err("should fail");
        assert!(format!("{err:#}").contains("/nonexistent/x.rs"));
    }

    #[test]
    fn no_source_is_an_error() {
        assert!(read_code(None, None).is_err());
    }

    #[test]
    fn read_line_strips_line_ending_only() {
        let line = read_line(Cursor::new(" hunter2 \r\nrest")).expect("line");
        assert_eq!(line, " hunter2 ");
    }

    #[test]
    fn read_line_rejects_empty_input() {
        assert!(read_line(Cursor::new("")).is_err());
    }
}
