//! Interactive profile picker.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the picker provides the "run `rewards table --pick` and choose a profile" UX
//!
//! Candidates come from the `ProfileStore`, so the picker works the same for any
//! store implementation.

use std::io::{self, BufRead, Write};

use crate::error::AppError;
use crate::io::ProfileStore;

/// Prompt on stdin/stdout for one of the store's profiles.
pub fn prompt_for_profile(store: &dyn ProfileStore) -> Result<String, AppError> {
    let names = store.list()?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    pick_from(&names, &mut stdin.lock(), &mut stdout.lock())
}

/// Selection loop over `names`.
///
/// Behavior:
/// - list the names, numbered from 1
/// - accept either a number or an exact profile name
/// - `q` cancels
pub fn pick_from<R: BufRead, W: Write>(
    names: &[String],
    input: &mut R,
    output: &mut W,
) -> Result<String, AppError> {
    if names.is_empty() {
        return Err(AppError::new(
            2,
            "No saved profiles. Create one with `rewards profile save <name>`.",
        ));
    }

    let write_err = |e: io::Error| AppError::new(2, format!("Failed to write prompt: {e}"));

    writeln!(output, "Found {} profile(s):", names.len()).map_err(write_err)?;
    for (idx, name) in names.iter().enumerate() {
        writeln!(output, "{:>3}) {name}", idx + 1).map_err(write_err)?;
    }

    loop {
        write!(
            output,
            "Select a profile by number (1-{}) or name (q to quit): ",
            names.len()
        )
        .map_err(write_err)?;
        output.flush().map_err(write_err)?;

        let mut line = String::new();
        let bytes = input
            .read_line(&mut line)
            .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;

        if bytes == 0 {
            return Err(AppError::new(
                2,
                "No input received. Pass a profile with `--profile <name>`.",
            ));
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }

        if let Ok(choice) = line.parse::<usize>() {
            if (1..=names.len()).contains(&choice) {
                return Ok(names[choice - 1].clone());
            }
            writeln!(
                output,
                "Invalid choice: {choice}. Enter a number between 1 and {}.",
                names.len()
            )
            .map_err(write_err)?;
            continue;
        }

        if let Some(name) = names.iter().find(|n| n.as_str() == line) {
            return Ok(name.clone());
        }
        writeln!(output, "Unknown profile: '{line}'.").map_err(write_err)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["balanced".to_string(), "launch".to_string()]
    }

    #[test]
    fn picks_by_number_after_bad_input() {
        let mut input = "7\nnope\n2\n".as_bytes();
        let mut out = Vec::new();
        let picked = pick_from(&names(), &mut input, &mut out).unwrap();
        assert_eq!(picked, "launch");

        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("  1) balanced"));
        assert!(shown.contains("Invalid choice: 7"));
        assert!(shown.contains("Unknown profile: 'nope'"));
    }

    #[test]
    fn picks_by_name() {
        let mut input = "balanced\n".as_bytes();
        let picked = pick_from(&names(), &mut input, &mut Vec::new()).unwrap();
        assert_eq!(picked, "balanced");
    }

    #[test]
    fn quit_and_eof_cancel() {
        let err = pick_from(&names(), &mut "q\n".as_bytes(), &mut Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(pick_from(&names(), &mut "".as_bytes(), &mut Vec::new()).is_err());
    }

    #[test]
    fn empty_store_is_an_error() {
        let err = pick_from(&[], &mut "1\n".as_bytes(), &mut Vec::new()).unwrap_err();
        assert!(err.message().contains("No saved profiles"));
    }
}
