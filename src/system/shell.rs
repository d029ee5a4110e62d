// src/system/shell.rs

use crate::constants::MESSAGE_PREFIX;
use crate::models::{CreationCommand, Shell, Step};
use std::borrow::Cow;
use std::path::Path;

/// Wraps `value` in POSIX single quotes, escaping embedded single quotes.
fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Wraps `value` in fish single quotes, where `\` and `'` are backslash-escaped.
fn fish_single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Quotes `value` for a POSIX shell, leaving it bare when nothing needs escaping.
fn quote(value: &str) -> String {
    quote_for(value, Shell::Bash)
}

pub fn quote_path(path: &Path) -> String {
    quote(&path.to_string_lossy())
}

fn quote_for(value: &str, dialect: Shell) -> String {
    match (shlex::try_quote(value), dialect) {
        (Ok(Cow::Borrowed(bare)), _) => bare.to_string(),
        (Ok(Cow::Owned(quoted)), Shell::Bash) => quoted,
        (Err(_), Shell::Bash) => single_quote(value),
        (_, Shell::Fish) => fish_single_quote(value),
    }
}

fn quote_path_for(path: &Path, dialect: Shell) -> String {
    quote_for(&path.to_string_lossy(), dialect)
}

/// Renders a creation invocation (without its target), quoted for `dialect`.
pub fn render_command(command: &CreationCommand, dialect: Shell) -> String {
    std::iter::once(quote_path_for(&command.program, dialect))
        .chain(command.args.iter().map(|arg| quote_for(arg, dialect)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_bare_word(word: &str) -> bool {
    matches!(shlex::try_quote(word), Ok(Cow::Borrowed(_)))
}

fn render_notice(message: &str, dialect: Shell) -> String {
    let line = format!("{}: {}", MESSAGE_PREFIX, message);
    match dialect {
        // The bash notice sits behind our own `eval`, so the caller's shell
        // parses it once and `eval` parses it again.
        Shell::Bash if line.split(' ').all(is_bare_word) => {
            format!("echo {}", single_quote(&line))
        }
        Shell::Bash => format!("echo {}", single_quote(&quote(&line))),
        Shell::Fish => format!("echo {}", fish_single_quote(&line)),
    }
}

fn render_step(step: &Step, dialect: Shell) -> String {
    match step {
        Step::Notice(message) => render_notice(message, dialect),
        Step::Create { command, target } => format!(
            "{} {}",
            render_command(command, dialect),
            quote_path_for(target, dialect)
        ),
        Step::Activate { environment } => {
            let script = match dialect {
                Shell::Bash => environment.join("bin").join("activate"),
                Shell::Fish => environment.join("bin").join("activate.fish"),
            };
            format!("source {}", quote_path_for(&script, dialect))
        }
        Step::Deactivate => match dialect {
            Shell::Bash => format!("{} ; deactivate", render_notice("deactivating...", dialect)),
            Shell::Fish => format!("{}; deactivate", render_notice("deactivating...", dialect)),
        },
    }
}

/// Renders the steps as one command line for the calling shell to evaluate.
///
/// Bash output is wrapped in a single `eval` so every step runs in the
/// caller's own shell process. Fish output is a plain `;`-joined sequence.
/// No steps render as the empty string.
pub fn render(steps: &[Step], dialect: Shell) -> String {
    if steps.is_empty() {
        return String::new();
    }
    let body = steps
        .iter()
        .map(|step| render_step(step, dialect))
        .collect::<Vec<_>>()
        .join("; ");
    match dialect {
        Shell::Bash => format!("eval {}", body),
        Shell::Fish => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn python_venv() -> CreationCommand {
        CreationCommand {
            program: PathBuf::from("/usr/bin/python3"),
            args: vec!["-m".to_string(), "venv".to_string()],
        }
    }

    #[test]
    fn test_plain_paths_stay_bare() {
        assert_eq!(quote_path(Path::new("/h/.venvs/proj")), "/h/.venvs/proj");
    }

    #[test]
    fn test_paths_with_spaces_are_quoted() {
        let quoted = quote_path(Path::new("/h/my projects/app"));
        assert_ne!(quoted, "/h/my projects/app");
        assert_eq!(
            shlex::split(&quoted),
            Some(vec!["/h/my projects/app".to_string()])
        );
    }

    #[test]
    fn test_single_quote_escapes_quotes() {
        assert_eq!(single_quote("it's"), "'it'\\''s'");
    }

    #[test]
    fn test_empty_plan_renders_empty_string() {
        assert_eq!(render(&[], Shell::Bash), "");
        assert_eq!(render(&[], Shell::Fish), "");
    }

    #[test]
    fn test_bash_render_wraps_in_eval() {
        let steps = vec![
            Step::Notice("creating virtual environment: proj".to_string()),
            Step::Create {
                command: python_venv(),
                target: PathBuf::from("/h/.venvs/proj"),
            },
            Step::Activate {
                environment: PathBuf::from("/h/.venvs/proj"),
            },
        ];
        assert_eq!(
            render(&steps, Shell::Bash),
            "eval echo 'AUTOVENV: creating virtual environment: proj'; \
             /usr/bin/python3 -m venv /h/.venvs/proj; \
             source /h/.venvs/proj/bin/activate"
        );
    }

    #[test]
    fn test_fish_render_uses_fish_activation_script() {
        let steps = vec![Step::Activate {
            environment: PathBuf::from("/h/.venvs/proj"),
        }];
        assert_eq!(
            render(&steps, Shell::Fish),
            "source /h/.venvs/proj/bin/activate.fish"
        );
    }

    #[test]
    fn test_fish_quotes_with_backslash_escapes() {
        let steps = vec![Step::Activate {
            environment: PathBuf::from("/h/.venvs/bob's env"),
        }];
        assert_eq!(
            render(&steps, Shell::Fish),
            "source '/h/.venvs/bob\\'s env/bin/activate.fish'"
        );
    }

    #[test]
    fn test_deactivate_rendering() {
        assert_eq!(
            render(&[Step::Deactivate], Shell::Bash),
            "eval echo 'AUTOVENV: deactivating...' ; deactivate"
        );
        assert_eq!(
            render(&[Step::Deactivate], Shell::Fish),
            "echo 'AUTOVENV: deactivating...'; deactivate"
        );
    }

    /// Runs `script` the way a prompt hook does: `eval "$(autovenv bash)"`.
    #[cfg(unix)]
    fn eval_in_bash(script: &str) -> std::process::Output {
        std::process::Command::new("bash")
            .args(["-c", "eval \"$1\"", "autovenv", script])
            .output()
            .unwrap()
    }

    #[cfg(unix)]
    #[test]
    fn test_bash_notice_survives_the_callers_eval() {
        for name in [
            "bob's",
            "x$(echo injected >&2)",
            "a `echo injected >&2` b",
            "proj (using non-system python version 3.12.1)",
            "semi; echo injected >&2",
        ] {
            let message = format!("creating virtual environment: {}", name);
            let rendered = render(&[Step::Notice(message.clone())], Shell::Bash);
            let output = eval_in_bash(&rendered);

            assert!(output.status.success(), "{}: {:?}", rendered, output);
            assert_eq!(
                String::from_utf8_lossy(&output.stdout),
                format!("AUTOVENV: {}\n", message),
                "{}",
                rendered
            );
            assert!(output.stderr.is_empty(), "{}: {:?}", rendered, output);
        }
    }

    #[test]
    fn test_bash_notice_with_special_characters_is_quoted_twice() {
        let rendered = render(
            &[Step::Notice("creating virtual environment: x$(id)".to_string())],
            Shell::Bash,
        );
        assert_eq!(
            rendered,
            "eval echo ''\\''AUTOVENV: creating virtual environment: x$(id)'\\'''"
        );
    }
}
