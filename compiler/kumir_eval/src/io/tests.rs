use super::*;
use pretty_assertions::assert_eq;

#[test]
fn buffer_shell_returns_lines_then_end_of_stream() {
    let shell = BufferShell::with_input(["12", "абв"]);
    assert_eq!(shell.read_line("").ok(), Some("12".to_string()));
    assert_eq!(shell.read_line("").ok(), Some("абв".to_string()));
    assert_eq!(shell.read_line("").ok(), Some(String::new()));
}

#[test]
fn buffer_shell_captures_output_without_newlines() {
    let shell = BufferShell::new();
    assert!(shell.write("1").is_ok());
    assert!(shell.write("2").is_ok());
    assert_eq!(shell.output(), "12");
    shell.clear();
    assert_eq!(shell.output(), "");
}

#[test]
fn pushed_input_is_read_after_scripted_input() {
    let shell = BufferShell::with_input(["a"]);
    shell.push_input("b");
    assert_eq!(shell.read_line("").ok(), Some("a".to_string()));
    assert_eq!(shell.read_line("").ok(), Some("b".to_string()));
}

#[test]
fn silent_shell_reads_nothing() {
    let shell = silent_shell();
    assert!(shell.write("ignored").is_ok());
    assert_eq!(shell.read_line("?").ok(), Some(String::new()));
    assert_eq!(shell.captured(), "");
}

#[test]
fn shared_buffer_shell_exposes_capture() {
    let shell = buffer_shell(Vec::<String>::new());
    assert!(shell.write("да").is_ok());
    assert_eq!(shell.captured(), "да");
}

struct FailingShell;

impl IoShell for FailingShell {
    fn read_line(&self, _prompt: &str) -> Result<String, ShellError> {
        Err(ShellError::Read(std::io::Error::other("closed")))
    }

    fn write(&self, _text: &str) -> Result<(), ShellError> {
        Err(ShellError::Write(std::io::Error::other("closed")))
    }
}

#[test]
fn custom_shell_errors_propagate() {
    let shell = custom_shell(FailingShell);
    let err = shell.read_line("").err().map(|e| e.to_string());
    assert_eq!(err, Some("не удалось прочитать строку: closed".to_string()));
    assert!(shell.write("x").is_err());
}

#[test]
fn terminators_are_stripped() {
    assert_eq!(strip_terminator("abc\r\n".to_string()), "abc");
    assert_eq!(strip_terminator("abc\n".to_string()), "abc");
    assert_eq!(strip_terminator("abc".to_string()), "abc");
}
