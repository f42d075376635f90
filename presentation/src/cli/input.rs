//! Keyboard input: one command per line on stdin.

use std::io::BufRead;
use std::thread::JoinHandle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;
use trivia_application::SessionInput;

/// Map an input line to a session input.
///
/// `1`-`4` answer, `h` hint, `p` pause toggle, `r` retry supply, `q` quit.
/// Anything else is ignored.
pub fn parse_line(line: &str) -> Option<SessionInput> {
    let command = line.trim().to_ascii_lowercase();
    match command.as_str() {
        "1" | "2" | "3" | "4" => command.parse::<i32>().ok().map(|n| SessionInput::Submit(n - 1)),
        "h" | "hint" => Some(SessionInput::Hint),
        "p" | "pause" => Some(SessionInput::TogglePause),
        "r" | "retry" => Some(SessionInput::RetrySupply),
        "q" | "quit" | "exit" => Some(SessionInput::Quit),
        _ => None,
    }
}

/// Forward stdin lines to the session from a dedicated thread.
///
/// A blocking reader thread keeps the async runtime free to shut down while
/// a read is pending. The thread ends when the session stops listening;
/// end of input quits the session.
pub fn spawn_input_reader(tx: UnboundedSender<SessionInput>) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                let Some(input) = parse_line(&line) else {
                    debug!("Ignoring input {:?}", line);
                    continue;
                };
                if tx.send(input).is_err() {
                    return;
                }
            }
            let _ = tx.send(SessionInput::Quit);
        })
}
