use std::io::{self, Write};

/// Blocks until the operator presses Enter. Used for the manual login gate
/// before the first submission.
pub fn wait_for_enter(message: &str) {
    println!("{}", message);
    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line);
}

/// Yes/no question, default yes. EOF counts as yes so piped runs proceed.
pub fn confirm(question: &str) -> bool {
    print!("{} [Y/n] ", question);
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return true;
    }
    matches!(line.trim().to_lowercase().as_str(), "" | "y" | "yes")
}
