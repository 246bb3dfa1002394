pub const DEFAULT_PROMPT: &str = "dhruva > ";
pub const LINE_BUFSIZE: usize = 1024;
pub const TOKEN_BUFSIZE: usize = 64;

/// Tunables for the read loop. Capacities double as growth increments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub prompt: String,
    pub line_capacity: usize,
    pub token_capacity: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            prompt: DEFAULT_PROMPT.to_string(),
            line_capacity: LINE_BUFSIZE,
            token_capacity: TOKEN_BUFSIZE,
        }
    }
}
