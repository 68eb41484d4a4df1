//! Intent routing: one ordered pass over the rule table, first match wins,
//! free text falls through to the generation gateway.

use tracing::debug;

use crate::command::{CaptureMode, Command, DEFAULT_PROCESS_COUNT};

/// How a rule claims an input line. Matching is ASCII case-insensitive;
/// the argument remainder keeps the user's original casing.
enum Matcher {
    /// First listed prefix that matches supplies the remainder.
    Prefix(&'static [&'static str]),
    /// Needle anywhere in the input. No structured argument.
    Contains(&'static str),
}

struct Rule {
    matcher: Matcher,
    build: fn(&str) -> Command,
}

/// Ordered rule table. Order is behavior: a broad rule placed early
/// shadows narrower rules below it ("delete processes.txt" lists
/// processes because the substring rule outranks the delete prefix).
static RULES: &[Rule] = &[
    Rule {
        matcher: Matcher::Prefix(&["open "]),
        build: |args| Command::OpenTarget(args.to_string()),
    },
    Rule {
        matcher: Matcher::Prefix(&["list processes"]),
        build: |args| Command::ListProcesses(parse_count(args)),
    },
    Rule {
        matcher: Matcher::Contains("processes"),
        build: |_| Command::ListProcesses(DEFAULT_PROCESS_COUNT),
    },
    Rule {
        matcher: Matcher::Prefix(&["run ", "exec "]),
        build: |args| Command::RunShell(args.to_string()),
    },
    Rule {
        matcher: Matcher::Prefix(&["delete "]),
        build: |args| Command::DeletePath(args.to_string()),
    },
    Rule {
        matcher: Matcher::Prefix(&["system info", "sysinfo"]),
        build: |_| Command::SystemInfo,
    },
    Rule {
        matcher: Matcher::Prefix(&["health", "status"]),
        build: |_| Command::HealthStatus,
    },
    Rule {
        matcher: Matcher::Prefix(&["search ", "find "]),
        build: |args| Command::SearchFiles(args.to_string()),
    },
    Rule {
        matcher: Matcher::Prefix(&["clipboard", "get clip"]),
        build: |_| Command::ReadClipboard,
    },
    Rule {
        matcher: Matcher::Prefix(&["copy "]),
        build: |args| Command::WriteClipboard(args.to_string()),
    },
    Rule {
        matcher: Matcher::Prefix(&["clear clip"]),
        build: |_| Command::ClearClipboard,
    },
    Rule {
        matcher: Matcher::Prefix(&["screenshot region", "screenshot area"]),
        build: |_| Command::Screenshot(CaptureMode::Region),
    },
    Rule {
        matcher: Matcher::Prefix(&["screenshot", "screen shot", "snap"]),
        build: |_| Command::Screenshot(CaptureMode::Full),
    },
    Rule {
        matcher: Matcher::Prefix(&["theme", "toggle theme", "dark", "light"]),
        build: |_| Command::ToggleTheme,
    },
    Rule {
        matcher: Matcher::Prefix(&["save chat", "save history"]),
        build: |args| Command::SaveTranscript(optional_name(args)),
    },
    Rule {
        matcher: Matcher::Prefix(&["load chat ", "load history "]),
        build: |args| Command::LoadTranscript(args.to_string()),
    },
    Rule {
        matcher: Matcher::Prefix(&["chat list", "list chats"]),
        build: |_| Command::ListTranscripts,
    },
];

/// Classify one input line. Total: every string maps to exactly one
/// command, with `FreeformPrompt` carrying anything no rule claims.
pub fn classify(text: &str) -> Command {
    let lower = text.to_ascii_lowercase();
    for rule in RULES {
        if let Some(args) = rule.matcher.remainder(text, &lower) {
            let command = (rule.build)(args);
            debug!(input = %text, ?command, "classified input");
            return command;
        }
    }
    debug!(input = %text, "no rule matched, treating as freeform prompt");
    Command::FreeformPrompt(text.to_string())
}

impl Matcher {
    fn remainder<'a>(&self, original: &'a str, lower: &str) -> Option<&'a str> {
        match self {
            Matcher::Prefix(prefixes) => prefixes
                .iter()
                .find_map(|prefix| strip_prefix_ignore_case(original, prefix))
                .map(str::trim),
            Matcher::Contains(needle) => lower.contains(needle).then_some(""),
        }
    }
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}

fn parse_count(args: &str) -> usize {
    args.parse::<usize>()
        .ok()
        .filter(|&count| count > 0)
        .unwrap_or(DEFAULT_PROCESS_COUNT)
}

fn optional_name(args: &str) -> Option<String> {
    (!args.is_empty()).then(|| args.to_string())
}
