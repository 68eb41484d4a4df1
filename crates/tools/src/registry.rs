//! The fixed command set, as pure data for help rendering.

pub struct ActionSpec {
    pub usage: &'static str,
    pub summary: &'static str,
    pub guarded: bool,
}

pub static ACTION_SPECS: &[ActionSpec] = &[
    ActionSpec {
        usage: "open <target>",
        summary: "Launch a program or open a file",
        guarded: true,
    },
    ActionSpec {
        usage: "run <cmd> | exec <cmd>",
        summary: "Run a shell command and show its output",
        guarded: true,
    },
    ActionSpec {
        usage: "delete <path>",
        summary: "Delete a file or directory",
        guarded: true,
    },
    ActionSpec {
        usage: "list processes [n]",
        summary: "Show the top processes by CPU",
        guarded: false,
    },
    ActionSpec {
        usage: "system info",
        summary: "Show platform, CPU, memory and disk details",
        guarded: false,
    },
    ActionSpec {
        usage: "health",
        summary: "Report system health with alerts",
        guarded: false,
    },
    ActionSpec {
        usage: "search <pattern>",
        summary: "Find files by name under your home directory",
        guarded: false,
    },
    ActionSpec {
        usage: "clipboard",
        summary: "Show clipboard contents",
        guarded: false,
    },
    ActionSpec {
        usage: "copy <text>",
        summary: "Copy text to the clipboard",
        guarded: false,
    },
    ActionSpec {
        usage: "clear clip",
        summary: "Clear the clipboard",
        guarded: false,
    },
    ActionSpec {
        usage: "screenshot [region]",
        summary: "Capture the screen or a selected region",
        guarded: false,
    },
    ActionSpec {
        usage: "theme",
        summary: "Toggle between dark and light",
        guarded: false,
    },
    ActionSpec {
        usage: "save chat [name]",
        summary: "Save this conversation",
        guarded: false,
    },
    ActionSpec {
        usage: "load chat <name>",
        summary: "Replay a saved conversation",
        guarded: false,
    },
    ActionSpec {
        usage: "chat list",
        summary: "List saved conversations",
        guarded: false,
    },
];

pub fn help_text() -> String {
    let width = ACTION_SPECS
        .iter()
        .map(|spec| spec.usage.len())
        .max()
        .unwrap_or(0);

    let mut lines = vec!["Commands:".to_string()];
    for spec in ACTION_SPECS {
        let marker = if spec.guarded { "  [asks first]" } else { "" };
        lines.push(format!(
            "  {:<width$}  {}{}",
            spec.usage, spec.summary, marker
        ));
    }
    lines.push(String::new());
    lines.push(
        "Anything else goes to the model. Type 'help' for this text, 'exit' to quit.".to_string(),
    );
    lines.join("\n")
}
