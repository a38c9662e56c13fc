//! ANSI-colored event display for the non-TUI legacy path.
//!
//! Narrow and stateful only for the pending-newline flag left by a
//! `content_block_start`/`content_block_stop` pair; a single mutex
//! serializes `handle` calls against the shared output stream.

use std::io::Write;
use std::sync::Mutex;

use conduit_types::{CanonicalEvent, ContentBlock, EventKind};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

pub struct Renderer {
    state: Mutex<RendererState>,
}

#[derive(Default)]
struct RendererState {
    pending_newline: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self { state: Mutex::new(RendererState::default()) }
    }

    fn color_enabled(&self) -> bool {
        std::io::stdout().is_terminal()
    }

    /// Render one canonical event to stdout.
    pub fn handle(&self, event: &CanonicalEvent) {
        let color = self.color_enabled();
        let mut out = std::io::stdout();
        let mut state = self.state.lock().unwrap();

        match event.kind {
            EventKind::System => self.render_system(event, color, &mut out),
            EventKind::Assistant | EventKind::User => self.render_message(event, color, &mut out),
            EventKind::ContentBlockStart => self.render_block_start(event, color, &mut out, &mut state),
            EventKind::ContentBlockDelta => self.render_block_delta(event, &mut out),
            EventKind::ContentBlockStop => self.render_block_stop(&mut out, &mut state),
            EventKind::Result => self.render_result(event, color, &mut out),
            EventKind::Error => self.render_error(event, color, &mut out),
            EventKind::Unknown => {
                let line = format!("[{}]", event.subkind.as_deref().unwrap_or("unknown"));
                self.println(&mut out, if color { line.dimmed().to_string() } else { line });
            }
        }
    }

    /// Called when the parser channel closes, to terminate any unfinished
    /// streaming line.
    pub fn finish(&self) {
        let mut state = self.state.lock().unwrap();
        if state.pending_newline {
            println!();
            state.pending_newline = false;
        }
    }

    fn println(&self, out: &mut std::io::Stdout, line: String) {
        let _ = writeln!(out, "{line}");
    }

    fn render_system(&self, event: &CanonicalEvent, color: bool, out: &mut std::io::Stdout) {
        if event.subkind.as_deref() == Some("init") {
            let model = event.model.as_deref().unwrap_or("?");
            let line = format!("[init] session={} model={}", event.session_id, model);
            self.println(out, if color { line.dimmed().to_string() } else { line });
        }
    }

    fn render_message(&self, event: &CanonicalEvent, color: bool, out: &mut std::io::Stdout) {
        let Some(message) = &event.message else { return };
        for block in &message.content {
            match block {
                ContentBlock::Text { text } => {
                    let line = format!("[text] {}", truncate(text, 500));
                    self.println(out, if color { line.cyan().to_string() } else { line });
                }
                ContentBlock::ToolUse { name, input, .. } => {
                    let line = format!("[tool:{}] {}", name, truncate(&input.to_string(), 100));
                    self.println(out, if color { line.yellow().to_string() } else { line });
                }
                ContentBlock::Thinking { text } => {
                    let compact = text.split_whitespace().collect::<Vec<_>>().join(" ");
                    let line = format!("[thinking] {}", truncate(&compact, 200));
                    self.println(out, if color { line.dimmed().to_string() } else { line });
                }
                ContentBlock::ToolResult { is_error, .. } => {
                    let line = if *is_error { "[tool_result] (error)" } else { "[tool_result]" };
                    self.println(out, if color { line.to_string().dimmed().to_string() } else { line.to_string() });
                }
            }
        }
    }

    fn render_block_start(
        &self,
        event: &CanonicalEvent,
        color: bool,
        out: &mut std::io::Stdout,
        state: &mut RendererState,
    ) {
        let tag = match &event.content_block {
            Some(ContentBlock::Text { .. }) => "text",
            Some(ContentBlock::Thinking { .. }) => "thinking",
            Some(ContentBlock::ToolUse { .. }) => "tool_use",
            Some(ContentBlock::ToolResult { .. }) => "tool_result",
            None => "block",
        };
        let line = format!("[{tag}] ");
        let rendered = if color { line.dimmed().to_string() } else { line };
        let _ = write!(out, "{rendered}");
        state.pending_newline = true;
    }

    fn render_block_delta(&self, event: &CanonicalEvent, out: &mut std::io::Stdout) {
        if let Some(delta) = &event.delta {
            if let Some(text) = &delta.text {
                let _ = write!(out, "{text}");
            }
        }
    }

    fn render_block_stop(&self, out: &mut std::io::Stdout, state: &mut RendererState) {
        if state.pending_newline {
            let _ = writeln!(out);
            state.pending_newline = false;
        }
    }

    fn render_result(&self, event: &CanonicalEvent, color: bool, out: &mut std::io::Stdout) {
        let Some(fields) = &event.result_fields else { return };
        let mut parts = Vec::new();
        if let Some(cost) = fields.total_cost_usd {
            parts.push(format!("cost=${cost:.4}"));
        }
        if let Some(ms) = fields.duration_ms {
            parts.push(format!("duration={:.1}s", ms as f64 / 1000.0));
        }
        if let Some(turns) = fields.num_turns {
            parts.push(format!("turns={turns}"));
        }
        if let Some(usage) = &fields.usage {
            parts.push(format!("in={} out={}", usage.input_tokens, usage.output_tokens));
        }
        let banner = format!(
            "[result:{}] {}",
            event.subkind.as_deref().unwrap_or(if fields.is_error { "error" } else { "success" }),
            parts.join(" ")
        );
        let rendered = if color {
            if fields.is_error { banner.red().to_string() } else { banner.green().to_string() }
        } else {
            banner
        };
        self.println(out, rendered);
    }

    fn render_error(&self, event: &CanonicalEvent, color: bool, out: &mut std::io::Stdout) {
        let line = format!("[error] {}", event.error_message.as_deref().unwrap_or("unknown error"));
        self.println(out, if color { line.red().to_string() } else { line });
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}…")
    }
}
