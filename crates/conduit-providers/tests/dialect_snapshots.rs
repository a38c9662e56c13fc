use conduit_providers::DialectParser;

fn jsonl(parser: &dyn DialectParser, lines: &[&str]) -> String {
    lines
        .iter()
        .flat_map(|line| parser.parse_line(line.as_bytes()))
        .map(|ev| serde_json::to_string(&ev.parsed).unwrap())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn claude_session_snapshot() {
    let parser = conduit_providers::get_provider("claude").unwrap();
    let lines = [
        r#"{"type":"system","subtype":"init","session_id":"sess-1","model":"claude-opus"}"#,
        r#"{"type":"assistant","message":{"content":[{"type":"text","text":"Hello, world!"}]}}"#,
        r#"{"type":"result","subtype":"success","result":"Hello, world!","total_cost_usd":0.08,"num_turns":3,"duration_ms":141000}"#,
    ];
    insta::assert_snapshot!("claude_session_events", jsonl(&*parser.parser, &lines));
}

#[test]
fn codex_session_snapshot() {
    let parser = conduit_providers::get_provider("codex").unwrap();
    let lines = [
        r#"{"type":"thread.started","thread_id":"thread-123"}"#,
        r#"{"type":"item.started","item":{"type":"command_execution","id":"item_1","command":"ls -la","status":"in_progress"}}"#,
        r#"{"type":"item.completed","item":{"type":"command_execution","id":"item_1","aggregated_output":"file.txt\n","exit_code":0,"status":"completed"}}"#,
        r#"{"type":"item.completed","item":{"type":"agent_message","text":"Done."}}"#,
        r#"{"type":"turn.completed","usage":{"input_tokens":12,"output_tokens":5,"cached_input_tokens":3}}"#,
    ];
    insta::assert_snapshot!("codex_session_events", jsonl(&*parser.parser, &lines));
}

#[test]
fn gemini_session_snapshot() {
    let parser = conduit_providers::get_provider("gemini").unwrap();
    let lines = [
        r#"{"type":"init","session_id":"g1","model":"gemini-pro"}"#,
        r#"{"type":"message","delta":false,"role":"assistant","text":"Hi"}"#,
        r#"{"type":"result","status":"success","duration_ms":200,"input_tokens":8,"output_tokens":3}"#,
    ];
    insta::assert_snapshot!("gemini_session_events", jsonl(&*parser.parser, &lines));
}

#[test]
fn opencode_session_snapshot() {
    let parser = conduit_providers::get_provider("opencode").unwrap();
    let lines = [
        r#"{"type":"step_start","sessionID":"oc1"}"#,
        r#"{"type":"tool_use","id":"t1","name":"Bash","input":{"command":"ls"},"state":{"status":"completed","output":"ok"}}"#,
        r#"{"type":"step_finish","tokens":{"input":10,"output":4,"cache":{"read":2,"write":1}},"cost":0.01}"#,
    ];
    insta::assert_snapshot!("opencode_session_events", jsonl(&*parser.parser, &lines));
}

#[test]
fn vibe_session_snapshot() {
    let parser = conduit_providers::get_provider("vibe").unwrap();
    let lines = [
        r#"{"role":"assistant","content":"Done.","reasoning_content":"let me think"}"#,
        r#"{"role":"tool","tool_call_id":"c1","content":"ok","name":"Bash"}"#,
    ];
    insta::assert_snapshot!("vibe_session_events", jsonl(&*parser.parser, &lines));
}
