//! Daemon command handler - sends commands to running daemon via IPC

use super::args::DaemonAction;
use super::ipc::create_ipc_client;
use super::presenter::Presenter;

/// Split a protocol response into its payload or its error message
pub fn parse_response(response: &str) -> Result<&str, String> {
    let response = response.trim();

    if let Some(message) = response.strip_prefix("error:") {
        return Err(message.trim().to_string());
    }
    if response == "ok" {
        return Ok("");
    }
    match response.strip_prefix("ok ") {
        Some(payload) => Ok(payload.trim()),
        None => Ok(response),
    }
}

/// Protocol line for a client-side action
fn command_for(action: DaemonAction) -> Option<&'static str> {
    match action {
        DaemonAction::Start => None,
        DaemonAction::Paste => Some("paste"),
        DaemonAction::Status => Some("status"),
        DaemonAction::Cleanup => Some("cleanup"),
    }
}

/// Handle daemon subcommand (everything except `start`)
pub async fn handle_daemon_command(
    action: DaemonAction,
    presenter: &Presenter,
) -> Result<(), String> {
    let cmd = command_for(action)
        .ok_or_else(|| "'daemon start' runs the daemon itself".to_string())?;

    let client = create_ipc_client();
    if !client.is_daemon_running() {
        return Err("No daemon running. Start with: clipimg daemon start".to_string());
    }

    let response = client
        .send_command(cmd)
        .await
        .map_err(|e| format!("Failed to communicate with daemon: {}", e))?;

    let payload = parse_response(&response)?;

    match action {
        DaemonAction::Paste => presenter.output(payload),
        DaemonAction::Status => presenter.daemon_status(payload),
        DaemonAction::Cleanup => {
            presenter.success(&format!("Deleted {} tracked file(s)", payload))
        }
        DaemonAction::Start => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ok_with_payload() {
        assert_eq!(
            parse_response("ok /tmp/clipboard/clipboard-image-1.png\n"),
            Ok("/tmp/clipboard/clipboard-image-1.png")
        );
        assert_eq!(parse_response("ok 3"), Ok("3"));
    }

    #[test]
    fn parse_error_message() {
        assert_eq!(
            parse_response("error: unknown command\n"),
            Err("unknown command".to_string())
        );
    }

    #[test]
    fn parse_bare_status_line() {
        assert_eq!(
            parse_response("idle tracked=2 pasted=2 failed=0"),
            Ok("idle tracked=2 pasted=2 failed=0")
        );
    }

    #[test]
    fn start_has_no_protocol_line() {
        assert_eq!(command_for(DaemonAction::Start), None);
        assert_eq!(command_for(DaemonAction::Cleanup), Some("cleanup"));
    }
}
