use tracing::{debug, error, info, warn};

use crate::polls::{Choice, PollKey, VoteOutcome};

/// Logs command start with consistent format
pub fn log_command_start(command: &str, user: &str, user_id: u64, chat_id: i64) {
    info!("CMD_START: {} by {}({}) in chat {}", command, user, user_id, chat_id);
}

/// Logs command completion with consistent format
pub fn log_command_success(command: &str, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_SUCCESS: {} in chat {} - {}", command, chat_id, d),
        None => info!("CMD_SUCCESS: {} in chat {}", command, chat_id),
    }
}

/// Logs command errors with consistent format
pub fn log_command_error(command: &str, chat_id: i64, error: &str) {
    error!("CMD_ERROR: {} in chat {} - {}", command, chat_id, error);
}

/// Logs a vote. Duplicates are routine and stay at debug level.
pub fn log_vote(key: &PollKey, voter: &str, choice: Choice, outcome: VoteOutcome) {
    match outcome {
        VoteOutcome::Accepted => info!("VOTE: {} chose {} on poll {}", voter, choice, key),
        VoteOutcome::DuplicateVote => {
            debug!("VOTE: {} already voted on poll {}, ignored {}", voter, key, choice)
        }
    }
}

/// Logs that a poll is being rebuilt from its message text
pub fn log_recovery(key: &PollKey) {
    info!("RECOVERY: rebuilding poll {} from message text", key);
}

/// Logs a vote line dropped during recovery
pub fn log_recovery_skip(line_no: usize, line: &str, reason: &str) {
    warn!("RECOVERY: skipped line {} '{}' - {}", line_no, line, reason);
}

/// Logs timeout events with consistent format
pub fn log_timeout(operation: &str, duration_secs: u64, details: Option<&str>) {
    match details {
        Some(d) => warn!("TIMEOUT: {} after {}s - {}", operation, duration_secs, d),
        None => warn!("TIMEOUT: {} after {}s", operation, duration_secs),
    }
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
