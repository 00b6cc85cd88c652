use serde::Deserialize;

/// Long-poll loop parameters.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PollSettings {
    /// Pause between notification polls (unit: milliseconds)
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Notification channel capacity. Kept small on purpose: an unconsumed
    /// notification stalls the poll loop instead of growing a backlog.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for PollSettings {
    fn default() -> Self {
        PollSettings {
            interval_ms: default_interval_ms(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_interval_ms() -> u64 {
    1_000
}

fn default_channel_capacity() -> usize {
    1
}
