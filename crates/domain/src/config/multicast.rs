use serde::{Deserialize, Serialize};

/// Multicast groups the tunnel engine forwards. Kept as raw tokens so the
/// file round-trips; `Config::validate` is the gate that types them.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MulticastConfig {
    #[serde(default)]
    pub groups: Vec<String>,
}
