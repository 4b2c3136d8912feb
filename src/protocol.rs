#![cfg(feature = "std")]

use serde::{Deserialize, Serialize};

use crate::{game::SideId, grid::GridSnapshot};

/// Version stamped on every frame; receivers reject anything else.
pub const PROTOCOL_VERSION: u32 = 1;

/// Messages a deployment worker sends back to the match orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// The worker placed its fleet; `grid` is the finished layout.
    Deployed {
        version: u32,
        side: SideId,
        grid: GridSnapshot,
    },
    /// The worker could not place its fleet.
    DeployFailed {
        version: u32,
        side: SideId,
        reason: String,
    },
}

impl Message {
    pub fn version(&self) -> u32 {
        match self {
            Message::Deployed { version, .. } | Message::DeployFailed { version, .. } => *version,
        }
    }

    pub fn side(&self) -> SideId {
        match self {
            Message::Deployed { side, .. } | Message::DeployFailed { side, .. } => *side,
        }
    }
}
