use serde::{Deserialize, Serialize};

use tripsplit_core::ParticipantId;

/// A person on a trip's roster.
///
/// Identity is opaque to the engine; name and email are carried through only
/// to label balances and settlement transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub email: String,
}

impl Participant {
    pub fn new(id: ParticipantId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}
