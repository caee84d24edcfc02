use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackAction {
    Like,
    Dislike,
}

impl fmt::Display for FeedbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackAction::Like => write!(f, "like"),
            FeedbackAction::Dislike => write!(f, "dislike"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&FeedbackAction::Like).unwrap(), "\"like\"");
        assert_eq!(serde_json::to_string(&FeedbackAction::Dislike).unwrap(), "\"dislike\"");
    }
}
