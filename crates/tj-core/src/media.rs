//! Media-domain enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Media type of a stream profile.
///
/// A stream id inside an input is bound to exactly one media type; every
/// profile mapped onto it must agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Video,
    Audio,
}

impl MediaType {
    /// Lowercase name as used in the job document.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_display() {
        assert_eq!(MediaType::Video.to_string(), "video");
        assert_eq!(MediaType::Audio.to_string(), "audio");
    }

    #[test]
    fn media_type_serde() {
        let json = serde_json::to_string(&MediaType::Audio).unwrap();
        assert_eq!(json, r#""audio""#);
        let back: MediaType = serde_json::from_str(r#""video""#).unwrap();
        assert_eq!(back, MediaType::Video);
    }
}
