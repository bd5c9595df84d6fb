//! Interned format identifiers.
//!
//! A [`FormatId`] is a small copyable token standing for a container or codec
//! format. Tokens are compared by identity; the canonical string (a caps-like
//! media type such as `video/x-matroska`) is only a projection used for
//! display and serialization.
//!
//! Four formats are pre-registered as constants. Any other name can be
//! registered at runtime with [`FormatId::intern`], which is how new formats
//! are added without touching a closed enumeration.

use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

const BUILTIN_NAMES: [&str; 4] = [
    "application/unknown",
    "video/x-matroska",
    "video/x-h264",
    "audio/x-aac",
];

/// Opaque interned format token.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatId(u32);

impl FormatId {
    /// Passthrough: no transcoding, and for containers no muxing.
    pub const NONE: FormatId = FormatId(0);
    /// Matroska container (audio + video).
    pub const MATROSKA: FormatId = FormatId(1);
    /// H.264 video.
    pub const H264: FormatId = FormatId(2);
    /// AAC audio.
    pub const AAC: FormatId = FormatId(3);

    /// Return the token for `name`, registering it if it is new.
    pub fn intern(name: &str) -> FormatId {
        let registry = REGISTRY.upgradable_read();
        if let Some(id) = registry.lookup(name) {
            return id;
        }
        let id = RwLockUpgradableReadGuard::upgrade(registry).insert(name);
        tracing::debug!(format = name, id = id.0, "Registered format");
        id
    }

    /// Return the token for `name` if it has been registered.
    pub fn lookup(name: &str) -> Option<FormatId> {
        REGISTRY.read().lookup(name)
    }

    /// Return the pre-registered token for `name`, ignoring anything interned
    /// at runtime.
    pub fn builtin(name: &str) -> Option<FormatId> {
        BUILTIN_NAMES
            .iter()
            .position(|builtin| *builtin == name)
            .map(|index| FormatId(index as u32))
    }

    /// Canonical string form of this format.
    pub fn as_str(self) -> &'static str {
        REGISTRY.read().name(self)
    }

    /// Whether this is the passthrough format.
    pub fn is_passthrough(self) -> bool {
        self == Self::NONE
    }
}

impl Default for FormatId {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FormatId({})", self.as_str())
    }
}

impl Serialize for FormatId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FormatId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(FormatId::intern(&name))
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Process-wide name table. Names are never removed, so handing out
/// `&'static str` for leaked entries is sound.
struct Registry {
    names: Vec<&'static str>,
    by_name: HashMap<&'static str, FormatId>,
}

impl Registry {
    fn with_builtins() -> Self {
        let mut registry = Registry {
            names: Vec::with_capacity(BUILTIN_NAMES.len()),
            by_name: HashMap::new(),
        };
        for name in BUILTIN_NAMES {
            registry.push(name);
        }
        registry
    }

    fn lookup(&self, name: &str) -> Option<FormatId> {
        self.by_name.get(name).copied()
    }

    fn insert(&mut self, name: &str) -> FormatId {
        if let Some(id) = self.lookup(name) {
            return id;
        }
        let leaked: &'static str = Box::leak(name.to_owned().into_boxed_str());
        self.push(leaked)
    }

    fn push(&mut self, name: &'static str) -> FormatId {
        let id = FormatId(self.names.len() as u32);
        self.names.push(name);
        self.by_name.insert(name, id);
        id
    }

    fn name(&self, id: FormatId) -> &'static str {
        self.names
            .get(id.0 as usize)
            .copied()
            .unwrap_or(BUILTIN_NAMES[0])
    }
}

static REGISTRY: LazyLock<RwLock<Registry>> =
    LazyLock::new(|| RwLock::new(Registry::with_builtins()));
