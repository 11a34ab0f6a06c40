/// Application-wide session switches, passed explicitly to whatever needs them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFlags {
    /// Strokes are recorded only while a session is active; outside a session the pad is a
    /// plain scratch surface.
    pub session_active: bool,
}

impl SessionFlags {
    pub fn active() -> Self {
        Self {
            session_active: true,
        }
    }
}
