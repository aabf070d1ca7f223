//! Reply types for control socket queries
//!
//! Field names follow Hyprland's JSON output exactly. Every type defaults its
//! missing fields, so replies from older or newer compositors still decode.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Workspace reference embedded in clients and monitors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleWorkspace {
    pub id: i64,
    pub name: String,
}

/// A mapped window, as returned by `clients` and `activewindow`
///
/// `activewindow` replies with an empty object when nothing is focused, which
/// decodes to `Client::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Client {
    /// Window address, e.g. `0x5f1a2b3c4d50`
    pub address: String,
    pub mapped: bool,
    pub hidden: bool,
    /// Position `[x, y]` in layout coordinates
    pub at: Vec<i64>,
    /// Size `[width, height]`
    pub size: Vec<i64>,
    pub workspace: SimpleWorkspace,
    pub floating: bool,
    pub pseudo: bool,
    /// Monitor id
    pub monitor: i64,
    pub class: String,
    pub title: String,
    pub initial_class: String,
    pub initial_title: String,
    pub pid: i64,
    pub xwayland: bool,
    pub pinned: bool,
    /// Internal fullscreen mode
    pub fullscreen: i64,
    /// Fullscreen mode reported to the client
    pub fullscreen_client: i64,
    /// Addresses of the windows grouped with this one
    pub grouped: Vec<String>,
    pub tags: Vec<String>,
    /// Address of the swallowed window, or `0x0`
    pub swallowing: String,
    #[serde(rename = "focusHistoryID")]
    pub focus_history_id: i64,
    pub inhibiting_idle: bool,
    pub xdg_tag: String,
    pub xdg_description: String,
}

/// An output, as returned by `monitors`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Monitor {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub make: String,
    pub model: String,
    pub serial: String,
    pub width: i64,
    pub height: i64,
    pub refresh_rate: f64,
    pub x: i64,
    pub y: i64,
    pub active_workspace: SimpleWorkspace,
    /// Id 0 and an empty name when no special workspace is shown
    pub special_workspace: SimpleWorkspace,
    /// Reserved area `[left, top, right, bottom]`
    pub reserved: Vec<i64>,
    pub scale: f64,
    pub transform: i64,
    pub focused: bool,
    pub dpms_status: bool,
    pub vrr: bool,
    pub solitary: String,
    pub actively_tearing: bool,
    pub direct_scanout_to: String,
    pub disabled: bool,
    pub current_format: String,
    pub mirror_of: String,
    pub available_modes: Vec<String>,
}

/// A workspace, as returned by `workspaces` and `activeworkspace`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workspace {
    pub id: i64,
    pub name: String,
    /// Monitor name
    pub monitor: String,
    #[serde(rename = "monitorID")]
    pub monitor_id: i64,
    /// Number of windows
    pub windows: i64,
    #[serde(rename = "hasfullscreen")]
    pub has_fullscreen: bool,
    /// Address of the last focused window
    #[serde(rename = "lastwindow")]
    pub last_window: String,
    #[serde(rename = "lastwindowtitle")]
    pub last_window_title: String,
    #[serde(rename = "ispersistent")]
    pub is_persistent: bool,
}

/// A key binding, as returned by `binds`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bind {
    pub locked: bool,
    pub mouse: bool,
    pub release: bool,
    pub repeat: bool,
    #[serde(rename = "longPress")]
    pub long_press: bool,
    pub non_consuming: bool,
    pub has_description: bool,
    pub modmask: i64,
    pub submap: String,
    pub key: String,
    pub keycode: i64,
    pub catch_all: bool,
    pub description: String,
    pub dispatcher: String,
    pub arg: String,
}

/// Pointer position in global layout coordinates, as returned by `cursorpos`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorPosition {
    pub x: i64,
    pub y: i64,
}

/// One animation tree entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Animation {
    pub name: String,
    pub overridden: bool,
    pub bezier: String,
    pub enabled: bool,
    pub speed: f64,
    pub style: String,
}

/// A named bezier curve
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bezier {
    pub name: String,
}

/// Reply of the `animations` query
///
/// On the wire this is a two-element array: `[[Animation...], [Bezier...]]`.
/// It serializes back to the same shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Animations {
    pub list: Vec<Animation>,
    pub beziers: Vec<Bezier>,
}

impl<'de> Deserialize<'de> for Animations {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [list, beziers] = <[serde_json::Value; 2]>::deserialize(deserializer).map_err(|e| {
            D::Error::custom(format!("expected a 2-element JSON array: {}", e))
        })?;

        let list = Vec::<Animation>::deserialize(list)
            .map_err(|e| D::Error::custom(format!("failed to decode animations: {}", e)))?;
        let beziers = Vec::<Bezier>::deserialize(beziers)
            .map_err(|e| D::Error::custom(format!("failed to decode beziers: {}", e)))?;

        Ok(Self { list, beziers })
    }
}

impl Serialize for Animations {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (&self.list, &self.beziers).serialize(serializer)
    }
}
