//! Catalog of known Hyprland events
//!
//! [`EventKind`] is the closed set of event names this crate understands.
//! Each kind has a fixed [`Shape`] describing its arguments, and
//! [`Event::decode`] turns a kind plus raw tail into a typed [`Event`].
//!
//! Lines with any other kind token are still delivered, as unknown events,
//! through the raw [`EventContext`](crate::EventContext).

use std::fmt;
use std::str::FromStr;

use crate::codec::{self, DecodeError, FieldType, Shape, Value};

use FieldType::{Bool, Int, List, Str};

const NONE: Shape = Shape::spilled(&[]);
const STR: Shape = Shape::spilled(&[Str]);
const BOOL: Shape = Shape::spilled(&[Bool]);
const INT_STR: Shape = Shape::spilled(&[Int, Str]);
const STR_STR: Shape = Shape::spilled(&[Str, Str]);
const STR_INT: Shape = Shape::spilled(&[Str, Int]);
const STR_BOOL: Shape = Shape::spilled(&[Str, Bool]);
const BOOL_BOOL: Shape = Shape::spilled(&[Bool, Bool]);
const BOOL_LIST: Shape = Shape::spilled(&[Bool, List]);
const INT_STR_STR: Shape = Shape::spilled(&[Int, Str, Str]);
const STR_INT_STR: Shape = Shape::spilled(&[Str, Int, Str]);
// The title is not spilled: a comma inside it cuts the title short.
const OPEN_WINDOW: Shape = Shape::split(&[Str, Str, Str, Str]);

/// A known Hyprland event name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// `workspace>>WORKSPACENAME`
    Workspace,
    /// `workspacev2>>WORKSPACEID,WORKSPACENAME`
    WorkspaceV2,
    /// `focusedmon>>MONNAME,WORKSPACENAME`
    FocusedMon,
    /// `focusedmonv2>>MONNAME,WORKSPACEID`
    FocusedMonV2,
    /// `activewindow>>WINDOWCLASS,WINDOWTITLE`
    ActiveWindow,
    /// `activewindowv2>>WINDOWADDRESS`
    ActiveWindowV2,
    /// `fullscreen>>0|1`
    Fullscreen,
    /// `monitorremoved>>MONITORNAME`
    MonitorRemoved,
    /// `monitorremovedv2>>MONITORID,MONITORNAME,MONITORDESCRIPTION`
    MonitorRemovedV2,
    /// `monitoradded>>MONITORNAME`
    MonitorAdded,
    /// `monitoraddedv2>>MONITORID,MONITORNAME,MONITORDESCRIPTION`
    MonitorAddedV2,
    /// `createworkspace>>WORKSPACENAME`
    CreateWorkspace,
    /// `createworkspacev2>>WORKSPACEID,WORKSPACENAME`
    CreateWorkspaceV2,
    /// `destroyworkspace>>WORKSPACENAME`
    DestroyWorkspace,
    /// `destroyworkspacev2>>WORKSPACEID,WORKSPACENAME`
    DestroyWorkspaceV2,
    /// `moveworkspace>>WORKSPACENAME,MONNAME`
    MoveWorkspace,
    /// `moveworkspacev2>>WORKSPACEID,WORKSPACENAME,MONNAME`
    MoveWorkspaceV2,
    /// `renameworkspace>>WORKSPACEID,NEWNAME`
    RenameWorkspace,
    /// `activespecial>>WORKSPACENAME,MONNAME`
    ActiveSpecial,
    /// `activespecialv2>>WORKSPACEID,WORKSPACENAME,MONNAME`
    ActiveSpecialV2,
    /// `activelayout>>KEYBOARDNAME,LAYOUTNAME`
    ActiveLayout,
    /// `openwindow>>WINDOWADDRESS,WORKSPACENAME,WINDOWCLASS,WINDOWTITLE`
    OpenWindow,
    /// `closewindow>>WINDOWADDRESS`
    CloseWindow,
    /// `movewindow>>WINDOWADDRESS,WORKSPACENAME`
    MoveWindow,
    /// `movewindowv2>>WINDOWADDRESS,WORKSPACEID,WORKSPACENAME`
    MoveWindowV2,
    /// `openlayer>>NAMESPACE`
    OpenLayer,
    /// `closelayer>>NAMESPACE`
    CloseLayer,
    /// `submap>>SUBMAPNAME` (empty for the default submap)
    Submap,
    /// `changefloatingmode>>WINDOWADDRESS,FLOATING`
    ChangeFloatingMode,
    /// `urgent>>WINDOWADDRESS`
    Urgent,
    /// `screencast>>STATE,OWNER`
    Screencast,
    /// `windowtitle>>WINDOWADDRESS`
    WindowTitle,
    /// `windowtitlev2>>WINDOWADDRESS,WINDOWTITLE`
    WindowTitleV2,
    /// `togglegroup>>STATE,WINDOWADDRESS[,WINDOWADDRESS...]`
    ToggleGroup,
    /// `moveintogroup>>WINDOWADDRESS`
    MoveIntoGroup,
    /// `moveoutofgroup>>WINDOWADDRESS`
    MoveOutOfGroup,
    /// `ignoregrouplock>>0|1`
    IgnoreGroupLock,
    /// `lockgroups>>0|1`
    LockGroups,
    /// `configreloaded>>`
    ConfigReloaded,
    /// `pin>>WINDOWADDRESS,PINSTATE`
    Pin,
    /// `minimized>>WINDOWADDRESS,0|1`
    Minimized,
    /// `bell>>WINDOWADDRESS` (address may be empty)
    Bell,
}

impl EventKind {
    /// Every known kind, in catalog order
    pub const ALL: [EventKind; 42] = [
        Self::Workspace,
        Self::WorkspaceV2,
        Self::FocusedMon,
        Self::FocusedMonV2,
        Self::ActiveWindow,
        Self::ActiveWindowV2,
        Self::Fullscreen,
        Self::MonitorRemoved,
        Self::MonitorRemovedV2,
        Self::MonitorAdded,
        Self::MonitorAddedV2,
        Self::CreateWorkspace,
        Self::CreateWorkspaceV2,
        Self::DestroyWorkspace,
        Self::DestroyWorkspaceV2,
        Self::MoveWorkspace,
        Self::MoveWorkspaceV2,
        Self::RenameWorkspace,
        Self::ActiveSpecial,
        Self::ActiveSpecialV2,
        Self::ActiveLayout,
        Self::OpenWindow,
        Self::CloseWindow,
        Self::MoveWindow,
        Self::MoveWindowV2,
        Self::OpenLayer,
        Self::CloseLayer,
        Self::Submap,
        Self::ChangeFloatingMode,
        Self::Urgent,
        Self::Screencast,
        Self::WindowTitle,
        Self::WindowTitleV2,
        Self::ToggleGroup,
        Self::MoveIntoGroup,
        Self::MoveOutOfGroup,
        Self::IgnoreGroupLock,
        Self::LockGroups,
        Self::ConfigReloaded,
        Self::Pin,
        Self::Minimized,
        Self::Bell,
    ];

    /// The wire name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Workspace => "workspace",
            Self::WorkspaceV2 => "workspacev2",
            Self::FocusedMon => "focusedmon",
            Self::FocusedMonV2 => "focusedmonv2",
            Self::ActiveWindow => "activewindow",
            Self::ActiveWindowV2 => "activewindowv2",
            Self::Fullscreen => "fullscreen",
            Self::MonitorRemoved => "monitorremoved",
            Self::MonitorRemovedV2 => "monitorremovedv2",
            Self::MonitorAdded => "monitoradded",
            Self::MonitorAddedV2 => "monitoraddedv2",
            Self::CreateWorkspace => "createworkspace",
            Self::CreateWorkspaceV2 => "createworkspacev2",
            Self::DestroyWorkspace => "destroyworkspace",
            Self::DestroyWorkspaceV2 => "destroyworkspacev2",
            Self::MoveWorkspace => "moveworkspace",
            Self::MoveWorkspaceV2 => "moveworkspacev2",
            Self::RenameWorkspace => "renameworkspace",
            Self::ActiveSpecial => "activespecial",
            Self::ActiveSpecialV2 => "activespecialv2",
            Self::ActiveLayout => "activelayout",
            Self::OpenWindow => "openwindow",
            Self::CloseWindow => "closewindow",
            Self::MoveWindow => "movewindow",
            Self::MoveWindowV2 => "movewindowv2",
            Self::OpenLayer => "openlayer",
            Self::CloseLayer => "closelayer",
            Self::Submap => "submap",
            Self::ChangeFloatingMode => "changefloatingmode",
            Self::Urgent => "urgent",
            Self::Screencast => "screencast",
            Self::WindowTitle => "windowtitle",
            Self::WindowTitleV2 => "windowtitlev2",
            Self::ToggleGroup => "togglegroup",
            Self::MoveIntoGroup => "moveintogroup",
            Self::MoveOutOfGroup => "moveoutofgroup",
            Self::IgnoreGroupLock => "ignoregrouplock",
            Self::LockGroups => "lockgroups",
            Self::ConfigReloaded => "configreloaded",
            Self::Pin => "pin",
            Self::Minimized => "minimized",
            Self::Bell => "bell",
        }
    }

    /// Look up a kind by its exact wire name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Whether `name` is a known event name
    pub fn is_known(name: &str) -> bool {
        Self::from_name(name).is_some()
    }

    /// Argument layout for this kind
    pub fn shape(&self) -> Shape {
        match self {
            Self::ConfigReloaded => NONE,

            Self::Workspace
            | Self::ActiveWindowV2
            | Self::MonitorRemoved
            | Self::MonitorAdded
            | Self::CreateWorkspace
            | Self::DestroyWorkspace
            | Self::CloseWindow
            | Self::OpenLayer
            | Self::CloseLayer
            | Self::Submap
            | Self::Urgent
            | Self::WindowTitle
            | Self::MoveIntoGroup
            | Self::MoveOutOfGroup
            | Self::Bell => STR,

            Self::Fullscreen | Self::IgnoreGroupLock | Self::LockGroups => BOOL,

            Self::WorkspaceV2
            | Self::CreateWorkspaceV2
            | Self::DestroyWorkspaceV2
            | Self::RenameWorkspace => INT_STR,

            Self::FocusedMon
            | Self::ActiveWindow
            | Self::MoveWorkspace
            | Self::ActiveSpecial
            | Self::ActiveLayout
            | Self::MoveWindow
            | Self::WindowTitleV2 => STR_STR,

            Self::FocusedMonV2 => STR_INT,

            Self::ChangeFloatingMode | Self::Pin | Self::Minimized => STR_BOOL,

            Self::Screencast => BOOL_BOOL,

            Self::ToggleGroup => BOOL_LIST,

            Self::MonitorRemovedV2
            | Self::MonitorAddedV2
            | Self::MoveWorkspaceV2
            | Self::ActiveSpecialV2 => INT_STR_STR,

            Self::MoveWindowV2 => STR_INT_STR,

            Self::OpenWindow => OPEN_WINDOW,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("Unknown event kind: {}", s))
    }
}

/// A decoded event with its typed arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Workspace { name: String },
    WorkspaceV2 { id: i64, name: String },
    FocusedMon { monitor: String, workspace: String },
    FocusedMonV2 { monitor: String, workspace_id: i64 },
    ActiveWindow { class: String, title: String },
    ActiveWindowV2 { address: String },
    Fullscreen { fullscreen: bool },
    MonitorRemoved { name: String },
    MonitorRemovedV2 { id: i64, name: String, description: String },
    MonitorAdded { name: String },
    MonitorAddedV2 { id: i64, name: String, description: String },
    CreateWorkspace { name: String },
    CreateWorkspaceV2 { id: i64, name: String },
    DestroyWorkspace { name: String },
    DestroyWorkspaceV2 { id: i64, name: String },
    MoveWorkspace { name: String, monitor: String },
    MoveWorkspaceV2 { id: i64, name: String, monitor: String },
    RenameWorkspace { id: i64, new_name: String },
    ActiveSpecial { name: String, monitor: String },
    ActiveSpecialV2 { id: i64, name: String, monitor: String },
    ActiveLayout { keyboard: String, layout: String },
    OpenWindow {
        address: String,
        workspace: String,
        class: String,
        title: String,
    },
    CloseWindow { address: String },
    MoveWindow { address: String, workspace: String },
    MoveWindowV2 {
        address: String,
        workspace_id: i64,
        workspace: String,
    },
    OpenLayer { namespace: String },
    CloseLayer { namespace: String },
    Submap { name: String },
    ChangeFloatingMode { address: String, floating: bool },
    Urgent { address: String },
    /// `owner` is true for a window share, false for a monitor share
    Screencast { state: bool, owner: bool },
    WindowTitle { address: String },
    WindowTitleV2 { address: String, title: String },
    /// `state` is true when a group was created, false when destroyed
    ToggleGroup { state: bool, addresses: Vec<String> },
    MoveIntoGroup { address: String },
    MoveOutOfGroup { address: String },
    IgnoreGroupLock { state: bool },
    LockGroups { state: bool },
    ConfigReloaded,
    Pin { address: String, pinned: bool },
    Minimized { address: String, minimized: bool },
    Bell { address: String },
}

impl Event {
    /// Decode the raw tail of a `kind` line
    pub fn decode(kind: EventKind, tail: &str) -> Result<Self, DecodeError> {
        let mut args = Args(codec::decode(tail, &kind.shape())?.into_iter());

        let event = match kind {
            EventKind::Workspace => Self::Workspace { name: args.str() },
            EventKind::WorkspaceV2 => Self::WorkspaceV2 {
                id: args.int(),
                name: args.str(),
            },
            EventKind::FocusedMon => Self::FocusedMon {
                monitor: args.str(),
                workspace: args.str(),
            },
            EventKind::FocusedMonV2 => Self::FocusedMonV2 {
                monitor: args.str(),
                workspace_id: args.int(),
            },
            EventKind::ActiveWindow => Self::ActiveWindow {
                class: args.str(),
                title: args.str(),
            },
            EventKind::ActiveWindowV2 => Self::ActiveWindowV2 {
                address: args.str(),
            },
            EventKind::Fullscreen => Self::Fullscreen {
                fullscreen: args.bool(),
            },
            EventKind::MonitorRemoved => Self::MonitorRemoved { name: args.str() },
            EventKind::MonitorRemovedV2 => Self::MonitorRemovedV2 {
                id: args.int(),
                name: args.str(),
                description: args.str(),
            },
            EventKind::MonitorAdded => Self::MonitorAdded { name: args.str() },
            EventKind::MonitorAddedV2 => Self::MonitorAddedV2 {
                id: args.int(),
                name: args.str(),
                description: args.str(),
            },
            EventKind::CreateWorkspace => Self::CreateWorkspace { name: args.str() },
            EventKind::CreateWorkspaceV2 => Self::CreateWorkspaceV2 {
                id: args.int(),
                name: args.str(),
            },
            EventKind::DestroyWorkspace => Self::DestroyWorkspace { name: args.str() },
            EventKind::DestroyWorkspaceV2 => Self::DestroyWorkspaceV2 {
                id: args.int(),
                name: args.str(),
            },
            EventKind::MoveWorkspace => Self::MoveWorkspace {
                name: args.str(),
                monitor: args.str(),
            },
            EventKind::MoveWorkspaceV2 => Self::MoveWorkspaceV2 {
                id: args.int(),
                name: args.str(),
                monitor: args.str(),
            },
            EventKind::RenameWorkspace => Self::RenameWorkspace {
                id: args.int(),
                new_name: args.str(),
            },
            EventKind::ActiveSpecial => Self::ActiveSpecial {
                name: args.str(),
                monitor: args.str(),
            },
            EventKind::ActiveSpecialV2 => Self::ActiveSpecialV2 {
                id: args.int(),
                name: args.str(),
                monitor: args.str(),
            },
            EventKind::ActiveLayout => Self::ActiveLayout {
                keyboard: args.str(),
                layout: args.str(),
            },
            EventKind::OpenWindow => Self::OpenWindow {
                address: args.str(),
                workspace: args.str(),
                class: args.str(),
                title: args.str(),
            },
            EventKind::CloseWindow => Self::CloseWindow {
                address: args.str(),
            },
            EventKind::MoveWindow => Self::MoveWindow {
                address: args.str(),
                workspace: args.str(),
            },
            EventKind::MoveWindowV2 => Self::MoveWindowV2 {
                address: args.str(),
                workspace_id: args.int(),
                workspace: args.str(),
            },
            EventKind::OpenLayer => Self::OpenLayer {
                namespace: args.str(),
            },
            EventKind::CloseLayer => Self::CloseLayer {
                namespace: args.str(),
            },
            EventKind::Submap => Self::Submap { name: args.str() },
            EventKind::ChangeFloatingMode => Self::ChangeFloatingMode {
                address: args.str(),
                floating: args.bool(),
            },
            EventKind::Urgent => Self::Urgent {
                address: args.str(),
            },
            EventKind::Screencast => Self::Screencast {
                state: args.bool(),
                owner: args.bool(),
            },
            EventKind::WindowTitle => Self::WindowTitle {
                address: args.str(),
            },
            EventKind::WindowTitleV2 => Self::WindowTitleV2 {
                address: args.str(),
                title: args.str(),
            },
            EventKind::ToggleGroup => Self::ToggleGroup {
                state: args.bool(),
                addresses: args.list(),
            },
            EventKind::MoveIntoGroup => Self::MoveIntoGroup {
                address: args.str(),
            },
            EventKind::MoveOutOfGroup => Self::MoveOutOfGroup {
                address: args.str(),
            },
            EventKind::IgnoreGroupLock => Self::IgnoreGroupLock { state: args.bool() },
            EventKind::LockGroups => Self::LockGroups { state: args.bool() },
            EventKind::ConfigReloaded => Self::ConfigReloaded,
            EventKind::Pin => Self::Pin {
                address: args.str(),
                pinned: args.bool(),
            },
            EventKind::Minimized => Self::Minimized {
                address: args.str(),
                minimized: args.bool(),
            },
            EventKind::Bell => Self::Bell {
                address: args.str(),
            },
        };

        Ok(event)
    }

    /// The kind this event was decoded from
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Workspace { .. } => EventKind::Workspace,
            Self::WorkspaceV2 { .. } => EventKind::WorkspaceV2,
            Self::FocusedMon { .. } => EventKind::FocusedMon,
            Self::FocusedMonV2 { .. } => EventKind::FocusedMonV2,
            Self::ActiveWindow { .. } => EventKind::ActiveWindow,
            Self::ActiveWindowV2 { .. } => EventKind::ActiveWindowV2,
            Self::Fullscreen { .. } => EventKind::Fullscreen,
            Self::MonitorRemoved { .. } => EventKind::MonitorRemoved,
            Self::MonitorRemovedV2 { .. } => EventKind::MonitorRemovedV2,
            Self::MonitorAdded { .. } => EventKind::MonitorAdded,
            Self::MonitorAddedV2 { .. } => EventKind::MonitorAddedV2,
            Self::CreateWorkspace { .. } => EventKind::CreateWorkspace,
            Self::CreateWorkspaceV2 { .. } => EventKind::CreateWorkspaceV2,
            Self::DestroyWorkspace { .. } => EventKind::DestroyWorkspace,
            Self::DestroyWorkspaceV2 { .. } => EventKind::DestroyWorkspaceV2,
            Self::MoveWorkspace { .. } => EventKind::MoveWorkspace,
            Self::MoveWorkspaceV2 { .. } => EventKind::MoveWorkspaceV2,
            Self::RenameWorkspace { .. } => EventKind::RenameWorkspace,
            Self::ActiveSpecial { .. } => EventKind::ActiveSpecial,
            Self::ActiveSpecialV2 { .. } => EventKind::ActiveSpecialV2,
            Self::ActiveLayout { .. } => EventKind::ActiveLayout,
            Self::OpenWindow { .. } => EventKind::OpenWindow,
            Self::CloseWindow { .. } => EventKind::CloseWindow,
            Self::MoveWindow { .. } => EventKind::MoveWindow,
            Self::MoveWindowV2 { .. } => EventKind::MoveWindowV2,
            Self::OpenLayer { .. } => EventKind::OpenLayer,
            Self::CloseLayer { .. } => EventKind::CloseLayer,
            Self::Submap { .. } => EventKind::Submap,
            Self::ChangeFloatingMode { .. } => EventKind::ChangeFloatingMode,
            Self::Urgent { .. } => EventKind::Urgent,
            Self::Screencast { .. } => EventKind::Screencast,
            Self::WindowTitle { .. } => EventKind::WindowTitle,
            Self::WindowTitleV2 { .. } => EventKind::WindowTitleV2,
            Self::ToggleGroup { .. } => EventKind::ToggleGroup,
            Self::MoveIntoGroup { .. } => EventKind::MoveIntoGroup,
            Self::MoveOutOfGroup { .. } => EventKind::MoveOutOfGroup,
            Self::IgnoreGroupLock { .. } => EventKind::IgnoreGroupLock,
            Self::LockGroups { .. } => EventKind::LockGroups,
            Self::ConfigReloaded => EventKind::ConfigReloaded,
            Self::Pin { .. } => EventKind::Pin,
            Self::Minimized { .. } => EventKind::Minimized,
            Self::Bell { .. } => EventKind::Bell,
        }
    }
}

/// Positional reader over decoded values
///
/// The codec has already checked every value against the kind's shape, so a
/// type mismatch here means the shape table and `Event::decode` disagree.
struct Args(std::vec::IntoIter<Value>);

impl Args {
    fn int(&mut self) -> i64 {
        match self.0.next() {
            Some(Value::Int(v)) => v,
            other => unreachable!("shape mismatch: expected int, got {:?}", other),
        }
    }

    fn bool(&mut self) -> bool {
        match self.0.next() {
            Some(Value::Bool(v)) => v,
            other => unreachable!("shape mismatch: expected bool, got {:?}", other),
        }
    }

    fn str(&mut self) -> String {
        match self.0.next() {
            Some(Value::Str(v)) => v,
            other => unreachable!("shape mismatch: expected string, got {:?}", other),
        }
    }

    fn list(&mut self) -> Vec<String> {
        match self.0.next() {
            Some(Value::List(v)) => v,
            other => unreachable!("shape mismatch: expected list, got {:?}", other),
        }
    }
}
