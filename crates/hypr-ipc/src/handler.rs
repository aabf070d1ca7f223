//! Observer interface for the event stream
//!
//! An [`EventHandler`] receives every event in typed form. All methods have
//! empty default bodies, so an implementation only overrides what it cares
//! about. At most one handler is attached to an
//! [`EventListener`](crate::EventListener) at a time, alongside (not instead
//! of) any registered callbacks.

use crate::catalog::Event;
use crate::event::EventContext;

/// Typed observer for Hyprland events
///
/// # Example
///
/// ```ignore
/// struct FocusTracker;
///
/// impl EventHandler for FocusTracker {
///     fn active_window(&self, _ctx: &EventContext, class: &str, title: &str) {
///         println!("focused {} ({})", class, title);
///     }
/// }
///
/// listener.set_handler(Arc::new(FocusTracker));
/// ```
#[allow(unused_variables)]
pub trait EventHandler: Send + Sync {
    /// Called first for every event, known or not
    fn all(&self, ctx: &EventContext) {}

    /// Called for events whose kind is not in the catalog
    fn unknown(&self, ctx: &EventContext) {}

    fn workspace(&self, ctx: &EventContext, name: &str) {}

    fn workspace_v2(&self, ctx: &EventContext, id: i64, name: &str) {}

    fn focused_mon(&self, ctx: &EventContext, monitor: &str, workspace: &str) {}

    fn focused_mon_v2(&self, ctx: &EventContext, monitor: &str, workspace_id: i64) {}

    fn active_window(&self, ctx: &EventContext, class: &str, title: &str) {}

    fn active_window_v2(&self, ctx: &EventContext, address: &str) {}

    fn fullscreen(&self, ctx: &EventContext, fullscreen: bool) {}

    fn monitor_removed(&self, ctx: &EventContext, name: &str) {}

    fn monitor_removed_v2(&self, ctx: &EventContext, id: i64, name: &str, description: &str) {}

    fn monitor_added(&self, ctx: &EventContext, name: &str) {}

    fn monitor_added_v2(&self, ctx: &EventContext, id: i64, name: &str, description: &str) {}

    fn create_workspace(&self, ctx: &EventContext, name: &str) {}

    fn create_workspace_v2(&self, ctx: &EventContext, id: i64, name: &str) {}

    fn destroy_workspace(&self, ctx: &EventContext, name: &str) {}

    fn destroy_workspace_v2(&self, ctx: &EventContext, id: i64, name: &str) {}

    fn move_workspace(&self, ctx: &EventContext, name: &str, monitor: &str) {}

    fn move_workspace_v2(&self, ctx: &EventContext, id: i64, name: &str, monitor: &str) {}

    fn rename_workspace(&self, ctx: &EventContext, id: i64, new_name: &str) {}

    /// `name` is empty when the special workspace was closed
    fn active_special(&self, ctx: &EventContext, name: &str, monitor: &str) {}

    fn active_special_v2(&self, ctx: &EventContext, id: i64, name: &str, monitor: &str) {}

    fn active_layout(&self, ctx: &EventContext, keyboard: &str, layout: &str) {}

    /// `title` stops at its first comma
    fn open_window(
        &self,
        ctx: &EventContext,
        address: &str,
        workspace: &str,
        class: &str,
        title: &str,
    ) {
    }

    fn close_window(&self, ctx: &EventContext, address: &str) {}

    fn move_window(&self, ctx: &EventContext, address: &str, workspace: &str) {}

    fn move_window_v2(
        &self,
        ctx: &EventContext,
        address: &str,
        workspace_id: i64,
        workspace: &str,
    ) {
    }

    fn open_layer(&self, ctx: &EventContext, namespace: &str) {}

    fn close_layer(&self, ctx: &EventContext, namespace: &str) {}

    fn submap(&self, ctx: &EventContext, name: &str) {}

    fn change_floating_mode(&self, ctx: &EventContext, address: &str, floating: bool) {}

    fn urgent(&self, ctx: &EventContext, address: &str) {}

    fn screencast(&self, ctx: &EventContext, state: bool, owner: bool) {}

    fn window_title(&self, ctx: &EventContext, address: &str) {}

    fn window_title_v2(&self, ctx: &EventContext, address: &str, title: &str) {}

    fn toggle_group(&self, ctx: &EventContext, state: bool, addresses: &[String]) {}

    fn move_into_group(&self, ctx: &EventContext, address: &str) {}

    fn move_out_of_group(&self, ctx: &EventContext, address: &str) {}

    fn ignore_group_lock(&self, ctx: &EventContext, state: bool) {}

    fn lock_groups(&self, ctx: &EventContext, state: bool) {}

    fn config_reloaded(&self, ctx: &EventContext) {}

    fn pin(&self, ctx: &EventContext, address: &str, pinned: bool) {}

    fn minimized(&self, ctx: &EventContext, address: &str, minimized: bool) {}

    fn bell(&self, ctx: &EventContext, address: &str) {}
}

/// Call the handler method matching a decoded event
pub(crate) fn deliver(handler: &dyn EventHandler, ctx: &EventContext, event: &Event) {
    match event {
        Event::Workspace { name } => handler.workspace(ctx, name),
        Event::WorkspaceV2 { id, name } => handler.workspace_v2(ctx, *id, name),
        Event::FocusedMon { monitor, workspace } => handler.focused_mon(ctx, monitor, workspace),
        Event::FocusedMonV2 {
            monitor,
            workspace_id,
        } => handler.focused_mon_v2(ctx, monitor, *workspace_id),
        Event::ActiveWindow { class, title } => handler.active_window(ctx, class, title),
        Event::ActiveWindowV2 { address } => handler.active_window_v2(ctx, address),
        Event::Fullscreen { fullscreen } => handler.fullscreen(ctx, *fullscreen),
        Event::MonitorRemoved { name } => handler.monitor_removed(ctx, name),
        Event::MonitorRemovedV2 {
            id,
            name,
            description,
        } => handler.monitor_removed_v2(ctx, *id, name, description),
        Event::MonitorAdded { name } => handler.monitor_added(ctx, name),
        Event::MonitorAddedV2 {
            id,
            name,
            description,
        } => handler.monitor_added_v2(ctx, *id, name, description),
        Event::CreateWorkspace { name } => handler.create_workspace(ctx, name),
        Event::CreateWorkspaceV2 { id, name } => handler.create_workspace_v2(ctx, *id, name),
        Event::DestroyWorkspace { name } => handler.destroy_workspace(ctx, name),
        Event::DestroyWorkspaceV2 { id, name } => handler.destroy_workspace_v2(ctx, *id, name),
        Event::MoveWorkspace { name, monitor } => handler.move_workspace(ctx, name, monitor),
        Event::MoveWorkspaceV2 { id, name, monitor } => {
            handler.move_workspace_v2(ctx, *id, name, monitor)
        }
        Event::RenameWorkspace { id, new_name } => handler.rename_workspace(ctx, *id, new_name),
        Event::ActiveSpecial { name, monitor } => handler.active_special(ctx, name, monitor),
        Event::ActiveSpecialV2 { id, name, monitor } => {
            handler.active_special_v2(ctx, *id, name, monitor)
        }
        Event::ActiveLayout { keyboard, layout } => handler.active_layout(ctx, keyboard, layout),
        Event::OpenWindow {
            address,
            workspace,
            class,
            title,
        } => handler.open_window(ctx, address, workspace, class, title),
        Event::CloseWindow { address } => handler.close_window(ctx, address),
        Event::MoveWindow { address, workspace } => handler.move_window(ctx, address, workspace),
        Event::MoveWindowV2 {
            address,
            workspace_id,
            workspace,
        } => handler.move_window_v2(ctx, address, *workspace_id, workspace),
        Event::OpenLayer { namespace } => handler.open_layer(ctx, namespace),
        Event::CloseLayer { namespace } => handler.close_layer(ctx, namespace),
        Event::Submap { name } => handler.submap(ctx, name),
        Event::ChangeFloatingMode { address, floating } => {
            handler.change_floating_mode(ctx, address, *floating)
        }
        Event::Urgent { address } => handler.urgent(ctx, address),
        Event::Screencast { state, owner } => handler.screencast(ctx, *state, *owner),
        Event::WindowTitle { address } => handler.window_title(ctx, address),
        Event::WindowTitleV2 { address, title } => handler.window_title_v2(ctx, address, title),
        Event::ToggleGroup { state, addresses } => handler.toggle_group(ctx, *state, addresses),
        Event::MoveIntoGroup { address } => handler.move_into_group(ctx, address),
        Event::MoveOutOfGroup { address } => handler.move_out_of_group(ctx, address),
        Event::IgnoreGroupLock { state } => handler.ignore_group_lock(ctx, *state),
        Event::LockGroups { state } => handler.lock_groups(ctx, *state),
        Event::ConfigReloaded => handler.config_reloaded(ctx),
        Event::Pin { address, pinned } => handler.pin(ctx, address, *pinned),
        Event::Minimized { address, minimized } => handler.minimized(ctx, address, *minimized),
        Event::Bell { address } => handler.bell(ctx, address),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EventKind;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn push(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl EventHandler for Recorder {
        fn workspace_v2(&self, _ctx: &EventContext, id: i64, name: &str) {
            self.push(format!("workspace_v2 {} {}", id, name));
        }

        fn toggle_group(&self, _ctx: &EventContext, state: bool, addresses: &[String]) {
            self.push(format!("toggle_group {} {}", state, addresses.join("|")));
        }

        fn config_reloaded(&self, _ctx: &EventContext) {
            self.push("config_reloaded".to_string());
        }
    }

    fn deliver_line(handler: &dyn EventHandler, line: &str) {
        let ctx = EventContext::parse(line).unwrap();
        let kind = ctx.known_kind().unwrap();
        let event = Event::decode(kind, ctx.data()).unwrap();
        deliver(handler, &ctx, &event);
    }

    #[test]
    fn test_deliver_routes_to_matching_method() {
        let recorder = Recorder::default();
        deliver_line(&recorder, "workspacev2>>3,coding");
        deliver_line(&recorder, "togglegroup>>1,aa,bb");
        deliver_line(&recorder, "configreloaded>>");

        assert_eq!(
            *recorder.calls.lock().unwrap(),
            vec![
                "workspace_v2 3 coding".to_string(),
                "toggle_group true aa|bb".to_string(),
                "config_reloaded".to_string(),
            ]
        );
    }

    #[test]
    fn test_default_methods_are_no_ops() {
        struct Nothing;
        impl EventHandler for Nothing {}

        // "workspace" is not overridden by the recorder either
        let recorder = Recorder::default();
        deliver_line(&recorder, "workspace>>3");
        assert!(recorder.calls.lock().unwrap().is_empty());

        for kind in EventKind::ALL {
            if let Ok(event) = Event::decode(kind, "1,1,1,1") {
                let ctx = EventContext::parse(&format!("{}>>1,1,1,1", kind)).unwrap();
                deliver(&Nothing, &ctx, &event);
            }
        }
    }
}
