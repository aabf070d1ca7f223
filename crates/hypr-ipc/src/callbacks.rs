//! Typed callback registration
//!
//! One `on_<kind>` method per catalog entry. Each registers a callback for its
//! own kind only (adding that kind to the subscription set) and receives the
//! kind's arguments already converted.

use crate::catalog::{Event, EventKind};
use crate::event::EventContext;
use crate::listener::EventListener;

impl EventListener {
    /// Register the callback for `workspace` events
    pub fn on_workspace<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::Workspace, move |ctx, event| {
            if let Event::Workspace { name } = event {
                callback(ctx, name);
            }
        });
    }

    /// Register the callback for `workspacev2` events
    pub fn on_workspace_v2<F>(&self, callback: F)
    where
        F: Fn(&EventContext, i64, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::WorkspaceV2, move |ctx, event| {
            if let Event::WorkspaceV2 { id, name } = event {
                callback(ctx, *id, name);
            }
        });
    }

    /// Register the callback for `focusedmon` events
    pub fn on_focused_mon<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::FocusedMon, move |ctx, event| {
            if let Event::FocusedMon { monitor, workspace } = event {
                callback(ctx, monitor, workspace);
            }
        });
    }

    /// Register the callback for `focusedmonv2` events
    pub fn on_focused_mon_v2<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str, i64) + Send + Sync + 'static,
    {
        self.on(EventKind::FocusedMonV2, move |ctx, event| {
            if let Event::FocusedMonV2 { monitor, workspace_id } = event {
                callback(ctx, monitor, *workspace_id);
            }
        });
    }

    /// Register the callback for `activewindow` events
    pub fn on_active_window<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::ActiveWindow, move |ctx, event| {
            if let Event::ActiveWindow { class, title } = event {
                callback(ctx, class, title);
            }
        });
    }

    /// Register the callback for `activewindowv2` events
    pub fn on_active_window_v2<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::ActiveWindowV2, move |ctx, event| {
            if let Event::ActiveWindowV2 { address } = event {
                callback(ctx, address);
            }
        });
    }

    /// Register the callback for `fullscreen` events
    pub fn on_fullscreen<F>(&self, callback: F)
    where
        F: Fn(&EventContext, bool) + Send + Sync + 'static,
    {
        self.on(EventKind::Fullscreen, move |ctx, event| {
            if let Event::Fullscreen { fullscreen } = event {
                callback(ctx, *fullscreen);
            }
        });
    }

    /// Register the callback for `monitorremoved` events
    pub fn on_monitor_removed<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::MonitorRemoved, move |ctx, event| {
            if let Event::MonitorRemoved { name } = event {
                callback(ctx, name);
            }
        });
    }

    /// Register the callback for `monitorremovedv2` events
    pub fn on_monitor_removed_v2<F>(&self, callback: F)
    where
        F: Fn(&EventContext, i64, &str, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::MonitorRemovedV2, move |ctx, event| {
            if let Event::MonitorRemovedV2 { id, name, description } = event {
                callback(ctx, *id, name, description);
            }
        });
    }

    /// Register the callback for `monitoradded` events
    pub fn on_monitor_added<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::MonitorAdded, move |ctx, event| {
            if let Event::MonitorAdded { name } = event {
                callback(ctx, name);
            }
        });
    }

    /// Register the callback for `monitoraddedv2` events
    pub fn on_monitor_added_v2<F>(&self, callback: F)
    where
        F: Fn(&EventContext, i64, &str, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::MonitorAddedV2, move |ctx, event| {
            if let Event::MonitorAddedV2 { id, name, description } = event {
                callback(ctx, *id, name, description);
            }
        });
    }

    /// Register the callback for `createworkspace` events
    pub fn on_create_workspace<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::CreateWorkspace, move |ctx, event| {
            if let Event::CreateWorkspace { name } = event {
                callback(ctx, name);
            }
        });
    }

    /// Register the callback for `createworkspacev2` events
    pub fn on_create_workspace_v2<F>(&self, callback: F)
    where
        F: Fn(&EventContext, i64, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::CreateWorkspaceV2, move |ctx, event| {
            if let Event::CreateWorkspaceV2 { id, name } = event {
                callback(ctx, *id, name);
            }
        });
    }

    /// Register the callback for `destroyworkspace` events
    pub fn on_destroy_workspace<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::DestroyWorkspace, move |ctx, event| {
            if let Event::DestroyWorkspace { name } = event {
                callback(ctx, name);
            }
        });
    }

    /// Register the callback for `destroyworkspacev2` events
    pub fn on_destroy_workspace_v2<F>(&self, callback: F)
    where
        F: Fn(&EventContext, i64, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::DestroyWorkspaceV2, move |ctx, event| {
            if let Event::DestroyWorkspaceV2 { id, name } = event {
                callback(ctx, *id, name);
            }
        });
    }

    /// Register the callback for `moveworkspace` events
    pub fn on_move_workspace<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::MoveWorkspace, move |ctx, event| {
            if let Event::MoveWorkspace { name, monitor } = event {
                callback(ctx, name, monitor);
            }
        });
    }

    /// Register the callback for `moveworkspacev2` events
    pub fn on_move_workspace_v2<F>(&self, callback: F)
    where
        F: Fn(&EventContext, i64, &str, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::MoveWorkspaceV2, move |ctx, event| {
            if let Event::MoveWorkspaceV2 { id, name, monitor } = event {
                callback(ctx, *id, name, monitor);
            }
        });
    }

    /// Register the callback for `renameworkspace` events
    pub fn on_rename_workspace<F>(&self, callback: F)
    where
        F: Fn(&EventContext, i64, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::RenameWorkspace, move |ctx, event| {
            if let Event::RenameWorkspace { id, new_name } = event {
                callback(ctx, *id, new_name);
            }
        });
    }

    /// Register the callback for `activespecial` events
    ///
    /// The workspace name is empty when the special workspace was closed.
    pub fn on_active_special<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::ActiveSpecial, move |ctx, event| {
            if let Event::ActiveSpecial { name, monitor } = event {
                callback(ctx, name, monitor);
            }
        });
    }

    /// Register the callback for `activespecialv2` events
    ///
    /// Closing a special workspace sends an empty id, which fails to decode.
    pub fn on_active_special_v2<F>(&self, callback: F)
    where
        F: Fn(&EventContext, i64, &str, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::ActiveSpecialV2, move |ctx, event| {
            if let Event::ActiveSpecialV2 { id, name, monitor } = event {
                callback(ctx, *id, name, monitor);
            }
        });
    }

    /// Register the callback for `activelayout` events
    pub fn on_active_layout<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::ActiveLayout, move |ctx, event| {
            if let Event::ActiveLayout { keyboard, layout } = event {
                callback(ctx, keyboard, layout);
            }
        });
    }

    /// Register the callback for `openwindow` events
    ///
    /// The title is cut at its first comma.
    pub fn on_open_window<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str, &str, &str, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::OpenWindow, move |ctx, event| {
            if let Event::OpenWindow { address, workspace, class, title } = event {
                callback(ctx, address, workspace, class, title);
            }
        });
    }

    /// Register the callback for `closewindow` events
    pub fn on_close_window<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::CloseWindow, move |ctx, event| {
            if let Event::CloseWindow { address } = event {
                callback(ctx, address);
            }
        });
    }

    /// Register the callback for `movewindow` events
    pub fn on_move_window<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::MoveWindow, move |ctx, event| {
            if let Event::MoveWindow { address, workspace } = event {
                callback(ctx, address, workspace);
            }
        });
    }

    /// Register the callback for `movewindowv2` events
    pub fn on_move_window_v2<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str, i64, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::MoveWindowV2, move |ctx, event| {
            if let Event::MoveWindowV2 { address, workspace_id, workspace } = event {
                callback(ctx, address, *workspace_id, workspace);
            }
        });
    }

    /// Register the callback for `openlayer` events
    pub fn on_open_layer<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::OpenLayer, move |ctx, event| {
            if let Event::OpenLayer { namespace } = event {
                callback(ctx, namespace);
            }
        });
    }

    /// Register the callback for `closelayer` events
    pub fn on_close_layer<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::CloseLayer, move |ctx, event| {
            if let Event::CloseLayer { namespace } = event {
                callback(ctx, namespace);
            }
        });
    }

    /// Register the callback for `submap` events
    ///
    /// The name is empty when the default submap is restored.
    pub fn on_submap<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::Submap, move |ctx, event| {
            if let Event::Submap { name } = event {
                callback(ctx, name);
            }
        });
    }

    /// Register the callback for `changefloatingmode` events
    pub fn on_change_floating_mode<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str, bool) + Send + Sync + 'static,
    {
        self.on(EventKind::ChangeFloatingMode, move |ctx, event| {
            if let Event::ChangeFloatingMode { address, floating } = event {
                callback(ctx, address, *floating);
            }
        });
    }

    /// Register the callback for `urgent` events
    pub fn on_urgent<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::Urgent, move |ctx, event| {
            if let Event::Urgent { address } = event {
                callback(ctx, address);
            }
        });
    }

    /// Register the callback for `screencast` events
    pub fn on_screencast<F>(&self, callback: F)
    where
        F: Fn(&EventContext, bool, bool) + Send + Sync + 'static,
    {
        self.on(EventKind::Screencast, move |ctx, event| {
            if let Event::Screencast { state, owner } = event {
                callback(ctx, *state, *owner);
            }
        });
    }

    /// Register the callback for `windowtitle` events
    pub fn on_window_title<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::WindowTitle, move |ctx, event| {
            if let Event::WindowTitle { address } = event {
                callback(ctx, address);
            }
        });
    }

    /// Register the callback for `windowtitlev2` events
    pub fn on_window_title_v2<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::WindowTitleV2, move |ctx, event| {
            if let Event::WindowTitleV2 { address, title } = event {
                callback(ctx, address, title);
            }
        });
    }

    /// Register the callback for `togglegroup` events
    ///
    /// The address list is empty when Hyprland sends none.
    pub fn on_toggle_group<F>(&self, callback: F)
    where
        F: Fn(&EventContext, bool, &[String]) + Send + Sync + 'static,
    {
        self.on(EventKind::ToggleGroup, move |ctx, event| {
            if let Event::ToggleGroup { state, addresses } = event {
                callback(ctx, *state, addresses);
            }
        });
    }

    /// Register the callback for `moveintogroup` events
    pub fn on_move_into_group<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::MoveIntoGroup, move |ctx, event| {
            if let Event::MoveIntoGroup { address } = event {
                callback(ctx, address);
            }
        });
    }

    /// Register the callback for `moveoutofgroup` events
    pub fn on_move_out_of_group<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::MoveOutOfGroup, move |ctx, event| {
            if let Event::MoveOutOfGroup { address } = event {
                callback(ctx, address);
            }
        });
    }

    /// Register the callback for `ignoregrouplock` events
    pub fn on_ignore_group_lock<F>(&self, callback: F)
    where
        F: Fn(&EventContext, bool) + Send + Sync + 'static,
    {
        self.on(EventKind::IgnoreGroupLock, move |ctx, event| {
            if let Event::IgnoreGroupLock { state } = event {
                callback(ctx, *state);
            }
        });
    }

    /// Register the callback for `lockgroups` events
    pub fn on_lock_groups<F>(&self, callback: F)
    where
        F: Fn(&EventContext, bool) + Send + Sync + 'static,
    {
        self.on(EventKind::LockGroups, move |ctx, event| {
            if let Event::LockGroups { state } = event {
                callback(ctx, *state);
            }
        });
    }

    /// Register the callback for `configreloaded` events
    pub fn on_config_reloaded<F>(&self, callback: F)
    where
        F: Fn(&EventContext) + Send + Sync + 'static,
    {
        self.on(EventKind::ConfigReloaded, move |ctx, event| {
            if let Event::ConfigReloaded = event {
                callback(ctx);
            }
        });
    }

    /// Register the callback for `pin` events
    pub fn on_pin<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str, bool) + Send + Sync + 'static,
    {
        self.on(EventKind::Pin, move |ctx, event| {
            if let Event::Pin { address, pinned } = event {
                callback(ctx, address, *pinned);
            }
        });
    }

    /// Register the callback for `minimized` events
    pub fn on_minimized<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str, bool) + Send + Sync + 'static,
    {
        self.on(EventKind::Minimized, move |ctx, event| {
            if let Event::Minimized { address, minimized } = event {
                callback(ctx, address, *minimized);
            }
        });
    }

    /// Register the callback for `bell` events
    pub fn on_bell<F>(&self, callback: F)
    where
        F: Fn(&EventContext, &str) + Send + Sync + 'static,
    {
        self.on(EventKind::Bell, move |ctx, event| {
            if let Event::Bell { address } = event {
                callback(ctx, address);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use crate::listener::EventListener;

    fn capture() -> (Arc<Mutex<Vec<String>>>, EventListener) {
        (Arc::new(Mutex::new(Vec::new())), EventListener::default())
    }

    #[test]
    fn test_typed_arguments_are_converted() {
        let (log, listener) = capture();

        let l = log.clone();
        listener.on_move_window_v2(move |_, address, workspace_id, workspace| {
            l.lock()
                .unwrap()
                .push(format!("{} {} {}", address, workspace_id + 1, workspace))
        });
        let l = log.clone();
        listener.on_screencast(move |_, state, owner| {
            l.lock().unwrap().push(format!("{} {}", state, owner))
        });
        let l = log.clone();
        listener.on_toggle_group(move |_, state, addresses| {
            l.lock()
                .unwrap()
                .push(format!("{} {:?}", state, addresses))
        });

        listener.process_line("movewindowv2>>abc,4,4").unwrap();
        listener.process_line("screencast>>true,1").unwrap();
        listener.process_line("togglegroup>>0,a,b").unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "abc 5 4".to_string(),
                "true true".to_string(),
                "false [\"a\", \"b\"]".to_string(),
            ]
        );
    }

    #[test]
    fn test_open_window_title_is_truncated() {
        let (log, listener) = capture();

        let l = log.clone();
        listener.on_open_window(move |_, address, workspace, class, title| {
            l.lock()
                .unwrap()
                .push(format!("{}|{}|{}|{}", address, workspace, class, title))
        });

        listener
            .process_line("openwindow>>80e62df0,2,kitty,hello, world")
            .unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["80e62df0|2|kitty|hello".to_string()]);
    }

    #[test]
    fn test_config_reloaded_has_no_arguments() {
        let (log, listener) = capture();

        let l = log.clone();
        listener.on_config_reloaded(move |ctx| l.lock().unwrap().push(ctx.kind().to_string()));
        listener.on_ignore_group_lock(|_, _| panic!("wrong callback"));

        listener.process_line("configreloaded>>").unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["configreloaded".to_string()]);
    }

    #[test]
    fn test_callbacks_only_see_their_kind() {
        let (log, listener) = capture();

        let l = log.clone();
        listener.on_workspace(move |_, name| l.lock().unwrap().push(format!("v1 {}", name)));
        let l = log.clone();
        listener.on_workspace_v2(move |_, id, name| {
            l.lock().unwrap().push(format!("v2 {} {}", id, name))
        });

        listener.process_line("workspace>>coding").unwrap();
        listener.process_line("workspacev2>>3,coding").unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["v1 coding".to_string(), "v2 3 coding".to_string()]
        );
        assert!(listener.has_handler("workspace"));
        assert!(listener.has_handler("workspacev2"));
    }
}
