//! Realizes a dock tree on the host.
//!
//! [`apply_dock_layout`] makes the host's dock node tree match the splits
//! declared by a [`DockingParams`] node and docks the node's windows into
//! their spaces. Splits are only (re)built when the layout was reset or when
//! one of the spaces it declares has never been registered, so calling it
//! every frame is cheap.

use dockyard_core::{
    DockError, DockHost, DockableWindow, DockingParams, DockingSplit, Result, SplitRegistry,
};

/// Outcome of one [`apply_dock_layout`] call.
#[derive(Debug, Default)]
pub struct ApplyReport {
    /// The call happened on the host's first frame and did nothing.
    pub skipped_first_frame: bool,
    /// Whether the host's child nodes were destroyed and splits re-applied.
    pub rebuilt: bool,
    /// Number of splits successfully applied.
    pub splits_applied: usize,
    /// Splits that could not be applied.
    pub split_errors: Vec<DockError>,
    /// Windows bound to their dock space.
    pub windows_docked: usize,
    /// Windows whose dock space is not known yet (left floating this frame).
    pub windows_waiting: usize,
}

/// Forces a reset of every nested layout below a node that is being reset.
pub fn propagate_layout_reset(params: &mut DockingParams) {
    let reset = params.layout_reset;
    for window in &mut params.dockable_windows {
        if reset {
            window.docking_params.layout_reset = true;
        }
        propagate_layout_reset(&mut window.docking_params);
    }
}

/// Returns true if the splits of this node must be (re)applied.
pub fn needs_rebuild(params: &DockingParams, registry: &SplitRegistry) -> bool {
    params.layout_reset
        || params
            .docking_splits
            .iter()
            .any(|split| !registry.contains(&split.new_dock))
}

/// Applies a node's splits and window placements under `root_space_name`.
///
/// Split failures (an `initial_dock` that was never registered) are logged,
/// collected in the report and only skip the offending split.
pub fn apply_dock_layout<H: DockHost + ?Sized>(
    params: &mut DockingParams,
    root_space_name: &str,
    host: &mut H,
    registry: &mut SplitRegistry,
) -> ApplyReport {
    let mut report = ApplyReport::default();

    // The host creates the root node during the first frame.
    if host.frame_count() <= 1 {
        report.skipped_first_frame = true;
        return report;
    }

    propagate_layout_reset(params);

    if needs_rebuild(params, registry) {
        let root_id = host.space_id_for(root_space_name);
        log::debug!(
            "rebuilding layout '{}' under '{root_space_name}' ({root_id})",
            params.layout_name
        );
        host.remove_child_spaces(root_id);
        registry.set_id(root_space_name, root_id);
        report.rebuilt = true;

        for split in &params.docking_splits {
            match do_split(split, host, registry) {
                Ok(()) => report.splits_applied += 1,
                Err(err) => {
                    log::error!("layout '{}': {err}", params.layout_name);
                    report.split_errors.push(err);
                }
            }
        }
    }

    for window in &params.dockable_windows {
        if dock_window(window, host, registry) {
            report.windows_docked += 1;
        } else if !window.dock_space_name.is_empty() {
            report.windows_waiting += 1;
        }
    }

    params.layout_reset = false;
    report
}

fn do_split<H: DockHost + ?Sized>(
    split: &DockingSplit,
    host: &mut H,
    registry: &mut SplitRegistry,
) -> Result<()> {
    let initial_id = registry
        .try_get_id(&split.initial_dock)
        .ok_or_else(|| DockError::UnknownDockSpace(split.initial_dock.clone()))?;
    let (leftover_id, new_id) = host.split_space(initial_id, split.direction, split.ratio);
    registry.set_id(&split.initial_dock, leftover_id);
    registry.set_id(&split.new_dock, new_id);
    host.set_node_flags(new_id, split.node_flags);
    Ok(())
}

/// Docks a window into its space. Returns false if the space is unknown.
pub fn dock_window<H: DockHost + ?Sized>(
    window: &DockableWindow,
    host: &mut H,
    registry: &SplitRegistry,
) -> bool {
    if window.dock_space_name.is_empty() {
        return false;
    }
    match registry.try_get_id(&window.dock_space_name) {
        Some(space) => {
            host.dock_window_to_space(window.label.as_str(), space);
            true
        }
        None => false,
    }
}
