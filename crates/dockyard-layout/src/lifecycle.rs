//! Adding and removing dockable windows while the tree is being rendered.
//!
//! Application code never mutates the live dock tree directly. Requests are
//! queued and advanced one step per frame:
//!
//! ```text
//! Pending --(render pass: probe + dock)--> Probed
//! Probed  --(pre-frame: graft into tree)--> Attached
//! Attached --(pre-frame: placement confirmed)--> Resolved (dequeued)
//! ```
//!
//! The host can only dock a window it has seen during the current frame,
//! while grafting into the tree must wait until no traversal is running.
//! Probing during the render pass and attaching before the next frame
//! satisfies both without locks.

use dockyard_core::{
    AdditionState, DockError, DockHost, DockableWindow, DockingParams, Result, SplitRegistry,
    WindowLabel, WindowRequests,
};

/// A queued window addition.
#[derive(Debug)]
pub struct PendingAddition {
    seq: u64,
    label: WindowLabel,
    dock_space_name: String,
    force_replace: bool,
    state: AdditionState,
    /// Owned until the window is grafted into the tree.
    window: Option<DockableWindow>,
}

impl PendingAddition {
    pub fn label(&self) -> &WindowLabel {
        &self.label
    }

    pub fn dock_space_name(&self) -> &str {
        &self.dock_space_name
    }

    pub fn force_replace(&self) -> bool {
        self.force_replace
    }

    pub fn state(&self) -> AdditionState {
        self.state
    }

    fn advance(&mut self, state: AdditionState) {
        log::debug!(
            "dockable window '{}': {:?} -> {state:?}",
            self.label,
            self.state
        );
        self.state = state;
        if let Some(window) = self.window.as_mut() {
            window.addition_state = state;
        }
    }
}

#[derive(Debug)]
struct PendingRemoval {
    seq: u64,
    label: String,
}

/// Where a window was grafted into the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionPoint {
    /// Under a window whose label matches the target dock space.
    NestedUnderWindow,
    /// Under the node whose splits create the target dock space.
    SplitOwner,
    /// Appended to the tree root.
    Root,
}

/// What one pre-frame step changed.
#[derive(Debug, Default)]
pub struct PreFrameReport {
    /// Windows erased by removal requests.
    pub removed: Vec<WindowLabel>,
    /// Additions cancelled by a later removal request.
    pub cancelled: Vec<WindowLabel>,
    /// Removal requests that matched nothing.
    pub not_found: Vec<String>,
    /// Windows dropped because they asked to close.
    pub pruned: Vec<WindowLabel>,
    /// Windows grafted into the tree.
    pub attached: Vec<(WindowLabel, InsertionPoint)>,
    /// Additions that completed and were dequeued.
    pub resolved: Vec<WindowLabel>,
    /// Additions rejected when grafting.
    pub rejected: Vec<DockError>,
}

/// Queues and state machine for runtime window additions and removals.
#[derive(Debug, Default)]
pub struct WindowLifecycle {
    next_seq: u64,
    additions: Vec<PendingAddition>,
    removals: Vec<PendingRemoval>,
}

impl WindowLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Queues a window for insertion. Never touches the tree.
    ///
    /// With `force_replace`, the window is docked into its declared space even
    /// if the host remembers a placement from a previous run.
    pub fn request_add(&mut self, mut window: DockableWindow, force_replace: bool) {
        let seq = self.bump_seq();
        window.addition_state = AdditionState::Pending;
        log::debug!(
            "queued dockable window '{}' for '{}'",
            window.label,
            window.dock_space_name
        );
        self.additions.push(PendingAddition {
            seq,
            label: window.label.clone(),
            dock_space_name: window.dock_space_name.clone(),
            force_replace,
            state: AdditionState::Pending,
            window: Some(window),
        });
    }

    /// Queues the removal of the window matching `label`.
    pub fn request_remove(&mut self, label: impl Into<String>) {
        let seq = self.bump_seq();
        self.removals.push(PendingRemoval {
            seq,
            label: label.into(),
        });
    }

    pub fn pending_additions(&self) -> &[PendingAddition] {
        &self.additions
    }

    /// Labels waiting for removal, in request order.
    pub fn pending_removals(&self) -> impl Iterator<Item = &str> {
        self.removals.iter().map(|r| r.label.as_str())
    }

    /// State of the queued addition matching `label`, if any.
    pub fn state_of(&self, label: &str) -> Option<AdditionState> {
        self.additions
            .iter()
            .find(|a| a.label.matches(label))
            .map(|a| a.state)
    }

    /// True when nothing is queued.
    pub fn is_idle(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    /// Render-pass step: registers pending windows with the host.
    ///
    /// Returns the number of entries that moved to [`AdditionState::Probed`].
    pub fn process_pending_during_render<H: DockHost + ?Sized>(
        &mut self,
        host: &mut H,
        registry: &SplitRegistry,
    ) -> usize {
        let mut probed = 0;
        for entry in &mut self.additions {
            if entry.state != AdditionState::Pending {
                continue;
            }
            let identity = entry.label.as_str();
            // A remembered placement wins unless the caller forces the declared one.
            let keep_placement = host.has_prior_placement(identity) && !entry.force_replace;
            let ready = if keep_placement || entry.dock_space_name.is_empty() {
                true
            } else if let Some(space) = registry.try_get_id(&entry.dock_space_name) {
                host.begin_window(identity, None);
                host.end_window();
                host.dock_window_to_space(identity, space);
                true
            } else {
                log::debug!(
                    "dockable window '{identity}': dock space '{}' not available yet",
                    entry.dock_space_name
                );
                false
            };
            if ready {
                entry.advance(AdditionState::Probed);
                probed += 1;
            }
        }
        probed
    }

    /// Pre-frame step: applies removals, prunes closed windows, grafts probed
    /// windows into the tree and confirms their placement.
    pub fn process_pending_pre_frame<H: DockHost + ?Sized>(
        &mut self,
        host: &mut H,
        registry: &SplitRegistry,
        params: &mut DockingParams,
        root_space_name: &str,
    ) -> PreFrameReport {
        let mut report = PreFrameReport::default();

        self.apply_removals(params, &mut report);

        report.pruned = params.prune_closed_windows();
        for label in &report.pruned {
            log::info!("dockable window '{label}' closed");
        }

        let mut rejected_seqs = Vec::new();
        for entry in &mut self.additions {
            if entry.state != AdditionState::Probed {
                continue;
            }
            let Some(mut window) = entry.window.take() else {
                continue;
            };
            window.addition_state = AdditionState::Attached;
            match insert_dockable_window(params, window) {
                Ok(point) => {
                    entry.advance(AdditionState::Attached);
                    report.attached.push((entry.label.clone(), point));
                }
                Err(err) => {
                    log::warn!("could not attach dockable window: {err}");
                    rejected_seqs.push(entry.seq);
                    report.rejected.push(err);
                }
            }
        }
        self.additions.retain(|entry| !rejected_seqs.contains(&entry.seq));

        for entry in &mut self.additions {
            if entry.state != AdditionState::Attached {
                continue;
            }
            let placed = entry.dock_space_name.is_empty()
                || entry.dock_space_name == root_space_name
                || match registry.try_get_id(&entry.dock_space_name) {
                    Some(space) => {
                        host.dock_window_to_space(entry.label.as_str(), space);
                        true
                    }
                    None => false,
                };
            if placed {
                entry.advance(AdditionState::Resolved);
                if let Some(window) = params.dockable_window_of_name_mut(entry.label.as_str()) {
                    window.addition_state = AdditionState::Resolved;
                }
                report.resolved.push(entry.label.clone());
            }
        }
        self.additions
            .retain(|entry| entry.state != AdditionState::Resolved);

        report
    }

    fn apply_removals(&mut self, params: &mut DockingParams, report: &mut PreFrameReport) {
        for removal in std::mem::take(&mut self.removals) {
            // Removal wins over any addition requested before it.
            let mut cancelled = Vec::new();
            self.additions.retain(|entry| {
                let superseded = entry.seq < removal.seq && entry.label.matches(&removal.label);
                if superseded && entry.window.is_some() {
                    cancelled.push(entry.label.clone());
                }
                !superseded
            });

            if let Some(window) = params.remove_window(&removal.label) {
                log::info!("removed dockable window '{}'", window.label);
                report.removed.push(window.label);
            } else if cancelled.is_empty() {
                log::warn!(
                    "dockable window '{}' not found, removal dropped",
                    removal.label
                );
                report.not_found.push(removal.label);
            }

            for label in &cancelled {
                log::debug!("cancelled pending addition of '{label}'");
            }
            report.cancelled.extend(cancelled);
        }
    }
}

impl WindowRequests for WindowLifecycle {
    fn add_dockable_window(&mut self, window: DockableWindow, force_replace: bool) {
        self.request_add(window, force_replace);
    }

    fn remove_dockable_window(&mut self, label: &str) {
        self.request_remove(label);
    }
}

/// Grafts a window into the tree.
///
/// The insertion point is searched in this order: under a window whose label
/// matches the target dock space, under the node whose splits create the
/// target dock space, then the root.
pub fn insert_dockable_window(
    params: &mut DockingParams,
    window: DockableWindow,
) -> Result<InsertionPoint> {
    let target = window.dock_space_name.clone();
    if !target.is_empty() {
        if let Some(host_window) = params.dockable_window_of_name_mut(&target) {
            host_window.docking_params.add_window(window)?;
            return Ok(InsertionPoint::NestedUnderWindow);
        }
        if let Some(owner) = params.split_owner_mut(&target) {
            owner.add_window(window)?;
            return Ok(InsertionPoint::SplitOwner);
        }
    }
    params.add_window(window)?;
    Ok(InsertionPoint::Root)
}
