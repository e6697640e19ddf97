//! Gallery widget
//!
//! Binds a zoom handler to every zoomable image of a grid. Clicking one
//! inserts an enlarged copy of its item (the overlay) on top of the
//! grid; clicking it again, or the overlay itself, collapses it.
//! Overlays are built once per high resolution image and reused through
//! an [`OverlayCache`].

use std::sync::LazyLock;

use regex::Regex;
use zoomgrid_dom::{ClickEvent, Document, ElementQuery, EventType, ListenerId, NodeId};

use crate::{GalleryConfig, GalleryError, GalleryResult, OverlayCache};

/// Overlays hang over the grid border, so they are drawn slightly narrower
const BORDER_COMPENSATION: f64 = 2.0;

/// Identifies one gallery instance inside a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GalleryId(pub u32);

impl GalleryId {
    /// Listener token for trigger `slot` of this gallery
    fn listener(self, slot: usize) -> ListenerId {
        ListenerId((u64::from(self.0) << 32) | slot as u64)
    }

    /// Gallery that registered `listener`
    pub fn owner_of(listener: ListenerId) -> Self {
        Self((listener.0 >> 32) as u32)
    }

    fn slot_of(listener: ListenerId) -> usize {
        (listener.0 & u64::from(u32::MAX)) as usize
    }
}

/// Zoom toggle state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ZoomState {
    /// No overlay shown
    #[default]
    Idle,
    /// Overlay for this high resolution image is in the grid
    Zoomed(String),
}

/// One gallery bound to a root node
#[derive(Debug)]
pub struct Gallery {
    id: GalleryId,
    root: NodeId,
    grid: NodeId,
    config: GalleryConfig,
    cache: OverlayCache<NodeId>,
    state: ZoomState,
    /// Bound zoom triggers, indexed by listener slot
    triggers: Vec<NodeId>,
}

impl Gallery {
    /// Bind a gallery to `root`.
    ///
    /// Every element under `root` matching `grid_image_selector` gets the
    /// zoom handler; elements added later are not picked up. When the
    /// document location carries `picture=<digits>`, that picture's zoom
    /// trigger is clicked once binding is done.
    pub fn create(
        doc: &mut Document,
        root: NodeId,
        config: GalleryConfig,
        id: GalleryId,
    ) -> GalleryResult<Self> {
        let tree = doc.tree();
        let grid = if tree.matches(root, &config.grid_selector)? {
            root
        } else {
            tree.query_selector(root, &config.grid_selector)?.unwrap_or(root)
        };
        let triggers = tree.query_selector_all(root, &config.grid_image_selector)?;

        let mut gallery = Self {
            id,
            root,
            grid,
            cache: OverlayCache::new(config.cache_size),
            config,
            state: ZoomState::Idle,
            triggers,
        };

        for (slot, &trigger) in gallery.triggers.iter().enumerate() {
            doc.tree_mut().add_listener(trigger, EventType::Click, id.listener(slot))?;
            tracing::trace!("Bound zoom handler to {:?}", trigger);
        }
        tracing::debug!(
            "Created gallery {:?} on {:?} with {} zoomable images",
            id,
            root,
            gallery.triggers.len()
        );

        gallery.open_from_location(doc)?;
        Ok(gallery)
    }

    /// Click the zoom trigger of the picture named in the location
    /// fragment, if there is one.
    fn open_from_location(&mut self, doc: &mut Document) -> GalleryResult<()> {
        let Some(picture) = doc.location_fragment().and_then(picture_id) else {
            return Ok(());
        };

        let selector = format!(
            "#{}{} {}",
            self.config.picture_id_prefix, picture, self.config.zoom_trigger_selector
        );
        let Some(target) = doc.query_selector(&selector)? else {
            tracing::debug!("No picture {} to open from location", picture);
            return Ok(());
        };

        tracing::debug!("Opening picture {} from location", picture);
        dispatch_click(doc, target, |doc, listener, event| {
            if GalleryId::owner_of(listener) == self.id {
                self.on_click(doc, listener, event);
            }
        });
        Ok(())
    }

    /// Run the zoom handler registered as `listener`. Failures are
    /// logged and dropped so a broken item never breaks the page.
    pub fn on_click(&mut self, doc: &mut Document, listener: ListenerId, event: &mut ClickEvent) {
        if GalleryId::owner_of(listener) != self.id {
            return;
        }
        let Some(&trigger) = self.triggers.get(GalleryId::slot_of(listener)) else {
            return;
        };
        if let Err(err) = self.toggle(doc, listener, trigger, event) {
            tracing::warn!("Zoom handler on {:?} failed: {}", trigger, err);
        }
    }

    /// Zoom state machine for one click on `trigger`
    fn toggle(
        &mut self,
        doc: &mut Document,
        listener: ListenerId,
        trigger: NodeId,
        event: &mut ClickEvent,
    ) -> GalleryResult<()> {
        event.prevent_default();

        let container = doc
            .tree()
            .closest_ancestor(trigger, &self.config.grid_item_selector)?
            .ok_or(GalleryError::MissingItem(trigger))?;
        let hrsrc = self.highres_image(doc, container)?;

        self.remove_overlays(doc)?;

        if self.current_zoom() == Some(hrsrc.as_str()) {
            self.collapse(doc)?;
            tracing::debug!("Collapsed {}", hrsrc);
            return Ok(());
        }

        // The previous overlay is already gone, so a failure from here on
        // must not leave the state pointing at it.
        if let Err(err) = self.show_overlay(doc, listener, container, &hrsrc) {
            if let Err(cleanup) = self.remove_overlays(doc).and_then(|()| self.collapse(doc)) {
                tracing::warn!("Failed to reset gallery {:?}: {}", self.id, cleanup);
            }
            self.state = ZoomState::Idle;
            return Err(err);
        }

        tracing::debug!("Zoomed {}", hrsrc);
        self.state = ZoomState::Zoomed(hrsrc);
        Ok(())
    }

    fn collapse(&mut self, doc: &mut Document) -> GalleryResult<()> {
        self.state = ZoomState::Idle;
        doc.tree_mut().remove_class(self.grid, &self.config.state_inactive)?;
        Ok(())
    }

    /// Fetch or build the overlay for `hrsrc` and put it over the grid
    fn show_overlay(
        &mut self,
        doc: &mut Document,
        listener: ListenerId,
        container: NodeId,
        hrsrc: &str,
    ) -> GalleryResult<()> {
        let (overlay, evicted) = self
            .cache
            .try_get_or_create(hrsrc, || doc.tree_mut().clone_node(container, true))?;

        let tree = doc.tree_mut();
        // With no room at all the new overlay is its own victim; it is
        // freed once it comes off the grid instead.
        if let Some(old) = evicted.filter(|&old| old != overlay) {
            tree.remove_subtree(old)?;
        }

        tree.remove_listeners(overlay, EventType::Click)?;
        tree.add_listener(overlay, EventType::Click, listener)?;

        for image in tree.query_selector_all(overlay, &self.config.item_image_selector)? {
            tree.set_attr(image, "src", hrsrc)?;
            tree.add_class(image, &self.config.image_zoomed)?;
        }

        let (_, top) = tree.document_offset(container)?;
        let (left, _) = tree.document_offset(self.grid)?;
        let width = tree.width(self.grid)?;
        tree.set_style(overlay, "top", &px(top))?;
        tree.set_style(overlay, "left", &px(left))?;
        tree.set_style(overlay, "width", &px(width - BORDER_COMPENSATION))?;

        tree.add_class(overlay, &self.config.state_zoom)?;
        tree.append_child(self.grid, overlay)?;
        tree.add_class(self.grid, &self.config.state_inactive)?;
        Ok(())
    }

    /// High resolution image key of an item; empty when missing
    fn highres_image(&self, doc: &Document, container: NodeId) -> GalleryResult<String> {
        let tree = doc.tree();
        let image = tree.query_selector(container, &self.config.item_image_selector)?;
        Ok(image
            .and_then(|img| tree.data(img, "highres-image"))
            .unwrap_or_default()
            .to_string())
    }

    /// Take every active overlay out of the grid. Cached overlays are
    /// kept for reuse, anything else is freed.
    fn remove_overlays(&self, doc: &mut Document) -> GalleryResult<()> {
        let tree = doc.tree_mut();
        let selector = format!(".{}", self.config.state_zoom);
        for overlay in tree.query_selector_all(self.grid, &selector)? {
            if self.cache.values().any(|&cached| cached == overlay) {
                tree.remove_class(overlay, &self.config.state_zoom)?;
                tree.detach(overlay)?;
            } else {
                tree.remove_subtree(overlay)?;
            }
        }
        Ok(())
    }

    pub fn id(&self) -> GalleryId {
        self.id
    }

    /// Node the gallery was bound to
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Grid the overlays are appended to
    pub fn grid(&self) -> NodeId {
        self.grid
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn state(&self) -> &ZoomState {
        &self.state
    }

    /// Key of the overlay currently shown
    pub fn current_zoom(&self) -> Option<&str> {
        match &self.state {
            ZoomState::Zoomed(key) => Some(key),
            ZoomState::Idle => None,
        }
    }

    pub fn cache(&self) -> &OverlayCache<NodeId> {
        &self.cache
    }

    /// Elements carrying this gallery's zoom handler
    pub fn triggers(&self) -> &[NodeId] {
        &self.triggers
    }
}

/// Deliver a click on `target` to every click listener along its
/// propagation path. The path is fixed before the first listener runs,
/// so nodes detached by a handler still see the event.
pub(crate) fn dispatch_click(
    doc: &mut Document,
    target: NodeId,
    mut route: impl FnMut(&mut Document, ListenerId, &mut ClickEvent),
) -> ClickEvent {
    let mut event = ClickEvent::new(target);
    let path = doc.tree().propagation_path(target);
    for node in path {
        let listeners = doc.tree().listeners(node, EventType::Click);
        if listeners.is_empty() {
            continue;
        }
        event.current_target = Some(node);
        for listener in listeners {
            route(&mut *doc, listener, &mut event);
        }
        if event.is_propagation_stopped() {
            break;
        }
    }
    event.current_target = None;
    event
}

static PICTURE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"picture=(\d+)").expect("picture regex should compile"));

/// Digits of the first `picture=<digits>` in a location fragment
fn picture_id(fragment: &str) -> Option<&str> {
    PICTURE_PATTERN
        .captures(fragment)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn px(value: f64) -> String {
    format!("{value}px")
}
