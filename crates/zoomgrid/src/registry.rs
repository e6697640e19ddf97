//! Gallery registry
//!
//! Entry point for pages: binds at most one gallery per root node and
//! routes clicks from the host event loop to the gallery that owns the
//! listener.

use std::collections::{BTreeMap, HashMap};

use zoomgrid_dom::{ClickEvent, Document, NodeId};

use crate::gallery::dispatch_click;
use crate::{Gallery, GalleryConfig, GalleryId, GalleryOptions, GalleryResult};

/// All galleries bound in one document
#[derive(Debug, Default)]
pub struct GalleryRegistry {
    galleries: BTreeMap<GalleryId, Gallery>,
    by_root: HashMap<NodeId, GalleryId>,
    /// Ids are never reused, so listeners left behind by a failed bind
    /// cannot reach a later gallery
    next_id: u32,
}

impl GalleryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a gallery to each of `roots` that does not have one yet and
    /// hand `roots` back for chaining. A root that fails to bind is
    /// logged and skipped.
    pub fn gallery<'r>(
        &mut self,
        doc: &mut Document,
        roots: &'r [NodeId],
        options: &GalleryOptions,
    ) -> &'r [NodeId] {
        for &root in roots {
            if self.by_root.contains_key(&root) {
                tracing::trace!("Gallery already bound to {:?}", root);
                continue;
            }

            let id = GalleryId(self.next_id);
            self.next_id += 1;
            match Gallery::create(doc, root, GalleryConfig::merge(options), id) {
                Ok(gallery) => {
                    self.galleries.insert(id, gallery);
                    self.by_root.insert(root, id);
                }
                Err(err) => tracing::warn!("Failed to bind gallery to {:?}: {}", root, err),
            }
        }
        roots
    }

    /// Bind galleries to every element matching `selector`
    pub fn attach(
        &mut self,
        doc: &mut Document,
        selector: &str,
        options: &GalleryOptions,
    ) -> GalleryResult<Vec<NodeId>> {
        let roots = doc.query_selector_all(selector)?;
        self.gallery(doc, &roots, options);
        Ok(roots)
    }

    /// Gallery bound to `root`
    pub fn get(&self, root: NodeId) -> Option<&Gallery> {
        let id = self.by_root.get(&root)?;
        self.galleries.get(id)
    }

    /// Number of bound galleries
    pub fn len(&self) -> usize {
        self.galleries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.galleries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Gallery> {
        self.galleries.values()
    }

    /// Host event loop entry: click `target` and run every zoom handler
    /// on its propagation path. The returned event tells the host whether
    /// the default action (following the link) was prevented.
    pub fn dispatch_click(&mut self, doc: &mut Document, target: NodeId) -> ClickEvent {
        let galleries = &mut self.galleries;
        dispatch_click(doc, target, |doc, listener, event| {
            match galleries.get_mut(&GalleryId::owner_of(listener)) {
                Some(gallery) => gallery.on_click(doc, listener, event),
                None => tracing::trace!("Ignoring foreign listener {:?}", listener),
            }
        })
    }
}
