use super::*;
use crate::error::{RegionError, RegionResult};

impl EditorSession {
    /// Validates `spec`, appends the region, selects it, and commits a
    /// history snapshot. Opacity and blur radius are clamped, not rejected.
    pub fn add_region(&mut self, spec: RegionSpec) -> RegionResult<u64> {
        if let RegionShape::Freehand { points } = &spec.shape {
            if points.len() < 3 {
                return Err(RegionError::PathTooShort {
                    count: points.len(),
                });
            }
        }
        if !spec.shape.is_valid() {
            return Err(RegionError::InvalidGeometry {
                kind: spec.shape.kind_label(),
            });
        }

        let id = self.allocate_id();
        let region = BlurRegion::new(id, spec.shape, spec.opacity, spec.blur_radius);
        tracing::debug!(
            region_id = id,
            kind = region.shape.kind_label(),
            "region added"
        );
        self.regions.push(region);
        self.selected_region_id = Some(id);
        self.commit_snapshot();
        Ok(id)
    }

    /// Merges the patch into the matching region and commits a snapshot.
    /// An unknown id changes nothing, history included.
    pub fn update_region(&mut self, id: u64, patch: &RegionPatch) -> bool {
        let Some(region) = self.regions.iter_mut().find(|region| region.id == id) else {
            tracing::warn!(region_id = id, "update for unknown region ignored");
            return false;
        };
        region.apply_patch(patch);
        tracing::debug!(region_id = id, "region updated");
        self.commit_snapshot();
        true
    }

    pub fn delete_region(&mut self, id: u64) -> bool {
        let Some(index) = self.regions.iter().position(|region| region.id == id) else {
            tracing::warn!(region_id = id, "delete for unknown region ignored");
            return false;
        };
        self.regions.remove(index);
        if self.selected_region_id == Some(id) {
            self.selected_region_id = None;
        }
        tracing::debug!(region_id = id, "region deleted");
        self.commit_snapshot();
        true
    }

    /// Steps back one snapshot. Clears the selection so it cannot dangle
    /// into a collection where the region never existed.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            tracing::debug!("undo ignored at the oldest snapshot");
            return false;
        };
        self.regions = snapshot.to_vec();
        self.selected_region_id = None;
        tracing::debug!(index = self.history.index(), "undo applied");
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            tracing::debug!("redo ignored at the newest snapshot");
            return false;
        };
        self.regions = snapshot.to_vec();
        self.selected_region_id = None;
        tracing::debug!(index = self.history.index(), "redo applied");
        true
    }

    /// Sets the opacity newly drawn regions start with. A selected region
    /// picks the value up immediately as a regular committed update.
    pub fn set_default_opacity(&mut self, opacity: f32) {
        self.default_opacity = region::clamp_opacity(opacity);
        if let Some(id) = self.selected_region_id {
            self.update_region(
                id,
                &RegionPatch {
                    opacity: Some(opacity),
                    ..RegionPatch::default()
                },
            );
        }
    }

    pub fn set_default_blur_radius(&mut self, blur_radius: u8) {
        self.default_blur_radius = region::clamp_blur_radius(blur_radius);
        if let Some(id) = self.selected_region_id {
            self.update_region(
                id,
                &RegionPatch {
                    blur_radius: Some(blur_radius),
                    ..RegionPatch::default()
                },
            );
        }
    }
}
