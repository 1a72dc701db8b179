//! Describes each visible frame for the renderer.
//!
//! Everything here is a pure function of the window, the current carousel
//! offset and a static layout. Texture loading and mesh building happen in
//! the host.

use std::f32::consts::FRAC_PI_2;

use crate::carousel::{CarouselWindow, Slot, WindowEntry};

pub type Vec3 = [f32; 3];

/// Position and Euler rotation of one wall slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotPose {
    pub position: Vec3,
    pub rotation: Vec3,
}

/// Room geometry for the three frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLayout {
    pub left: SlotPose,
    pub center: SlotPose,
    pub right: SlotPose,
    /// Added to every slot's height.
    pub lift: f32,
    pub plaque_height: f32,
}

impl Default for FrameLayout {
    fn default() -> Self {
        Self {
            left: SlotPose {
                position: [-0.89, 1.5, -0.7],
                rotation: [0.0, FRAC_PI_2, 0.0],
            },
            center: SlotPose {
                position: [0.89, 1.5, 0.0],
                rotation: [0.0, -FRAC_PI_2, 0.0],
            },
            right: SlotPose {
                position: [-0.89, 1.5, 0.7],
                rotation: [0.0, FRAC_PI_2, 0.0],
            },
            lift: 0.3,
            plaque_height: 0.75,
        }
    }
}

impl FrameLayout {
    pub fn pose(&self, slot: Slot) -> &SlotPose {
        match slot {
            Slot::Left => &self.left,
            Slot::Center => &self.center,
            Slot::Right => &self.right,
        }
    }

    /// Plaque size for an image; square when the aspect is unknown.
    pub fn plaque_size(&self, aspect: Option<f32>) -> PlaqueSize {
        let height = self.plaque_height;
        PlaqueSize {
            width: height * aspect.unwrap_or(1.0),
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaqueSize {
    pub width: f32,
    pub height: f32,
}

/// Everything the renderer needs to draw one framed photo.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlacement {
    pub slot: Slot,
    pub image_url: String,
    pub position: Vec3,
    pub rotation: Vec3,
    pub plaque: PlaqueSize,
    pub title: Option<String>,
    pub body_text: Option<String>,
    pub shooting_date_label: Option<String>,
    /// One-based position of the item in the full list.
    pub display_index: usize,
}

impl FramePlacement {
    /// Zero-padded index label, e.g. `"07"`.
    pub fn display_label(&self) -> String {
        format!("{:02}", self.display_index)
    }
}

/// Placement for a single window entry; `None` if the item has no image.
pub fn placement_for(
    entry: &WindowEntry<'_>,
    offset: f32,
    layout: &FrameLayout,
) -> Option<FramePlacement> {
    let item = entry.item;
    let image_url = item.image_url()?;
    let pose = layout.pose(entry.slot);
    let [x, y, z] = pose.position;

    Some(FramePlacement {
        slot: entry.slot,
        image_url: image_url.to_string(),
        position: [x, y + layout.lift + offset, z],
        rotation: pose.rotation,
        plaque: layout
            .plaque_size(item.photo.as_ref().and_then(|p| p.aspect_ratio())),
        title: Some(item.title.clone()).filter(|t| !t.trim().is_empty()),
        body_text: item.body_text(),
        shooting_date_label: item.shooting_date().map(|d| d.label()),
        display_index: entry.index + 1,
    })
}

/// Placements for every drawable slot of `window`, in slot order.
pub fn present(
    window: &CarouselWindow<'_>,
    offset: f32,
    layout: &FrameLayout,
) -> Vec<FramePlacement> {
    window
        .iter()
        .filter_map(|entry| placement_for(entry, offset, layout))
        .collect()
}
