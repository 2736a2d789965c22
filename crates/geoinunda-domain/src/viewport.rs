//! # Viewport Controller
//!
//! Decides how the camera reacts to a new search result. Animations are
//! fire-and-forget; the map surface interrupts an in-flight animation when a
//! new one starts.

use serde::{Deserialize, Serialize};

use crate::config::{
    FIT_PADDING_PX, HOME_ANIMATION_S, MapConfig, POINT_ZOOM, SEARCH_ANIMATION_S,
};
use crate::{Bbox, LatLon, SearchResult};

/// A camera instruction for the map surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CameraMove {
    FitBounds {
        bbox: Bbox,
        padding_px: u32,
        duration_s: f64,
    },
    FlyTo {
        center: LatLon,
        zoom: u8,
        duration_s: f64,
    },
    ZoomIn,
    ZoomOut,
}

impl CameraMove {
    /// Camera move for a result: fit area results, fly to point results.
    pub fn for_result(result: &SearchResult) -> Self {
        match result.bbox() {
            Some(bbox) if result.is_area() => Self::FitBounds {
                bbox,
                padding_px: FIT_PADDING_PX,
                duration_s: SEARCH_ANIMATION_S,
            },
            _ => Self::FlyTo {
                center: result.center(),
                zoom: POINT_ZOOM,
                duration_s: SEARCH_ANIMATION_S,
            },
        }
    }

    /// Back to the configured home view.
    pub const fn home(config: &MapConfig) -> Self {
        Self::FlyTo {
            center: config.home,
            zoom: config.home_zoom,
            duration_s: HOME_ANIMATION_S,
        }
    }
}

/// Issues at most one camera move per distinct search revision
#[derive(Debug, Clone, Default)]
pub struct ViewportController {
    last_revision: Option<u64>,
}

impl ViewportController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_result_changed(
        &mut self,
        result: Option<&SearchResult>,
        revision: u64,
    ) -> Option<CameraMove> {
        if self.last_revision == Some(revision) {
            return None;
        }
        self.last_revision = Some(revision);
        result.map(CameraMove::for_result)
    }
}
