//! Chart furniture: grid margins and zoom tool visibility.

use crate::core::option::ZoomOrientation;
use crate::core::spec::{DataZoomKind, GridSpec, VisualSpec};

use super::strategy::StageContext;

/// Applies the configured zoom visibility and orientation to the zoom
/// entries the skeleton created. Inside zooms stay hidden but active.
pub fn convert_data_zoom(mut spec: VisualSpec, ctx: &StageContext<'_>) -> VisualSpec {
    let Some(option) = ctx.option.chart_zooms.first() else {
        return spec;
    };

    for zoom in &mut spec.data_zoom {
        zoom.orientation = option.orientation;
        if zoom.kind == DataZoomKind::Slider {
            zoom.show = option.auto;
        }
    }
    spec.toolbox_zoom = option.auto;
    spec
}

/// Recomputes grid margins from the furniture around the plot area.
pub fn convert_grid(mut spec: VisualSpec, _ctx: &StageContext<'_>) -> VisualSpec {
    let mut grid = GridSpec::default();

    if spec.legend.as_ref().is_some_and(|legend| legend.show) {
        grid.top += 20.0;
    }

    let mut horizontal_slider = false;
    let mut vertical_slider = false;
    for zoom in &spec.data_zoom {
        if zoom.kind == DataZoomKind::Slider && zoom.show {
            match zoom.orientation {
                ZoomOrientation::Horizontal => horizontal_slider = true,
                ZoomOrientation::Vertical => vertical_slider = true,
            }
        }
    }
    if horizontal_slider {
        grid.bottom += 30.0;
    }
    if vertical_slider {
        grid.right += 30.0;
    }

    spec.grid = vec![grid];
    spec
}
