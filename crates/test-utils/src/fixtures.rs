//! Common documents, settings and viewports for image plot tests.

/// Plotter viewports.
pub mod viewports {
    use plot_common::PlotterRect;

    /// 100x100 viewport at the origin.
    pub const SQUARE_100: PlotterRect = PlotterRect {
        left: 0.0,
        top: 0.0,
        right: 100.0,
        bottom: 100.0,
    };

    /// 200x100 viewport offset from the origin.
    pub const WIDE_OFFSET: PlotterRect = PlotterRect {
        left: 50.0,
        top: 20.0,
        right: 250.0,
        bottom: 120.0,
    };
}

/// Documents in the JSON layout read by `MemoryDocument::from_json`.
pub mod documents {
    /// A 4x4 grid of values 0..15 over `0..4` on both axes.
    pub const UNIFORM_4X4: &str = r#"{
        "datasets": {
            "img": {
                "kind": "2d",
                "width": 4,
                "height": 4,
                "values": [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
                "xrange": [0, 4],
                "yrange": [0, 4]
            }
        }
    }"#;

    /// A 3x2 grid with a stretched x edge grid and a transparency mask.
    pub const NONLINEAR_WITH_MASK: &str = r#"{
        "datasets": {
            "img": {
                "kind": "2d",
                "width": 3,
                "height": 2,
                "values": [1, 2, 3, 4, 5, 6],
                "xgrid": [0, 1, 3, 7],
                "yrange": [0, 2]
            },
            "mask": {
                "kind": "2d",
                "width": 3,
                "height": 2,
                "values": [1, 1, 0.5, 0.5, 0, 1]
            },
            "line": {
                "kind": "1d",
                "values": [1, 2, 3]
            }
        }
    }"#;
}

/// Image plot settings JSON.
pub mod settings {
    pub const HEAT_LOG: &str = r#"{
        "data": "img",
        "min": "Auto",
        "max": 20,
        "colorScaling": "log",
        "colorMap": "heat",
        "colorInvert": true,
        "transparency": 25,
        "smooth": true
    }"#;

    pub const MASKED: &str = r#"{
        "data": "img",
        "transparencyData": "mask"
    }"#;
}
