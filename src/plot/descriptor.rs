use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::plot::Segment;
use crate::predict::GeoPoint;

pub const DEFAULT_MAP_STYLE: &str = "open-street-map";
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Qualitative palette used when none is configured.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// Rendering defaults shared by every descriptor a service builds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlotStyle {
    #[serde(default = "default_map_style")]
    pub map_style: String,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

fn default_map_style() -> String {
    DEFAULT_MAP_STYLE.to_string()
}

fn default_zoom() -> f64 {
    DEFAULT_ZOOM
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            map_style: default_map_style(),
            zoom: default_zoom(),
            palette: default_palette(),
        }
    }
}

impl PlotStyle {
    /// Color for the `index`-th plotted satellite; cycles once the palette runs out.
    pub fn color(&self, index: usize) -> String {
        if self.palette.is_empty() {
            return DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()].to_string();
        }
        self.palette[index % self.palette.len()].clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Trace {
    pub name: String,
    pub legend_group: String,
    pub show_legend: bool,
    pub color: String,
    pub mode: &'static str,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
}

/// Renderer-agnostic description of a ground-track map
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PlotDescriptor {
    pub map_style: String,
    pub traces: Vec<Trace>,
    pub center: GeoPoint,
    pub zoom: f64,
}

pub struct PlotBuilder {
    map_style: String,
    zoom: f64,
    traces: Vec<Trace>,
    lat_sum: f64,
    lon_sum: f64,
    count: usize,
}

impl PlotBuilder {
    pub fn new(style: &PlotStyle, zoom: Option<f64>) -> Self {
        Self {
            map_style: style.map_style.clone(),
            zoom: zoom.unwrap_or(style.zoom),
            traces: Vec::new(),
            lat_sum: 0.0,
            lon_sum: 0.0,
            count: 0,
        }
    }

    /// Add one satellite's path. Only its first segment shows up in the legend.
    pub fn add_track(&mut self, name: &str, color: &str, segments: &[Segment]) -> &mut Self {
        for (i, segment) in segments.iter().enumerate() {
            let lat: Vec<f64> = segment.points.iter().map(|p| p.lat).collect();
            let lon: Vec<f64> = segment.points.iter().map(|p| p.lon).collect();

            self.lat_sum += lat.iter().sum::<f64>();
            self.lon_sum += lon.iter().sum::<f64>();
            self.count += segment.points.len();

            self.traces.push(Trace {
                name: name.to_string(),
                legend_group: name.to_string(),
                show_legend: i == 0,
                color: color.to_string(),
                mode: "lines",
                lat,
                lon,
            });
        }
        self
    }

    /// Mean of every point added so far.
    pub fn center(&self) -> GeoPoint {
        if self.count == 0 {
            return GeoPoint::default();
        }
        GeoPoint {
            lat: self.lat_sum / self.count as f64,
            lon: self.lon_sum / self.count as f64,
        }
    }

    pub fn build(self) -> PlotDescriptor {
        let center = self.center();
        PlotDescriptor {
            map_style: self.map_style,
            traces: self.traces,
            center,
            zoom: self.zoom,
        }
    }
}
