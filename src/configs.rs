use super::*;
use anyhow::Context;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Configs {
    pub generation: GenerationConfigs,
    pub viewport: ViewportConfigs,
    pub transit: TransitConfigs,
    pub frame: FrameConfigs,
}
impl Configs {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let buffer = std::fs::read_to_string(path)
            .with_context(|| format!("can not read configs at {}", path.display()))?;
        let configs = serde_json::from_str(&buffer)
            .with_context(|| format!("can not parse configs at {}", path.display()))?;
        Ok(configs)
    }

    /// Load from `path` if one is given, otherwise use defaults.
    pub fn load_or_default(path: Option<impl AsRef<Path>>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfigs {
    pub system_count: u32,
    pub width: f64,
    pub height: f64,
    /// Star types systems are drawn from. Order matters for determinism.
    pub star_types: Vec<StarType>,
    /// How many nearest systems each system links to.
    /// A system can end up with more lanes when others pick it.
    pub neighbor_count: usize,
    pub planet_count: (u32, u32),
    pub energy: (u32, u32),
    pub minerals: (u32, u32),
    pub science: (u32, u32),
    /// Add bridge lanes after generation until every system is reachable.
    pub repair_connectivity: bool,
}
impl Default for GenerationConfigs {
    fn default() -> Self {
        Self {
            system_count: 20,
            width: 2000.0,
            height: 2000.0,
            star_types: StarType::ALL.to_vec(),
            neighbor_count: 3,
            planet_count: (0, 6),
            energy: (2, 8),
            minerals: (1, 7),
            science: (1, 6),
            repair_connectivity: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfigs {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom is multiplied by this on a negative wheel delta.
    pub zoom_in_factor: f64,
    /// Zoom is multiplied by this on a positive wheel delta.
    pub zoom_out_factor: f64,
    /// World units around a system that still select it.
    pub selection_radius: f64,
    /// A press/release travelling at most this many pixels is a click.
    pub drag_threshold: f64,
    /// Inertia velocity is multiplied by this every frame.
    pub inertia_decay: f64,
    /// Inertia stops below this speed, in world units per ms.
    pub inertia_min_speed: f64,
    /// Lower bound of the time between two pointer samples, in ms.
    pub min_sample_interval: u64,
}
impl Default for ViewportConfigs {
    fn default() -> Self {
        Self {
            min_zoom: 0.3,
            max_zoom: 2.0,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            selection_radius: 15.0,
            drag_threshold: 5.0,
            inertia_decay: 0.92,
            inertia_min_speed: 0.02,
            min_sample_interval: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitConfigs {
    pub ms_per_unit: f64,
    pub min_travel_ms: u64,
    pub max_travel_ms: u64,
}
impl TransitConfigs {
    /// Travel time over a lane of `distance` world units.
    pub fn travel_ms(&self, distance: f64) -> u64 {
        let raw = (distance * self.ms_per_unit).max(0.0).round() as u64;
        raw.clamp(self.min_travel_ms, self.max_travel_ms.max(self.min_travel_ms))
    }
}
impl Default for TransitConfigs {
    fn default() -> Self {
        Self {
            ms_per_unit: 8.0,
            min_travel_ms: 1500,
            max_travel_ms: 6000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfigs {
    /// Target time between two frames in ms.
    pub interval: u64,
    /// How far behind the pacer can fall before it skips ahead, in ms.
    pub max_lag: u64,
}
impl Default for FrameConfigs {
    fn default() -> Self {
        Self {
            interval: 16,
            max_lag: 250,
        }
    }
}
