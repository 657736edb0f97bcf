//! Configuration parsing for isosurface extraction runs.

use anyhow::{Context, Result};
use marching_cubes::{FieldShape, NormalOrientation, Vec3};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration for one extraction run.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
	/// OBJ file to write.
	#[serde(default = "default_output")]
	pub output: PathBuf,
	/// Working cells per axis.
	#[serde(default = "default_cells")]
	pub cells: [usize; 3],
	/// Ghost layers around the working cells.
	#[serde(default = "default_padding")]
	pub padding: usize,
	/// Lower corner of the sampled box.
	#[serde(default)]
	pub min: [f64; 3],
	/// Upper corner of the sampled box.
	#[serde(default = "default_max")]
	pub max: [f64; 3],
	/// Level set to extract.
	#[serde(default)]
	pub iso_value: f64,
	/// Normals toward decreasing (default) or increasing scalar.
	#[serde(default)]
	pub normal_orientation: Orientation,
	/// Smooth normals by averaging adjacent triangles.
	#[serde(default = "default_true")]
	pub average_normals: bool,
	/// March x-slabs on the rayon pool.
	#[serde(default = "default_true")]
	pub parallel: bool,
	/// Scalar field to sample.
	#[serde(default)]
	pub shape: ShapeConfig,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
	#[default]
	Descending,
	Ascending,
}

/// Analytic field definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeConfig {
	/// Squared distance to `center` minus `radius²`.
	Sphere { center: [f64; 3], radius: f64 },
	/// 1 where every coordinate is at most `extent`, 0 elsewhere.
	Dam { extent: [f64; 3] },
}

impl Default for ShapeConfig {
	fn default() -> Self {
		ShapeConfig::Sphere {
			center: [0.5; 3],
			radius: 0.25,
		}
	}
}

fn default_output() -> PathBuf {
	PathBuf::from("mesh.obj")
}

fn default_cells() -> [usize; 3] {
	[32; 3]
}

fn default_padding() -> usize {
	1
}

fn default_max() -> [f64; 3] {
	[1.0; 3]
}

fn default_true() -> bool {
	true
}

impl Default for Config {
	fn default() -> Self {
		Self {
			output: default_output(),
			cells: default_cells(),
			padding: default_padding(),
			min: [0.0; 3],
			max: default_max(),
			iso_value: 0.0,
			normal_orientation: Orientation::default(),
			average_normals: true,
			parallel: true,
			shape: ShapeConfig::default(),
		}
	}
}

impl Config {
	/// Load configuration from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;
		let config: Config =
			toml::from_str(&content).with_context(|| "Failed to parse config TOML")?;

		config.validate()?;
		Ok(config)
	}

	/// Reject grids and shapes the extractor cannot sample.
	pub fn validate(&self) -> Result<()> {
		if self.cells.iter().any(|&n| n == 0) {
			anyhow::bail!("cells must be positive on every axis, got {:?}", self.cells);
		}
		if self.padding == 0 {
			anyhow::bail!("padding must be at least 1");
		}
		for axis in 0..3 {
			if !(self.min[axis] < self.max[axis]) {
				anyhow::bail!(
					"min must be below max on axis {}, got {} >= {}",
					axis,
					self.min[axis],
					self.max[axis]
				);
			}
		}
		if let ShapeConfig::Sphere { radius, .. } = self.shape {
			if !(radius > 0.0) {
				anyhow::bail!("sphere radius must be positive, got {}", radius);
			}
		}

		Ok(())
	}

	pub fn field_shape(&self) -> FieldShape<f64> {
		match self.shape {
			ShapeConfig::Sphere { center, radius } => FieldShape::Sphere {
				center: Vec3::from_array(center),
				radius,
			},
			ShapeConfig::Dam { extent } => FieldShape::Dam {
				extent: Vec3::from_array(extent),
			},
		}
	}

	pub fn orientation(&self) -> NormalOrientation {
		match self.normal_orientation {
			Orientation::Descending => NormalOrientation::Descending,
			Orientation::Ascending => NormalOrientation::Ascending,
		}
	}
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
