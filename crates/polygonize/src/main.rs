//! Isosurface extraction driver.
//!
//! Samples an analytic field on a padded grid, extracts one level set with
//! marching cubes and writes the result as Wavefront OBJ.
//!
//! ```text
//! polygonize --config configs/sphere.toml
//! polygonize --cells 128 --iso -0.01 --output small_sphere.obj
//! ```

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use marching_cubes::{
	compute_normals, polygonize, save_obj, Grid, MeshConfig, ScalarField, Vec3,
};
use std::path::PathBuf;

use config::Config;

/// Marching cubes isosurface extractor.
#[derive(Parser, Debug)]
#[command(name = "polygonize")]
#[command(about = "Extracts an isosurface with marching cubes and writes it as OBJ")]
struct Args {
	/// Path to configuration TOML file (default: unit sphere).
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Output OBJ file, overrides the config.
	#[arg(short, long)]
	output: Option<PathBuf>,

	/// Iso-value, overrides the config.
	#[arg(long, allow_hyphen_values = true)]
	iso: Option<f64>,

	/// Cells on every axis, overrides the config.
	#[arg(long)]
	cells: Option<usize>,

	/// March cubes on a single thread.
	#[arg(long)]
	serial: bool,
}

impl Args {
	fn apply(&self, config: &mut Config) {
		if let Some(output) = &self.output {
			config.output = output.clone();
		}
		if let Some(iso) = self.iso {
			config.iso_value = iso;
		}
		if let Some(cells) = self.cells {
			config.cells = [cells; 3];
		}
		if self.serial {
			config.parallel = false;
		}
	}
}

fn main() -> Result<()> {
	let args = Args::parse();

	let mut config = match &args.config {
		Some(path) => {
			println!("Loading config from: {}", path.display());
			Config::load(path)?
		}
		None => Config::default(),
	};
	args.apply(&mut config);
	config.validate()?;

	println!(
		"Sampling {:?} on {}x{}x{} cells (padding {})",
		config.shape, config.cells[0], config.cells[1], config.cells[2], config.padding
	);

	let grid = Grid::new(
		config.cells,
		config.padding,
		Vec3::from_array(config.min),
		Vec3::from_array(config.max),
	)
	.context("Failed to build grid")?;
	let scalars = ScalarField::from_shape(&grid, &config.field_shape());
	let normals = compute_normals(&grid, &scalars, config.orientation())
		.context("Failed to compute normals")?;

	let mesh_config = MeshConfig::new()
		.with_iso_value(config.iso_value)
		.with_parallel(config.parallel)
		.with_average_normals(config.average_normals);
	let mesh = polygonize(&grid, &scalars, &normals, &mesh_config)
		.context("Failed to extract isosurface")?;

	let stats = &mesh.stats;
	println!(
		"Extracted {} vertices, {} triangles from {} active cubes ({} scanned)",
		mesh.vertex_count(),
		mesh.triangle_count(),
		stats.active_cubes,
		stats.cubes_scanned
	);
	println!(
		"  {} vertex records, {} shared ({:.1}%)",
		stats.vertex_records,
		stats.duplicate_vertices,
		stats.sharing_ratio() * 100.0
	);
	if stats.elapsed_us > 0 {
		println!(
			"  {:.2} ms ({})",
			stats.elapsed_us as f64 / 1000.0,
			if config.parallel { "parallel" } else { "serial" }
		);
	}

	if mesh.is_empty() {
		println!("Warning: iso-value {} produced no surface", config.iso_value);
	}

	save_obj(&mesh, &config.output)
		.with_context(|| format!("Failed to write: {}", config.output.display()))?;
	println!("\nDone! Output written to: {}", config.output.display());

	Ok(())
}
