//! Lightmap UV CLI
//!
//! Generate lightmap UVs for meshes stored in a JSON scene file.

use clap::{Args, Parser, Subcommand, ValueEnum};
use lightmap_uv::{load_scene, UnwrapConfig, UnwrapOutput, UvMapper};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lightmap-uv")]
#[command(author, version, about = "Generate lightmap UVs for triangle meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Unwrap every mesh of a scene file
    Unwrap {
        /// Input JSON scene file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (extension added from the format when missing)
        #[arg(short, long)]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Also write a PNG of the packed layout
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Preview edge length in pixels
        #[arg(long, default_value = "1024")]
        preview_size: u32,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Show information about a scene file
    Info {
        /// Input JSON scene file
        #[arg(short, long)]
        input: PathBuf,
    },
}

/// Flags that override settings stored in the scene.
#[derive(Args, Default)]
struct SettingsArgs {
    /// Island margin as a fraction of the UV square
    #[arg(long)]
    margin: Option<f64>,

    /// Projection angle limit in degrees
    #[arg(long)]
    projection_limit: Option<f64>,

    /// Area weighting of projection normals (0.0 to 1.0)
    #[arg(long)]
    area_weight: Option<f64>,

    /// Do not connect faces through coincident vertices
    #[arg(long)]
    keep_doubles: bool,

    /// Pack each mesh into its own UV square
    #[arg(long)]
    separate_space: bool,

    /// Nest small islands inside larger ones before packing
    #[arg(long)]
    fill_holes: bool,

    /// Hole filling search quality (1 to 100)
    #[arg(long)]
    fill_holes_quality: Option<u32>,
}

impl SettingsArgs {
    fn apply(&self, mut config: UnwrapConfig) -> UnwrapConfig {
        if let Some(margin) = self.margin {
            config.island_margin = margin;
        }
        if let Some(limit) = self.projection_limit {
            config.projection_limit = limit;
        }
        if let Some(weight) = self.area_weight {
            config.area_weight = weight;
        }
        if self.keep_doubles {
            config.remove_doubles = false;
        }
        if self.separate_space {
            config.share_space = false;
        }
        if self.fill_holes {
            config.fill_holes = true;
        }
        if let Some(quality) = self.fill_holes_quality {
            config.fill_holes_quality = quality;
        }
        config
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Unwrapped buffers as JSON
    Json,
    /// Wavefront OBJ with the lightmap channel as texture coordinates
    Obj,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Obj => "obj",
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Unwrap {
            input,
            output,
            format,
            preview,
            preview_size,
            settings,
        } => {
            println!("Loading scene from {:?}...", input);
            let scene = load_scene(&input)?;
            println!(
                "  Loaded {} meshes ({} vertices, {} triangles)",
                scene.meshes.len(),
                scene.vertex_count(),
                scene.triangle_count()
            );

            let config = settings.apply(scene.config.clone().unwrap_or_default());
            print_config(&config);

            let result = UvMapper::with_config(config).unwrap(&scene.meshes)?;
            println!(
                "  Generated {} islands, {} vertices ({} added along seams), {} triangles",
                result.total_islands(),
                result.total_vertices(),
                result.total_vertices() - scene.vertex_count(),
                result.total_triangles()
            );
            println!("  World to texel ratio: {}", result.world_to_texel_ratio);

            export_output(&result, &output, format)?;
            if let Some(preview_path) = preview {
                let png = result.preview_png(preview_size)?;
                fs::write(&preview_path, &png)?;
                println!("Wrote {}x{} preview to {:?}", preview_size, preview_size, preview_path);
            }
        }
        Commands::Info { input } => {
            show_scene_info(&input)?;
        }
    }

    Ok(())
}

fn print_config(config: &UnwrapConfig) {
    println!("Unwrapping with config:");
    println!("  - Island margin: {}", config.island_margin);
    println!("  - Projection limit: {} degrees", config.projection_limit);
    println!("  - Area weight: {}", config.area_weight);
    println!("  - Remove doubles: {}", config.remove_doubles);
    println!("  - Shared space: {}", config.share_space);
    if config.fill_holes {
        println!("  - Fill holes: quality {}", config.fill_holes_quality);
    }
}

fn show_scene_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading scene from {:?}...", input);
    let scene = load_scene(input)?;

    println!("\nScene Info:");
    println!("  Meshes: {}", scene.meshes.len());
    for mesh in &scene.meshes {
        let attributes: Vec<String> = mesh.attributes.iter().map(|a| a.kind.to_string()).collect();
        println!(
            "    {}: {} vertices, {} triangles [{}]",
            mesh.name,
            mesh.vertex_count(),
            mesh.triangle_count(),
            attributes.join(", ")
        );
    }
    println!("  Vertices: {}", scene.vertex_count());
    println!("  Triangles: {}", scene.triangle_count());
    if scene.config.is_some() {
        println!("  Includes unwrap settings");
    }

    Ok(())
}

fn export_output(
    output: &UnwrapOutput,
    path: &Path,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(format.extension())
    };

    let contents = match format {
        OutputFormat::Json => output.to_json()?,
        OutputFormat::Obj => output.to_obj()?,
    };
    fs::write(&path, &contents)?;
    println!("Exported {} ({} bytes) to {:?}", format.extension().to_uppercase(), contents.len(), path);

    Ok(())
}
