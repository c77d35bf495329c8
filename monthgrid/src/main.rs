use std::fs;
use std::path::{Path, PathBuf};

use absence_core::{
    Dataset, GroupId, MemoryStore, MonthRef, RenderConfig, UserId, Viewer, month_sequence,
};
use anyhow::{Context, bail};
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use fonts::FontAsset;
use monthgrid_core::{Legend, MonthGrid, Rasterizer, RenderedMonth, RouteLinks};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "monthgrid")]
#[command(about = "Render absence calendars and their legend to PNG", long_about = None)]
struct Cli {
    /// Renderer settings (TOML); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Dataset (JSON); the built-in sample data when omitted
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one or more consecutive months with their region maps
    Month {
        /// Viewing user
        #[arg(long, default_value_t = 1)]
        user: UserId,

        /// Treat the viewer as admin (otherwise taken from the dataset)
        #[arg(long)]
        admin: bool,

        /// Active group; no group renders an empty calendar
        #[arg(long)]
        group: Option<GroupId>,

        /// First month's year, defaults to the current year
        #[arg(long)]
        year: Option<i32>,

        /// First month (1-12), defaults to the current month
        #[arg(long)]
        month: Option<u32>,

        /// Number of consecutive months
        #[arg(long, default_value_t = 1)]
        months: usize,

        /// Prefix for region links
        #[arg(long, default_value = "")]
        link_prefix: String,

        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Render the absence-type legend
    Legend {
        #[arg(long, default_value = "legend.png")]
        out: PathBuf,
    },

    /// Write the sample dataset as JSON
    SampleData {
        #[arg(long, default_value = "absences.json")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    let store = match &cli.data {
        Some(path) => MemoryStore::load(path)
            .with_context(|| format!("cannot load dataset {}", path.display()))?,
        None => MemoryStore::new(Dataset::sample()),
    };

    match cli.command {
        Command::Month {
            user,
            admin,
            group,
            year,
            month,
            months,
            link_prefix,
            out_dir,
        } => {
            if months == 0 {
                bail!("--months must be at least 1");
            }
            let today = Local::now().date_naive();
            let (y, m) = (year.unwrap_or(today.year()), month.unwrap_or(today.month()));
            let start =
                MonthRef::new(y, m).with_context(|| format!("no such month: {y}-{m:02}"))?;
            let viewer = Viewer {
                user_id: user,
                admin: admin || store.user(user).is_some_and(|u| u.admin),
                group_id: group,
            };

            let font = FontAsset::load(&config.font_path)?;
            let raster = Rasterizer::new(&font);
            let links = RouteLinks::new(link_prefix);
            let grid = MonthGrid::new(&config, &viewer, &links, &raster);
            fs::create_dir_all(&out_dir)
                .with_context(|| format!("cannot create {}", out_dir.display()))?;
            for mr in month_sequence(start, months) {
                let rendered = grid.build(&store, Some(mr.year()), Some(mr.month()))?;
                write_month(&out_dir, &rendered)?;
            }
        }
        Command::Legend { out } => {
            let font = FontAsset::load(&config.font_path)?;
            let raster = Rasterizer::new(&font);
            let legend = Legend::new(&raster).build(&store)?;
            write_file(&out, legend.png())?;
            info!(path = %out.display(), width = legend.width(), "wrote legend");
        }
        Command::SampleData { out } => {
            let json = serde_json::to_string_pretty(&Dataset::sample())?;
            write_file(&out, json.as_bytes())?;
            info!(path = %out.display(), "wrote sample dataset");
        }
    }

    Ok(())
}

// <year>-<month>.png next to its region map as HTML and JSON
fn write_month(dir: &Path, rendered: &RenderedMonth) -> anyhow::Result<()> {
    let mr = rendered.month();
    let stem = format!("{}-{:02}", mr.year(), mr.month());
    let png = dir.join(format!("{stem}.png"));
    write_file(&png, rendered.png())?;
    write_file(
        &dir.join(format!("{stem}.map.html")),
        rendered.regions().to_html().as_bytes(),
    )?;
    let json = serde_json::to_string_pretty(rendered.regions())?;
    write_file(&dir.join(format!("{stem}.regions.json")), json.as_bytes())?;
    info!(
        path = %png.display(),
        rows = rendered.rows().len(),
        regions = rendered.regions().len(),
        "wrote month"
    );
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    fs::write(path, bytes).with_context(|| format!("cannot write {}", path.display()))
}
